pub mod camera;
pub mod cli;
pub mod core;
pub mod frame;
pub mod geometry;
pub mod math;
pub mod renderer;
pub mod scene;
pub mod scenes;
pub mod tunables;
pub mod types;
pub mod ui;

pub use scene::{ObjectId, Scene, SceneObject};
pub use scenes::ScenePreset;
pub use tunables::Tunables;
