mod controller;
mod gpu_context;
mod input_adapter;

pub use controller::{Button, Controller};
pub use gpu_context::GpuContext;
pub use input_adapter::{WinitController, CLICK_DRAG_THRESHOLD};
