mod common;
mod cubes;
mod knot;
mod showcase;

use std::fmt;

use clap::ValueEnum;

use crate::scene::Scene;
use crate::tunables::{self, Tunables};

pub use common::add_light_rig;
pub use cubes::create_cubes_scene;
pub use knot::create_knot_scene;
pub use showcase::create_showcase_scene;

/// Selectable scene compositions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ScenePreset {
    /// Tunable wobbling torus knot
    #[default]
    Knot,
    /// Group of four tumbling cubes
    Cubes,
    /// Cube, interactive sphere and torus side by side
    Showcase,
}

impl ScenePreset {
    pub const ALL: [ScenePreset; 3] = [ScenePreset::Knot, ScenePreset::Cubes, ScenePreset::Showcase];

    pub fn label(&self) -> &'static str {
        match self {
            ScenePreset::Knot => "Torus Knot",
            ScenePreset::Cubes => "Cube Stack",
            ScenePreset::Showcase => "Showcase",
        }
    }

    /// Build the scene, registering any tunables it reads
    pub fn build(&self, tunables: &mut Tunables) -> tunables::Result<Scene> {
        let scene = match self {
            ScenePreset::Knot => create_knot_scene(tunables)?,
            ScenePreset::Cubes => create_cubes_scene(tunables)?,
            ScenePreset::Showcase => create_showcase_scene(tunables)?,
        };
        log::info!("Scene '{}' created: {} objects", self, scene.len());
        Ok(scene)
    }
}

impl fmt::Display for ScenePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
