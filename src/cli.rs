// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::scenes::ScenePreset;

#[derive(Parser, Debug, Clone)]
#[command(name = "shape-scene")]
#[command(about = "Interactive primitive shapes with a live tweak panel", long_about = None)]
pub struct Cli {
    /// Disable UI elements and console output
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Scene preset to start with
    #[arg(long, value_enum, env = "SCENE", default_value_t = ScenePreset::Knot)]
    pub scene: ScenePreset,

    /// JSON file of tunable overrides, e.g. {"radius": 3, "color": "hotpink"}
    #[arg(long, value_name = "FILE")]
    pub tunables: Option<PathBuf>,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,
}
