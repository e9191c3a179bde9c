use crate::scene::{Material, Scene, SceneObject, Shape, TunedKnot, Wobble};
use crate::tunables::{self, Tunables};

use super::common::{add_light_rig, css};

pub const KNOT_COLOR_KEY: &str = "color";
pub const KNOT_RADIUS_KEY: &str = "radius";

/// Wobbling torus knot at the origin; color and radius live on the panel
pub fn create_knot_scene(tunables: &mut Tunables) -> tunables::Result<Scene> {
    let mut scene = Scene::new();
    add_light_rig(&mut scene, tunables)?;

    let color = tunables.register_color(KNOT_COLOR_KEY, css("lightBlue"))?;
    let radius = tunables.register_number(KNOT_RADIUS_KEY, 5.0, 1.0, 10.0, 0.5)?;

    let material = Material {
        color,
        wireframe: false,
        wobble: Some(Wobble { factor: 5.0, speed: 2.0 }),
    };
    let knot = SceneObject::new("Torus Knot", Shape::torus_knot(radius, 0.1, 1000, 50), material);

    scene.spawn_with(
        knot,
        TunedKnot {
            color_key: KNOT_COLOR_KEY.to_string(),
            radius_key: KNOT_RADIUS_KEY.to_string(),
        },
    );

    Ok(scene)
}
