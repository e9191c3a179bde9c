use glam::Vec3;

use crate::scene::{CubeMotion, Material, Scene, SceneObject, Shape};
use crate::tunables::{self, Tunables};

use super::common::{add_light_rig, css};

/// Four tumbling cubes in a group lowered by one unit
pub fn create_cubes_scene(tunables: &mut Tunables) -> tunables::Result<Scene> {
    let mut scene = Scene::new();
    add_light_rig(&mut scene, tunables)?;

    let group = Vec3::new(0.0, -1.0, 0.0);
    let cubes = [
        ([1.0, 0.0, 0.0], "green"),
        ([-1.0, 0.0, 0.0], "orange"),
        ([1.0, 2.0, 0.0], "grey"),
        ([-1.0, 2.0, 0.0], "blue"),
    ];

    for (position, color) in cubes {
        let cube = SceneObject::new(
            format!("Cube ({color})"),
            Shape::cube([1.0, 1.0, 1.0]),
            Material::solid(css(color)),
        )
        .at(Vec3::from_array(position))
        .in_group(group);
        scene.spawn_with(cube, CubeMotion::default());
    }

    Ok(scene)
}
