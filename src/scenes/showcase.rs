use glam::Vec3;

use crate::scene::{CubeMotion, HoverSpin, Material, Scene, SceneObject, Shape};
use crate::tunables::{self, Tunables};

use super::common::{add_light_rig, css};

/// One of each animated primitive: cube, hoverable sphere, static torus
pub fn create_showcase_scene(tunables: &mut Tunables) -> tunables::Result<Scene> {
    let mut scene = Scene::new();
    add_light_rig(&mut scene, tunables)?;

    let cube = SceneObject::new("Cube", Shape::cube([1.0, 1.0, 1.0]), Material::solid(css("orange")))
        .at(Vec3::new(-2.5, 0.0, 0.0));
    scene.spawn_with(cube, CubeMotion::default());

    let spin = HoverSpin::default();
    let sphere = SceneObject::new(
        "Sphere",
        Shape::Sphere {
            radius: 1.0,
            width_segments: 30,
            height_segments: 30,
        },
        Material {
            color: spin.idle_color,
            wireframe: true,
            wobble: None,
        },
    )
    .interactive(true);
    scene.spawn_with(sphere, spin);

    let torus = SceneObject::new(
        "Torus",
        Shape::Torus {
            radius: 0.8,
            tube: 0.1,
            radial_segments: 30,
            tubular_segments: 30,
        },
        Material::solid(css("blue")),
    )
    .at(Vec3::new(2.5, 0.0, 0.0));
    scene.spawn(torus);

    Ok(scene)
}
