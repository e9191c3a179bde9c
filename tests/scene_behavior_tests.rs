use glam::Vec3;
use shape_scene::frame::FrameInfo;
use shape_scene::math::{Ray, Rgb};
use shape_scene::scene::{CubeMotion, FrameContext, HoverSpin, Material, Scene, SceneObject, Shape};
use shape_scene::scenes::{create_knot_scene, create_showcase_scene};
use shape_scene::tunables::Tunables;
use std::cell::Cell;
use std::rc::Rc;

fn cube() -> SceneObject {
    SceneObject::new("Cube", Shape::cube([1.0, 1.0, 1.0]), Material::solid(Rgb::WHITE))
}

fn sphere() -> SceneObject {
    SceneObject::new(
        "Sphere",
        Shape::Sphere {
            radius: 1.0,
            width_segments: 30,
            height_segments: 30,
        },
        Material::solid(Rgb::WHITE),
    )
    .interactive(true)
}

fn ray_at_origin() -> Ray {
    Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z)
}

fn ray_missing() -> Ray {
    Ray::new(Vec3::new(10.0, 10.0, 5.0), Vec3::NEG_Z)
}

#[cfg(test)]
mod cube_motion_tests {
    use super::*;

    #[test]
    fn test_rotation_x_advances_by_delta() {
        let tunables = Tunables::new();
        let mut scene = Scene::new();
        let id = scene.spawn_with(cube(), CubeMotion::default());

        let mut expected_x = 0.0;
        let mut time = 0.0;
        for delta in [0.0, 0.016, 0.5, 0.033, 1.25] {
            time += delta;
            let before = scene.get(id).unwrap().transform.rotation;
            scene.tick(&FrameInfo::new(0, time, delta), &tunables);
            let after = scene.get(id).unwrap().transform.rotation;

            assert!((after.x - before.x - delta).abs() < 1e-6, "rotation.x should advance by delta");
            assert!((after.y - before.y - 2.0 * delta).abs() < 1e-6, "rotation.y should advance by 2 * delta");
            expected_x += delta;
        }
        assert!((scene.get(id).unwrap().transform.rotation.x - expected_x).abs() < 1e-5);
    }

    #[test]
    fn test_position_z_follows_sine_of_elapsed() {
        let tunables = Tunables::new();
        let mut scene = Scene::new();
        let id = scene.spawn_with(cube(), CubeMotion::default());

        for time in [0.0f32, 0.25, 1.0, std::f32::consts::FRAC_PI_2, 3.0, 10.5] {
            scene.tick(&FrameInfo::new(0, time, 0.016), &tunables);
            // Frame time is carried in f32, so compare against f64 sine at f32 precision
            let z = scene.get(id).unwrap().transform.position.z as f64;
            let expected = (time as f64).sin();
            assert!((z - expected).abs() < 1e-6, "z = {} but sin({}) = {}", z, time, expected);
        }
    }
}

#[cfg(test)]
mod hover_spin_tests {
    use super::*;

    #[test]
    fn test_spin_speed_depends_on_hover() {
        let tunables = Tunables::new();
        let mut scene = Scene::new();
        let id = scene.spawn_with(sphere(), HoverSpin::default());
        let delta = 0.5;

        scene.tick(&FrameInfo::new(0, delta, delta), &tunables);
        let idle = scene.get(id).unwrap().transform.rotation.y;
        assert!((idle - 0.2 * delta).abs() < 1e-6, "idle spin should be 0.2 * delta");

        scene.pointer_move(&ray_at_origin());
        assert!(scene.get(id).unwrap().is_hovered());

        scene.tick(&FrameInfo::new(1, 2.0 * delta, delta), &tunables);
        let hovered = scene.get(id).unwrap().transform.rotation.y - idle;
        assert!((hovered - delta).abs() < 1e-6, "hovered spin should be 1.0 * delta");
    }

    #[test]
    fn test_hover_changes_color() {
        let tunables = Tunables::new();
        let spin = HoverSpin::default();
        let mut scene = Scene::new();
        let id = scene.spawn_with(sphere(), spin);

        scene.tick(&FrameInfo::new(0, 0.0, 0.016), &tunables);
        assert_eq!(scene.get(id).unwrap().material.color, Rgb::named("lightblue").unwrap());

        scene.pointer_move(&ray_at_origin());
        scene.tick(&FrameInfo::new(1, 0.016, 0.016), &tunables);
        assert_eq!(scene.get(id).unwrap().material.color, Rgb::named("orange").unwrap());
    }

    #[test]
    fn test_click_toggles_scale() {
        let tunables = Tunables::new();
        let mut scene = Scene::new();
        let id = scene.spawn_with(sphere(), HoverSpin::default());
        let frame = FrameInfo::new(0, 0.0, 0.0);

        scene.tick(&frame, &tunables);
        assert_eq!(scene.get(id).unwrap().transform.scale, Vec3::ONE);

        assert_eq!(scene.pointer_click(&ray_at_origin()), vec![id]);
        scene.tick(&frame, &tunables);
        assert_eq!(scene.get(id).unwrap().transform.scale, Vec3::splat(1.5));

        scene.pointer_click(&ray_at_origin());
        scene.tick(&frame, &tunables);
        assert_eq!(scene.get(id).unwrap().transform.scale, Vec3::ONE, "two clicks restore the scale");
    }

    #[test]
    fn test_missed_click_changes_nothing() {
        let mut scene = Scene::new();
        let id = scene.spawn_with(sphere(), HoverSpin::default());

        assert!(scene.pointer_click(&ray_missing()).is_empty());
        assert!(!scene.get(id).unwrap().is_clicked());
    }
}

#[cfg(test)]
mod hover_lifecycle_tests {
    use super::*;

    #[test]
    fn test_hover_is_stable_across_frames() {
        let tunables = Tunables::new();
        let mut scene = Scene::new();
        let id = scene.spawn_with(sphere(), HoverSpin::default());

        scene.pointer_move(&ray_at_origin());
        for n in 0..120 {
            scene.tick(&FrameInfo::new(n, n as f32 / 60.0, 1.0 / 60.0), &tunables);
            assert!(scene.get(id).unwrap().is_hovered(), "frame {} dropped hover", n);
        }

        scene.pointer_leave();
        for n in 120..240 {
            scene.tick(&FrameInfo::new(n, n as f32 / 60.0, 1.0 / 60.0), &tunables);
            assert!(!scene.get(id).unwrap().is_hovered(), "frame {} regained hover", n);
        }
    }

    #[test]
    fn test_moving_off_the_object_leaves() {
        let mut scene = Scene::new();
        let id = scene.spawn(sphere());

        scene.pointer_move(&ray_at_origin());
        assert_eq!(scene.hovered(), &[id]);

        scene.pointer_move(&ray_missing());
        assert!(scene.hovered().is_empty());
        assert!(!scene.get(id).unwrap().is_hovered());
    }
}

#[cfg(test)]
mod callback_registry_tests {
    use super::*;

    #[test]
    fn test_despawned_callback_never_runs() {
        let calls = Rc::new(Cell::new(0));
        let mut scene = Scene::new();

        let counter = calls.clone();
        let id = scene.spawn_with(cube(), move |_: &mut SceneObject, _: &FrameContext<'_>| {
            counter.set(counter.get() + 1);
        });
        let tunables = Tunables::new();

        scene.tick(&FrameInfo::new(0, 0.0, 0.016), &tunables);
        assert_eq!(calls.get(), 1);

        assert!(scene.despawn(id).is_some());
        assert_eq!(scene.callback_count(), 0);

        scene.tick(&FrameInfo::new(1, 0.016, 0.016), &tunables);
        assert_eq!(calls.get(), 1, "callback ran after despawn");
    }

    #[test]
    fn test_each_callback_runs_once_per_tick() {
        let calls = Rc::new(Cell::new(0));
        let mut scene = Scene::new();
        for _ in 0..3 {
            let counter = calls.clone();
            scene.spawn_with(cube(), move |_: &mut SceneObject, _: &FrameContext<'_>| {
                counter.set(counter.get() + 1);
            });
        }

        scene.tick(&FrameInfo::new(0, 0.0, 0.016), &Tunables::new());
        assert_eq!(calls.get(), 3);
    }
}

#[cfg(test)]
mod preset_tests {
    use super::*;
    use shape_scene::scenes::ScenePreset;
    use std::collections::HashSet;

    #[test]
    fn test_switching_presets_never_reuses_ids() {
        let mut tunables = Tunables::new();
        let cubes = ScenePreset::Cubes.build(&mut tunables).unwrap();
        let showcase = ScenePreset::Showcase.build(&mut tunables).unwrap();
        let knot = ScenePreset::Knot.build(&mut tunables).unwrap();

        let old: HashSet<_> = cubes.objects().iter().map(|o| o.id()).collect();
        for object in showcase.objects().iter().chain(knot.objects()) {
            assert!(
                !old.contains(&object.id()),
                "'{}' got {:?}, already used by the cube stack",
                object.name,
                object.id()
            );
        }
        assert!(showcase.objects().iter().all(|o| knot.get(o.id()).is_none()));
    }

    #[test]
    fn test_knot_follows_radius_tunable() {
        let mut tunables = Tunables::new();
        let mut scene = create_knot_scene(&mut tunables).unwrap();
        let knot = scene.objects()[0].id();
        assert_eq!(scene.get(knot).unwrap().mesh_revision(), 0);

        tunables.set_number("radius", 3.0).unwrap();
        tunables.set_color("color", Rgb::from_hex(0xff69b4)).unwrap();
        scene.tick(&FrameInfo::new(0, 0.0, 0.016), &tunables);

        let object = scene.get(knot).unwrap();
        assert!(matches!(object.shape(), Shape::TorusKnot { radius, .. } if *radius == 3.0));
        assert_eq!(object.mesh_revision(), 1);
        assert_eq!(object.material.color, Rgb::from_hex(0xff69b4));

        // Unchanged tunables keep the mesh
        scene.tick(&FrameInfo::new(1, 0.016, 0.016), &tunables);
        assert_eq!(scene.get(knot).unwrap().mesh_revision(), 1);
    }

    #[test]
    fn test_light_follows_tunables() {
        let mut tunables = Tunables::new();
        let mut scene = create_knot_scene(&mut tunables).unwrap();

        tunables.set_number("lightIntensity", 2.0).unwrap();
        tunables.set_color("lightColor", Rgb::from_hex(0xff0000)).unwrap();
        scene.tick(&FrameInfo::new(0, 0.0, 0.016), &tunables);

        assert_eq!(scene.lighting.directional.intensity, 2.0);
        assert_eq!(scene.lighting.directional.color, Rgb::from_hex(0xff0000));
        assert_eq!(scene.lighting.ambient.intensity, 0.1);
    }

    #[test]
    fn test_showcase_torus_is_static() {
        let mut tunables = Tunables::new();
        let mut scene = create_showcase_scene(&mut tunables).unwrap();
        let torus = scene.objects().iter().find(|o| o.name == "Torus").unwrap().id();
        let before = scene.get(torus).unwrap().transform;

        for n in 0..10 {
            scene.tick(&FrameInfo::new(n, n as f32 * 0.1, 0.1), &tunables);
        }
        assert_eq!(scene.get(torus).unwrap().transform, before);
    }
}
