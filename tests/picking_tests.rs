use glam::Vec3;
use shape_scene::camera::OrbitCamera;
use shape_scene::math::{intersect_aabb, intersect_triangle, Ray, Rgb};
use shape_scene::scene::{Material, Scene, SceneObject, Shape};
use shape_scene::scenes::create_showcase_scene;
use shape_scene::tunables::Tunables;

fn unit_cube(name: &str, z: f32) -> SceneObject {
    SceneObject::new(name, Shape::cube([1.0, 1.0, 1.0]), Material::solid(Rgb::WHITE)).at(Vec3::new(0.0, 0.0, z))
}

fn down_the_z_axis() -> Ray {
    Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z)
}

#[cfg(test)]
mod ray_primitive_tests {
    use super::*;

    #[test]
    fn test_ray_hits_aabb_from_outside() {
        let t = intersect_aabb(Vec3::ZERO, Vec3::X, Vec3::new(5.0, -1.0, -1.0), Vec3::new(10.0, 1.0, 1.0));
        assert!((t - 5.0).abs() < 0.001, "Hit distance should be ~5.0, got {}", t);
    }

    #[test]
    fn test_ray_pointing_away_misses_aabb() {
        let t = intersect_aabb(Vec3::ZERO, Vec3::NEG_X, Vec3::new(5.0, -1.0, -1.0), Vec3::new(10.0, 1.0, 1.0));
        assert_eq!(t, -1.0, "Ray pointing away should miss");
    }

    #[test]
    fn test_ray_parallel_to_flat_box_misses() {
        let t = intersect_aabb(
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::X,
            Vec3::new(5.0, -1.0, 0.0),
            Vec3::new(10.0, 1.0, 0.0),
        );
        assert_eq!(t, -1.0);
    }

    #[test]
    fn test_triangle_hit_is_double_sided() {
        let (v0, v1, v2) = (Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0));

        let front = intersect_triangle(&Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z), v0, v1, v2);
        let back = intersect_triangle(&Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::Z), v0, v1, v2);

        assert!((front.unwrap() - 3.0).abs() < 1e-5);
        assert!((back.unwrap() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_triangle_miss_outside_edges() {
        let hit = intersect_triangle(
            &Ray::new(Vec3::new(2.0, 2.0, 3.0), Vec3::NEG_Z),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        assert!(hit.is_none());
    }
}

#[cfg(test)]
mod dispatch_tests {
    use super::*;

    #[test]
    fn test_hits_sorted_nearest_first() {
        let mut scene = Scene::new();
        let far = scene.spawn(unit_cube("far", -3.0).interactive(false));
        let near = scene.spawn(unit_cube("near", 3.0).interactive(false));
        let middle = scene.spawn(unit_cube("middle", 0.0).interactive(false));

        let hits = scene.raycast(&down_the_z_axis());
        let order: Vec<_> = hits.iter().map(|h| h.id).collect();
        assert_eq!(order, vec![near, middle, far]);
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
        assert!((hits[0].distance - 6.5).abs() < 1e-4);
    }

    #[test]
    fn test_enter_stops_at_first_blocking_object() {
        let mut scene = Scene::new();
        let front = scene.spawn(unit_cube("front", 3.0).interactive(false));
        let blocker = scene.spawn(unit_cube("blocker", 0.0).interactive(true));
        let hidden = scene.spawn(unit_cube("hidden", -3.0).interactive(false));

        scene.pointer_move(&down_the_z_axis());

        assert_eq!(scene.hovered(), &[front, blocker]);
        assert!(scene.get(front).unwrap().is_hovered());
        assert!(scene.get(blocker).unwrap().is_hovered());
        assert!(!scene.get(hidden).unwrap().is_hovered(), "propagation should stop at the blocker");
    }

    #[test]
    fn test_click_stops_at_first_blocking_object() {
        let mut scene = Scene::new();
        let blocker = scene.spawn(unit_cube("blocker", 3.0).interactive(true));
        let hidden = scene.spawn(unit_cube("hidden", 0.0).interactive(false));

        assert_eq!(scene.pointer_click(&down_the_z_axis()), vec![blocker]);
        assert!(scene.get(blocker).unwrap().is_clicked());
        assert!(!scene.get(hidden).unwrap().is_clicked());
    }

    #[test]
    fn test_pointer_leave_clears_all_hover() {
        let mut scene = Scene::new();
        let a = scene.spawn(unit_cube("a", 3.0).interactive(false));
        let b = scene.spawn(unit_cube("b", 0.0).interactive(false));

        scene.pointer_move(&down_the_z_axis());
        assert_eq!(scene.hovered().len(), 2);

        scene.pointer_leave();
        assert!(scene.hovered().is_empty());
        assert!(!scene.get(a).unwrap().is_hovered());
        assert!(!scene.get(b).unwrap().is_hovered());
    }

    #[test]
    fn test_group_anchor_moves_pick_target() {
        let mut scene = Scene::new();
        let id = scene.spawn(unit_cube("lowered", 0.0).in_group(Vec3::new(0.0, -1.0, 0.0)).interactive(false));

        // Ray along the original center now passes over the cube top edge
        let through_old_center = Ray::new(Vec3::new(0.0, 0.25, 10.0), Vec3::NEG_Z);
        let through_new_center = Ray::new(Vec3::new(0.0, -1.0, 10.0), Vec3::NEG_Z);

        assert!(scene.raycast(&through_old_center).is_empty());
        assert_eq!(scene.raycast(&through_new_center)[0].id, id);
    }
}

#[cfg(test)]
mod camera_picking_tests {
    use super::*;

    #[test]
    fn test_center_pixel_picks_showcase_sphere() {
        let mut tunables = Tunables::new();
        let mut scene = create_showcase_scene(&mut tunables).unwrap();
        let camera = OrbitCamera::new(800.0 / 600.0);

        let ray = camera.screen_ray(400.0, 300.0, 800.0, 600.0);
        scene.pointer_move(&ray);

        let hovered: Vec<_> = scene.hovered().iter().map(|id| scene.get(*id).unwrap().name.clone()).collect();
        assert_eq!(hovered, vec!["Sphere".to_string()]);
    }

    #[test]
    fn test_corner_pixel_picks_nothing() {
        let mut tunables = Tunables::new();
        let mut scene = create_showcase_scene(&mut tunables).unwrap();
        let camera = OrbitCamera::new(800.0 / 600.0);

        scene.pointer_move(&camera.screen_ray(0.0, 0.0, 800.0, 600.0));
        assert!(scene.hovered().is_empty());
    }
}
