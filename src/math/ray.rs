use glam::{Mat4, Vec3};

/// Half-line used for pointer picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Map the ray through `matrix`. The direction is not renormalized,
    /// so a distance `t` names the same point in both spaces.
    pub fn transformed(&self, matrix: &Mat4) -> Ray {
        Ray {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }
}

/// Slab test. Returns the entry distance, the exit distance when the origin
/// is inside the box, or -1.0 on a miss.
pub fn intersect_aabb(ray_origin: Vec3, ray_dir: Vec3, box_min: Vec3, box_max: Vec3) -> f32 {
    const EPSILON: f32 = 1e-8;

    // Near-zero components are clamped to a huge inverse instead of dividing by zero
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() < EPSILON { 1.0 / EPSILON.copysign(ray_dir.x) } else { 1.0 / ray_dir.x },
        if ray_dir.y.abs() < EPSILON { 1.0 / EPSILON.copysign(ray_dir.y) } else { 1.0 / ray_dir.y },
        if ray_dir.z.abs() < EPSILON { 1.0 / EPSILON.copysign(ray_dir.z) } else { 1.0 / ray_dir.z },
    );

    let t_min = (box_min - ray_origin) * inv_dir;
    let t_max = (box_max - ray_origin) * inv_dir;

    let t1 = t_min.min(t_max);
    let t2 = t_min.max(t_max);

    let t_near = t1.x.max(t1.y).max(t1.z);
    let t_far = t2.x.min(t2.y).min(t2.z);

    if t_near > t_far || t_far < 0.0 {
        return -1.0;
    }

    if t_near < 0.0 {
        t_far
    } else {
        t_near
    }
}

/// Möller-Trumbore ray-triangle intersection, double sided.
/// Returns the distance along the ray.
pub fn intersect_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > EPSILON).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_aabb_hit() {
        let t = intersect_aabb(
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(5.0, -1.0, -1.0),
            Vec3::new(10.0, 1.0, 1.0),
        );
        assert!((t - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_intersect_aabb_miss() {
        let t = intersect_aabb(
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(5.0, 2.0, 2.0),
            Vec3::new(10.0, 3.0, 3.0),
        );
        assert!(t < 0.0);
    }

    #[test]
    fn test_intersect_aabb_inside() {
        let t = intersect_aabb(
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::X,
            Vec3::new(0.0, -1.0, -1.0),
            Vec3::new(10.0, 1.0, 1.0),
        );
        assert!((t - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_triangle_hit_front_and_back() {
        let (v0, v1, v2) = (
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let front = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z);
        let back = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::Z);

        assert!((intersect_triangle(&front, v0, v1, v2).unwrap() - 3.0).abs() < 1e-5);
        assert!((intersect_triangle(&back, v0, v1, v2).unwrap() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_triangle_miss_and_behind() {
        let (v0, v1, v2) = (
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let outside = Ray::new(Vec3::new(3.0, 0.0, 3.0), Vec3::NEG_Z);
        let behind = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Z);
        let parallel = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::X);

        assert!(intersect_triangle(&outside, v0, v1, v2).is_none());
        assert!(intersect_triangle(&behind, v0, v1, v2).is_none());
        assert!(intersect_triangle(&parallel, v0, v1, v2).is_none());
    }

    #[test]
    fn test_transformed_ray_keeps_unnormalized_direction() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let to_local = Mat4::from_scale(Vec3::splat(2.0));
        let local = ray.transformed(&to_local);

        // t = 3 lands on z = 7 in world space and z = 14 in local space
        assert_eq!(local.origin, Vec3::new(0.0, 0.0, 20.0));
        assert_eq!(local.direction, Vec3::new(0.0, 0.0, -2.0));
    }
}
