use glam::Vec3;

/// Axis-Aligned Bounding Box
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, `None` for an empty iterator
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| match acc {
            None => Some(AABB::new(p, p)),
            Some(b) => Some(AABB::new(b.min.min(p), b.max.max(p))),
        })
    }
}
