mod aabb;
mod color;
mod ray;

pub use aabb::AABB;
pub use color::{ColorParseError, Rgb};
pub use ray::{intersect_aabb, intersect_triangle, Ray};
