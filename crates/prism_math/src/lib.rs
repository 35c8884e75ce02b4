//! Prism math - value types shared by the tracer.
//!
//! Re-exports `glam` and adds the ray, interval, bounding box and
//! transform types the intersection core is written against.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::{Mat4Ext, Transform, TransformError};

/// Tolerance used for float comparisons, surface bias offsets and
/// degenerate-coefficient checks throughout the tracer.
pub const EPSILON: f32 = 1e-4;

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - n * 2.0 * v.dot(n)
}
