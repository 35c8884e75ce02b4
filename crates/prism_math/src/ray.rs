use crate::{Mat4, Vec3};

/// A ray in 3D space with origin, direction, and recursion depth.
///
/// Camera rays start at depth 0. Every reflected or refracted ray is
/// spawned with `depth + 1`, and the depth is the only thing bounding the
/// recursive work done for one primary ray.
///
/// The direction does not need to be unit length for intersection math,
/// but shading assumes it is.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub depth: u32,
}

impl Ray {
    /// Create a new primary ray (depth 0).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            depth: 0,
        }
    }

    /// Create a ray at an explicit recursion depth.
    pub fn with_depth(origin: Vec3, direction: Vec3, depth: u32) -> Self {
        Self {
            origin,
            direction,
            depth,
        }
    }

    /// Spawn a secondary ray one level deeper than this one.
    #[inline]
    pub fn spawn(&self, origin: Vec3, direction: Vec3) -> Self {
        Self::with_depth(origin, direction, self.depth + 1)
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Map the ray through a matrix.
    ///
    /// The direction is transformed as a vector, so it is not renormalized;
    /// `t` values computed against the result stay valid for `self`.
    pub fn transform(&self, matrix: &Mat4) -> Self {
        Self {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
            depth: self.depth,
        }
    }
}
