// Affine transforms with a cached inverse.
//
// Every scene-graph node, light, camera and field sampler owns one of these.
// The inverse and its transpose are computed once when the transform is set
// and never patched in place afterwards.

use glam::{Mat4, Vec3};
use thiserror::Error;

use crate::Aabb;

/// Errors produced while building a transform.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TransformError {
    #[error("transform is not invertible (determinant {determinant})")]
    Singular { determinant: f32 },
}

/// An invertible affine map together with its precomputed inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Mat4,
    inverse: Mat4,
    inverse_transpose: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        matrix: Mat4::IDENTITY,
        inverse: Mat4::IDENTITY,
        inverse_transpose: Mat4::IDENTITY,
    };

    /// Wrap a matrix, rejecting singular or non-finite ones.
    pub fn new(matrix: Mat4) -> Result<Self, TransformError> {
        let determinant = matrix.determinant();
        if determinant == 0.0 || !determinant.is_finite() {
            return Err(TransformError::Singular { determinant });
        }
        let inverse = matrix.inverse();
        if !inverse.is_finite() {
            return Err(TransformError::Singular { determinant });
        }
        Ok(Self {
            matrix,
            inverse,
            inverse_transpose: inverse.transpose(),
        })
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let offset = Vec3::new(x, y, z);
        Self::from_parts(Mat4::from_translation(offset), Mat4::from_translation(-offset))
    }

    /// Non-uniform scale. Any zero factor makes the map singular.
    pub fn scaling(x: f32, y: f32, z: f32) -> Result<Self, TransformError> {
        Self::new(Mat4::from_scale(Vec3::new(x, y, z)))
    }

    pub fn rotation_x(radians: f32) -> Self {
        Self::from_parts(Mat4::from_rotation_x(radians), Mat4::from_rotation_x(-radians))
    }

    pub fn rotation_y(radians: f32) -> Self {
        Self::from_parts(Mat4::from_rotation_y(radians), Mat4::from_rotation_y(-radians))
    }

    pub fn rotation_z(radians: f32) -> Self {
        Self::from_parts(Mat4::from_rotation_z(radians), Mat4::from_rotation_z(-radians))
    }

    /// Shear where each coordinate moves in proportion to the other two.
    pub fn shearing(xy: f32, xz: f32, yx: f32, yz: f32, zx: f32, zy: f32) -> Result<Self, TransformError> {
        // glam is column-major: column j holds the coefficients of input axis j.
        let matrix = Mat4::from_cols_array(&[
            1.0, yx, zx, 0.0, //
            xy, 1.0, zy, 0.0, //
            xz, yz, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        Self::new(matrix)
    }

    /// World-to-eye transform for a viewer at `from` looking at `to`.
    pub fn view(from: Vec3, to: Vec3, up: Vec3) -> Result<Self, TransformError> {
        Self::new(Mat4::look_at_rh(from, to, up))
    }

    /// Apply `self` first, then `next`.
    pub fn then(&self, next: &Transform) -> Transform {
        Self::from_parts(next.matrix * self.matrix, self.inverse * next.inverse)
    }

    fn from_parts(matrix: Mat4, inverse: Mat4) -> Self {
        Self {
            matrix,
            inverse,
            inverse_transpose: inverse.transpose(),
        }
    }

    #[inline]
    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    #[inline]
    pub fn inverse(&self) -> &Mat4 {
        &self.inverse
    }

    /// Map a point from parent space into this transform's local space.
    #[inline]
    pub fn point_to_local(&self, point: Vec3) -> Vec3 {
        self.inverse.transform_point3(point)
    }

    /// Map a point from local space out to parent space.
    #[inline]
    pub fn point_to_parent(&self, point: Vec3) -> Vec3 {
        self.matrix.transform_point3(point)
    }

    /// Map a surface normal from local space to parent space.
    ///
    /// Uses the inverse transpose with the homogeneous component dropped.
    /// The result is NOT renormalized.
    #[inline]
    pub fn normal_to_parent(&self, normal: Vec3) -> Vec3 {
        self.inverse_transpose.transform_vector3(normal)
    }

    /// Position of the local origin in parent space.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.matrix.transform_point3(Vec3::ZERO)
    }
}

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    ///
    /// Unbounded boxes map to `Aabb::UNIVERSE`, since infinite corners
    /// produce NaN under rotation.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl Mat4Ext for Mat4 {
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        if aabb.is_empty() {
            return Aabb::EMPTY;
        }
        if !aabb.is_finite() {
            return Aabb::UNIVERSE;
        }

        let corners = aabb.corners();
        let first = self.transform_point3(corners[0]);
        let (lo, hi) = corners[1..]
            .iter()
            .map(|&corner| self.transform_point3(corner))
            .fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));

        Aabb::from_points(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EPSILON;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_translation_moves_points_not_vectors() {
        let t = Transform::translation(5.0, -3.0, 2.0);

        assert_eq!(t.point_to_parent(Vec3::new(-3.0, 4.0, 5.0)), Vec3::new(2.0, 1.0, 7.0));
        assert_eq!(t.point_to_local(Vec3::new(-3.0, 4.0, 5.0)), Vec3::new(-8.0, 7.0, 3.0));
        assert_eq!(t.matrix().transform_vector3(Vec3::new(-3.0, 4.0, 5.0)), Vec3::new(-3.0, 4.0, 5.0));
    }

    #[test]
    fn test_scaling_inverse() {
        let t = Transform::scaling(2.0, 3.0, 4.0).unwrap();

        assert_eq!(t.point_to_parent(Vec3::new(-4.0, 6.0, 8.0)), Vec3::new(-8.0, 18.0, 32.0));
        assert!(t.point_to_local(Vec3::new(-4.0, 6.0, 8.0)).abs_diff_eq(Vec3::new(-2.0, 2.0, 2.0), EPSILON));
    }

    #[test]
    fn test_zero_scale_is_singular() {
        let err = Transform::scaling(1.0, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, TransformError::Singular { .. }));
    }

    #[test]
    fn test_rotation_x_quarter() {
        let t = Transform::rotation_x(FRAC_PI_2);
        let p = t.point_to_parent(Vec3::Y);
        assert!(p.abs_diff_eq(Vec3::Z, EPSILON));
        assert!(t.point_to_local(p).abs_diff_eq(Vec3::Y, EPSILON));
    }

    #[test]
    fn test_shearing_x_in_proportion_to_y() {
        let t = Transform::shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(t.point_to_parent(Vec3::new(2.0, 3.0, 4.0)), Vec3::new(5.0, 3.0, 4.0));

        let t = Transform::shearing(0.0, 0.0, 0.0, 0.0, 0.0, 1.0).unwrap();
        assert_eq!(t.point_to_parent(Vec3::new(2.0, 3.0, 4.0)), Vec3::new(2.0, 3.0, 7.0));
    }

    #[test]
    fn test_then_applies_in_sequence() {
        let rotate = Transform::rotation_x(FRAC_PI_2);
        let scale = Transform::scaling(5.0, 5.0, 5.0).unwrap();
        let translate = Transform::translation(10.0, 5.0, 7.0);
        let chained = rotate.then(&scale).then(&translate);

        let p = chained.point_to_parent(Vec3::new(1.0, 0.0, 1.0));
        assert!(p.abs_diff_eq(Vec3::new(15.0, 0.0, 7.0), EPSILON));
        assert!(chained.point_to_local(p).abs_diff_eq(Vec3::new(1.0, 0.0, 1.0), EPSILON));
    }

    #[test]
    fn test_normal_to_parent_uses_inverse_transpose() {
        let t = Transform::scaling(1.0, 0.5, 1.0).unwrap();
        let s = std::f32::consts::FRAC_1_SQRT_2;
        let n = t.normal_to_parent(Vec3::new(0.0, s, -s)).normalize();

        assert!(n.abs_diff_eq(Vec3::new(0.0, 0.89443, -0.44721), EPSILON));
    }

    #[test]
    fn test_default_view_is_identity() {
        let view = Transform::view(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y).unwrap();
        assert!(view.matrix().abs_diff_eq(Mat4::IDENTITY, EPSILON));
    }

    #[test]
    fn test_view_moves_the_world() {
        let view = Transform::view(Vec3::new(0.0, 0.0, 8.0), Vec3::ZERO, Vec3::Y).unwrap();
        assert!(view.matrix().abs_diff_eq(Mat4::from_translation(Vec3::new(0.0, 0.0, -8.0)), EPSILON));
    }

    #[test]
    fn test_transform_aabb_rotated() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));
        let rotated = Mat4::from_rotation_y(FRAC_PI_4).transform_aabb(&aabb);
        let s = 2.0_f32.sqrt();

        assert!(rotated.max().abs_diff_eq(Vec3::new(s, 1.0, s), EPSILON));
        assert!(rotated.min().abs_diff_eq(Vec3::new(-s, -1.0, -s), EPSILON));
    }

    #[test]
    fn test_transform_aabb_unbounded_and_empty() {
        let m = Mat4::from_rotation_z(0.3);
        let open = Aabb::from_points(Vec3::new(-1.0, f32::NEG_INFINITY, -1.0), Vec3::new(1.0, f32::INFINITY, 1.0));

        assert_eq!(m.transform_aabb(&open), Aabb::UNIVERSE);
        assert!(m.transform_aabb(&Aabb::EMPTY).is_empty());
    }
}
