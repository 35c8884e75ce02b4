//! Pinhole camera for ray generation.

use prism_math::{Ray, Transform, TransformError, Vec2, Vec3};
use rand::RngCore;

use crate::sampling::sample_square;

/// Pinhole camera looking down -z in its own space.
///
/// The transform maps world space to camera space, as produced by
/// [`Transform::view`]. The canvas sits one unit in front of the eye.
#[derive(Debug, Clone)]
pub struct Camera {
    hsize: u32,
    vsize: u32,
    field_of_view: f32,
    transform: Transform,

    // Cached by `update()`
    half_width: f32,
    half_height: f32,
    pixel_size: f32,
}

impl Camera {
    /// `field_of_view` is the horizontal angle in radians for landscape
    /// images and the vertical one for portrait images.
    pub fn new(hsize: u32, vsize: u32, field_of_view: f32) -> Self {
        let mut camera = Self {
            hsize,
            vsize,
            field_of_view,
            transform: Transform::IDENTITY,
            half_width: 0.0,
            half_height: 0.0,
            pixel_size: 0.0,
        };
        camera.update();
        camera
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Place the eye at `from`, looking toward `to`.
    pub fn look_at(self, from: Vec3, to: Vec3, up: Vec3) -> Result<Self, TransformError> {
        Ok(self.with_transform(Transform::view(from, to, up)?))
    }

    pub fn with_resolution(mut self, hsize: u32, vsize: u32) -> Self {
        self.hsize = hsize;
        self.vsize = vsize;
        self.update();
        self
    }

    fn update(&mut self) {
        let half_view = (self.field_of_view / 2.0).tan();
        let aspect = self.hsize.max(1) as f32 / self.vsize.max(1) as f32;

        if aspect >= 1.0 {
            self.half_width = half_view;
            self.half_height = half_view / aspect;
        } else {
            self.half_width = half_view * aspect;
            self.half_height = half_view;
        }
        self.pixel_size = (self.half_width * 2.0) / self.hsize.max(1) as f32;
    }

    pub fn hsize(&self) -> u32 {
        self.hsize
    }

    pub fn vsize(&self) -> u32 {
        self.vsize
    }

    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// World-space size of one pixel on the canvas.
    pub fn pixel_size(&self) -> f32 {
        self.pixel_size
    }

    /// Ray through the center of pixel (px, py).
    pub fn ray_for_pixel(&self, px: u32, py: u32) -> Ray {
        self.ray_through(px, py, Vec2::ZERO)
    }

    /// Ray through a random point inside pixel (px, py).
    pub fn jittered_ray(&self, px: u32, py: u32, rng: &mut dyn RngCore) -> Ray {
        self.ray_through(px, py, sample_square(rng))
    }

    /// Ray through pixel (px, py) shifted from its center by `offset` pixels.
    pub fn ray_through(&self, px: u32, py: u32, offset: Vec2) -> Ray {
        let x_offset = (px as f32 + 0.5 + offset.x) * self.pixel_size;
        let y_offset = (py as f32 + 0.5 + offset.y) * self.pixel_size;

        // The camera looks toward -z, so +x is to the left.
        let world_x = self.half_width - x_offset;
        let world_y = self.half_height - y_offset;

        let inverse = self.transform.inverse();
        let pixel = inverse.transform_point3(Vec3::new(world_x, world_y, -1.0));
        let origin = inverse.transform_point3(Vec3::ZERO);

        Ray::new(origin, (pixel - origin).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_math::EPSILON;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, SQRT_2};

    #[test]
    fn test_pixel_size_landscape_and_portrait() {
        assert!((Camera::new(200, 125, FRAC_PI_2).pixel_size() - 0.01).abs() < EPSILON);
        assert!((Camera::new(125, 200, FRAC_PI_2).pixel_size() - 0.01).abs() < EPSILON);
    }

    #[test]
    fn test_ray_through_center() {
        let camera = Camera::new(201, 101, FRAC_PI_2);
        let ray = camera.ray_for_pixel(100, 50);

        assert!(ray.origin.abs_diff_eq(Vec3::ZERO, EPSILON));
        assert!(ray.direction.abs_diff_eq(Vec3::NEG_Z, EPSILON));
        assert_eq!(ray.depth, 0);
    }

    #[test]
    fn test_ray_through_corner() {
        let camera = Camera::new(201, 101, FRAC_PI_2);
        let ray = camera.ray_for_pixel(0, 0);

        assert!(ray.direction.abs_diff_eq(Vec3::new(0.66519, 0.33259, -0.66851), 1e-3));
    }

    #[test]
    fn test_ray_with_transformed_camera() {
        let transform = Transform::translation(0.0, -2.0, 5.0).then(&Transform::rotation_y(FRAC_PI_4));
        let camera = Camera::new(201, 101, FRAC_PI_2).with_transform(transform);
        let ray = camera.ray_for_pixel(100, 50);
        let k = SQRT_2 / 2.0;

        assert!(ray.origin.abs_diff_eq(Vec3::new(0.0, 2.0, -5.0), 1e-3));
        assert!(ray.direction.abs_diff_eq(Vec3::new(k, 0.0, -k), 1e-3));
    }

    #[test]
    fn test_look_at_matches_view_transform() {
        let from = Vec3::new(0.0, 0.0, -5.0);
        let camera = Camera::new(11, 11, FRAC_PI_2).look_at(from, Vec3::ZERO, Vec3::Y).unwrap();
        let ray = camera.ray_for_pixel(5, 5);

        assert!(ray.origin.abs_diff_eq(from, EPSILON));
        assert!(ray.direction.abs_diff_eq(Vec3::Z, EPSILON));
    }

    #[test]
    fn test_look_at_rejects_degenerate_up() {
        let result = Camera::new(11, 11, FRAC_PI_2).look_at(Vec3::ZERO, Vec3::Y, Vec3::Y);
        assert!(result.is_err());
    }

    #[test]
    fn test_jittered_rays_stay_inside_pixel() {
        let camera = Camera::new(100, 100, FRAC_PI_2);
        let mut rng = StdRng::seed_from_u64(42);
        let center = camera.ray_for_pixel(50, 50).direction;
        let neighbor = camera.ray_for_pixel(51, 50).direction;
        let pixel_angle = center.angle_between(neighbor);

        for _ in 0..32 {
            let ray = camera.jittered_ray(50, 50, &mut rng);
            assert!(ray.direction.angle_between(center) <= pixel_angle);
        }
    }
}
