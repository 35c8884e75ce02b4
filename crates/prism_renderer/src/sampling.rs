//! Random sampling helpers.
//!
//! All randomness flows through a caller-owned `&mut dyn RngCore`, so each
//! render task can carry its own seeded generator.

use prism_math::{Vec2, Vec3};
use rand::{Rng, RngCore};

/// Uniform `f32` in `[0, 1)`.
#[inline]
fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform point on the unit sphere, by rejection sampling.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let v = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-6 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Random offset in `[-0.5, 0.5)²` around a pixel center.
pub fn sample_square(rng: &mut dyn RngCore) -> Vec2 {
    Vec2::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5)
}

/// Blur `direction` by `roughness` times a random unit vector.
///
/// Zero roughness returns the direction untouched and draws nothing from
/// the generator. A perturbation that cancels the direction out falls back
/// to the unperturbed one.
pub fn perturb(direction: Vec3, roughness: f32, rng: &mut dyn RngCore) -> Vec3 {
    if roughness <= 0.0 {
        return direction;
    }
    (direction + random_unit_vector(rng) * roughness)
        .try_normalize()
        .unwrap_or(direction)
}
