//! Random sampling helpers.
//!
//! Every function takes the generator explicitly so callers decide where the
//! randomness comes from: a seeded `StdRng` in tests, one generator per
//! bucket in the parallel renderer.

use lumen_math::Vec3;
use rand::{Rng, RngCore};

/// Squared lengths below this are too short to normalize reliably.
const MIN_NORMALIZABLE_LENGTH_SQUARED: f32 = 1e-12;

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen()
}

/// Uniform f32 in [min, max).
#[inline]
fn gen_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Sample a point uniformly inside the unit ball by rejection.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Sample a unit vector by normalizing a point from [`random_in_unit_sphere`].
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_in_unit_sphere(rng);
        let len_sq = p.length_squared();
        if len_sq > MIN_NORMALIZABLE_LENGTH_SQUARED {
            return p / len_sq.sqrt();
        }
    }
}

/// Sample a random offset in the square [-0.5, 0.5) x [-0.5, 0.5) on the z = 0 plane.
pub fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5, 0.0)
}
