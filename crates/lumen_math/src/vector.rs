//! Vector helpers that `glam` does not provide.

use crate::Vec3;

/// Components smaller than this are treated as zero by [`near_zero`].
pub const NEAR_ZERO_EPSILON: f32 = 1.0e-8;

/// Returns true if every component of `v` is within [`NEAR_ZERO_EPSILON`] of zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.abs().max_element() < NEAR_ZERO_EPSILON
}

/// Mirror `v` about the plane with unit normal `n`.
///
/// `v` is the incident direction, pointing towards the surface.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}
