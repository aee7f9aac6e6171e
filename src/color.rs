//! Linear RGB colors.
//!
//! Colors are unbounded linear radiance values stored in a `Vec3A`. Nothing in
//! the shading path clamps them; tone mapping happens when an image is written.

use glam::Vec3A;

/// RGB color type using Vec3A for SIMD optimization.
pub type Color = Vec3A;

/// Background color returned for misses and exhausted recursion.
pub const BLACK: Color = Vec3A::ZERO;

/// Additively blend `add` into `base`, scaled by `weight`.
#[inline]
pub fn blend(base: Color, add: Color, weight: f32) -> Color {
    base + add * weight
}
