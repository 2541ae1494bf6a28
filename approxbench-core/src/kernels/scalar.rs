//! Scalar bit-level approximations
//!
//! Each kernel reinterprets the IEEE-754 bit pattern as an integer, applies a
//! closed-form adjustment to the exponent field, and reinterprets it back.

use std::f32::consts::LN_2;

/// `2^7 / ln 2`: scales `x` into the upper 16 bits of the exponent field
pub(crate) const EXP_A: f32 = 128.0 / LN_2;

/// `127 * 2^7` exponent bias minus the Schraudolph correction `C = 7`
pub(crate) const EXP_BC: i16 = 16256 - 7;

/// Bits subtracted from the exponent to divide by 256
pub(crate) const EXPONENT_256: u32 = (135 << 23) - (127 << 23);

/// Exponent field mask
pub(crate) const EXPONENT_MASK: u32 = 0x7F80_0000;

/// Halve the exponent after re-biasing
#[inline]
pub fn sqrt_approx(x: f32) -> f32 {
    f32::from_bits(x.to_bits().wrapping_add(127 << 23) >> 1)
}

/// Reference square root
#[inline]
pub fn sqrt_reference(x: f32) -> f32 {
    x.sqrt()
}

/// Magic-constant inverse square root, no Newton step
#[inline]
pub fn inv_sqrt_approx(x: f32) -> f32 {
    f32::from_bits(0x5F37_5A86u32.wrapping_sub(x.to_bits() >> 1))
}

/// Reference inverse square root
#[inline]
pub fn inv_sqrt_reference(x: f32) -> f32 {
    1.0 / x.sqrt()
}

/// Reciprocal with constant `0x7EEEEEEE`
#[inline]
pub fn reciprocal_approx_a(x: f32) -> f32 {
    f32::from_bits(0x7EEE_EEEEu32.wrapping_sub(x.to_bits()))
}

/// Reciprocal with constant `0x7F000000`
#[inline]
pub fn reciprocal_approx_b(x: f32) -> f32 {
    f32::from_bits(0x7F00_0000u32.wrapping_sub(x.to_bits()))
}

/// Reference reciprocal
#[inline]
pub fn reciprocal_reference(x: f32) -> f32 {
    1.0 / x
}

/// Subtract 8 from the exponent; flush to zero when that would underflow
#[inline]
pub fn div256_approx(x: f32) -> f32 {
    let bits = x.to_bits();
    let keep = ((bits & EXPONENT_MASK) > EXPONENT_256) as u32;
    f32::from_bits(bits.wrapping_sub(EXPONENT_256) * keep)
}

/// Reference division by 256
#[inline]
pub fn div256_reference(x: f32) -> f32 {
    x / 256.0
}

/// Schraudolph exponent on the upper 16 bits of the pattern
#[inline]
pub fn exp_approx(x: f32) -> f32 {
    let upper = ((EXP_A * x) as i16).wrapping_add(EXP_BC);
    f32::from_bits(u32::from(upper as u16) << 16)
}

/// Reference exponent
#[inline]
pub fn exp_reference(x: f32) -> f32 {
    x.exp()
}
