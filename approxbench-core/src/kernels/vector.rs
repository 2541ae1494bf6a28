//! 8-lane vector approximations
//!
//! Portable `wide` versions of the scalar kernels. Lanes are reinterpreted
//! between float and integer types with `bytemuck::cast`.

use super::scalar::{EXP_A, EXP_BC, EXPONENT_256, EXPONENT_MASK};
use bytemuck::cast;
use wide::{f32x8, i32x8, u32x8};

#[inline(always)]
fn to_bits(v: f32x8) -> u32x8 {
    cast(v)
}

#[inline(always)]
fn from_bits(v: u32x8) -> f32x8 {
    cast(v)
}

/// Halve the exponent after re-biasing, per lane
#[inline]
pub fn sqrt_approx_x8(x: f32x8) -> f32x8 {
    from_bits((to_bits(x) + u32x8::splat(127 << 23)) >> 1)
}

/// Reference square root
#[inline]
pub fn sqrt_reference_x8(x: f32x8) -> f32x8 {
    x.sqrt()
}

/// Magic-constant inverse square root
#[inline]
pub fn inv_sqrt_approx_x8(x: f32x8) -> f32x8 {
    from_bits(u32x8::splat(0x5F37_5A86) - (to_bits(x) >> 1))
}

/// Reference inverse square root
#[inline]
pub fn inv_sqrt_reference_x8(x: f32x8) -> f32x8 {
    f32x8::splat(1.0) / x.sqrt()
}

/// Reciprocal with constant `0x7EEEEEEE`
#[inline]
pub fn reciprocal_approx_x8(x: f32x8) -> f32x8 {
    from_bits(u32x8::splat(0x7EEE_EEEE) - to_bits(x))
}

/// Reference reciprocal
#[inline]
pub fn reciprocal_reference_x8(x: f32x8) -> f32x8 {
    f32x8::splat(1.0) / x
}

/// Subtract 8 from the exponent, zeroing lanes that would underflow
#[inline]
pub fn div256_approx_x8(x: f32x8) -> f32x8 {
    let bits: i32x8 = cast(x);
    let shift = i32x8::splat(EXPONENT_256 as i32);
    let exponent = bits & i32x8::splat(EXPONENT_MASK as i32);
    // all ones where exponent > shift; both operands are non-negative
    let keep = (shift - exponent) >> 31;
    cast((bits - shift) & keep)
}

/// Reference division by 256
#[inline]
pub fn div256_reference_x8(x: f32x8) -> f32x8 {
    x / f32x8::splat(256.0)
}

/// Schraudolph exponent with round-to-nearest and a saturating 16-bit add
#[inline]
pub fn exp_approx_x8(x: f32x8) -> f32x8 {
    let scaled = (x * f32x8::splat(EXP_A)).round_int();
    // keep the low 16 bits as a signed value
    let low: i32x8 = (scaled << 16_i32) >> 16_i32;
    let upper = (low + i32x8::splat(i32::from(EXP_BC)))
        .max(i32x8::splat(i32::from(i16::MIN)))
        .min(i32x8::splat(i32::from(i16::MAX)));
    cast(upper << 16)
}

/// Reference exponent, lane by lane
#[inline]
pub fn exp_reference_x8(x: f32x8) -> f32x8 {
    f32x8::from(x.to_array().map(f32::exp))
}

#[cfg(test)]
mod tests {
    use super::super::scalar;
    use super::*;

    fn lanes(values: [f32; 8]) -> f32x8 {
        f32x8::from(values)
    }

    #[test]
    fn test_bit_kernels_match_scalar() {
        let input = [1.0e-20, 0.5, 1.0, 1.5, 3.0, 100.0, 12345.0, 1.0e30];
        let x = lanes(input);

        let sqrt = sqrt_approx_x8(x).to_array();
        let inv_sqrt = inv_sqrt_approx_x8(x).to_array();
        let reciprocal = reciprocal_approx_x8(x).to_array();
        let div256 = div256_approx_x8(x).to_array();

        for (i, value) in input.into_iter().enumerate() {
            assert_eq!(sqrt[i], scalar::sqrt_approx(value));
            assert_eq!(inv_sqrt[i], scalar::inv_sqrt_approx(value));
            assert_eq!(reciprocal[i], scalar::reciprocal_approx_a(value));
            assert_eq!(div256[i], scalar::div256_approx(value));
        }
    }

    #[test]
    fn test_div256_signs_and_underflow() {
        let x = lanes([512.0, -1024.0, 1.0e-37, -1.0e-37, 0.0, 3.0, -3.0, 256.0]);
        assert_eq!(
            div256_approx_x8(x).to_array(),
            [2.0, -4.0, 0.0, 0.0, 0.0, 3.0 / 256.0, -3.0 / 256.0, 1.0]
        );
    }

    #[test]
    fn test_exp_within_bound() {
        for chunk in (-200..200).collect::<Vec<i32>>().chunks(8) {
            let mut input = [0.0f32; 8];
            for (slot, i) in input.iter_mut().zip(chunk) {
                *slot = *i as f32 / 20.0;
            }

            let approx = exp_approx_x8(lanes(input)).to_array();
            let reference = exp_reference_x8(lanes(input)).to_array();
            for i in 0..8 {
                let err = ((reference[i] - approx[i]) / reference[i]).abs();
                assert!(err < 0.1, "exp({}): error {err}", input[i]);
            }
        }
    }

    #[test]
    fn test_references() {
        let x = lanes([1.0, 4.0, 16.0, 64.0, 0.25, 2.0, 8.0, 256.0]);
        assert_eq!(
            sqrt_reference_x8(x).to_array(),
            [1.0, 2.0, 4.0, 8.0, 0.5, 2.0f32.sqrt(), 8.0f32.sqrt(), 16.0]
        );
        assert_eq!(
            reciprocal_reference_x8(x).to_array(),
            x.to_array().map(|v| 1.0 / v)
        );
        assert_eq!(div256_reference_x8(x).to_array()[7], 1.0);
    }
}
