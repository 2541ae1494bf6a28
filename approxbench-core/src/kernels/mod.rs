//! Built-in Approximation Kernels
//!
//! Bit-level approximations of common float functions, each paired with the
//! standard-library result it is measured against.

pub mod scalar;
pub mod vector;

use crate::function::{FunctionUnderTest, InputRange, ScalarKernel, VectorKernel};
use wide::f32x8;

/// Input range of the exponent kernels
pub const EXP_RANGE: InputRange = InputRange {
    min: 1.0e-10,
    max: 70.0,
};

macro_rules! scalar_kernel {
    ($kernel:ty, $reference:path, $approximate:path) => {
        impl ScalarKernel for $kernel {
            #[inline(always)]
            fn reference(x: f32) -> f32 {
                $reference(x)
            }
            #[inline(always)]
            fn approximate(x: f32) -> f32 {
                $approximate(x)
            }
        }
    };
}

macro_rules! vector_kernel {
    ($kernel:ty, $reference:path, $approximate:path) => {
        impl VectorKernel for $kernel {
            #[inline(always)]
            fn reference(x: f32x8) -> f32x8 {
                $reference(x)
            }
            #[inline(always)]
            fn approximate(x: f32x8) -> f32x8 {
                $approximate(x)
            }
        }
    };
}

/// Schraudolph exponent against `f32::exp`
pub struct Exponent;
scalar_kernel!(Exponent, scalar::exp_reference, scalar::exp_approx);
vector_kernel!(Exponent, vector::exp_reference_x8, vector::exp_approx_x8);

/// Exponent shift against `x / 256`
pub struct DivideBy256;
scalar_kernel!(DivideBy256, scalar::div256_reference, scalar::div256_approx);
vector_kernel!(DivideBy256, vector::div256_reference_x8, vector::div256_approx_x8);

/// Exponent halving against `f32::sqrt`
pub struct SquareRoot;
scalar_kernel!(SquareRoot, scalar::sqrt_reference, scalar::sqrt_approx);
vector_kernel!(SquareRoot, vector::sqrt_reference_x8, vector::sqrt_approx_x8);

/// Magic-constant inverse square root against `1 / sqrt(x)`
pub struct InverseSquareRoot;
scalar_kernel!(InverseSquareRoot, scalar::inv_sqrt_reference, scalar::inv_sqrt_approx);
vector_kernel!(
    InverseSquareRoot,
    vector::inv_sqrt_reference_x8,
    vector::inv_sqrt_approx_x8
);

/// Reciprocal with constant `0x7EEEEEEE` against `1 / x`
pub struct ReciprocalA;
scalar_kernel!(ReciprocalA, scalar::reciprocal_reference, scalar::reciprocal_approx_a);
vector_kernel!(
    ReciprocalA,
    vector::reciprocal_reference_x8,
    vector::reciprocal_approx_x8
);

/// Reciprocal with constant `0x7F000000` against `1 / x`
pub struct ReciprocalB;
scalar_kernel!(ReciprocalB, scalar::reciprocal_reference, scalar::reciprocal_approx_b);

/// Catalogue of built-in functions in report order
pub fn builtin_functions() -> Vec<FunctionUnderTest> {
    let mut exp_vector = FunctionUnderTest::vector::<Exponent>("Exponent (SIMD)", true);
    exp_vector.range = EXP_RANGE;

    let mut exp_scalar = FunctionUnderTest::scalar::<Exponent>("Exponent", true);
    exp_scalar.range = EXP_RANGE;

    vec![
        exp_vector,
        exp_scalar,
        FunctionUnderTest::vector::<DivideBy256>("Divide by 256 (SIMD)", true),
        FunctionUnderTest::vector::<SquareRoot>("Square root (SIMD)", false),
        FunctionUnderTest::vector::<InverseSquareRoot>("Inverse square root (SIMD)", false),
        FunctionUnderTest::vector::<ReciprocalA>("Number inversion (SIMD)", true),
        FunctionUnderTest::scalar::<ReciprocalA>("Number inversion (ver. A)", true),
        FunctionUnderTest::scalar::<ReciprocalB>("Number inversion (ver. B)", true),
        FunctionUnderTest::scalar::<SquareRoot>("Square root", false),
        FunctionUnderTest::scalar::<InverseSquareRoot>("Inverse square root", false),
        FunctionUnderTest::scalar::<DivideBy256>("Divide by 256", true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_order() {
        let names: Vec<String> = builtin_functions().into_iter().map(|f| f.name).collect();
        assert_eq!(names.len(), 11);
        assert_eq!(names[0], "Exponent (SIMD)");
        assert_eq!(names[1], "Exponent");
        assert_eq!(names[10], "Divide by 256");
    }

    #[test]
    fn test_names_unique() {
        let functions = builtin_functions();
        let names: HashSet<&str> = functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names.len(), functions.len());
    }

    #[test]
    fn test_negatives_only_disabled_for_roots() {
        for function in builtin_functions() {
            let is_root = function.name.contains("quare root");
            assert_eq!(function.allows_negatives, !is_root, "{}", function.name);
        }
    }

    #[test]
    fn test_kernel_types_forward() {
        let x = 10.0f32;
        assert_eq!(<SquareRoot as ScalarKernel>::approximate(x), scalar::sqrt_approx(x));
        assert_eq!(<ReciprocalB as ScalarKernel>::approximate(x), scalar::reciprocal_approx_b(x));
        assert_eq!(<Exponent as ScalarKernel>::reference(1.0), 1.0f32.exp());

        let lanes = f32x8::splat(x);
        assert_eq!(
            <ReciprocalA as VectorKernel>::approximate(lanes).to_array(),
            [scalar::reciprocal_approx_a(x); 8]
        );
    }

    #[test]
    fn test_ranges() {
        for function in builtin_functions() {
            if function.name.starts_with("Exponent") {
                assert_eq!(function.range, EXP_RANGE);
            } else {
                assert_eq!(function.range, InputRange::FULL);
            }
        }
    }
}
