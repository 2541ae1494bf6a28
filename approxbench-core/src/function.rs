//! Function-Under-Test Model
//!
//! A function under test is a named pair of transforms with identical
//! signatures: the standard-library `reference` and the bit-level `approximate`
//! version. Scalar and 8-lane vector kernels are the two closed cases, each
//! described by a zero-sized type implementing [`ScalarKernel`] or
//! [`VectorKernel`].

use crate::error::BenchError;
use wide::f32x8;

/// A scalar approximation and the exact transform it is measured against
pub trait ScalarKernel {
    /// Exact transform
    fn reference(x: f32) -> f32;
    /// Approximate transform
    fn approximate(x: f32) -> f32;
}

/// An 8-lane approximation and the exact transform it is measured against
pub trait VectorKernel {
    /// Exact transform
    fn reference(x: f32x8) -> f32x8;
    /// Approximate transform
    fn approximate(x: f32x8) -> f32x8;
}

/// One full pass of a scalar transform over a buffer
pub type ScalarPass = fn(&[f32], &mut [f32]);

/// One full pass of a vector transform over a buffer of batches
pub type VectorPass = fn(&[f32x8], &mut [f32x8]);

/// Execution mode and the pass pair
///
/// Passes are monomorphized per kernel, so the transform inlines into the
/// loop and only the pass itself is called indirectly.
#[derive(Debug, Clone, Copy)]
pub enum Kernel {
    /// Applied one element at a time
    Scalar {
        /// Exact pass
        reference: ScalarPass,
        /// Approximate pass
        approximate: ScalarPass,
    },
    /// Applied to batches of eight elements
    Vector {
        /// Exact pass
        reference: VectorPass,
        /// Approximate pass
        approximate: VectorPass,
    },
}

impl Kernel {
    /// Pass pair for a scalar kernel
    pub fn scalar<K: ScalarKernel>() -> Self {
        Kernel::Scalar {
            reference: scalar_pass::<K, true>,
            approximate: scalar_pass::<K, false>,
        }
    }

    /// Pass pair for a vector kernel
    pub fn vector<K: VectorKernel>() -> Self {
        Kernel::Vector {
            reference: vector_pass::<K, true>,
            approximate: vector_pass::<K, false>,
        }
    }

    /// Elements consumed per call
    pub fn lane_width(&self) -> usize {
        match self {
            Kernel::Scalar { .. } => 1,
            Kernel::Vector { .. } => 8,
        }
    }

    /// Short label for listings
    pub fn mode(&self) -> &'static str {
        match self {
            Kernel::Scalar { .. } => "scalar",
            Kernel::Vector { .. } => "vector",
        }
    }
}

fn scalar_pass<K: ScalarKernel, const REFERENCE: bool>(input: &[f32], output: &mut [f32]) {
    for (out, &x) in output.iter_mut().zip(input) {
        *out = if REFERENCE {
            K::reference(x)
        } else {
            K::approximate(x)
        };
    }
}

fn vector_pass<K: VectorKernel, const REFERENCE: bool>(input: &[f32x8], output: &mut [f32x8]) {
    for (out, &x) in output.iter_mut().zip(input) {
        *out = if REFERENCE {
            K::reference(x)
        } else {
            K::approximate(x)
        };
    }
}

/// Magnitude range of generated inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputRange {
    /// Smallest magnitude
    pub min: f32,
    /// Largest magnitude
    pub max: f32,
}

impl InputRange {
    /// Every positive normal `f32`
    pub const FULL: InputRange = InputRange {
        min: f32::MIN_POSITIVE,
        max: f32::MAX,
    };

    /// Validated range
    pub fn new(min: f32, max: f32) -> Result<Self, BenchError> {
        if !(min.is_finite() && max.is_finite()) || min <= 0.0 || min > max {
            return Err(BenchError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }
}

impl Default for InputRange {
    fn default() -> Self {
        Self::FULL
    }
}

/// A named numeric transform paired with its exact reference
#[derive(Debug, Clone)]
pub struct FunctionUnderTest {
    /// Display name, unique within a suite
    pub name: String,
    /// Whether negative inputs are meaningful
    pub allows_negatives: bool,
    /// Transform pair
    pub kernel: Kernel,
    /// Range samples are drawn from
    pub range: InputRange,
}

impl FunctionUnderTest {
    /// Scalar function over the full positive `f32` range
    pub fn scalar<K: ScalarKernel>(name: impl Into<String>, allows_negatives: bool) -> Self {
        Self {
            name: name.into(),
            allows_negatives,
            kernel: Kernel::scalar::<K>(),
            range: InputRange::FULL,
        }
    }

    /// Vector function over the full positive `f32` range
    pub fn vector<K: VectorKernel>(name: impl Into<String>, allows_negatives: bool) -> Self {
        Self {
            name: name.into(),
            allows_negatives,
            kernel: Kernel::vector::<K>(),
            range: InputRange::FULL,
        }
    }

    /// Replace the input range
    pub fn with_range(mut self, min: f32, max: f32) -> Result<Self, BenchError> {
        self.range = InputRange::new(min, max)?;
        Ok(self)
    }

    /// Elements consumed per kernel call
    pub fn lane_width(&self) -> usize {
        self.kernel.lane_width()
    }

    /// Whether the kernel runs on 8-lane batches
    pub fn is_vectorized(&self) -> bool {
        matches!(self.kernel, Kernel::Vector { .. })
    }
}
