//! Aligned Sample Storage
//!
//! Inputs are stored as whole 8-lane vectors so the buffer start is always
//! 32-byte aligned. The vectorized executor can then reinterpret the scalar
//! view as `&[f32x8]` without copying.

use crate::rng::LogScaleRng;
use wide::f32x8;

/// Alignment of every sample buffer, in bytes
pub const SAMPLE_ALIGNMENT: usize = 32;

/// Immutable set of generated inputs for one function
#[derive(Debug, Clone)]
pub struct SampleSet {
    lanes: Vec<f32x8>,
    len: usize,
}

impl SampleSet {
    /// Draw `count` samples from `rng`
    pub fn generate(rng: &mut LogScaleRng, count: usize) -> Self {
        let mut lanes = Vec::with_capacity(count.div_ceil(8));
        let mut remaining = count;

        while remaining > 0 {
            let mut chunk = [0.0f32; 8];
            let take = remaining.min(8);
            for slot in chunk.iter_mut().take(take) {
                *slot = rng.next_sample();
            }
            lanes.push(f32x8::from(chunk));
            remaining -= take;
        }

        Self { lanes, len: count }
    }

    /// Copy existing values into aligned storage
    pub fn from_values(values: &[f32]) -> Self {
        let lanes = values
            .chunks(8)
            .map(|chunk| {
                let mut lane = [0.0f32; 8];
                lane[..chunk.len()].copy_from_slice(chunk);
                f32x8::from(lane)
            })
            .collect();

        Self {
            lanes,
            len: values.len(),
        }
    }

    /// Scalar view of the samples
    pub fn as_slice(&self) -> &[f32] {
        let flat: &[f32] = bytemuck::cast_slice(&self.lanes);
        &flat[..self.len]
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set holds no samples
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
