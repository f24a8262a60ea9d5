//! Owned forward real-FFT plan.

use std::fmt;
use std::sync::Arc;

use realfft::num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};

use crate::error::DetectorError;

/// A forward real FFT of fixed length together with its work buffers.
///
/// The plan, the input frame, the spectrum and the scratch space are all
/// owned here and freed together when the plan is dropped.
pub(crate) struct FftPlan {
    fft: Arc<dyn RealToComplex<f32>>,
    input: Vec<f32>,
    output: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl FftPlan {
    pub(crate) fn new(len: usize) -> Self {
        let mut planner = RealFftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(len);
        let input = fft.make_input_vec();
        let output = fft.make_output_vec();
        let scratch = fft.make_scratch_vec();
        Self {
            fft,
            input,
            output,
            scratch,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.input.len()
    }

    /// Time-domain frame to be transformed; `len()` samples.
    pub(crate) fn input_mut(&mut self) -> &mut [f32] {
        &mut self.input
    }

    /// Transforms the input frame and returns bins `0..=len/2`.
    ///
    /// The input frame is used as scratch and must be refilled before the
    /// next call.
    pub(crate) fn process(&mut self) -> Result<&[Complex<f32>], DetectorError> {
        self.fft
            .process_with_scratch(&mut self.input, &mut self.output, &mut self.scratch)?;
        Ok(&self.output)
    }
}

impl fmt::Debug for FftPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FftPlan").field("len", &self.len()).finish()
    }
}
