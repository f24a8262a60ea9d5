//! FIR band-pass pre-filter.
//!
//! The kernel is the difference of two ideal (sinc) low-pass kernels,
//! truncated to `N` taps. [`FirFilter`] runs it as a direct-form
//! convolution over a [`FixedCircularBuffer`] delay line that persists
//! between calls, so chunked input filters exactly like one long signal.

use std::f64::consts::PI;
use std::sync::Arc;

use victor_buffer::FixedCircularBuffer;

/// Lower band edge of the reference tuning.
pub const DEFAULT_LOW_CUTOFF_HZ: f32 = 50.0;

/// Upper band edge of the reference tuning.
pub const DEFAULT_HIGH_CUTOFF_HZ: f32 = 300.0;

/// Coefficients of an `N`-tap FIR band-pass filter. `N` must be odd.
///
/// Kernels are immutable once built; share one between filters with `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct BandpassKernel<const N: usize> {
    coeffs: [f32; N],
}

impl<const N: usize> BandpassKernel<N> {
    /// Builds the kernel for a pass band of `low_hz..high_hz` at `sample_rate_hz`.
    ///
    /// Tap offset `i` in `-N/2..=N/2` is stored at index `i + N/2`.
    pub fn new(sample_rate_hz: u32, low_hz: f32, high_hz: f32) -> Self {
        const { assert!(N % 2 == 1, "N must be odd") };

        let f1 = low_hz as f64 / sample_rate_hz as f64;
        let f2 = high_hz as f64 / sample_rate_hz as f64;
        let middle = (N / 2) as i64;

        let mut coeffs = [0.0f32; N];
        for i in -middle..=middle {
            let c = if i == 0 {
                2.0 * (f2 - f1)
            } else {
                let x = i as f64;
                ((2.0 * PI * f2 * x).sin() - (2.0 * PI * f1 * x).sin()) / (PI * x)
            };
            coeffs[(i + middle) as usize] = c as f32;
        }
        Self { coeffs }
    }

    /// Returns the filter taps.
    pub fn coeffs(&self) -> &[f32; N] {
        &self.coeffs
    }

    /// Returns the number of taps.
    pub const fn taps(&self) -> usize {
        N
    }

    /// Magnitude of the frequency response at `freq_hz`.
    pub fn gain_at(&self, freq_hz: f32, sample_rate_hz: u32) -> f32 {
        let omega = 2.0 * PI * freq_hz as f64 / sample_rate_hz as f64;
        let (mut re, mut im) = (0.0f64, 0.0f64);
        for (j, &c) in self.coeffs.iter().enumerate() {
            let phase = omega * j as f64;
            re += c as f64 * phase.cos();
            im -= c as f64 * phase.sin();
        }
        re.hypot(im) as f32
    }
}

/// Streaming FIR filter over 16-bit PCM.
///
/// The delay line holds the most recent `N` input samples, newest first.
#[derive(Debug, Clone)]
pub struct FirFilter<const N: usize> {
    kernel: Arc<BandpassKernel<N>>,
    history: FixedCircularBuffer<i16, N>,
}

impl<const N: usize> FirFilter<N> {
    /// Creates a filter with an empty history.
    pub fn new(kernel: Arc<BandpassKernel<N>>) -> Self {
        Self {
            kernel,
            history: FixedCircularBuffer::new(),
        }
    }

    /// Returns the shared kernel.
    pub fn kernel(&self) -> &Arc<BandpassKernel<N>> {
        &self.kernel
    }

    /// Filters one sample.
    ///
    /// Until the history fills, only the taps that have input are summed.
    /// The output is truncated toward zero and saturates at the `i16` range.
    #[inline]
    pub fn process_sample(&mut self, sample: i16) -> i16 {
        self.history.push_front(sample);
        let value: f32 = self
            .kernel
            .coeffs
            .iter()
            .zip(self.history.iter())
            .map(|(&c, &s)| c * s as f32)
            .sum();
        value as i16
    }

    /// Filters a chunk, continuing from the history left by earlier calls.
    pub fn process(&mut self, signal: &[i16]) -> Vec<i16> {
        signal.iter().map(|&s| self.process_sample(s)).collect()
    }

    /// Forgets all previous input.
    pub fn reset(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FS: u32 = 16000;

    fn kernel() -> Arc<BandpassKernel<31>> {
        Arc::new(BandpassKernel::new(FS, DEFAULT_LOW_CUTOFF_HZ, DEFAULT_HIGH_CUTOFF_HZ))
    }

    fn sine(freq: f64, samples: usize, amplitude: f64) -> Vec<i16> {
        (0..samples)
            .map(|i| (amplitude * (2.0 * PI * freq * i as f64 / FS as f64).sin()) as i16)
            .collect()
    }

    #[test]
    fn test_kernel_center_tap() {
        let k = kernel();
        let expected = 2.0 * (300.0 - 50.0) / 16000.0;
        assert!((k.coeffs()[15] - expected).abs() < 1e-7);
        assert_eq!(k.taps(), 31);
    }

    #[test]
    fn test_kernel_symmetric() {
        let k = kernel();
        let c = k.coeffs();
        for i in 0..15 {
            assert!((c[i] - c[30 - i]).abs() < 1e-7, "tap {} not symmetric", i);
        }
    }

    #[test]
    fn test_kernel_passband_exceeds_stopband() {
        let k = kernel();
        let pass = k.gain_at(175.0, FS);
        let stop = k.gain_at(2000.0, FS);
        assert!(pass > 0.5, "passband gain {}", pass);
        assert!(stop < 0.1, "stopband gain {}", stop);
    }

    #[test]
    fn test_impulse_response_is_kernel() {
        let k = kernel();
        let mut filter = FirFilter::new(Arc::clone(&k));
        let mut impulse = vec![0i16; 31];
        impulse[0] = 10000;
        let out = filter.process(&impulse);
        for (j, &y) in out.iter().enumerate() {
            let expected = (k.coeffs()[j] * 10000.0) as i16;
            assert_eq!(y, expected, "sample {}", j);
        }
    }

    #[test]
    fn test_streaming_matches_single_call() {
        let signal = sine(220.0, 4000, 20000.0);

        let mut whole = FirFilter::new(kernel());
        let expected = whole.process(&signal);

        let mut chunked = FirFilter::new(kernel());
        let mut out = chunked.process(&signal[..1237]);
        out.extend(chunked.process(&signal[1237..1240]));
        out.extend(chunked.process(&signal[1240..]));

        assert_eq!(out, expected);
    }

    #[test]
    fn test_reset_clears_history() {
        let signal = sine(100.0, 200, 15000.0);
        let mut filter = FirFilter::new(kernel());
        let first = filter.process(&signal);
        filter.process(&signal);
        filter.reset();
        assert_eq!(filter.process(&signal), first);
    }

    #[test]
    fn test_silence_stays_silent() {
        let mut filter = FirFilter::new(kernel());
        assert!(filter.process(&[0; 100]).iter().all(|&s| s == 0));
    }

    #[test]
    fn test_full_band_kernel_passes_full_scale() {
        let mut filter = FirFilter::new(Arc::new(BandpassKernel::<3>::new(FS, 0.0, 8000.0)));
        // Center tap is 2 * 0.5 = 1.0; outer taps are sin(pi * i) / (pi * i) ~ 0,
        // so the output is the input delayed by one sample.
        let out = filter.process(&[i16::MAX, i16::MIN, i16::MAX, 0]);
        assert_eq!(out[0], 0);
        assert!(out[1] >= i16::MAX - 1);
        assert!(out[2] <= i16::MIN + 1);
        assert!(out[3] >= i16::MAX - 1);
    }
}
