use serde::{Deserialize, Serialize};

use crate::error::DetectorError;
use crate::filter::{DEFAULT_HIGH_CUTOFF_HZ, DEFAULT_LOW_CUTOFF_HZ};
use crate::window::WindowKind;

/// Configuration for [`SyllableDetector`](super::SyllableDetector).
///
/// Fixed at construction; a detector is never reconfigured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Input sample rate in Hz (default: 16000).
    pub sample_rate_hz: u32,
    /// Analysis window length in samples (default: 256 = 16ms @ 16kHz).
    pub window_len: usize,
    /// Samples shared by consecutive windows (default: 128).
    pub num_overlap: usize,
    /// FFT length; a power of two, at least `window_len` (default: 512).
    pub fft_len: usize,
    /// dB range below a peak that still belongs to its syllable (default: 20).
    pub stopping_threshold_db: f32,
    /// Analysis window shape (default: Hann).
    pub window: WindowKind,
    /// Lower band edge of the pre-filter (default: 50 Hz).
    pub low_cutoff_hz: f32,
    /// Upper band edge of the pre-filter (default: 300 Hz).
    pub high_cutoff_hz: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 16000,
            window_len: 256,
            num_overlap: 128,
            fft_len: 512,
            stopping_threshold_db: 20.0,
            window: WindowKind::Hann,
            low_cutoff_hz: DEFAULT_LOW_CUTOFF_HZ,
            high_cutoff_hz: DEFAULT_HIGH_CUTOFF_HZ,
        }
    }
}

impl DetectorConfig {
    /// Sets the sample rate.
    pub fn with_sample_rate(mut self, sample_rate_hz: u32) -> Self {
        self.sample_rate_hz = sample_rate_hz;
        self
    }

    /// Sets window length, overlap and FFT length together.
    pub fn with_framing(mut self, window_len: usize, num_overlap: usize, fft_len: usize) -> Self {
        self.window_len = window_len;
        self.num_overlap = num_overlap;
        self.fft_len = fft_len;
        self
    }

    /// Sets the stopping threshold.
    pub fn with_threshold(mut self, stopping_threshold_db: f32) -> Self {
        self.stopping_threshold_db = stopping_threshold_db;
        self
    }

    /// Sets the analysis window shape.
    pub fn with_window(mut self, window: WindowKind) -> Self {
        self.window = window;
        self
    }

    /// Sets the pre-filter pass band.
    pub fn with_band(mut self, low_cutoff_hz: f32, high_cutoff_hz: f32) -> Self {
        self.low_cutoff_hz = low_cutoff_hz;
        self.high_cutoff_hz = high_cutoff_hz;
        self
    }

    /// Distance between consecutive frame starts, in samples.
    pub fn hop(&self) -> usize {
        self.window_len.saturating_sub(self.num_overlap)
    }

    /// Checks every construction invariant.
    pub fn validate(&self) -> Result<(), DetectorError> {
        if self.sample_rate_hz == 0 {
            return Err(DetectorError::InvalidSampleRate(self.sample_rate_hz));
        }
        if self.window_len == 0 {
            return Err(DetectorError::EmptyWindow);
        }
        if !self.fft_len.is_power_of_two() {
            return Err(DetectorError::FftLenNotPowerOfTwo {
                fft_len: self.fft_len,
            });
        }
        if self.fft_len < self.window_len {
            return Err(DetectorError::FftShorterThanWindow {
                fft_len: self.fft_len,
                window_len: self.window_len,
            });
        }
        if self.num_overlap >= self.window_len {
            return Err(DetectorError::OverlapTooLarge {
                num_overlap: self.num_overlap,
                window_len: self.window_len,
            });
        }
        let nyquist = self.sample_rate_hz as f32 / 2.0;
        let band_ok = self.low_cutoff_hz >= 0.0
            && self.low_cutoff_hz < self.high_cutoff_hz
            && self.high_cutoff_hz <= nyquist;
        if !band_ok {
            return Err(DetectorError::InvalidCutoff {
                low_hz: self.low_cutoff_hz,
                high_hz: self.high_cutoff_hz,
            });
        }
        if !self.stopping_threshold_db.is_finite() || self.stopping_threshold_db < 0.0 {
            return Err(DetectorError::InvalidThreshold(self.stopping_threshold_db));
        }
        Ok(())
    }
}
