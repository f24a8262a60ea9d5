//! Syllable (acoustic onset) detection.
//!
//! A [`SyllableDetector`] segments a stream of 16-bit PCM into bursts of
//! acoustic energy. Each call to [`SyllableDetector::run`]:
//!
//! 1. band-pass filters the chunk, continuing the filter state of the
//!    previous call;
//! 2. computes a Hann-windowed STFT power spectrogram;
//! 3. greedily extracts intervals around the loudest unused frames until
//!    the remaining peaks drop more than `stopping_threshold_db` below the
//!    loudest peak of the chunk.
//!
//! # Example
//!
//! ```
//! use victor_audio::syllable::{DetectorConfig, SyllableDetector};
//!
//! let mut detector = SyllableDetector::new(DetectorConfig::default()).unwrap();
//!
//! // 100ms of silence: no syllables
//! let syllables = detector.run(&[0i16; 1600]);
//! assert!(syllables.is_empty());
//! ```

mod config;
mod detector;
mod extract;

pub use config::DetectorConfig;
pub use detector::{Analysis, SyllableDetector, FILTER_TAPS};
pub use extract::extract_syllables;

use serde::{Deserialize, Serialize};

/// One detected acoustic event.
///
/// Times and sample offsets are relative to the start of the chunk passed to
/// [`SyllableDetector::run`]; they refer to frame starts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SyllableInfo {
    /// Start time of the frame holding the peak that seeded this event.
    pub syllable_time_s: f32,
    /// Start time of the first frame of the event.
    pub start_time_s: f32,
    /// Start time of the last frame of the event.
    pub end_time_s: f32,
    /// Sample offset of the first frame.
    pub start_idx: u32,
    /// Sample offset of the last frame.
    pub end_idx: u32,
    /// Mean of the per-frame peak frequencies, Hz.
    pub avg_freq: f32,
    /// Peak frequency of the loudest frame, Hz.
    pub peak_freq: f32,
    /// Peak frequency of the first frame, Hz.
    pub first_freq: f32,
    /// Peak frequency of the last frame, Hz.
    pub last_freq: f32,
    /// Mean of the per-frame peak levels, dB.
    pub avg_power: f32,
}

impl SyllableInfo {
    /// Duration between the first and last frame starts.
    pub fn duration_s(&self) -> f32 {
        self.end_time_s - self.start_time_s
    }

    /// Shifts the event by `samples` at `sample_rate_hz`, e.g. to express
    /// chunk-relative results in stream time.
    pub fn offset_by(mut self, samples: u32, sample_rate_hz: u32) -> Self {
        let dt = samples as f32 / sample_rate_hz as f32;
        self.syllable_time_s += dt;
        self.start_time_s += dt;
        self.end_time_s += dt;
        self.start_idx += samples;
        self.end_idx += samples;
        self
    }
}
