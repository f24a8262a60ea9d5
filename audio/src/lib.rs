//! Acoustic event segmentation for 16-bit PCM audio.
//!
//! This crate provides:
//!
//! - `window`: Hann and Kaiser analysis windows
//! - `filter`: FIR band-pass kernel and a streaming filter
//! - `spectrogram`: short-time power spectrogram with CSV export
//! - `syllable`: the STFT syllable detector
//! - `pcm`: sample/byte conversion helpers
//!
//! # Example
//!
//! ```rust
//! use victor_audio::syllable::{DetectorConfig, SyllableDetector};
//!
//! let config = DetectorConfig::default()
//!     .with_sample_rate(16000)
//!     .with_framing(256, 128, 512)
//!     .with_threshold(20.0);
//! let mut detector = SyllableDetector::new(config).unwrap();
//!
//! // Feed captured audio in order; filter state carries across calls
//! for chunk in [vec![0i16; 1600], vec![0i16; 1600]] {
//!     for s in detector.run(&chunk) {
//!         println!("{:.3}s - {:.3}s @ {} Hz", s.start_time_s, s.end_time_s, s.peak_freq);
//!     }
//! }
//! ```

mod error;
mod fft;
pub mod filter;
pub mod pcm;
pub mod spectrogram;
pub mod syllable;
pub mod window;

pub use error::{Axis, DetectorError};
pub use spectrogram::Spectrogram;
pub use syllable::{DetectorConfig, SyllableDetector, SyllableInfo};
pub use window::WindowKind;
