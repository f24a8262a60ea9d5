use std::fmt;

use thiserror::Error;

/// Spectrogram axis named by [`DetectorError::IndexOutOfBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Time,
    Frequency,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Time => write!(f, "time"),
            Axis::Frequency => write!(f, "frequency"),
        }
    }
}

/// Errors returned by syllable detection.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("syllable: fft length {fft_len} is not a power of two")]
    FftLenNotPowerOfTwo { fft_len: usize },

    #[error("syllable: fft length {fft_len} is shorter than window length {window_len}")]
    FftShorterThanWindow { fft_len: usize, window_len: usize },

    #[error("syllable: overlap {num_overlap} must be less than window length {window_len}")]
    OverlapTooLarge { num_overlap: usize, window_len: usize },

    #[error("syllable: window length must be greater than 0")]
    EmptyWindow,

    #[error("syllable: invalid sample rate {0} Hz")]
    InvalidSampleRate(u32),

    #[error("syllable: invalid band-pass cutoffs {low_hz} Hz - {high_hz} Hz")]
    InvalidCutoff { low_hz: f32, high_hz: f32 },

    #[error("syllable: invalid stopping threshold {0} dB")]
    InvalidThreshold(f32),

    #[error("syllable: {axis} index {index} out of bounds (len {len})")]
    IndexOutOfBounds { axis: Axis, index: usize, len: usize },

    #[error("syllable: fft error: {0}")]
    Fft(String),

    #[error("syllable: io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<realfft::FftError> for DetectorError {
    fn from(e: realfft::FftError) -> Self {
        DetectorError::Fft(e.to_string())
    }
}
