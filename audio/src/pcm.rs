//! Signed 16-bit PCM helpers.

use std::time::Duration;

/// Decodes signed 16-bit little-endian PCM bytes into samples.
///
/// A trailing odd byte is ignored.
pub fn samples_from_le_bytes(data: &[u8]) -> Vec<i16> {
    data.chunks_exact(2)
        .map(|bytes| i16::from_le_bytes([bytes[0], bytes[1]]))
        .collect()
}

/// Encodes samples as signed 16-bit little-endian PCM bytes.
pub fn samples_to_le_bytes(samples: &[i16]) -> Vec<u8> {
    let mut data = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        data.extend_from_slice(&sample.to_le_bytes());
    }
    data
}

/// Returns the playback duration of `samples` mono samples.
pub fn duration_of(samples: usize, sample_rate_hz: u32) -> Duration {
    if sample_rate_hz == 0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(samples as f64 / sample_rate_hz as f64)
}

/// Returns how many mono samples cover `duration`, rounded down.
pub fn samples_in(duration: Duration, sample_rate_hz: u32) -> usize {
    (duration.as_nanos() * sample_rate_hz as u128 / 1_000_000_000) as usize
}
