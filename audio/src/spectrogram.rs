//! Short-time power spectrogram.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::DetectorError;
use crate::fft::FftPlan;

/// One-sided power spectrogram of a signal.
///
/// `frame(t)[k]` is the power of bin `k` in the frame starting at sample
/// `offsets()[t]` (time `times()[t]`). Bin `k` is centred on `freqs()[k]` Hz.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spectrogram {
    frames: Vec<Vec<f32>>,
    times: Vec<f32>,
    offsets: Vec<usize>,
    freqs: Vec<f32>,
}

impl Spectrogram {
    /// Number of time frames.
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of frequency bins per frame.
    pub fn num_bins(&self) -> usize {
        self.freqs.len()
    }

    /// Returns true if the spectrogram has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Power values of frame `t`, indexed by bin.
    pub fn frame(&self, t: usize) -> &[f32] {
        &self.frames[t]
    }

    /// All frames, `[num_frames][num_bins]`.
    pub fn frames(&self) -> &[Vec<f32>] {
        &self.frames
    }

    /// Frame start times in seconds.
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    /// Frame start offsets in samples.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Bin frequencies in Hz.
    pub fn freqs(&self) -> &[f32] {
        &self.freqs
    }

    /// Writes the spectrogram as CSV: one row per time frame, one column
    /// per frequency bin.
    pub fn write_csv<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        for frame in &self.frames {
            let mut first = true;
            for power in frame {
                if !first {
                    w.write_all(b",")?;
                }
                write!(w, "{}", power)?;
                first = false;
            }
            w.write_all(b"\n")?;
        }
        w.flush()
    }

    /// Writes the spectrogram CSV to `path`, replacing any existing file.
    pub fn save_csv(&self, path: impl AsRef<Path>) -> Result<(), DetectorError> {
        let file = File::create(path)?;
        self.write_csv(BufWriter::new(file))?;
        Ok(())
    }
}

#[cfg(test)]
impl Spectrogram {
    /// Assembles a spectrogram from precomputed power frames.
    pub(crate) fn from_parts(frames: Vec<Vec<f32>>, hop: usize, sample_rate_hz: u32) -> Self {
        let num_bins = frames.first().map_or(0, Vec::len);
        let offsets: Vec<usize> = (0..frames.len()).map(|t| t * hop).collect();
        Self {
            times: offsets
                .iter()
                .map(|&o| o as f32 / sample_rate_hz as f32)
                .collect(),
            offsets,
            freqs: frequency_axis(num_bins * 2, sample_rate_hz),
            frames,
        }
    }

    pub(crate) fn with_num_bins(mut self, num_bins: usize) -> Self {
        self.freqs.truncate(num_bins);
        self
    }
}

/// Frequency of each of the `fft_len / 2` bins.
///
/// Bin `k` maps to `0.5 * k * sample_rate / num_bins` Hz.
pub fn frequency_axis(fft_len: usize, sample_rate_hz: u32) -> Vec<f32> {
    let num_bins = fft_len / 2;
    (0..num_bins)
        .map(|k| 0.5 * k as f32 * sample_rate_hz as f32 / num_bins as f32)
        .collect()
}

/// Frame layout of a short-time analysis.
pub(crate) struct Framing<'a> {
    pub window: &'a [f32],
    pub hop: usize,
    pub sample_rate_hz: u32,
}

/// Computes the spectrogram of `signal`.
///
/// Produces `signal.len() / hop` frames. Each frame is scaled to `[-1, 1]`,
/// windowed, zero-padded to the FFT length and transformed; samples past the
/// end of the signal count as zero.
pub(crate) fn compute(
    plan: &mut FftPlan,
    framing: &Framing<'_>,
    signal: &[i16],
) -> Result<Spectrogram, DetectorError> {
    let fft_len = plan.len();
    let num_frames = signal.len() / framing.hop;
    let num_bins = fft_len / 2;
    let norm = 1.0 / (fft_len as f32 * fft_len as f32);
    let scale = 1.0 / i16::MAX as f32;

    let mut spec = Spectrogram {
        frames: Vec::with_capacity(num_frames),
        times: Vec::with_capacity(num_frames),
        offsets: Vec::with_capacity(num_frames),
        freqs: frequency_axis(fft_len, framing.sample_rate_hz),
    };

    for t in 0..num_frames {
        let offset = t * framing.hop;
        let end = (offset + framing.window.len()).min(signal.len());

        // Window and zero-pad
        let input = plan.input_mut();
        input.fill(0.0);
        for (i, (&s, &w)) in signal[offset..end].iter().zip(framing.window).enumerate() {
            input[i] = s as f32 * scale * w;
        }

        let spectrum = plan.process()?;

        // One-sided power; bins above DC fold in the negative frequencies
        let mut power = Vec::with_capacity(num_bins);
        for (k, c) in spectrum[..num_bins].iter().enumerate() {
            let p = (c.re * c.re + c.im * c.im) * norm;
            power.push(if k == 0 { p } else { 2.0 * p });
        }

        spec.frames.push(power);
        spec.times.push(offset as f32 / framing.sample_rate_hz as f32);
        spec.offsets.push(offset);
    }

    Ok(spec)
}
