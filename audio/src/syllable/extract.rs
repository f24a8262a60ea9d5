//! Greedy adaptive-threshold interval extraction.

use super::SyllableInfo;
use crate::error::{Axis, DetectorError};
use crate::spectrogram::Spectrogram;

/// Loudest bin of one frame.
#[derive(Debug, Clone, Copy)]
struct FramePeak {
    power: f32,
    bin: usize,
    db: f32,
}

fn frame_peak(frame: &[f32]) -> FramePeak {
    let mut power = 0.0f32;
    let mut bin = 0;
    for (k, &p) in frame.iter().enumerate() {
        if p > power {
            power = p;
            bin = k;
        }
    }
    FramePeak {
        power,
        bin,
        db: 20.0 * power.log10(),
    }
}

/// Extracts syllables from a spectrogram.
///
/// # Algorithm
///
/// Repeatedly pick the loudest frame not yet claimed by an event (by its
/// loudest bin). The first pick fixes a global cutoff of
/// `peak_db - stopping_threshold_db`; extraction stops once the next pick
/// falls below it, or when no unclaimed frame has any power.
///
/// Each pick seeds an event that grows backward, then forward, over
/// neighbouring frames whose own peak stays within `stopping_threshold_db`
/// of the seed. Growth stops at the first frame that is too quiet or
/// already claimed.
///
/// The result is sorted by start time. Events that share a start time are
/// all kept.
///
/// Returns [`DetectorError::IndexOutOfBounds`] if the spectrogram axes are
/// inconsistent with its frames.
pub fn extract_syllables(
    spec: &Spectrogram,
    stopping_threshold_db: f32,
) -> Result<Vec<SyllableInfo>, DetectorError> {
    let peaks: Vec<FramePeak> = spec.frames().iter().map(|f| frame_peak(f)).collect();
    let mut used = vec![false; peaks.len()];
    let mut global_cutoff: Option<f32> = None;
    let mut syllables = Vec::new();

    loop {
        let mut seed = None;
        let mut max_power = 0.0f32;
        for (t, peak) in peaks.iter().enumerate() {
            if !used[t] && peak.power > max_power {
                max_power = peak.power;
                seed = Some(t);
            }
        }
        let Some(seed) = seed else {
            break;
        };

        let amp = 20.0 * max_power.log10();
        let cutoff = *global_cutoff.get_or_insert(amp - stopping_threshold_db);
        if amp < cutoff {
            break;
        }

        let min_amp = amp - stopping_threshold_db;
        syllables.push(grow(spec, &peaks, &mut used, seed, min_amp)?);
    }

    syllables.sort_by(|a, b| a.start_time_s.total_cmp(&b.start_time_s));
    Ok(syllables)
}

/// Running sums for one event.
struct Accumulator {
    count: usize,
    freq_sum: f32,
    db_sum: f32,
    peak_db: f32,
    peak_freq: f32,
}

impl Accumulator {
    fn add(&mut self, freq: f32, db: f32) {
        self.count += 1;
        self.freq_sum += freq;
        self.db_sum += db;
        if db > self.peak_db {
            self.peak_db = db;
            self.peak_freq = freq;
        }
    }
}

fn grow(
    spec: &Spectrogram,
    peaks: &[FramePeak],
    used: &mut [bool],
    seed: usize,
    min_amp: f32,
) -> Result<SyllableInfo, DetectorError> {
    let freqs = spec.freqs();
    let freq_of = |t: usize| -> Result<f32, DetectorError> {
        let bin = peaks[t].bin;
        freqs.get(bin).copied().ok_or(DetectorError::IndexOutOfBounds {
            axis: Axis::Frequency,
            index: bin,
            len: freqs.len(),
        })
    };
    let time_of = |t: usize| -> Result<(f32, usize), DetectorError> {
        match (spec.times().get(t), spec.offsets().get(t)) {
            (Some(&time), Some(&offset)) => Ok((time, offset)),
            _ => Err(DetectorError::IndexOutOfBounds {
                axis: Axis::Time,
                index: t,
                len: spec.times().len().min(spec.offsets().len()),
            }),
        }
    };

    let mut acc = Accumulator {
        count: 0,
        freq_sum: 0.0,
        db_sum: 0.0,
        peak_db: f32::NEG_INFINITY,
        peak_freq: 0.0,
    };

    // Backward, starting at the seed itself
    let mut first = seed;
    let mut i = seed;
    loop {
        if used[i] || peaks[i].db < min_amp {
            break;
        }
        acc.add(freq_of(i)?, peaks[i].db);
        used[i] = true;
        first = i;
        if i == 0 {
            break;
        }
        i -= 1;
    }

    // Forward, after the seed
    let mut last = seed;
    for i in seed + 1..peaks.len() {
        if used[i] || peaks[i].db < min_amp {
            break;
        }
        acc.add(freq_of(i)?, peaks[i].db);
        used[i] = true;
        last = i;
    }

    let (syllable_time_s, _) = time_of(seed)?;
    let (start_time_s, start_idx) = time_of(first)?;
    let (end_time_s, end_idx) = time_of(last)?;
    let count = acc.count.max(1) as f32;

    Ok(SyllableInfo {
        syllable_time_s,
        start_time_s,
        end_time_s,
        start_idx: start_idx as u32,
        end_idx: end_idx as u32,
        avg_freq: acc.freq_sum / count,
        peak_freq: acc.peak_freq,
        first_freq: freq_of(first)?,
        last_freq: freq_of(last)?,
        avg_power: acc.db_sum / count,
    })
}
