//! Audio file loading.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use victor_audio::pcm::samples_from_le_bytes;

/// Mono samples read from disk.
#[derive(Debug)]
pub struct Audio {
    pub samples: Vec<i16>,
    /// Sample rate from the file header; `None` for raw PCM.
    pub sample_rate_hz: Option<u32>,
}

/// Loads `.wav` files through hound; anything else is read as raw s16le PCM.
pub fn load(path: &Path) -> Result<Audio> {
    let is_wav = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));

    if is_wav {
        load_wav(path)
    } else {
        let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        if data.len() % 2 != 0 {
            tracing::warn!("{}: ignoring trailing odd byte", path.display());
        }
        Ok(Audio {
            samples: samples_from_le_bytes(&data),
            sample_rate_hz: None,
        })
    }
}

fn load_wav(path: &Path) -> Result<Audio> {
    let reader = hound::WavReader::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let spec = reader.spec();

    if spec.channels != 1 {
        bail!(
            "{}: expected mono audio, got {} channels",
            path.display(),
            spec.channels
        );
    }
    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
        bail!(
            "{}: expected 16-bit integer PCM, got {}-bit {:?}",
            path.display(),
            spec.bits_per_sample,
            spec.sample_format
        );
    }

    let samples = reader
        .into_samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("failed to decode {}", path.display()))?;

    Ok(Audio {
        samples,
        sample_rate_hz: Some(spec.sample_rate),
    })
}
