//! syllables - detect syllable-like acoustic events in a recording.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};
use victor_audio::pcm::{duration_of, samples_in};
use victor_audio::{DetectorConfig, Spectrogram, SyllableDetector, SyllableInfo};

mod input;

/// Detect syllable-like acoustic events in a recording.
///
/// The input is band-pass filtered, turned into a short-time power
/// spectrogram and segmented around its spectral peaks. Each event is
/// printed with its time span and frequency summary.
#[derive(Parser, Debug)]
#[command(name = "syllables")]
#[command(version)]
pub struct Cli {
    /// Input audio: .wav (mono 16-bit) or raw s16le PCM
    pub input: PathBuf,

    /// Detector config file (YAML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Sample rate of the input in Hz (overrides config; ignored for .wav)
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Stopping threshold in dB below each peak (overrides config)
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Feed the input in chunks of this many milliseconds (0 = whole file)
    #[arg(long, default_value_t = 0)]
    pub chunk_ms: u64,

    /// Write the spectrogram of the filtered input to this CSV file
    #[arg(long)]
    pub spectrogram: Option<PathBuf>,

    /// Output events as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Events go to stdout, logs to stderr
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let audio = input::load(&cli.input)?;
    let mut config = resolve_config(&cli)?;
    if let Some(rate) = audio.sample_rate_hz {
        if rate != config.sample_rate_hz {
            warn!(
                "{} is {} Hz, overriding configured {} Hz",
                cli.input.display(),
                rate,
                config.sample_rate_hz
            );
            config.sample_rate_hz = rate;
        }
    }
    debug!(
        "loaded {} samples ({:.2?}) from {}",
        audio.samples.len(),
        duration_of(audio.samples.len(), config.sample_rate_hz),
        cli.input.display()
    );

    let mut detector = SyllableDetector::new(config.clone()).context("invalid detector config")?;
    let chunk_len = samples_in(Duration::from_millis(cli.chunk_ms), config.sample_rate_hz);

    let syllables = if chunk_len == 0 {
        let analysis = detector.analyze(&audio.samples)?;
        if let Some(path) = &cli.spectrogram {
            save_spectrogram(&analysis.spectrogram, path)?;
        }
        analysis.syllables
    } else {
        let syllables = detect_chunked(&mut detector, &audio.samples, chunk_len);
        if let Some(path) = &cli.spectrogram {
            // A fresh detector sees the whole input in one call
            let analysis = SyllableDetector::new(config.clone())?.analyze(&audio.samples)?;
            save_spectrogram(&analysis.spectrogram, path)?;
        }
        syllables
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if cli.json {
        write_json(&mut out, &syllables)?;
    } else {
        write_table(&mut out, &syllables)?;
    }
    out.flush()?;
    Ok(())
}

/// Loads the config file, if any, and applies command-line overrides.
fn resolve_config(cli: &Cli) -> Result<DetectorConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let data = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_yaml::from_str(&data)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => DetectorConfig::default(),
    };

    if let Some(rate) = cli.sample_rate {
        config.sample_rate_hz = rate;
    }
    if let Some(threshold) = cli.threshold {
        config.stopping_threshold_db = threshold;
    }
    Ok(config)
}

/// Runs the detector chunk by chunk, shifting events into file time.
fn detect_chunked(
    detector: &mut SyllableDetector,
    samples: &[i16],
    chunk_len: usize,
) -> Vec<SyllableInfo> {
    let sample_rate = detector.config().sample_rate_hz;
    let mut syllables = Vec::new();
    for (i, chunk) in samples.chunks(chunk_len).enumerate() {
        let offset = (i * chunk_len) as u32;
        let found = detector.run(chunk);
        debug!("chunk {} @ {}: {} syllables", i, offset, found.len());
        syllables.extend(found.into_iter().map(|s| s.offset_by(offset, sample_rate)));
    }
    syllables
}

fn save_spectrogram(spectrogram: &Spectrogram, path: &Path) -> Result<()> {
    spectrogram
        .save_csv(path)
        .with_context(|| format!("failed to write spectrogram {}", path.display()))?;
    debug!(
        "wrote {}x{} spectrogram to {}",
        spectrogram.num_frames(),
        spectrogram.num_bins(),
        path.display()
    );
    Ok(())
}

fn write_json<W: Write>(w: &mut W, syllables: &[SyllableInfo]) -> Result<()> {
    for s in syllables {
        serde_json::to_writer(&mut *w, s)?;
        writeln!(w)?;
    }
    Ok(())
}

fn write_table<W: Write>(w: &mut W, syllables: &[SyllableInfo]) -> Result<()> {
    writeln!(
        w,
        "{:>3}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}  {:>9}",
        "#", "start", "end", "peak", "peak Hz", "avg Hz", "first Hz", "last Hz", "power dB"
    )?;
    for (i, s) in syllables.iter().enumerate() {
        writeln!(
            w,
            "{:>3}  {:>8.3}  {:>8.3}  {:>8.3}  {:>8.1}  {:>8.1}  {:>8.1}  {:>8.1}  {:>9.2}",
            i + 1,
            s.start_time_s,
            s.end_time_s,
            s.syllable_time_s,
            s.peak_freq,
            s.avg_freq,
            s.first_freq,
            s.last_freq,
            s.avg_power
        )?;
    }
    writeln!(w, "{} syllables", syllables.len())?;
    Ok(())
}
