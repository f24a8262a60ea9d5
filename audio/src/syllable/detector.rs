use std::sync::Arc;

use tracing::{debug, error, warn};

use super::config::DetectorConfig;
use super::extract::extract_syllables;
use super::SyllableInfo;
use crate::error::DetectorError;
use crate::fft::FftPlan;
use crate::filter::{BandpassKernel, FirFilter};
use crate::spectrogram::{self, Framing, Spectrogram};

/// Number of taps of the band-pass pre-filter.
pub const FILTER_TAPS: usize = 31;

/// Result of [`SyllableDetector::analyze`].
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// Spectrogram of the filtered chunk.
    pub spectrogram: Spectrogram,
    /// Detected syllables, ordered by start time.
    pub syllables: Vec<SyllableInfo>,
}

/// Streaming STFT syllable detector.
///
/// The band-pass filter history carries over between calls, so chunks must
/// be fed in capture order. The detector is not synchronized; give each
/// capture thread its own instance or guard it externally.
#[derive(Debug)]
pub struct SyllableDetector {
    config: DetectorConfig,
    filter: FirFilter<FILTER_TAPS>,
    window: Vec<f32>,
    fft: FftPlan,
}

impl SyllableDetector {
    /// Creates a detector with its own band-pass kernel.
    ///
    /// Returns an error if `config` violates any construction invariant.
    pub fn new(config: DetectorConfig) -> Result<Self, DetectorError> {
        config.validate()?;
        let kernel = Arc::new(BandpassKernel::new(
            config.sample_rate_hz,
            config.low_cutoff_hz,
            config.high_cutoff_hz,
        ));
        Ok(Self::build(config, kernel))
    }

    /// Creates a detector that shares an existing kernel.
    ///
    /// The kernel's tuning takes precedence over the cutoffs in `config`.
    pub fn with_kernel(
        config: DetectorConfig,
        kernel: Arc<BandpassKernel<FILTER_TAPS>>,
    ) -> Result<Self, DetectorError> {
        config.validate()?;
        Ok(Self::build(config, kernel))
    }

    fn build(config: DetectorConfig, kernel: Arc<BandpassKernel<FILTER_TAPS>>) -> Self {
        let window = config.window.build(config.window_len);
        let fft = FftPlan::new(config.fft_len);
        Self {
            filter: FirFilter::new(kernel),
            window,
            fft,
            config,
        }
    }

    /// Returns the construction parameters.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Returns the band-pass kernel.
    pub fn kernel(&self) -> &Arc<BandpassKernel<FILTER_TAPS>> {
        self.filter.kernel()
    }

    /// Returns the analysis window coefficients.
    pub fn window(&self) -> &[f32] {
        &self.window
    }

    /// Detects syllables in the next chunk of the stream.
    ///
    /// Never fails: an empty chunk, or one shorter than a frame step, yields
    /// no syllables. Internal errors are logged and also yield no syllables.
    pub fn run(&mut self, signal: &[i16]) -> Vec<SyllableInfo> {
        match self.analyze(signal) {
            Ok(analysis) => analysis.syllables,
            Err(e) => {
                error!("syllable detection failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Like [`run`](Self::run), but also returns the spectrogram and
    /// surfaces internal errors.
    pub fn analyze(&mut self, signal: &[i16]) -> Result<Analysis, DetectorError> {
        if signal.is_empty() {
            return Ok(Analysis::default());
        }

        let filtered = self.filter.process(signal);
        let spectrogram = self.compute_spectrogram(&filtered)?;
        if spectrogram.is_empty() {
            warn!(
                "signal of {} samples is shorter than one frame step ({}), no syllables",
                signal.len(),
                self.config.hop()
            );
            return Ok(Analysis {
                spectrogram,
                syllables: Vec::new(),
            });
        }

        let syllables = extract_syllables(&spectrogram, self.config.stopping_threshold_db)?;
        debug!(
            "syllable: {} samples, {} frames, {} syllables",
            signal.len(),
            spectrogram.num_frames(),
            syllables.len()
        );
        Ok(Analysis {
            spectrogram,
            syllables,
        })
    }

    /// Runs only the band-pass pre-filter, advancing its history.
    pub fn filter(&mut self, signal: &[i16]) -> Vec<i16> {
        self.filter.process(signal)
    }

    /// Computes the spectrogram of `signal` as is, without filtering.
    pub fn compute_spectrogram(&mut self, signal: &[i16]) -> Result<Spectrogram, DetectorError> {
        let framing = Framing {
            window: &self.window,
            hop: self.config.hop(),
            sample_rate_hz: self.config.sample_rate_hz,
        };
        spectrogram::compute(&mut self.fft, &framing, signal)
    }

    /// Clears the filter history, as if the stream started over.
    pub fn reset(&mut self) {
        self.filter.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowKind;
    use std::f64::consts::PI;

    fn burst_signal() -> Vec<i16> {
        let mut signal = vec![0i16; 4000];
        for i in 0..1600 {
            let v = 32767.0 * (2.0 * PI * 1000.0 * i as f64 / 16000.0).sin();
            signal[1200 + i] = v as i16;
        }
        signal
    }

    #[test]
    fn test_rejects_invalid_config() {
        let cfg = DetectorConfig::default().with_framing(256, 128, 384);
        assert!(matches!(
            SyllableDetector::new(cfg),
            Err(DetectorError::FftLenNotPowerOfTwo { fft_len: 384 })
        ));
    }

    #[test]
    fn test_empty_signal() {
        let mut det = SyllableDetector::new(DetectorConfig::default()).unwrap();
        assert!(det.run(&[]).is_empty());

        // History untouched: filtering after an empty call matches a fresh filter
        let mut fresh = SyllableDetector::new(DetectorConfig::default()).unwrap();
        let signal = burst_signal();
        assert_eq!(det.filter(&signal), fresh.filter(&signal));
    }

    #[test]
    fn test_short_signal() {
        let mut det = SyllableDetector::new(DetectorConfig::default()).unwrap();
        let analysis = det.analyze(&[1000; 100]).unwrap();
        assert!(analysis.spectrogram.is_empty());
        assert!(analysis.syllables.is_empty());
    }

    #[test]
    fn test_single_burst() {
        let mut det = SyllableDetector::new(DetectorConfig::default()).unwrap();
        let syllables = det.run(&burst_signal());
        assert_eq!(syllables.len(), 1);

        let s = syllables[0];
        assert!(s.start_idx <= s.end_idx);
        assert!(s.start_time_s <= s.syllable_time_s && s.syllable_time_s <= s.end_time_s);
        assert!((s.peak_freq - 1000.0).abs() <= 31.25);
    }

    #[test]
    fn test_shared_kernel() {
        let first = SyllableDetector::new(DetectorConfig::default()).unwrap();
        let second =
            SyllableDetector::with_kernel(DetectorConfig::default(), Arc::clone(first.kernel()))
                .unwrap();
        assert!(Arc::ptr_eq(first.kernel(), second.kernel()));
    }

    #[test]
    fn test_kaiser_window_selected() {
        let cfg = DetectorConfig::default().with_window(WindowKind::Kaiser { beta: 6.0 });
        let det = SyllableDetector::new(cfg).unwrap();
        assert_eq!(det.window().len(), 256);
        assert_eq!(det.window(), WindowKind::Kaiser { beta: 6.0 }.build(256).as_slice());
    }

    #[test]
    fn test_reset_restarts_stream() {
        let signal = burst_signal();
        let mut det = SyllableDetector::new(DetectorConfig::default()).unwrap();
        let first = det.run(&signal);
        det.run(&signal[..777]);
        det.reset();
        assert_eq!(det.run(&signal), first);
    }

    #[test]
    fn test_detector_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<SyllableDetector>();
    }
}
