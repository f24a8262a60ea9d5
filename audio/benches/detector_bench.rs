use criterion::{black_box, criterion_group, criterion_main, Criterion};
use victor_audio::syllable::{extract_syllables, DetectorConfig, SyllableDetector};

fn make_bursts(n_samples: usize, sample_rate: usize) -> Vec<i16> {
    // 100ms bursts of 1kHz every 400ms
    (0..n_samples)
        .map(|i| {
            if (i * 10 / sample_rate) % 4 != 0 {
                return 0;
            }
            let t = i as f64 / sample_rate as f64;
            (32000.0 * (1000.0 * 2.0 * std::f64::consts::PI * t).sin()) as i16
        })
        .collect()
}

fn bench_filter_1s(c: &mut Criterion) {
    let audio = make_bursts(16000, 16000);
    let mut det = SyllableDetector::new(DetectorConfig::default()).unwrap();

    c.bench_function("syllable_filter_1s", |b| {
        b.iter(|| {
            let _ = black_box(det.filter(black_box(&audio)));
        });
    });
}

fn bench_spectrogram_1s(c: &mut Criterion) {
    let audio = make_bursts(16000, 16000);
    let mut det = SyllableDetector::new(DetectorConfig::default()).unwrap();

    c.bench_function("syllable_spectrogram_1s", |b| {
        b.iter(|| {
            let _ = black_box(det.compute_spectrogram(black_box(&audio)));
        });
    });
}

fn bench_extract_4s(c: &mut Criterion) {
    let audio = make_bursts(64000, 16000);
    let mut det = SyllableDetector::new(DetectorConfig::default()).unwrap();
    let filtered = det.filter(&audio);
    let spec = det.compute_spectrogram(&filtered).unwrap();

    c.bench_function("syllable_extract_4s", |b| {
        b.iter(|| {
            let _ = black_box(extract_syllables(black_box(&spec), 20.0));
        });
    });
}

fn bench_run_1s(c: &mut Criterion) {
    let audio = make_bursts(16000, 16000);
    let mut det = SyllableDetector::new(DetectorConfig::default()).unwrap();

    c.bench_function("syllable_run_1s", |b| {
        b.iter(|| {
            let _ = black_box(det.run(black_box(&audio)));
        });
    });
}

criterion_group!(
    benches,
    bench_filter_1s,
    bench_spectrogram_1s,
    bench_extract_4s,
    bench_run_1s
);
criterion_main!(benches);
