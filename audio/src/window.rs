//! Analysis window builders.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Shape of the analysis window applied to each frame before the FFT.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowKind {
    #[default]
    Hann,
    /// Kaiser window; larger `beta` trades main-lobe width for lower side lobes.
    Kaiser { beta: f32 },
}

impl WindowKind {
    /// Builds a window of this shape with `len` coefficients.
    pub fn build(&self, len: usize) -> Vec<f32> {
        match *self {
            WindowKind::Hann => hann_window(len),
            WindowKind::Kaiser { beta } => kaiser_window(len, beta),
        }
    }
}

/// Generates a symmetric Hann window of the given length.
///
/// The first half is computed as `0.5 * (1 - cos(2*pi*i / (len-1)))` and
/// mirrored onto the second half, so the result is exactly symmetric.
pub fn hann_window(len: usize) -> Vec<f32> {
    if len <= 1 {
        return vec![1.0; len];
    }
    let mut w = vec![0.0f32; len];
    let denom = (len - 1) as f64;
    for i in 0..len.div_ceil(2) {
        let v = (0.5 * (1.0 - (2.0 * PI * i as f64 / denom).cos())) as f32;
        w[i] = v;
        w[len - 1 - i] = v;
    }
    w
}

/// Generates a symmetric Kaiser window of the given length.
pub fn kaiser_window(len: usize, beta: f32) -> Vec<f32> {
    if len <= 1 {
        return vec![1.0; len];
    }
    let beta = beta as f64;
    let norm = bessel_i0(beta);
    let denom = (len - 1) as f64;
    (0..len)
        .map(|n| {
            let r = 2.0 * n as f64 / denom - 1.0;
            let arg = beta * (1.0 - r * r).max(0.0).sqrt();
            (bessel_i0(arg) / norm) as f32
        })
        .collect()
}

/// Zeroth-order modified Bessel function of the first kind.
///
/// Evaluated by its power series, summed until terms stop contributing.
pub fn bessel_i0(x: f64) -> f64 {
    let half = x / 2.0;
    let mut sum = 1.0;
    let mut term = 1.0;
    let mut k = 1.0;
    loop {
        term *= half / k;
        let sq = term * term;
        sum += sq;
        if sq < sum * 1e-16 {
            return sum;
        }
        k += 1.0;
    }
}
