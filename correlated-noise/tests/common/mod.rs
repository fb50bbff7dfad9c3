//! Synthetic detector timestreams for integration tests

#![allow(dead_code)]

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Parameters for a synthetic detector array readout
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    pub nt: usize,
    pub nc: usize,
    /// Standard deviation of the random-walk steps of the common mode
    pub common_step: f64,
    /// Range of channel gains to the common mode
    pub gain_range: (f64, f64),
    /// Range of per-channel white noise standard deviations
    pub noise_range: (f64, f64),
    /// Maximum absolute DC offset per channel
    pub max_offset: f64,
    /// Maximum absolute linear drift per channel, in units per sample
    pub max_slope: f64,
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            nt: 2000,
            nc: 16,
            common_step: 1.0,
            gain_range: (0.5, 1.5),
            noise_range: (0.5, 2.0),
            max_offset: 100.0,
            max_slope: 0.0,
            seed: 42,
        }
    }
}

/// Generated data plus the ground truth that went into it
#[derive(Debug, Clone)]
pub struct Synthetic {
    pub data: Array2<f64>,
    pub common_mode: Array1<f64>,
    pub gains: Array1<f64>,
    pub noise_std: Array1<f64>,
}

pub fn generate(config: &SyntheticConfig) -> Synthetic {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let step = Normal::new(0.0, config.common_step).unwrap();

    let mut common_mode = Array1::zeros(config.nt);
    let mut level = 0.0;
    for c in common_mode.iter_mut() {
        level += step.sample(&mut rng);
        *c = level;
    }

    let gains = Array1::from_shape_fn(config.nc, |_| {
        rng.gen_range(config.gain_range.0..config.gain_range.1)
    });
    let noise_std = Array1::from_shape_fn(config.nc, |_| {
        rng.gen_range(config.noise_range.0..config.noise_range.1)
    });
    let offsets = Array1::from_shape_fn(config.nc, |_| {
        rng.gen_range(-config.max_offset..=config.max_offset)
    });
    let slopes = Array1::from_shape_fn(config.nc, |_| {
        if config.max_slope > 0.0 {
            rng.gen_range(-config.max_slope..config.max_slope)
        } else {
            0.0
        }
    });

    let unit = Normal::new(0.0, 1.0).unwrap();
    let data = Array2::from_shape_fn((config.nt, config.nc), |(t, c)| {
        offsets[c]
            + slopes[c] * t as f64
            + gains[c] * common_mode[t]
            + noise_std[c] * unit.sample(&mut rng)
    });

    Synthetic {
        data,
        common_mode,
        gains,
        noise_std,
    }
}

/// Pearson correlation coefficient between two equal-length samples
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len());
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    cov / (var_x.sqrt() * var_y.sqrt())
}
