//! Noise model state carried between rounds and returned to the caller.

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

/// Diagnostics of one completed round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// 1-based round index within the model's lifetime
    pub round: usize,
    /// RMS of the residual over all samples and channels after the round
    pub residual_rms: f64,
    /// Channels left with zero noise weight
    pub zero_weight_channels: usize,
}

/// Correlated noise, gains and noise weights estimated from one matrix.
///
/// `correlated` (`C`, length `nt`) and `gains` (`G`, length `nc`) only
/// accumulate between rounds; `weights` (`w`, length `nc`) is replaced by
/// every round. `C` and `G` are unnormalized: only their product is
/// meaningful.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseModel {
    pub(crate) correlated: Array1<f64>,
    pub(crate) gains: Array1<f64>,
    pub(crate) weights: Array1<f64>,
    pub(crate) history: Vec<RoundSummary>,
}

impl NoiseModel {
    /// Initial state: no correlated noise, unit gains, unit weights.
    pub fn new(nt: usize, nc: usize) -> Self {
        Self {
            correlated: Array1::zeros(nt),
            gains: Array1::ones(nc),
            weights: Array1::ones(nc),
            history: Vec::new(),
        }
    }

    /// Shape `(nt, nc)` of the matrix this model describes.
    pub fn dim(&self) -> (usize, usize) {
        (self.correlated.len(), self.gains.len())
    }

    pub fn correlated(&self) -> ArrayView1<'_, f64> {
        self.correlated.view()
    }

    pub fn gains(&self) -> ArrayView1<'_, f64> {
        self.gains.view()
    }

    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }

    pub fn history(&self) -> &[RoundSummary] {
        &self.history
    }

    pub fn rounds_completed(&self) -> usize {
        self.history.len()
    }

    /// RMS noise of one channel, `1/√w`. Zero-weight channels report
    /// infinite noise; `None` if `channel` is out of range.
    pub fn channel_rms(&self, channel: usize) -> Option<f64> {
        self.weights.get(channel).map(|&w| weight_to_rms(w))
    }

    /// RMS noise of every channel, see [`NoiseModel::channel_rms`].
    pub fn rms_noise(&self) -> Array1<f64> {
        self.weights.mapv(weight_to_rms)
    }

    /// The modeled correlated noise seen by `channel`: `G[c]·C[t]`.
    pub fn channel_common_mode(&self, channel: usize) -> Option<Array1<f64>> {
        let g = *self.gains.get(channel)?;
        Some(self.correlated.mapv(|c| g * c))
    }

    /// Consume the model, returning `(C, G, w)`.
    pub fn into_parts(self) -> (Array1<f64>, Array1<f64>, Array1<f64>) {
        (self.correlated, self.gains, self.weights)
    }
}

fn weight_to_rms(weight: f64) -> f64 {
    if weight > 0.0 {
        1.0 / weight.sqrt()
    } else {
        f64::INFINITY
    }
}
