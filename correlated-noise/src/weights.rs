//! Noise weights from residual variance.
//!
//! After drifts, correlated noise and gains have been removed, the residual
//! of each channel is (ideally) white. Its variance, corrected for the
//! degrees of freedom already spent on the models, gives an inverse-noise
//! weight:
//!
//! ```text
//! dof[c] = nt·(1 − w[c]/Σw) − (1 + ceil(nt / driftT))
//! w[c]   = dof[c] / Σ_t data[t][c]²     if dof[c] > 0, else 0
//! ```
//!
//! Each sample gives away `w[c]/Σw` of a degree of freedom to the
//! correlated noise estimate at that instant, one more degree goes to the
//! channel gain and `ceil(nt / driftT)` to the drift levels.

use ndarray::{ArrayViewMut1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::drift::drift_block_count;
use crate::sample::Sample;

/// How the degrees-of-freedom correction is evaluated across channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DofMode {
    /// Every channel uses its own weight from before this update.
    #[default]
    PerChannel,
    /// A single `dof`, computed from the last channel's weight, is applied
    /// to every channel, for comparison with outputs of tools that
    /// evaluate the correction once per round.
    LastChannel,
}

/// Outcome of a weight update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightSummary {
    /// Sum of squared residuals over all channels and samples
    pub sum_of_squares: f64,
    /// Channels that received a zero weight
    pub zero_weight_channels: usize,
}

/// Replaces `weights` with inverse-variance noise weights.
///
/// The weight sum is taken over the complete previous weight vector before
/// any entry is overwritten. Channels with non-positive degrees of freedom
/// or zero residual variance get a weight of zero, so weights are never
/// negative. Once every weight is zero (`Σw == 0`) the channels carry no
/// information and all weights stay zero.
///
/// # Arguments
/// * `data` - Residual sample matrix of shape `(nt, nc)`, assumed drift
///   corrected (no mean is subtracted)
/// * `weights` - Previous weights on input, new weights on output, length `nc`
/// * `drift_samples` - Drift resolution that was used for drift removal
/// * `mode` - Degrees-of-freedom evaluation
///
/// # Panics
///
/// Panics if `drift_samples` is zero or `weights` does not have `nc`
/// entries.
pub fn update_weights<T: Sample>(
    data: ArrayView2<'_, T>,
    mut weights: ArrayViewMut1<'_, f64>,
    drift_samples: usize,
    mode: DofMode,
) -> WeightSummary {
    let (nt, nc) = data.dim();
    assert_eq!(weights.len(), nc, "weight vector length must equal nc");

    let lost_to_models = 1.0 + drift_block_count(nt, drift_samples) as f64;

    // Read-only pass over the previous weights
    let sum_w: f64 = weights.sum();
    let informative = sum_w > 0.0;
    let dof_for = |w: f64| {
        if informative {
            nt as f64 * (1.0 - w / sum_w) - lost_to_models
        } else {
            0.0
        }
    };

    let shared_dof = match mode {
        DofMode::PerChannel => None,
        DofMode::LastChannel => nc.checked_sub(1).map(|last| dof_for(weights[last])),
    };

    let mut summary = WeightSummary {
        sum_of_squares: 0.0,
        zero_weight_channels: 0,
    };

    for (channel, w) in data.axis_iter(Axis(1)).zip(weights.iter_mut()) {
        let var: f64 = channel
            .iter()
            .map(|x| {
                let x = x.to_f64();
                x * x
            })
            .sum();
        summary.sum_of_squares += var;

        let dof = shared_dof.unwrap_or_else(|| dof_for(*w));

        *w = if dof > 0.0 && var > 0.0 { dof / var } else { 0.0 };

        if *w == 0.0 {
            summary.zero_weight_channels += 1;
        }
    }

    summary
}
