//! Iterative correlated noise removal.
//!
//! Every round runs four phases over the same matrix, each consuming the
//! complete output of the previous one:
//!
//! 1. remove drifts (or DC offsets) per channel
//! 2. estimate and remove the correlated noise with the current gains and weights
//! 3. estimate and remove residual gain responses to the correlated noise
//! 4. recompute the noise weights from the residuals
//!
//! The correlated noise and gains accumulate across rounds, the weights are
//! replaced. After enough rounds (typically ~5) the matrix holds the data
//! cleaned of correlated noise and drifts.

use ndarray::{ArrayViewMut2, ShapeError};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::config::DecorrelateConfig;
use crate::correlated::update_correlated;
use crate::drift::remove_drifts;
use crate::gains::update_gains;
use crate::model::{NoiseModel, RoundSummary};
use crate::sample::Sample;
use crate::weights::update_weights;

/// Errors that can occur before a decorrelation run starts.
///
/// Numerically degenerate data (all-zero weights, no correlated noise
/// power, too few degrees of freedom) is not an error.
#[derive(Error, Debug)]
pub enum DecorrelateError {
    #[error("timestream has no samples (nt = 0)")]
    NoSamples,

    #[error("timestream has no channels (nc = 0)")]
    NoChannels,

    #[error("drift resolution must be at least 1 sample")]
    InvalidDriftResolution,

    #[error("data shape {actual:?} does not match noise model shape {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("sample buffer holds {actual} values, nt x nc requires {expected:?}")]
    BufferLength {
        /// `nt * nc`, or `None` if the product overflows
        expected: Option<usize>,
        actual: usize,
    },

    #[error("cannot view sample buffer as nt x nc matrix: {0}")]
    Layout(#[from] ShapeError),
}

fn validate_dim(nt: usize, nc: usize) -> Result<(), DecorrelateError> {
    if nt == 0 {
        return Err(DecorrelateError::NoSamples);
    }
    if nc == 0 {
        return Err(DecorrelateError::NoChannels);
    }
    Ok(())
}

/// Remove correlated noise and drifts from `data` in place.
///
/// # Arguments
/// * `data` - Sample matrix of shape `(nt, nc)`: row `t` holds time sample
///   `t` of every channel
/// * `config` - Drift resolution, number of rounds and dof mode
///
/// # Returns
/// The estimated noise model: correlated noise `C`, channel gains `G` and
/// noise weights `w`. With `config.rounds == 0` the data is untouched and
/// the model is in its initial state.
///
/// # Errors
/// * `DecorrelateError::NoSamples` / `NoChannels` - If the matrix is empty
/// * `DecorrelateError::InvalidDriftResolution` - If `config.drift_samples` is 0
pub fn decorrelate<T: Sample>(
    mut data: ArrayViewMut2<'_, T>,
    config: &DecorrelateConfig,
) -> Result<NoiseModel, DecorrelateError> {
    let (nt, nc) = data.dim();
    validate_dim(nt, nc)?;
    config.validate()?;

    if config.removes_dc_only(nt) {
        debug!(
            "Decorrelating {} samples x {} channels: {} rounds, DC offsets only",
            nt, nc, config.rounds
        );
    } else {
        debug!(
            "Decorrelating {} samples x {} channels: {} rounds, drift resolution {} samples",
            nt, nc, config.rounds, config.drift_samples
        );
    }

    let mut model = NoiseModel::new(nt, nc);
    for _ in 0..config.rounds {
        model.run_round(data.view_mut(), config);
    }

    Ok(model)
}

/// Same as [`decorrelate`] for a row-major buffer of `nt × nc` samples,
/// where `data[t * nc + c]` is sample `t` of channel `c`.
///
/// # Errors
/// Everything [`decorrelate`] reports, plus
/// `DecorrelateError::BufferLength` if `data.len() != nt * nc`. The buffer
/// is not modified in that case.
pub fn decorrelate_slice<T: Sample>(
    data: &mut [T],
    nt: usize,
    nc: usize,
    config: &DecorrelateConfig,
) -> Result<NoiseModel, DecorrelateError> {
    validate_dim(nt, nc)?;

    let expected = nt.checked_mul(nc);
    if expected != Some(data.len()) {
        return Err(DecorrelateError::BufferLength {
            expected,
            actual: data.len(),
        });
    }

    let view = ArrayViewMut2::from_shape((nt, nc), data)?;
    decorrelate(view, config)
}

impl NoiseModel {
    /// Run one more round on `data` with the current state.
    ///
    /// # Errors
    /// * `DecorrelateError::ShapeMismatch` - If `data` does not have the
    ///   shape this model was created for
    /// * `DecorrelateError::InvalidDriftResolution` - If `config.drift_samples` is 0
    pub fn iterate<T: Sample>(
        &mut self,
        data: ArrayViewMut2<'_, T>,
        config: &DecorrelateConfig,
    ) -> Result<RoundSummary, DecorrelateError> {
        if data.dim() != self.dim() {
            return Err(DecorrelateError::ShapeMismatch {
                expected: self.dim(),
                actual: data.dim(),
            });
        }
        config.validate()?;

        Ok(self.run_round(data, config))
    }

    fn run_round<T: Sample>(
        &mut self,
        mut data: ArrayViewMut2<'_, T>,
        config: &DecorrelateConfig,
    ) -> RoundSummary {
        let (nt, nc) = data.dim();
        let round = self.history.len() + 1;

        remove_drifts(data.view_mut(), config.drift_samples);

        let samples = update_correlated(
            data.view_mut(),
            self.correlated.view_mut(),
            self.gains.view(),
            self.weights.view(),
        );
        trace!("Round {}: correlated noise updated at {}/{} samples", round, samples, nt);

        let channels = update_gains(data.view_mut(), self.correlated.view(), self.gains.view_mut());
        trace!("Round {}: gains updated for {}/{} channels", round, channels, nc);

        let weighting = update_weights(
            data.view(),
            self.weights.view_mut(),
            config.drift_samples,
            config.dof_mode,
        );

        let summary = RoundSummary {
            round,
            residual_rms: (weighting.sum_of_squares / (nt * nc) as f64).sqrt(),
            zero_weight_channels: weighting.zero_weight_channels,
        };

        debug!(
            "Round {}: residual rms {:.6e}, {} of {} channels zero-weighted",
            round, summary.residual_rms, summary.zero_weight_channels, nc
        );
        if summary.zero_weight_channels == nc {
            warn!(
                "Round {}: every channel has zero weight; correlated noise will not be updated further",
                round
            );
        }

        self.history.push(summary);
        summary
    }
}
