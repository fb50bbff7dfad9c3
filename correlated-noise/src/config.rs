//! Run parameters for correlated noise removal.

use serde::{Deserialize, Serialize};

use crate::decorrelate::DecorrelateError;
use crate::weights::DofMode;

/// Default number of iterations. About five rounds usually clean the data.
pub const DEFAULT_ROUNDS: usize = 5;

/// Parameters of a decorrelation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorrelateConfig {
    /// Drift removal resolution in samples. Keep it below the 1/f stability
    /// timescale of the detectors, or use a value `>= nt` to remove DC
    /// offsets only.
    pub drift_samples: usize,

    /// Number of drift / correlated / gain / weight iterations.
    pub rounds: usize,

    /// Degrees-of-freedom evaluation for the noise weights.
    pub dof_mode: DofMode,
}

impl Default for DecorrelateConfig {
    fn default() -> Self {
        Self {
            drift_samples: usize::MAX,
            rounds: DEFAULT_ROUNDS,
            dof_mode: DofMode::PerChannel,
        }
    }
}

impl DecorrelateConfig {
    /// Create a config with the given drift resolution and round count.
    pub fn new(drift_samples: usize, rounds: usize) -> Self {
        Self {
            drift_samples,
            rounds,
            ..Self::default()
        }
    }

    pub fn with_drift_samples(mut self, drift_samples: usize) -> Self {
        self.drift_samples = drift_samples;
        self
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_dof_mode(mut self, dof_mode: DofMode) -> Self {
        self.dof_mode = dof_mode;
        self
    }

    /// True when drift removal reduces to a single DC level per channel.
    pub fn removes_dc_only(&self, nt: usize) -> bool {
        self.drift_samples >= nt
    }

    /// Check the parameters that do not depend on the data.
    pub fn validate(&self) -> Result<(), DecorrelateError> {
        if self.drift_samples == 0 {
            return Err(DecorrelateError::InvalidDriftResolution);
        }
        Ok(())
    }
}
