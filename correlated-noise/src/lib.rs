//! correlated-noise - Correlated noise removal for detector array timestreams
//!
//! Detector arrays (bolometers, KIDs, ...) see a slowly varying noise
//! component common to every element, on top of channel-local drifts and
//! white noise. This crate estimates and removes that shared component with
//! an alternating least-squares scheme:
//!
//! - **Drifts** - block-wise mean removal per channel
//! - **Correlated** - per-sample cross-channel estimate of the common mode
//! - **Gains** - per-channel residual response to the common mode
//! - **Weights** - inverse-variance noise weights with a degrees-of-freedom
//!   correction
//!
//! The sample matrix has shape `(nt, nc)`: one row per time sample, one
//! column per channel. It is cleaned in place.
//!
//! # Example
//!
//! ```
//! use correlated_noise::{decorrelate, DecorrelateConfig};
//! use ndarray::array;
//!
//! let mut data = array![[1.0_f32, 1.0], [-1.0, -1.0]];
//! let config = DecorrelateConfig::default().with_rounds(1);
//!
//! let model = decorrelate(data.view_mut(), &config).unwrap();
//!
//! assert_eq!(data, array![[0.0_f32, 0.0], [0.0, 0.0]]);
//! assert_eq!(model.correlated().to_vec(), vec![1.0, -1.0]);
//! ```

pub mod config;
pub mod correlated;
pub mod decorrelate;
pub mod drift;
pub mod gains;
pub mod model;
pub mod sample;
pub mod weights;

pub use config::DecorrelateConfig;
pub use correlated::update_correlated;
pub use decorrelate::{decorrelate, decorrelate_slice, DecorrelateError};
pub use drift::{drift_block_count, remove_drifts};
pub use gains::update_gains;
pub use model::{NoiseModel, RoundSummary};
pub use sample::Sample;
pub use weights::{update_weights, DofMode, WeightSummary};
