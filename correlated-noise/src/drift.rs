//! Block-wise drift (or DC offset) removal.
//!
//! Each channel's timestream is cut into contiguous blocks of `block_len`
//! samples and the mean of every block is subtracted from it. The last
//! block of a channel may be shorter. A `block_len >= nt` degenerates to a
//! single block per channel, i.e. plain DC offset removal.
//!
//! The removed levels are not kept.

use ndarray::{ArrayViewMut2, Axis};

use crate::sample::Sample;

/// Number of drift levels estimated per channel: `ceil(nt / block_len)`.
///
/// # Panics
///
/// Panics if `block_len` is zero.
pub fn drift_block_count(nt: usize, block_len: usize) -> usize {
    assert!(block_len > 0, "drift block length must be at least 1 sample");
    nt.div_ceil(block_len)
}

/// Removes the mean of every `block_len`-sample block from each channel.
///
/// # Arguments
/// * `data` - Sample matrix of shape `(nt, nc)`, modified in place
/// * `block_len` - Drift resolution in samples. Use a value `>= nt` to
///   remove DC offsets only.
///
/// # Panics
///
/// Panics if `block_len` is zero.
pub fn remove_drifts<T: Sample>(mut data: ArrayViewMut2<'_, T>, block_len: usize) {
    assert!(block_len > 0, "drift block length must be at least 1 sample");

    for mut channel in data.axis_iter_mut(Axis(1)) {
        for mut block in channel.axis_chunks_iter_mut(Axis(0), block_len) {
            if block.is_empty() {
                continue;
            }

            let sum: f64 = block.iter().map(|v| v.to_f64()).sum();
            let level = sum / block.len() as f64;

            block.mapv_inplace(|v| T::from_f64(v.to_f64() - level));
        }
    }
}
