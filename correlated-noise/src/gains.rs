//! Channel gain estimation against the correlated noise signal.
//!
//! Each channel's residual is regressed on the current common-mode
//! estimate `C`:
//!
//! ```text
//! dG[c] = Σ_t C[t]·data[t][c] / Σ_t C[t]²
//! ```
//!
//! The fitted response is removed from the channel and added to its gain.
//! Gains are not normalized, so the overall scale of `G` (and with it the
//! units of `C`) is arbitrary and may wander from round to round.

use ndarray::{ArrayView1, ArrayViewMut1, ArrayViewMut2, Axis, Zip};

use crate::sample::Sample;

/// Estimates and removes the residual gain response of every channel.
///
/// Nothing is changed when the correlated noise has no power
/// (`Σ C² == 0`), e.g. before any common mode has been estimated.
///
/// # Arguments
/// * `data` - Sample matrix of shape `(nt, nc)`, modified in place
/// * `correlated` - Correlated noise estimate, length `nt`
/// * `gains` - Channel gains, length `nc`, incremented in place
///
/// # Returns
/// Number of channels whose gain was updated
///
/// # Panics
///
/// Panics if the vector lengths do not match the matrix shape.
pub fn update_gains<T: Sample>(
    mut data: ArrayViewMut2<'_, T>,
    correlated: ArrayView1<'_, f64>,
    mut gains: ArrayViewMut1<'_, f64>,
) -> usize {
    let (nt, nc) = data.dim();
    assert_eq!(correlated.len(), nt, "correlated noise length must equal nt");
    assert_eq!(gains.len(), nc, "gain vector length must equal nc");

    // Same for every channel
    let power: f64 = correlated.iter().map(|c| c * c).sum();
    if power <= 0.0 || power.is_nan() {
        return 0;
    }

    for (mut channel, g) in data.axis_iter_mut(Axis(1)).zip(gains.iter_mut()) {
        let mut sum = 0.0;
        Zip::from(&channel)
            .and(&correlated)
            .for_each(|&x, &c| sum += c * x.to_f64());

        let increment = sum / power;

        Zip::from(&mut channel)
            .and(&correlated)
            .for_each(|x, &c| *x = T::from_f64(x.to_f64() - increment * c));

        *g += increment;
    }

    nc
}
