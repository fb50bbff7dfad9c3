//! Correlated noise estimation.
//!
//! At every time sample the residual across all channels is regressed on
//! the channel gains, giving the increment of the common-mode signal at
//! that instant:
//!
//! ```text
//! dC[t] = Σ_c w[c]·G[c]·data[t][c] / Σ_c w[c]·G[c]²
//! ```
//!
//! The increment is removed from every channel (`data[t][c] -= G[c]·dC[t]`)
//! and accumulated into the running estimate (`C[t] += dC[t]`). Samples are
//! independent of each other; the estimate never looks across time.

use ndarray::{ArrayView1, ArrayViewMut1, ArrayViewMut2, Axis, Zip};

use crate::sample::Sample;

/// Estimates and removes one increment of the correlated noise.
///
/// When the weighted gain sum `Σ w·G²` of a sample is not strictly positive
/// (all weights or all gains zero), that sample is left untouched and
/// `correlated[t]` is not changed.
///
/// # Arguments
/// * `data` - Sample matrix of shape `(nt, nc)`, modified in place
/// * `correlated` - Running correlated noise estimate, length `nt`
/// * `gains` - Current channel gains, length `nc`
/// * `weights` - Current channel noise weights, length `nc`
///
/// # Returns
/// Number of time samples for which an increment was applied
///
/// # Panics
///
/// Panics if the vector lengths do not match the matrix shape.
pub fn update_correlated<T: Sample>(
    mut data: ArrayViewMut2<'_, T>,
    mut correlated: ArrayViewMut1<'_, f64>,
    gains: ArrayView1<'_, f64>,
    weights: ArrayView1<'_, f64>,
) -> usize {
    let (nt, nc) = data.dim();
    assert_eq!(correlated.len(), nt, "correlated noise length must equal nt");
    assert_eq!(gains.len(), nc, "gain vector length must equal nc");
    assert_eq!(weights.len(), nc, "weight vector length must equal nc");

    let mut updated = 0;

    for (mut sample, c_t) in data.axis_iter_mut(Axis(0)).zip(correlated.iter_mut()) {
        let mut sum = 0.0;
        let mut sum_w = 0.0;

        Zip::from(&sample)
            .and(&gains)
            .and(&weights)
            .for_each(|&x, &g, &w| {
                let wg = w * g;
                sum += wg * x.to_f64();
                sum_w += wg * g;
            });

        if sum_w > 0.0 {
            let increment = sum / sum_w;

            Zip::from(&mut sample).and(&gains).for_each(|x, &g| {
                *x = T::from_f64(x.to_f64() - g * increment);
            });

            *c_t += increment;
            updated += 1;
        }
    }

    updated
}
