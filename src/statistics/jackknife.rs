//! Leave-one-out jackknife and the BCa acceleration coefficient.

use crate::error::{Error, Result};
use crate::statistics::descriptive::mean;

/// Compute the statistic on every leave-one-out subsample.
///
/// Returns `data.len()` values; the i-th value is the statistic on `data`
/// with the observation at index `i` removed. Removal is by index, so
/// duplicate observations each get their own leave-one-out evaluation.
pub fn jackknife_values<F>(func: &F, data: &[f64]) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let n = data.len();
    let mut values = Vec::with_capacity(n);
    let mut holdout = vec![0.0; n.saturating_sub(1)];

    for i in 0..n {
        for (slot, &x) in holdout
            .iter_mut()
            .zip(data.iter().take(i).chain(data.iter().skip(i + 1)))
        {
            *slot = x;
        }
        values.push(func(&holdout));
    }
    values
}

/// BCa acceleration coefficient from jackknife values.
///
/// With jackknife values `J` and `m = mean(J)`, the coefficient is
/// `sum((m - J_i)^3) / (6 * sum((m - J_i)^2)^1.5)`.
///
/// # Errors
///
/// Returns [`Error::AccelerationUnavailable`] when fewer than 2
/// observations are given, when a leave-one-out evaluation is non-finite,
/// or when all jackknife values are identical (zero denominator). Callers
/// are expected to fall back to the BC interval.
pub fn acceleration<F>(func: &F, data: &[f64]) -> Result<f64>
where
    F: Fn(&[f64]) -> f64,
{
    if data.len() < 2 {
        return Err(Error::AccelerationUnavailable);
    }

    let jack = jackknife_values(func, data);
    if jack.iter().any(|v| !v.is_finite()) {
        return Err(Error::AccelerationUnavailable);
    }

    let m = mean(&jack).map_err(|_| Error::AccelerationUnavailable)?;
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for &j in &jack {
        let d = m - j;
        numerator += d * d * d;
        denominator += d * d;
    }

    let denominator = 6.0 * denominator.powf(1.5);
    if denominator == 0.0 {
        return Err(Error::AccelerationUnavailable);
    }
    Ok(numerator / denominator)
}
