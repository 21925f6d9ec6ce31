//! Basic descriptive statistics: mean, standard deviation, percentiles.
//!
//! The percentile estimator is the Type-7 (R-7, Excel-style) linear
//! interpolation order statistic, which is also what the bootstrap engine
//! uses for every interval lookup.

use crate::error::{Error, Result};

/// Arithmetic mean of a sample.
///
/// # Errors
///
/// Returns [`Error::InsufficientData`] for an empty input.
pub fn mean(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(Error::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sample standard deviation (n-1 denominator).
///
/// # Errors
///
/// Returns [`Error::InsufficientData`] for fewer than 2 observations.
pub fn stdev(data: &[f64]) -> Result<f64> {
    if data.len() < 2 {
        return Err(Error::InsufficientData {
            required: 2,
            actual: data.len(),
        });
    }
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|x| (x - m) * (x - m)).sum();
    Ok((ss / (data.len() - 1) as f64).sqrt())
}

/// Median of a sample, defined as the 50th percentile.
///
/// # Errors
///
/// Returns [`Error::InsufficientData`] for an empty input.
pub fn median(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(Error::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    percentile(data, 50.0)
}

/// Percentile of a sample on the conventional 0-100 scale.
///
/// Sorts a copy of the input, then delegates to [`percentile_sorted`].
/// Use the sorted variant directly when computing many percentiles of the
/// same data, like the bootstrap engine does after freezing its replicate
/// set.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `percent` is outside `[0, 100]`
/// or the input is empty.
pub fn percentile(data: &[f64], percent: f64) -> Result<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    percentile_sorted(&sorted, percent)
}

/// Percentile of an already-sorted sample on the 0-100 scale.
///
/// Type-7 definition: for position `k = (n - 1) * percent / 100`, returns
/// the element at `k` when `k` is integral, otherwise interpolates linearly
/// between the neighboring order statistics.
///
/// The input must be sorted ascending; this is not verified.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `percent` is outside `[0, 100]`
/// or the input is empty.
pub fn percentile_sorted(sorted: &[f64], percent: f64) -> Result<f64> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(Error::InvalidArgument(format!(
            "percent must be in [0, 100], got {}",
            percent
        )));
    }
    if sorted.is_empty() {
        return Err(Error::InvalidArgument(
            "cannot take a percentile of an empty sample".to_string(),
        ));
    }

    let n = sorted.len();
    let position = (n - 1) as f64 * (percent / 100.0);
    let lower = position.floor() as usize;
    let frac = position - position.floor();

    if frac == 0.0 || lower + 1 >= n {
        return Ok(sorted[lower.min(n - 1)]);
    }

    // Linear interpolation weighted by fractional distance.
    Ok(sorted[lower] * (1.0 - frac) + sorted[lower + 1] * frac)
}
