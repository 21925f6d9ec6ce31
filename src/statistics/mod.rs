//! Statistical building blocks for the resampling engines.
//!
//! - Descriptive statistics and Type-7 percentiles
//! - Standard normal CDF and its inverse
//! - Leave-one-out jackknife and the BCa acceleration coefficient
//! - Resampling with replacement and deterministic seed derivation

mod descriptive;
mod jackknife;
mod normal;
mod resample;

pub use descriptive::{mean, median, percentile, percentile_sorted, stdev};
pub use jackknife::{acceleration, jackknife_values};
pub use normal::{inverse_normal_cdf, normal_cdf};
pub use resample::{resample_into, resample_with_replacement, splitmix64};
