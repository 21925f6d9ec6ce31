//! Standard normal distribution functions.
//!
//! The inverse CDF uses the Abramowitz & Stegun 26.2.23 rational
//! approximation (absolute error below ~4.5e-4), which is plenty for
//! mapping bootstrap percentile positions. The CDF itself is exact via
//! the error function.

use crate::error::{Error, Result};

// Abramowitz & Stegun 26.2.23 coefficients.
const C: [f64; 3] = [2.515517, 0.802853, 0.010328];
const D: [f64; 3] = [1.432788, 0.189269, 0.001308];

/// Lower-tail rational approximation, valid for p in (0, 0.5].
fn rational_approximation(t: f64) -> f64 {
    let numerator = (C[2] * t + C[1]) * t + C[0];
    let denominator = ((D[2] * t + D[1]) * t + D[0]) * t + 1.0;
    t - numerator / denominator
}

/// Inverse of the standard normal CDF (the quantile function).
///
/// `inverse_normal_cdf(0.975)` is approximately 1.96. Symmetry around 0.5
/// is exploited: for `p < 0.5` the result is the negated approximation at
/// `sqrt(-2 ln p)`, otherwise the approximation at `sqrt(-2 ln(1 - p))`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] unless `p` lies in the open
/// interval (0, 1).
pub fn inverse_normal_cdf(p: f64) -> Result<f64> {
    if !(p > 0.0 && p < 1.0) {
        return Err(Error::InvalidArgument(format!(
            "probability must be in the open interval (0, 1), got {}",
            p
        )));
    }
    if p < 0.5 {
        Ok(-rational_approximation((-2.0 * p.ln()).sqrt()))
    } else {
        Ok(rational_approximation((-2.0 * (1.0 - p).ln()).sqrt()))
    }
}

/// Standard normal CDF via the error function.
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + libm::erf(x / std::f64::consts::SQRT_2))
}
