//! Error types for resampling computations.

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type covering every failure mode of the resampling engines.
///
/// Structural errors (bad arguments, mismatched group lengths) abort a run
/// before any resampling starts. Per-replicate statistic failures are never
/// surfaced through this type; they are counted in the result structs
/// (`failed` / `failed_inner`) and the run continues.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// An argument was outside its documented domain.
    InvalidArgument(String),
    /// The input sample is too small for the requested computation.
    InsufficientData {
        /// Minimum number of observations required.
        required: usize,
        /// Number of observations actually supplied.
        actual: usize,
    },
    /// The replicate set has zero variance, so scale-based intervals
    /// (normal, double bootstrap) are degenerate.
    InsufficientVariance,
    /// The BCa acceleration coefficient could not be computed
    /// (all jackknife values identical, or a leave-one-out evaluation
    /// produced a non-finite value).
    AccelerationUnavailable,
    /// A paired test was requested for groups of different lengths.
    AsymmetricGroups {
        /// Length of the first group.
        len_a: usize,
        /// Length of the second group.
        len_b: usize,
    },
    /// The statistic returned a non-finite value on the original data.
    StatisticFailed,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            Error::InsufficientData { required, actual } => {
                write!(
                    f,
                    "insufficient data: need at least {} observations, got {}",
                    required, actual
                )
            }
            Error::InsufficientVariance => {
                write!(f, "replicate set has zero variance")
            }
            Error::AccelerationUnavailable => {
                write!(f, "acceleration coefficient unavailable (BCa disabled)")
            }
            Error::AsymmetricGroups { len_a, len_b } => {
                write!(
                    f,
                    "paired test requires equally sized groups, got {} and {}",
                    len_a, len_b
                )
            }
            Error::StatisticFailed => {
                write!(f, "statistic returned a non-finite value on the original data")
            }
        }
    }
}

impl std::error::Error for Error {}
