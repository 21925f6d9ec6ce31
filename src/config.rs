//! Configuration for the bootstrap and permutation engines.

use crate::error::{Error, Result};

/// Configuration options for the bootstrap engine.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Number of first-level bootstrap replicates (default: 10,000).
    /// Must be greater than zero.
    pub reps1: usize,

    /// Second-level replicates per first-level sample for the double
    /// (iterated) bootstrap (default: 0 = no double bootstrap).
    ///
    /// Total work grows multiplicatively: roughly `reps1 * reps2`
    /// statistic evaluations.
    pub reps2: usize,

    /// Tail probability; nominal interval coverage is `1 - alpha`
    /// (default: 0.05 for a 95% CI). Must lie in the open interval (0, 1).
    pub alpha: f64,

    /// Number of logical workers the repetition count is partitioned
    /// across (default: 4). Must be at least 1. Each worker draws from its
    /// own deterministically derived RNG stream; the realized replicate
    /// count is `threads * ceil(reps1 / threads)`.
    pub threads: usize,

    /// Optional seed for reproducible runs (default: `None` = a fresh
    /// random base seed per run). Per-worker streams are derived from the
    /// base seed with SplitMix64, so a fixed seed with a fixed `threads`
    /// value reproduces results exactly.
    pub seed: Option<u64>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            reps1: 10_000,
            reps2: 0,
            alpha: 0.05,
            threads: 4,
            seed: None,
        }
    }
}

impl BootstrapConfig {
    /// Validate the configuration against a sample of length `n`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a zero repetition or worker
    /// count or an out-of-range `alpha`, and [`Error::InsufficientData`]
    /// for an empty sample.
    pub fn validate(&self, n: usize) -> Result<()> {
        if n == 0 {
            return Err(Error::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        if self.reps1 == 0 {
            return Err(Error::InvalidArgument(
                "reps1 must be greater than zero".to_string(),
            ));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(Error::InvalidArgument(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        if self.threads == 0 {
            return Err(Error::InvalidArgument(
                "threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration options for the permutation engine.
#[derive(Debug, Clone)]
pub struct PermutationConfig {
    /// Number of random relabelings to draw (default: 10,000).
    ///
    /// `0` selects exhaustive enumeration: every `C(n, len_a)` split in the
    /// unpaired case, every `2^len_a` sign assignment in the paired case.
    /// Use [`crate::preflight::exhaustive_count`] to judge feasibility
    /// before requesting it.
    pub reps: usize,

    /// Treat the groups as paired observations and permute the sign of
    /// their differences (default: false). Requires equal group lengths.
    pub paired: bool,

    /// Run a one-sided test in the direction of the observed statistic
    /// (default: false = two-sided, comparing absolute values).
    pub onesided: bool,

    /// Number of logical workers for the random-sampling mode and the
    /// paired exhaustive mode (default: 4). Must be at least 1.
    pub threads: usize,

    /// Optional seed for reproducible random sampling (default: `None`).
    /// Ignored by the exhaustive modes, which consume no randomness.
    pub seed: Option<u64>,
}

impl Default for PermutationConfig {
    fn default() -> Self {
        Self {
            reps: 10_000,
            paired: false,
            onesided: false,
            threads: 4,
            seed: None,
        }
    }
}

impl PermutationConfig {
    /// Validate the configuration against the two group lengths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientData`] for an empty group,
    /// [`Error::AsymmetricGroups`] for a paired test over unequal groups,
    /// and [`Error::InvalidArgument`] for a zero worker count or a paired
    /// exhaustive request too large for sign-mask enumeration.
    pub fn validate(&self, len_a: usize, len_b: usize) -> Result<()> {
        if len_a == 0 || len_b == 0 {
            return Err(Error::InsufficientData {
                required: 1,
                actual: len_a.min(len_b),
            });
        }
        if self.threads == 0 {
            return Err(Error::InvalidArgument(
                "threads must be at least 1".to_string(),
            ));
        }
        if self.paired {
            if len_a != len_b {
                return Err(Error::AsymmetricGroups { len_a, len_b });
            }
            if self.reps == 0 && len_a >= 64 {
                return Err(Error::InvalidArgument(format!(
                    "exhaustive paired test over {} pairs would enumerate 2^{} sign \
                     assignments; use random sampling instead",
                    len_a, len_a
                )));
            }
        }
        Ok(())
    }
}
