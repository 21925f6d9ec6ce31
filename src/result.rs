//! Result types returned by the resampling engines.
//!
//! The engines only ever return structured numbers; formatting and
//! rounding live in [`crate::output`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A two-sided confidence interval.
///
/// `lower <= upper` always holds for intervals produced by this crate;
/// containment of the point estimate is *not* guaranteed, since bootstrap
/// intervals can be asymmetric or shifted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Lower confidence bound.
    pub lower: f64,
    /// Upper confidence bound.
    pub upper: f64,
}

impl Interval {
    /// Width of the interval.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether `value` lies inside the interval (inclusive).
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Complete result of a bootstrap confidence-interval computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapResult {
    /// Point estimate: the statistic on the original data.
    pub theta_hat: f64,

    /// Size of the original sample.
    pub n: usize,

    /// Realized number of first-level replicates attempted. Ceiling
    /// partitioning across workers may push this slightly above the
    /// requested `reps1`.
    pub reps1: usize,

    /// Second-level replicates per first-level sample (0 when the double
    /// bootstrap was not requested).
    pub reps2: usize,

    /// Tail probability the intervals were computed for.
    pub alpha: f64,

    /// Number of replicates that actually entered the replicate set.
    /// Less than `reps1` when statistic evaluations failed.
    pub replicates_used: usize,

    /// Mean of the replicate set.
    pub mean_boot: f64,

    /// Bootstrap standard error: sample standard deviation of the
    /// replicate set. Always non-negative.
    pub se_boot: f64,

    /// Bootstrap bias estimate, `mean_boot - theta_hat`.
    pub bias: f64,

    /// Normal-approximation interval `theta_hat ± z * se_boot`.
    pub normal: Interval,

    /// Percentile interval from the sorted replicate set.
    pub percentile: Interval,

    /// Bias-corrected percentile interval.
    pub bc: Interval,

    /// Bias-corrected-and-accelerated interval. `None` when the
    /// acceleration coefficient was unavailable; all other intervals are
    /// still reported in that case.
    pub bca: Option<Interval>,

    /// Double (iterated) bootstrap interval. `None` when `reps2 == 0` or
    /// when every t-value was degenerate.
    pub double: Option<Interval>,

    /// First-level statistic evaluations that returned a non-finite value
    /// and were skipped.
    pub failed: u64,

    /// Second-level failures: non-finite inner evaluations plus first-level
    /// replicates whose inner replicate set was too degenerate for a
    /// t-value.
    pub failed_inner: u64,

    /// Wall-clock duration of the computation.
    pub runtime: Duration,
}

/// Complete result of a permutation hypothesis test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermutationResult {
    /// Statistic on the first group.
    pub theta1: f64,

    /// Statistic on the second group.
    pub theta2: f64,

    /// Observed test statistic: `theta1 - theta2` for unpaired tests, the
    /// statistic on the paired differences for paired tests.
    pub empdiff: f64,

    /// Achieved significance level, `extreme_count / total_count`.
    pub p_value: f64,

    /// Number of relabelings at least as extreme as the observed
    /// statistic.
    pub extreme_count: u64,

    /// Relabelings actually evaluated: the full combinatorial count in
    /// exhaustive mode, the realized (possibly over-produced) repetition
    /// count in random mode. Always positive.
    pub total_count: u64,

    /// Whether every relabeling was enumerated rather than sampled.
    pub exhaustive: bool,

    /// Whether the test treated the groups as paired observations.
    pub paired: bool,

    /// Whether extremeness was judged one-sided.
    pub onesided: bool,

    /// Wall-clock duration of the computation.
    pub runtime: Duration,
}
