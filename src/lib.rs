//! # resampling
//!
//! Resampling-based statistical inference: bootstrap confidence intervals
//! and permutation hypothesis tests, parallelized across worker slices
//! with deterministic seeding.
//!
//! The bootstrap engine computes five interval estimators from one
//! replicate set (normal, percentile, bias-corrected, BCa, and the double
//! bootstrap); the permutation engine computes one p-value from either an
//! exhaustive enumeration of relabelings or a Monte-Carlo sample of them,
//! for paired and unpaired designs.
//!
//! ## Quick start
//!
//! ```no_run
//! use resampling::{bootstrap_ci, permutation_test, statistics};
//!
//! let stat = |s: &[f64]| statistics::mean(s).unwrap_or(f64::NAN);
//!
//! let data = [19.0, 29.0, 29.0, 30.0, 34.0, 36.0, 39.0, 47.0, 51.0];
//! let ci = bootstrap_ci(stat, &data, 10_000).unwrap();
//! println!("95% BCa CI: {:?}", ci.bca);
//!
//! let a = [94.0, 197.0, 16.0, 38.0, 99.0, 141.0, 23.0];
//! let b = [52.0, 104.0, 146.0, 10.0, 51.0, 30.0, 40.0, 27.0, 46.0];
//! let test = permutation_test(stat, &a, &b, 100_000).unwrap();
//! println!("p = {:.4}", test.p_value);
//! ```
//!
//! ## Statistic contract
//!
//! A statistic is any `Fn(&[f64]) -> f64 + Sync` that is pure and cheap to
//! call many times. Returning a non-finite value signals a failed
//! evaluation: on the original data that aborts the run
//! ([`Error::StatisticFailed`]), on a resample it increments the result's
//! failure counter and the replicate is skipped.
//!
//! ## Determinism
//!
//! Every repetition budget is partitioned into per-worker slices, each
//! with an RNG stream derived from the base seed via SplitMix64. A fixed
//! `seed` and `threads` pair therefore reproduces results bit for bit,
//! independent of scheduling and of the `parallel` feature.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bootstrap;
mod config;
mod error;
mod partition;
mod permutation;
mod result;
mod thread_pool;

pub mod output;
pub mod preflight;
pub mod statistics;

pub use bootstrap::Bootstrap;
pub use config::{BootstrapConfig, PermutationConfig};
pub use error::{Error, Result};
pub use partition::{partition_reps, worker_seed, WorkSlice};
pub use permutation::PermutationTest;
pub use result::{BootstrapResult, Interval, PermutationResult};

/// Convenience function: bootstrap confidence intervals with default
/// settings (`alpha = 0.05`, no double bootstrap, 4 workers, random
/// seed).
///
/// Use [`Bootstrap`] directly to configure the run.
///
/// # Errors
///
/// See [`Bootstrap::run`].
pub fn bootstrap_ci<F>(func: F, data: &[f64], reps1: usize) -> Result<BootstrapResult>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    Bootstrap::new().reps1(reps1).run(func, data)
}

/// Convenience function: unpaired two-sided permutation test with default
/// settings (4 workers, random seed). `reps = 0` selects exhaustive
/// enumeration.
///
/// Use [`PermutationTest`] directly to configure the run.
///
/// # Errors
///
/// See [`PermutationTest::run`].
pub fn permutation_test<F>(
    func: F,
    group_a: &[f64],
    group_b: &[f64],
    reps: usize,
) -> Result<PermutationResult>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    PermutationTest::new().reps(reps).run(func, group_a, group_b)
}
