//! Calibration-based wall-clock estimation.
//!
//! Before committing to a large run, a small timed trial of the actual
//! statistic on actual resamples is scaled up to the requested repetition
//! count. The estimate carries a safety buffer and assumes workers scale
//! linearly, so treat it as an order-of-magnitude answer.

use std::hint::black_box;
use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::config::{BootstrapConfig, PermutationConfig};
use crate::preflight::combinatorics::exhaustive_count;
use crate::statistics::{acceleration, resample_into};

/// Trial evaluations for the bootstrap calibration.
const BOOTSTRAP_TRIAL: usize = 1_000;

/// Trial evaluations for the permutation calibration.
const PERMUTATION_TRIAL: usize = 2_000;

/// Estimate the wall-clock cost of [`crate::Bootstrap::run`] with this
/// configuration.
///
/// Times `BOOTSTRAP_TRIAL` resample-plus-statistic evaluations and one
/// acceleration computation (the BCa jackknife runs once per call and is
/// not divided across workers), scales to `reps1 * max(1, reps2)` total
/// evaluations, and adds a 20% buffer.
pub fn estimate_bootstrap_runtime<F>(func: &F, data: &[f64], config: &BootstrapConfig) -> Duration
where
    F: Fn(&[f64]) -> f64,
{
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(config.seed.unwrap_or_else(rand::random));
    let mut sample = vec![0.0; data.len()];

    let start = Instant::now();
    for _ in 0..BOOTSTRAP_TRIAL {
        resample_into(data, &mut rng, &mut sample);
        black_box(func(&sample));
    }
    let per_trial = start.elapsed().as_secs_f64() / BOOTSTRAP_TRIAL as f64;

    let start = Instant::now();
    black_box(acceleration(func, data).ok());
    let acceleration_cost = start.elapsed().as_secs_f64();

    let total_evals = (config.reps1 * config.reps2.max(1)) as f64;
    let estimate = total_evals * per_trial / config.threads as f64 + acceleration_cost;
    Duration::from_secs_f64(estimate * 1.2)
}

/// Estimate the wall-clock cost of [`crate::PermutationTest::run`] with
/// this configuration for the given group sizes.
///
/// Times `PERMUTATION_TRIAL` relabeling-plus-statistic evaluations of the
/// requested kind, scales to the repetition count (or the full
/// combinatorial count for `reps = 0`), and adds a 15% buffer. Returns
/// `Duration::MAX` when the exhaustive count overflows.
pub fn estimate_permutation_runtime<F>(
    func: &F,
    group_a: &[f64],
    group_b: &[f64],
    config: &PermutationConfig,
) -> Duration
where
    F: Fn(&[f64]) -> f64,
{
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(config.seed.unwrap_or_else(rand::random));

    let per_trial = if config.paired {
        let differences: Vec<f64> = group_a
            .iter()
            .zip(group_b.iter())
            .map(|(a, b)| a - b)
            .collect();
        let mut signed = vec![0.0; differences.len()];

        let start = Instant::now();
        for _ in 0..PERMUTATION_TRIAL {
            for (slot, &d) in signed.iter_mut().zip(differences.iter()) {
                *slot = if rng.random::<bool>() { d } else { -d };
            }
            black_box(func(&signed));
        }
        start.elapsed().as_secs_f64() / PERMUTATION_TRIAL as f64
    } else {
        let mut pooled: Vec<f64> = group_a.iter().chain(group_b.iter()).copied().collect();
        let k = group_a.len();

        let start = Instant::now();
        for _ in 0..PERMUTATION_TRIAL {
            pooled.shuffle(&mut rng);
            black_box(func(&pooled[..k]) - func(&pooled[k..]));
        }
        start.elapsed().as_secs_f64() / PERMUTATION_TRIAL as f64
    };

    let total = if config.reps > 0 {
        config.reps as f64
    } else {
        match exhaustive_count(group_a.len(), group_b.len(), config.paired) {
            Some(count) => count as f64,
            None => return Duration::MAX,
        }
    };

    let estimate = total * per_trial / config.threads as f64 * 1.15;
    if estimate.is_finite() && estimate < Duration::MAX.as_secs_f64() {
        Duration::from_secs_f64(estimate)
    } else {
        Duration::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean_stat(s: &[f64]) -> f64 {
        s.iter().sum::<f64>() / s.len() as f64
    }

    #[test]
    fn bootstrap_estimate_scales_with_request() {
        let data: Vec<f64> = (0..50).map(|x| x as f64).collect();
        let small = BootstrapConfig {
            reps1: 10_000,
            seed: Some(1),
            ..BootstrapConfig::default()
        };
        let large = BootstrapConfig {
            reps1: 1_000_000,
            seed: Some(1),
            ..BootstrapConfig::default()
        };
        let t_small = estimate_bootstrap_runtime(&mean_stat, &data, &small);
        let t_large = estimate_bootstrap_runtime(&mean_stat, &data, &large);
        assert!(t_large >= t_small);
    }

    #[test]
    fn permutation_estimate_handles_overflowing_exhaustive_counts() {
        let a: Vec<f64> = (0..200).map(|x| x as f64).collect();
        let b: Vec<f64> = (0..200).map(|x| x as f64 + 1.0).collect();
        let config = PermutationConfig {
            reps: 0,
            paired: true,
            seed: Some(1),
            ..PermutationConfig::default()
        };
        // 2^200 sign assignments: the estimate saturates instead of lying.
        let t = estimate_permutation_runtime(&mean_stat, &a, &b, &config);
        assert_eq!(t, Duration::MAX);
    }
}
