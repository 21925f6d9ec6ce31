//! Permutation hypothesis-test engine.
//!
//! Tests the null of exchangeability by relabeling the data: unpaired
//! tests redistribute the pooled observations into two groups, paired
//! tests flip the signs of per-pair differences. Both support exhaustive
//! enumeration (`reps == 0`) and Monte-Carlo approximation (`reps > 0`).

use std::time::Instant;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::PermutationConfig;
use crate::error::{Error, Result};
use crate::partition::{partition_reps, worker_seed, WorkSlice};
use crate::result::PermutationResult;
use crate::thread_pool;

/// Permutation test, configured via builder methods and executed with
/// [`run`](PermutationTest::run).
///
/// # Example
///
/// ```no_run
/// use resampling::{statistics, PermutationTest};
///
/// let treatment = [94.0, 197.0, 16.0, 38.0, 99.0, 141.0, 23.0];
/// let control = [52.0, 104.0, 146.0, 10.0, 51.0, 30.0, 40.0, 27.0, 46.0];
/// let result = PermutationTest::new()
///     .reps(0) // exhaustive: all C(16, 7) splits
///     .run(|s| statistics::mean(s).unwrap_or(f64::NAN), &treatment, &control)
///     .unwrap();
/// println!("p = {}", result.p_value);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PermutationTest {
    config: PermutationConfig,
}

impl PermutationTest {
    /// Create an engine with the default configuration
    /// (10,000 random relabelings, unpaired, two-sided, 4 workers).
    pub fn new() -> Self {
        Self {
            config: PermutationConfig::default(),
        }
    }

    /// Create an engine from an explicit configuration.
    pub fn with_config(config: PermutationConfig) -> Self {
        Self { config }
    }

    /// Set the number of random relabelings; `0` selects exhaustive
    /// enumeration.
    pub fn reps(mut self, reps: usize) -> Self {
        self.config.reps = reps;
        self
    }

    /// Treat the groups as paired observations.
    pub fn paired(mut self, paired: bool) -> Self {
        self.config.paired = paired;
        self
    }

    /// Judge extremeness one-sided, in the direction of the observed
    /// statistic.
    pub fn onesided(mut self, onesided: bool) -> Self {
        self.config.onesided = onesided;
        self
    }

    /// Set the number of logical workers.
    pub fn threads(mut self, threads: usize) -> Self {
        self.config.threads = threads;
        self
    }

    /// Set a deterministic seed for the random-sampling mode.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Access the current configuration.
    pub fn config(&self) -> &PermutationConfig {
        &self.config
    }

    /// Run the test of `func(group_a)` against `func(group_b)`.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientData`] for empty groups,
    /// [`Error::AsymmetricGroups`] for a paired test over unequal groups,
    /// [`Error::InvalidArgument`] for a zero worker count or an
    /// unenumerable paired exhaustive request, and
    /// [`Error::StatisticFailed`] when the statistic is non-finite on the
    /// observed data.
    pub fn run<F>(&self, func: F, group_a: &[f64], group_b: &[f64]) -> Result<PermutationResult>
    where
        F: Fn(&[f64]) -> f64 + Sync,
    {
        let start = Instant::now();
        let config = &self.config;
        config.validate(group_a.len(), group_b.len())?;

        let theta1 = func(group_a);
        let theta2 = func(group_b);
        if !theta1.is_finite() || !theta2.is_finite() {
            return Err(Error::StatisticFailed);
        }

        let exhaustive = config.reps == 0;
        let (empdiff, extreme_count, total_count) = if config.paired {
            let differences: Vec<f64> = group_a
                .iter()
                .zip(group_b.iter())
                .map(|(a, b)| a - b)
                .collect();
            let empdiff = func(&differences);
            if !empdiff.is_finite() {
                return Err(Error::StatisticFailed);
            }
            let (extreme, total) = if exhaustive {
                paired_exhaustive(&func, &differences, empdiff, config)
            } else {
                paired_random(&func, &differences, empdiff, config)
            };
            (empdiff, extreme, total)
        } else {
            let empdiff = theta1 - theta2;
            let pooled: Vec<f64> = group_a.iter().chain(group_b.iter()).copied().collect();
            let (extreme, total) = if exhaustive {
                unpaired_exhaustive(&func, &pooled, group_a.len(), empdiff, config)
            } else {
                unpaired_random(&func, &pooled, group_a.len(), empdiff, config)
            };
            (empdiff, extreme, total)
        };

        debug_assert!(total_count > 0);
        Ok(PermutationResult {
            theta1,
            theta2,
            empdiff,
            p_value: extreme_count as f64 / total_count as f64,
            extreme_count,
            total_count,
            exhaustive,
            paired: config.paired,
            onesided: config.onesided,
            runtime: start.elapsed(),
        })
    }
}

/// Extremeness rule shared by every mode. One-sided tests only count
/// relabelings on the same side as the observed statistic; two-sided
/// tests compare absolute values. Equality counts as extreme, so the
/// observed labeling itself always contributes in exhaustive mode.
#[inline]
fn is_extreme(t: f64, empdiff: f64, onesided: bool) -> bool {
    if onesided {
        if empdiff <= 0.0 {
            t <= empdiff
        } else {
            t >= empdiff
        }
    } else {
        t.abs() >= empdiff.abs()
    }
}

/// Advance `indices` to the next lexicographic k-combination of `0..n`.
/// Returns false once the last combination has been visited.
fn next_combination(indices: &mut [usize], n: usize) -> bool {
    let k = indices.len();
    let mut i = k;
    while i > 0 {
        i -= 1;
        if indices[i] != i + n - k {
            indices[i] += 1;
            for j in (i + 1)..k {
                indices[j] = indices[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

/// Split `pooled` into the observations selected by the (ascending)
/// index combination and the complement.
fn fill_split(pooled: &[f64], indices: &[usize], selected: &mut [f64], rest: &mut [f64]) {
    let mut next = 0;
    let mut si = 0;
    let mut ri = 0;
    for (idx, &value) in pooled.iter().enumerate() {
        if next < indices.len() && indices[next] == idx {
            selected[si] = value;
            si += 1;
            next += 1;
        } else {
            rest[ri] = value;
            ri += 1;
        }
    }
}

/// Enumerate every `C(n, k)` split of the pooled sample. Each split is
/// evaluated exactly once; enumeration is sequential since the statistic
/// cost dominates only for feasibly small `n` anyway.
fn unpaired_exhaustive<F>(
    func: &F,
    pooled: &[f64],
    k: usize,
    empdiff: f64,
    config: &PermutationConfig,
) -> (u64, u64)
where
    F: Fn(&[f64]) -> f64,
{
    let n = pooled.len();
    let mut indices: Vec<usize> = (0..k).collect();
    let mut selected = vec![0.0; k];
    let mut rest = vec![0.0; n - k];

    let mut extreme = 0u64;
    let mut total = 0u64;
    loop {
        fill_split(pooled, &indices, &mut selected, &mut rest);
        let t = func(&selected) - func(&rest);
        if is_extreme(t, empdiff, config.onesided) {
            extreme += 1;
        }
        total += 1;
        if !next_combination(&mut indices, n) {
            break;
        }
    }
    (extreme, total)
}

/// Monte-Carlo unpaired mode: workers shuffle private pooled copies and
/// re-split at `k`.
fn unpaired_random<F>(
    func: &F,
    pooled: &[f64],
    k: usize,
    empdiff: f64,
    config: &PermutationConfig,
) -> (u64, u64)
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    let base_seed = config.seed.unwrap_or_else(rand::random);
    let slices = partition_reps(config.reps, config.threads);

    let job = |slice: &WorkSlice| -> (u64, u64) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(worker_seed(base_seed, slice.worker));
        let mut shuffled = pooled.to_vec();
        let mut extreme = 0u64;
        for _ in 0..slice.reps {
            shuffled.shuffle(&mut rng);
            let t = func(&shuffled[..k]) - func(&shuffled[k..]);
            if is_extreme(t, empdiff, config.onesided) {
                extreme += 1;
            }
        }
        (extreme, slice.reps as u64)
    };

    merge(fan_out(&slices, job))
}

/// Exhaustive paired mode: sign assignments are the integers
/// `0..2^n`, bit `j` flipping difference `j`. The mask range is
/// partitioned contiguously across workers.
fn paired_exhaustive<F>(
    func: &F,
    differences: &[f64],
    empdiff: f64,
    config: &PermutationConfig,
) -> (u64, u64)
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    let n = differences.len();
    // n < 64 enforced by config validation.
    let total: u64 = 1u64 << n;
    let per_worker = total.div_ceil(config.threads as u64);
    let ranges: Vec<(u64, u64)> = (0..config.threads as u64)
        .map(|w| (w * per_worker, total.min((w + 1) * per_worker)))
        .filter(|(start, end)| start < end)
        .collect();

    let job = |range: &(u64, u64)| -> (u64, u64) {
        let mut signed = vec![0.0; n];
        let mut extreme = 0u64;
        for mask in range.0..range.1 {
            for (j, slot) in signed.iter_mut().enumerate() {
                let d = differences[j];
                *slot = if (mask >> j) & 1 == 1 { -d } else { d };
            }
            if is_extreme(func(&signed), empdiff, config.onesided) {
                extreme += 1;
            }
        }
        (extreme, range.1 - range.0)
    };

    merge(fan_out(&ranges, job))
}

/// Monte-Carlo paired mode: workers draw random sign vectors.
fn paired_random<F>(
    func: &F,
    differences: &[f64],
    empdiff: f64,
    config: &PermutationConfig,
) -> (u64, u64)
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    let base_seed = config.seed.unwrap_or_else(rand::random);
    let slices = partition_reps(config.reps, config.threads);

    let job = |slice: &WorkSlice| -> (u64, u64) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(worker_seed(base_seed, slice.worker));
        let mut signed = vec![0.0; differences.len()];
        let mut extreme = 0u64;
        for _ in 0..slice.reps {
            for (slot, &d) in signed.iter_mut().zip(differences.iter()) {
                *slot = if rng.random::<bool>() { d } else { -d };
            }
            if is_extreme(func(&signed), empdiff, config.onesided) {
                extreme += 1;
            }
        }
        (extreme, slice.reps as u64)
    };

    merge(fan_out(&slices, job))
}

/// Fan a job out over work items on the shared pool; collection preserves
/// item order, so aggregation is deterministic.
fn fan_out<I, F>(items: &[I], job: F) -> Vec<(u64, u64)>
where
    I: Sync,
    F: Fn(&I) -> (u64, u64) + Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        thread_pool::install(|| items.par_iter().map(|item| job(item)).collect())
    }
    #[cfg(not(feature = "parallel"))]
    {
        thread_pool::install(|| items.iter().map(|item| job(item)).collect())
    }
}

/// Sum worker partials into `(extreme_count, total_count)`. Rates always
/// divide by this realized total, never the nominal request.
fn merge(partials: Vec<(u64, u64)>) -> (u64, u64) {
    partials
        .into_iter()
        .fold((0, 0), |(e, t), (pe, pt)| (e + pe, t + pt))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean_stat(s: &[f64]) -> f64 {
        s.iter().sum::<f64>() / s.len() as f64
    }

    #[test]
    fn next_combination_visits_all_subsets_in_order() {
        let mut indices = vec![0, 1];
        let mut seen = vec![indices.clone()];
        while next_combination(&mut indices, 4) {
            seen.push(indices.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
    }

    #[test]
    fn exhaustive_unpaired_mean_test_matches_hand_enumeration() {
        // Three against three: C(6, 3) = 20 splits. Only the observed
        // labeling and its mirror reach |diff| >= 35, so p = 2/20.
        let a = [55.0, 58.0, 60.0];
        let b = [12.0, 22.0, 34.0];
        let result = PermutationTest::new()
            .reps(0)
            .run(mean_stat, &a, &b)
            .unwrap();
        assert_eq!(result.total_count, 20);
        assert_eq!(result.extreme_count, 2);
        assert!((result.p_value - 0.1).abs() < 1e-12);
        assert!(result.exhaustive);

        // One-sided: only the observed direction counts.
        let onesided = PermutationTest::new()
            .reps(0)
            .onesided(true)
            .run(mean_stat, &a, &b)
            .unwrap();
        assert_eq!(onesided.extreme_count, 1);
        assert!((onesided.p_value - 0.05).abs() < 1e-12);
    }

    #[test]
    fn exhaustive_unpaired_is_symmetric_in_group_order() {
        let a = [55.0, 58.0, 60.0];
        let b = [12.0, 22.0, 34.0];
        let forward = PermutationTest::new()
            .reps(0)
            .run(mean_stat, &a, &b)
            .unwrap();
        let reversed = PermutationTest::new()
            .reps(0)
            .run(mean_stat, &b, &a)
            .unwrap();
        assert_eq!(forward.p_value, reversed.p_value);
        assert_eq!(forward.empdiff, -reversed.empdiff);
    }

    #[test]
    fn exhaustive_paired_mean_test_matches_hand_enumeration() {
        // Differences [1, 2, 3]: the 8 sign assignments yield mean
        // statistics {±2, ±4/3, ±2/3, 0, 0}. Two-sided |t| >= 2 keeps
        // {+2, -2}; one-sided t >= 2 keeps only the observed assignment.
        let a = [1.0, 2.0, 3.0];
        let b = [0.0, 0.0, 0.0];
        let twosided = PermutationTest::new()
            .reps(0)
            .paired(true)
            .run(mean_stat, &a, &b)
            .unwrap();
        assert_eq!(twosided.total_count, 8);
        assert_eq!(twosided.extreme_count, 2);
        assert!((twosided.p_value - 0.25).abs() < 1e-12);

        let onesided = PermutationTest::new()
            .reps(0)
            .paired(true)
            .onesided(true)
            .run(mean_stat, &a, &b)
            .unwrap();
        assert_eq!(onesided.extreme_count, 1);
        assert!((onesided.p_value - 0.125).abs() < 1e-12);
    }

    #[test]
    fn paired_test_rejects_unequal_groups() {
        let err = PermutationTest::new()
            .paired(true)
            .run(mean_stat, &[1.0, 2.0], &[1.0, 2.0, 3.0])
            .unwrap_err();
        assert_eq!(err, Error::AsymmetricGroups { len_a: 2, len_b: 3 });
    }

    #[test]
    fn random_mode_uses_realized_totals() {
        let a = [55.0, 58.0, 60.0];
        let b = [12.0, 22.0, 34.0];
        // 1000 reps over 7 workers: 7 * ceil(1000 / 7) = 1001 trials.
        let result = PermutationTest::new()
            .reps(1_000)
            .threads(7)
            .seed(5)
            .run(mean_stat, &a, &b)
            .unwrap();
        assert_eq!(result.total_count, 1_001);
        assert!(!result.exhaustive);
        assert!((0.0..=1.0).contains(&result.p_value));
    }

    #[test]
    fn fixed_seed_reproduces_random_mode_exactly() {
        let a = [6.37, 5.44, 5.58, 5.27, 5.11, 4.89, 4.70, 3.20];
        let b = [4.52, 5.69, 4.70, 3.81, 4.06, 3.22, 2.96, 3.50];
        let run = || {
            PermutationTest::new()
                .reps(5_000)
                .paired(true)
                .threads(3)
                .seed(77)
                .run(mean_stat, &a, &b)
                .unwrap()
        };
        let x = run();
        let y = run();
        assert_eq!(x.extreme_count, y.extreme_count);
        assert_eq!(x.p_value, y.p_value);
    }
}
