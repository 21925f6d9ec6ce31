//! Bootstrap confidence-interval engine.
//!
//! Generates bootstrap replicates of a user statistic in parallel worker
//! slices and computes five interval estimators from the merged replicate
//! set: normal approximation, percentile, bias-corrected (BC),
//! bias-corrected-and-accelerated (BCa), and the double (iterated)
//! bootstrap when second-level replicates are requested.

use std::time::Instant;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::BootstrapConfig;
use crate::error::{Error, Result};
use crate::partition::{partition_reps, worker_seed, WorkSlice};
use crate::result::{BootstrapResult, Interval};
use crate::statistics::{
    acceleration, inverse_normal_cdf, mean, normal_cdf, percentile_sorted, resample_into, stdev,
};
use crate::thread_pool;

/// Degenerate replicate sets can put the share of replicates below the
/// point estimate at exactly 0 or 1, where the inverse normal CDF is
/// undefined; the share is clamped this far inside (0, 1) instead.
const SHARE_CLAMP: f64 = 1e-4;

/// Bootstrap confidence-interval computation, configured via builder
/// methods and executed with [`run`](Bootstrap::run).
///
/// # Example
///
/// ```no_run
/// use resampling::{statistics, Bootstrap};
///
/// let data = [19.0, 29.0, 29.0, 30.0, 34.0, 36.0, 39.0, 47.0, 51.0];
/// let result = Bootstrap::new()
///     .reps1(20_000)
///     .alpha(0.05)
///     .seed(42)
///     .run(|s| statistics::mean(s).unwrap_or(f64::NAN), &data)
///     .unwrap();
/// println!("95% percentile CI: [{}, {}]",
///     result.percentile.lower, result.percentile.upper);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Bootstrap {
    config: BootstrapConfig,
}

/// One worker's share of the replicate generation.
struct Partial {
    theta_stars: Vec<f64>,
    tvalues: Vec<f64>,
    failed: u64,
    failed_inner: u64,
}

impl Bootstrap {
    /// Create an engine with the default configuration
    /// (10,000 replicates, alpha 0.05, 4 workers, random seed).
    pub fn new() -> Self {
        Self {
            config: BootstrapConfig::default(),
        }
    }

    /// Create an engine from an explicit configuration.
    pub fn with_config(config: BootstrapConfig) -> Self {
        Self { config }
    }

    /// Set the number of first-level replicates.
    pub fn reps1(mut self, reps1: usize) -> Self {
        self.config.reps1 = reps1;
        self
    }

    /// Set the number of second-level replicates (enables the double
    /// bootstrap when greater than zero).
    pub fn reps2(mut self, reps2: usize) -> Self {
        self.config.reps2 = reps2;
        self
    }

    /// Set the tail probability (nominal coverage is `1 - alpha`).
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.config.alpha = alpha;
        self
    }

    /// Set the number of logical workers.
    pub fn threads(mut self, threads: usize) -> Self {
        self.config.threads = threads;
        self
    }

    /// Set a deterministic seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Access the current configuration.
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Run the bootstrap for `func` over `data`.
    ///
    /// The statistic must be pure and is invoked once per resample; a
    /// non-finite return value marks that replicate as failed (counted in
    /// the result, never propagated).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] / [`Error::InsufficientData`] for bad
    /// inputs, [`Error::StatisticFailed`] when the statistic is non-finite
    /// on the original data, and [`Error::InsufficientVariance`] when the
    /// replicate set collapses to a single value.
    pub fn run<F>(&self, func: F, data: &[f64]) -> Result<BootstrapResult>
    where
        F: Fn(&[f64]) -> f64 + Sync,
    {
        let start = Instant::now();
        let config = &self.config;
        config.validate(data.len())?;

        let theta_hat = func(data);
        if !theta_hat.is_finite() {
            return Err(Error::StatisticFailed);
        }

        let base_seed = config.seed.unwrap_or_else(rand::random);
        let slices = partition_reps(config.reps1, config.threads);
        let realized_reps1: usize = slices.iter().map(|s| s.reps).sum();

        // Fan out one task per slice; collect preserves slice order, so
        // the merge below is deterministic for a fixed seed and thread
        // count no matter how the tasks are scheduled.
        #[cfg(feature = "parallel")]
        let partials: Vec<Partial> = thread_pool::install(|| {
            slices
                .par_iter()
                .map(|slice| {
                    generate_replicates(&func, data, theta_hat, config.reps2, *slice, base_seed)
                })
                .collect()
        });

        #[cfg(not(feature = "parallel"))]
        let partials: Vec<Partial> = thread_pool::install(|| {
            slices
                .iter()
                .map(|slice| {
                    generate_replicates(&func, data, theta_hat, config.reps2, *slice, base_seed)
                })
                .collect()
        });

        let mut theta_stars = Vec::with_capacity(realized_reps1);
        let mut tvalues = Vec::new();
        let mut failed = 0u64;
        let mut failed_inner = 0u64;
        for partial in partials {
            theta_stars.extend(partial.theta_stars);
            tvalues.extend(partial.tvalues);
            failed += partial.failed;
            failed_inner += partial.failed_inner;
        }

        if theta_stars.len() < 2 {
            return Err(Error::InsufficientData {
                required: 2,
                actual: theta_stars.len(),
            });
        }

        let mean_boot = mean(&theta_stars)?;
        let se_boot = stdev(&theta_stars)?;
        if se_boot == 0.0 {
            return Err(Error::InsufficientVariance);
        }
        let bias = mean_boot - theta_hat;

        // Sort once; every following percentile lookup reads this set.
        theta_stars.sort_unstable_by(|a, b| a.total_cmp(b));

        let z = inverse_normal_cdf(1.0 - config.alpha / 2.0)?.abs();

        let normal = Interval {
            lower: theta_hat - z * se_boot,
            upper: theta_hat + z * se_boot,
        };

        let percentile = Interval {
            lower: percentile_sorted(&theta_stars, (config.alpha / 2.0) * 100.0)?,
            upper: percentile_sorted(&theta_stars, (1.0 - config.alpha / 2.0) * 100.0)?,
        };

        // Bias correction: z0 measures how far the replicate distribution
        // sits from the point estimate.
        let n_smaller = theta_stars.iter().filter(|&&t| t < theta_hat).count();
        let share_smaller =
            (n_smaller as f64 / theta_stars.len() as f64).clamp(SHARE_CLAMP, 1.0 - SHARE_CLAMP);
        let z0 = inverse_normal_cdf(share_smaller)?;

        let bc = Interval {
            lower: percentile_sorted(&theta_stars, normal_cdf(2.0 * z0 - z) * 100.0)?,
            upper: percentile_sorted(&theta_stars, normal_cdf(2.0 * z0 + z) * 100.0)?,
        };

        // BCa degrades to None when the acceleration coefficient is
        // unavailable; everything else still gets reported.
        let bca = match acceleration(&func, data) {
            Ok(a) => {
                let lower_pos = normal_cdf(z0 + (z0 - z) / (1.0 - a * (z0 - z)));
                let upper_pos = normal_cdf(z0 + (z0 + z) / (1.0 - a * (z0 + z)));
                Some(Interval {
                    lower: percentile_sorted(&theta_stars, lower_pos * 100.0)?,
                    upper: percentile_sorted(&theta_stars, upper_pos * 100.0)?,
                })
            }
            Err(Error::AccelerationUnavailable) => None,
            Err(e) => return Err(e),
        };

        let double = if config.reps2 > 0 && !tvalues.is_empty() {
            tvalues.sort_unstable_by(|a, b| a.total_cmp(b));
            let lower_t = percentile_sorted(&tvalues, (config.alpha / 2.0) * 100.0)?;
            let upper_t = percentile_sorted(&tvalues, (1.0 - config.alpha / 2.0) * 100.0)?;
            // The larger t-percentile forms the lower bound.
            Some(Interval {
                lower: theta_hat - se_boot * upper_t,
                upper: theta_hat - se_boot * lower_t,
            })
        } else {
            None
        };

        Ok(BootstrapResult {
            theta_hat,
            n: data.len(),
            reps1: realized_reps1,
            reps2: config.reps2,
            alpha: config.alpha,
            replicates_used: theta_stars.len(),
            mean_boot,
            se_boot,
            bias,
            normal,
            percentile,
            bc,
            bca,
            double,
            failed,
            failed_inner,
            runtime: start.elapsed(),
        })
    }
}

/// Generate one worker's replicates from its private RNG stream.
fn generate_replicates<F>(
    func: &F,
    data: &[f64],
    theta_hat: f64,
    reps2: usize,
    slice: WorkSlice,
    base_seed: u64,
) -> Partial
where
    F: Fn(&[f64]) -> f64,
{
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(worker_seed(base_seed, slice.worker));
    let n = data.len();
    let mut sample = vec![0.0; n];
    let mut inner_sample = vec![0.0; n];
    let mut inner_values = Vec::with_capacity(reps2);

    let mut partial = Partial {
        theta_stars: Vec::with_capacity(slice.reps),
        tvalues: Vec::new(),
        failed: 0,
        failed_inner: 0,
    };

    for _ in 0..slice.reps {
        resample_into(data, &mut rng, &mut sample);
        let theta_star = func(&sample);
        if !theta_star.is_finite() {
            partial.failed += 1;
            continue;
        }
        partial.theta_stars.push(theta_star);

        if reps2 > 0 {
            inner_values.clear();
            for _ in 0..reps2 {
                resample_into(&sample, &mut rng, &mut inner_sample);
                let inner = func(&inner_sample);
                if inner.is_finite() {
                    inner_values.push(inner);
                } else {
                    partial.failed_inner += 1;
                }
            }
            // A zero or undefined inner spread leaves no valid t-value.
            match stdev(&inner_values) {
                Ok(se) if se > 0.0 => {
                    partial.tvalues.push((theta_star - theta_hat) / se);
                }
                _ => partial.failed_inner += 1,
            }
        }
    }

    partial
}
