//! Repetition-count partitioning across logical workers.
//!
//! Both engines fan their Monte-Carlo repetitions out as one task per
//! [`WorkSlice`]. A slice carries everything a worker needs to run
//! independently: its index (which also selects its RNG stream) and its
//! private share of the repetition count. Results are merged back in
//! worker-index order, so aggregation is deterministic no matter how the
//! slices are scheduled.

use crate::statistics::splitmix64;

/// One worker's share of a repetition budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkSlice {
    /// Worker index, `0..workers`. Also the counter for seed derivation.
    pub worker: usize,
    /// Number of repetitions this worker runs.
    pub reps: usize,
}

/// Split `total` repetitions across `workers` slices.
///
/// Every worker receives `ceil(total / workers)` repetitions, so the
/// realized total `workers * ceil(total / workers)` may exceed the request
/// by up to `workers - 1`. Callers must divide by the realized total (the
/// sum of actual partial counts), never by the nominal request.
///
/// # Panics
///
/// Panics if `workers` is zero; configs validate that before work starts.
pub fn partition_reps(total: usize, workers: usize) -> Vec<WorkSlice> {
    assert!(workers > 0, "worker count must be at least 1");
    let per_worker = total.div_ceil(workers);
    (0..workers)
        .map(|worker| WorkSlice {
            worker,
            reps: per_worker,
        })
        .collect()
}

/// Derive the RNG seed for one worker from the run's base seed.
///
/// Uses SplitMix64 with the worker index as counter, so a caller-supplied
/// seed maps to the same family of independent per-worker streams on every
/// run, regardless of thread scheduling or the `parallel` feature.
#[inline]
pub fn worker_seed(base_seed: u64, worker: usize) -> u64 {
    splitmix64(base_seed, worker as u64)
}
