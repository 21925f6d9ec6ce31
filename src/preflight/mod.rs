//! Cheap ahead-of-run checks: exhaustive-size estimation and
//! calibration-based runtime projection.
//!
//! Nothing here ever blocks a run; the engines follow a warn-and-proceed
//! policy and these helpers exist so callers can decide *before* starting
//! whether a request is feasible.

mod combinatorics;
mod runtime;

pub use combinatorics::{
    binomial, exhaustive_count, exhaustive_is_practical, PAIRED_PRACTICAL_LIMIT,
    UNPAIRED_PRACTICAL_LIMIT,
};
pub use runtime::{estimate_bootstrap_runtime, estimate_permutation_runtime};
