//! Display and reporting for resampling results.
//!
//! The engines never format anything themselves; this module turns their
//! structured results into colored terminal reports or JSON.

mod json;
mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::{
    format_bootstrap, format_exhaustive_warning, format_permutation, format_runtime_estimate,
};
