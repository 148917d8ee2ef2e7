//! querybench compares renditions of the same collection-processing task
//! written with hand-rolled loops, std iterator chains, itertools and rayon.
//!
//! Each scenario runs every candidate a fixed number of times under a single
//! wall-clock measurement, cross-checks that all successful candidates
//! produced structurally identical results, and prints a comparison table
//! ranked against the fastest candidate.

pub mod data;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod scenarios;
pub mod validate;
pub mod value;

use thiserror::Error;

pub use data::SampleData;
pub use scenario::{Candidate, ConsoleProgress, Progress, Scenario, SilentProgress};
pub use value::Value;

pub type HarnessResult<T> = Result<T, HarnessError>;

/// Errors that abort the whole run.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("dataset size {size} is below the minimum of {min}")]
    InvalidInput { size: usize, min: usize },

    #[error("results from '{left}' and '{right}' do not match")]
    ValidationMismatch { left: String, right: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures contained to a single candidate row of the report.
#[derive(Debug, Error)]
pub enum CandidateError {
    #[error("Not implemented")]
    Unimplemented,

    #[error("{0}")]
    Failed(String),
}

/// A candidate operation. Must return a fully materialized value; nothing may
/// be deferred past the closure's return.
pub type CandidateFn = dyn Fn() -> Result<Value, CandidateError>;

/// Optional per-iteration consumer used to traverse a candidate's result.
pub type ConsumerFn = dyn Fn(&Value);

/// Outcome of timing one candidate.
#[derive(Debug, Clone)]
pub struct CandidateResult {
    pub ok: bool,
    /// Retained value from the extra final invocation, `None` on failure.
    pub value: Option<Value>,
    pub message: String,
    /// Amortized wall-clock seconds per timed invocation.
    pub secs: f64,
}
