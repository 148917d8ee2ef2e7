//! Benchmark scenario definitions.
//!
//! Each scenario poses one collection-processing task and implements it once
//! per candidate group: `std` for hand-rolled loops and plain iterator
//! chains, `itertools` for the itertools crate, `rayon` for data-parallel
//! renditions. Candidates within a scenario must produce structurally
//! identical results; a library that cannot express a task deterministically
//! contributes an unimplemented placeholder instead.

pub mod aggregating;
pub mod counting;
pub mod filtering;
pub mod ints;
pub mod joining;
pub mod lookup;
pub mod readme;
pub mod sorting;

use crate::data::SampleData;
use crate::scenario::Scenario;
use std::sync::Arc;

/// Timed invocations per candidate for the cheap scenarios.
pub const DEFAULT_REPEAT: u32 = 100;

/// All scenarios in declaration order. `size` is the dataset size and doubles
/// as the loop bound for the integer scenarios.
pub fn all(data: &Arc<SampleData>, size: usize) -> Vec<Scenario> {
    vec![
        ints::iterating(size),
        ints::generating(size),
        lookup::lookup_sum(size),
        counting::flat(data),
        counting::deep(data),
        filtering::flat(data),
        filtering::deep(data),
        sorting::strings(data),
        sorting::objects(data),
        joining::orders_with_users(data),
        aggregating::sum_avg_min_max(data),
        aggregating::custom_product(data),
        readme::categories_report(data),
    ]
}
