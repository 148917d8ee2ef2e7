//! Grouping floats under string keys, then summing every bucket.

use super::DEFAULT_REPEAT;
use crate::scenario::{Candidate, Scenario};
use crate::value::Value;
use itertools::Itertools;
use std::collections::BTreeMap;

/// Group i in `0..size` under the key `tan(i % 100)` with the value
/// `sin(i)` for odd i and `cos(i)` for even i, then sum all buckets in key
/// order. Every candidate folds the same values in the same order, so the
/// sums are bit-identical.
pub fn lookup_sum(size: usize) -> Scenario {
    let bound = size as i64;
    Scenario::new(
        format!("Generating lookup of {size} floats, calculate sum"),
        DEFAULT_REPEAT,
    )
    .group(
        "std",
        vec![
            Candidate::named("for", move || {
                let mut lookup: BTreeMap<String, Vec<f64>> = BTreeMap::new();
                for i in 0..bound {
                    lookup.entry(bucket_key(i)).or_default().push(bucket_value(i));
                }
                let mut sum = 0.0;
                for bucket in lookup.values() {
                    for value in bucket {
                        sum += value;
                    }
                }
                Ok(Value::Float(sum))
            }),
            Candidate::named("iterator", move || {
                let lookup = (0..bound).fold(
                    BTreeMap::<String, Vec<f64>>::new(),
                    |mut lookup, i| {
                        lookup.entry(bucket_key(i)).or_default().push(bucket_value(i));
                        lookup
                    },
                );
                Ok(Value::Float(lookup.values().flatten().sum()))
            }),
        ],
    )
    .group(
        "itertools",
        vec![Candidate::new(move || {
            let lookup = (0..bound)
                .map(|i| (bucket_key(i), bucket_value(i)))
                .into_group_map();
            let sum: f64 = lookup
                .into_iter()
                .sorted_by(|a, b| a.0.cmp(&b.0))
                .flat_map(|(_, bucket)| bucket)
                .sum();
            Ok(Value::Float(sum))
        })],
    )
    // Parallel folding would change the accumulation order per run.
    .group("rayon", vec![Candidate::unimplemented()])
}

fn bucket_key(i: i64) -> String {
    format!("{}", ((i % 100) as f64).tan())
}

fn bucket_value(i: i64) -> f64 {
    if i % 2 == 1 {
        (i as f64).sin()
    } else {
        (i as f64).cos()
    }
}
