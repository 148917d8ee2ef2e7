//! Plain integer iteration and materialization.

use super::DEFAULT_REPEAT;
use crate::scenario::{Candidate, Scenario};
use crate::value::{consume, Value};
use itertools::Itertools;
use rayon::prelude::*;
use std::hint::black_box;

/// Walk `0..size` and return the last integer seen.
pub fn iterating(size: usize) -> Scenario {
    let bound = size as i64;
    Scenario::new(format!("Iterating over {size} ints"), DEFAULT_REPEAT)
        .group(
            "std",
            vec![
                Candidate::named("for", move || {
                    let mut last = None;
                    for i in 0..bound {
                        last = Some(i);
                    }
                    Ok(Value::from(last))
                }),
                Candidate::named("iterator", move || Ok(Value::from((0..bound).last()))),
            ],
        )
        .group(
            "itertools",
            vec![Candidate::new(move || {
                Ok(Value::from(
                    itertools::iterate(0i64, |&i| i + 1).take(size).last(),
                ))
            })],
        )
        .group(
            "rayon",
            vec![Candidate::new(move || {
                Ok(Value::from((0..bound).into_par_iter().max()))
            })],
        )
}

/// Materialize `0..size` as a sequence.
pub fn generating(size: usize) -> Scenario {
    let bound = size as i64;
    Scenario::new(format!("Generating array of {size} integers"), DEFAULT_REPEAT)
        .consumer(|value| {
            black_box(consume(value, &[]));
        })
        .group(
            "std",
            vec![
                Candidate::named("for", move || {
                    let mut out = Vec::with_capacity(size);
                    for i in 0..bound {
                        out.push(Value::Int(i));
                    }
                    Ok(Value::Seq(out))
                }),
                Candidate::named("iterator", move || Ok((0..bound).map(Value::Int).collect())),
            ],
        )
        .group(
            "itertools",
            vec![Candidate::new(move || {
                Ok(Value::Seq(
                    itertools::iterate(0i64, |&i| i + 1)
                        .take(size)
                        .map(Value::Int)
                        .collect_vec(),
                ))
            })],
        )
        .group(
            "rayon",
            vec![Candidate::new(move || {
                let ints: Vec<Value> = (0..bound).into_par_iter().map(Value::Int).collect();
                Ok(Value::Seq(ints))
            })],
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::run_candidate;
    use crate::validate::validate;

    fn results(scenario: &Scenario) -> Vec<(String, crate::CandidateResult)> {
        scenario
            .labelled()
            .into_iter()
            .map(|(label, candidate)| (label, run_candidate(1, None, candidate.operation())))
            .collect()
    }

    #[test]
    fn test_iterating_candidates_agree_on_the_last_int() {
        let scenario = iterating(25);
        let results = results(&scenario);
        assert!(validate(&results).is_ok());
        assert_eq!(results[0].1.value.as_ref().unwrap().as_int(), Some(24));
    }

    #[test]
    fn test_generating_candidates_agree_on_the_sequence() {
        let scenario = generating(12);
        let results = results(&scenario);
        assert!(validate(&results).is_ok());
        let seq = results[0].1.value.as_ref().unwrap();
        assert_eq!(seq.len(), 12);
        assert_eq!(seq.as_seq().unwrap()[11], Value::Int(11));
    }
}
