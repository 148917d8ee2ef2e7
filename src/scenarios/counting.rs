//! Counting orders that satisfy a predicate.

use super::DEFAULT_REPEAT;
use crate::data::SampleData;
use crate::scenario::{Candidate, Scenario};
use crate::value::Value;
use itertools::Itertools;
use rayon::prelude::*;
use std::sync::Arc;

/// Count orders with more than five items.
pub fn flat(data: &Arc<SampleData>) -> Scenario {
    Scenario::new("Counting values in arrays", DEFAULT_REPEAT)
        .group(
            "std",
            vec![
                Candidate::named("for", {
                    let data = Arc::clone(data);
                    move || {
                        let mut big_orders = 0i64;
                        for order in &data.orders {
                            if order.items.len() > 5 {
                                big_orders += 1;
                            }
                        }
                        Ok(Value::Int(big_orders))
                    }
                }),
                Candidate::named("iterator", {
                    let data = Arc::clone(data);
                    move || {
                        let big_orders = data.orders.iter().filter(|o| o.items.len() > 5).count();
                        Ok(Value::Int(big_orders as i64))
                    }
                }),
            ],
        )
        .group(
            "itertools",
            vec![Candidate::new({
                let data = Arc::clone(data);
                move || {
                    let counts = data.orders.iter().counts_by(|o| o.items.len() > 5);
                    let big_orders = counts.get(&true).copied().unwrap_or(0);
                    Ok(Value::Int(big_orders as i64))
                }
            })],
        )
        .group(
            "rayon",
            vec![Candidate::new({
                let data = Arc::clone(data);
                move || {
                    let big_orders = data.orders.par_iter().filter(|o| o.items.len() > 5).count();
                    Ok(Value::Int(big_orders as i64))
                }
            })],
        )
}

/// Count orders with more than two items of quantity greater than five.
pub fn deep(data: &Arc<SampleData>) -> Scenario {
    Scenario::new("Counting values in arrays deep", DEFAULT_REPEAT)
        .group(
            "std",
            vec![
                Candidate::named("for", {
                    let data = Arc::clone(data);
                    move || {
                        let mut busy_orders = 0i64;
                        for order in &data.orders {
                            let mut big_items = 0usize;
                            for item in &order.items {
                                if item.quantity > 5 {
                                    big_items += 1;
                                }
                            }
                            if big_items > 2 {
                                busy_orders += 1;
                            }
                        }
                        Ok(Value::Int(busy_orders))
                    }
                }),
                Candidate::named("iterator", {
                    let data = Arc::clone(data);
                    move || {
                        let busy_orders = data
                            .orders
                            .iter()
                            .filter(|o| o.items.iter().filter(|item| item.quantity > 5).count() > 2)
                            .count();
                        Ok(Value::Int(busy_orders as i64))
                    }
                }),
            ],
        )
        .group(
            "itertools",
            vec![Candidate::new({
                let data = Arc::clone(data);
                move || {
                    let counts = data.orders.iter().counts_by(|o| {
                        o.items.iter().filter(|item| item.quantity > 5).count() > 2
                    });
                    let busy_orders = counts.get(&true).copied().unwrap_or(0);
                    Ok(Value::Int(busy_orders as i64))
                }
            })],
        )
        .group(
            "rayon",
            vec![Candidate::new({
                let data = Arc::clone(data);
                move || {
                    let busy_orders = data
                        .orders
                        .par_iter()
                        .filter(|o| o.items.iter().filter(|item| item.quantity > 5).count() > 2)
                        .count();
                    Ok(Value::Int(busy_orders as i64))
                }
            })],
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::run_candidate;
    use crate::validate::validate;

    fn agree(scenario: &Scenario) -> Value {
        let results: Vec<_> = scenario
            .labelled()
            .into_iter()
            .map(|(label, candidate)| (label, run_candidate(1, None, candidate.operation())))
            .collect();
        assert!(validate(&results).is_ok());
        results[0].1.value.clone().unwrap()
    }

    #[test]
    fn test_flat_count_matches_a_direct_recount() {
        let data = Arc::new(SampleData::generate(80).unwrap());
        let counted = agree(&flat(&data)).as_int().unwrap();
        let expected = data.orders.iter().filter(|o| o.items.len() > 5).count() as i64;
        assert_eq!(counted, expected);
    }

    #[test]
    fn test_deep_count_matches_a_direct_recount() {
        let data = Arc::new(SampleData::generate(80).unwrap());
        let counted = agree(&deep(&data)).as_int().unwrap();
        let expected = data
            .orders
            .iter()
            .filter(|o| o.items.iter().filter(|item| item.quantity > 5).count() > 2)
            .count() as i64;
        assert_eq!(counted, expected);
    }
}
