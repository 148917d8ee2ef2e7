//! Filtering orders, shallow and nested.

use super::DEFAULT_REPEAT;
use crate::data::SampleData;
use crate::scenario::{Candidate, Scenario};
use crate::value::{consume, Value};
use itertools::Itertools;
use rayon::prelude::*;
use std::hint::black_box;
use std::sync::Arc;

/// Keep orders with more than five items.
pub fn flat(data: &Arc<SampleData>) -> Scenario {
    Scenario::new("Filtering values in arrays", DEFAULT_REPEAT)
        .consumer(|value| {
            black_box(consume(value, &[]));
        })
        .group(
            "std",
            vec![
                Candidate::named("for", {
                    let data = Arc::clone(data);
                    move || {
                        let mut kept = Vec::new();
                        for order in &data.orders {
                            if order.items.len() > 5 {
                                kept.push(Value::from(order));
                            }
                        }
                        Ok(Value::Seq(kept))
                    }
                }),
                Candidate::named("iterator", {
                    let data = Arc::clone(data);
                    move || {
                        Ok(data
                            .orders
                            .iter()
                            .filter(|o| o.items.len() > 5)
                            .map(Value::from)
                            .collect())
                    }
                }),
            ],
        )
        .group(
            "itertools",
            vec![Candidate::new({
                let data = Arc::clone(data);
                move || {
                    let kept = data
                        .orders
                        .iter()
                        .filter(|o| o.items.len() > 5)
                        .map(Value::from)
                        .collect_vec();
                    Ok(Value::Seq(kept))
                }
            })],
        )
        .group(
            "rayon",
            vec![Candidate::new({
                let data = Arc::clone(data);
                move || {
                    let kept: Vec<Value> = data
                        .orders
                        .par_iter()
                        .filter(|o| o.items.len() > 5)
                        .map(Value::from)
                        .collect();
                    Ok(Value::Seq(kept))
                }
            })],
        )
}

/// Drop items with quantity five or less, then drop orders left empty. Kept
/// orders shrink to `{id, items}`.
pub fn deep(data: &Arc<SampleData>) -> Scenario {
    Scenario::new("Filtering values in arrays deep", DEFAULT_REPEAT)
        .consumer(|value| {
            black_box(consume(value, &["items"]));
        })
        .group(
            "std",
            vec![
                Candidate::named("for", {
                    let data = Arc::clone(data);
                    move || {
                        let mut kept = Vec::new();
                        for order in &data.orders {
                            let mut items = Vec::new();
                            for item in &order.items {
                                if item.quantity > 5 {
                                    items.push(Value::from(item));
                                }
                            }
                            if !items.is_empty() {
                                kept.push(Value::map([
                                    ("id", Value::Int(order.id)),
                                    ("items", Value::Seq(items)),
                                ]));
                            }
                        }
                        Ok(Value::Seq(kept))
                    }
                }),
                Candidate::named("iterator", {
                    let data = Arc::clone(data);
                    move || {
                        Ok(data
                            .orders
                            .iter()
                            .filter_map(|order| {
                                let items: Vec<Value> = order
                                    .items
                                    .iter()
                                    .filter(|item| item.quantity > 5)
                                    .map(Value::from)
                                    .collect();
                                if items.is_empty() {
                                    None
                                } else {
                                    Some(Value::map([
                                        ("id", Value::Int(order.id)),
                                        ("items", Value::Seq(items)),
                                    ]))
                                }
                            })
                            .collect())
                    }
                }),
            ],
        )
        .group(
            "itertools",
            vec![Candidate::new({
                let data = Arc::clone(data);
                move || {
                    let kept = data
                        .orders
                        .iter()
                        .map(|order| {
                            (
                                order.id,
                                order
                                    .items
                                    .iter()
                                    .filter(|item| item.quantity > 5)
                                    .map(Value::from)
                                    .collect_vec(),
                            )
                        })
                        .filter(|(_, items)| !items.is_empty())
                        .map(|(id, items)| {
                            Value::map([("id", Value::Int(id)), ("items", Value::Seq(items))])
                        })
                        .collect_vec();
                    Ok(Value::Seq(kept))
                }
            })],
        )
        .group(
            "rayon",
            vec![Candidate::new({
                let data = Arc::clone(data);
                move || {
                    let kept: Vec<Value> = data
                        .orders
                        .par_iter()
                        .filter_map(|order| {
                            let items: Vec<Value> = order
                                .items
                                .iter()
                                .filter(|item| item.quantity > 5)
                                .map(Value::from)
                                .collect();
                            if items.is_empty() {
                                None
                            } else {
                                Some(Value::map([
                                    ("id", Value::Int(order.id)),
                                    ("items", Value::Seq(items)),
                                ]))
                            }
                        })
                        .collect();
                    Ok(Value::Seq(kept))
                }
            })],
        )
}
