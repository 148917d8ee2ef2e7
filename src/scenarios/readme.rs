//! The multi-stage pipeline from the project readme: group in-stock products
//! under their categories, rank products by quantity, order categories by
//! name.

use crate::data::{Product, SampleData};
use crate::scenario::{Candidate, Scenario};
use crate::value::{consume, Value};
use itertools::Itertools;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hint::black_box;
use std::sync::Arc;

/// For every category, in name order, emit `{name, products}` where the
/// products are those with positive quantity, sorted by quantity descending
/// then name ascending. Categories without stock keep an empty product list.
pub fn categories_report(data: &Arc<SampleData>) -> Scenario {
    Scenario::new("Process data from ReadMe example", 5)
        .consumer(|value| {
            black_box(consume(value, &["products"]));
        })
        .group(
            "std",
            vec![
                Candidate::named("for", {
                    let data = Arc::clone(data);
                    move || {
                        let mut by_category: HashMap<i64, Vec<&Product>> = HashMap::new();
                        for product in &data.products {
                            if product.quantity > 0 {
                                by_category.entry(product.category_id).or_default().push(product);
                            }
                        }
                        for bucket in by_category.values_mut() {
                            bucket.sort_by(|a, b| rank(a, b));
                        }
                        let mut categories: Vec<_> = data.categories.iter().collect();
                        categories.sort_by(|a, b| a.name.cmp(&b.name));

                        let mut report = Vec::with_capacity(categories.len());
                        for category in categories {
                            let products = match by_category.get(&category.id) {
                                Some(bucket) => {
                                    bucket.iter().map(|p| Value::from(*p)).collect()
                                }
                                None => Vec::new(),
                            };
                            report.push(Value::map([
                                ("name", Value::from(category.name.clone())),
                                ("products", Value::Seq(products)),
                            ]));
                        }
                        Ok(Value::Seq(report))
                    }
                }),
                Candidate::named("iterator", {
                    let data = Arc::clone(data);
                    move || {
                        let by_category = data
                            .products
                            .iter()
                            .filter(|p| p.quantity > 0)
                            .fold(HashMap::<i64, Vec<&Product>>::new(), |mut acc, p| {
                                acc.entry(p.category_id).or_default().push(p);
                                acc
                            });
                        let mut categories: Vec<_> = data.categories.iter().collect();
                        categories.sort_by(|a, b| a.name.cmp(&b.name));

                        Ok(categories
                            .into_iter()
                            .map(|category| {
                                let products = by_category
                                    .get(&category.id)
                                    .map(|bucket| {
                                        let mut bucket = bucket.clone();
                                        bucket.sort_by(|a, b| rank(a, b));
                                        bucket.iter().map(|p| Value::from(*p)).collect()
                                    })
                                    .unwrap_or_default();
                                Value::map([
                                    ("name", Value::from(category.name.clone())),
                                    ("products", Value::Seq(products)),
                                ])
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
                    let by_category = data
                        .products
                        .iter()
                        .filter(|p| p.quantity > 0)
                        .map(|p| (p.category_id, p))
                        .into_group_map();
                    Ok(data
                        .categories
                        .iter()
                        .sorted_by(|a, b| a.name.cmp(&b.name))
                        .map(|category| {
                            let products = by_category
                                .get(&category.id)
                                .map(|bucket| {
                                    bucket
                                        .iter()
                                        .sorted_by(|a, b| rank(a, b))
                                        .map(|p| Value::from(*p))
                                        .collect()
                                })
                                .unwrap_or_default();
                            Value::map([
                                ("name", Value::from(category.name.clone())),
                                ("products", Value::Seq(products)),
                            ])
                        })
                        .collect())
                }
            })],
        )
        .group(
            "rayon",
            vec![Candidate::new({
                let data = Arc::clone(data);
                move || {
                    let mut by_category: HashMap<i64, Vec<&Product>> = HashMap::new();
                    for product in &data.products {
                        if product.quantity > 0 {
                            by_category.entry(product.category_id).or_default().push(product);
                        }
                    }
                    let mut categories: Vec<_> = data.categories.iter().collect();
                    categories.sort_by(|a, b| a.name.cmp(&b.name));

                    let report: Vec<Value> = categories
                        .par_iter()
                        .map(|category| {
                            let products = by_category
                                .get(&category.id)
                                .map(|bucket| {
                                    let mut bucket = bucket.clone();
                                    bucket.sort_by(|a, b| rank(a, b));
                                    bucket.iter().map(|p| Value::from(*p)).collect()
                                })
                                .unwrap_or_default();
                            Value::map([
                                ("name", Value::from(category.name.clone())),
                                ("products", Value::Seq(products)),
                            ])
                        })
                        .collect();
                    Ok(Value::Seq(report))
                }
            })],
        )
}

fn rank(a: &Product, b: &Product) -> Ordering {
    b.quantity.cmp(&a.quantity).then_with(|| a.name.cmp(&b.name))
}
