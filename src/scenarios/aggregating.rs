//! Aggregation over product quantities.

use super::DEFAULT_REPEAT;
use crate::data::SampleData;
use crate::scenario::{Candidate, Scenario};
use crate::value::Value;
use itertools::{FoldWhile, Itertools, MinMaxResult};
use rayon::prelude::*;
use std::sync::Arc;

/// Sum, average, minimum and maximum of the quantities, formatted as
/// `sum-avg-min-max`. The average divides the exact integer sum by the count,
/// so every candidate formats the same float.
pub fn sum_avg_min_max(data: &Arc<SampleData>) -> Scenario {
    Scenario::new("Aggregating arrays", DEFAULT_REPEAT)
        .group(
            "std",
            vec![
                Candidate::named("for", {
                    let data = Arc::clone(data);
                    move || {
                        let mut sum = 0i64;
                        for product in &data.products {
                            sum += product.quantity;
                        }
                        let mut total = 0i64;
                        for product in &data.products {
                            total += product.quantity;
                        }
                        let avg = total as f64 / data.products.len() as f64;
                        let mut min = i64::MAX;
                        for product in &data.products {
                            min = min.min(product.quantity);
                        }
                        let mut max = i64::MIN;
                        for product in &data.products {
                            max = max.max(product.quantity);
                        }
                        Ok(Value::from(format!("{sum}-{avg}-{min}-{max}")))
                    }
                }),
                Candidate::named("iterator", {
                    let data = Arc::clone(data);
                    move || {
                        let sum: i64 = data.products.iter().map(|p| p.quantity).sum();
                        let avg = sum as f64 / data.products.len() as f64;
                        let min = data
                            .products
                            .iter()
                            .map(|p| p.quantity)
                            .min()
                            .unwrap_or(i64::MAX);
                        let max = data
                            .products
                            .iter()
                            .map(|p| p.quantity)
                            .max()
                            .unwrap_or(i64::MIN);
                        Ok(Value::from(format!("{sum}-{avg}-{min}-{max}")))
                    }
                }),
            ],
        )
        .group(
            "itertools",
            vec![Candidate::new({
                let data = Arc::clone(data);
                move || {
                    let quantities = data.products.iter().map(|p| p.quantity).collect_vec();
                    let sum: i64 = quantities.iter().sum();
                    let avg = sum as f64 / quantities.len() as f64;
                    let (min, max) = match quantities.iter().minmax() {
                        MinMaxResult::MinMax(min, max) => (*min, *max),
                        MinMaxResult::OneElement(only) => (*only, *only),
                        MinMaxResult::NoElements => (i64::MAX, i64::MIN),
                    };
                    Ok(Value::from(format!("{sum}-{avg}-{min}-{max}")))
                }
            })],
        )
        .group(
            "rayon",
            vec![Candidate::new({
                let data = Arc::clone(data);
                move || {
                    let sum: i64 = data.products.par_iter().map(|p| p.quantity).sum();
                    let avg = sum as f64 / data.products.len() as f64;
                    let min = data
                        .products
                        .par_iter()
                        .map(|p| p.quantity)
                        .min()
                        .unwrap_or(i64::MAX);
                    let max = data
                        .products
                        .par_iter()
                        .map(|p| p.quantity)
                        .max()
                        .unwrap_or(i64::MIN);
                    Ok(Value::from(format!("{sum}-{avg}-{min}-{max}")))
                }
            })],
        )
}

/// Left-to-right product of the quantities in a float accumulator. Large
/// datasets saturate to infinity, which every candidate canonicalizes the
/// same way.
pub fn custom_product(data: &Arc<SampleData>) -> Scenario {
    Scenario::new("Aggregating arrays custom", DEFAULT_REPEAT)
        .group(
            "std",
            vec![
                Candidate::named("for", {
                    let data = Arc::clone(data);
                    move || {
                        let mut product = 1.0f64;
                        for p in &data.products {
                            product *= p.quantity as f64;
                        }
                        Ok(Value::Float(product))
                    }
                }),
                Candidate::named("iterator", {
                    let data = Arc::clone(data);
                    move || {
                        let product = data
                            .products
                            .iter()
                            .fold(1.0f64, |acc, p| acc * p.quantity as f64);
                        Ok(Value::Float(product))
                    }
                }),
            ],
        )
        .group(
            "itertools",
            vec![Candidate::new({
                let data = Arc::clone(data);
                move || {
                    let product = data
                        .products
                        .iter()
                        .map(|p| p.quantity as f64)
                        .fold_while(1.0f64, |acc, quantity| FoldWhile::Continue(acc * quantity))
                        .into_inner();
                    Ok(Value::Float(product))
                }
            })],
        )
        // Parallel reduction re-associates the multiplications.
        .group("rayon", vec![Candidate::unimplemented()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Product;
    use crate::runner::run_candidate;
    use crate::validate::validate;

    fn fixed_products(quantities: &[i64]) -> Arc<SampleData> {
        let mut data = SampleData::generate(10).unwrap();
        data.products = quantities
            .iter()
            .enumerate()
            .map(|(i, &quantity)| Product {
                id: i as i64 + 1,
                name: format!("product-{i}"),
                category_id: 1,
                quantity,
            })
            .collect();
        Arc::new(data)
    }

    #[test]
    fn test_aggregate_formats_sum_avg_min_max() {
        let data = fixed_products(&[2, 4, 6]);
        let scenario = sum_avg_min_max(&data);
        let results: Vec<_> = scenario
            .labelled()
            .into_iter()
            .map(|(label, candidate)| (label, run_candidate(1, None, candidate.operation())))
            .collect();
        assert!(validate(&results).is_ok());
        assert_eq!(
            results[0].1.value.as_ref().unwrap().as_str(),
            Some("12-4-2-6")
        );
    }

    #[test]
    fn test_aggregate_keeps_fractional_averages() {
        let data = fixed_products(&[1, 2]);
        let scenario = sum_avg_min_max(&data);
        let (_, candidate) = scenario.labelled().into_iter().next().unwrap();
        let result = run_candidate(1, None, candidate.operation());
        assert_eq!(result.value.unwrap().as_str(), Some("3-1.5-1-2"));
    }

    #[test]
    fn test_custom_product_candidates_agree() {
        let data = fixed_products(&[3, 5, 7]);
        let scenario = custom_product(&data);
        let results: Vec<_> = scenario
            .labelled()
            .into_iter()
            .map(|(label, candidate)| (label, run_candidate(1, None, candidate.operation())))
            .collect();
        assert!(validate(&results).is_ok());
        assert_eq!(
            results[0].1.value.as_ref().unwrap().as_float(),
            Some(105.0)
        );
    }

    #[test]
    fn test_custom_product_overflow_is_consistent() {
        let quantities = vec![100i64; 200];
        let data = fixed_products(&quantities);
        let scenario = custom_product(&data);
        let results: Vec<_> = scenario
            .labelled()
            .into_iter()
            .map(|(label, candidate)| (label, run_candidate(1, None, candidate.operation())))
            .collect();
        // 100^200 overflows f64; every candidate reports the same null.
        assert!(validate(&results).is_ok());
        assert_eq!(results[0].1.value.as_ref().unwrap().canonical(), "null");
    }
}
