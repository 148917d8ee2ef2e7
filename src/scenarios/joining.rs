//! Inner join of orders with their customers.

use super::DEFAULT_REPEAT;
use crate::data::{Order, SampleData, User};
use crate::scenario::{Candidate, Scenario};
use crate::value::{consume, Value};
use itertools::iproduct;
use rayon::prelude::*;
use std::collections::HashMap;
use std::hint::black_box;
use std::sync::Arc;

/// Pair every order with the user whose id matches its `customer_id`. All
/// candidates emit pairs in order-of-orders, whatever their join strategy.
pub fn orders_with_users(data: &Arc<SampleData>) -> Scenario {
    Scenario::new("Joining arrays", DEFAULT_REPEAT)
        .consumer(|value| {
            black_box(consume(value, &[]));
        })
        .group(
            "std",
            vec![
                Candidate::named("for", {
                    let data = Arc::clone(data);
                    move || {
                        let mut users_by_id = HashMap::new();
                        for user in &data.users {
                            users_by_id.insert(user.id, user);
                        }
                        let mut pairs = Vec::new();
                        for order in &data.orders {
                            if let Some(user) = users_by_id.get(&order.customer_id) {
                                pairs.push(pair(order, user));
                            }
                        }
                        Ok(Value::Seq(pairs))
                    }
                }),
                Candidate::named("iterator", {
                    let data = Arc::clone(data);
                    move || {
                        let users_by_id: HashMap<i64, &User> =
                            data.users.iter().map(|u| (u.id, u)).collect();
                        Ok(data
                            .orders
                            .iter()
                            .filter_map(|order| {
                                users_by_id
                                    .get(&order.customer_id)
                                    .map(|user| pair(order, user))
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
                // Nested-loop join over the cross product.
                move || {
                    Ok(iproduct!(data.orders.iter(), data.users.iter())
                        .filter(|(order, user)| order.customer_id == user.id)
                        .map(|(order, user)| pair(order, user))
                        .collect())
                }
            })],
        )
        .group(
            "rayon",
            vec![Candidate::new({
                let data = Arc::clone(data);
                move || {
                    let users_by_id: HashMap<i64, &User> =
                        data.users.iter().map(|u| (u.id, u)).collect();
                    let pairs: Vec<Value> = data
                        .orders
                        .par_iter()
                        .filter_map(|order| {
                            users_by_id
                                .get(&order.customer_id)
                                .map(|user| pair(order, user))
                        })
                        .collect();
                    Ok(Value::Seq(pairs))
                }
            })],
        )
}

fn pair(order: &Order, user: &User) -> Value {
    Value::map([("order", Value::from(order)), ("user", Value::from(user))])
}
