//! Sorting strings naturally and users by compound keys.

use super::DEFAULT_REPEAT;
use crate::data::SampleData;
use crate::scenario::{Candidate, Scenario};
use crate::value::{consume, Value};
use itertools::Itertools;
use rayon::prelude::*;
use std::cmp::{Ordering, Reverse};
use std::hint::black_box;
use std::iter::Peekable;
use std::str::Chars;
use std::sync::Arc;

/// Sort the string pool descending under case-insensitive natural order.
/// Strings the comparator cannot tell apart keep their generated order, so
/// every stable sort yields the same sequence.
pub fn strings(data: &Arc<SampleData>) -> Scenario {
    Scenario::new("Sorting arrays of strings", DEFAULT_REPEAT)
        .consumer(|value| {
            black_box(consume(value, &[]));
        })
        .group(
            "std",
            vec![Candidate::new({
                let data = Arc::clone(data);
                move || {
                    let mut sorted = data.strings.clone();
                    sorted.sort_by(|a, b| natural_casecmp(b, a));
                    Ok(sorted.into_iter().map(Value::Str).collect())
                }
            })],
        )
        .group(
            "itertools",
            vec![Candidate::new({
                let data = Arc::clone(data);
                move || {
                    Ok(data
                        .strings
                        .iter()
                        .cloned()
                        .sorted_by(|a, b| natural_casecmp(b, a))
                        .map(Value::Str)
                        .collect())
                }
            })],
        )
        .group(
            "rayon",
            vec![Candidate::new({
                let data = Arc::clone(data);
                move || {
                    let mut sorted = data.strings.clone();
                    sorted.par_sort_by(|a, b| natural_casecmp(b, a));
                    Ok(sorted.into_iter().map(Value::Str).collect())
                }
            })],
        )
}

/// Sort users by rating descending, then name, then id.
pub fn objects(data: &Arc<SampleData>) -> Scenario {
    Scenario::new("Sorting arrays of objects", DEFAULT_REPEAT)
        .consumer(|value| {
            black_box(consume(value, &[]));
        })
        .group(
            "std",
            vec![
                Candidate::named("sort_by", {
                    let data = Arc::clone(data);
                    move || {
                        let mut sorted = data.users.clone();
                        sorted.sort_by(|a, b| {
                            b.rating
                                .cmp(&a.rating)
                                .then_with(|| a.name.cmp(&b.name))
                                .then_with(|| a.id.cmp(&b.id))
                        });
                        Ok(sorted.iter().map(Value::from).collect())
                    }
                }),
                Candidate::named("sort_by_cached_key", {
                    let data = Arc::clone(data);
                    move || {
                        let mut sorted = data.users.clone();
                        sorted.sort_by_cached_key(|u| (Reverse(u.rating), u.name.clone(), u.id));
                        Ok(sorted.iter().map(Value::from).collect())
                    }
                }),
            ],
        )
        .group(
            "itertools",
            vec![Candidate::new({
                let data = Arc::clone(data);
                move || {
                    Ok(data
                        .users
                        .iter()
                        .sorted_by(|a, b| {
                            b.rating
                                .cmp(&a.rating)
                                .then_with(|| a.name.cmp(&b.name))
                                .then_with(|| a.id.cmp(&b.id))
                        })
                        .map(Value::from)
                        .collect())
                }
            })],
        )
        .group(
            "rayon",
            vec![Candidate::new({
                let data = Arc::clone(data);
                move || {
                    let mut sorted = data.users.clone();
                    sorted.par_sort_by(|a, b| {
                        b.rating
                            .cmp(&a.rating)
                            .then_with(|| a.name.cmp(&b.name))
                            .then_with(|| a.id.cmp(&b.id))
                    });
                    Ok(sorted.iter().map(Value::from).collect())
                }
            })],
        )
}

/// Case-insensitive natural comparison: digit runs compare as numbers,
/// everything else compares per lowercased character.
fn natural_casecmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    let nx = take_number(&mut left);
                    let ny = take_number(&mut right);
                    match nx.cmp(&ny) {
                        Ordering::Equal => {}
                        decided => return decided,
                    }
                } else {
                    match x.to_ascii_lowercase().cmp(&y.to_ascii_lowercase()) {
                        Ordering::Equal => {
                            left.next();
                            right.next();
                        }
                        decided => return decided,
                    }
                }
            }
        }
    }
}

fn take_number(chars: &mut Peekable<Chars>) -> u128 {
    let mut n: u128 = 0;
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        n = n.saturating_mul(10).saturating_add(u128::from(c as u8 - b'0'));
        chars.next();
    }
    n
}
