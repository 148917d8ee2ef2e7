//! Executes one candidate under a single wall-clock measurement.

use crate::{CandidateError, CandidateFn, CandidateResult, ConsumerFn};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

/// Invoke `op` `repeat` times (passing each result to `consumer` when one is
/// given), then once more to retain a value for cross-validation. All
/// `repeat + 1` invocations run inside one timing window; the reported seconds
/// are the total divided by `repeat`. A `repeat` of zero is treated as one.
///
/// A candidate that returns an error or panics yields a failed result carrying
/// the error text; the failure does not propagate to the caller.
pub fn run_candidate(
    repeat: u32,
    consumer: Option<&ConsumerFn>,
    op: &CandidateFn,
) -> CandidateResult {
    let started = Instant::now();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        for _ in 0..repeat {
            let value = op()?;
            if let Some(consume) = consumer {
                consume(&value);
            }
        }
        op()
    }))
    .unwrap_or_else(|payload| Err(CandidateError::Failed(panic_message(payload))));
    let secs = started.elapsed().as_secs_f64() / f64::from(repeat.max(1));

    match outcome {
        Ok(value) => CandidateResult {
            ok: true,
            value: Some(value),
            message: String::from("Success"),
            secs,
        },
        Err(err) => CandidateResult {
            ok: false,
            value: None,
            message: err.to_string(),
            secs,
        },
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        String::from("candidate panicked")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_invokes_repeat_plus_one_times() {
        let calls = Rc::new(Cell::new(0u32));
        let counted = Rc::clone(&calls);
        let result = run_candidate(5, None, &move || {
            counted.set(counted.get() + 1);
            Ok(Value::Int(1))
        });
        assert_eq!(calls.get(), 6);
        assert!(result.ok);
        assert_eq!(result.message, "Success");
        assert_eq!(result.value, Some(Value::Int(1)));
        assert!(result.secs >= 0.0);
    }

    #[test]
    fn test_consumer_sees_each_timed_iteration() {
        let seen = Rc::new(Cell::new(0u32));
        let observed = Rc::clone(&seen);
        let consumer = move |_: &Value| observed.set(observed.get() + 1);
        let result = run_candidate(4, Some(&consumer), &|| Ok(Value::Int(9)));
        // The retained final invocation is not consumed.
        assert_eq!(seen.get(), 4);
        assert!(result.ok);
    }

    #[test]
    fn test_error_stops_the_loop() {
        let calls = Rc::new(Cell::new(0u32));
        let counted = Rc::clone(&calls);
        let result = run_candidate(10, None, &move || {
            counted.set(counted.get() + 1);
            Err(CandidateError::Unimplemented)
        });
        assert_eq!(calls.get(), 1);
        assert!(!result.ok);
        assert_eq!(result.message, "Not implemented");
        assert_eq!(result.value, None);
    }

    #[test]
    fn test_panic_is_contained() {
        let result = run_candidate(3, None, &|| panic!("boom at iteration"));
        assert!(!result.ok);
        assert!(result.message.contains("boom at iteration"));
        assert_eq!(result.value, None);
    }

    #[test]
    fn test_zero_repeat_is_clamped() {
        let calls = Rc::new(Cell::new(0u32));
        let counted = Rc::clone(&calls);
        let result = run_candidate(0, None, &move || {
            counted.set(counted.get() + 1);
            Ok(Value::Null)
        });
        assert_eq!(calls.get(), 1);
        assert!(result.secs.is_finite());
    }
}
