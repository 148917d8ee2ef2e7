//! Renders the per-scenario comparison table.

use crate::CandidateResult;
use std::fmt::Write;

/// Baseline substituted when no candidate succeeded or the fastest time is
/// exactly zero, so the slowdown columns stay finite.
const ZERO_FLOOR: f64 = 0.0001;

const LABEL_WIDTH: usize = 28;

/// Format the comparison table for one scenario. The text starts with a blank
/// line and a dashed underline matching the scenario name printed above it by
/// the progress sink.
///
/// Successful rows show amortized seconds, the multiple of the fastest
/// candidate, and the relative slowdown; the fastest row shows `(100%)`.
/// Failed rows show the failure message instead of timings.
pub fn render(scenario_name: &str, results: &[(String, CandidateResult)]) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "-".repeat(scenario_name.len()));

    let fastest = results
        .iter()
        .filter(|(_, result)| result.ok)
        .map(|(_, result)| result.secs)
        .fold(f64::INFINITY, f64::min);
    let baseline = if fastest.is_finite() && fastest > 0.0 {
        fastest
    } else {
        ZERO_FLOOR
    };

    for (label, result) in results {
        if result.ok {
            let multiple = result.secs / baseline;
            let slowdown = if result.secs == baseline {
                String::from("(100%)")
            } else {
                format!("(+{:.0}%)", (multiple - 1.0) * 100.0)
            };
            let _ = writeln!(
                out,
                "  {:<width$}{:.5} sec   x{:.1} {}",
                label,
                result.secs,
                multiple,
                slowdown,
                width = LABEL_WIDTH
            );
        } else {
            let _ = writeln!(
                out,
                "  {:<width$}* {}",
                label,
                result.message,
                width = LABEL_WIDTH
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    fn timed(label: &str, secs: f64) -> (String, CandidateResult) {
        (
            label.to_string(),
            CandidateResult {
                ok: true,
                value: Some(Value::Int(1)),
                message: String::from("Success"),
                secs,
            },
        )
    }

    fn failed(label: &str, message: &str) -> (String, CandidateResult) {
        (
            label.to_string(),
            CandidateResult {
                ok: false,
                value: None,
                message: message.to_string(),
                secs: 0.0,
            },
        )
    }

    #[test]
    fn test_fastest_row_is_the_baseline() {
        let table = render(
            "Sorting",
            &[timed("std", 0.001), timed("itertools", 0.002)],
        );
        assert!(table.starts_with("\n-------\n"));
        assert!(table.contains("  std                         0.00100 sec   x1.0 (100%)\n"));
        assert!(table.contains("  itertools                   0.00200 sec   x2.0 (+100%)\n"));
    }

    #[test]
    fn test_failed_row_shows_message() {
        let table = render("T", &[timed("a", 0.001), failed("rayon", "Not implemented")]);
        assert!(table.contains("  rayon                       * Not implemented\n"));
    }

    #[test]
    fn test_zero_fastest_uses_floor() {
        let table = render("T", &[timed("a", 0.0)]);
        // 0.0 / 0.0001 = x0.0, reported against the floor rather than NaN.
        assert!(table.contains("x0.0"));
        assert!(!table.contains("NaN"));
    }

    #[test]
    fn test_all_failed_still_renders() {
        let table = render("T", &[failed("a", "boom"), failed("b", "Not implemented")]);
        assert!(table.contains("* boom"));
        assert!(table.contains("* Not implemented"));
    }

    #[test]
    fn test_long_labels_push_columns_out() {
        let table = render(
            "T",
            &[timed("a-label-well-past-twenty-eight-chars", 0.001)],
        );
        assert!(table.contains("a-label-well-past-twenty-eight-chars0.00100 sec"));
    }
}
