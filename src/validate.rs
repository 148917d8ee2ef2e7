//! Cross-candidate result validation.
//!
//! The first successful candidate of a scenario becomes the reference; every
//! later successful candidate must serialize to the same canonical text.
//! Failed candidates are skipped. A mismatch is fatal to the whole run, and
//! both texts are written out for diffing.

use crate::CandidateResult;
use std::path::{Path, PathBuf};

/// Absolute tolerance for comparing scalar numeric results. Accumulation
/// order may legitimately differ between sequential and grouped pipelines.
pub const TOLERANCE: f64 = 1e-10;

/// A disagreement between two successful candidates.
#[derive(Debug, Clone)]
pub struct Mismatch {
    pub reference_label: String,
    pub candidate_label: String,
    pub reference_text: String,
    pub candidate_text: String,
}

/// Check that all successful results in `results` agree. The reference is the
/// first successful candidate in declaration order.
pub fn validate(results: &[(String, CandidateResult)]) -> Result<(), Mismatch> {
    let mut reference: Option<(&str, String)> = None;
    for (label, result) in results {
        let value = match &result.value {
            Some(value) if result.ok => value,
            _ => continue,
        };
        let text = value.canonical();
        match &reference {
            None => reference = Some((label, text)),
            Some((reference_label, reference_text)) => {
                if text == *reference_text {
                    continue;
                }
                if let (Some(a), Some(b)) = (parse_scalar(reference_text), parse_scalar(&text)) {
                    if (a - b).abs() <= TOLERANCE {
                        continue;
                    }
                }
                return Err(Mismatch {
                    reference_label: (*reference_label).to_string(),
                    candidate_label: label.clone(),
                    reference_text: reference_text.clone(),
                    candidate_text: text,
                });
            }
        }
    }
    Ok(())
}

/// Write both sides of a mismatch under `dir` for offline diffing.
pub fn write_artifacts(dir: &Path, mismatch: &Mismatch) -> std::io::Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)?;
    let reference_path = dir.join("result-0.txt");
    let candidate_path = dir.join("result-1.txt");
    std::fs::write(&reference_path, &mismatch.reference_text)?;
    std::fs::write(&candidate_path, &mismatch.candidate_text)?;
    Ok((reference_path, candidate_path))
}

fn parse_scalar(text: &str) -> Option<f64> {
    text.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    fn ok(label: &str, value: Value) -> (String, CandidateResult) {
        (
            label.to_string(),
            CandidateResult {
                ok: true,
                value: Some(value),
                message: String::from("Success"),
                secs: 0.001,
            },
        )
    }

    fn failed(label: &str) -> (String, CandidateResult) {
        (
            label.to_string(),
            CandidateResult {
                ok: false,
                value: None,
                message: String::from("Not implemented"),
                secs: 0.001,
            },
        )
    }

    #[test]
    fn test_identical_results_pass() {
        let results = vec![
            ok("a", Value::Seq(vec![Value::Int(1), Value::Int(2)])),
            ok("b", Value::Seq(vec![Value::Int(1), Value::Int(2)])),
        ];
        assert!(validate(&results).is_ok());
    }

    #[test]
    fn test_failed_candidates_are_skipped() {
        let results = vec![
            failed("a"),
            ok("b", Value::Int(5)),
            failed("c"),
            ok("d", Value::Int(5)),
        ];
        assert!(validate(&results).is_ok());
    }

    #[test]
    fn test_reference_is_first_success() {
        let results = vec![failed("a"), ok("b", Value::Int(1)), ok("c", Value::Int(2))];
        let mismatch = validate(&results).unwrap_err();
        assert_eq!(mismatch.reference_label, "b");
        assert_eq!(mismatch.candidate_label, "c");
        assert_eq!(mismatch.reference_text, "1");
        assert_eq!(mismatch.candidate_text, "2");
    }

    #[test]
    fn test_numeric_scalars_compare_with_tolerance() {
        let results = vec![
            ok("a", Value::Float(0.3)),
            ok("b", Value::Float(0.1 + 0.2)),
            ok("c", Value::Int(0)),
        ];
        // 0.3 vs 0.30000000000000004 is inside tolerance, 0.3 vs 0 is not.
        let mismatch = validate(&results).unwrap_err();
        assert_eq!(mismatch.candidate_label, "c");
    }

    #[test]
    fn test_structural_difference_fails() {
        let results = vec![
            ok("a", Value::Seq(vec![Value::Int(1)])),
            ok("b", Value::Seq(vec![Value::Int(1), Value::Int(2)])),
        ];
        assert!(validate(&results).is_err());
    }

    #[test]
    fn test_all_failed_passes_vacuously() {
        let results = vec![failed("a"), failed("b")];
        assert!(validate(&results).is_ok());
    }

    #[test]
    fn test_artifacts_written() {
        let dir = tempfile::tempdir().unwrap();
        let mismatch = Mismatch {
            reference_label: "a".into(),
            candidate_label: "b".into(),
            reference_text: "1".into(),
            candidate_text: "2".into(),
        };
        let (reference_path, candidate_path) =
            write_artifacts(dir.path(), &mismatch).unwrap();
        assert_eq!(std::fs::read_to_string(reference_path).unwrap(), "1");
        assert_eq!(std::fs::read_to_string(candidate_path).unwrap(), "2");
    }
}
