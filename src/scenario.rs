//! Scenario model, candidate labelling, and the sequential driver loop.

use crate::runner::run_candidate;
use crate::validate::{self, Mismatch};
use crate::value::Value;
use crate::{report, CandidateError, CandidateFn, CandidateResult, ConsumerFn, HarnessError};
use colored::Colorize;
use std::io::Write;
use std::path::Path;

/// Directory for mismatch artifacts, relative to the working directory.
const ARTIFACT_DIR: &str = "tmp";

/// One rendition of a scenario's task.
pub struct Candidate {
    name: Option<String>,
    op: Box<CandidateFn>,
}

impl Candidate {
    pub fn new(op: impl Fn() -> Result<Value, CandidateError> + 'static) -> Candidate {
        Candidate {
            name: None,
            op: Box::new(op),
        }
    }

    pub fn named(
        name: impl Into<String>,
        op: impl Fn() -> Result<Value, CandidateError> + 'static,
    ) -> Candidate {
        Candidate {
            name: Some(name.into()),
            op: Box::new(op),
        }
    }

    /// Placeholder for a rendition the group's library cannot express.
    pub fn unimplemented() -> Candidate {
        Candidate::new(|| Err(CandidateError::Unimplemented))
    }

    pub fn operation(&self) -> &CandidateFn {
        self.op.as_ref()
    }
}

struct Group {
    name: String,
    candidates: Vec<Candidate>,
}

/// A named task with per-library candidate groups, built fluent-style.
pub struct Scenario {
    name: String,
    repeat: u32,
    consumer: Option<Box<ConsumerFn>>,
    groups: Vec<Group>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, repeat: u32) -> Scenario {
        Scenario {
            name: name.into(),
            repeat,
            consumer: None,
            groups: Vec::new(),
        }
    }

    /// Traverse every result between timed iterations with `consume`.
    pub fn consumer(mut self, consume: impl Fn(&Value) + 'static) -> Scenario {
        self.consumer = Some(Box::new(consume));
        self
    }

    /// Add a candidate group for one library.
    pub fn group(mut self, name: impl Into<String>, candidates: Vec<Candidate>) -> Scenario {
        self.groups.push(Group {
            name: name.into(),
            candidates,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn repeat(&self) -> u32 {
        self.repeat
    }

    /// Flatten the groups into `(label, candidate)` pairs in declaration
    /// order. A named candidate is labelled `group [name]`; the first unnamed
    /// candidate of a group takes the bare group name and later unnamed ones
    /// are numbered `group #2`, `group #3`, ...
    pub fn labelled(&self) -> Vec<(String, &Candidate)> {
        let mut flat = Vec::new();
        for group in &self.groups {
            let mut unnamed = 0usize;
            for candidate in &group.candidates {
                let label = match &candidate.name {
                    Some(name) => format!("{} [{}]", group.name, name),
                    None => {
                        unnamed += 1;
                        if unnamed == 1 {
                            group.name.clone()
                        } else {
                            format!("{} #{}", group.name, unnamed)
                        }
                    }
                };
                flat.push((label, candidate));
            }
        }
        flat
    }
}

/// Observer for run progress. The console sink prints the scenario name
/// followed by one dot per finished candidate.
pub trait Progress {
    fn scenario_started(&mut self, name: &str);
    fn candidate_finished(&mut self, label: &str);
}

pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn scenario_started(&mut self, name: &str) {
        print!("\n{} ", name);
        let _ = std::io::stdout().flush();
    }

    fn candidate_finished(&mut self, _label: &str) {
        print!(".");
        let _ = std::io::stdout().flush();
    }
}

pub struct SilentProgress;

impl Progress for SilentProgress {
    fn scenario_started(&mut self, _name: &str) {}
    fn candidate_finished(&mut self, _label: &str) {}
}

/// Run scenarios sequentially in declaration order. When `filter` is given,
/// only scenarios whose name contains it as a substring run; the rest are
/// skipped silently. Stops at the first validation mismatch.
pub fn run_all(
    scenarios: Vec<Scenario>,
    filter: Option<&str>,
    progress: &mut dyn Progress,
) -> Result<(), HarnessError> {
    for scenario in &scenarios {
        if let Some(needle) = filter {
            if !scenario.name.contains(needle) {
                tracing::debug!(scenario = %scenario.name, "skipped by filter");
                continue;
            }
        }
        run_scenario(scenario, progress)?;
    }
    Ok(())
}

fn run_scenario(scenario: &Scenario, progress: &mut dyn Progress) -> Result<(), HarnessError> {
    tracing::debug!(scenario = %scenario.name, repeat = scenario.repeat, "running");
    progress.scenario_started(&scenario.name);

    let mut results: Vec<(String, CandidateResult)> = Vec::new();
    for (label, candidate) in scenario.labelled() {
        let result = run_candidate(
            scenario.repeat,
            scenario.consumer.as_deref(),
            candidate.operation(),
        );
        progress.candidate_finished(&label);
        results.push((label, result));
    }

    if let Err(mismatch) = validate::validate(&results) {
        report_mismatch(&mismatch)?;
        return Err(HarnessError::ValidationMismatch {
            left: mismatch.reference_label,
            right: mismatch.candidate_label,
        });
    }

    print!("{}", report::render(&scenario.name, &results));
    Ok(())
}

fn report_mismatch(mismatch: &Mismatch) -> Result<(), HarnessError> {
    println!();
    println!(
        "{} results from '{}' and '{}' do not match.",
        "ERROR:".red().bold(),
        mismatch.reference_label,
        mismatch.candidate_label
    );
    println!("{}: {}", mismatch.reference_label, mismatch.reference_text);
    println!("{}: {}", mismatch.candidate_label, mismatch.candidate_text);
    let (reference_path, candidate_path) =
        validate::write_artifacts(Path::new(ARTIFACT_DIR), mismatch)?;
    println!(
        "wrote {} and {}",
        reference_path.display(),
        candidate_path.display()
    );
    Ok(())
}
