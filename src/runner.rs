//! Fuzz session over the selected exports of one module.
//!
//! Each export gets its own run-engine session with the same configuration.
//! The aggregate gate fails when any single report fails.

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use fuzzgate_core::fuzz::{FuzzReport, FuzzRunner};

use crate::args::Args;
use crate::catalog::{select_targets, ModuleCatalog};
use crate::output::{format_gate, format_json, format_report};
use crate::sarif::to_sarif;

/// Aggregate result of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Passed,
    Failed,
    /// The module has no callable exports.
    NoTargets,
}

impl SessionStatus {
    pub fn from_reports(reports: &[FuzzReport]) -> Self {
        if reports.iter().any(|r| !r.passed()) {
            SessionStatus::Failed
        } else {
            SessionStatus::Passed
        }
    }

    pub fn exit_code(self) -> u8 {
        match self {
            SessionStatus::Passed => 0,
            SessionStatus::Failed | SessionStatus::NoTargets => 1,
        }
    }
}

/// Fuzz the requested exports of `module_name` and print the selected view.
pub async fn run_session(
    args: &Args,
    catalog: &ModuleCatalog,
    module_name: &str,
) -> Result<SessionStatus> {
    let module = catalog.resolve(module_name)?;
    let targets = select_targets(module, &args.fns);
    if args.fns.is_empty() && targets.is_empty() {
        eprintln!("\x1b[31m✗ No exported functions found in '{}'\x1b[0m", module.name);
        return Ok(SessionStatus::NoTargets);
    }

    let runner = FuzzRunner::new(args.fuzz_config());
    let started = Utc::now();
    let mut reports = Vec::with_capacity(targets.len());

    for target in &targets {
        eprintln!("Fuzzing {}::{}...", module.name, target.name);
        let report = runner.run(target.function.as_ref(), &target.name).await;
        info!(
            module = module.name,
            function = %target.name,
            runs = report.runs,
            crashes = report.crashes.len(),
            "fuzzed export"
        );
        if args.console() {
            print!("{}", format_report(&report));
        }
        reports.push(report);
    }

    let finished = Utc::now();
    let status = SessionStatus::from_reports(&reports);

    if args.sarif {
        let log = to_sarif(&reports, started, finished);
        println!(
            "{}",
            serde_json::to_string_pretty(&log).context("Failed to serialize SARIF log")?
        );
    } else if args.json {
        println!(
            "{}",
            format_json(&reports).context("Failed to serialize reports")?
        );
    } else {
        println!("{}", format_gate(status == SessionStatus::Failed));
    }

    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuzzgate_core::fuzz::Gate;

    fn report(gate: Gate) -> FuzzReport {
        FuzzReport {
            target: "f".into(),
            runs: 1,
            crashes: Vec::new(),
            elapsed_ms: 0.5,
            gate,
            corpus_size: 1,
            seed: None,
        }
    }

    #[test]
    fn test_status_from_reports() {
        assert_eq!(SessionStatus::from_reports(&[]), SessionStatus::Passed);
        assert_eq!(
            SessionStatus::from_reports(&[report(Gate::Pass), report(Gate::Fail)]),
            SessionStatus::Failed
        );
        assert_eq!(SessionStatus::Passed.exit_code(), 0);
        assert_eq!(SessionStatus::Failed.exit_code(), 1);
        assert_eq!(SessionStatus::NoTargets.exit_code(), 1);
    }
}
