//! Probe execution.
//!
//! Each probe builds one error, records its lineage, and routes it through a
//! catch table made of the configured clauses in order. A probe passes when
//! the clause that caught the error is the one it expects (or nothing caught
//! it and it expects nothing).

use baserr::{Catch, Lineage};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{ProbeCase, ProbeConfig};
use crate::family::TargetName;

/// Result of a single probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    pub name: String,
    /// Messages of every link, candidate first.
    pub lineage: Vec<String>,
    pub caught_by: Option<TargetName>,
    pub expected: Option<TargetName>,
    pub passed: bool,
}

/// Results of a whole probe file, in file order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProbeReport {
    pub outcomes: Vec<ProbeOutcome>,
}

impl ProbeReport {
    /// Number of probes that did not pass.
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed).count()
    }

    /// Whether every probe passed.
    pub fn all_passed(&self) -> bool {
        self.failures() == 0
    }
}

/// Run one probe against `catch_order`.
pub fn run_probe(case: &ProbeCase, catch_order: &[TargetName]) -> ProbeOutcome {
    let error = case.error.build(&case.message);
    let link = Some(error.erase());

    let lineage = Lineage::new(link).map(|l| l.to_string()).collect();
    let caught_by = catch_order
        .iter()
        .fold(Catch::new(link), |catch, target| target.clause(catch))
        .finish();

    ProbeOutcome {
        name: case.name.clone(),
        lineage,
        caught_by,
        expected: case.expect,
        passed: caught_by == case.expect,
    }
}

/// Run every probe of `config`.
pub fn run(config: &ProbeConfig) -> ProbeReport {
    let mut report = ProbeReport::default();

    for case in &config.probes {
        let outcome = run_probe(case, &config.catch_order);
        let caught = outcome.caught_by.map_or("nothing", TargetName::as_str);
        if outcome.passed {
            info!(probe = %outcome.name, caught_by = caught, "probe passed");
        } else {
            let expected = outcome.expected.map_or("nothing", TargetName::as_str);
            warn!(
                probe = %outcome.name,
                caught_by = caught,
                expected,
                lineage = ?outcome.lineage,
                "probe failed"
            );
        }
        report.outcomes.push(outcome);
    }

    info!(
        service = %config.shared.service_name,
        total = report.outcomes.len(),
        failed = report.failures(),
        "probe run complete"
    );
    report
}
