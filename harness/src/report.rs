//! Run report persistence and aggregation.
//!
//! One synchronization pass produces one report file under
//! `reports/<run_name>/<sync_id>.json`: the per-unit verdicts plus an
//! aggregate summary. The report is the local artifact; the catalog
//! remains the source of truth for individual results.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::exec::UnitReport;
use crate::outcome::Outcome;

/// Persisted report for one executed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_name: String,
    pub sync_id: String,
    pub started_at: String,
    pub finished_at: String,
    pub units: Vec<UnitReport>,
    pub summary: Summary,
}

/// Aggregate counts over a run's unit reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: usize,
    /// Units whose verdict never reached the catalog.
    pub unsubmitted: usize,
}

/// Identifier for one synchronization pass.
pub fn sync_id() -> String {
    format!("sync-{}", Utc::now().format("%Y%m%d_%H%M%S"))
}

pub fn summarize(units: &[UnitReport]) -> Summary {
    let mut summary = Summary {
        total: units.len(),
        ..Summary::default()
    };
    for unit in units {
        match unit.outcome {
            Outcome::Passed => summary.passed += 1,
            Outcome::Failed => summary.failed += 1,
            Outcome::Skipped => summary.skipped += 1,
            Outcome::Error => summary.errors += 1,
        }
        if !unit.submitted {
            summary.unsubmitted += 1;
        }
    }
    summary
}

/// Write the report to `<base_dir>/<run_name>/<sync_id>.json`.
pub fn write_report(base_dir: &Path, report: &RunReport) -> Result<PathBuf> {
    let dir = base_dir.join(&report.run_name);
    fs::create_dir_all(&dir).with_context(|| format!("create report dir {}", dir.display()))?;
    let path = dir.join(format!("{}.json", report.sync_id));
    let contents = serde_json::to_string_pretty(report).context("serialize report")?;
    fs::write(&path, format!("{contents}\n"))
        .with_context(|| format!("write report {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{RunId, TestId};
    use tempfile::tempdir;

    fn unit(outcome: Outcome, submitted: bool) -> UnitReport {
        UnitReport {
            section: Some("Login".to_string()),
            run_id: RunId(7),
            test_id: TestId(101),
            outcome,
            comment: String::new(),
            submitted,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn summarize_counts_each_outcome() {
        let units = vec![
            unit(Outcome::Passed, true),
            unit(Outcome::Passed, false),
            unit(Outcome::Failed, true),
            unit(Outcome::Skipped, true),
            unit(Outcome::Error, true),
        ];
        let summary = summarize(&units);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.unsubmitted, 1);
    }

    #[test]
    fn sync_id_format() {
        let id = sync_id();
        assert!(id.starts_with("sync-"));
        assert!(id.len() > 10);
    }

    #[test]
    fn write_then_read_round_trips() {
        let temp = tempdir().expect("tempdir");
        let units = vec![unit(Outcome::Passed, true)];
        let report = RunReport {
            run_name: "Prompt Regression".to_string(),
            sync_id: "sync-20260827_120000".to_string(),
            started_at: "now".to_string(),
            finished_at: "later".to_string(),
            summary: summarize(&units),
            units,
        };

        let path = write_report(temp.path(), &report).expect("write");
        assert!(path.ends_with("Prompt Regression/sync-20260827_120000.json"));

        let contents = fs::read_to_string(&path).expect("read");
        let loaded: RunReport = serde_json::from_str(&contents).expect("parse");
        assert_eq!(loaded.summary, report.summary);
        assert_eq!(loaded.units.len(), 1);
    }
}
