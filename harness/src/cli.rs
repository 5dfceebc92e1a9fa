//! CLI command implementations.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info};

use catalog::FixtureCatalog;

use crate::exec::Executor;
use crate::flatten::flatten_with_sections;
use crate::group::group_by_section;
use crate::plan::TestPlan;
use crate::registry::{HandlerRegistry, RouteTable};
use crate::report::{RunReport, summarize, sync_id, write_report};
use crate::reporter::TracingReporter;

/// Sync the named run and print its section buckets.
pub fn list_run(plan_path: &Path, catalog_path: &Path, run_name: &str) -> Result<()> {
    let mut plan = TestPlan::load(plan_path).context("load plan")?;
    let catalog = FixtureCatalog::load(catalog_path).context("load catalog")?;

    let (actual_run_name, grouped) = group_by_section(&catalog, &mut plan, run_name)?;
    let Some(actual_run_name) = actual_run_name else {
        println!("list: run={run_name} no cases available");
        return Ok(());
    };

    println!("list: run={actual_run_name} cases={}", grouped.total());
    for group in &grouped.sections {
        println!("list: section={} cases={}", group.section, group.entries.len());
    }
    Ok(())
}

/// Run the full pipeline for the named run: sync, flatten, execute,
/// submit, persist the report, print the summary.
pub fn run_by_name(
    plan_path: &Path,
    catalog_path: &Path,
    reports_dir: &Path,
    run_name: &str,
) -> Result<()> {
    let mut plan = TestPlan::load(plan_path).context("load plan")?;
    let catalog = FixtureCatalog::load(catalog_path).context("load catalog")?;
    debug!(run_name, "plan and catalog loaded");

    let (actual_run_name, grouped) = group_by_section(&catalog, &mut plan, run_name)?;
    let Some(actual_run_name) = actual_run_name else {
        println!("run: run={run_name} no cases available");
        return Ok(());
    };

    let units = flatten_with_sections(&grouped);
    let registry = HandlerRegistry::collect();
    let routes = RouteTable::from_plan(&plan.routes);
    let reporter = TracingReporter;

    info!(run = %actual_run_name, units = units.len(), "starting execution pass");
    let started_at = Utc::now();
    let executor = Executor::new(&catalog, &registry, &routes, &reporter, &actual_run_name);
    let unit_reports = executor.execute_all(&units);
    let finished_at = Utc::now();

    let summary = summarize(&unit_reports);
    let report = RunReport {
        run_name: actual_run_name.clone(),
        sync_id: sync_id(),
        started_at: started_at.to_rfc3339(),
        finished_at: finished_at.to_rfc3339(),
        units: unit_reports,
        summary: summary.clone(),
    };
    let path = write_report(reports_dir, &report).context("write report")?;

    println!("run: run={actual_run_name} sync_id={}", report.sync_id);
    println!(
        "run: total={} passed={} failed={} skipped={} errors={} unsubmitted={}",
        summary.total,
        summary.passed,
        summary.failed,
        summary.skipped,
        summary.errors,
        summary.unsubmitted
    );
    println!("run: report={}", path.display());
    Ok(())
}

/// Remove report artifacts from earlier passes.
pub fn clean(reports_dir: &Path) -> Result<()> {
    if reports_dir.exists() {
        for entry in std::fs::read_dir(reports_dir)
            .with_context(|| format!("read {}", reports_dir.display()))?
        {
            let entry = entry.context("read entry")?;
            let path = entry.path();
            if path.is_dir() {
                std::fs::remove_dir_all(&path)
                    .with_context(|| format!("remove {}", path.display()))?;
            } else {
                std::fs::remove_file(&path)
                    .with_context(|| format!("remove {}", path.display()))?;
            }
        }
    }
    println!("clean: reports={}", reports_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn clean_empties_the_reports_dir() {
        let temp = tempdir().expect("tempdir");
        let reports = temp.path().join("reports");
        fs::create_dir_all(reports.join("Run A")).expect("dir");
        fs::write(reports.join("Run A/sync-1.json"), "{}").expect("file");
        fs::write(reports.join("stray.txt"), "x").expect("file");

        clean(&reports).expect("clean");
        assert!(reports.exists());
        assert_eq!(fs::read_dir(&reports).expect("read").count(), 0);
    }

    #[test]
    fn clean_tolerates_missing_dir() {
        let temp = tempdir().expect("tempdir");
        clean(&temp.path().join("missing")).expect("clean");
    }
}
