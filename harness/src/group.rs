//! Case grouping: resolve a named run into section-keyed buckets.
//!
//! The grouper fetches every case bound to a run, resolves each case's
//! owning section path, and buckets `(run_id, test_id)` pairs by path.
//! Bucket order is first-seen-section order and entries keep catalog
//! fetch order, so consecutive cases from the same section stay
//! adjacent in reporting. The ordering is deliberate and must not be
//! re-sorted.

use anyhow::Result;
use tracing::{error, info, instrument, warn};

use catalog::{CatalogClient, CatalogError, RunId, TestId};

use crate::plan::TestPlan;
use crate::section::{UNKNOWN_SECTION, resolve_section_path};

/// One section bucket: resolved path plus its `(run_id, test_id)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionGroup {
    pub section: String,
    pub entries: Vec<(RunId, TestId)>,
}

/// Section buckets in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedCases {
    pub sections: Vec<SectionGroup>,
}

impl GroupedCases {
    fn push(&mut self, section: String, run_id: RunId, test_id: TestId) {
        match self.sections.iter_mut().find(|group| group.section == section) {
            Some(group) => group.entries.push((run_id, test_id)),
            None => self.sections.push(SectionGroup {
                section,
                entries: vec![(run_id, test_id)],
            }),
        }
    }

    pub fn total(&self) -> usize {
        self.sections.iter().map(|group| group.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Fetch and group the cases of the named run.
///
/// Returns the authoritative run name and the section buckets. A
/// missing `run_name` in the plan is a configuration error and fails
/// fast. Catalog failures are caught here and yield `(None, empty)`;
/// callers treat a `None` run name as "no cases available", not as a
/// crash. On success the resolved test ids are cached onto the plan.
#[instrument(skip(client, plan))]
pub fn group_by_section(
    client: &dyn CatalogClient,
    plan: &mut TestPlan,
    run_name: &str,
) -> Result<(Option<String>, GroupedCases)> {
    info!("fetching and grouping test cases");
    let run_id = plan.resolve(run_name)?.run_id;

    match collect_groups(client, run_id) {
        Ok((actual_run_name, grouped, test_ids)) => {
            info!(
                run_id = run_id.0,
                sections = grouped.sections.len(),
                cases = grouped.total(),
                "grouped test cases by section"
            );
            plan.record_test_ids(run_name, test_ids);
            Ok((Some(actual_run_name), grouped))
        }
        Err(err) => {
            error!(run_id = run_id.0, error = %err, "error while fetching/grouping test cases");
            Ok((None, GroupedCases::default()))
        }
    }
}

fn collect_groups(
    client: &dyn CatalogClient,
    run_id: RunId,
) -> Result<(String, GroupedCases, Vec<TestId>), CatalogError> {
    let actual_run_name = match client.get_run(run_id) {
        Ok(run) => run.name,
        Err(err) => {
            warn!(run_id = run_id.0, error = %err, "run name unavailable, synthesizing");
            format!("Run {run_id}")
        }
    };

    let tests = client.get_tests(run_id)?;
    let mut grouped = GroupedCases::default();
    let mut test_ids = Vec::with_capacity(tests.len());

    for test in tests {
        let mut section_id = test.section_id;
        if section_id.is_none()
            && let Some(case_id) = test.case_id
        {
            section_id = client.get_case(case_id)?.section_id;
        }

        let section = match section_id {
            Some(id) => resolve_section_path(client, Some(id)),
            None => UNKNOWN_SECTION.to_string(),
        };

        grouped.push(section, run_id, test.id);
        test_ids.push(test.id);
    }

    Ok((actual_run_name, grouped, test_ids))
}
