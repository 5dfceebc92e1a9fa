//! Flattening adapter: grouped buckets to an ordered unit sequence.
//!
//! Pure data transforms, no I/O. Order is preserved exactly as the
//! grouper produced it and nothing is deduplicated.

use catalog::{RunId, TestId};

use crate::group::GroupedCases;

/// The atomic work item handed to the execution core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionUnit {
    /// Resolved section path, when the caller asked for annotations.
    pub section: Option<String>,
    pub run_id: RunId,
    pub test_id: TestId,
}

/// Flatten the buckets into `(run_id, test_id)` pairs.
pub fn flatten(grouped: &GroupedCases) -> Vec<(RunId, TestId)> {
    grouped
        .sections
        .iter()
        .flat_map(|group| group.entries.iter().copied())
        .collect()
}

/// Flatten the buckets into section-annotated execution units.
pub fn flatten_with_sections(grouped: &GroupedCases) -> Vec<ExecutionUnit> {
    grouped
        .sections
        .iter()
        .flat_map(|group| {
            group.entries.iter().map(|&(run_id, test_id)| ExecutionUnit {
                section: Some(group.section.clone()),
                run_id,
                test_id,
            })
        })
        .collect()
}
