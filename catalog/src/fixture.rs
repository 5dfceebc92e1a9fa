//! JSON-fixture catalog implementation.
//!
//! Backs the CLI when no live service is configured and gives tests a
//! scriptable catalog: entities can be marked as failing to exercise
//! the harness degradation paths, and submitted results are recorded
//! for inspection.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::types::{
    CaseId, CaseRecord, ResultStatus, RunId, RunRecord, SectionId, SectionRecord, TestId,
    TestRecord,
};

/// On-disk fixture shape. Flat entry lists rather than keyed maps so the
/// file stays easy to write by hand; tests within a run keep file order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureData {
    #[serde(default)]
    pub runs: Vec<RunEntry>,
    #[serde(default)]
    pub tests: Vec<TestEntry>,
    #[serde(default)]
    pub cases: Vec<CaseEntry>,
    #[serde(default)]
    pub sections: Vec<SectionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEntry {
    pub id: RunId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestEntry {
    pub run_id: RunId,
    pub id: TestId,
    #[serde(default)]
    pub case_id: Option<CaseId>,
    #[serde(default)]
    pub section_id: Option<SectionId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseEntry {
    pub id: CaseId,
    pub title: String,
    #[serde(default)]
    pub section_id: Option<SectionId>,
    #[serde(default)]
    pub expected_output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionEntry {
    pub id: SectionId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<SectionId>,
}

/// A result the harness submitted through [`CatalogClient::update_result`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedResult {
    pub run_id: RunId,
    pub test_id: TestId,
    pub status: ResultStatus,
    pub comment: String,
}

/// In-memory catalog built from [`FixtureData`].
#[derive(Debug, Default)]
pub struct FixtureCatalog {
    runs: BTreeMap<RunId, RunRecord>,
    tests_by_run: BTreeMap<RunId, Vec<TestRecord>>,
    cases: BTreeMap<CaseId, CaseRecord>,
    sections: BTreeMap<SectionId, SectionRecord>,
    fail_runs: BTreeSet<RunId>,
    fail_tests: BTreeSet<RunId>,
    fail_cases: BTreeSet<CaseId>,
    fail_sections: BTreeSet<SectionId>,
    fail_submissions: bool,
    submissions: Mutex<Vec<SubmittedResult>>,
}

impl FixtureCatalog {
    pub fn from_data(data: FixtureData) -> Self {
        let mut catalog = Self::default();
        for run in data.runs {
            catalog.runs.insert(run.id, RunRecord { name: run.name });
        }
        for test in data.tests {
            catalog
                .tests_by_run
                .entry(test.run_id)
                .or_default()
                .push(TestRecord {
                    id: test.id,
                    case_id: test.case_id,
                    section_id: test.section_id,
                });
        }
        for case in data.cases {
            catalog.cases.insert(
                case.id,
                CaseRecord {
                    title: case.title,
                    section_id: case.section_id,
                    expected_output: case.expected_output,
                    custom_fields: BTreeMap::new(),
                },
            );
        }
        for section in data.sections {
            catalog.sections.insert(
                section.id,
                SectionRecord {
                    name: section.name,
                    parent_id: section.parent_id,
                },
            );
        }
        catalog
    }

    /// Load a fixture file from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)
            .map_err(|err| CatalogError::Backend(format!("read {}: {err}", path.display())))?;
        let data: FixtureData = serde_json::from_str(&contents)
            .map_err(|err| CatalogError::Malformed(format!("parse {}: {err}", path.display())))?;
        Ok(Self::from_data(data))
    }

    /// Mark a run so `get_run` fails with a backend error.
    pub fn with_failing_run(mut self, run_id: RunId) -> Self {
        self.fail_runs.insert(run_id);
        self
    }

    /// Mark a run so `get_tests` fails with a backend error.
    pub fn with_failing_tests(mut self, run_id: RunId) -> Self {
        self.fail_tests.insert(run_id);
        self
    }

    /// Mark a case so `get_case` fails with a backend error.
    pub fn with_failing_case(mut self, case_id: CaseId) -> Self {
        self.fail_cases.insert(case_id);
        self
    }

    /// Mark a section so `get_section` fails with a backend error.
    pub fn with_failing_section(mut self, section_id: SectionId) -> Self {
        self.fail_sections.insert(section_id);
        self
    }

    /// Make every `update_result` call fail with a backend error.
    pub fn with_failing_submissions(mut self) -> Self {
        self.fail_submissions = true;
        self
    }

    /// Snapshot of everything submitted so far, in submission order.
    pub fn submissions(&self) -> Vec<SubmittedResult> {
        self.submissions
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl CatalogClient for FixtureCatalog {
    fn get_tests(&self, run_id: RunId) -> Result<Vec<TestRecord>, CatalogError> {
        if self.fail_tests.contains(&run_id) {
            return Err(CatalogError::Backend(format!(
                "get_tests unavailable for run {run_id}"
            )));
        }
        Ok(self.tests_by_run.get(&run_id).cloned().unwrap_or_default())
    }

    fn get_run(&self, run_id: RunId) -> Result<RunRecord, CatalogError> {
        if self.fail_runs.contains(&run_id) {
            return Err(CatalogError::Backend(format!(
                "get_run unavailable for run {run_id}"
            )));
        }
        self.runs
            .get(&run_id)
            .cloned()
            .ok_or(CatalogError::NotFound {
                kind: "run",
                id: run_id.0,
            })
    }

    fn get_case(&self, case_id: CaseId) -> Result<CaseRecord, CatalogError> {
        if self.fail_cases.contains(&case_id) {
            return Err(CatalogError::Backend(format!(
                "get_case unavailable for case {case_id}"
            )));
        }
        self.cases
            .get(&case_id)
            .cloned()
            .ok_or(CatalogError::NotFound {
                kind: "case",
                id: case_id.0,
            })
    }

    fn get_section(&self, section_id: SectionId) -> Result<SectionRecord, CatalogError> {
        if self.fail_sections.contains(&section_id) {
            return Err(CatalogError::Backend(format!(
                "get_section unavailable for section {section_id}"
            )));
        }
        self.sections
            .get(&section_id)
            .cloned()
            .ok_or(CatalogError::NotFound {
                kind: "section",
                id: section_id.0,
            })
    }

    fn update_result(
        &self,
        run_id: RunId,
        test_id: TestId,
        status: ResultStatus,
        comment: &str,
    ) -> Result<(), CatalogError> {
        if self.fail_submissions {
            return Err(CatalogError::Backend(
                "update_result unavailable".to_string(),
            ));
        }
        let mut guard = self
            .submissions
            .lock()
            .map_err(|_| CatalogError::Backend("submission log poisoned".to_string()))?;
        guard.push(SubmittedResult {
            run_id,
            test_id,
            status,
            comment: comment.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FixtureData {
        FixtureData {
            runs: vec![RunEntry {
                id: RunId(7),
                name: "Prompt Regression".to_string(),
            }],
            tests: vec![
                TestEntry {
                    run_id: RunId(7),
                    id: TestId(101),
                    case_id: Some(CaseId(1001)),
                    section_id: Some(SectionId(11)),
                },
                TestEntry {
                    run_id: RunId(7),
                    id: TestId(102),
                    case_id: Some(CaseId(1002)),
                    section_id: None,
                },
            ],
            cases: vec![CaseEntry {
                id: CaseId(1001),
                title: "Google and Microsoft login page".to_string(),
                section_id: Some(SectionId(11)),
                expected_output: Some("dashboard".to_string()),
            }],
            sections: vec![SectionEntry {
                id: SectionId(11),
                name: "Login".to_string(),
                parent_id: None,
            }],
        }
    }

    #[test]
    fn preserves_test_order_within_a_run() {
        let catalog = FixtureCatalog::from_data(sample());
        let tests = catalog.get_tests(RunId(7)).expect("tests");
        assert_eq!(tests.len(), 2);
        assert_eq!(tests[0].id, TestId(101));
        assert_eq!(tests[1].id, TestId(102));
    }

    #[test]
    fn missing_entities_report_not_found() {
        let catalog = FixtureCatalog::from_data(sample());
        let err = catalog.get_case(CaseId(9999)).expect_err("missing case");
        assert!(err.is_not_found());
        let err = catalog.get_run(RunId(8)).expect_err("missing run");
        assert!(err.is_not_found());
    }

    #[test]
    fn failure_injection_overrides_lookups() {
        let catalog = FixtureCatalog::from_data(sample()).with_failing_section(SectionId(11));
        let err = catalog
            .get_section(SectionId(11))
            .expect_err("injected failure");
        assert!(!err.is_not_found());
    }

    #[test]
    fn records_submissions_in_order() {
        let catalog = FixtureCatalog::from_data(sample());
        catalog
            .update_result(RunId(7), TestId(101), ResultStatus::Passed, "")
            .expect("submit");
        catalog
            .update_result(RunId(7), TestId(102), ResultStatus::Failed, "boom")
            .expect("submit");
        let submissions = catalog.submissions();
        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].test_id, TestId(101));
        assert_eq!(submissions[1].status, ResultStatus::Failed);
        assert_eq!(submissions[1].comment, "boom");
    }

    #[test]
    fn loads_fixture_from_disk() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("catalog.json");
        let contents = serde_json::to_string_pretty(&sample()).expect("serialize");
        fs::write(&path, contents).expect("write");

        let catalog = FixtureCatalog::load(&path).expect("load");
        let run = catalog.get_run(RunId(7)).expect("run");
        assert_eq!(run.name, "Prompt Regression");
    }
}
