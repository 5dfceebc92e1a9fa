//! The catalog client contract.

use crate::error::CatalogError;
use crate::types::{
    CaseId, CaseRecord, ResultStatus, RunId, RunRecord, SectionId, SectionRecord, TestId,
    TestRecord,
};

/// Abstract interface to the remote test catalog.
///
/// All calls may fail; callers are expected to degrade rather than
/// abort (see the harness error policies). Implementations must be
/// safe to call repeatedly from a single thread; units never execute
/// concurrently, so no internal locking discipline is imposed beyond
/// `&self` methods.
pub trait CatalogClient {
    /// All case-membership records bound to a run.
    fn get_tests(&self, run_id: RunId) -> Result<Vec<TestRecord>, CatalogError>;

    /// Run metadata (authoritative run name).
    fn get_run(&self, run_id: RunId) -> Result<RunRecord, CatalogError>;

    /// Case detail: title, owning section, expected output.
    fn get_case(&self, case_id: CaseId) -> Result<CaseRecord, CatalogError>;

    /// Section node: name and optional parent.
    fn get_section(&self, section_id: SectionId) -> Result<SectionRecord, CatalogError>;

    /// Record a verdict for a test in a run. Best effort from the
    /// harness's point of view: a failure here must never mask the
    /// verdict itself.
    fn update_result(
        &self,
        run_id: RunId,
        test_id: TestId,
        status: ResultStatus,
        comment: &str,
    ) -> Result<(), CatalogError>;
}
