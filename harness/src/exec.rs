//! Execution core: one verdict and one submission per unit.
//!
//! Each execution unit moves through fetch, validation, dispatch, and
//! completion. Every path ends in exactly one terminal outcome and
//! exactly one guarded result submission; a submission failure degrades
//! observability but never alters or masks the computed verdict. Units
//! run strictly sequentially and a failure inside one unit never aborts
//! its siblings.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use catalog::{CaseId, CaseRecord, CatalogClient, RunId, TestId, TestRecord};

use crate::flatten::ExecutionUnit;
use crate::outcome::Outcome;
use crate::registry::{Handler, HandlerRegistry, RouteTable};
use crate::reporter::{HandlerError, Reporter};

/// Terminal record of one executed unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnitReport {
    pub section: Option<String>,
    pub run_id: RunId,
    pub test_id: TestId,
    pub outcome: Outcome,
    pub comment: String,
    /// Whether the result reached the catalog.
    pub submitted: bool,
    /// Non-fatal problems along the way (lookup failures, submission
    /// outages), kept for manual reconciliation.
    pub warnings: Vec<String>,
}

/// Executes units against the dispatch table. Holds only shared
/// read-only collaborators; all of them are injected at construction.
pub struct Executor<'a> {
    client: &'a dyn CatalogClient,
    registry: &'a HandlerRegistry,
    routes: &'a RouteTable,
    reporter: &'a dyn Reporter,
    run_name: &'a str,
}

impl<'a> Executor<'a> {
    pub fn new(
        client: &'a dyn CatalogClient,
        registry: &'a HandlerRegistry,
        routes: &'a RouteTable,
        reporter: &'a dyn Reporter,
        run_name: &'a str,
    ) -> Self {
        Self {
            client,
            registry,
            routes,
            reporter,
            run_name,
        }
    }

    /// Execute every unit in order. No retries, no early exit.
    pub fn execute_all(&self, units: &[ExecutionUnit]) -> Vec<UnitReport> {
        units.iter().map(|unit| self.execute(unit)).collect()
    }

    /// Execute one unit and submit its verdict.
    #[instrument(skip_all, fields(run_id = unit.run_id.0, test_id = unit.test_id.0))]
    pub fn execute(&self, unit: &ExecutionUnit) -> UnitReport {
        let section = unit.section.as_deref().unwrap_or("Unknown Section");
        self.reporter
            .set_suite(&format!("{} - {}", self.run_name, section));
        self.reporter.start_test(&format!(
            "Workflow execution for run {}, test {}",
            unit.run_id, unit.test_id
        ));

        let mut warnings = Vec::new();
        let (outcome, comment) = self.dispatch(unit, &mut warnings);
        let submitted = self.submit(unit, outcome, &comment, &mut warnings);

        info!(outcome = ?outcome, submitted, "unit complete");
        UnitReport {
            section: unit.section.clone(),
            run_id: unit.run_id,
            test_id: unit.test_id,
            outcome,
            comment,
            submitted,
            warnings,
        }
    }

    fn dispatch(&self, unit: &ExecutionUnit, warnings: &mut Vec<String>) -> (Outcome, String) {
        let Some(test) = self.fetch_test(unit, warnings) else {
            let comment = format!(
                "No test found in run {} with test id {}",
                unit.run_id, unit.test_id
            );
            self.reporter.log_warning(&comment);
            return (Outcome::Skipped, comment);
        };

        let case_id = match test.case_id {
            Some(case_id) => case_id,
            None => {
                let comment = format!(
                    "Test {} carries no case id, catalog is inconsistent",
                    unit.test_id
                );
                self.reporter.log_warning(&comment);
                return (Outcome::Error, comment);
            }
        };

        let case = match self.client.get_case(case_id) {
            Ok(case) => case,
            Err(err) => {
                let comment = format!("Failed to retrieve case {case_id}: {err}");
                self.reporter.log_warning(&comment);
                return (Outcome::Error, comment);
            }
        };

        self.reporter.log_info(&format!(
            "Retrieved title for test {}: {}",
            unit.test_id, case.title
        ));
        if let Some(expected) = &case.expected_output {
            self.reporter.log_info(&format!("Expected output: {expected}"));
        }

        self.run_handler(case_id, &case)
    }

    fn run_handler(&self, case_id: CaseId, case: &CaseRecord) -> (Outcome, String) {
        let Some(route) = self.routes.match_title(&case.title) else {
            let comment = format!("No handler matched title {:?}", case.title);
            self.reporter.log_warning(&comment);
            return (Outcome::Skipped, comment);
        };

        let Some(handler) = self.registry.get(&route.handler) else {
            let comment = format!(
                "Handler '{}' for pattern '{}' is not registered",
                route.handler, route.pattern
            );
            self.reporter.log_warning(&comment);
            return (Outcome::Error, comment);
        };

        self.reporter
            .log_info(&format!("Running handler: {}", route.handler));
        match invoke(handler, self.reporter, case_id) {
            Ok(()) => (Outcome::Passed, String::new()),
            Err(HandlerError::Assertion(message)) => {
                self.reporter
                    .log_warning(&format!("Assertion failed: {message}"));
                (Outcome::Failed, message)
            }
            Err(HandlerError::Other(err)) => {
                let comment = format!("Unexpected error occurred: {err}");
                self.reporter.log_warning(&comment);
                (Outcome::Error, comment)
            }
        }
    }

    /// Live test-in-run detail. Lookup failures degrade to "not found":
    /// the caller turns a `None` into a Skipped verdict.
    fn fetch_test(&self, unit: &ExecutionUnit, warnings: &mut Vec<String>) -> Option<TestRecord> {
        match self.client.get_tests(unit.run_id) {
            Ok(tests) => tests.into_iter().find(|test| test.id == unit.test_id),
            Err(err) => {
                let warning = format!("test lookup for run {} failed: {err}", unit.run_id);
                warn!("{warning}");
                warnings.push(warning);
                None
            }
        }
    }

    /// The single guarded result submission. Failure is logged and
    /// recorded as a warning; the verdict is returned to the caller
    /// unchanged either way.
    fn submit(
        &self,
        unit: &ExecutionUnit,
        outcome: Outcome,
        comment: &str,
        warnings: &mut Vec<String>,
    ) -> bool {
        match self
            .client
            .update_result(unit.run_id, unit.test_id, outcome.status(), comment)
        {
            Ok(()) => {
                self.reporter.log_info(&format!(
                    "Catalog updated: test {}, status {:?}",
                    unit.test_id, outcome
                ));
                true
            }
            Err(err) => {
                let warning = format!(
                    "Failed to update result for test {}: {err}",
                    unit.test_id
                );
                warn!("{warning}");
                self.reporter.log_warning(&warning);
                warnings.push(warning);
                false
            }
        }
    }
}

/// Invoke a handler with panic containment: a panicking handler yields
/// an error at the unit boundary instead of tearing down the pass.
fn invoke(
    handler: Handler,
    reporter: &dyn Reporter,
    case_id: CaseId,
) -> Result<(), HandlerError> {
    match panic::catch_unwind(AssertUnwindSafe(|| handler(reporter, case_id))) {
        Ok(result) => result,
        Err(payload) => Err(HandlerError::Other(anyhow::anyhow!(
            "handler panicked: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
