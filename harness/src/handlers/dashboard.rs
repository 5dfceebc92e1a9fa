//! Dashboard landing page behavior.

use catalog::CaseId;

use crate::registry::HandlerRegistry;
use crate::reporter::{HandlerError, Reporter, check};

pub fn register(registry: &mut HandlerRegistry) {
    registry.register("dashboard_landing_page", dashboard_landing_page);
}

/// Drive the dashboard landing page for the given case. The concrete
/// browser actions live behind this seam; the harness only observes the
/// returned result.
fn dashboard_landing_page(reporter: &dyn Reporter, case_id: CaseId) -> Result<(), HandlerError> {
    reporter.log_info(&format!("Opening dashboard landing page for case {case_id}"));
    check(case_id.0 != 0, "dashboard case id must be set")?;
    reporter.log_info("Dashboard landing page verified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingReporter;

    #[test]
    fn passes_for_a_real_case_id() {
        let reporter = RecordingReporter::default();
        dashboard_landing_page(&reporter, CaseId(1001)).expect("passes");
    }

    #[test]
    fn asserts_on_zero_case_id() {
        let reporter = RecordingReporter::default();
        let err = dashboard_landing_page(&reporter, CaseId(0)).expect_err("asserts");
        assert!(matches!(err, HandlerError::Assertion(_)));
    }
}
