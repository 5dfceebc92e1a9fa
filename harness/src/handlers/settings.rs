//! Settings page behavior.

use catalog::CaseId;

use crate::registry::HandlerRegistry;
use crate::reporter::{HandlerError, Reporter, check};

pub fn register(registry: &mut HandlerRegistry) {
    registry.register("settings_page", settings_page);
}

/// Drive the settings page for the given case. Concrete page actions
/// plug in behind this function.
fn settings_page(reporter: &dyn Reporter, case_id: CaseId) -> Result<(), HandlerError> {
    reporter.log_info(&format!("Opening settings page for case {case_id}"));
    check(case_id.0 != 0, "settings case id must be set")?;
    reporter.log_info("Settings page verified");
    Ok(())
}
