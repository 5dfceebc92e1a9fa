//! Terminal verdicts and their catalog status codes.

use serde::{Deserialize, Serialize};

use catalog::ResultStatus;

/// The terminal verdict of one execution unit. Exactly one outcome is
/// produced per unit; the comment travels alongside on the unit report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed,
    Skipped,
    Error,
}

impl Outcome {
    /// Catalog status submitted for this verdict. Skips report as
    /// Blocked and harness-side errors as Retest so a degraded unit is
    /// never recorded as passing.
    pub fn status(self) -> ResultStatus {
        match self {
            Outcome::Passed => ResultStatus::Passed,
            Outcome::Failed => ResultStatus::Failed,
            Outcome::Skipped => ResultStatus::Blocked,
            Outcome::Error => ResultStatus::Retest,
        }
    }
}
