//! Identifier newtypes and catalog record shapes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(
    /// Identifier of a run (a named execution batch of cases).
    RunId
);
id_type!(
    /// Identifier of a test, i.e. a case's membership in a specific run.
    TestId
);
id_type!(
    /// Identifier of a case (the catalog-owned test specification).
    CaseId
);
id_type!(
    /// Identifier of a section (folder node in the catalog hierarchy).
    SectionId
);

/// A case's membership record inside a run, as returned by `get_tests`.
///
/// `case_id` and `section_id` are both optional on the wire; a missing
/// `section_id` forces a secondary case-detail lookup during grouping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestRecord {
    pub id: TestId,
    #[serde(default)]
    pub case_id: Option<CaseId>,
    #[serde(default)]
    pub section_id: Option<SectionId>,
}

/// Run metadata as returned by `get_run`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunRecord {
    pub name: String,
}

/// Case detail as returned by `get_case`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseRecord {
    pub title: String,
    #[serde(default)]
    pub section_id: Option<SectionId>,
    /// Expected output declared on the case by the catalog authors.
    #[serde(default)]
    pub expected_output: Option<String>,
    /// Remaining custom fields, passed through untyped.
    #[serde(default)]
    pub custom_fields: BTreeMap<String, serde_json::Value>,
}

/// Section node as returned by `get_section`. `parent_id` is `None` at
/// the root of the tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionRecord {
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<SectionId>,
}

/// Numeric result status understood by the catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Passed,
    Blocked,
    Untested,
    Retest,
    Failed,
}

impl ResultStatus {
    /// Wire code for `update_result`.
    pub fn code(self) -> u8 {
        match self {
            ResultStatus::Passed => 1,
            ResultStatus::Blocked => 2,
            ResultStatus::Untested => 3,
            ResultStatus::Retest => 4,
            ResultStatus::Failed => 5,
        }
    }
}
