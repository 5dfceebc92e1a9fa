//! External test-catalog interface.
//!
//! The remote catalog owns runs, cases, and sections; this crate defines
//! the record types and the [`CatalogClient`] contract the harness talks
//! through, plus a JSON-fixture implementation for local runs and tests.
//! The concrete remote service is out of scope; anything implementing
//! [`CatalogClient`] can be plugged in.

pub mod client;
pub mod error;
pub mod fixture;
pub mod types;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use fixture::FixtureCatalog;
pub use types::{
    CaseId, CaseRecord, ResultStatus, RunId, RunRecord, SectionId, SectionRecord, TestId,
    TestRecord,
};
