//! Catalog-synchronized execution suite.
//!
//! Resolves a named run from a remote test catalog into an ordered,
//! section-annotated list of execution units, dispatches each unit to a
//! registered handler by title match, and reports verdicts back to the
//! catalog. The pipeline is a single sequential pass:
//!
//! - **[`section`] / [`group`] / [`flatten`]**: synchronization — walk
//!   the catalog's section tree, bucket the run's cases by section
//!   path, and flatten the buckets into execution units.
//! - **[`registry`] / [`handlers`]**: the dispatch table — an owned
//!   registry of named handlers plus an ordered substring route table.
//! - **[`exec`] / [`outcome`] / [`report`]**: execution — one verdict
//!   and one best-effort result submission per unit, then an aggregate
//!   run report.

pub mod cli;
pub mod exec;
pub mod flatten;
pub mod group;
pub mod handlers;
pub mod logging;
pub mod outcome;
pub mod plan;
pub mod registry;
pub mod report;
pub mod reporter;
pub mod section;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
