//! Reporting sink seam and handler error kinds.
//!
//! Reporter events are observational only and never gate control flow.
//! Handlers signal failure through [`HandlerError`]; the execution core
//! converts an `Assertion` into a Failed verdict and anything else into
//! an Error verdict.

use anyhow::Error;
use thiserror::Error as ThisError;
use tracing::{info, warn};

/// Structured reporting sink keyed by human labels.
pub trait Reporter {
    /// Announce the suite a test belongs to (run name + section path).
    fn set_suite(&self, label: &str);
    /// Announce the start of one test.
    fn start_test(&self, label: &str);
    fn log_info(&self, message: &str);
    fn log_warning(&self, message: &str);
}

/// Failure raised by a dispatched handler.
#[derive(Debug, ThisError)]
pub enum HandlerError {
    /// An explicit expectation check failed. The message is carried
    /// verbatim into the Failed verdict's comment.
    #[error("{0}")]
    Assertion(String),

    /// Anything else the handler ran into.
    #[error(transparent)]
    Other(#[from] Error),
}

/// Expectation check for handler bodies: returns an assertion error
/// carrying `message` when `condition` is false.
pub fn check(condition: bool, message: impl Into<String>) -> Result<(), HandlerError> {
    if condition {
        Ok(())
    } else {
        Err(HandlerError::Assertion(message.into()))
    }
}

/// Reporter that forwards events to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn set_suite(&self, label: &str) {
        info!(suite = label, "suite");
    }

    fn start_test(&self, label: &str) {
        info!(test = label, "test started");
    }

    fn log_info(&self, message: &str) {
        info!("{message}");
    }

    fn log_warning(&self, message: &str) {
        warn!("{message}");
    }
}
