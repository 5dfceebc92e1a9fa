//! Test-only helpers: a reporter that records its event stream.

use std::sync::Mutex;

use crate::reporter::Reporter;

/// One recorded reporter event, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReporterEvent {
    Suite(String),
    TestStarted(String),
    Info(String),
    Warning(String),
}

/// Reporter capturing events for assertions.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ReporterEvent>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<ReporterEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ReporterEvent::Warning(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ReporterEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}

impl Reporter for RecordingReporter {
    fn set_suite(&self, label: &str) {
        self.push(ReporterEvent::Suite(label.to_string()));
    }

    fn start_test(&self, label: &str) {
        self.push(ReporterEvent::TestStarted(label.to_string()));
    }

    fn log_info(&self, message: &str) {
        self.push(ReporterEvent::Info(message.to_string()));
    }

    fn log_warning(&self, message: &str) {
        self.push(ReporterEvent::Warning(message.to_string()));
    }
}
