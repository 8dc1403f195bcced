//! Reporting interface for pack runs
//!
//! The core never prints. Everything a user should see (warnings, per-entry
//! failures, progress) goes through a [`Reporter`], so front-ends decide how it
//! looks and tests can inspect what was said.

use std::cell::RefCell;

use crate::pack::PackProgress;

/// Severity of a reported message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Routine progress ("Added demo/cfg.json")
    Info,
    /// The run reached a successful end
    Success,
    /// Something is off but packing continues
    Warning,
    /// An entry, pattern or pack step failed
    Error,
}

impl Severity {
    /// Get a short label for this severity
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Receives messages and progress from a pack run
pub trait Reporter {
    /// Report one message
    fn report(&self, severity: Severity, message: &str);

    /// Progress update; ignored unless the reporter draws progress
    fn progress(&self, _progress: &PackProgress) {}
}

/// Forwards reports to `tracing` at the matching level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info | Severity::Success => tracing::info!("{message}"),
            Severity::Warning => tracing::warn!("{message}"),
            Severity::Error => tracing::error!("{message}"),
        }
    }

    fn progress(&self, progress: &PackProgress) {
        tracing::debug!(
            "{} ({}/{})",
            progress.phase.as_str(),
            progress.current,
            progress.total
        );
    }
}

/// Keeps every report in memory
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: RefCell<Vec<(Severity, String)>>,
    progress: RefCell<Vec<PackProgress>>,
}

impl RecordingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages in the order they were reported
    #[must_use]
    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.borrow().clone()
    }

    /// Messages of one severity
    #[must_use]
    pub fn messages_with(&self, severity: Severity) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// All progress updates in the order they were reported
    #[must_use]
    pub fn progress_updates(&self) -> Vec<PackProgress> {
        self.progress.borrow().clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, severity: Severity, message: &str) {
        self.messages
            .borrow_mut()
            .push((severity, message.to_string()));
    }

    fn progress(&self, progress: &PackProgress) {
        self.progress.borrow_mut().push(progress.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::PackPhase;

    #[test]
    fn test_recording_reporter_filters_by_severity() {
        let reporter = RecordingReporter::new();
        reporter.report(Severity::Info, "Added demo/a.json");
        reporter.report(Severity::Error, "error opening b.png");
        reporter.report(Severity::Info, "Added demo/c.json");
        reporter.progress(&PackProgress::new(PackPhase::Packing, 1, 2));

        assert_eq!(reporter.messages().len(), 3);
        assert_eq!(
            reporter.messages_with(Severity::Info),
            vec!["Added demo/a.json", "Added demo/c.json"]
        );
        assert_eq!(reporter.messages_with(Severity::Error), vec!["error opening b.png"]);
        assert_eq!(reporter.progress_updates().len(), 1);
    }

    #[test]
    fn test_tracing_reporter_accepts_every_severity() {
        let reporter = TracingReporter;
        for severity in [
            Severity::Info,
            Severity::Success,
            Severity::Warning,
            Severity::Error,
        ] {
            reporter.report(severity, severity.as_str());
        }
        reporter.progress(&PackProgress::new(PackPhase::Complete, 4, 4));
    }
}
