//! Diagnostic reporting.
//!
//! Refresh never fails from the caller's point of view. Every fetch or load
//! problem is turned into a `(Severity, message)` pair and handed to a
//! [`DiagnosticSink`]. The default sink forwards to `tracing`; hosts that want
//! to surface problems in their own UI can plug in a [`MemorySink`] or their
//! own implementation.

use std::sync::{Mutex, PoisonError};

use strum::{Display, IntoStaticStr};
use tracing::{error, warn};

/// Prefix attached to every message emitted through [`TracingSink`]
pub const LOG_CONTEXT: &str = "[PositionalManager]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
pub enum Severity {
    #[strum(serialize = "warning")]
    Warning,
    #[strum(serialize = "error")]
    Error,
}

/// Consumer of diagnostic messages
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, severity: Severity, message: &str);
}

/// Sink that forwards diagnostics to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Warning => warn!("{} {}", LOG_CONTEXT, message),
            Severity::Error => error!("{} {}", LOG_CONTEXT, message),
        }
    }
}

/// A recorded diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Sink that keeps every diagnostic in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything reported so far
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return everything reported so far
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, severity: Severity, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Diagnostic {
                severity,
                message: message.to_string(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.report(Severity::Warning, "remote unreachable");
        sink.report(Severity::Error, "bad row");

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].severity, Severity::Warning);
        assert_eq!(entries[1].message, "bad row");
        assert_eq!(sink.count(Severity::Error), 1);
    }

    #[test]
    fn test_memory_sink_take_drains() {
        let sink = MemorySink::new();
        sink.report(Severity::Error, "x");
        assert_eq!(sink.take().len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::Warning.to_string(), "warning");
        let label: &'static str = Severity::Error.into();
        assert_eq!(label, "error");
    }
}
