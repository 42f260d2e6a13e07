//! Diagnostic sinks.
//!
//! Recoverable failures never cross a [`crate::Toolkit`] call boundary; they
//! are handed to a [`Reporter`] instead. The owning service picks the sink
//! once at startup.

use std::sync::{Mutex, PoisonError};

use crate::error::UtilityError;

pub trait Reporter: Send + Sync {
    /// Free-form diagnostic line.
    fn info(&self, message: &str);

    /// Low-priority note about `operation`, off unless the config asks for it.
    fn debug(&self, operation: &'static str, message: &str);

    /// A recoverable failure inside `operation`.
    fn failure(&self, operation: &'static str, error: &UtilityError);
}

/// Emits through `tracing` under the `courier_util` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn info(&self, message: &str) {
        tracing::info!(target: "courier_util", "{message}");
    }

    fn debug(&self, operation: &'static str, message: &str) {
        tracing::debug!(target: "courier_util", operation, "{message}");
    }

    fn failure(&self, operation: &'static str, error: &UtilityError) {
        tracing::warn!(
            target: "courier_util",
            operation,
            kind = error.kind().as_str(),
            error = %error,
            "recovered from failure"
        );
    }
}

/// Keeps every line in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<String>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    fn push(&self, line: String) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
    }
}

impl Reporter for MemoryReporter {
    fn info(&self, message: &str) {
        self.push(message.to_string());
    }

    fn debug(&self, operation: &'static str, message: &str) {
        self.push(format!("{operation} [debug]: {message}"));
    }

    fn failure(&self, operation: &'static str, error: &UtilityError) {
        self.push(format!("{operation} [{}]: {error}", error.kind().as_str()));
    }
}
