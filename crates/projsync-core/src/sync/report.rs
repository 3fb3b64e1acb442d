//! Report of a sync pass

use serde::{Deserialize, Serialize};

/// Outcome of a full or incremental sync pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Artifacts whose content changed and were written
    pub written: Vec<String>,
    /// Artifacts already up to date
    pub unchanged: Vec<String>,
    /// Non-fatal problems, such as response file parse errors
    pub diagnostics: Vec<String>,
    /// Artifacts that could not be written
    pub errors: Vec<String>,
}

impl SyncReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every artifact was stored.
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the pass left the tree untouched.
    pub fn is_noop(&self) -> bool {
        self.written.is_empty()
    }

    /// Total artifacts considered.
    pub fn artifact_count(&self) -> usize {
        self.written.len() + self.unchanged.len() + self.errors.len()
    }

    pub fn with_diagnostic(mut self, diagnostic: impl Into<String>) -> Self {
        self.diagnostics.push(diagnostic.into());
        self
    }
}
