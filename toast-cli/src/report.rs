//! Per-row outcome collection for best-effort batch operations.
//!
//! Seeding and syncing never abort on a single bad row; instead every row's
//! outcome is recorded so the caller (and a test) can see exactly which
//! items failed rather than inferring it from swallowed errors.

use toast_link::LinkError;

/// Outcome of one best-effort row operation.
#[derive(Debug)]
pub struct RowOutcome {
    /// Human-readable identifier for the row (name or truncated id)
    pub label: String,

    /// The failure, if the operation failed
    pub error: Option<LinkError>,
}

impl RowOutcome {
    pub fn ok(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            error: None,
        }
    }

    pub fn failed(label: impl Into<String>, error: LinkError) -> Self {
        Self {
            label: label.into(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Accumulated outcomes of one batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<RowOutcome>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&mut self, label: impl Into<String>) {
        self.outcomes.push(RowOutcome::ok(label));
    }

    pub fn push_failed(&mut self, label: impl Into<String>, error: LinkError) {
        self.outcomes.push(RowOutcome::failed(label, error));
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }

    /// Labels of the rows that failed, in batch order.
    pub fn failed_labels(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_ok())
            .map(|o| o.label.as_str())
            .collect()
    }

    /// Fold another batch into this one.
    pub fn extend(&mut self, other: BatchReport) {
        self.outcomes.extend(other.outcomes);
    }
}
