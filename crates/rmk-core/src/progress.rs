//! Progress surface read by the UI layer.

use serde::{Deserialize, Serialize};

use crate::LabelValue;

/// Point-in-time view of a labeling session's progress.
///
/// Returned by the session controller after every successful submission and
/// on demand. `cursor` is the position of the next unlabeled record;
/// `cursor == total` means the dataset is exhausted. `allowed_labels` already
/// reflects the unsure budget, so the UI can render exactly the options the
/// controller will accept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub cursor: usize,
    pub total: usize,
    pub unsure_count: usize,
    pub accept_count: usize,
    pub reject_count: usize,
    pub allowed_labels: Vec<LabelValue>,
}

impl ProgressSnapshot {
    /// Total number of labeled records.
    #[must_use]
    pub const fn labeled_count(&self) -> usize {
        self.unsure_count + self.accept_count + self.reject_count
    }

    /// Whether every record has a label.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.cursor >= self.total
    }
}
