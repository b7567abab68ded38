//! Session error taxonomy.
//!
//! Only [`SessionError::Load`] halts the labeling flow (terminal for that
//! dataset until the reviewer reselects). Everything else is local: the
//! session stays consistent and re-promptable after the error is shown.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// No dataset has been selected yet.
    #[error("no dataset selected")]
    NoDataset,

    /// The dataset could not be fetched, parsed, or accessed. Terminal for
    /// this dataset; the reviewer must reselect (or fix access) to retry.
    #[error("failed to load dataset '{dataset}': {reason}")]
    Load { dataset: String, reason: String },

    /// An `unsure` submission past the per-dataset cap. Recoverable — the
    /// reviewer picks a different label.
    #[error("unsure budget exhausted ({budget} per dataset)")]
    BudgetExceeded { budget: usize },

    /// The submission does not apply to the current cursor (dataset
    /// exhausted, or the record is already labeled). Recoverable.
    #[error("invalid submission: {0}")]
    InvalidSubmission(String),
}
