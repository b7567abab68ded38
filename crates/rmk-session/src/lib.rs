//! # rmk-session
//!
//! The resumable labeling session engine:
//! - [`LabelLedger`] — one dataset's labeling state, counters derived on
//!   demand from the label column so they can never drift
//! - [`BudgetPolicy`] — the bounded-unsure rule (default cap: 20)
//! - [`SessionController`] — the per-reviewer state machine mediating
//!   dataset selection, record presentation, and label submission
//!
//! Collaborators (identity, blob storage) stay behind the `rmk-remote`
//! traits; persistence runs in the background via `rmk-persist`.

pub mod controller;
pub mod error;
pub mod ledger;
pub mod policy;

pub use controller::{SessionController, SessionOptions, SessionPhase};
pub use error::SessionError;
pub use ledger::{LabelLedger, LedgerCounters};
pub use policy::{BudgetPolicy, DEFAULT_UNSURE_BUDGET};
