//! The session controller: per-connection state machine for one reviewer.

use std::sync::Arc;

use rmk_core::{DatasetIdentity, LabelValue, ProgressSnapshot};
use rmk_persist::{PersistenceCoordinator, PersistenceTask};
use rmk_remote::DatasetCatalog;
use rmk_table::{Record, Table};
use tracing::{info, warn};

use crate::error::SessionError;
use crate::ledger::LabelLedger;
use crate::policy::{BudgetPolicy, DEFAULT_UNSURE_BUDGET};

/// Observable phase of a session.
///
/// ```text
/// NoDatasetSelected → Labeling (cursor < len) → Exhausted (cursor == len)
/// ```
///
/// Ledger loading happens inside [`SessionController::select_dataset`] and is
/// not observable as a phase; a load failure leaves the session back in
/// `NoDatasetSelected` until the reviewer reselects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NoDatasetSelected,
    Labeling,
    Exhausted,
}

/// Per-connection session state: the selected dataset, the cursor, and the
/// cached ledger. An explicit value owned by exactly one controller — never
/// shared, never ambient.
#[derive(Debug, Default)]
struct SessionState {
    dataset: Option<DatasetIdentity>,
    cursor: usize,
    ledger: Option<LabelLedger>,
}

/// Tunables carried from configuration into a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Name of the shared label column written into each dataset.
    pub label_column: String,
    /// Per-dataset cap on `unsure` labels.
    pub unsure_budget: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            label_column: String::from("RA_AI_Labels"),
            unsure_budget: DEFAULT_UNSURE_BUDGET,
        }
    }
}

/// Owns one reviewer's labeling session.
///
/// All transitions go through `&mut self`, so submissions within a session
/// are serialized by construction: a submission completes (ledger mutation,
/// cursor advance, persistence enqueue) before the next one is accepted.
/// Rendering the next record never waits on network I/O — flushes run in the
/// background via the [`PersistenceCoordinator`].
pub struct SessionController {
    catalog: Arc<dyn DatasetCatalog>,
    coordinator: PersistenceCoordinator,
    policy: BudgetPolicy,
    label_column: String,
    state: SessionState,
}

impl SessionController {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn DatasetCatalog>,
        coordinator: PersistenceCoordinator,
        options: SessionOptions,
    ) -> Self {
        Self {
            catalog,
            coordinator,
            policy: BudgetPolicy::new(options.unsure_budget),
            label_column: options.label_column,
            state: SessionState::default(),
        }
    }

    /// The currently selected dataset, if any.
    #[must_use]
    pub const fn dataset(&self) -> Option<&DatasetIdentity> {
        self.state.dataset.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match &self.state.ledger {
            None => SessionPhase::NoDatasetSelected,
            Some(ledger) if self.state.cursor < ledger.len() => SessionPhase::Labeling,
            Some(_) => SessionPhase::Exhausted,
        }
    }

    /// Select a dataset and materialize its ledger.
    ///
    /// Idempotent when `dataset` equals the current selection: no reload, no
    /// cursor reset. Otherwise the cached ledger and cursor are discarded
    /// first, then the new ledger is loaded and the cursor is set to the
    /// resume position (the first unlabeled record).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Load`] when the bytes cannot be fetched
    /// (including authorization failures, which the collaborator reports as
    /// fetch errors) or parsed. The failure is terminal for this dataset:
    /// the session drops back to no-selection and the reviewer must
    /// reselect.
    pub async fn select_dataset(
        &mut self,
        dataset: DatasetIdentity,
    ) -> Result<ProgressSnapshot, SessionError> {
        if self.state.dataset.as_ref() == Some(&dataset) && self.state.ledger.is_some() {
            return self.progress();
        }

        // Evict before loading so a failure cannot leave a stale ledger
        // behind a new identity.
        self.state = SessionState::default();

        let ledger = self.materialize(&dataset).await?;
        let cursor = ledger.resume_cursor();
        info!(dataset = %dataset.name, rows = ledger.len(), cursor, "dataset selected");

        self.state = SessionState {
            dataset: Some(dataset),
            cursor,
            ledger: Some(ledger),
        };
        self.progress()
    }

    /// Explicitly re-fetch and re-materialize the current dataset, e.g.
    /// after an out-of-band edit. This is the only cache invalidation besides
    /// switching datasets.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoDataset`] when nothing is selected, otherwise the
    /// same failure modes as [`Self::select_dataset`].
    pub async fn reload(&mut self) -> Result<ProgressSnapshot, SessionError> {
        let dataset = self.state.dataset.take().ok_or(SessionError::NoDataset)?;
        self.state = SessionState::default();
        self.select_dataset(dataset).await
    }

    async fn materialize(&self, dataset: &DatasetIdentity) -> Result<LabelLedger, SessionError> {
        let bytes =
            self.catalog
                .fetch(dataset)
                .await
                .map_err(|error| SessionError::Load {
                    dataset: dataset.name.clone(),
                    reason: error.to_string(),
                })?;
        let table = Table::load(&bytes).map_err(|error| SessionError::Load {
            dataset: dataset.name.clone(),
            reason: error.to_string(),
        })?;
        Ok(LabelLedger::new(table, &self.label_column))
    }

    /// The record at the cursor, or `Ok(None)` when the dataset is
    /// exhausted.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoDataset`] when nothing is selected.
    pub fn current_record(&self) -> Result<Option<Record>, SessionError> {
        let ledger = self.state.ledger.as_ref().ok_or(SessionError::NoDataset)?;
        Ok(ledger.record(self.state.cursor))
    }

    /// Submit a label for the record at the cursor.
    ///
    /// The single state-mutating transition of the system. On success the
    /// label is written, the cursor advances by exactly one, and a snapshot
    /// of the full ledger is queued for background persistence; the caller
    /// observes either all of that or none of it.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NoDataset`] — nothing selected.
    /// - [`SessionError::InvalidSubmission`] — cursor past the end or the
    ///   record already labeled.
    /// - [`SessionError::BudgetExceeded`] — `unsure` past the cap.
    ///
    /// All of these leave the session unchanged and re-promptable.
    pub fn submit_label(&mut self, value: LabelValue) -> Result<ProgressSnapshot, SessionError> {
        let dataset = self
            .state
            .dataset
            .clone()
            .ok_or(SessionError::NoDataset)?;
        let cursor = self.state.cursor;
        let ledger = self.state.ledger.as_mut().ok_or(SessionError::NoDataset)?;

        if cursor >= ledger.len() {
            return Err(SessionError::InvalidSubmission(format!(
                "dataset exhausted ({} records, all labeled)",
                ledger.len()
            )));
        }
        if ledger.label_at(cursor).is_some() {
            return Err(SessionError::InvalidSubmission(format!(
                "record {cursor} is already labeled"
            )));
        }
        let counters = ledger.counters();
        if !self.policy.permits(value, counters.unsure) {
            return Err(SessionError::BudgetExceeded {
                budget: self.policy.budget(),
            });
        }

        ledger
            .set_label(cursor, value)
            .map_err(|error| SessionError::InvalidSubmission(error.to_string()))?;
        self.state.cursor += 1;

        // Fire-and-forget: a failure here is recovered by the next
        // submission's snapshot, which includes this label too.
        match ledger.serialize() {
            Ok(snapshot) => {
                if let Err(error) = self.coordinator.enqueue(PersistenceTask {
                    dataset: dataset.clone(),
                    snapshot,
                }) {
                    warn!(dataset = %dataset.name, %error, "could not queue snapshot");
                }
            }
            Err(error) => {
                warn!(dataset = %dataset.name, %error, "could not serialize snapshot");
            }
        }

        self.progress()
    }

    /// Current progress: cursor, totals, per-label counts, and the label set
    /// the next submission may use.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoDataset`] when nothing is selected.
    pub fn progress(&self) -> Result<ProgressSnapshot, SessionError> {
        let ledger = self.state.ledger.as_ref().ok_or(SessionError::NoDataset)?;
        let counters = ledger.counters();
        Ok(ProgressSnapshot {
            cursor: self.state.cursor,
            total: ledger.len(),
            unsure_count: counters.unsure,
            accept_count: counters.accept,
            reject_count: counters.reject,
            allowed_labels: self.policy.allowed_labels(counters.unsure),
        })
    }

    /// End the session, draining any queued persistence work.
    pub async fn shutdown(self) {
        self.coordinator.shutdown().await;
    }
}
