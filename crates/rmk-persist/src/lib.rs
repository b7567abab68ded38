//! # rmk-persist
//!
//! The persistence coordinator: accepts full-ledger snapshots and flushes
//! them to the storage collaborator in the background, without ever blocking
//! the labeling loop.
//!
//! Ordering contract: snapshots for the **same dataset** are applied in
//! submission order and never overlap. Each dataset gets one worker task fed
//! by an unbounded channel; a single consumer per dataset makes ordering
//! structural rather than something to re-check. Snapshots are monotonic
//! supersets of each other, so a failed flush needs no retry of its own —
//! the next submission re-sends the full state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rmk_core::DatasetIdentity;
use rmk_remote::DatasetCatalog;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum PersistError {
    /// The coordinator has been shut down and accepts no further tasks.
    #[error("persistence coordinator is shut down")]
    ShutDown,
}

/// A fire-and-forget unit of work: one dataset's full serialized state at
/// submission time. Ownership moves to the coordinator on enqueue; the
/// caller must not assume the write has completed when it moves on.
#[derive(Debug)]
pub struct PersistenceTask {
    pub dataset: DatasetIdentity,
    pub snapshot: Vec<u8>,
}

struct DatasetWorker {
    sender: mpsc::UnboundedSender<PersistenceTask>,
    handle: JoinHandle<()>,
}

/// Owns one background flush worker per dataset identity.
///
/// Must be created and used inside a tokio runtime. Call
/// [`Self::shutdown`] before process exit so queued snapshots drain instead
/// of being dropped.
pub struct PersistenceCoordinator {
    catalog: Arc<dyn DatasetCatalog>,
    workers: Mutex<HashMap<String, DatasetWorker>>,
}

impl PersistenceCoordinator {
    #[must_use]
    pub fn new(catalog: Arc<dyn DatasetCatalog>) -> Self {
        Self {
            catalog,
            workers: Mutex::new(HashMap::new()),
        }
    }

    /// Schedule a snapshot flush. Non-blocking; returns as soon as the task
    /// is queued behind any earlier snapshots for the same dataset.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::ShutDown`] if the coordinator's workers are
    /// gone. Flush failures themselves are not reported here — they are
    /// logged by the worker and recovered by the next snapshot.
    ///
    /// # Panics
    ///
    /// Panics if the worker registry mutex is poisoned.
    pub fn enqueue(&self, task: PersistenceTask) -> Result<(), PersistError> {
        let mut workers = self.workers.lock().expect("worker registry poisoned");

        let worker = workers
            .entry(task.dataset.id.clone())
            .or_insert_with(|| Self::spawn_worker(Arc::clone(&self.catalog), &task.dataset));

        worker.sender.send(task).map_err(|_| PersistError::ShutDown)
    }

    fn spawn_worker(catalog: Arc<dyn DatasetCatalog>, dataset: &DatasetIdentity) -> DatasetWorker {
        let (sender, mut receiver) = mpsc::unbounded_channel::<PersistenceTask>();
        let dataset_name = dataset.name.clone();

        let handle = tokio::spawn(async move {
            while let Some(task) = receiver.recv().await {
                let size = task.snapshot.len();
                match catalog.store(&task.dataset, task.snapshot).await {
                    Ok(()) => debug!(dataset = %dataset_name, size, "snapshot flushed"),
                    // Not fatal: the in-memory ledger still holds the label
                    // and the next snapshot includes it.
                    Err(error) => warn!(dataset = %dataset_name, %error, "snapshot flush failed"),
                }
            }
        });

        DatasetWorker { sender, handle }
    }

    /// Drain all queued snapshots and stop the workers.
    ///
    /// # Panics
    ///
    /// Panics if the worker registry mutex is poisoned.
    pub async fn shutdown(self) {
        let workers = {
            let mut registry = self.workers.lock().expect("worker registry poisoned");
            std::mem::take(&mut *registry)
        };

        for (_, worker) in workers {
            // Closing the channel lets the worker finish its queue and exit.
            drop(worker.sender);
            if let Err(error) = worker.handle.await {
                warn!(%error, "persistence worker did not exit cleanly");
            }
        }
    }
}
