//! End-to-end session scenarios over an in-memory object store.

use std::sync::Arc;

use object_store::ObjectStore;
use object_store::memory::InMemory;
use object_store::path::Path;
use pretty_assertions::assert_eq;
use rmk_core::{DatasetIdentity, LabelValue};
use rmk_persist::PersistenceCoordinator;
use rmk_remote::{DatasetCatalog, ObjectStoreCatalog};
use rmk_session::{SessionController, SessionError, SessionOptions, SessionPhase};
use rmk_table::Table;

struct Harness {
    controller: SessionController,
    catalog: Arc<ObjectStoreCatalog>,
}

async fn harness(seed: &[(&str, &str)]) -> Harness {
    let store = InMemory::new();
    for (key, body) in seed {
        store
            .put(&Path::parse(*key).unwrap(), body.as_bytes().to_vec().into())
            .await
            .unwrap();
    }

    let catalog = Arc::new(ObjectStoreCatalog::new(Arc::new(store), "").unwrap());
    let catalog_dyn: Arc<dyn DatasetCatalog> = Arc::clone(&catalog) as _;
    let coordinator =
        PersistenceCoordinator::new(Arc::clone(&catalog_dyn));
    let controller = SessionController::new(
        Arc::clone(&catalog_dyn),
        coordinator,
        SessionOptions::default(),
    );
    Harness {
        controller,
        catalog,
    }
}

fn dataset(name: &str) -> DatasetIdentity {
    DatasetIdentity::new(name, name)
}

const FRESH_FIVE: &str = "id,text\n1,a\n2,b\n3,c\n4,d\n5,e\n";

/// Scenario A: fresh dataset, no label column.
#[tokio::test]
async fn fresh_dataset_starts_at_zero_and_accept_advances() {
    let mut h = harness(&[("animals.csv", FRESH_FIVE)]).await;

    let progress = h
        .controller
        .select_dataset(dataset("animals.csv"))
        .await
        .unwrap();
    assert_eq!(progress.cursor, 0);
    assert_eq!(progress.total, 5);
    assert_eq!(h.controller.phase(), SessionPhase::Labeling);

    let record = h.controller.current_record().unwrap().unwrap();
    assert_eq!(record.position, 0);

    let progress = h.controller.submit_label(LabelValue::Accept).unwrap();
    assert_eq!(progress.cursor, 1);
    assert_eq!(progress.accept_count, 1);
    assert_eq!(progress.labeled_count(), 1);

    // row 0 carries the label; the flushed bytes agree with memory
    h.controller.shutdown().await;
    let bytes = h.catalog.fetch(&dataset("animals.csv")).await.unwrap();
    let table = Table::load(&bytes).unwrap();
    let label_col = table.column_index("RA_AI_Labels").unwrap();
    assert_eq!(table.get(0, label_col).unwrap().render(), "1");
    assert_eq!(table.get(1, label_col).unwrap().render(), "");
}

/// Scenario B: the unsure budget is already spent.
#[tokio::test]
async fn exhausted_unsure_budget_rejects_unsure() {
    let mut csv = String::from("id,RA_AI_Labels\n");
    for i in 0..20 {
        csv.push_str(&format!("{i},9\n"));
    }
    csv.push_str("20,\n");
    let mut h = harness(&[("hard.csv", &csv)]).await;

    let progress = h.controller.select_dataset(dataset("hard.csv")).await.unwrap();
    assert_eq!(progress.unsure_count, 20);
    assert_eq!(progress.cursor, 20);
    assert_eq!(
        progress.allowed_labels,
        vec![LabelValue::Reject, LabelValue::Accept]
    );

    let err = h.controller.submit_label(LabelValue::Unsure).unwrap_err();
    assert!(matches!(err, SessionError::BudgetExceeded { budget: 20 }));
    // cursor unchanged, session still re-promptable
    assert_eq!(h.controller.progress().unwrap().cursor, 20);

    let progress = h.controller.submit_label(LabelValue::Reject).unwrap();
    assert_eq!(progress.cursor, 21);
    h.controller.shutdown().await;
}

/// Scenario C: fully labeled dataset.
#[tokio::test]
async fn exhausted_dataset_signals_and_rejects_submissions() {
    let mut h = harness(&[("done.csv", "id,RA_AI_Labels\n1,0\n2,1\n")]).await;

    let progress = h.controller.select_dataset(dataset("done.csv")).await.unwrap();
    assert_eq!(progress.cursor, 2);
    assert!(progress.is_exhausted());
    assert_eq!(h.controller.phase(), SessionPhase::Exhausted);
    assert_eq!(h.controller.current_record().unwrap(), None);

    let err = h.controller.submit_label(LabelValue::Accept).unwrap_err();
    assert!(matches!(err, SessionError::InvalidSubmission(_)));
    h.controller.shutdown().await;
}

/// Scenario D: sequential submissions flush in order; the final stored
/// snapshot contains both labels.
#[tokio::test]
async fn final_snapshot_contains_all_labels() {
    let mut h = harness(&[("animals.csv", FRESH_FIVE)]).await;
    h.controller
        .select_dataset(dataset("animals.csv"))
        .await
        .unwrap();

    h.controller.submit_label(LabelValue::Accept).unwrap();
    h.controller.submit_label(LabelValue::Reject).unwrap();
    h.controller.shutdown().await;

    let bytes = h.catalog.fetch(&dataset("animals.csv")).await.unwrap();
    let table = Table::load(&bytes).unwrap();
    let label_col = table.column_index("RA_AI_Labels").unwrap();
    assert_eq!(table.get(0, label_col).unwrap().render(), "1");
    assert_eq!(table.get(1, label_col).unwrap().render(), "0");
    assert_eq!(table.get(2, label_col).unwrap().render(), "");
}

/// Resume: labels present for [0, k) put the cursor at exactly k, and
/// cursor == labeled count at every step when there are no gaps.
#[tokio::test]
async fn resume_picks_up_where_labeling_stopped() {
    let mut h = harness(&[("partial.csv", "id,RA_AI_Labels\n1,1\n2,0\n3,\n4,\n")]).await;

    let progress = h
        .controller
        .select_dataset(dataset("partial.csv"))
        .await
        .unwrap();
    assert_eq!(progress.cursor, 2);
    assert_eq!(progress.labeled_count(), 2);

    let mut previous_unsure = progress.unsure_count;
    for label in [LabelValue::Unsure, LabelValue::Accept] {
        let progress = h.controller.submit_label(label).unwrap();
        assert_eq!(progress.cursor, progress.labeled_count());
        // unsure count never decreases across a session
        assert!(progress.unsure_count >= previous_unsure);
        previous_unsure = progress.unsure_count;
    }

    assert_eq!(h.controller.phase(), SessionPhase::Exhausted);
    h.controller.shutdown().await;
}

/// Reselecting the same dataset is a no-op; selecting another resets state.
#[tokio::test]
async fn reselection_is_idempotent_and_switching_resets() {
    let mut h = harness(&[
        ("a.csv", FRESH_FIVE),
        ("b.csv", "id\n1\n2\n"),
    ])
    .await;

    h.controller.select_dataset(dataset("a.csv")).await.unwrap();
    h.controller.submit_label(LabelValue::Accept).unwrap();

    // same identity: no reload, no cursor reset
    let progress = h.controller.select_dataset(dataset("a.csv")).await.unwrap();
    assert_eq!(progress.cursor, 1);

    // different identity: fresh ledger and cursor
    let progress = h.controller.select_dataset(dataset("b.csv")).await.unwrap();
    assert_eq!(progress.cursor, 0);
    assert_eq!(progress.total, 2);
    h.controller.shutdown().await;
}

/// Load failures are terminal: the session falls back to no-selection.
#[tokio::test]
async fn load_failures_require_reselection() {
    let mut h = harness(&[("bad.csv", "id,text\n1\n")]).await;

    let err = h
        .controller
        .select_dataset(dataset("missing.csv"))
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::Load { .. }));
    assert_eq!(h.controller.phase(), SessionPhase::NoDatasetSelected);

    // malformed bytes surface the same way
    let err = h.controller.select_dataset(dataset("bad.csv")).await.unwrap_err();
    assert!(matches!(err, SessionError::Load { .. }));
    assert!(matches!(
        h.controller.current_record().unwrap_err(),
        SessionError::NoDataset
    ));
    h.controller.shutdown().await;
}

/// Explicit reload re-fetches the current dataset's bytes; nothing else
/// invalidates the cached ledger.
#[tokio::test]
async fn reload_rematerializes_from_the_store() {
    let mut h = harness(&[("a.csv", "id\n1\n2\n3\n")]).await;

    assert!(matches!(
        h.controller.reload().await.unwrap_err(),
        SessionError::NoDataset
    ));

    let progress = h.controller.select_dataset(dataset("a.csv")).await.unwrap();
    assert_eq!(progress.total, 3);

    // out-of-band edit grows the dataset; the cached ledger does not see it
    h.catalog
        .store(&dataset("a.csv"), b"id\n1\n2\n3\n4\n".to_vec())
        .await
        .unwrap();
    assert_eq!(h.controller.progress().unwrap().total, 3);

    let progress = h.controller.reload().await.unwrap();
    assert_eq!(progress.total, 4);
    h.controller.shutdown().await;
}
