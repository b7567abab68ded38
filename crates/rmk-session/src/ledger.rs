//! The label ledger: one dataset's in-memory labeling state.

use rmk_core::LabelValue;
use rmk_table::{Record, Table, TableError, Value};

/// Counts derived from the label column. `labeled()` always equals
/// `unsure + accept + reject` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerCounters {
    pub unsure: usize,
    pub accept: usize,
    pub reject: usize,
}

impl LedgerCounters {
    #[must_use]
    pub const fn labeled(&self) -> usize {
        self.unsure + self.accept + self.reject
    }
}

/// One dataset's records plus its designated label column.
///
/// The ledger is pure data: it owns the [`Table`], knows which column holds
/// labels, and derives counters and the resume cursor on demand by scanning
/// the column. Deriving (rather than caching) means the counters can never
/// drift from the actual column contents, whatever sequence of mutations
/// happened before.
///
/// Cells holding a value that is not a valid label code are treated as
/// unlabeled: the resume cursor lands on the first such row and a submission
/// overwrites it.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLedger {
    table: Table,
    label_column: usize,
}

impl LabelLedger {
    /// Wrap a loaded table, appending the label column if it is missing.
    #[must_use]
    pub fn new(mut table: Table, label_column: &str) -> Self {
        let label_column = table.ensure_column(label_column);
        Self {
            table,
            label_column,
        }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The label at `position`, or `None` when absent (or not a valid code).
    #[must_use]
    pub fn label_at(&self, position: usize) -> Option<LabelValue> {
        self.table
            .get(position, self.label_column)
            .and_then(Value::as_code)
            .and_then(LabelValue::from_code)
    }

    /// Write a label into the ledger.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::OutOfBounds`] when `position` is not a record.
    pub fn set_label(&mut self, position: usize, label: LabelValue) -> Result<(), TableError> {
        self.table
            .set(position, self.label_column, Value::Number(f64::from(label.code())))
    }

    /// Recompute counters by scanning the label column. O(n).
    #[must_use]
    pub fn counters(&self) -> LedgerCounters {
        let mut counters = LedgerCounters::default();
        for position in 0..self.len() {
            match self.label_at(position) {
                Some(LabelValue::Unsure) => counters.unsure += 1,
                Some(LabelValue::Accept) => counters.accept += 1,
                Some(LabelValue::Reject) => counters.reject += 1,
                None => {}
            }
        }
        counters
    }

    /// Smallest position with an absent label, or `len()` when every record
    /// is labeled. This is the whole resume mechanism: derived purely from
    /// the data, so a session can resume on any device after any
    /// interruption.
    #[must_use]
    pub fn resume_cursor(&self) -> usize {
        (0..self.len())
            .find(|&position| self.label_at(position).is_none())
            .unwrap_or_else(|| self.len())
    }

    /// The record at `position`, including its current label cell.
    #[must_use]
    pub fn record(&self, position: usize) -> Option<Record> {
        self.table.record(position)
    }

    /// Serialize the full ledger (all original columns plus labels) to CSV
    /// bytes for persistence.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Serialize`] if the CSV writer fails.
    pub fn serialize(&self) -> Result<Vec<u8>, TableError> {
        self.table.serialize()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn ledger_from_csv(csv: &[u8]) -> LabelLedger {
        LabelLedger::new(Table::load(csv).unwrap(), "RA_AI_Labels")
    }

    fn fresh(rows: usize) -> LabelLedger {
        let mut csv = String::from("id\n");
        for i in 0..rows {
            csv.push_str(&format!("{i}\n"));
        }
        ledger_from_csv(csv.as_bytes())
    }

    #[test]
    fn missing_label_column_is_created_empty() {
        let ledger = fresh(5);
        assert_eq!(ledger.len(), 5);
        assert_eq!(ledger.resume_cursor(), 0);
        assert_eq!(ledger.counters(), LedgerCounters::default());
    }

    #[test]
    fn counters_track_every_mutation() {
        let mut ledger = fresh(6);
        let sequence = [
            LabelValue::Accept,
            LabelValue::Unsure,
            LabelValue::Reject,
            LabelValue::Accept,
        ];

        for (position, label) in sequence.into_iter().enumerate() {
            let before = ledger.counters().labeled();
            ledger.set_label(position, label).unwrap();
            let counters = ledger.counters();
            // labeled count rises by exactly one per submission and the sum
            // invariant holds at every step
            assert_eq!(counters.labeled(), before + 1);
            assert_eq!(
                counters.labeled(),
                counters.unsure + counters.accept + counters.reject
            );
        }

        let counters = ledger.counters();
        assert_eq!(counters.accept, 2);
        assert_eq!(counters.unsure, 1);
        assert_eq!(counters.reject, 1);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    fn resume_cursor_is_first_unlabeled_position(#[case] k: usize) {
        let mut ledger = fresh(5);
        for position in 0..k {
            ledger.set_label(position, LabelValue::Accept).unwrap();
        }
        assert_eq!(ledger.resume_cursor(), k);
    }

    #[test]
    fn resume_cursor_skips_nothing_on_gaps() {
        let mut ledger = fresh(5);
        ledger.set_label(0, LabelValue::Accept).unwrap();
        ledger.set_label(2, LabelValue::Reject).unwrap();
        // position 1 is the first hole
        assert_eq!(ledger.resume_cursor(), 1);
    }

    #[test]
    fn invalid_codes_count_as_unlabeled() {
        let ledger = ledger_from_csv(b"id,RA_AI_Labels\n1,5\n2,1\n3,\n");
        assert_eq!(ledger.label_at(0), None);
        assert_eq!(ledger.label_at(1), Some(LabelValue::Accept));
        assert_eq!(ledger.resume_cursor(), 0);
        assert_eq!(ledger.counters().labeled(), 1);
    }

    #[test]
    fn float_rendered_labels_resume_correctly() {
        // Files previously labeled by float-writing tools carry "1.0"-style
        // codes; resuming must not restart at row 0 or recount the budget.
        let ledger = ledger_from_csv(b"id,RA_AI_Labels\n1,1.0\n2,9.0\n3,0.0\n4,\n");
        let counters = ledger.counters();
        assert_eq!(counters.accept, 1);
        assert_eq!(counters.unsure, 1);
        assert_eq!(counters.reject, 1);
        assert_eq!(ledger.resume_cursor(), 3);

        // the original tokens stay intact in the flushed snapshot
        let bytes = ledger.serialize().unwrap();
        assert_eq!(bytes, b"id,RA_AI_Labels\n1,1.0\n2,9.0\n3,0.0\n4,\n");
    }

    #[test]
    fn existing_label_column_is_reused() {
        let ledger = ledger_from_csv(b"id,RA_AI_Labels\n1,0\n2,9\n3,\n");
        let counters = ledger.counters();
        assert_eq!(counters.reject, 1);
        assert_eq!(counters.unsure, 1);
        assert_eq!(ledger.resume_cursor(), 2);
    }

    #[test]
    fn serialize_round_trips_labels() {
        let mut ledger = fresh(3);
        ledger.set_label(0, LabelValue::Unsure).unwrap();
        let bytes = ledger.serialize().unwrap();

        let reloaded = LabelLedger::new(Table::load(&bytes).unwrap(), "RA_AI_Labels");
        assert_eq!(reloaded, ledger);
        assert_eq!(reloaded.label_at(0), Some(LabelValue::Unsure));
        assert_eq!(reloaded.label_at(1), None);
    }
}
