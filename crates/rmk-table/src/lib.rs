//! # rmk-table
//!
//! The record store adapter: loads CSV bytes into an in-memory [`Table`],
//! mutates cells in place, and serializes back to bytes with a deterministic
//! column order. `load(serialize(t)) == t` holds for every cell, including
//! cells this crate never touched — see [`Value`] for the token fidelity
//! rule that makes this true. The round trip is cell-level: the writer emits
//! LF line endings and minimal quoting, so input that used CRLF or
//! defensive quotes comes back equal in value, not byte for byte.
//!
//! Rows are identified by their 0-based position and are never reordered or
//! deleted; the only structural mutation is appending a new (all-empty)
//! column via [`Table::ensure_column`].

pub mod error;
pub mod value;

pub use error::TableError;
pub use value::Value;

/// One row of a table: an ordered mapping from column name to cell value,
/// identified by its 0-based position within the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub position: usize,
    pub fields: Vec<(String, Value)>,
}

/// An in-memory tabular dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Parse CSV bytes into a table.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Parse`] on invalid UTF-8, ragged rows, or a
    /// missing header row.
    pub fn load(bytes: &[u8]) -> Result<Self, TableError> {
        let mut reader = csv::Reader::from_reader(bytes);

        let headers = reader
            .headers()
            .map_err(|e| TableError::Parse(e.to_string()))?;
        let columns: Vec<String> = headers.iter().map(str::to_string).collect();
        if columns.is_empty() {
            return Err(TableError::Parse("no header row".to_string()));
        }

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| TableError::Parse(e.to_string()))?;
            rows.push(record.iter().map(Value::parse).collect());
        }

        Ok(Self { columns, rows })
    }

    /// Serialize back to CSV bytes. Columns are written in their original
    /// order (appended columns last), so output is deterministic.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Serialize`] if the CSV writer fails.
    pub fn serialize(&self) -> Result<Vec<u8>, TableError> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer
            .write_record(&self.columns)
            .map_err(|e| TableError::Serialize(e.to_string()))?;
        for row in &self.rows {
            writer
                .write_record(row.iter().map(Value::render))
                .map_err(|e| TableError::Serialize(e.to_string()))?;
        }

        writer
            .into_inner()
            .map_err(|e| TableError::Serialize(e.to_string()))
    }

    /// Number of data rows (excluding the header).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in serialization order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Index of a column by name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Index of `name`, appending an all-empty column if it does not exist.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(Value::Empty);
        }
        self.columns.len() - 1
    }

    /// Cell at (`row`, `column`), or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Overwrite the cell at (`row`, `column`).
    ///
    /// # Errors
    ///
    /// Returns [`TableError::OutOfBounds`] when the coordinates do not
    /// address an existing cell.
    pub fn set(&mut self, row: usize, column: usize, value: Value) -> Result<(), TableError> {
        let cell = self
            .rows
            .get_mut(row)
            .and_then(|r| r.get_mut(column))
            .ok_or_else(|| TableError::OutOfBounds(format!("row {row}, column {column}")))?;
        *cell = value;
        Ok(())
    }

    /// Materialize the row at `position` as a [`Record`].
    #[must_use]
    pub fn record(&self, position: usize) -> Option<Record> {
        let row = self.rows.get(position)?;
        Some(Record {
            position,
            fields: self
                .columns
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect(),
        })
    }
}
