//! Row-oriented tables passed between the phages pipeline stages.
//!
//! A [`SequenceTable`] holds named string columns, one nucleotide sequence
//! per row in its canonical form. A [`FeatureTable`] holds one fixed-width
//! numeric vector per input row, with columns `feature_0 .. feature_{d-1}`.

use crate::error::{PhagesError, Result, SchemaError};
use crate::traits::Summarizable;

/// Name of the single column a sequence table must carry.
pub const SEQUENCE_COLUMN: &str = "sequence";

/// A table of named string columns.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawSequenceTable")
)]
pub struct SequenceTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Unchecked shape of a deserialized [`SequenceTable`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSequenceTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSequenceTable> for SequenceTable {
    type Error = PhagesError;

    fn try_from(raw: RawSequenceTable) -> Result<Self> {
        Self::new(raw.columns, raw.rows)
    }
}

impl SequenceTable {
    /// Build a table from column names and rows.
    ///
    /// # Errors
    ///
    /// Returns an error if any row's width differs from the number of columns.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(PhagesError::InvalidInput(format!(
                "row {} has {} field(s), table has {} column(s)",
                i,
                row.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Build the canonical single-column `sequence` table.
    pub fn from_sequences<I, S>(sequences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: vec![SEQUENCE_COLUMN.to_string()],
            rows: sequences.into_iter().map(|s| vec![s.into()]).collect(),
        }
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Check that the columns are exactly `[sequence]`.
    pub fn validate_schema(&self) -> std::result::Result<(), SchemaError> {
        if self.columns.len() != 1 {
            return Err(SchemaError::ColumnCount {
                expected: 1,
                found: self.columns.len(),
            });
        }
        if self.columns[0] != SEQUENCE_COLUMN {
            return Err(SchemaError::ColumnName {
                position: 0,
                expected: SEQUENCE_COLUMN.to_string(),
                found: self.columns[0].clone(),
            });
        }
        Ok(())
    }

    /// Iterate over the `sequence` column after validating the schema.
    pub fn sequences(&self) -> Result<impl Iterator<Item = &str> + '_> {
        self.validate_schema()?;
        Ok(self.rows.iter().map(|row| row[0].as_str()))
    }
}

impl Summarizable for SequenceTable {
    fn summary(&self) -> String {
        format!(
            "SequenceTable: {} row(s), columns [{}]",
            self.rows.len(),
            self.columns.join(", ")
        )
    }
}

/// Fixed-width table of f64 feature vectors, one row per input sequence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

/// Column names `feature_0 .. feature_{dim-1}`.
pub fn feature_columns(dim: usize) -> Vec<String> {
    (0..dim).map(|i| format!("feature_{}", i)).collect()
}

impl FeatureTable {
    /// An empty table with `dim` feature columns.
    pub fn new(dim: usize) -> Self {
        Self {
            columns: feature_columns(dim),
            rows: Vec::new(),
        }
    }

    /// Build a table from rows, each of which must have exactly `dim` values.
    pub fn from_rows(dim: usize, rows: Vec<Vec<f64>>) -> Result<Self> {
        let mut table = Self::new(dim);
        table.rows.reserve(rows.len());
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Append a row.
    ///
    /// # Errors
    ///
    /// Returns [`PhagesError::InvalidInput`] if the row width is not `dim`.
    pub fn push_row(&mut self, row: Vec<f64>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(PhagesError::InvalidInput(format!(
                "feature row has {} value(s), table has {} column(s)",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Embedding dimensionality (number of columns).
    pub fn dim(&self) -> usize {
        self.columns.len()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }
}

impl Summarizable for FeatureTable {
    fn summary(&self) -> String {
        format!(
            "FeatureTable: {} row(s) x {} feature(s)",
            self.rows.len(),
            self.columns.len()
        )
    }
}
