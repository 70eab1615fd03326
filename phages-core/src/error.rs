//! Structured error types for the phages toolkit.

use thiserror::Error;

/// Unified error type for all phages operations.
#[derive(Debug, Error)]
pub enum PhagesError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (malformed input data)
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Input table does not have the expected columns
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// An embedding lookup returned a vector of the wrong length
    #[error("vector for token {token:?} has {found} dimensions, expected {expected}")]
    DimensionMismatch {
        token: String,
        expected: usize,
        found: usize,
    },

    /// The vocabulary reports a token as known but yields no vector for it
    #[error("vocabulary contains {0:?} but has no vector for it")]
    MissingVector(String),

    /// Failure while processing a single row of a batch
    #[error("row {row}: {source}")]
    AtRow {
        row: usize,
        #[source]
        source: Box<PhagesError>,
    },

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl PhagesError {
    /// Attach the index of the batch row that produced this error.
    pub fn at_row(self, row: usize) -> Self {
        PhagesError::AtRow {
            row,
            source: Box::new(self),
        }
    }
}

/// Typed outcome of validating a table's columns against an expected schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("expected {expected} column(s), found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("column {position} is named {found:?}, expected {expected:?}")]
    ColumnName {
        position: usize,
        expected: String,
        found: String,
    },
}

/// Convenience alias used throughout the phages crates.
pub type Result<T> = std::result::Result<T, PhagesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_row_keeps_source() {
        let err = PhagesError::DimensionMismatch {
            token: "ACGTAC".into(),
            expected: 2,
            found: 3,
        }
        .at_row(7);
        let msg = err.to_string();
        assert!(msg.starts_with("row 7:"));
        assert!(msg.contains("ACGTAC"));
        match err {
            PhagesError::AtRow { row, source } => {
                assert_eq!(row, 7);
                assert!(matches!(*source, PhagesError::DimensionMismatch { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn schema_error_converts() {
        let err: PhagesError = SchemaError::ColumnCount {
            expected: 1,
            found: 2,
        }
        .into();
        assert!(matches!(err, PhagesError::Schema(_)));
    }
}
