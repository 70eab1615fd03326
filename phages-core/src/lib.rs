//! Shared primitives for the phages genome-embedding toolkit.
//!
//! `phages-core` provides the foundation the other phages crates build on:
//!
//! - **Error types** — [`PhagesError`] and [`Result`] for structured error handling
//! - **Traits** — [`Sequence`], [`Annotated`], [`Summarizable`]
//! - **Tables** — [`SequenceTable`] input with schema validation and
//!   fixed-width [`FeatureTable`] output

pub mod error;
pub mod table;
pub mod traits;

pub use error::{PhagesError, Result, SchemaError};
pub use table::{feature_columns, FeatureTable, SequenceTable, SEQUENCE_COLUMN};
pub use traits::*;
