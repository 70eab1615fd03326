//! Table interchange for the phages toolkit.
//!
//! - **CSV** — read [`SequenceTable`](phages_core::SequenceTable)s, write
//!   k-mer strings and [`FeatureTable`](phages_core::FeatureTable)s

pub mod csv;

pub use crate::csv::{read_sequence_table, write_feature_table, write_kmer_column, KMERS_COLUMN};
