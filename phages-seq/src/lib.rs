//! Sequence reading and k-mer extraction for the phages toolkit.
//!
//! - **Alphabets** — [`Alphabet`] accepted-character sets (DNA by default)
//! - **FASTA reading** — [`FastaReader`] and [`parse_fasta_file`] with
//!   uppercase/trim normalisation
//! - **K-mer extraction** — [`KmerExtractor`], stride-1 sliding windows with
//!   per-window alphabet filtering
//!
//! # Example
//!
//! ```
//! use phages_seq::KmerExtractor;
//!
//! let kmt = KmerExtractor::new(6).unwrap();
//! assert_eq!(kmt.extract("ACGTACGTT"), "ACGTAC CGTACG GTACGT TACGTT");
//! ```

pub mod alphabet;
pub mod fasta;
pub mod kmer;

pub use alphabet::Alphabet;
pub use fasta::{normalize, parse_fasta_file, FastaReader, FastaRecord};
pub use kmer::{KmerExtractor, Kmers, DEFAULT_K};
