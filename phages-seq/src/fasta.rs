//! FASTA and multi-FASTA reading for genome and protein sequences.
//!
//! Records are normalised on read (uppercased, surrounding whitespace
//! trimmed) so they can go straight into k-mer extraction, which does no
//! case folding of its own. Parsing uses needletail for streaming reading.

use std::path::{Path, PathBuf};

use phages_core::{Annotated, PhagesError, Result, Sequence, SequenceTable, Summarizable};

/// Uppercase a raw sequence and strip surrounding whitespace.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// A single FASTA record with a normalised sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FastaRecord {
    name: String,
    description: Option<String>,
    sequence: String,
}

impl FastaRecord {
    /// Create a record, normalising `sequence`.
    pub fn new(name: String, description: Option<String>, sequence: &str) -> Self {
        Self {
            name,
            description,
            sequence: normalize(sequence),
        }
    }

    /// The normalised sequence.
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn into_sequence(self) -> String {
        self.sequence
    }
}

impl Sequence for FastaRecord {
    fn as_bytes(&self) -> &[u8] {
        self.sequence.as_bytes()
    }
}

impl Annotated for FastaRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Summarizable for FastaRecord {
    fn summary(&self) -> String {
        format!("FASTA {} ({} residues)", self.name, self.sequence.len())
    }
}

/// Parse a FASTA/multi-FASTA file into normalised records.
pub fn parse_fasta_file(path: impl AsRef<Path>) -> Result<Vec<FastaRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PhagesError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{}: no such file", path.display()),
        )));
    }
    let mut reader = needletail::parse_fastx_file(path)
        .map_err(|e| PhagesError::Parse(format!("{}: {}", path.display(), e)))?;

    let mut records = Vec::new();
    while let Some(record) = reader.next() {
        let record = record.map_err(|e| PhagesError::Parse(e.to_string()))?;

        let raw_id = std::str::from_utf8(record.id())
            .map_err(|e| PhagesError::Parse(e.to_string()))?;

        // Split "name description" on first whitespace
        let (name, description) = match raw_id.split_once(char::is_whitespace) {
            Some((n, d)) => (n.to_string(), Some(d.to_string())),
            None => (raw_id.to_string(), None),
        };

        let seq = record.seq();
        let raw = String::from_utf8_lossy(&seq);
        records.push(FastaRecord::new(name, description, &raw));
    }

    Ok(records)
}

/// Reader for a genome or protein FASTA file, producing tables for the
/// k-mer pipeline.
///
/// # Example
///
/// ```no_run
/// use phages_seq::FastaReader;
///
/// let reader = FastaReader::new("NC_001604.fasta");
/// let table = reader.to_table().unwrap();
/// assert_eq!(table.n_rows(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FastaReader {
    path: PathBuf,
}

impl FastaReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name of the FASTA file.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    /// All records in file order.
    pub fn records(&self) -> Result<Vec<FastaRecord>> {
        parse_fasta_file(&self.path)
    }

    /// The whole file as one sequence: normalised records joined by a single
    /// space. The separator never forms part of a valid k-mer, so no window
    /// spans two records.
    pub fn get_sequence(&self) -> Result<String> {
        let records = self.records()?;
        let joined = records
            .iter()
            .map(FastaRecord::sequence)
            .collect::<Vec<_>>()
            .join(" ");
        Ok(joined.trim().to_string())
    }

    /// One-row `sequence` table holding [`get_sequence`](Self::get_sequence).
    pub fn to_table(&self) -> Result<SequenceTable> {
        Ok(SequenceTable::from_sequences([self.get_sequence()?]))
    }

    /// `sequence` table with one row per record, in file order.
    pub fn to_record_table(&self) -> Result<SequenceTable> {
        let records = self.records()?;
        Ok(SequenceTable::from_sequences(
            records.into_iter().map(FastaRecord::into_sequence),
        ))
    }
}
