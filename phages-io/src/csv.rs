//! CSV reading of sequence tables and writing of pipeline outputs.

use std::fs::File;
use std::path::Path;

use ::csv::{ReaderBuilder, Writer};
use phages_core::{FeatureTable, PhagesError, Result, SequenceTable};

/// Column name used when writing k-mer strings.
pub const KMERS_COLUMN: &str = "kmers";

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        PhagesError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

fn create(path: &Path) -> Result<Writer<File>> {
    let file = File::create(path).map_err(|e| {
        PhagesError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })?;
    Ok(Writer::from_writer(file))
}

fn csv_err(e: ::csv::Error) -> PhagesError {
    PhagesError::Parse(e.to_string())
}

/// Read a CSV file with a header row into a [`SequenceTable`].
///
/// The header becomes the column list; no schema is enforced here, the
/// k-mer transformer validates it before use.
pub fn read_sequence_table(path: impl AsRef<Path>) -> Result<SequenceTable> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(open(path)?);

    let columns: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    SequenceTable::new(columns, rows)
}

/// Write a [`FeatureTable`] as CSV: a `feature_*` header, then one row per
/// sequence. No index column.
pub fn write_feature_table(table: &FeatureTable, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = create(path.as_ref())?;
    writer.write_record(table.columns()).map_err(csv_err)?;
    let mut fields = Vec::with_capacity(table.dim());
    for row in table.rows() {
        fields.clear();
        fields.extend(row.iter().map(|v| v.to_string()));
        writer.write_record(&fields).map_err(csv_err)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write one k-mer string per row under a single `kmers` column.
pub fn write_kmer_column<S: AsRef<str>>(rows: &[S], path: impl AsRef<Path>) -> Result<()> {
    let mut writer = create(path.as_ref())?;
    writer.write_record([KMERS_COLUMN]).map_err(csv_err)?;
    for row in rows {
        writer.write_record([row.as_ref()]).map_err(csv_err)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn read_sequence_csv() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "sequence").unwrap();
        writeln!(file, "ACGTACGTT").unwrap();
        writeln!(file, "GGGGGG").unwrap();
        file.flush().unwrap();

        let table = read_sequence_table(file.path()).unwrap();
        assert!(table.validate_schema().is_ok());
        let seqs: Vec<&str> = table.sequences().unwrap().collect();
        assert_eq!(seqs, vec!["ACGTACGTT", "GGGGGG"]);
    }

    #[test]
    fn read_keeps_extra_columns_for_validation() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "id,sequence").unwrap();
        writeln!(file, "phi,ACGT").unwrap();
        file.flush().unwrap();

        let table = read_sequence_table(file.path()).unwrap();
        assert_eq!(table.columns().len(), 2);
        assert!(table.validate_schema().is_err());
    }

    #[test]
    fn ragged_csv_is_parse_error() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "sequence").unwrap();
        writeln!(file, "ACGT,extra").unwrap();
        file.flush().unwrap();

        assert!(matches!(
            read_sequence_table(file.path()),
            Err(PhagesError::Parse(_))
        ));
    }

    #[test]
    fn write_features() {
        let table =
            FeatureTable::from_rows(2, vec![vec![2.0, 3.0], vec![0.0, -0.5]]).unwrap();
        let file = NamedTempFile::with_suffix(".csv").unwrap();
        write_feature_table(&table, file.path()).unwrap();

        let written = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(written, "feature_0,feature_1\n2,3\n0,-0.5\n");
    }

    #[test]
    fn write_kmers() {
        let file = NamedTempFile::with_suffix(".csv").unwrap();
        write_kmer_column(&["ACGTAC CGTACG", ""], file.path()).unwrap();

        let written = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(written, "kmers\nACGTAC CGTACG\n\"\"\n");
    }

    #[test]
    fn test_csv_file_not_found() {
        let result = read_sequence_table("/nonexistent/file.csv");
        assert!(matches!(result, Err(PhagesError::Io(_))));
    }
}
