//! `kmers` and `embed` subcommands.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use phages_core::{SequenceTable, Summarizable};
use phages_ml::{load_word2vec, GenomeEmbedder, KmerTransformer, PipelineConfig, Transformer, Word2VecFormat};
use phages_seq::FastaReader;
use tracing::info;

use crate::InputArgs;

/// Load the input as a `sequence` table.
fn load_table(input: &InputArgs) -> Result<SequenceTable> {
    let table = match (&input.fasta, &input.table) {
        (Some(fasta), _) => {
            let reader = FastaReader::new(fasta);
            let table = if input.per_record {
                reader.to_record_table()
            } else {
                reader.to_table()
            };
            table.with_context(|| format!("reading FASTA {}", fasta.display()))?
        }
        (None, Some(csv)) => phages_io::read_sequence_table(csv)
            .with_context(|| format!("reading sequence table {}", csv.display()))?,
        (None, None) => anyhow::bail!("either --fasta or --table is required"),
    };
    info!("{}", table.summary());
    Ok(table)
}

pub fn kmers(input: &InputArgs, config: &PipelineConfig, out: &Path) -> Result<()> {
    let start = Instant::now();
    let table = load_table(input)?;
    let pool = config.work_pool()?;

    let kmt = KmerTransformer::new(config.extractor()?);
    let rows = kmt.transform(&table, &pool).context("extracting k-mers")?;

    phages_io::write_kmer_column(&rows, out)
        .with_context(|| format!("writing {}", out.display()))?;
    info!(
        rows = rows.len(),
        k = config.k,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "wrote k-mers to {}",
        out.display()
    );
    Ok(())
}

pub fn embed(
    input: &InputArgs,
    config: &PipelineConfig,
    vectors: &Path,
    format: Word2VecFormat,
    out: &Path,
) -> Result<()> {
    let start = Instant::now();
    let vocab = load_word2vec(vectors, format)
        .with_context(|| format!("loading word2vec model {}", vectors.display()))?;
    let table = load_table(input)?;
    let pool = config.work_pool()?;

    let embedder = GenomeEmbedder::from_config(config, &vocab)?;
    let features = embedder
        .transform(&table, &pool)
        .context("embedding sequences")?;

    phages_io::write_feature_table(&features, out)
        .with_context(|| format!("writing {}", out.display()))?;
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "{} written to {}",
        features.summary(),
        out.display()
    );
    Ok(())
}
