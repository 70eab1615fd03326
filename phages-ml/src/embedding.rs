//! End-to-end genome embedding.
//!
//! [`GenomeEmbedder`] chains k-mer extraction and vocabulary-filtered
//! averaging, so a `sequence` table goes in and a `feature_*` table comes
//! out.

use phages_core::{FeatureTable, Result, SequenceTable};
use phages_seq::KmerExtractor;

use crate::config::PipelineConfig;
use crate::parallel::WorkPool;
use crate::transform::{GenomeAvgTransformer, KmerTransformer, Transformer};
use crate::vocabulary::Vocabulary;

/// K-mer extraction followed by genome-level averaging.
///
/// # Example
///
/// ```
/// use phages_core::SequenceTable;
/// use phages_ml::{GenomeEmbedder, KeyedVectors, Transformer, WorkPool};
/// use phages_seq::KmerExtractor;
///
/// let kv = KeyedVectors::from_pairs(1, [("ACGTAC", vec![4.0])]).unwrap();
/// let embedder = GenomeEmbedder::new(KmerExtractor::default(), &kv);
/// let table = SequenceTable::from_sequences(["ACGTACGTT"]);
/// let features = embedder.transform(&table, &WorkPool::sequential()).unwrap();
/// assert_eq!(features.row(0), Some([4.0].as_slice()));
/// ```
#[derive(Debug, Clone)]
pub struct GenomeEmbedder<V> {
    kmers: KmerTransformer,
    averager: GenomeAvgTransformer<V>,
}

impl<V: Vocabulary> GenomeEmbedder<V> {
    pub fn new(extractor: KmerExtractor, vocab: V) -> Self {
        Self {
            kmers: KmerTransformer::new(extractor),
            averager: GenomeAvgTransformer::new(vocab),
        }
    }

    /// Build from a validated [`PipelineConfig`].
    pub fn from_config(config: &PipelineConfig, vocab: V) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.extractor()?, vocab))
    }

    pub fn kmer_transformer(&self) -> &KmerTransformer {
        &self.kmers
    }

    pub fn averager(&self) -> &GenomeAvgTransformer<V> {
        &self.averager
    }

    /// Output dimensionality.
    pub fn dim(&self) -> usize {
        self.averager.dim()
    }

    /// Genome vector for a single sequence.
    pub fn embed_sequence(&self, seq: &str) -> Result<Vec<f64>> {
        self.averager
            .average_word_vectors(self.kmers.extractor().kmers(seq))
    }
}

impl<V: Vocabulary> Transformer for GenomeEmbedder<V> {
    type Input = SequenceTable;
    type Output = FeatureTable;

    fn transform(&self, table: &SequenceTable, pool: &WorkPool) -> Result<FeatureTable> {
        let kmer_rows = self.kmers.transform(table, pool)?;
        self.averager.transform(&kmer_rows, pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::KeyedVectors;
    use phages_core::PhagesError;

    fn vocab() -> KeyedVectors {
        KeyedVectors::from_pairs(
            2,
            [
                ("ACGTAC", vec![1.0, 2.0]),
                ("CGTACG", vec![3.0, 4.0]),
                ("GGGGGG", vec![-1.0, 0.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn embed_sequence_matches_batch() {
        let kv = vocab();
        let embedder = GenomeEmbedder::new(KmerExtractor::default(), &kv);
        let seqs = ["ACGTACGTT", "GGGGGGGG", "ACGTNACGTT", ""];
        let table = SequenceTable::from_sequences(seqs);
        let features = embedder
            .transform(&table, &WorkPool::with_threads(2).unwrap())
            .unwrap();

        assert_eq!(features.n_rows(), seqs.len());
        assert_eq!(features.dim(), 2);
        for (i, seq) in seqs.iter().enumerate() {
            let single = embedder.embed_sequence(seq).unwrap();
            assert_eq!(features.row(i), Some(single.as_slice()));
        }
        assert_eq!(features.row(0), Some([2.0, 3.0].as_slice()));
        assert_eq!(features.row(1), Some([-1.0, 0.0].as_slice()));
        assert_eq!(features.row(2), Some([0.0, 0.0].as_slice()));
        assert_eq!(features.row(3), Some([0.0, 0.0].as_slice()));
    }

    #[test]
    fn from_config_respects_k() {
        let kv = KeyedVectors::from_pairs(1, [("ACG", vec![2.0]), ("CGT", vec![4.0])]).unwrap();
        let config = PipelineConfig {
            k: 3,
            ..Default::default()
        };
        let embedder = GenomeEmbedder::from_config(&config, &kv).unwrap();
        assert_eq!(embedder.kmer_transformer().extractor().k(), 3);
        assert_eq!(embedder.embed_sequence("ACGT").unwrap(), vec![3.0]);
    }

    #[test]
    fn from_config_rejects_invalid() {
        let kv = vocab();
        let config = PipelineConfig {
            threads: 0,
            ..Default::default()
        };
        assert!(matches!(
            GenomeEmbedder::from_config(&config, &kv),
            Err(PhagesError::InvalidInput(_))
        ));
    }

    #[test]
    fn bad_schema_fails_before_averaging() {
        let kv = vocab();
        let embedder = GenomeEmbedder::new(KmerExtractor::default(), &kv);
        let table = SequenceTable::new(vec!["genome".into()], vec![vec!["ACGTAC".into()]]).unwrap();
        assert!(matches!(
            embedder.transform(&table, &WorkPool::sequential()),
            Err(PhagesError::Schema(_))
        ));
    }
}
