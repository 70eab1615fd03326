//! Batch transformers: k-mer extraction and vocabulary-filtered averaging.
//!
//! [`KmerTransformer`] turns a `sequence` table into one space-joined k-mer
//! string per row. [`GenomeAvgTransformer`] turns those strings into
//! fixed-length genome vectors: each vector is the centroid of the row's
//! in-vocabulary k-mers in embedding space, or all zeros when none of them
//! is known.

use phages_core::{FeatureTable, PhagesError, Result, SequenceTable};
use phages_seq::KmerExtractor;
use tracing::{debug, warn};

use crate::parallel::WorkPool;
use crate::vocabulary::Vocabulary;

/// A batch transform stage.
pub trait Transformer {
    type Input: ?Sized;
    type Output;

    /// Transform a whole batch, distributing rows over `pool`.
    fn transform(&self, input: &Self::Input, pool: &WorkPool) -> Result<Self::Output>;
}

/// Extracts k-mer strings from every row of a `sequence` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KmerTransformer {
    extractor: KmerExtractor,
}

impl KmerTransformer {
    pub fn new(extractor: KmerExtractor) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &KmerExtractor {
        &self.extractor
    }
}

impl Transformer for KmerTransformer {
    type Input = SequenceTable;
    type Output = Vec<String>;

    /// One k-mer string per input row, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`PhagesError::Schema`] if the table's columns are not exactly
    /// `[sequence]`. The schema is checked once for the whole batch.
    fn transform(&self, table: &SequenceTable, pool: &WorkPool) -> Result<Vec<String>> {
        table.validate_schema()?;
        debug!(
            rows = table.n_rows(),
            k = self.extractor.k(),
            threads = pool.threads(),
            "extracting k-mers"
        );
        Ok(pool.map(table.rows(), |_, row| self.extractor.extract(&row[0])))
    }
}

/// Averages k-mer embeddings into one vector per genome.
///
/// Works with any [`Vocabulary`]; pass a reference to share one loaded model
/// between several transformers.
#[derive(Debug, Clone)]
pub struct GenomeAvgTransformer<V> {
    vocab: V,
    columns: Vec<String>,
}

impl<V: Vocabulary> GenomeAvgTransformer<V> {
    pub fn new(vocab: V) -> Self {
        let columns = phages_core::feature_columns(vocab.dim());
        Self { vocab, columns }
    }

    pub fn vocabulary(&self) -> &V {
        &self.vocab
    }

    /// Output dimensionality.
    pub fn dim(&self) -> usize {
        self.columns.len()
    }

    /// Output column names, `feature_0 .. feature_{dim-1}`.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Mean embedding of the in-vocabulary `words`; zeros if none is known.
    ///
    /// # Errors
    ///
    /// Returns [`PhagesError::DimensionMismatch`] if the vocabulary hands
    /// back a vector of the wrong length, and [`PhagesError::MissingVector`]
    /// if it reports a token as known but has no vector for it.
    ///
    /// # Example
    ///
    /// ```
    /// use phages_ml::{GenomeAvgTransformer, KeyedVectors};
    ///
    /// let kv = KeyedVectors::from_pairs(
    ///     2,
    ///     [("ACGTAC", vec![1.0, 2.0]), ("CGTACG", vec![3.0, 4.0])],
    /// ).unwrap();
    /// let avg = GenomeAvgTransformer::new(&kv);
    /// let v = avg.average_word_vectors(["ACGTAC", "CGTACG", "ZZZZZZ"]).unwrap();
    /// assert_eq!(v, vec![2.0, 3.0]);
    /// ```
    pub fn average_word_vectors<'w, I>(&self, words: I) -> Result<Vec<f64>>
    where
        I: IntoIterator<Item = &'w str>,
    {
        self.average_counted(words).map(|(mean, _)| mean)
    }

    /// Mean vector plus the number of tokens that contributed to it.
    fn average_counted<'w, I>(&self, words: I) -> Result<(Vec<f64>, usize)>
    where
        I: IntoIterator<Item = &'w str>,
    {
        let dim = self.dim();
        let mut sum = vec![0.0f64; dim];
        let mut n = 0usize;

        for word in words {
            if !self.vocab.contains(word) {
                continue;
            }
            let vector = self
                .vocab
                .vector_of(word)
                .ok_or_else(|| PhagesError::MissingVector(word.to_string()))?;
            if vector.len() != dim {
                return Err(PhagesError::DimensionMismatch {
                    token: word.to_string(),
                    expected: dim,
                    found: vector.len(),
                });
            }

            n += 1;
            for (acc, &x) in sum.iter_mut().zip(vector) {
                *acc += f64::from(x);
            }
        }

        if n > 0 {
            let count = n as f64;
            sum.iter_mut().for_each(|acc| *acc /= count);
        }
        Ok((sum, n))
    }

    /// One mean vector per k-mer string, in input order.
    ///
    /// Each string is split on whitespace into k-mer tokens. Errors carry the
    /// index of the failing row.
    pub fn averaged_word_vectorizer<S>(&self, rows: &[S], pool: &WorkPool) -> Result<Vec<Vec<f64>>>
    where
        S: AsRef<str> + Sync,
    {
        debug!(
            rows = rows.len(),
            dim = self.dim(),
            vocabulary = self.vocab.len(),
            threads = pool.threads(),
            "averaging k-mer embeddings"
        );
        let averaged = pool.try_map(rows, |i, row| {
            self.average_counted(row.as_ref().split_whitespace())
                .map_err(|e| e.at_row(i))
        })?;

        let misses = averaged.iter().filter(|(_, n)| *n == 0).count();
        if !rows.is_empty() && misses == rows.len() {
            warn!(
                rows = rows.len(),
                "no k-mer of any sequence is in the vocabulary, all vectors are zero"
            );
        } else if misses > 0 {
            debug!(rows = misses, "sequences without in-vocabulary k-mers");
        }

        Ok(averaged.into_iter().map(|(mean, _)| mean).collect())
    }
}

impl<V: Vocabulary> Transformer for GenomeAvgTransformer<V> {
    type Input = [String];
    type Output = FeatureTable;

    fn transform(&self, kmer_rows: &[String], pool: &WorkPool) -> Result<FeatureTable> {
        let rows = self.averaged_word_vectorizer(kmer_rows, pool)?;
        FeatureTable::from_rows(self.dim(), rows)
    }
}
