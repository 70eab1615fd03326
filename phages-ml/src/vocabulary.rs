//! Token → embedding lookup used by the genome averager.
//!
//! [`Vocabulary`] is the capability the averaging stage depends on: a
//! membership test and a fixed-dimension vector lookup. Any pre-trained
//! embedding source can implement it; [`KeyedVectors`] is the in-memory
//! table the word2vec loaders produce.

use std::collections::HashMap;

use phages_core::{PhagesError, Result, Summarizable};

/// A read-only set of tokens with one embedding vector each.
///
/// Implementations are shared across worker threads during batch transforms
/// and must not mutate on lookup.
pub trait Vocabulary: Send + Sync {
    /// Dimensionality every vector is expected to have.
    fn dim(&self) -> usize;

    /// Vector for `token`, or `None` if it is not in the vocabulary.
    fn vector_of(&self, token: &str) -> Option<&[f32]>;

    /// Whether `token` is in the vocabulary.
    fn contains(&self, token: &str) -> bool {
        self.vector_of(token).is_some()
    }

    /// Number of tokens.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Vocabulary + ?Sized> Vocabulary for &V {
    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn vector_of(&self, token: &str) -> Option<&[f32]> {
        (**self).vector_of(token)
    }

    fn contains(&self, token: &str) -> bool {
        (**self).contains(token)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// In-memory vocabulary: token index over a flat `n × dim` matrix.
#[derive(Debug, Clone, Default)]
pub struct KeyedVectors {
    dim: usize,
    index: HashMap<String, usize>,
    tokens: Vec<String>,
    /// Flattened embedding matrix [n_tokens * dim]
    matrix: Vec<f32>,
}

impl KeyedVectors {
    /// Empty vocabulary of the given dimensionality.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            ..Default::default()
        }
    }

    /// Empty vocabulary with room for `capacity` tokens.
    pub fn with_capacity(dim: usize, capacity: usize) -> Self {
        Self {
            dim,
            index: HashMap::with_capacity(capacity),
            tokens: Vec::with_capacity(capacity),
            matrix: Vec::with_capacity(capacity.saturating_mul(dim)),
        }
    }

    /// Build from `(token, vector)` pairs. All vectors must have length `dim`.
    pub fn from_pairs<I, S>(dim: usize, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let mut kv = Self::new(dim);
        for (token, vector) in pairs {
            kv.insert(token, &vector)?;
        }
        Ok(kv)
    }

    /// Insert or replace the vector for `token`.
    ///
    /// # Errors
    ///
    /// Returns [`PhagesError::DimensionMismatch`] if `vector` is not `dim` long.
    pub fn insert(&mut self, token: impl Into<String>, vector: &[f32]) -> Result<()> {
        let token = token.into();
        if vector.len() != self.dim {
            return Err(PhagesError::DimensionMismatch {
                token,
                expected: self.dim,
                found: vector.len(),
            });
        }
        match self.index.get(&token) {
            Some(&row) => {
                let start = row * self.dim;
                self.matrix[start..start + self.dim].copy_from_slice(vector);
            }
            None => {
                self.index.insert(token.clone(), self.tokens.len());
                self.tokens.push(token);
                self.matrix.extend_from_slice(vector);
            }
        }
        Ok(())
    }

    /// Tokens in insertion order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl Vocabulary for KeyedVectors {
    fn dim(&self) -> usize {
        self.dim
    }

    fn vector_of(&self, token: &str) -> Option<&[f32]> {
        let row = *self.index.get(token)?;
        let start = row * self.dim;
        self.matrix.get(start..start + self.dim)
    }

    fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    fn len(&self) -> usize {
        self.tokens.len()
    }
}

impl Summarizable for KeyedVectors {
    fn summary(&self) -> String {
        format!("KeyedVectors: {} token(s) x {} dim", self.tokens.len(), self.dim)
    }
}
