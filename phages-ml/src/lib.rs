//! Genome embeddings from k-mer word vectors for the phages toolkit.
//!
//! Pre-trained word2vec models give one vector per k-mer but nothing for a
//! whole genome. This crate averages the k-mers of each sequence so the
//! genome vector is the centroid of its k-mers in feature space:
//!
//! - **Vocabulary** — the [`Vocabulary`] capability and the in-memory
//!   [`KeyedVectors`] table
//! - **Model loading** — word2vec text and binary formats via [`load_word2vec`]
//! - **Transformers** — [`KmerTransformer`], [`GenomeAvgTransformer`] and the
//!   combined [`GenomeEmbedder`]
//! - **Work distribution** — explicit, caller-sized [`WorkPool`]
//! - **Configuration** — [`PipelineConfig`]

pub mod config;
pub mod embedding;
pub mod parallel;
pub mod transform;
pub mod vocabulary;
pub mod word2vec;

pub use config::PipelineConfig;
pub use embedding::GenomeEmbedder;
pub use parallel::WorkPool;
pub use transform::{GenomeAvgTransformer, KmerTransformer, Transformer};
pub use vocabulary::{KeyedVectors, Vocabulary};
pub use word2vec::{load_word2vec, read_word2vec_binary, read_word2vec_text, Word2VecFormat};
