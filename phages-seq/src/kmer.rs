//! Sliding-window k-mer extraction.
//!
//! [`KmerExtractor`] walks a sequence with stride 1 and yields every window
//! of `k` characters whose characters all belong to the configured
//! [`Alphabet`]. A window with any other character (ambiguity code,
//! lowercase base, whitespace) is dropped as a whole, so a single bad
//! character removes up to `k` overlapping windows. Filtering is per window,
//! never a sequence-level pre-pass.

use phages_core::{PhagesError, Result};

use crate::alphabet::Alphabet;

/// Default k-mer length for genome embeddings.
pub const DEFAULT_K: usize = 6;

/// Extracts valid k-mers from sequences. Holds only configuration, so a
/// single extractor can be shared across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KmerExtractor {
    k: usize,
    alphabet: Alphabet,
}

impl Default for KmerExtractor {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            alphabet: Alphabet::Dna,
        }
    }
}

impl KmerExtractor {
    /// Create a DNA extractor for the given k-mer size.
    ///
    /// # Errors
    ///
    /// Returns an error if `k` is zero.
    pub fn new(k: usize) -> Result<Self> {
        Self::with_alphabet(k, Alphabet::Dna)
    }

    /// Create an extractor accepting only the symbols of `alphabet`.
    pub fn with_alphabet(k: usize, alphabet: Alphabet) -> Result<Self> {
        if k == 0 {
            return Err(PhagesError::InvalidInput(
                "k-mer size must be at least 1".into(),
            ));
        }
        Ok(Self { k, alphabet })
    }

    /// The k-mer size.
    pub fn k(&self) -> usize {
        self.k
    }

    /// The accepted alphabet.
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Number of raw windows before filtering: `len - k + 1`, or 0 when the
    /// sequence is shorter than `k`.
    pub fn candidate_windows(&self, seq: &str) -> usize {
        seq.chars().count().saturating_sub(self.k - 1)
    }

    /// Lazily iterate over the valid k-mers of `seq`, left to right.
    pub fn kmers<'a>(&self, seq: &'a str) -> Kmers<'a> {
        Kmers::new(seq, self.k, self.alphabet)
    }

    /// All valid k-mers of `seq` joined by single spaces.
    ///
    /// # Example
    ///
    /// ```
    /// use phages_seq::KmerExtractor;
    ///
    /// let kmt = KmerExtractor::default();
    /// assert_eq!(kmt.extract("ACGTACGTT"), "ACGTAC CGTACG GTACGT TACGTT");
    /// assert_eq!(kmt.extract("ACGT"), "");
    /// ```
    pub fn extract(&self, seq: &str) -> String {
        let mut out = String::new();
        for kmer in self.kmers(seq) {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(kmer);
        }
        out
    }
}

/// Iterator over the valid k-mer windows of a sequence.
///
/// Windows are counted in characters. ASCII input (the common case) is
/// windowed on byte offsets directly; otherwise char boundaries are computed
/// once up front.
pub struct Kmers<'a> {
    seq: &'a str,
    bounds: Option<Vec<usize>>,
    n_chars: usize,
    pos: usize,
    k: usize,
    alphabet: Alphabet,
}

impl<'a> Kmers<'a> {
    fn new(seq: &'a str, k: usize, alphabet: Alphabet) -> Self {
        let (bounds, n_chars) = if seq.is_ascii() {
            (None, seq.len())
        } else {
            let b: Vec<usize> = seq
                .char_indices()
                .map(|(i, _)| i)
                .chain(std::iter::once(seq.len()))
                .collect();
            let n = b.len() - 1;
            (Some(b), n)
        };
        Self {
            seq,
            bounds,
            n_chars,
            pos: 0,
            k,
            alphabet,
        }
    }

    fn offset(&self, char_index: usize) -> usize {
        match &self.bounds {
            Some(b) => b[char_index],
            None => char_index,
        }
    }
}

impl<'a> Iterator for Kmers<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while self.n_chars - self.pos >= self.k {
            let start = self.offset(self.pos);
            let end = self.offset(self.pos + self.k);
            self.pos += 1;

            let window = &self.seq[start..end];
            if window.chars().all(|c| self.alphabet.contains(c)) {
                return Some(window);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.n_chars - self.pos + 1).saturating_sub(self.k);
        (0, Some(remaining))
    }
}
