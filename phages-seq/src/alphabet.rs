//! Accepted-character sets for k-mer extraction.

/// Biological sequence alphabets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Alphabet {
    /// DNA: A, C, G, T
    #[default]
    Dna,
    /// RNA: A, C, G, U
    Rna,
    /// Protein: 20 standard amino acids
    Protein,
}

const DNA_SYMBOLS: &[u8] = b"ACGT";
const RNA_SYMBOLS: &[u8] = b"ACGU";
const PROTEIN_SYMBOLS: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

impl Alphabet {
    /// The ordered byte symbols for this alphabet.
    pub fn symbols(&self) -> &'static [u8] {
        match self {
            Alphabet::Dna => DNA_SYMBOLS,
            Alphabet::Rna => RNA_SYMBOLS,
            Alphabet::Protein => PROTEIN_SYMBOLS,
        }
    }

    /// The number of symbols in this alphabet.
    pub fn size(&self) -> usize {
        self.symbols().len()
    }

    /// Whether `c` is one of the alphabet's symbols. Case-sensitive.
    pub fn contains(&self, c: char) -> bool {
        c.is_ascii() && self.symbols().contains(&(c as u8))
    }
}

impl std::str::FromStr for Alphabet {
    type Err = phages_core::PhagesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dna" => Ok(Alphabet::Dna),
            "rna" => Ok(Alphabet::Rna),
            "protein" => Ok(Alphabet::Protein),
            other => Err(phages_core::PhagesError::InvalidInput(format!(
                "unknown alphabet {:?} (expected dna, rna or protein)",
                other
            ))),
        }
    }
}
