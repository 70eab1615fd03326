//! Loading pre-trained word2vec k-mer embeddings.
//!
//! Both standard interchange formats are supported:
//!
//! - **Text** — header `<count> <dim>`, then `token v_1 .. v_dim` per line
//! - **Binary** — the same header line, then per token the token bytes, a
//!   single space and `dim` little-endian `f32` values
//!
//! Paths ending in `.gz` are decompressed on the fly.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use phages_core::{PhagesError, Result};
use tracing::info;

use crate::vocabulary::{KeyedVectors, Vocabulary};

/// Upper bound on the number of `f32` values reserved from a model header.
const PREALLOC_FLOATS: usize = 1 << 24;

/// On-disk layout of a word2vec model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Word2VecFormat {
    Text,
    Binary,
}

impl Word2VecFormat {
    /// Infer the format from the file name: `.bin` / `.bin.gz` is binary,
    /// anything else is text.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let name = path
            .as_ref()
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        if name.ends_with(".bin") {
            Word2VecFormat::Binary
        } else {
            Word2VecFormat::Text
        }
    }
}

fn open(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| {
        PhagesError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })?;
    let gz = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("gz"));
    if gz {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Load a word2vec model from `path` in the given format.
pub fn load_word2vec(path: impl AsRef<Path>, format: Word2VecFormat) -> Result<KeyedVectors> {
    let path = path.as_ref();
    let reader = open(path)?;
    let kv = match format {
        Word2VecFormat::Text => read_word2vec_text(reader),
        Word2VecFormat::Binary => read_word2vec_binary(reader),
    }
    .map_err(|e| match e {
        PhagesError::Parse(msg) => PhagesError::Parse(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;
    info!(
        path = %path.display(),
        tokens = kv.len(),
        dim = kv.dim(),
        "loaded word2vec model"
    );
    Ok(kv)
}

/// Parse the `<count> <dim>` header line.
fn parse_header(line: &str) -> Result<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let mut field = |what: &str| -> Result<usize> {
        parts
            .next()
            .ok_or_else(|| PhagesError::Parse(format!("header is missing {}", what)))?
            .parse::<usize>()
            .map_err(|e| PhagesError::Parse(format!("header {}: {}", what, e)))
    };
    let count = field("token count")?;
    let dim = field("vector size")?;
    Ok((count, dim))
}

/// Empty vocabulary sized from the header, bounded so a corrupt header
/// cannot request an arbitrary allocation.
fn reserve_vocabulary(count: usize, dim: usize) -> KeyedVectors {
    KeyedVectors::with_capacity(dim, count.min(PREALLOC_FLOATS / dim.max(1)))
}

/// Read the text word2vec format.
pub fn read_word2vec_text<R: BufRead>(reader: R) -> Result<KeyedVectors> {
    let mut lines = reader.lines();
    let header = lines
        .next()
        .ok_or_else(|| PhagesError::Parse("empty word2vec file".into()))??;
    let (count, dim) = parse_header(&header)?;

    let mut kv = reserve_vocabulary(count, dim);
    let mut vector = Vec::new();
    let mut line_no = 1;
    while kv.len() < count {
        line_no += 1;
        let line = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(PhagesError::Parse(format!(
                    "expected {} tokens, file ends after {}",
                    count,
                    kv.len()
                )))
            }
        };
        let mut parts = line.split_whitespace();
        let token = match parts.next() {
            Some(t) => t,
            None => continue,
        };

        vector.clear();
        for value in parts {
            let v = value.parse::<f32>().map_err(|e| {
                PhagesError::Parse(format!("line {}: {:?}: {}", line_no, value, e))
            })?;
            vector.push(v);
        }
        if vector.len() != dim {
            return Err(PhagesError::Parse(format!(
                "line {}: token {:?} has {} values, expected {}",
                line_no,
                token,
                vector.len(),
                dim
            )));
        }
        kv.insert(token, &vector)?;
    }
    Ok(kv)
}

/// Read the binary word2vec format.
pub fn read_word2vec_binary<R: BufRead>(mut reader: R) -> Result<KeyedVectors> {
    let mut header = Vec::new();
    reader.read_until(b'\n', &mut header)?;
    if header.is_empty() {
        return Err(PhagesError::Parse("empty word2vec file".into()));
    }
    let header = std::str::from_utf8(&header).map_err(|e| PhagesError::Parse(e.to_string()))?;
    let (count, dim) = parse_header(header)?;

    let n_bytes = dim
        .checked_mul(4)
        .ok_or_else(|| PhagesError::Parse(format!("header vector size {} is too large", dim)))?;

    let mut kv = reserve_vocabulary(count, dim);
    let mut token_buf = Vec::new();
    let mut raw = Vec::new();
    let mut vector = Vec::new();
    for entry in 0..count {
        token_buf.clear();
        let n = reader.read_until(b' ', &mut token_buf)?;
        if n == 0 || token_buf.last() != Some(&b' ') {
            return Err(PhagesError::Parse(format!(
                "entry {}: unexpected end of file, expected {} tokens",
                entry, count
            )));
        }
        token_buf.pop();
        // records may be newline-separated
        let start = token_buf
            .iter()
            .position(|b| *b != b'\n' && *b != b'\r')
            .unwrap_or(token_buf.len());
        let token = std::str::from_utf8(&token_buf[start..])
            .map_err(|e| PhagesError::Parse(format!("entry {}: {}", entry, e)))?;
        if token.is_empty() {
            return Err(PhagesError::Parse(format!("entry {}: empty token", entry)));
        }

        raw.clear();
        let read = reader.by_ref().take(n_bytes as u64).read_to_end(&mut raw)?;
        if read != n_bytes {
            return Err(PhagesError::Parse(format!(
                "entry {} ({:?}): expected {} vector bytes, found {}",
                entry, token, n_bytes, read
            )));
        }
        vector.clear();
        vector.extend(
            raw.chunks_exact(4)
                .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]])),
        );
        kv.insert(token, &vector)?;
    }
    Ok(kv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn binary_model(entries: &[(&str, &[f32])], dim: usize) -> Vec<u8> {
        let mut out = format!("{} {}\n", entries.len(), dim).into_bytes();
        for (token, vector) in entries {
            out.extend_from_slice(token.as_bytes());
            out.push(b' ');
            for v in vector.iter() {
                out.extend_from_slice(&v.to_le_bytes());
            }
            out.push(b'\n');
        }
        out
    }

    #[test]
    fn format_from_path() {
        assert_eq!(Word2VecFormat::from_path("model.bin"), Word2VecFormat::Binary);
        assert_eq!(Word2VecFormat::from_path("model.BIN.gz"), Word2VecFormat::Binary);
        assert_eq!(Word2VecFormat::from_path("model.txt"), Word2VecFormat::Text);
        assert_eq!(Word2VecFormat::from_path("model.vec.gz"), Word2VecFormat::Text);
    }

    #[test]
    fn text_model() {
        let data = "2 3\nACGTAC 1.0 2.0 3.0\nCGTACG 0.5 -1 4e-1\n";
        let kv = read_word2vec_text(Cursor::new(data)).unwrap();
        assert_eq!(kv.len(), 2);
        assert_eq!(kv.dim(), 3);
        assert_eq!(kv.vector_of("CGTACG"), Some([0.5, -1.0, 0.4].as_slice()));
    }

    #[test]
    fn text_model_empty_vocabulary() {
        let kv = read_word2vec_text(Cursor::new("0 100\n")).unwrap();
        assert!(kv.is_empty());
        assert_eq!(kv.dim(), 100);
    }

    #[test]
    fn text_model_wrong_width() {
        let data = "1 3\nACGTAC 1.0 2.0\n";
        let err = read_word2vec_text(Cursor::new(data)).unwrap_err();
        assert!(matches!(err, PhagesError::Parse(ref m) if m.contains("line 2")));
    }

    #[test]
    fn text_model_truncated() {
        let data = "3 1\nA 1\nC 2\n";
        assert!(matches!(
            read_word2vec_text(Cursor::new(data)),
            Err(PhagesError::Parse(_))
        ));
    }

    #[test]
    fn text_model_bad_header() {
        assert!(read_word2vec_text(Cursor::new("two 3\n")).is_err());
        assert!(read_word2vec_text(Cursor::new("")).is_err());
    }

    #[test]
    fn binary_model_roundtrip() {
        let bytes = binary_model(&[("ACGTAC", &[1.0, 2.0]), ("TTTTTT", &[-0.25, 8.0])], 2);
        let kv = read_word2vec_binary(Cursor::new(bytes)).unwrap();
        assert_eq!(kv.len(), 2);
        assert_eq!(kv.vector_of("TTTTTT"), Some([-0.25, 8.0].as_slice()));
    }

    #[test]
    fn binary_model_truncated() {
        let mut bytes = binary_model(&[("ACGTAC", &[1.0, 2.0])], 2);
        bytes.truncate(bytes.len() - 3);
        assert!(matches!(
            read_word2vec_binary(Cursor::new(bytes)),
            Err(PhagesError::Parse(_))
        ));
    }

    #[test]
    fn oversized_header_counts_are_parse_errors() {
        let data = "18446744073709551615 2\nA 1 2\n";
        assert!(matches!(
            read_word2vec_text(Cursor::new(data)),
            Err(PhagesError::Parse(_))
        ));

        let data = "1 4611686018427387904\nA 1 2\n";
        assert!(matches!(
            read_word2vec_text(Cursor::new(data)),
            Err(PhagesError::Parse(_))
        ));

        let bytes = b"1 4611686018427387904\nA ".to_vec();
        let err = read_word2vec_binary(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, PhagesError::Parse(ref m) if m.contains("too large")));

        let bytes = b"18446744073709551615 1\nA \x00\x00\x80\x3f".to_vec();
        assert!(matches!(
            read_word2vec_binary(Cursor::new(bytes)),
            Err(PhagesError::Parse(_))
        ));
    }

    #[test]
    fn load_gzipped_text_from_disk() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut file = NamedTempFile::with_suffix(".txt.gz").unwrap();
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"1 2\nAAAAAA 1.5 2.5\n").unwrap();
        file.write_all(&enc.finish().unwrap()).unwrap();
        file.flush().unwrap();

        let kv = load_word2vec(file.path(), Word2VecFormat::from_path(file.path())).unwrap();
        assert_eq!(kv.vector_of("AAAAAA"), Some([1.5, 2.5].as_slice()));
    }

    #[test]
    fn missing_model_file() {
        let result = load_word2vec("/nonexistent/word2vec.txt", Word2VecFormat::Text);
        assert!(matches!(result, Err(PhagesError::Io(_))));
    }
}
