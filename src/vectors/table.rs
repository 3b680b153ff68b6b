// VectorTable — the in-memory word → vector store.
//
// Parses the plain-text embedding format (one `<word> <v1> ... <vD>` record
// per line, no header) and serves read-only lookups. The first record fixes
// the dimensionality D; every later record must match it. Insertion order is
// kept so a table written back out reproduces the source line order.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{DebiasError, Result};

/// A read-only table of word vectors sharing one dimensionality.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorTable {
    words: Vec<String>,
    vectors: Vec<Vec<f64>>,
    index: HashMap<String, usize>,
    dim: usize,
}

impl VectorTable {
    /// Parse a table from a reader in the text embedding format.
    ///
    /// Blank lines are skipped. Errors carry the 1-based line number of the
    /// offending record.
    pub fn load<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Self::default();

        // Raw bytes so a non-UTF-8 record is a parse error with a line
        // number; only real read failures surface as Io.
        for (i, bytes) in reader.split(b'\n').enumerate() {
            let line_no = i + 1;
            let line = String::from_utf8(bytes?).map_err(|_| DebiasError::Parse {
                line: line_no,
                reason: "invalid UTF-8".to_string(),
            })?;

            let mut tokens = line.split_whitespace();
            let Some(word) = tokens.next() else {
                continue;
            };

            let vector = tokens
                .map(|tok| parse_component(tok, word, line_no))
                .collect::<Result<Vec<f64>>>()?;

            if vector.is_empty() {
                return Err(DebiasError::Parse {
                    line: line_no,
                    reason: format!("word {word:?} has no vector components"),
                });
            }

            table.push(word.to_string(), vector, line_no)?;
        }

        debug!(words = table.len(), dim = table.dim, "Loaded vector table");
        Ok(table)
    }

    /// Parse a table from a file on disk.
    pub fn load_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::load(BufReader::new(file))
    }

    /// Build a table from in-memory entries, enforcing the same invariants
    /// as parsing. Positions in errors are 1-based entry indices.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<f64>)>,
    {
        let mut table = Self::default();
        for (i, (word, vector)) in entries.into_iter().enumerate() {
            if vector.is_empty() {
                return Err(DebiasError::Parse {
                    line: i + 1,
                    reason: format!("word {word:?} has no vector components"),
                });
            }
            table.push(word, vector, i + 1)?;
        }
        Ok(table)
    }

    fn push(&mut self, word: String, vector: Vec<f64>, line: usize) -> Result<()> {
        if self.words.is_empty() {
            self.dim = vector.len();
        } else if vector.len() != self.dim {
            return Err(DebiasError::DimensionMismatch {
                line,
                expected: self.dim,
                found: vector.len(),
            });
        }

        if self.index.contains_key(&word) {
            return Err(DebiasError::DuplicateWord { line, word });
        }

        self.index.insert(word.clone(), self.words.len());
        self.words.push(word);
        self.vectors.push(vector);
        Ok(())
    }

    /// Look up the vector for `word` (case-sensitive).
    pub fn lookup(&self, word: &str) -> Result<&[f64]> {
        self.index
            .get(word)
            .map(|&i| self.vectors[i].as_slice())
            .ok_or_else(|| DebiasError::UnknownWord(word.to_string()))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Dimensionality shared by every vector (0 for an empty table).
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in insertion order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// `(word, vector)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.words
            .iter()
            .zip(&self.vectors)
            .map(|(w, v)| (w.as_str(), v.as_slice()))
    }

    /// Write the table in the text embedding format, one record per line.
    ///
    /// Components use Rust's shortest round-trip float formatting, so loading
    /// the output reproduces every vector exactly.
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<()> {
        for (word, vector) in self.iter() {
            write!(out, "{word}")?;
            for x in vector {
                write!(out, " {x}")?;
            }
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Write the table to a file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))?;
        debug!(path = %path.display(), words = self.len(), "Saved vector table");
        Ok(())
    }

    /// Extract the vectors for `words` into a new table.
    ///
    /// Words missing from this table are returned as `UnknownWord` errors
    /// instead of aborting the export. Repeated requests are ignored.
    pub fn subset<S: AsRef<str>>(&self, words: &[S]) -> (VectorTable, Vec<DebiasError>) {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        let mut missing = Vec::new();

        for word in words {
            let word = word.as_ref();
            if !seen.insert(word) {
                continue;
            }
            match self.lookup(word) {
                Ok(v) => entries.push((word.to_string(), v.to_vec())),
                Err(e) => missing.push(e),
            }
        }

        // Entries come from this table, so they already satisfy the invariants.
        let mut table = Self::default();
        for (i, (word, vector)) in entries.into_iter().enumerate() {
            if let Err(e) = table.push(word, vector, i + 1) {
                missing.push(e);
            }
        }

        (table, missing)
    }

    /// A copy of this table with some vectors replaced.
    ///
    /// Every replacement must name an existing word and match the table's
    /// dimensionality; the table itself is left untouched.
    pub fn overlay(&self, replacements: &HashMap<String, Vec<f64>>) -> Result<VectorTable> {
        for (word, vector) in replacements {
            if !self.contains(word) {
                return Err(DebiasError::UnknownWord(word.clone()));
            }
            if vector.len() != self.dim {
                return Err(DebiasError::LengthMismatch {
                    left: self.dim,
                    right: vector.len(),
                });
            }
        }

        let mut table = self.clone();
        for (word, vector) in replacements {
            let i = table.index[word];
            table.vectors[i] = vector.clone();
        }
        Ok(table)
    }
}

fn parse_component(token: &str, word: &str, line: usize) -> Result<f64> {
    let value: f64 = token.parse().map_err(|_| DebiasError::Parse {
        line,
        reason: format!("invalid number {token:?} for word {word:?}"),
    })?;
    if !value.is_finite() {
        return Err(DebiasError::Parse {
            line,
            reason: format!("non-finite component {token:?} for word {word:?}"),
        });
    }
    Ok(value)
}
