//! Word dictionary: a 26-way prefix tree over lowercase words.
//!
//! Nodes live in one arena `Vec` and refer to their children by index. The tree is
//! built once (from a word list file or an iterator of words) and only read after
//! that, so the game shares it behind an `Arc`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::tile::Letter;

/// Longest accepted line in a word list file, in bytes.
pub const MAX_WORD_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("cannot read dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dictionary line {line} is {len} bytes long (limit {max})", max = MAX_WORD_LEN)]
    LineTooLong { line: usize, len: usize },
    #[error("dictionary line {line} is not a plain a-z word: {word:?}")]
    InvalidWord { line: usize, word: String },
}

#[derive(Debug, Clone, Default)]
struct Node {
    children: [Option<u32>; Letter::ALPHABET],
    end_of_word: bool,
}

#[derive(Debug, Clone)]
pub struct Dictionary {
    nodes: Vec<Node>,
    words: usize,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

/// Child slot for a character, folding ASCII uppercase. `None` for anything outside a-z.
#[inline]
fn slot(c: char) -> Option<usize> {
    let c = c.to_ascii_lowercase();
    c.is_ascii_lowercase().then(|| (c as u8 - b'a') as usize)
}

impl Dictionary {
    /// Empty dictionary (root node only).
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            words: 0,
        }
    }

    /// Build from in-memory words. Fails on the first word containing a non-letter.
    pub fn from_words<I, S>(words: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::new();
        for (i, word) in words.into_iter().enumerate() {
            let word = word.as_ref();
            if !dict.insert(word) {
                return Err(DictionaryError::InvalidWord {
                    line: i + 1,
                    word: word.to_string(),
                });
            }
        }
        Ok(dict)
    }

    /// Load a newline-delimited word list.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let io_err = |source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_err)?;
        let dict = Self::from_reader(BufReader::new(file)).map_err(|e| match e {
            DictionaryError::Io { source, .. } => io_err(source),
            other => other,
        })?;
        info!("loaded {} words from {}", dict.len(), path.display());
        Ok(dict)
    }

    /// Parse a word list: one word per line, blank lines skipped, `\r\n` tolerated.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, DictionaryError> {
        let mut dict = Self::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| DictionaryError::Io {
                path: PathBuf::new(),
                source,
            })?;
            let word = line.trim_end_matches('\r');
            if word.len() > MAX_WORD_LEN {
                return Err(DictionaryError::LineTooLong {
                    line: i + 1,
                    len: word.len(),
                });
            }
            if word.is_empty() {
                continue;
            }
            if !dict.insert(word) {
                return Err(DictionaryError::InvalidWord {
                    line: i + 1,
                    word: word.to_string(),
                });
            }
        }
        debug!("trie built: {} words, {} nodes", dict.words, dict.nodes.len());
        Ok(dict)
    }

    /// Insert a word. Returns false (and leaves the tree untouched) if the word is
    /// empty or contains anything but ASCII letters.
    pub fn insert(&mut self, word: &str) -> bool {
        let Some(slots) = word.chars().map(slot).collect::<Option<Vec<_>>>() else {
            return false;
        };
        if slots.is_empty() {
            return false;
        }
        let mut node = 0usize;
        for s in slots {
            node = match self.nodes[node].children[s] {
                Some(child) => child as usize,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[node].children[s] = Some(child as u32);
                    child
                }
            };
        }
        if !self.nodes[node].end_of_word {
            self.nodes[node].end_of_word = true;
            self.words += 1;
        }
        true
    }

    /// Node reached by walking `prefix`, if the path exists.
    fn walk(&self, prefix: &str) -> Option<&Node> {
        let mut node = &self.nodes[0];
        for c in prefix.chars() {
            let child = node.children[slot(c)?]?;
            node = &self.nodes[child as usize];
        }
        Some(node)
    }

    /// True only for complete words, not bare prefixes.
    pub fn contains(&self, word: &str) -> bool {
        !word.is_empty() && self.walk(word).is_some_and(|n| n.end_of_word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }
}
