use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Word list used when nothing else is configured.
pub const DEFAULT_CORPUS_PATH: &str = "en.lang";

/// Immutable, ordered list of words that sentences are sampled from.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    words: Vec<String>,
}

impl Corpus {
    /// Read a newline-delimited word list. Blank lines are skipped, so a
    /// trailing newline never yields an empty word.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::CorpusLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let corpus = Self::from_words(contents.split('\n'));
        debug!(path = %path.display(), words = corpus.len(), "loaded corpus");
        Ok(corpus)
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn load_splits_on_newlines() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "cat\ndog\nbird\n").unwrap();

        let corpus = Corpus::load(file.path()).unwrap();
        assert_eq!(corpus.words(), &["cat", "dog", "bird"]);
    }

    #[test]
    fn load_strips_carriage_returns_and_blank_lines() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "cat\r\n\r\n  dog \n\n").unwrap();

        let corpus = Corpus::load(file.path()).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get(0), Some("cat"));
        assert_eq!(corpus.get(1), Some("dog"));
        assert_eq!(corpus.get(2), None);
    }

    #[test]
    fn load_missing_file_is_corpus_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.lang");

        match Corpus::load(&path) {
            Err(Error::CorpusLoad { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected CorpusLoad, got {other:?}"),
        }
    }

    #[test]
    fn from_words_of_nothing_is_empty() {
        let corpus = Corpus::from_words(Vec::<String>::new());
        assert!(corpus.is_empty());
    }
}
