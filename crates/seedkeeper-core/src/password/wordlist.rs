//! Word dictionaries for memorable passwords.
//!
//! The dictionary is supplied by the caller, usually loaded once from a
//! bundled newline-separated resource with [`MemorableWordlist::load`].

use std::fs;
use std::path::Path;

/// Indexed source of words for memorable-password generation.
pub trait WordDictionary {
    /// Number of words available.
    fn word_count(&self) -> usize;

    /// Word at `index`, `None` past the end.
    fn word(&self, index: usize) -> Option<&str>;

    /// Returns `true` if there is nothing to draw from.
    fn is_empty(&self) -> bool {
        self.word_count() == 0
    }
}

impl<S: AsRef<str>> WordDictionary for [S] {
    fn word_count(&self) -> usize {
        self.len()
    }

    fn word(&self, index: usize) -> Option<&str> {
        self.get(index).map(AsRef::as_ref)
    }
}

impl<S: AsRef<str>> WordDictionary for Vec<S> {
    fn word_count(&self) -> usize {
        self.len()
    }

    fn word(&self, index: usize) -> Option<&str> {
        self.get(index).map(AsRef::as_ref)
    }
}

/// Owned, newline-separated wordlist.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemorableWordlist {
    words: Vec<String>,
}

impl MemorableWordlist {
    /// Parse one word per line. Surrounding whitespace and blank lines are
    /// dropped, so a trailing newline does not yield an empty word.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();
        Self { words }
    }

    /// Load a wordlist file.
    ///
    /// An unreadable file yields an empty list; generation from it then
    /// fails with [`crate::SecretError::EmptyDictionary`].
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => {
                let list = Self::from_text(&text);
                tracing::debug!(path = %path.display(), words = list.words.len(), "loaded memorable wordlist");
                list
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to load memorable wordlist: {e}");
                Self::default()
            }
        }
    }

    /// All words, in file order.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl WordDictionary for MemorableWordlist {
    fn word_count(&self) -> usize {
        self.words.len()
    }

    fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }
}

impl FromIterator<String> for MemorableWordlist {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().collect(),
        }
    }
}
