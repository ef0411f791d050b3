//! # Word List
//!
//! The auxiliary word list: one word per line. It seeds deterministic
//! vectors when the cache is rebuilt and supplies labels when the cache
//! is written.

use std::borrow::Cow;
use std::path::Path;

use crate::core::EntryId;
use crate::ports::{PersistError, PersistResult};

/// Word list held in memory, line for line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    /// Every line with its line terminator stripped, blanks included
    lines: Vec<String>,
}

impl WordList {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Read the whole list. Invalid UTF-8 is replaced, not rejected.
    pub fn read(path: impl AsRef<Path>) -> PersistResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| PersistError::io(path, e))?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        Self {
            lines: text
                .lines()
                .map(|l| l.trim_end_matches('\r').to_string())
                .collect(),
        }
    }

    /// Number of lines, blanks included
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Non-blank words in file order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str).filter(|w| !w.is_empty())
    }

    /// Label for `id` when persisting.
    ///
    /// Ids in `0..limit` name line `id + 1` of the list. Blank lines, lines
    /// past the end and ids outside the range get the synthetic `word<id>`.
    pub fn label(&self, id: EntryId, limit: usize) -> Cow<'_, str> {
        usize::try_from(id)
            .ok()
            .filter(|&i| i < limit)
            .and_then(|i| self.lines.get(i))
            .filter(|w| !w.is_empty())
            .map(|w| Cow::Borrowed(w.as_str()))
            .unwrap_or_else(|| Cow::Owned(synthetic_label(id)))
    }
}

pub fn synthetic_label(id: EntryId) -> String {
    format!("word{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_lookup() {
        let list = WordList::parse("猫\n犬\n\n鳥\n");

        assert_eq!(list.label(0, 5000), "猫");
        assert_eq!(list.label(1, 5000), "犬");
        assert_eq!(list.label(2, 5000), "word2");
        assert_eq!(list.label(3, 5000), "鳥");
        assert_eq!(list.label(4, 5000), "word4");
        assert_eq!(list.label(-1, 5000), "word-1");
    }

    #[test]
    fn test_label_limit() {
        let list = WordList::parse("猫\n犬\n");
        assert_eq!(list.label(1, 1), "word1");
    }

    #[test]
    fn test_words_skip_blanks() {
        let list = WordList::parse("猫\r\n\r\n犬\r\n");
        assert_eq!(list.len(), 3);
        assert_eq!(list.words().collect::<Vec<_>>(), vec!["猫", "犬"]);
    }
}
