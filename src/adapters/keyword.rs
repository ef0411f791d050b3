//! # Keyword Scoring
//!
//! A small [`KeywordScorer`] for hosts that have no relevance model of
//! their own: it remembers the text indexed under each id and scores the
//! share of query tokens found in it.

use std::collections::HashMap;

use crate::core::EntryId;
use crate::ports::KeywordScorer;

/// Term-overlap keyword scorer
#[derive(Debug, Default, Clone)]
pub struct TermOverlapScorer {
    texts: HashMap<EntryId, String>,
}

impl TermOverlapScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `text` under `id`, replacing any previous text
    pub fn insert(&mut self, id: EntryId, text: impl Into<String>) {
        self.texts.insert(id, text.into());
    }

    pub fn text(&self, id: EntryId) -> Option<&str> {
        self.texts.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

impl KeywordScorer for TermOverlapScorer {
    fn score(&self, id: EntryId, query_tokens: &[&str]) -> f32 {
        let Some(text) = self.texts.get(&id) else {
            return 0.0;
        };
        if query_tokens.is_empty() {
            return 0.0;
        }

        let hits = query_tokens.iter().filter(|t| text.contains(**t)).count();
        hits as f32 / query_tokens.len() as f32
    }
}
