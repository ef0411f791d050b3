//! # Retriever Engine
//!
//! The main retrieval orchestrator.
//!
//! This struct wires together:
//! - Word vectors (VectorStore, refreshed from the on-disk cache)
//! - The code dictionary (Dictionary, loaded from disk when present)
//! - Coded sentences (CodeStore)
//! - Configuration
//!
//! The host application owns one `Retriever` and passes it by reference;
//! there is no process-wide state.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::adapters::index::flat;
use crate::adapters::persist::{self, dictionary, Refresh, RefreshPolicy, WordList};
use crate::adapters::storage::VectorStore;
use crate::codec::{CodeLayout, CodeStore, Dictionary, RoleAssignments, RoleType};
use crate::core::config::RetrievalConfig;
use crate::core::{EntryId, Metric, Vector};
use crate::ports::{EngineResult, KeywordScorer, PersistResult, SearchResult, StoreError};

/// A recalled sentence
#[derive(Debug, Clone, PartialEq)]
pub struct Recall {
    pub id: EntryId,
    pub score: f32,
    /// The stored code string
    pub code: String,
    /// The code string decoded with role particles
    pub sentence: String,
}

/// The main retrieval engine
pub struct Retriever {
    config: RetrievalConfig,

    /// Word vectors
    words: VectorStore,

    /// Word/code mapping
    dictionary: Dictionary,

    /// Coded sentences
    codes: CodeStore,

    /// Source for random fallback vectors
    rng: StdRng,

    /// Outcome of the last cache refresh
    refresh: Option<Refresh>,
}

impl Retriever {
    /// Create an engine with empty stores
    pub fn new(config: RetrievalConfig) -> EngineResult<Self> {
        config.validate()?;

        let words = VectorStore::new(config.store)?;
        let codes = CodeStore::new(config.store.capacity)?;
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            words,
            dictionary: Dictionary::new(),
            codes,
            rng,
            refresh: None,
        })
    }

    /// Create an engine and fill it from disk.
    ///
    /// Word vectors come from the cache, rebuilt first if stale. The
    /// dictionary is loaded if its file exists.
    pub fn open(config: RetrievalConfig) -> EngineResult<Self> {
        let mut retriever = Self::new(config)?;
        retriever.refresh_word_vectors();

        let path = &retriever.config.dictionary_path;
        if path.exists() {
            dictionary::load_into(path, &mut retriever.dictionary)?;
        } else {
            debug!(path = %path.display(), "no dictionary file, starting empty");
        }

        Ok(retriever)
    }

    /// Re-run the cache staleness check against the configured paths
    pub fn refresh_word_vectors(&mut self) -> Refresh {
        let policy = RefreshPolicy::from(&self.config);
        let refresh = persist::refresh_if_stale(
            &mut self.words,
            &self.config.word_list_path,
            &self.config.vector_cache_path,
            &policy,
            &mut self.rng,
        );
        info!(?refresh, total = self.words.len(), "word vectors ready");
        self.refresh = Some(refresh);
        refresh
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn last_refresh(&self) -> Option<Refresh> {
        self.refresh
    }

    pub fn word_vectors(&self) -> &VectorStore {
        &self.words
    }

    pub fn word_vectors_mut(&mut self) -> &mut VectorStore {
        &mut self.words
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.dictionary
    }

    pub fn codes(&self) -> &CodeStore {
        &self.codes
    }

    // ========================================================================
    // CODEC OPERATIONS
    // ========================================================================

    /// Code string for `roles`, growing the dictionary as needed
    pub fn encode(&mut self, roles: &RoleAssignments) -> EngineResult<String> {
        Ok(self.dictionary.compress(roles, CodeLayout::Extended)?)
    }

    /// Code string for `roles` using only words already in the
    /// dictionary. Unknown words are left out.
    pub fn encode_known(&self, roles: &RoleAssignments) -> String {
        roles
            .iter()
            .filter_map(|(role, word)| self.dictionary.code_for(word, role))
            .map(|code| code.to_string())
            .collect()
    }

    /// Sentence text for a code string
    pub fn decode(&self, code_string: &str) -> String {
        self.dictionary.decompress(code_string)
    }

    // ========================================================================
    // SENTENCE MEMORY
    // ========================================================================

    /// Encode `roles` and store the coded sentence under `id`.
    /// Returns the code string.
    ///
    /// A full sentence store is reported before encoding, so a rejected
    /// sentence leaves the dictionary unchanged.
    pub fn remember(&mut self, roles: &RoleAssignments, id: EntryId) -> EngineResult<String> {
        if self.codes.is_full() {
            return Err(StoreError::CapacityExceeded {
                capacity: self.config.store.capacity,
            }
            .into());
        }
        let code = self.encode(roles)?;
        self.codes.add(&code, id)?;
        debug!(id, %code, "remembered sentence");
        Ok(code)
    }

    /// Stored sentences closest to `roles`, best first.
    ///
    /// The query never grows the dictionary. A query with no known words
    /// recalls nothing.
    pub fn recall(&self, roles: &RoleAssignments, k: usize) -> Vec<Recall> {
        let query = self.encode_known(roles);
        if query.is_empty() {
            return Vec::new();
        }

        self.codes
            .search_codes(&query, k, Metric::Cosine)
            .into_iter()
            .map(|(hit, code)| Recall {
                id: hit.id,
                score: hit.score,
                code: code.to_string(),
                sentence: self.dictionary.decompress(code),
            })
            .collect()
    }

    /// Word of the best-matching stored sentence for `role`
    pub fn recall_word(&self, roles: &RoleAssignments, role: RoleType) -> Option<String> {
        self.recall(roles, 1)
            .first()
            .and_then(|r| self.dictionary.decode(&r.code).get(role).map(str::to_string))
    }

    // ========================================================================
    // WORD VECTOR SEARCH
    // ========================================================================

    /// Closest word vectors to `query`
    pub fn search_words(&self, query: &Vector, k: usize, metric: Metric) -> Vec<SearchResult> {
        flat::search_top_k(&self.words, query, k, metric)
    }

    /// Word vectors ranked by cosine blended with keyword relevance
    pub fn search_words_hybrid(
        &self,
        query: &Vector,
        query_text: &str,
        k: usize,
        scorer: &dyn KeywordScorer,
    ) -> Vec<SearchResult> {
        flat::search_hybrid(&self.words, query, query_text, k, scorer)
    }

    // ========================================================================
    // PERSISTENCE
    // ========================================================================

    /// Write the dictionary and the word-vector cache
    pub fn persist(&self) -> PersistResult<()> {
        dictionary::save(&self.config.dictionary_path, &self.dictionary)?;

        let words = WordList::read(&self.config.word_list_path).ok();
        persist::save(
            &self.config.vector_cache_path,
            &self.words,
            words.as_ref(),
            self.config.label_limit,
        )?;
        Ok(())
    }
}
