//! # Code Dictionary
//!
//! Bidirectional mapping between (word, role) pairs and three-character
//! codes. Codes are handed out per role in order of first appearance:
//! the first entity is `E00`, the next `E01`, and so on up to `E99`.
//!
//! The dictionary only grows. Compression turns role assignments into a
//! code string; decompression resolves a code string back to words.

use std::collections::HashMap;

use tracing::debug;

use super::code::{segments, Code, MAX_CODES_PER_ROLE};
use super::RoleType;
use crate::ports::CodecResult;

/// One dictionary row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub code: Code,
    pub word: String,
}

impl DictionaryEntry {
    pub fn role(&self) -> RoleType {
        self.code.role
    }
}

/// Words assigned to roles for one sentence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleAssignments {
    words: [Option<String>; 8],
}

impl RoleAssignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subject / verb / object
    pub fn triple(entity: &str, concept: &str, result: &str) -> Self {
        Self::new()
            .with(RoleType::Entity, entity)
            .with(RoleType::Concept, concept)
            .with(RoleType::Result, result)
    }

    pub fn with(mut self, role: RoleType, word: impl Into<String>) -> Self {
        self.set(role, word);
        self
    }

    /// Assign `word` to `role`. An empty word clears the role.
    pub fn set(&mut self, role: RoleType, word: impl Into<String>) {
        let word = word.into();
        self.words[role.index()] = if word.is_empty() { None } else { Some(word) };
    }

    pub fn get(&self, role: RoleType) -> Option<&str> {
        self.words[role.index()].as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(Option::is_none)
    }

    /// Assigned roles in code-string order
    pub fn iter(&self) -> impl Iterator<Item = (RoleType, &str)> {
        RoleType::ALL
            .into_iter()
            .filter_map(move |role| self.get(role).map(|w| (role, w)))
    }
}

/// Which roles a code string carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeLayout {
    /// Entity, Concept, Result
    Minimal,
    /// All eight roles
    #[default]
    Extended,
}

impl CodeLayout {
    pub fn roles(&self) -> &'static [RoleType] {
        match self {
            CodeLayout::Minimal => &RoleType::CORE,
            CodeLayout::Extended => &RoleType::ALL,
        }
    }
}

/// Append-only word/code dictionary
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<DictionaryEntry>,
    by_word: HashMap<(RoleType, String), usize>,
    by_code: HashMap<Code, usize>,
    /// Next id to hand out, per role
    next_id: [usize; 8],
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    /// How many entries carry `role`
    pub fn count_of(&self, role: RoleType) -> usize {
        self.entries.iter().filter(|e| e.role() == role).count()
    }

    /// Code for (word, role), assigning the next free one if absent.
    ///
    /// Fails with `RoleExhausted` once a role has used all 100 codes.
    pub fn get_or_create_code(&mut self, word: &str, role: RoleType) -> CodecResult<Code> {
        if let Some(code) = self.code_for(word, role) {
            return Ok(code);
        }

        let code = Code::new(role, self.next_id[role.index()])?;
        self.push(code, word.to_string());
        debug!(%code, word, "new dictionary entry");
        Ok(code)
    }

    /// Existing code for (word, role)
    pub fn code_for(&self, word: &str, role: RoleType) -> Option<Code> {
        self.by_word
            .get(&(role, word.to_string()))
            .map(|&i| self.entries[i].code)
    }

    /// Word behind a code string such as `"E00"`
    pub fn word_for_code(&self, code: &str) -> Option<&str> {
        let code = Code::parse(code).ok()?;
        self.word_for(code)
    }

    pub fn word_for(&self, code: Code) -> Option<&str> {
        self.by_code
            .get(&code)
            .map(|&i| self.entries[i].word.as_str())
    }

    /// Add a row read from storage.
    ///
    /// Returns false, leaving the dictionary unchanged, when the code or
    /// the (word, role) pair is already present.
    pub fn insert(&mut self, code: Code, word: impl Into<String>) -> bool {
        let word = word.into();
        if self.by_code.contains_key(&code) || self.by_word.contains_key(&(code.role, word.clone())) {
            return false;
        }
        self.push(code, word);
        true
    }

    fn push(&mut self, code: Code, word: String) {
        let index = self.entries.len();
        self.by_word.insert((code.role, word.clone()), index);
        self.by_code.insert(code, index);

        let next = &mut self.next_id[code.role.index()];
        *next = (*next).max(code.id as usize + 1).min(MAX_CODES_PER_ROLE);

        self.entries.push(DictionaryEntry { code, word });
    }

    /// Encode the roles present in `roles`, restricted to `layout`.
    ///
    /// Codes are concatenated in role order without separators; absent
    /// roles are skipped.
    pub fn compress(&mut self, roles: &RoleAssignments, layout: CodeLayout) -> CodecResult<String> {
        let mut out = String::new();
        for &role in layout.roles() {
            if let Some(word) = roles.get(role) {
                let code = self.get_or_create_code(word, role)?;
                out.push_str(&code.to_string());
            }
        }
        Ok(out)
    }

    /// Resolve each code of `code_string` to its role and word.
    ///
    /// Malformed segments and unknown codes are skipped.
    pub fn resolve<'a>(&'a self, code_string: &str) -> Vec<(RoleType, &'a str)> {
        segments(code_string)
            .flatten()
            .filter_map(|code| self.word_for(code).map(|w| (code.role, w)))
            .collect()
    }

    /// Resolve `code_string` back to role assignments.
    /// A role that appears twice keeps its last word.
    pub fn decode(&self, code_string: &str) -> RoleAssignments {
        let mut roles = RoleAssignments::new();
        for (role, word) in self.resolve(code_string) {
            roles.set(role, word);
        }
        roles
    }

    /// Rebuild a sentence: each resolved word followed by its role's
    /// particle, in code-string order.
    pub fn decompress(&self, code_string: &str) -> String {
        self.resolve(code_string)
            .into_iter()
            .map(|(role, word)| format!("{word}{}", role.suffix()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::CodecError;
    use proptest::prelude::*;

    #[test]
    fn test_first_codes() {
        let mut dict = Dictionary::new();

        assert_eq!(dict.get_or_create_code("猫", RoleType::Entity).unwrap().to_string(), "E00");
        assert_eq!(dict.get_or_create_code("犬", RoleType::Entity).unwrap().to_string(), "E01");
        assert_eq!(dict.get_or_create_code("走る", RoleType::Concept).unwrap().to_string(), "C00");
    }

    #[test]
    fn test_same_word_different_roles() {
        let mut dict = Dictionary::new();

        let e = dict.get_or_create_code("猫", RoleType::Entity).unwrap();
        let r = dict.get_or_create_code("猫", RoleType::Result).unwrap();

        assert_ne!(e, r);
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.count_of(RoleType::Result), 1);
    }

    #[test]
    fn test_idempotent() {
        let mut dict = Dictionary::new();

        let a = dict.get_or_create_code("猫", RoleType::Entity).unwrap();
        assert_eq!(dict.len(), 1);
        let b = dict.get_or_create_code("猫", RoleType::Entity).unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_role_exhaustion() {
        let mut dict = Dictionary::new();
        for i in 0..100 {
            dict.get_or_create_code(&format!("w{i}"), RoleType::Time).unwrap();
        }

        assert_eq!(
            dict.get_or_create_code("w100", RoleType::Time),
            Err(CodecError::RoleExhausted { role: RoleType::Time })
        );
        assert_eq!(dict.len(), 100);
        // existing words still resolve, other roles unaffected
        assert_eq!(dict.get_or_create_code("w99", RoleType::Time).unwrap().to_string(), "T99");
        assert!(dict.get_or_create_code("w100", RoleType::Manner).is_ok());
    }

    #[test]
    fn test_insert_continues_numbering() {
        let mut dict = Dictionary::new();
        assert!(dict.insert(Code::parse("E00").unwrap(), "猫"));
        assert!(dict.insert(Code::parse("E05").unwrap(), "犬"));
        assert!(!dict.insert(Code::parse("E05").unwrap(), "鳥"));
        assert!(!dict.insert(Code::parse("E07").unwrap(), "猫"));

        let code = dict.get_or_create_code("鳥", RoleType::Entity).unwrap();
        assert_eq!(code.to_string(), "E06");
    }

    #[test]
    fn test_compress_minimal_and_extended() {
        let mut dict = Dictionary::new();
        let roles = RoleAssignments::triple("猫", "食べる", "魚")
            .with(RoleType::Location, "台所");

        assert_eq!(dict.compress(&roles, CodeLayout::Minimal).unwrap(), "E00C00R00");
        assert_eq!(dict.compress(&roles, CodeLayout::Extended).unwrap(), "E00C00R00L00");
    }

    #[test]
    fn test_compress_skips_absent_roles() {
        let mut dict = Dictionary::new();
        let roles = RoleAssignments::new()
            .with(RoleType::Result, "魚")
            .with(RoleType::Entity, "猫");

        assert_eq!(dict.compress(&roles, CodeLayout::Extended).unwrap(), "E00R00");
        assert_eq!(dict.compress(&RoleAssignments::new(), CodeLayout::Extended).unwrap(), "");
    }

    #[test]
    fn test_decompress_triple() {
        let mut dict = Dictionary::new();
        let code = dict
            .compress(&RoleAssignments::triple("猫", "食べる", "魚"), CodeLayout::Minimal)
            .unwrap();

        assert_eq!(dict.decompress(&code), "猫は食べる魚を");

        let decoded = dict.decode(&code);
        assert_eq!(decoded.get(RoleType::Entity), Some("猫"));
        assert_eq!(decoded.get(RoleType::Concept), Some("食べる"));
        assert_eq!(decoded.get(RoleType::Result), Some("魚"));
    }

    #[test]
    fn test_decompress_skips_bad_segments() {
        let mut dict = Dictionary::new();
        dict.get_or_create_code("猫", RoleType::Entity).unwrap();
        dict.get_or_create_code("東京", RoleType::Location).unwrap();

        assert_eq!(dict.decompress("E00Z00E09L00R0"), "猫は東京で");
        assert_eq!(dict.decompress(""), "");
    }

    #[test]
    fn test_word_for_code_miss() {
        let dict = Dictionary::new();
        assert_eq!(dict.word_for_code("E00"), None);
        assert_eq!(dict.word_for_code("garbage"), None);
    }

    fn any_role() -> impl Strategy<Value = RoleType> {
        prop::sample::select(RoleType::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_code_round_trip(
            pairs in prop::collection::vec(("[ぁ-んa-z]{1,6}", any_role()), 1..40)
        ) {
            let mut dict = Dictionary::new();
            for (word, role) in &pairs {
                let code = dict.get_or_create_code(word, *role).unwrap();
                prop_assert_eq!(dict.word_for_code(&code.to_string()), Some(word.as_str()));
                prop_assert_eq!(code.role, *role);
            }
        }
    }
}
