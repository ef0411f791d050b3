//! Semantic roles a word can fill in the simplified sentence model.

use crate::ports::{CodecError, CodecResult};

/// Role of a word in a coded sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoleType {
    /// Subject noun
    Entity,
    /// Verb
    Concept,
    /// Object / outcome noun
    Result,
    /// Adjective
    Attribute,
    /// Time expression
    Time,
    /// Place expression
    Location,
    /// Adverb
    Manner,
    /// Quantity expression
    Quantity,
}

impl RoleType {
    /// Every role, in code-string order
    pub const ALL: [RoleType; 8] = [
        RoleType::Entity,
        RoleType::Concept,
        RoleType::Result,
        RoleType::Attribute,
        RoleType::Time,
        RoleType::Location,
        RoleType::Manner,
        RoleType::Quantity,
    ];

    /// Subject, verb, object
    pub const CORE: [RoleType; 3] = [RoleType::Entity, RoleType::Concept, RoleType::Result];

    pub fn letter(&self) -> char {
        match self {
            RoleType::Entity => 'E',
            RoleType::Concept => 'C',
            RoleType::Result => 'R',
            RoleType::Attribute => 'A',
            RoleType::Time => 'T',
            RoleType::Location => 'L',
            RoleType::Manner => 'M',
            RoleType::Quantity => 'Q',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'E' => Some(RoleType::Entity),
            'C' => Some(RoleType::Concept),
            'R' => Some(RoleType::Result),
            'A' => Some(RoleType::Attribute),
            'T' => Some(RoleType::Time),
            'L' => Some(RoleType::Location),
            'M' => Some(RoleType::Manner),
            'Q' => Some(RoleType::Quantity),
            _ => None,
        }
    }

    /// Position in [`RoleType::ALL`]
    pub fn index(&self) -> usize {
        match self {
            RoleType::Entity => 0,
            RoleType::Concept => 1,
            RoleType::Result => 2,
            RoleType::Attribute => 3,
            RoleType::Time => 4,
            RoleType::Location => 5,
            RoleType::Manner => 6,
            RoleType::Quantity => 7,
        }
    }

    /// Particle appended to the word when a sentence is rebuilt
    pub fn suffix(&self) -> &'static str {
        match self {
            RoleType::Entity => "は",
            RoleType::Concept => "",
            RoleType::Result => "を",
            RoleType::Attribute => "な",
            RoleType::Time => "に",
            RoleType::Location => "で",
            RoleType::Manner => "に",
            RoleType::Quantity => "の",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleType::Entity => "entity",
            RoleType::Concept => "concept",
            RoleType::Result => "result",
            RoleType::Attribute => "attribute",
            RoleType::Time => "time",
            RoleType::Location => "location",
            RoleType::Manner => "manner",
            RoleType::Quantity => "quantity",
        }
    }
}

impl std::str::FromStr for RoleType {
    type Err = CodecError;

    /// Role by name, case-insensitive; grammatical aliases such as
    /// `subject` or `verb` are accepted
    fn from_str(s: &str) -> CodecResult<Self> {
        match s.to_lowercase().as_str() {
            "entity" | "subject" => Ok(RoleType::Entity),
            "concept" | "verb" => Ok(RoleType::Concept),
            "result" | "object" => Ok(RoleType::Result),
            "attribute" => Ok(RoleType::Attribute),
            "time" => Ok(RoleType::Time),
            "location" | "place" => Ok(RoleType::Location),
            "manner" => Ok(RoleType::Manner),
            "quantity" => Ok(RoleType::Quantity),
            _ => Err(CodecError::UnknownRoleName(s.to_string())),
        }
    }
}

impl std::fmt::Display for RoleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_round_trip() {
        for role in RoleType::ALL {
            assert_eq!(RoleType::from_letter(role.letter()), Some(role));
        }
        assert_eq!(RoleType::from_letter('X'), None);
    }

    #[test]
    fn test_index_matches_order() {
        for (i, role) in RoleType::ALL.iter().enumerate() {
            assert_eq!(role.index(), i);
        }
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("Verb".parse::<RoleType>(), Ok(RoleType::Concept));
        assert_eq!("subject".parse::<RoleType>(), Ok(RoleType::Entity));
        assert_eq!(
            "nope".parse::<RoleType>(),
            Err(CodecError::UnknownRoleName("nope".to_string()))
        );
        for role in RoleType::ALL {
            assert_eq!(role.as_str().parse::<RoleType>(), Ok(role));
        }
    }
}
