//! Three-character codes: a role letter and a two-digit sequential id.

use std::fmt;
use std::str::FromStr;

use super::RoleType;
use crate::ports::{CodecError, CodecResult};

/// Ids per role that fit in two digits
pub const MAX_CODES_PER_ROLE: usize = 100;

/// Characters in one code
pub const CODE_LEN: usize = 3;

/// A (role, id) pair, written `E00`, `C12`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    pub role: RoleType,
    pub id: u8,
}

impl Code {
    /// Fails when `id` does not fit in two digits
    pub fn new(role: RoleType, id: usize) -> CodecResult<Self> {
        if id >= MAX_CODES_PER_ROLE {
            return Err(CodecError::RoleExhausted { role });
        }
        Ok(Self { role, id: id as u8 })
    }

    pub fn parse(s: &str) -> CodecResult<Self> {
        let mut chars = s.chars();
        let (Some(letter), Some(d1), Some(d2), None) =
            (chars.next(), chars.next(), chars.next(), chars.next())
        else {
            return Err(CodecError::MalformedCode(s.to_string()));
        };

        let role = RoleType::from_letter(letter).ok_or(CodecError::UnknownRole(letter))?;
        match (d1.to_digit(10), d2.to_digit(10)) {
            (Some(a), Some(b)) => Ok(Self {
                role,
                id: (a * 10 + b) as u8,
            }),
            _ => Err(CodecError::MalformedCode(s.to_string())),
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.role.letter(), self.id)
    }
}

impl FromStr for Code {
    type Err = CodecError;

    fn from_str(s: &str) -> CodecResult<Self> {
        Code::parse(s)
    }
}

/// Walk a code string three characters at a time.
///
/// Yields `None` for a segment that is not a valid code (unknown letter,
/// non-digit id, or a short tail) so callers can skip it.
pub fn segments(code_string: &str) -> impl Iterator<Item = Option<Code>> + '_ {
    let chars: Vec<char> = code_string.chars().collect();
    (0..chars.len())
        .step_by(CODE_LEN)
        .map(move |start| {
            let end = (start + CODE_LEN).min(chars.len());
            let segment: String = chars[start..end].iter().collect();
            Code::parse(&segment).ok()
        })
}
