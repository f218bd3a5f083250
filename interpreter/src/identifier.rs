use std::{borrow::Borrow, fmt::Display};

use crate::error::Error;

/// A variable name: one or more ASCII letters, case-sensitive.
#[derive(PartialEq, Eq, Hash, Clone, Debug, PartialOrd, Ord)]
pub struct Identifier(String);

pub fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic())
}

impl Identifier {
    pub fn parse(s: &str) -> Option<Self> {
        is_identifier(s).then(|| Identifier(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Lets `Variables` be queried with a plain `&str` atom.
impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Identifier {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Identifier::parse(s).ok_or(Error::InvalidIdentifier)
    }
}
