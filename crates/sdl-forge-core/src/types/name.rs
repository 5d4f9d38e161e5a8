use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// A validated SDL identifier matching `[_A-Za-z][_0-9A-Za-z]*`.
///
/// Used for type names, field names, type references, enum values,
/// directive names, and directive argument keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Creates a new `Name`, validating identifier syntax.
    pub fn new(s: impl Into<String>) -> Result<Self, SchemaError> {
        let s = s.into();
        if !is_identifier(&s) {
            return Err(SchemaError::InvalidName(s));
        }
        Ok(Self(s))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wraps a string already known to be a valid identifier.
    pub(crate) fn from_static(s: &'static str) -> Self {
        debug_assert!(is_identifier(s));
        Self(s.to_string())
    }

    /// Returns `self` with `suffix` appended. Digits keep the name valid.
    pub(crate) fn with_suffix(&self, suffix: u32) -> Self {
        Self(format!("{}{suffix}", self.0))
    }
}

/// Returns true if `s` is a valid SDL identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Name> for String {
    fn from(n: Name) -> String {
        n.0
    }
}

impl TryFrom<String> for Name {
    type Error = SchemaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Name {
    type Error = SchemaError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
