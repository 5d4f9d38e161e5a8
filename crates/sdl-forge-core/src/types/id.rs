//! Stable identifiers for declarations and fields.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use mti::prelude::{MagicTypeId, MagicTypeIdExt, V7};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SchemaError;

/// What an [`Id`] refers to; fixes the TypeID prefix.
pub trait IdTarget {
    const PREFIX: &'static str;
}

#[derive(Debug)]
pub enum TypeDeclTarget {}

impl IdTarget for TypeDeclTarget {
    const PREFIX: &'static str = "type";
}

#[derive(Debug)]
pub enum FieldTarget {}

impl IdTarget for FieldTarget {
    const PREFIX: &'static str = "field";
}

/// A UUIDv7 TypeID such as `type_01h455vb4pex5vsknk084sn02q`.
///
/// Assigned when the declaration or field is created. Renames keep it, and
/// so does moving a field to another type.
pub struct Id<T: IdTarget> {
    raw: MagicTypeId,
    target: PhantomData<fn() -> T>,
}

pub type TypeDeclId = Id<TypeDeclTarget>;
pub type FieldId = Id<FieldTarget>;

impl<T: IdTarget> Id<T> {
    pub fn new() -> Self {
        Self {
            raw: T::PREFIX.create_type_id::<V7>(),
            target: PhantomData,
        }
    }

    /// Parses an id, rejecting ids of the other kind.
    pub fn parse(s: &str) -> Result<Self, SchemaError> {
        let invalid = || SchemaError::InvalidId {
            expected: T::PREFIX,
            value: s.to_string(),
        };
        let raw = MagicTypeId::from_str(s).map_err(|_| invalid())?;
        if raw.prefix().as_str() != T::PREFIX {
            return Err(invalid());
        }
        Ok(Self {
            raw,
            target: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        self.raw.as_str()
    }
}

impl<T: IdTarget> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: IdTarget> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            target: PhantomData,
        }
    }
}

impl<T: IdTarget> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T: IdTarget> Eq for Id<T> {}

impl<T: IdTarget> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: IdTarget> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<T: IdTarget> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T: IdTarget> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.as_str()).finish()
    }
}

impl<T: IdTarget> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: IdTarget> FromStr for Id<T> {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<T: IdTarget> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, T: IdTarget> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
