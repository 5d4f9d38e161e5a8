use std::fmt;

/// Errors that occur when constructing or editing schema types.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    /// Name failed identifier validation.
    InvalidName(String),
    /// A type or field with this name already exists.
    NameConflict {
        name: String,
        /// `None` for type names, the owning type for field names and enum values.
        within: Option<String>,
    },
    /// Not a TypeID, or one with the wrong prefix.
    InvalidId { expected: &'static str, value: String },
    /// No type with this id exists in the schema.
    UnknownType(String),
    /// No field with this id exists in the given type.
    UnknownField { type_name: String, field: String },
    /// The enum does not contain this value.
    UnknownEnumValue { type_name: String, value: String },
    /// The operation needs a type of a different kind.
    KindMismatch {
        type_name: String,
        expected: &'static str,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName(s) => {
                write!(
                    f,
                    "invalid name '{s}': must match [_A-Za-z][_0-9A-Za-z]*"
                )
            }
            Self::NameConflict { name, within: None } => {
                write!(f, "type name '{name}' is already taken")
            }
            Self::NameConflict {
                name,
                within: Some(owner),
            } => {
                write!(f, "name '{name}' is already taken within type '{owner}'")
            }
            Self::InvalidId { expected, value } => {
                write!(f, "invalid {expected} id '{value}'")
            }
            Self::UnknownType(id) => write!(f, "unknown type '{id}'"),
            Self::UnknownField { type_name, field } => {
                write!(f, "unknown field '{field}' in type '{type_name}'")
            }
            Self::UnknownEnumValue { type_name, value } => {
                write!(f, "enum '{type_name}' has no value '{value}'")
            }
            Self::KindMismatch {
                type_name,
                expected,
            } => {
                write!(f, "type '{type_name}' is not {expected}")
            }
        }
    }
}

impl std::error::Error for SchemaError {}
