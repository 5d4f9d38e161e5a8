use serde::{Deserialize, Serialize};

use super::directive::{access_scope, Directive};
use super::id::FieldId;
use super::name::Name;

/// A named, typed member of an object type.
///
/// `type_name` is a plain reference; it is never resolved against the schema.
/// `is_required` covers both `T!` and `[T!]`: the model does not tell a
/// required list apart from a list of required elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub id: FieldId,
    pub name: Name,
    pub type_name: Name,
    #[serde(default)]
    pub is_list: bool,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,
}

impl FieldDecl {
    /// Creates a nullable, non-list field with a fresh id.
    pub fn new(name: Name, type_name: Name) -> Self {
        Self {
            id: FieldId::new(),
            name,
            type_name,
            is_list: false,
            is_required: false,
            description: None,
            directives: Vec::new(),
        }
    }

    /// Sets the list flag.
    pub fn list(mut self, is_list: bool) -> Self {
        self.is_list = is_list;
        self
    }

    /// Sets the required flag.
    pub fn required(mut self, is_required: bool) -> Self {
        self.is_required = is_required;
        self
    }

    /// Appends a directive.
    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    /// Returns the access scope if the field carries one.
    pub fn access_scope(&self) -> Option<&str> {
        access_scope(&self.directives)
    }

    /// Compares everything but the id.
    pub fn structurally_eq(&self, other: &FieldDecl) -> bool {
        self.name == other.name
            && self.type_name == other.type_name
            && self.is_list == other.is_list
            && self.is_required == other.is_required
            && self.description == other.description
            && self.directives == other.directives
    }
}

impl std::fmt::Display for FieldDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", self.name)?;
        if self.is_list {
            write!(f, "[{}]", self.type_name)?;
        } else {
            write!(f, "{}", self.type_name)?;
        }
        if self.is_required {
            write!(f, "!")?;
        }
        Ok(())
    }
}
