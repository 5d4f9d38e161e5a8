use serde::{Deserialize, Serialize};

use super::directive::{access_scope, Directive};
use super::field_decl::FieldDecl;
use super::id::{FieldId, TypeDeclId};
use super::name::Name;

/// The two declaration kinds the editor supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Object,
    Enum,
}

impl TypeKind {
    /// The SDL keyword introducing this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Object => "type",
            Self::Enum => "enum",
        }
    }

    /// Human-readable article form used in error messages.
    pub fn description(self) -> &'static str {
        match self {
            Self::Object => "an object type",
            Self::Enum => "an enum type",
        }
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// Members of a declaration: fields for objects, values for enums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "members", rename_all = "snake_case")]
pub enum TypeBody {
    Object(Vec<FieldDecl>),
    Enum(Vec<Name>),
}

/// A named object or enum declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub id: TypeDeclId,
    pub name: Name,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,
    pub body: TypeBody,
}

impl TypeDecl {
    /// Creates an object type with the given fields.
    pub fn object(name: Name, fields: Vec<FieldDecl>) -> Self {
        Self {
            id: TypeDeclId::new(),
            name,
            description: None,
            directives: Vec::new(),
            body: TypeBody::Object(fields),
        }
    }

    /// Creates an enum type with the given values.
    pub fn enumeration(name: Name, values: Vec<Name>) -> Self {
        Self {
            id: TypeDeclId::new(),
            name,
            description: None,
            directives: Vec::new(),
            body: TypeBody::Enum(values),
        }
    }

    /// Appends a directive.
    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn kind(&self) -> TypeKind {
        match self.body {
            TypeBody::Object(_) => TypeKind::Object,
            TypeBody::Enum(_) => TypeKind::Enum,
        }
    }

    /// Fields of an object type; empty for enums.
    pub fn fields(&self) -> &[FieldDecl] {
        match &self.body {
            TypeBody::Object(fields) => fields,
            TypeBody::Enum(_) => &[],
        }
    }

    /// Values of an enum type; empty for objects.
    pub fn values(&self) -> &[Name] {
        match &self.body {
            TypeBody::Enum(values) => values,
            TypeBody::Object(_) => &[],
        }
    }

    /// Looks up a field by id.
    pub fn field(&self, id: &FieldId) -> Option<&FieldDecl> {
        self.fields().iter().find(|f| &f.id == id)
    }

    /// Looks up the first field with this name.
    pub fn field_named(&self, name: &str) -> Option<&FieldDecl> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Returns the access scope if the type carries one.
    pub fn access_scope(&self) -> Option<&str> {
        access_scope(&self.directives)
    }

    /// Compares everything but ids, recursively.
    pub fn structurally_eq(&self, other: &TypeDecl) -> bool {
        if self.name != other.name
            || self.description != other.description
            || self.directives != other.directives
        {
            return false;
        }
        match (&self.body, &other.body) {
            (TypeBody::Object(a), TypeBody::Object(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.structurally_eq(y))
            }
            (TypeBody::Enum(a), TypeBody::Enum(b)) => a == b,
            _ => false,
        }
    }
}
