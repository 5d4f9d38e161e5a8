use serde::{Deserialize, Serialize};

use super::field_decl::FieldDecl;
use super::id::{FieldId, TypeDeclId};
use super::name::Name;
use super::type_decl::{TypeDecl, TypeKind};

/// Built-in scalar names offered as field types.
pub const BUILTIN_SCALARS: [&str; 7] = [
    "ID", "String", "Int", "Float", "Boolean", "DateTime", "Upload",
];

/// The root of the model: declarations in document order.
///
/// Type names are unique and field names are unique within each object
/// type whenever the schema was built through the edit operations. A schema
/// produced by the parser is taken verbatim and may contain duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub(crate) types: Vec<TypeDecl>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schema from declarations without checking uniqueness.
    pub fn from_types(types: Vec<TypeDecl>) -> Self {
        Self { types }
    }

    /// All declarations in order.
    pub fn types(&self) -> &[TypeDecl] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Looks up a declaration by id.
    pub fn type_decl(&self, id: &TypeDeclId) -> Option<&TypeDecl> {
        self.types.iter().find(|t| &t.id == id)
    }

    /// Looks up the first declaration with this name.
    pub fn type_by_name(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Fields of a declaration; empty for enums and unknown ids.
    pub fn fields(&self, id: &TypeDeclId) -> &[FieldDecl] {
        self.type_decl(id).map(TypeDecl::fields).unwrap_or(&[])
    }

    /// Values of an enum declaration; empty for objects and unknown ids.
    pub fn enum_values(&self, id: &TypeDeclId) -> &[Name] {
        self.type_decl(id).map(TypeDecl::values).unwrap_or(&[])
    }

    /// Finds a field anywhere in the schema, with its owner.
    pub fn field(&self, id: &FieldId) -> Option<(&TypeDecl, &FieldDecl)> {
        self.types
            .iter()
            .find_map(|t| t.field(id).map(|f| (t, f)))
    }

    /// Total number of fields across all object types.
    pub fn field_count(&self) -> usize {
        self.types.iter().map(|t| t.fields().len()).sum()
    }

    /// Names a field may reference: built-in scalars, then object types,
    /// then enum types, each in declaration order.
    pub fn available_field_types(&self) -> Vec<String> {
        let declared = |kind: TypeKind| {
            self.types
                .iter()
                .filter(move |t| t.kind() == kind)
                .map(|t| t.name.to_string())
        };
        BUILTIN_SCALARS
            .iter()
            .map(|s| s.to_string())
            .chain(declared(TypeKind::Object))
            .chain(declared(TypeKind::Enum))
            .collect()
    }

    /// Compares two schemas ignoring ids.
    pub fn structurally_eq(&self, other: &Schema) -> bool {
        self.types.len() == other.types.len()
            && self
                .types
                .iter()
                .zip(&other.types)
                .all(|(a, b)| a.structurally_eq(b))
    }

    pub(crate) fn position(&self, id: &TypeDeclId) -> Option<usize> {
        self.types.iter().position(|t| &t.id == id)
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, t) in self.types.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} {} ({} members)", t.kind(), t.name, t.fields().len() + t.values().len())?;
        }
        Ok(())
    }
}
