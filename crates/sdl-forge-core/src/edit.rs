//! Edit operations on a [`Schema`].
//!
//! Every operation validates its inputs before the first write, so an `Err`
//! leaves the schema exactly as it was. Entities are addressed by id; names
//! are only used for the values being written.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::types::{
    is_identifier, Directive, FieldDecl, FieldId, Name, Schema, TypeBody, TypeDecl, TypeDeclId,
    TypeKind, WellKnownDirective,
};

/// Field type given to fields created by [`Schema::add_field`].
pub const DEFAULT_FIELD_TYPE: &str = "String";

/// Values seeded into enums created by [`Schema::add_type`].
pub const ENUM_PLACEHOLDER_VALUES: [&str; 2] = ["VALUE1", "VALUE2"];

/// The entity a directive or description edit applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditTarget {
    Type {
        type_id: TypeDeclId,
    },
    Field {
        type_id: TypeDeclId,
        field_id: FieldId,
    },
}

impl EditTarget {
    pub fn of_type(type_id: &TypeDeclId) -> Self {
        Self::Type {
            type_id: type_id.clone(),
        }
    }

    pub fn of_field(type_id: &TypeDeclId, field_id: &FieldId) -> Self {
        Self::Field {
            type_id: type_id.clone(),
            field_id: field_id.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// SchemaEdit
// ---------------------------------------------------------------------------

/// A single edit request, as delivered by an editing front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "edit", rename_all = "snake_case")]
#[non_exhaustive]
pub enum SchemaEdit {
    AddType {
        kind: TypeKind,
        base_name: Name,
    },
    RenameType {
        type_id: TypeDeclId,
        new_name: Name,
    },
    DeleteType {
        type_id: TypeDeclId,
    },
    AddField {
        type_id: TypeDeclId,
        base_name: Name,
    },
    RenameField {
        type_id: TypeDeclId,
        field_id: FieldId,
        new_name: Name,
    },
    DeleteField {
        type_id: TypeDeclId,
        field_id: FieldId,
    },
    /// Moves a field before `before`, or to the end of `target`.
    MoveField {
        source: TypeDeclId,
        field_id: FieldId,
        target: TypeDeclId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        before: Option<FieldId>,
    },
    SetFieldType {
        type_id: TypeDeclId,
        field_id: FieldId,
        type_name: Name,
    },
    SetFieldList {
        type_id: TypeDeclId,
        field_id: FieldId,
        is_list: bool,
    },
    SetFieldRequired {
        type_id: TypeDeclId,
        field_id: FieldId,
        is_required: bool,
    },
    SetDescription {
        target: EditTarget,
        description: Option<String>,
    },
    AddEnumValue {
        type_id: TypeDeclId,
        base_value: Name,
    },
    DeleteEnumValue {
        type_id: TypeDeclId,
        value: Name,
    },
    SetDirective {
        target: EditTarget,
        name: Name,
        #[serde(default)]
        arguments: BTreeMap<String, String>,
    },
    RemoveDirective {
        target: EditTarget,
        name: Name,
    },
    /// Sets the access scope; an empty scope removes the directive.
    SetAccessScope {
        target: EditTarget,
        scope: String,
    },
}

impl SchemaEdit {
    /// Short snake_case label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AddType { .. } => "add_type",
            Self::RenameType { .. } => "rename_type",
            Self::DeleteType { .. } => "delete_type",
            Self::AddField { .. } => "add_field",
            Self::RenameField { .. } => "rename_field",
            Self::DeleteField { .. } => "delete_field",
            Self::MoveField { .. } => "move_field",
            Self::SetFieldType { .. } => "set_field_type",
            Self::SetFieldList { .. } => "set_field_list",
            Self::SetFieldRequired { .. } => "set_field_required",
            Self::SetDescription { .. } => "set_description",
            Self::AddEnumValue { .. } => "add_enum_value",
            Self::DeleteEnumValue { .. } => "delete_enum_value",
            Self::SetDirective { .. } => "set_directive",
            Self::RemoveDirective { .. } => "remove_directive",
            Self::SetAccessScope { .. } => "set_access_scope",
        }
    }
}

impl fmt::Display for SchemaEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What an applied edit produced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EditOutcome {
    TypeAdded { id: TypeDeclId, name: Name },
    FieldAdded { id: FieldId, name: Name },
    /// The field's final name, which differs from the original when the
    /// target already had a field by that name.
    FieldMoved { id: FieldId, name: Name },
    EnumValueAdded(Name),
    TypeDeleted(TypeDecl),
    FieldDeleted(FieldDecl),
    Updated,
}

// ---------------------------------------------------------------------------
// Schema edit operations
// ---------------------------------------------------------------------------

impl Schema {
    /// Applies one edit request.
    pub fn apply(&mut self, edit: SchemaEdit) -> Result<EditOutcome, SchemaError> {
        let label = edit.label();
        let outcome = match edit {
            SchemaEdit::AddType { kind, base_name } => {
                let id = self.add_type(kind, &base_name);
                let name = self.type_name(&id)?;
                EditOutcome::TypeAdded { id, name }
            }
            SchemaEdit::RenameType { type_id, new_name } => {
                self.rename_type(&type_id, new_name)?;
                EditOutcome::Updated
            }
            SchemaEdit::DeleteType { type_id } => {
                EditOutcome::TypeDeleted(self.delete_type(&type_id)?)
            }
            SchemaEdit::AddField { type_id, base_name } => {
                let id = self.add_field(&type_id, &base_name)?;
                let name = self.field_name(&type_id, &id)?;
                EditOutcome::FieldAdded { id, name }
            }
            SchemaEdit::RenameField {
                type_id,
                field_id,
                new_name,
            } => {
                self.rename_field(&type_id, &field_id, new_name)?;
                EditOutcome::Updated
            }
            SchemaEdit::DeleteField { type_id, field_id } => {
                EditOutcome::FieldDeleted(self.delete_field(&type_id, &field_id)?)
            }
            SchemaEdit::MoveField {
                source,
                field_id,
                target,
                before,
            } => {
                let name = self.move_field(&source, &field_id, &target, before.as_ref())?;
                EditOutcome::FieldMoved { id: field_id, name }
            }
            SchemaEdit::SetFieldType {
                type_id,
                field_id,
                type_name,
            } => {
                self.set_field_type(&type_id, &field_id, type_name)?;
                EditOutcome::Updated
            }
            SchemaEdit::SetFieldList {
                type_id,
                field_id,
                is_list,
            } => {
                self.set_field_list(&type_id, &field_id, is_list)?;
                EditOutcome::Updated
            }
            SchemaEdit::SetFieldRequired {
                type_id,
                field_id,
                is_required,
            } => {
                self.set_field_required(&type_id, &field_id, is_required)?;
                EditOutcome::Updated
            }
            SchemaEdit::SetDescription {
                target,
                description,
            } => {
                self.set_description(&target, description)?;
                EditOutcome::Updated
            }
            SchemaEdit::AddEnumValue {
                type_id,
                base_value,
            } => EditOutcome::EnumValueAdded(self.add_enum_value(&type_id, &base_value)?),
            SchemaEdit::DeleteEnumValue { type_id, value } => {
                self.delete_enum_value(&type_id, &value)?;
                EditOutcome::Updated
            }
            SchemaEdit::SetDirective {
                target,
                name,
                arguments,
            } => {
                self.set_directive(&target, Directive { name, arguments })?;
                EditOutcome::Updated
            }
            SchemaEdit::RemoveDirective { target, name } => {
                self.remove_directive(&target, &name)?;
                EditOutcome::Updated
            }
            SchemaEdit::SetAccessScope { target, scope } => {
                self.set_access_scope(&target, &scope)?;
                EditOutcome::Updated
            }
        };
        tracing::debug!(edit = label, types = self.types.len(), "applied schema edit");
        Ok(outcome)
    }

    /// Adds an empty object type, or an enum seeded with two placeholder
    /// values, named `base_name` or `base_name` plus the smallest free
    /// numeric suffix.
    pub fn add_type(&mut self, kind: TypeKind, base_name: &Name) -> TypeDeclId {
        let name = unique_name(base_name, |candidate| {
            self.types.iter().any(|t| &t.name == candidate)
        });
        let decl = match kind {
            TypeKind::Object => TypeDecl::object(name, Vec::new()),
            TypeKind::Enum => TypeDecl::enumeration(
                name,
                ENUM_PLACEHOLDER_VALUES
                    .iter()
                    .map(|v| Name::from_static(v))
                    .collect(),
            ),
        };
        let id = decl.id.clone();
        self.types.push(decl);
        id
    }

    /// Renames a type. Field type references elsewhere are left as they are.
    ///
    /// # Errors
    ///
    /// `NameConflict` if a different type already has `new_name`.
    pub fn rename_type(&mut self, id: &TypeDeclId, new_name: Name) -> Result<(), SchemaError> {
        let index = self.index_of(id)?;
        if self
            .types
            .iter()
            .enumerate()
            .any(|(i, t)| i != index && t.name == new_name)
        {
            return Err(SchemaError::NameConflict {
                name: new_name.to_string(),
                within: None,
            });
        }
        self.types[index].name = new_name;
        Ok(())
    }

    /// Removes a type and returns it.
    pub fn delete_type(&mut self, id: &TypeDeclId) -> Result<TypeDecl, SchemaError> {
        let index = self.index_of(id)?;
        Ok(self.types.remove(index))
    }

    /// Appends a `String` field named after `base_name`, uniquified within the type.
    pub fn add_field(
        &mut self,
        type_id: &TypeDeclId,
        base_name: &Name,
    ) -> Result<FieldId, SchemaError> {
        let fields = self.type_mut(type_id)?.fields_mut()?;
        let name = unique_name(base_name, |candidate| {
            fields.iter().any(|f| &f.name == candidate)
        });
        let field = FieldDecl::new(name, Name::from_static(DEFAULT_FIELD_TYPE));
        let id = field.id.clone();
        fields.push(field);
        Ok(id)
    }

    /// Renames a field.
    ///
    /// # Errors
    ///
    /// `NameConflict` if another field of the same type already has `new_name`.
    pub fn rename_field(
        &mut self,
        type_id: &TypeDeclId,
        field_id: &FieldId,
        new_name: Name,
    ) -> Result<(), SchemaError> {
        let decl = self.type_mut(type_id)?;
        let type_name = decl.name.to_string();
        let index = decl.field_index(field_id)?;
        let fields = decl.fields_mut()?;
        if fields
            .iter()
            .enumerate()
            .any(|(i, f)| i != index && f.name == new_name)
        {
            return Err(SchemaError::NameConflict {
                name: new_name.to_string(),
                within: Some(type_name),
            });
        }
        fields[index].name = new_name;
        Ok(())
    }

    /// Removes a field and returns it.
    pub fn delete_field(
        &mut self,
        type_id: &TypeDeclId,
        field_id: &FieldId,
    ) -> Result<FieldDecl, SchemaError> {
        let decl = self.type_mut(type_id)?;
        let index = decl.field_index(field_id)?;
        Ok(decl.fields_mut()?.remove(index))
    }

    /// Moves a field from `source` into `target`, before `before` or at the end.
    ///
    /// The field keeps its id, directives and flags. If `target` already has
    /// a field with the same name, the moved field gets the smallest free
    /// numeric suffix. Moving within one type only reorders. A `before`
    /// that is not in `target` appends; a `before` equal to the moved field
    /// leaves it where it was.
    ///
    /// Returns the field's final name.
    pub fn move_field(
        &mut self,
        source: &TypeDeclId,
        field_id: &FieldId,
        target: &TypeDeclId,
        before: Option<&FieldId>,
    ) -> Result<Name, SchemaError> {
        let source_index = self.index_of(source)?;
        let target_index = self.index_of(target)?;
        let from = self.types[source_index].field_index(field_id)?;
        self.types[target_index].fields_mut()?;

        let mut field = self.types[source_index].fields_mut()?.remove(from);
        let fields = self.types[target_index].fields_mut()?;

        if source_index != target_index {
            field.name = unique_name(&field.name, |candidate| {
                fields.iter().any(|f| &f.name == candidate)
            });
        }
        let at = match before {
            Some(b) if b == field_id && source_index == target_index => from,
            Some(b) => fields
                .iter()
                .position(|f| &f.id == b)
                .unwrap_or(fields.len()),
            None => fields.len(),
        };
        let name = field.name.clone();
        fields.insert(at, field);
        Ok(name)
    }

    /// Points a field at another type. The name is not checked against the schema.
    pub fn set_field_type(
        &mut self,
        type_id: &TypeDeclId,
        field_id: &FieldId,
        type_name: Name,
    ) -> Result<(), SchemaError> {
        self.field_mut(type_id, field_id)?.type_name = type_name;
        Ok(())
    }

    pub fn set_field_list(
        &mut self,
        type_id: &TypeDeclId,
        field_id: &FieldId,
        is_list: bool,
    ) -> Result<(), SchemaError> {
        self.field_mut(type_id, field_id)?.is_list = is_list;
        Ok(())
    }

    pub fn set_field_required(
        &mut self,
        type_id: &TypeDeclId,
        field_id: &FieldId,
        is_required: bool,
    ) -> Result<(), SchemaError> {
        self.field_mut(type_id, field_id)?.is_required = is_required;
        Ok(())
    }

    /// Adds an enum value named after `base_value`, uniquified within the enum.
    pub fn add_enum_value(
        &mut self,
        type_id: &TypeDeclId,
        base_value: &Name,
    ) -> Result<Name, SchemaError> {
        let values = self.type_mut(type_id)?.values_mut()?;
        let value = unique_name(base_value, |candidate| values.contains(candidate));
        values.push(value.clone());
        Ok(value)
    }

    /// Removes every occurrence of `value` from an enum.
    pub fn delete_enum_value(
        &mut self,
        type_id: &TypeDeclId,
        value: &Name,
    ) -> Result<(), SchemaError> {
        let decl = self.type_mut(type_id)?;
        let type_name = decl.name.to_string();
        let values = decl.values_mut()?;
        if !values.contains(value) {
            return Err(SchemaError::UnknownEnumValue {
                type_name,
                value: value.to_string(),
            });
        }
        values.retain(|v| v != value);
        Ok(())
    }

    /// Adds `directive`, or replaces the existing directive of the same name.
    ///
    /// Later duplicates of that name are dropped. Setting the access scope
    /// directive with an empty or missing scope removes it instead.
    pub fn set_directive(
        &mut self,
        target: &EditTarget,
        directive: Directive,
    ) -> Result<(), SchemaError> {
        if let Some(key) = directive.arguments.keys().find(|k| !is_identifier(k)) {
            return Err(SchemaError::InvalidName(key.clone()));
        }
        let scope = WellKnownDirective::AccessScope;
        if directive.name == scope.name()
            && scope
                .value_of(&directive)
                .map_or(true, |v| v.trim().is_empty())
        {
            return self.remove_directive(target, &directive.name).map(|_| ());
        }

        let directives = self.directives_mut(target)?;
        match directives.iter().position(|d| d.name == directive.name) {
            Some(first) => {
                let name = directive.name.clone();
                directives[first] = directive;
                let mut i = 0;
                directives.retain(|d| {
                    let keep = i <= first || d.name != name;
                    i += 1;
                    keep
                });
            }
            None => directives.push(directive),
        }
        Ok(())
    }

    /// Removes every directive named `name`. Returns whether any was removed.
    pub fn remove_directive(
        &mut self,
        target: &EditTarget,
        name: &Name,
    ) -> Result<bool, SchemaError> {
        let directives = self.directives_mut(target)?;
        let before = directives.len();
        directives.retain(|d| &d.name != name);
        Ok(directives.len() != before)
    }

    /// Sets the access scope. A blank scope removes the directive.
    pub fn set_access_scope(&mut self, target: &EditTarget, scope: &str) -> Result<(), SchemaError> {
        self.set_directive(target, WellKnownDirective::AccessScope.compose(scope.trim()))
    }

    /// Sets or clears a description. Blank text clears it.
    pub fn set_description(
        &mut self,
        target: &EditTarget,
        description: Option<String>,
    ) -> Result<(), SchemaError> {
        let description = description.filter(|d| !d.trim().is_empty());
        match target {
            EditTarget::Type { type_id } => self.type_mut(type_id)?.description = description,
            EditTarget::Field { type_id, field_id } => {
                self.field_mut(type_id, field_id)?.description = description
            }
        }
        Ok(())
    }

    // -- Lookup helpers --

    fn index_of(&self, id: &TypeDeclId) -> Result<usize, SchemaError> {
        self.position(id)
            .ok_or_else(|| SchemaError::UnknownType(id.to_string()))
    }

    fn type_mut(&mut self, id: &TypeDeclId) -> Result<&mut TypeDecl, SchemaError> {
        let index = self.index_of(id)?;
        Ok(&mut self.types[index])
    }

    fn type_name(&self, id: &TypeDeclId) -> Result<Name, SchemaError> {
        Ok(self.types[self.index_of(id)?].name.clone())
    }

    fn field_name(&self, type_id: &TypeDeclId, field_id: &FieldId) -> Result<Name, SchemaError> {
        let decl = &self.types[self.index_of(type_id)?];
        Ok(decl.fields()[decl.field_index(field_id)?].name.clone())
    }

    fn field_mut(
        &mut self,
        type_id: &TypeDeclId,
        field_id: &FieldId,
    ) -> Result<&mut FieldDecl, SchemaError> {
        let decl = self.type_mut(type_id)?;
        let index = decl.field_index(field_id)?;
        Ok(&mut decl.fields_mut()?[index])
    }

    fn directives_mut(&mut self, target: &EditTarget) -> Result<&mut Vec<Directive>, SchemaError> {
        match target {
            EditTarget::Type { type_id } => Ok(&mut self.type_mut(type_id)?.directives),
            EditTarget::Field { type_id, field_id } => {
                Ok(&mut self.field_mut(type_id, field_id)?.directives)
            }
        }
    }
}

impl TypeDecl {
    fn field_index(&self, id: &FieldId) -> Result<usize, SchemaError> {
        if self.kind() != TypeKind::Object {
            return Err(self.kind_mismatch(TypeKind::Object));
        }
        self.fields()
            .iter()
            .position(|f| &f.id == id)
            .ok_or_else(|| SchemaError::UnknownField {
                type_name: self.name.to_string(),
                field: id.to_string(),
            })
    }

    fn fields_mut(&mut self) -> Result<&mut Vec<FieldDecl>, SchemaError> {
        let mismatch = self.kind_mismatch(TypeKind::Object);
        match &mut self.body {
            TypeBody::Object(fields) => Ok(fields),
            TypeBody::Enum(_) => Err(mismatch),
        }
    }

    fn values_mut(&mut self) -> Result<&mut Vec<Name>, SchemaError> {
        let mismatch = self.kind_mismatch(TypeKind::Enum);
        match &mut self.body {
            TypeBody::Enum(values) => Ok(values),
            TypeBody::Object(_) => Err(mismatch),
        }
    }

    fn kind_mismatch(&self, expected: TypeKind) -> SchemaError {
        SchemaError::KindMismatch {
            type_name: self.name.to_string(),
            expected: expected.description(),
        }
    }
}

/// Returns `base` if `taken` rejects it, else `base1`, `base2`, ...
fn unique_name(base: &Name, taken: impl Fn(&Name) -> bool) -> Name {
    if !taken(base) {
        return base.clone();
    }
    (1..)
        .map(|n| base.with_suffix(n))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.clone())
}
