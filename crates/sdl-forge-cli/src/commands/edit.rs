//! `edit`: apply a TOML edit script to an SDL file through the [`Editor`].
//!
//! Script steps name types and fields; each step is resolved to ids against
//! the schema as it stands after the previous step.
//!
//! ```toml
//! [[edit]]
//! op = "add_field"
//! type = "User"
//! name = "email"
//!
//! [[edit]]
//! op = "set_scope"
//! type = "User"
//! field = "email"
//! scope = "pii"
//! ```

use std::path::Path;

use sdl_forge_core::{EditTarget, FieldId, Name, Schema, SchemaEdit, SchemaError, TypeDeclId, TypeKind};
use sdl_forge_dsl::directive::decode;
use sdl_forge_dsl::{Change, Editor, EditorError};
use serde::Deserialize;

use super::parse::read_source;
use crate::cli::EditArgs;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::{OutputContext, OutputMode, Tone};

#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(rename = "edit", default)]
    pub steps: Vec<ScriptStep>,
}

/// One name-addressed edit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    AddType {
        kind: TypeKind,
        name: String,
    },
    RenameType {
        #[serde(rename = "type")]
        type_name: String,
        to: String,
    },
    DeleteType {
        #[serde(rename = "type")]
        type_name: String,
    },
    AddField {
        #[serde(rename = "type")]
        type_name: String,
        name: String,
    },
    RenameField {
        #[serde(rename = "type")]
        type_name: String,
        field: String,
        to: String,
    },
    DeleteField {
        #[serde(rename = "type")]
        type_name: String,
        field: String,
    },
    MoveField {
        #[serde(rename = "type")]
        type_name: String,
        field: String,
        to_type: String,
        before: Option<String>,
    },
    SetFieldType {
        #[serde(rename = "type")]
        type_name: String,
        field: String,
        field_type: String,
    },
    SetList {
        #[serde(rename = "type")]
        type_name: String,
        field: String,
        list: bool,
    },
    SetRequired {
        #[serde(rename = "type")]
        type_name: String,
        field: String,
        required: bool,
    },
    SetDescription {
        #[serde(rename = "type")]
        type_name: String,
        field: Option<String>,
        description: Option<String>,
    },
    AddEnumValue {
        #[serde(rename = "type")]
        type_name: String,
        value: String,
    },
    DeleteEnumValue {
        #[serde(rename = "type")]
        type_name: String,
        value: String,
    },
    /// `directive` is in text form, e.g. `@dataEntity(dataEntityVersionId: "de-1")`.
    SetDirective {
        #[serde(rename = "type")]
        type_name: String,
        field: Option<String>,
        directive: String,
    },
    RemoveDirective {
        #[serde(rename = "type")]
        type_name: String,
        field: Option<String>,
        name: String,
    },
    SetScope {
        #[serde(rename = "type")]
        type_name: String,
        field: Option<String>,
        scope: String,
    },
}

impl ScriptStep {
    pub fn op(&self) -> &'static str {
        match self {
            Self::AddType { .. } => "add_type",
            Self::RenameType { .. } => "rename_type",
            Self::DeleteType { .. } => "delete_type",
            Self::AddField { .. } => "add_field",
            Self::RenameField { .. } => "rename_field",
            Self::DeleteField { .. } => "delete_field",
            Self::MoveField { .. } => "move_field",
            Self::SetFieldType { .. } => "set_field_type",
            Self::SetList { .. } => "set_list",
            Self::SetRequired { .. } => "set_required",
            Self::SetDescription { .. } => "set_description",
            Self::AddEnumValue { .. } => "add_enum_value",
            Self::DeleteEnumValue { .. } => "delete_enum_value",
            Self::SetDirective { .. } => "set_directive",
            Self::RemoveDirective { .. } => "remove_directive",
            Self::SetScope { .. } => "set_scope",
        }
    }

    /// Turns names into ids against `schema`.
    pub fn resolve(&self, schema: &Schema) -> Result<SchemaEdit, EditorError> {
        let edit = match self {
            Self::AddType { kind, name } => SchemaEdit::AddType {
                kind: *kind,
                base_name: Name::new(name.as_str())?,
            },
            Self::RenameType { type_name, to } => SchemaEdit::RenameType {
                type_id: type_id(schema, type_name)?,
                new_name: Name::new(to.as_str())?,
            },
            Self::DeleteType { type_name } => SchemaEdit::DeleteType {
                type_id: type_id(schema, type_name)?,
            },
            Self::AddField { type_name, name } => SchemaEdit::AddField {
                type_id: type_id(schema, type_name)?,
                base_name: Name::new(name.as_str())?,
            },
            Self::RenameField {
                type_name,
                field,
                to,
            } => {
                let (type_id, field_id) = field_ids(schema, type_name, field)?;
                SchemaEdit::RenameField {
                    type_id,
                    field_id,
                    new_name: Name::new(to.as_str())?,
                }
            }
            Self::DeleteField { type_name, field } => {
                let (type_id, field_id) = field_ids(schema, type_name, field)?;
                SchemaEdit::DeleteField { type_id, field_id }
            }
            Self::MoveField {
                type_name,
                field,
                to_type,
                before,
            } => {
                let (source, field_id) = field_ids(schema, type_name, field)?;
                let before = match before {
                    Some(before) => Some(field_ids(schema, to_type, before)?.1),
                    None => None,
                };
                SchemaEdit::MoveField {
                    source,
                    field_id,
                    target: type_id(schema, to_type)?,
                    before,
                }
            }
            Self::SetFieldType {
                type_name,
                field,
                field_type,
            } => {
                let (type_id, field_id) = field_ids(schema, type_name, field)?;
                SchemaEdit::SetFieldType {
                    type_id,
                    field_id,
                    type_name: Name::new(field_type.as_str())?,
                }
            }
            Self::SetList {
                type_name,
                field,
                list,
            } => {
                let (type_id, field_id) = field_ids(schema, type_name, field)?;
                SchemaEdit::SetFieldList {
                    type_id,
                    field_id,
                    is_list: *list,
                }
            }
            Self::SetRequired {
                type_name,
                field,
                required,
            } => {
                let (type_id, field_id) = field_ids(schema, type_name, field)?;
                SchemaEdit::SetFieldRequired {
                    type_id,
                    field_id,
                    is_required: *required,
                }
            }
            Self::SetDescription {
                type_name,
                field,
                description,
            } => SchemaEdit::SetDescription {
                target: target(schema, type_name, field.as_deref())?,
                description: description.clone(),
            },
            Self::AddEnumValue { type_name, value } => SchemaEdit::AddEnumValue {
                type_id: type_id(schema, type_name)?,
                base_value: Name::new(value.as_str())?,
            },
            Self::DeleteEnumValue { type_name, value } => SchemaEdit::DeleteEnumValue {
                type_id: type_id(schema, type_name)?,
                value: Name::new(value.as_str())?,
            },
            Self::SetDirective {
                type_name,
                field,
                directive,
            } => {
                let directive = decode(directive)?;
                SchemaEdit::SetDirective {
                    target: target(schema, type_name, field.as_deref())?,
                    name: directive.name,
                    arguments: directive.arguments,
                }
            }
            Self::RemoveDirective {
                type_name,
                field,
                name,
            } => SchemaEdit::RemoveDirective {
                target: target(schema, type_name, field.as_deref())?,
                name: Name::new(name.trim_start_matches('@'))?,
            },
            Self::SetScope {
                type_name,
                field,
                scope,
            } => SchemaEdit::SetAccessScope {
                target: target(schema, type_name, field.as_deref())?,
                scope: scope.clone(),
            },
        };
        Ok(edit)
    }
}

fn type_id(schema: &Schema, name: &str) -> Result<TypeDeclId, SchemaError> {
    schema
        .type_by_name(name)
        .map(|decl| decl.id.clone())
        .ok_or_else(|| SchemaError::UnknownType(name.to_string()))
}

fn field_ids(
    schema: &Schema,
    type_name: &str,
    field: &str,
) -> Result<(TypeDeclId, FieldId), SchemaError> {
    let decl = schema
        .type_by_name(type_name)
        .ok_or_else(|| SchemaError::UnknownType(type_name.to_string()))?;
    let field_decl = decl
        .field_named(field)
        .ok_or_else(|| SchemaError::UnknownField {
            type_name: type_name.to_string(),
            field: field.to_string(),
        })?;
    Ok((decl.id.clone(), field_decl.id.clone()))
}

fn target(schema: &Schema, type_name: &str, field: Option<&str>) -> Result<EditTarget, SchemaError> {
    match field {
        Some(field) => {
            let (type_id, field_id) = field_ids(schema, type_name, field)?;
            Ok(EditTarget::Field { type_id, field_id })
        }
        None => Ok(EditTarget::Type {
            type_id: type_id(schema, type_name)?,
        }),
    }
}

pub fn load_script(path: &Path) -> Result<Script, CliError> {
    let contents = read_source(path)?;
    toml::from_str(&contents).map_err(|e| CliError::Script {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Run the `edit` command.
pub fn run(args: EditArgs, config: &CliConfig, output: &OutputContext) -> Result<(), CliError> {
    let source_text = read_source(&args.file)?;
    let script = load_script(&args.script)?;

    let mut editor =
        Editor::from_sdl_with(&source_text, Vec::<Change>::new(), config.printer.options())
            .map_err(|e| match e {
                EditorError::Syntax(errors) => CliError::Parse {
                    errors,
                    source_text: source_text.clone(),
                    file: args.file.clone(),
                },
                EditorError::Generation(source) => CliError::Generation {
                    file: args.file.clone(),
                    source,
                },
                other => CliError::Other(other.to_string()),
            })?;

    for (i, step) in script.steps.iter().enumerate() {
        let fail = |source: EditorError| CliError::Edit {
            step: i + 1,
            op: step.op(),
            source,
        };
        let edit = step.resolve(editor.schema()).map_err(fail)?;
        let outcome = editor.apply(edit).map_err(fail)?;
        tracing::debug!(step = i + 1, op = step.op(), ?outcome, "applied script step");
    }

    let applied = editor.sink().len();
    let mut sdl = editor.sdl().to_string();
    if !sdl.is_empty() {
        sdl.push('\n');
    }

    if args.write {
        std::fs::write(&args.file, &sdl).map_err(|e| CliError::Io {
            path: args.file.clone(),
            source: e,
        })?;
    }

    match output.mode {
        OutputMode::Json => {
            output.print_json(&serde_json::json!({
                "file": args.file.display().to_string(),
                "edits": applied,
                "written": args.write,
                "sdl": editor.sdl(),
            }));
        }
        OutputMode::Human | OutputMode::Plain => {
            if !args.write {
                print!("{sdl}");
            }
            output.summary(Tone::Ok, &format!(
                "applied {applied} edits to {}",
                args.file.display()
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        sdl_forge_dsl::parse(
            "type User {\n  id: ID!\n  email: String\n}\n\ntype Account {\n  id: ID!\n}\n\nenum Role {\n  ADMIN\n}",
        )
        .unwrap()
    }

    fn script(text: &str) -> Vec<ScriptStep> {
        toml::from_str::<Script>(text).unwrap().steps
    }

    #[test]
    fn parses_every_shape() {
        let steps = script(
            r#"
[[edit]]
op = "add_type"
kind = "enum"
name = "Status"

[[edit]]
op = "move_field"
type = "User"
field = "email"
to_type = "Account"
before = "id"

[[edit]]
op = "set_scope"
type = "User"
scope = "admin"

[[edit]]
op = "set_directive"
type = "User"
field = "id"
directive = "@dataEntity(dataEntityVersionId: 'de-1')"
"#,
        );
        assert_eq!(steps.len(), 4);
        assert_eq!(
            steps[0],
            ScriptStep::AddType {
                kind: TypeKind::Enum,
                name: "Status".into()
            }
        );
        assert_eq!(steps[1].op(), "move_field");
        assert!(matches!(&steps[2], ScriptStep::SetScope { field: None, .. }));
    }

    #[test]
    fn empty_script_has_no_steps() {
        assert!(script("").is_empty());
    }

    #[test]
    fn unknown_op_is_rejected() {
        assert!(toml::from_str::<Script>("[[edit]]\nop = \"explode\"\n").is_err());
    }

    #[test]
    fn resolves_names_to_ids() {
        let schema = schema();
        let user = schema.type_by_name("User").unwrap();
        let step = ScriptStep::RenameField {
            type_name: "User".into(),
            field: "email".into(),
            to: "mail".into(),
        };
        match step.resolve(&schema).unwrap() {
            SchemaEdit::RenameField {
                type_id,
                field_id,
                new_name,
            } => {
                assert_eq!(type_id, user.id);
                assert_eq!(field_id, user.field_named("email").unwrap().id);
                assert_eq!(new_name, "mail");
            }
            other => panic!("unexpected edit {other:?}"),
        }
    }

    #[test]
    fn move_resolves_before_in_target() {
        let schema = schema();
        let account = schema.type_by_name("Account").unwrap();
        let step = ScriptStep::MoveField {
            type_name: "User".into(),
            field: "email".into(),
            to_type: "Account".into(),
            before: Some("id".into()),
        };
        match step.resolve(&schema).unwrap() {
            SchemaEdit::MoveField { target, before, .. } => {
                assert_eq!(target, account.id);
                assert_eq!(before.as_ref(), Some(&account.fields()[0].id));
            }
            other => panic!("unexpected edit {other:?}"),
        }
    }

    #[test]
    fn set_directive_decodes_text() {
        let schema = schema();
        let step = ScriptStep::SetDirective {
            type_name: "User".into(),
            field: Some("id".into()),
            directive: "@dataEntity(dataEntityVersionId: 'de-1')".into(),
        };
        match step.resolve(&schema).unwrap() {
            SchemaEdit::SetDirective {
                target,
                name,
                arguments,
            } => {
                assert!(matches!(target, EditTarget::Field { .. }));
                assert_eq!(name, "dataEntity");
                assert_eq!(arguments["dataEntityVersionId"], "de-1");
            }
            other => panic!("unexpected edit {other:?}"),
        }
    }

    #[test]
    fn unknown_names_fail_resolution() {
        let schema = schema();
        let err = ScriptStep::DeleteType {
            type_name: "Ghost".into(),
        }
        .resolve(&schema)
        .unwrap_err();
        assert!(matches!(err, EditorError::Schema(SchemaError::UnknownType(ref n)) if n == "Ghost"));

        let err = ScriptStep::DeleteField {
            type_name: "User".into(),
            field: "ghost".into(),
        }
        .resolve(&schema)
        .unwrap_err();
        assert!(matches!(err, EditorError::Schema(SchemaError::UnknownField { .. })));
    }

    #[test]
    fn bad_directive_text_is_syntax_error() {
        let schema = schema();
        let err = ScriptStep::SetDirective {
            type_name: "User".into(),
            field: None,
            directive: "dataEntity(".into(),
        }
        .resolve(&schema)
        .unwrap_err();
        assert!(matches!(err, EditorError::Syntax(_)));
    }

    #[test]
    fn invalid_new_name() {
        let schema = schema();
        let err = ScriptStep::RenameType {
            type_name: "Role".into(),
            to: "2fast".into(),
        }
        .resolve(&schema)
        .unwrap_err();
        assert!(matches!(err, EditorError::Schema(SchemaError::InvalidName(_))));
    }
}
