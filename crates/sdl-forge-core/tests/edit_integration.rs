use std::collections::HashSet;

use sdl_forge_core::types::*;
use sdl_forge_core::{EditOutcome, EditTarget, SchemaEdit, SchemaError};

fn name(s: &str) -> Name {
    Name::new(s).unwrap()
}

/// Build a small account schema through the edit API only.
fn build_account_schema() -> (Schema, TypeDeclId, TypeDeclId) {
    let mut schema = Schema::new();
    let user = schema.add_type(TypeKind::Object, &name("User"));
    let account = schema.add_type(TypeKind::Object, &name("Account"));

    for (type_id, fields) in [(&user, ["id", "email"]), (&account, ["id", "email"])] {
        for field in fields {
            schema.add_field(type_id, &name(field)).unwrap();
        }
    }
    (schema, user, account)
}

#[test]
fn moving_a_scoped_field_across_types() {
    let (mut schema, user, account) = build_account_schema();
    let email = schema.type_decl(&user).unwrap().field_named("email").unwrap().id.clone();
    schema
        .set_access_scope(&EditTarget::of_field(&user, &email), "pii")
        .unwrap();

    let outcome = schema
        .apply(SchemaEdit::MoveField {
            source: user.clone(),
            field_id: email.clone(),
            target: account.clone(),
            before: None,
        })
        .unwrap();

    assert_eq!(
        outcome,
        EditOutcome::FieldMoved {
            id: email.clone(),
            name: name("email1"),
        }
    );
    let moved: Vec<_> = schema.fields(&account).iter().map(|f| f.name.as_str()).collect();
    assert_eq!(moved, ["id", "email", "email1"]);
    let (owner, field) = schema.field(&email).unwrap();
    assert_eq!(owner.id, account);
    assert_eq!(field.access_scope(), Some("pii"));
    assert_eq!(schema.fields(&user).len(), 1);
}

#[test]
fn ids_survive_renames() {
    let (mut schema, user, _) = build_account_schema();
    let email = schema.fields(&user)[1].id.clone();
    schema.rename_type(&user, name("Member")).unwrap();
    schema.rename_field(&user, &email, name("mail")).unwrap();

    let (owner, field) = schema.field(&email).unwrap();
    assert_eq!(owner.name.as_str(), "Member");
    assert_eq!(field.name.as_str(), "mail");
}

#[test]
fn failed_edits_leave_schema_untouched() {
    let (mut schema, user, account) = build_account_schema();
    let snapshot = schema.clone();

    let email = schema.fields(&user)[1].id.clone();
    let attempts = vec![
        SchemaEdit::RenameType {
            type_id: account.clone(),
            new_name: name("User"),
        },
        SchemaEdit::RenameField {
            type_id: user.clone(),
            field_id: email.clone(),
            new_name: name("id"),
        },
        SchemaEdit::DeleteField {
            type_id: account.clone(),
            field_id: email.clone(),
        },
        SchemaEdit::AddEnumValue {
            type_id: user.clone(),
            base_value: name("VALUE"),
        },
        SchemaEdit::DeleteType {
            type_id: TypeDeclId::new(),
        },
    ];

    for edit in attempts {
        let label = edit.label();
        assert!(schema.apply(edit).is_err(), "{label} should fail");
        assert_eq!(schema, snapshot, "{label} mutated the schema");
    }
}

#[test]
fn error_kinds_for_bad_targets() {
    let (mut schema, user, _) = build_account_schema();
    let role = schema.add_type(TypeKind::Enum, &name("Role"));

    let err = schema.add_field(&role, &name("x")).unwrap_err();
    assert!(matches!(err, SchemaError::KindMismatch { .. }));
    assert!(err.to_string().contains("is not an object type"));

    let err = schema.add_enum_value(&user, &name("X")).unwrap_err();
    assert!(err.to_string().contains("is not an enum type"));
}

#[test]
fn edit_script_from_json() {
    let (mut schema, user, _) = build_account_schema();
    let user_id = user.to_string();
    let script = format!(
        r#"[
            {{"edit": "add_field", "type_id": "{user_id}", "base_name": "newField"}},
            {{"edit": "set_directive", "target": {{"kind": "type", "type_id": "{user_id}"}},
              "name": "dataEntity", "arguments": {{"dataEntityVersionId": "v-3"}}}},
            {{"edit": "set_description", "target": {{"kind": "type", "type_id": "{user_id}"}},
              "description": "A registered member."}}
        ]"#
    );
    let edits: Vec<SchemaEdit> = serde_json::from_str(&script).unwrap();
    for edit in edits {
        schema.apply(edit).unwrap();
    }

    let decl = schema.type_decl(&user).unwrap();
    assert_eq!(decl.fields().len(), 3);
    assert_eq!(decl.fields()[2].type_name.as_str(), "String");
    assert_eq!(decl.description.as_deref(), Some("A registered member."));
    assert_eq!(
        WellKnownDirective::DataEntity.value_of(&decl.directives[0]),
        Some("v-3")
    );
}

#[test]
fn available_types_follow_edits() {
    let (mut schema, _, account) = build_account_schema();
    schema.add_type(TypeKind::Enum, &name("Status"));
    schema.delete_type(&account).unwrap();

    let available = schema.available_field_types();
    assert!(available.ends_with(&["User".to_string(), "Status".to_string()]));
    let unique: HashSet<_> = available.iter().collect();
    assert_eq!(unique.len(), available.len());
}
