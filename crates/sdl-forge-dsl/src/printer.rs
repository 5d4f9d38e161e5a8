use sdl_forge_core::types::{Directive, FieldDecl, Schema, TypeBody, TypeDecl};

use crate::directive::{check_quotable, encode};
use crate::error::GenerationError;

/// Printer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// Spaces per indentation level for members.
    pub indent: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

/// Print a schema to SDL text with two-space indentation.
///
/// # Errors
///
/// Returns a `GenerationError` if a directive argument or a description
/// cannot be written in quoted form.
pub fn print(schema: &Schema) -> Result<String, GenerationError> {
    print_with(schema, &PrintOptions::default())
}

/// Print a schema to SDL text with the given options.
///
/// Declarations are separated by one blank line and the result carries no
/// leading or trailing whitespace.
pub fn print_with(schema: &Schema, options: &PrintOptions) -> Result<String, GenerationError> {
    let indent = " ".repeat(options.indent);
    let mut output = String::new();
    for (i, decl) in schema.types().iter().enumerate() {
        if i > 0 {
            output.push_str("\n\n");
        }
        print_type(decl, &indent, &mut output)?;
    }
    Ok(output.trim().to_string())
}

fn print_type(decl: &TypeDecl, indent: &str, output: &mut String) -> Result<(), GenerationError> {
    if let Some(description) = &decl.description {
        print_description(description, decl.name.as_str(), "", output)?;
    }

    output.push_str(decl.kind().keyword());
    output.push(' ');
    output.push_str(decl.name.as_str());
    print_directives(&decl.directives, output)?;
    output.push_str(" {\n");

    match &decl.body {
        TypeBody::Object(fields) => {
            for field in fields {
                print_field(field, decl, indent, output)?;
            }
        }
        TypeBody::Enum(values) => {
            for value in values {
                output.push_str(indent);
                output.push_str(value.as_str());
                output.push('\n');
            }
        }
    }

    output.push('}');
    Ok(())
}

fn print_field(
    field: &FieldDecl,
    owner: &TypeDecl,
    indent: &str,
    output: &mut String,
) -> Result<(), GenerationError> {
    if let Some(description) = &field.description {
        let path = format!("{}.{}", owner.name, field.name);
        print_description(description, &path, indent, output)?;
    }

    output.push_str(indent);
    output.push_str(field.name.as_str());
    output.push_str(": ");
    if field.is_list {
        output.push('[');
        output.push_str(field.type_name.as_str());
        output.push(']');
    } else {
        output.push_str(field.type_name.as_str());
    }
    if field.is_required {
        output.push('!');
    }
    print_directives(&field.directives, output)?;
    output.push('\n');
    Ok(())
}

fn print_directives(directives: &[Directive], output: &mut String) -> Result<(), GenerationError> {
    for directive in directives {
        check_quotable(directive)?;
        output.push(' ');
        output.push_str(&encode(directive));
    }
    Ok(())
}

/// Single-line text without quotes or backslashes uses `"…"`; everything
/// else uses a `"""` block, which takes both verbatim.
fn print_description(
    text: &str,
    owner: &str,
    indent: &str,
    output: &mut String,
) -> Result<(), GenerationError> {
    if text.contains("\"\"\"") || text.ends_with('"') {
        return Err(GenerationError::UnquotableDescription {
            owner: owner.to_string(),
        });
    }

    output.push_str(indent);
    if text.contains('\n') {
        output.push_str("\"\"\"\n");
        for line in text.lines() {
            if !line.is_empty() {
                output.push_str(indent);
                output.push_str(line);
            }
            output.push('\n');
        }
        output.push_str(indent);
        output.push_str("\"\"\"\n");
    } else if text.contains(['"', '\\']) {
        output.push_str("\"\"\"");
        output.push_str(text);
        output.push_str("\"\"\"\n");
    } else {
        output.push('"');
        output.push_str(text);
        output.push_str("\"\n");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use sdl_forge_core::types::{Name, WellKnownDirective};

    use super::*;

    fn name(s: &str) -> Name {
        Name::new(s).unwrap()
    }

    fn user_type() -> TypeDecl {
        TypeDecl::object(
            name("User"),
            vec![
                FieldDecl::new(name("id"), name("ID")).required(true),
                FieldDecl::new(name("roles"), name("Role")).list(true).required(true),
                FieldDecl::new(name("nickname"), name("String")),
            ],
        )
    }

    #[test]
    fn print_object_type() {
        let schema = Schema::from_types(vec![user_type()]);
        let output = print(&schema).unwrap();
        assert_eq!(
            output,
            "type User {\n  id: ID!\n  roles: [Role]!\n  nickname: String\n}"
        );
    }

    #[test]
    fn print_enum_type() {
        let schema = Schema::from_types(vec![TypeDecl::enumeration(
            name("Role"),
            vec![name("ADMIN"), name("USER")],
        )]);
        assert_eq!(print(&schema).unwrap(), "enum Role {\n  ADMIN\n  USER\n}");
    }

    #[test]
    fn blank_line_between_declarations() {
        let schema = Schema::from_types(vec![
            TypeDecl::object(name("A"), vec![]),
            TypeDecl::object(name("B"), vec![]),
        ]);
        assert_eq!(print(&schema).unwrap(), "type A {\n}\n\ntype B {\n}");
    }

    #[test]
    fn empty_schema_prints_empty() {
        assert_eq!(print(&Schema::new()).unwrap(), "");
    }

    #[test]
    fn directives_follow_header_and_field() {
        let mut decl = user_type()
            .with_directive(WellKnownDirective::DataEntity.compose("de-1"))
            .with_directive(Directive::deprecated());
        if let TypeBody::Object(fields) = &mut decl.body {
            fields[0]
                .directives
                .push(WellKnownDirective::AccessScope.compose("admin"));
        }
        let output = print(&Schema::from_types(vec![decl])).unwrap();
        assert!(output.starts_with(
            "type User @dataEntity(dataEntityVersionId:\"de-1\") @deprecated {\n"
        ));
        assert!(output.contains("  id: ID! @dpi_requiredScope(scope:\"admin\")\n"));
    }

    #[test]
    fn custom_indent() {
        let schema = Schema::from_types(vec![user_type()]);
        let output = print_with(&schema, &PrintOptions { indent: 4 }).unwrap();
        assert!(output.contains("\n    id: ID!\n"));
    }

    #[test]
    fn descriptions() {
        let mut decl = user_type();
        decl.description = Some("A person.".into());
        if let TypeBody::Object(fields) = &mut decl.body {
            fields[0].description = Some("Stable key.\nNever reused.".into());
            fields[1].description = Some(r#"Roles "granted" here"#.into());
        }
        let output = print(&Schema::from_types(vec![decl])).unwrap();
        assert!(output.starts_with("\"A person.\"\ntype User {\n"));
        assert!(output.contains("  \"\"\"\n  Stable key.\n  Never reused.\n  \"\"\"\n  id: ID!"));
        assert!(output.contains("  \"\"\"Roles \"granted\" here\"\"\"\n  roles"));
    }

    #[test]
    fn unquotable_description() {
        let mut decl = user_type();
        decl.description = Some("ends with \"quote\"".into());
        let err = print(&Schema::from_types(vec![decl])).unwrap_err();
        assert!(matches!(err, GenerationError::UnquotableDescription { owner } if owner == "User"));
    }

    #[test]
    fn unquotable_argument() {
        let decl = user_type().with_directive(WellKnownDirective::AccessScope.compose("a\"b"));
        let err = print(&Schema::from_types(vec![decl])).unwrap_err();
        assert!(matches!(err, GenerationError::UnquotableArgument { .. }));
    }

    #[test]
    fn argument_key_with_space_is_refused() {
        let meta = Directive::with_arguments(name("meta"), [("bad key", "v")]);
        let decl = user_type().with_directive(meta);
        let err = print(&Schema::from_types(vec![decl])).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::InvalidArgumentKey { argument, .. } if argument == "bad key"
        ));
    }
}
