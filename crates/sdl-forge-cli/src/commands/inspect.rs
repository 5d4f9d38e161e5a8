use sdl_forge_core::{FieldDecl, TypeBody, TypeDecl};

use super::parse::load_schema;
use crate::cli::InspectArgs;
use crate::error::CliError;
use crate::output::{OutputContext, OutputMode};

/// Run the `inspect` command: list types, fields and access scopes.
pub fn run(args: InspectArgs, output: &OutputContext) -> Result<(), CliError> {
    let (_, schema) = load_schema(&args.file)?;

    let selected: Vec<&TypeDecl> = match &args.type_name {
        Some(name) => vec![schema
            .type_by_name(name)
            .ok_or_else(|| CliError::TypeNotFound { name: name.clone() })?],
        None => schema.types().iter().collect(),
    };

    match output.mode {
        OutputMode::Human => render_human(&selected, output),
        OutputMode::Json => {
            let types: Vec<serde_json::Value> = selected.iter().map(|t| type_to_json(t)).collect();
            output.print_json(&serde_json::json!({ "types": types }));
        }
        OutputMode::Plain => {
            for decl in &selected {
                render_plain(decl);
            }
        }
    }
    Ok(())
}

fn render_human(types: &[&TypeDecl], output: &OutputContext) {
    if types.is_empty() {
        output.note("No types declared.");
        return;
    }
    for (i, decl) in types.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let scope = decl
            .access_scope()
            .map(|s| format!("  scope: {s}"))
            .unwrap_or_default();
        println!("{} {}{scope}", decl.kind().keyword(), decl.name);
        if let Some(description) = &decl.description {
            println!("  \"{}\"", first_line(description));
        }
        match &decl.body {
            TypeBody::Object(fields) => {
                for field in fields {
                    let scope = field
                        .access_scope()
                        .map(|s| format!("scope: {s}"))
                        .unwrap_or_default();
                    println!(
                        "  {:<20} {:<20} {scope}",
                        field.name.as_str(),
                        type_expr(field)
                    );
                }
            }
            TypeBody::Enum(values) => {
                for value in values {
                    println!("  {value}");
                }
            }
        }
    }
}

/// One line per member: `Type<TAB>member<TAB>type<TAB>scope`.
fn render_plain(decl: &TypeDecl) {
    match &decl.body {
        TypeBody::Object(fields) => {
            for field in fields {
                println!(
                    "{}\t{}\t{}\t{}",
                    decl.name,
                    field.name,
                    type_expr(field),
                    field.access_scope().unwrap_or("")
                );
            }
        }
        TypeBody::Enum(values) => {
            for value in values {
                println!("{}\t{value}\t\t", decl.name);
            }
        }
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

/// The field's type as SDL writes it, e.g. `[Role]!`.
fn type_expr(field: &FieldDecl) -> String {
    let mut expr = if field.is_list {
        format!("[{}]", field.type_name)
    } else {
        field.type_name.to_string()
    };
    if field.is_required {
        expr.push('!');
    }
    expr
}

fn type_to_json(decl: &TypeDecl) -> serde_json::Value {
    let mut json = serde_json::json!({
        "id": decl.id.as_str(),
        "name": decl.name.as_str(),
        "kind": decl.kind().keyword(),
        "description": decl.description,
        "scope": decl.access_scope(),
    });
    match &decl.body {
        TypeBody::Object(fields) => {
            let fields: Vec<serde_json::Value> = fields
                .iter()
                .map(|f| {
                    serde_json::json!({
                        "id": f.id.as_str(),
                        "name": f.name.as_str(),
                        "type": type_expr(f),
                        "list": f.is_list,
                        "required": f.is_required,
                        "scope": f.access_scope(),
                    })
                })
                .collect();
            json["fields"] = serde_json::Value::from(fields);
        }
        TypeBody::Enum(values) => {
            let values: Vec<&str> = values.iter().map(|v| v.as_str()).collect();
            json["values"] = serde_json::json!(values);
        }
    }
    json
}
