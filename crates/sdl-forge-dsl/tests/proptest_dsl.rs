use proptest::prelude::*;
use sdl_forge_core::types::{Directive, Name, Schema, TypeKind, BUILTIN_SCALARS};
use sdl_forge_core::EditTarget;
use sdl_forge_dsl::directive::{decode, encode};
use sdl_forge_dsl::{parse, print};

const DECLARATION_KEYWORDS: [&str; 10] = [
    "type",
    "enum",
    "input",
    "interface",
    "union",
    "scalar",
    "schema",
    "extend",
    "directive",
    "fragment",
];

/// Identifiers, with declaration keywords drawn often enough to matter.
fn ident() -> impl Strategy<Value = String> {
    prop_oneof![
        8 => "[_a-zA-Z][_a-zA-Z0-9]{0,12}",
        2 => prop::sample::select(DECLARATION_KEYWORDS.to_vec()).prop_map(str::to_string),
    ]
}

/// Argument values free of quotes, backslashes and line breaks.
fn argument_value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _:,.@(){}-]{0,20}"
}

fn directive() -> impl Strategy<Value = Directive> {
    (
        ident(),
        prop::collection::btree_map(ident(), argument_value(), 0..4),
    )
        .prop_map(|(name, arguments)| Directive {
            name: Name::new(name).unwrap(),
            arguments,
        })
}

/// One step of an edit sequence, resolved against the current schema.
#[derive(Debug, Clone)]
enum Step {
    AddType(bool, String),
    AddField(usize, String),
    SetType(usize, usize),
    Flags(usize, bool, bool),
    Scope(usize, String),
    Directive(usize, Directive),
    Describe(usize, String),
    AddValue(usize, String),
    RenameType(usize, String),
    DeleteType(usize),
    RenameField(usize, String),
    DeleteField(usize),
    MoveField(usize, usize, Option<usize>),
    DeleteValue(usize, usize),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (any::<bool>(), ident()).prop_map(|(e, n)| Step::AddType(e, n)),
        (any::<usize>(), ident()).prop_map(|(t, n)| Step::AddField(t, n)),
        (any::<usize>(), any::<usize>()).prop_map(|(f, t)| Step::SetType(f, t)),
        (any::<usize>(), any::<bool>(), any::<bool>()).prop_map(|(f, l, r)| Step::Flags(f, l, r)),
        (any::<usize>(), argument_value()).prop_map(|(f, s)| Step::Scope(f, s)),
        (any::<usize>(), directive()).prop_map(|(t, d)| Step::Directive(t, d)),
        (any::<usize>(), "[a-zA-Z][a-zA-Z .,]{0,10}(\"[a-zA-Z .,]{1,10})?[a-zA-Z.]").prop_map(|(t, s)| Step::Describe(t, s)),
        (any::<usize>(), ident()).prop_map(|(t, n)| Step::AddValue(t, n)),
        (any::<usize>(), ident()).prop_map(|(t, n)| Step::RenameType(t, n)),
        any::<usize>().prop_map(Step::DeleteType),
        (any::<usize>(), ident()).prop_map(|(f, n)| Step::RenameField(f, n)),
        any::<usize>().prop_map(Step::DeleteField),
        (any::<usize>(), any::<usize>(), any::<Option<usize>>())
            .prop_map(|(f, t, b)| Step::MoveField(f, t, b)),
        (any::<usize>(), any::<usize>()).prop_map(|(t, v)| Step::DeleteValue(t, v)),
    ]
}

fn name(s: &str) -> Name {
    Name::new(s).unwrap()
}

/// Replays steps through the edit API, skipping those that do not apply.
fn build(steps: &[Step]) -> Schema {
    let mut schema = Schema::new();
    for step in steps {
        let types: Vec<_> = schema.types().iter().map(|t| (t.id.clone(), t.kind())).collect();
        let fields: Vec<_> = schema
            .types()
            .iter()
            .flat_map(|t| t.fields().iter().map(move |f| (t.id.clone(), f.id.clone())))
            .collect();
        let objects: Vec<_> = types.iter().filter(|(_, k)| *k == TypeKind::Object).collect();
        let enums: Vec<_> = types.iter().filter(|(_, k)| *k == TypeKind::Enum).collect();

        match step {
            Step::AddType(is_enum, base) => {
                let kind = if *is_enum { TypeKind::Enum } else { TypeKind::Object };
                schema.add_type(kind, &name(base));
            }
            Step::AddField(i, base) if !objects.is_empty() => {
                let (t, _) = objects[i % objects.len()];
                schema.add_field(t, &name(base)).unwrap();
            }
            Step::SetType(i, j) if !fields.is_empty() => {
                let (t, f) = &fields[i % fields.len()];
                let available = schema.available_field_types();
                let type_name = name(&available[j % available.len()]);
                schema.set_field_type(t, f, type_name).unwrap();
            }
            Step::Flags(i, list, required) if !fields.is_empty() => {
                let (t, f) = &fields[i % fields.len()];
                schema.set_field_list(t, f, *list).unwrap();
                schema.set_field_required(t, f, *required).unwrap();
            }
            Step::Scope(i, scope) if !fields.is_empty() => {
                let (t, f) = &fields[i % fields.len()];
                schema.set_access_scope(&EditTarget::of_field(t, f), scope).unwrap();
            }
            Step::Directive(i, d) if !types.is_empty() => {
                let (t, _) = &types[i % types.len()];
                schema.set_directive(&EditTarget::of_type(t), d.clone()).unwrap();
            }
            Step::Describe(i, text) if !types.is_empty() => {
                let (t, _) = &types[i % types.len()];
                schema
                    .set_description(&EditTarget::of_type(t), Some(text.clone()))
                    .unwrap();
            }
            Step::AddValue(i, base) if !enums.is_empty() => {
                let (t, _) = enums[i % enums.len()];
                schema.add_enum_value(t, &name(base)).unwrap();
            }
            // Renames may collide; a failed rename leaves the schema as it was.
            Step::RenameType(i, new_name) if !types.is_empty() => {
                let (t, _) = &types[i % types.len()];
                let _ = schema.rename_type(t, name(new_name));
            }
            Step::DeleteType(i) if !types.is_empty() => {
                let (t, _) = &types[i % types.len()];
                schema.delete_type(t).unwrap();
            }
            Step::RenameField(i, new_name) if !fields.is_empty() => {
                let (t, f) = &fields[i % fields.len()];
                let _ = schema.rename_field(t, f, name(new_name));
            }
            Step::DeleteField(i) if !fields.is_empty() => {
                let (t, f) = &fields[i % fields.len()];
                schema.delete_field(t, f).unwrap();
            }
            Step::MoveField(i, j, before) if !fields.is_empty() => {
                let (source, f) = &fields[i % fields.len()];
                let (target, _) = objects[j % objects.len()];
                let siblings = schema.fields(target);
                let before = (*before)
                    .filter(|_| !siblings.is_empty())
                    .map(|b| siblings[b % siblings.len()].id.clone());
                schema.move_field(source, f, target, before.as_ref()).unwrap();
            }
            Step::DeleteValue(i, v) if !enums.is_empty() => {
                let (t, _) = enums[i % enums.len()];
                let values = schema.enum_values(t);
                if !values.is_empty() {
                    let value = values[v % values.len()].clone();
                    schema.delete_enum_value(t, &value).unwrap();
                }
            }
            _ => {}
        }
    }
    schema
}

proptest! {
    /// Schemas built through the edit API survive print then parse.
    #[test]
    fn engine_built_schemas_round_trip(steps in prop::collection::vec(step(), 0..40)) {
        let schema = build(&steps);
        let printed = print(&schema).unwrap();
        let reparsed = parse(&printed).unwrap_or_else(|e| panic!("{e:?}\n{printed}"));
        prop_assert!(schema.structurally_eq(&reparsed), "mismatch for:\n{}", printed);
    }

    /// decode(encode(d)) == d for quote-free values.
    #[test]
    fn directive_codec_inverse(d in directive()) {
        let text = encode(&d);
        prop_assert_eq!(decode(&text).unwrap(), d);
    }

    /// Parsing arbitrary input never panics.
    #[test]
    fn parse_never_panics(s in "\\PC{0,200}") {
        let _ = parse(&s);
    }

    /// Parsing a valid minimal type should never fail.
    #[test]
    fn valid_minimal_type_always_parses(
        type_name in ident(),
        field in ident(),
        scalar in prop::sample::select(BUILTIN_SCALARS.to_vec()),
        list in any::<bool>(),
        required in any::<bool>(),
    ) {
        let ty = if list { format!("[{scalar}]") } else { scalar.to_string() };
        let bang = if required { "!" } else { "" };
        let source = format!("type {type_name} {{ {field}: {ty}{bang} }}");
        let schema = parse(&source).unwrap_or_else(|e| panic!("{e:?}: {source}"));
        prop_assert_eq!(schema.len(), 1);
        let f = &schema.types()[0].fields()[0];
        prop_assert_eq!(f.name.as_str(), field.as_str());
        prop_assert_eq!(f.is_list, list);
        prop_assert_eq!(f.is_required, required);
    }
}
