//! Text form of a single directive.
//!
//! `encode` always writes `@name` or `@name(k1:"v1",k2:"v2")` with keys in
//! order. `decode` accepts everything the parser accepts for a directive,
//! including single-quoted and bare values and `=` separators.

use sdl_forge_core::types::{is_identifier, Directive};

use crate::error::{DslError, GenerationError};
use crate::lexer::tokenize;
use crate::parser::Parser;

/// Parses one directive, e.g. `@dpi_requiredScope(scope:"admin")`.
///
/// # Errors
///
/// Returns the syntax errors found, including trailing input after the
/// directive.
pub fn decode(text: &str) -> Result<Directive, Vec<DslError>> {
    let tokens = tokenize(text)?;
    let directive = Parser::new(tokens)
        .parse_single_directive()
        .map_err(|e| vec![e])?;
    tracing::trace!(name = %directive.name, arguments = directive.arguments.len(), "decoded directive");
    Ok(directive)
}

/// Renders a directive in canonical form.
///
/// `"` and `\` in values are backslash-escaped so that `decode` restores
/// them; the printer refuses such values instead, see [`check_quotable`].
pub fn encode(directive: &Directive) -> String {
    let mut output = String::new();
    output.push('@');
    output.push_str(directive.name.as_str());
    if directive.arguments.is_empty() {
        return output;
    }
    output.push('(');
    for (i, (key, value)) in directive.arguments.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        output.push_str(key);
        output.push_str(":\"");
        for c in value.chars() {
            if matches!(c, '"' | '\\') {
                output.push('\\');
            }
            output.push(c);
        }
        output.push('"');
    }
    output.push(')');
    output
}

/// Fails if any argument key is not an identifier, or any value contains
/// `"`, `\` or a line break.
pub fn check_quotable(directive: &Directive) -> Result<(), GenerationError> {
    if let Some(key) = directive.arguments.keys().find(|k| !is_identifier(k)) {
        return Err(GenerationError::InvalidArgumentKey {
            directive: directive.name.to_string(),
            argument: key.clone(),
        });
    }
    match directive
        .arguments
        .iter()
        .find(|(_, v)| v.contains(['"', '\\', '\n', '\r']))
    {
        Some((key, value)) => Err(GenerationError::UnquotableArgument {
            directive: directive.name.to_string(),
            argument: key.clone(),
            value: value.clone(),
        }),
        None => Ok(()),
    }
}
