use miette::{Diagnostic, NamedSource, SourceSpan};
use sdl_forge_dsl::{DslError, Span};

/// A diagnostic wrapping a `DslError` for rich miette rendering.
///
/// The module-level `#[allow(unused_assignments)]` in main.rs is required
/// because miette's derive macro generates assignment patterns that rustc
/// flags as unused.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct SdlDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    span: SourceSpan,

    message: String,
    label: String,

    #[help]
    suggestion: Option<String>,
}

fn source_span(span: &Span) -> SourceSpan {
    (span.start, span.len()).into()
}

/// Convert a `DslError` into an `SdlDiagnostic` with a label at its span.
pub fn dsl_error_to_diagnostic(error: &DslError, source: &str, filename: &str) -> SdlDiagnostic {
    let named_src = NamedSource::new(filename, source.to_string());

    match error {
        DslError::InvalidToken { span } => SdlDiagnostic {
            src: named_src,
            span: source_span(span),
            message: "invalid token".to_string(),
            label: "unrecognized token".to_string(),
            suggestion: Some("Check for typos or characters SDL does not allow.".to_string()),
        },

        DslError::UnexpectedToken {
            expected,
            found,
            span,
        } => SdlDiagnostic {
            src: named_src,
            span: source_span(span),
            message: format!("unexpected token: expected {expected}, found {found}"),
            label: format!("expected {expected}"),
            suggestion: None,
        },

        DslError::UnexpectedEndOfInput { expected } => SdlDiagnostic {
            src: named_src,
            span: (source.len().saturating_sub(1), 1).into(),
            message: format!("unexpected end of input: expected {expected}"),
            label: "input ended here".to_string(),
            suggestion: Some(format!("Add {expected} to complete the declaration.")),
        },

        DslError::UnsupportedDeclaration { keyword, span } => SdlDiagnostic {
            src: named_src,
            span: source_span(span),
            message: format!("unsupported declaration '{keyword}'"),
            label: "only 'type' and 'enum' are supported".to_string(),
            suggestion: Some(format!(
                "Remove the '{keyword}' declaration; the rest of the file is still read."
            )),
        },

        DslError::MissingFieldType { field, span } => SdlDiagnostic {
            src: named_src,
            span: source_span(span),
            message: format!("field '{field}' has no type"),
            label: "expected a type after ':'".to_string(),
            suggestion: Some(format!("Add a type, e.g. '{field}: String'.")),
        },

        DslError::MalformedDirectiveArgument {
            directive,
            reason,
            span,
        } => SdlDiagnostic {
            src: named_src,
            span: source_span(span),
            message: format!("malformed argument of '@{directive}': {reason}"),
            label: "malformed argument".to_string(),
            suggestion: Some("Write arguments as name: \"value\".".to_string()),
        },

        _ => SdlDiagnostic {
            src: named_src,
            span: (0, 0).into(),
            message: error.to_string(),
            label: "error".to_string(),
            suggestion: None,
        },
    }
}

/// Render all parse errors for a file using miette.
pub fn render_diagnostics(
    errors: &[DslError],
    source: &str,
    filename: &str,
) -> Vec<miette::Report> {
    errors
        .iter()
        .map(|e| miette::Report::new(dsl_error_to_diagnostic(e, source, filename)))
        .collect()
}
