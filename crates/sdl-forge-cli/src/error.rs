use std::path::PathBuf;

use sdl_forge_dsl::{DslError, EditorError, GenerationError};

/// Exit codes for the CLI process.
///
/// - 0: success
/// - 1: general error, including `fmt --check` finding unformatted files
/// - 2: invalid arguments, configuration or edit script
/// - 3: parse error
/// - 4: an edit step could not be resolved or applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidArguments = 2,
    ParseError = 3,
    EditError = 4,
}

/// Errors returned by CLI command handlers.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Syntax errors in one SDL file.
    #[error("parse errors in {file}")]
    Parse {
        errors: Vec<DslError>,
        source_text: String,
        file: PathBuf,
    },

    /// Several files failed to parse; their diagnostics were already rendered.
    #[error("{count} file(s) failed to parse")]
    InvalidFiles { count: usize },

    /// A parsed schema that cannot be printed back.
    #[error("cannot print {file}: {source}")]
    Generation {
        file: PathBuf,
        source: GenerationError,
    },

    /// An edit script that cannot be read as TOML.
    #[error("invalid edit script {path}: {message}")]
    Script { path: PathBuf, message: String },

    /// An edit step that failed to resolve or apply.
    #[error("edit step {step} ({op}) failed: {source}")]
    Edit {
        step: usize,
        op: &'static str,
        source: EditorError,
    },

    /// `fmt --check` found files that are not in canonical form.
    #[error("{count} file(s) would be reformatted")]
    Unformatted { count: usize },

    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("no SDL files found in {path}")]
    NoSchemaFiles { path: PathBuf },

    #[error("type '{name}' not found")]
    TypeNotFound { name: String },

    #[error("{0}")]
    Other(String),
}

impl CliError {
    /// Maps this error to the appropriate exit code.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Parse { .. } | Self::InvalidFiles { .. } => ExitCode::ParseError,
            Self::Edit { .. } => ExitCode::EditError,
            Self::Config { .. } | Self::Script { .. } | Self::NoSchemaFiles { .. } => {
                ExitCode::InvalidArguments
            }
            Self::Generation { .. }
            | Self::Unformatted { .. }
            | Self::Io { .. }
            | Self::TypeNotFound { .. }
            | Self::Other(_) => ExitCode::GeneralError,
        }
    }

    /// Serializes this error as a JSON value for `--format json` output.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Parse { errors, file, .. } => {
                let error_list: Vec<serde_json::Value> = errors
                    .iter()
                    .map(|e| {
                        let span = e.span().map(|s| serde_json::json!([s.start, s.end]));
                        serde_json::json!({ "message": e.to_string(), "span": span })
                    })
                    .collect();
                serde_json::json!({
                    "error": "parse_error",
                    "file": file.display().to_string(),
                    "errors": error_list,
                })
            }
            Self::Edit { step, op, source } => serde_json::json!({
                "error": "edit_error",
                "kind": source.kind().to_string(),
                "step": step,
                "op": op,
                "message": source.to_string(),
            }),
            Self::Io { path, source } => serde_json::json!({
                "error": "io_error",
                "path": path.display().to_string(),
                "message": source.to_string(),
            }),
            Self::Config { message } => serde_json::json!({
                "error": "config_error",
                "message": message,
            }),
            other => serde_json::json!({
                "error": "error",
                "message": other.to_string(),
            }),
        }
    }
}
