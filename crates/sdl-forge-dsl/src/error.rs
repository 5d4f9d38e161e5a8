use std::fmt;

use sdl_forge_core::error::SchemaError;

/// A byte-offset span in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    /// Creates a new span from start (inclusive) to end (exclusive).
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Syntax errors found while parsing SDL text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DslError {
    /// The lexer encountered a token that does not match any rule.
    InvalidToken { span: Span },

    /// The parser encountered an unexpected token.
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    /// The parser reached the end of input when more tokens were expected.
    UnexpectedEndOfInput { expected: String },

    /// A declaration other than `type` or `enum`, e.g. `input` or `union`.
    UnsupportedDeclaration { keyword: String, span: Span },

    /// A field name and colon with no type after them.
    MissingFieldType { field: String, span: Span },

    /// A directive argument that is not `key: value` or `key = value`.
    MalformedDirectiveArgument {
        directive: String,
        reason: String,
        span: Span,
    },
}

impl DslError {
    /// The source span, when the error has one.
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::InvalidToken { span }
            | Self::UnexpectedToken { span, .. }
            | Self::UnsupportedDeclaration { span, .. }
            | Self::MissingFieldType { span, .. }
            | Self::MalformedDirectiveArgument { span, .. } => Some(span),
            Self::UnexpectedEndOfInput { .. } => None,
        }
    }
}

impl fmt::Display for DslError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken { span } => {
                write!(f, "invalid token at {span}")
            }
            Self::UnexpectedToken {
                expected,
                found,
                span,
            } => {
                write!(
                    f,
                    "unexpected token at {span}: expected {expected}, found {found}"
                )
            }
            Self::UnexpectedEndOfInput { expected } => {
                write!(f, "unexpected end of input: expected {expected}")
            }
            Self::UnsupportedDeclaration { keyword, span } => {
                write!(
                    f,
                    "unsupported declaration '{keyword}' at {span}: only 'type' and 'enum' are supported"
                )
            }
            Self::MissingFieldType { field, span } => {
                write!(f, "field '{field}' at {span} has no type")
            }
            Self::MalformedDirectiveArgument {
                directive,
                reason,
                span,
            } => {
                write!(
                    f,
                    "malformed argument of '@{directive}' at {span}: {reason}"
                )
            }
        }
    }
}

impl std::error::Error for DslError {}

/// Errors raised when a schema cannot be rendered as SDL.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GenerationError {
    /// A directive argument value contains `"`, `\` or a line break.
    UnquotableArgument {
        directive: String,
        argument: String,
        value: String,
    },
    /// A directive argument key is not an identifier.
    InvalidArgumentKey { directive: String, argument: String },
    /// A description contains `"""` or ends with `"`.
    UnquotableDescription { owner: String },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnquotableArgument {
                directive,
                argument,
                value,
            } => {
                write!(
                    f,
                    "argument '{argument}' of '@{directive}' cannot be quoted: {value:?}"
                )
            }
            Self::InvalidArgumentKey {
                directive,
                argument,
            } => {
                write!(f, "argument key {argument:?} of '@{directive}' is not an identifier")
            }
            Self::UnquotableDescription { owner } => {
                write!(f, "description of '{owner}' cannot be quoted")
            }
        }
    }
}

impl std::error::Error for GenerationError {}

/// Coarse category of an [`EditorError`], for hosts that style or expire
/// messages by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    NameConflict,
    Generation,
    InvalidName,
    NotFound,
    KindMismatch,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Syntax => "syntax",
            Self::NameConflict => "name_conflict",
            Self::Generation => "generation",
            Self::InvalidName => "invalid_name",
            Self::NotFound => "not_found",
            Self::KindMismatch => "kind_mismatch",
        };
        f.write_str(s)
    }
}

/// Errors surfaced by an [`Editor`](crate::editor::Editor).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EditorError {
    Syntax(Vec<DslError>),
    Schema(SchemaError),
    Generation(GenerationError),
}

impl EditorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax(_) => ErrorKind::Syntax,
            Self::Generation(_) => ErrorKind::Generation,
            Self::Schema(SchemaError::NameConflict { .. }) => ErrorKind::NameConflict,
            Self::Schema(SchemaError::InvalidName(_)) => ErrorKind::InvalidName,
            Self::Schema(SchemaError::KindMismatch { .. }) => ErrorKind::KindMismatch,
            Self::Schema(_) => ErrorKind::NotFound,
        }
    }
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(errors) => {
                write!(f, "{} syntax error(s)", errors.len())?;
                if let Some(first) = errors.first() {
                    write!(f, "; first: {first}")?;
                }
                Ok(())
            }
            Self::Schema(e) => write!(f, "{e}"),
            Self::Generation(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EditorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Syntax(errors) => errors
                .first()
                .map(|e| e as &(dyn std::error::Error + 'static)),
            Self::Schema(e) => Some(e),
            Self::Generation(e) => Some(e),
        }
    }
}

impl From<Vec<DslError>> for EditorError {
    fn from(errors: Vec<DslError>) -> Self {
        Self::Syntax(errors)
    }
}

impl From<SchemaError> for EditorError {
    fn from(e: SchemaError) -> Self {
        Self::Schema(e)
    }
}

impl From<GenerationError> for EditorError {
    fn from(e: GenerationError) -> Self {
        Self::Generation(e)
    }
}
