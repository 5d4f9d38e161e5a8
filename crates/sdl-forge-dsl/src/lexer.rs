use logos::Logos;

use crate::error::{DslError, Span};
use crate::token::Token;

/// A token paired with its source span.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
    pub text: String,
}

/// Tokenizes SDL source text into a sequence of spanned tokens.
///
/// # Errors
///
/// Returns a `DslError::InvalidToken` for every run of bytes the lexer
/// cannot match, e.g. an unterminated string or a stray `$`.
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, Vec<DslError>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    let lexer = Token::lexer(source);
    for (result, range) in lexer.spanned() {
        let span = Span::new(range.start, range.end);
        match result {
            Ok(token) => {
                tokens.push(SpannedToken {
                    token,
                    span,
                    text: source[range].to_string(),
                });
            }
            Err(()) => {
                errors.push(DslError::InvalidToken { span });
            }
        }
    }

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}
