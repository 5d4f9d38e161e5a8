use logos::Logos;

/// Tokens produced by the SDL lexer.
///
/// Whitespace, commas and `#` comments are skipped, as in GraphQL where
/// commas are insignificant.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f,\u{FEFF}]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    // -- Keywords --
    // Contextual: a field named `type` or `enum` is still a field.
    #[token("type")]
    Type,

    #[token("enum")]
    Enum,

    // -- Punctuation --
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(":")]
    Colon,

    #[token("=")]
    Equals,

    #[token("!")]
    Bang,

    #[token("@")]
    At,

    // -- Literals --
    /// A triple-quoted block string, e.g. `"""Multi-line text"""`.
    #[regex(r#""""([^"]|"[^"]|""[^"])*""""#)]
    BlockString,

    /// A double-quoted string literal, e.g. `"hello"`.
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    StringLiteral,

    /// A single-quoted string literal, e.g. `'v-12'`.
    #[regex(r"'([^'\\\n]|\\.)*'")]
    SingleQuoted,

    /// An integer literal, optionally negative, e.g. `42` or `-10`.
    #[regex(r"-?[0-9]+", priority = 2)]
    IntegerLiteral,

    /// A float literal, e.g. `3.14` or `1.5e3`.
    #[regex(r"-?[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", priority = 3)]
    FloatLiteral,

    // -- Identifiers --
    /// A name: letters, digits, and underscores, not starting with a digit.
    #[regex(r"[_a-zA-Z][_a-zA-Z0-9]*")]
    Ident,
}

impl Token {
    /// Returns a human-readable description of this token kind.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Type => "'type'",
            Self::Enum => "'enum'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Colon => "':'",
            Self::Equals => "'='",
            Self::Bang => "'!'",
            Self::At => "'@'",
            Self::BlockString => "block string",
            Self::StringLiteral => "string literal",
            Self::SingleQuoted => "single-quoted string",
            Self::IntegerLiteral => "integer literal",
            Self::FloatLiteral => "float literal",
            Self::Ident => "identifier",
        }
    }

    /// True for tokens whose text is a valid name.
    pub fn is_name(&self) -> bool {
        matches!(self, Self::Ident | Self::Type | Self::Enum)
    }

    /// True for the two string forms usable as descriptions.
    pub fn is_description(&self) -> bool {
        matches!(self, Self::StringLiteral | Self::BlockString)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}
