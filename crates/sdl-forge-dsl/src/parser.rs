use std::collections::BTreeMap;

use sdl_forge_core::types::{Directive, FieldDecl, Name, Schema, TypeDecl, TypeKind};

use crate::error::{DslError, Span};
use crate::lexer::SpannedToken;
use crate::token::Token;

/// Declaration keywords of full GraphQL SDL that this subset rejects.
const UNSUPPORTED_KEYWORDS: [&str; 8] = [
    "input",
    "interface",
    "union",
    "scalar",
    "schema",
    "extend",
    "directive",
    "fragment",
];

/// Recursive descent parser for the SDL subset.
///
/// `}` only closes a body visually: members belong to the most recently
/// opened declaration until the next header.
pub(crate) struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    /// Set between a body's `{` and its `}`.
    in_braces: bool,
}

impl Parser {
    pub(crate) fn new(tokens: Vec<SpannedToken>) -> Self {
        Self {
            tokens,
            pos: 0,
            in_braces: false,
        }
    }

    // -- Cursor helpers --

    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.pos)
    }

    fn peek_token(&self) -> Option<&Token> {
        self.peek().map(|st| &st.token)
    }

    fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|st| &st.token)
    }

    fn advance(&mut self) -> Option<SpannedToken> {
        if self.pos < self.tokens.len() {
            let tok = self.tokens[self.pos].clone();
            self.pos += 1;
            Some(tok)
        } else {
            None
        }
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek_token() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token, context: &str) -> Result<SpannedToken, DslError> {
        match self.advance() {
            Some(st) if st.token == *expected => Ok(st),
            Some(st) => Err(unexpected(context, &st)),
            None => Err(DslError::UnexpectedEndOfInput {
                expected: context.to_string(),
            }),
        }
    }

    fn current_span(&self) -> Span {
        self.peek().map(|st| st.span.clone()).unwrap_or_else(|| {
            self.tokens
                .last()
                .map(|st| Span::new(st.span.end, st.span.end))
                .unwrap_or(Span::new(0, 0))
        })
    }

    /// True when the cursor sits on an optional description followed by a
    /// declaration header: a keyword, then a name that does not start a
    /// field (`type: String` and `owner: type` are fields).
    ///
    /// Between `{` and `}` the name must also be followed by `{`, `@` or the
    /// end of input, so enum values such as `type` or `input` stay values.
    fn at_header(&self) -> bool {
        let offset = usize::from(self.peek_token().is_some_and(Token::is_description));
        let Some(st) = self.tokens.get(self.pos + offset) else {
            return false;
        };
        let is_keyword = match st.token {
            Token::Type | Token::Enum => true,
            Token::Ident => UNSUPPORTED_KEYWORDS.contains(&st.text.as_str()),
            _ => false,
        };
        if !is_keyword || !self.peek_nth(offset + 1).is_some_and(Token::is_name) {
            return false;
        }
        let after = self.peek_nth(offset + 2);
        if !self.in_braces {
            return after != Some(&Token::Colon);
        }
        matches!(after, None | Some(Token::LBrace | Token::At))
    }

    // -- Grammar productions --

    /// document = declaration*
    fn parse_document(&mut self) -> Result<Vec<TypeDecl>, Vec<DslError>> {
        let mut types = Vec::new();
        let mut errors = Vec::new();

        while self.peek().is_some() {
            match self.parse_declaration() {
                Ok(decl) => types.push(decl),
                Err(e) => {
                    errors.push(e);
                    self.recover_to_next_header();
                }
            }
        }

        if errors.is_empty() {
            Ok(types)
        } else {
            Err(errors)
        }
    }

    /// Skip tokens until the next declaration header. A failed declaration
    /// has always consumed at least its first token.
    fn recover_to_next_header(&mut self) {
        self.in_braces = false;
        while self.peek().is_some() && !self.at_header() {
            self.advance();
        }
    }

    /// declaration = description? ("type" | "enum") NAME directive* "{"? member*
    fn parse_declaration(&mut self) -> Result<TypeDecl, DslError> {
        let description = self.parse_description();

        let header = self.advance().ok_or_else(|| DslError::UnexpectedEndOfInput {
            expected: "'type' or 'enum'".to_string(),
        })?;
        let kind = match header.token {
            Token::Type => TypeKind::Object,
            Token::Enum => TypeKind::Enum,
            Token::Ident if UNSUPPORTED_KEYWORDS.contains(&header.text.as_str()) => {
                return Err(DslError::UnsupportedDeclaration {
                    keyword: header.text,
                    span: header.span,
                });
            }
            _ => return Err(unexpected("'type' or 'enum'", &header)),
        };

        let name = self.expect_name("type name")?;
        let directives = self.parse_directives()?;
        self.in_braces = self.eat(&Token::LBrace);

        let mut decl = match kind {
            TypeKind::Object => TypeDecl::object(name, self.parse_fields()?),
            TypeKind::Enum => TypeDecl::enumeration(name, self.parse_enum_values()?),
        };
        decl.description = description;
        decl.directives = directives;
        Ok(decl)
    }

    /// description = STRING | BLOCK_STRING
    fn parse_description(&mut self) -> Option<String> {
        match self.peek_token() {
            Some(Token::StringLiteral) => self.advance().map(|st| unquote_string(&st.text)),
            Some(Token::BlockString) => self.advance().map(|st| block_string_value(&st.text)),
            _ => None,
        }
    }

    /// field* up to the next header
    fn parse_fields(&mut self) -> Result<Vec<FieldDecl>, DslError> {
        let mut fields = Vec::new();
        loop {
            match self.peek_token() {
                None => break,
                Some(Token::RBrace) => {
                    self.advance();
                    self.in_braces = false;
                }
                Some(_) if self.at_header() => break,
                Some(_) => fields.push(self.parse_field()?),
            }
        }
        Ok(fields)
    }

    /// field = description? NAME ":" type_expr directive*
    fn parse_field(&mut self) -> Result<FieldDecl, DslError> {
        let description = self.parse_description();
        let name_tok = self.expect_name_token("field name")?;
        let name = to_name(&name_tok)?;
        self.expect(&Token::Colon, "':' after field name")?;

        let (type_name, is_list, is_required) = self.parse_type_expr(&name_tok)?;
        let directives = self.parse_directives()?;

        let mut field = FieldDecl::new(name, type_name)
            .list(is_list)
            .required(is_required);
        field.description = description;
        field.directives = directives;
        Ok(field)
    }

    /// type_expr = "["? NAME "!"? ("]" "!"?)?
    ///
    /// Any `!` sets the single required flag.
    fn parse_type_expr(&mut self, field: &SpannedToken) -> Result<(Name, bool, bool), DslError> {
        let is_list = self.eat(&Token::LBracket);

        let starts_type_ref = self.peek_token().is_some_and(Token::is_name)
            && self.peek_nth(1) != Some(&Token::Colon)
            && !self.at_header();
        if !starts_type_ref {
            return Err(DslError::MissingFieldType {
                field: field.text.clone(),
                span: Span::new(field.span.start, self.current_span().start.max(field.span.end)),
            });
        }
        let type_tok = self.expect_name_token("type name")?;
        let type_name = to_name(&type_tok)?;

        let mut is_required = self.eat(&Token::Bang);
        if is_list {
            self.expect(&Token::RBracket, "']' to close list type")?;
            is_required |= self.eat(&Token::Bang);
        }
        Ok((type_name, is_list, is_required))
    }

    /// enum_value* up to the next header
    ///
    /// Descriptions and directives on enum values are accepted and dropped:
    /// the model keeps values as bare names.
    fn parse_enum_values(&mut self) -> Result<Vec<Name>, DslError> {
        let mut values = Vec::new();
        loop {
            match self.peek_token() {
                None => break,
                Some(Token::RBrace) => {
                    self.advance();
                    self.in_braces = false;
                }
                Some(_) if self.at_header() => break,
                Some(t) if t.is_description() => {
                    self.advance();
                }
                Some(t) if t.is_name() => {
                    let tok = self.expect_name_token("enum value")?;
                    values.push(to_name(&tok)?);
                    let dropped = self.parse_directives()?;
                    if !dropped.is_empty() {
                        tracing::trace!(value = %tok.text, count = dropped.len(), "dropping enum value directives");
                    }
                }
                Some(_) => {
                    return Err(self
                        .advance()
                        .map(|st| unexpected("enum value", &st))
                        .unwrap_or_else(|| DslError::UnexpectedEndOfInput {
                            expected: "enum value".to_string(),
                        }));
                }
            }
        }
        Ok(values)
    }

    /// directive*
    fn parse_directives(&mut self) -> Result<Vec<Directive>, DslError> {
        let mut directives = Vec::new();
        while self.peek_token() == Some(&Token::At) {
            directives.push(self.parse_directive()?);
        }
        Ok(directives)
    }

    /// directive = "@" NAME ("(" argument* ")")?
    fn parse_directive(&mut self) -> Result<Directive, DslError> {
        self.expect(&Token::At, "'@'")?;
        let name = self.expect_name("directive name")?;
        let mut arguments = BTreeMap::new();

        if self.eat(&Token::LParen) {
            loop {
                match self.peek_token() {
                    None => {
                        return Err(DslError::UnexpectedEndOfInput {
                            expected: format!("')' to close arguments of '@{name}'"),
                        });
                    }
                    Some(Token::RParen) => {
                        self.advance();
                        break;
                    }
                    Some(_) => {
                        let (key, value) = self.parse_directive_argument(&name)?;
                        arguments.insert(key, value);
                    }
                }
            }
        }

        Ok(Directive { name, arguments })
    }

    /// argument = NAME (":" | "=") value
    fn parse_directive_argument(&mut self, directive: &Name) -> Result<(String, String), DslError> {
        let malformed = |reason: String, span: Span| DslError::MalformedDirectiveArgument {
            directive: directive.to_string(),
            reason,
            span,
        };
        let eof = || DslError::UnexpectedEndOfInput {
            expected: format!("argument of '@{directive}'"),
        };

        let key = self.advance().ok_or_else(eof)?;
        if !key.token.is_name() {
            return Err(malformed(
                format!("expected an argument name, found {}", found(&key)),
                key.span,
            ));
        }

        let separator = self.advance().ok_or_else(eof)?;
        if !matches!(separator.token, Token::Colon | Token::Equals) {
            return Err(malformed(
                format!("expected ':' or '=' after '{}', found {}", key.text, found(&separator)),
                Span::new(key.span.start, separator.span.end),
            ));
        }

        let value = self.advance().ok_or_else(eof)?;
        let text = match value.token {
            Token::StringLiteral => unquote_string(&value.text),
            Token::SingleQuoted => unquote_single(&value.text),
            Token::Ident
            | Token::Type
            | Token::Enum
            | Token::IntegerLiteral
            | Token::FloatLiteral => value.text.clone(),
            _ => {
                return Err(malformed(
                    format!("expected a value for '{}', found {}", key.text, found(&value)),
                    Span::new(key.span.start, value.span.end),
                ));
            }
        };
        Ok((key.text, text))
    }

    /// Parses exactly one directive and nothing else.
    pub(crate) fn parse_single_directive(&mut self) -> Result<Directive, DslError> {
        let directive = self.parse_directive()?;
        match self.peek() {
            None => Ok(directive),
            Some(st) => Err(unexpected("end of directive", st)),
        }
    }

    // -- Token expectation helpers --

    fn expect_name_token(&mut self, context: &str) -> Result<SpannedToken, DslError> {
        match self.advance() {
            Some(st) if st.token.is_name() => Ok(st),
            Some(st) => Err(unexpected(context, &st)),
            None => Err(DslError::UnexpectedEndOfInput {
                expected: context.to_string(),
            }),
        }
    }

    fn expect_name(&mut self, context: &str) -> Result<Name, DslError> {
        let tok = self.expect_name_token(context)?;
        to_name(&tok)
    }
}

fn found(st: &SpannedToken) -> String {
    format!("{} ('{}')", st.token.description(), st.text)
}

fn unexpected(expected: &str, st: &SpannedToken) -> DslError {
    DslError::UnexpectedToken {
        expected: expected.to_string(),
        found: found(st),
        span: st.span.clone(),
    }
}

fn to_name(st: &SpannedToken) -> Result<Name, DslError> {
    Name::new(st.text.as_str()).map_err(|_| unexpected("name", st))
}

/// Remove surrounding quotes from a string literal and handle escape sequences.
fn unquote_string(s: &str) -> String {
    unescape(&s[1..s.len() - 1], '"')
}

fn unquote_single(s: &str) -> String {
    unescape(&s[1..s.len() - 1], '\'')
}

fn unescape(inner: &str, quote: char) -> String {
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some('\\') => result.push('\\'),
                Some(q) if q == quote => result.push(q),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }
    result
}

/// The value of a `"""` block string: common indentation of all lines but
/// the first is removed, then leading and trailing blank lines.
pub(crate) fn block_string_value(raw: &str) -> String {
    let inner = &raw[3..raw.len() - 3];
    let lines: Vec<&str> = inner.lines().collect();

    let common_indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    let mut dedented: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                *line
            } else {
                line.get(common_indent..).unwrap_or("")
            }
        })
        .collect();

    while dedented.first().is_some_and(|l| l.trim().is_empty()) {
        dedented.remove(0);
    }
    while dedented.last().is_some_and(|l| l.trim().is_empty()) {
        dedented.pop();
    }
    dedented.join("\n")
}

/// Parse SDL source text into a schema.
///
/// Duplicate type or field names are accepted as written; the edit
/// operations enforce uniqueness from then on.
///
/// # Errors
///
/// Returns every `DslError` found. After an error the parser skips to the
/// next `type` or `enum` header and continues.
pub fn parse(source: &str) -> Result<Schema, Vec<DslError>> {
    let tokens = crate::lexer::tokenize(source)?;
    let mut parser = Parser::new(tokens);
    let types = parser.parse_document()?;
    tracing::debug!(types = types.len(), bytes = source.len(), "parsed SDL document");
    Ok(Schema::from_types(types))
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Helpers --

    fn parse_one(source: &str) -> TypeDecl {
        let schema = parse(source).unwrap_or_else(|e| panic!("parse failed: {e:?}"));
        assert_eq!(schema.len(), 1, "expected exactly one declaration");
        schema.types()[0].clone()
    }

    fn parse_err(source: &str) -> Vec<DslError> {
        parse(source).expect_err("expected parse failure")
    }

    fn field_names(decl: &TypeDecl) -> Vec<&str> {
        decl.fields().iter().map(|f| f.name.as_str()).collect()
    }

    // -- Declarations --

    #[test]
    fn simple_object_type() {
        let decl = parse_one("type User { id: ID! name: String }");
        assert_eq!(decl.name.as_str(), "User");
        assert_eq!(decl.kind(), TypeKind::Object);
        let id = &decl.fields()[0];
        assert_eq!((id.name.as_str(), id.type_name.as_str()), ("id", "ID"));
        assert!(id.is_required && !id.is_list);
        let name = &decl.fields()[1];
        assert_eq!(name.type_name.as_str(), "String");
        assert!(!name.is_required && !name.is_list);
    }

    #[test]
    fn enum_type() {
        let decl = parse_one("enum Role {\n  ADMIN\n  USER\n}");
        assert_eq!(decl.kind(), TypeKind::Enum);
        let values: Vec<_> = decl.values().iter().map(Name::as_str).collect();
        assert_eq!(values, ["ADMIN", "USER"]);
    }

    #[test]
    fn multiple_declarations_keep_order() {
        let schema = parse("type A { x: Int }\nenum B { ONE }\ntype C { y: B }").unwrap();
        let names: Vec<_> = schema.types().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn empty_input_is_empty_schema() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("  # only a comment\n").unwrap().is_empty());
    }

    #[test]
    fn body_braces_are_optional() {
        let decl = parse_one("type User\n  id: ID!\n  email: String");
        assert_eq!(field_names(&decl), ["id", "email"]);
    }

    #[test]
    fn closing_brace_does_not_end_membership() {
        let decl = parse_one("type User { id: ID! }\n  email: String");
        assert_eq!(field_names(&decl), ["id", "email"]);
    }

    // -- Type expressions --

    #[test]
    fn list_and_required_modifiers() {
        let decl = parse_one("type T { a: [String] b: [String]! c: [String!] d: [String!]! }");
        for f in decl.fields() {
            assert!(f.is_list, "{} should be a list", f.name);
        }
        let required: Vec<_> = decl.fields().iter().map(|f| f.is_required).collect();
        assert_eq!(required, [false, true, true, true]);
    }

    #[test]
    fn keyword_named_enum_values_inside_braces() {
        let schema = parse("enum Kind {\n  type\n  Other\n  input\n  enum\n  Last\n}").unwrap();
        assert_eq!(schema.len(), 1);
        let values: Vec<_> = schema.types()[0].values().iter().map(Name::as_str).collect();
        assert_eq!(values, ["type", "Other", "input", "enum", "Last"]);
    }

    #[test]
    fn keyword_type_reference_before_keyword_named_field() {
        let decl = parse_one("type T {\n  x: enum\n  enum: Kind\n  y: type\n  Other: String\n}");
        assert_eq!(field_names(&decl), ["x", "enum", "y", "Other"]);
        assert_eq!(decl.fields()[0].type_name.as_str(), "enum");
        assert_eq!(decl.fields()[2].type_name.as_str(), "type");
    }

    #[test]
    fn header_after_unclosed_body_still_starts_declaration() {
        let schema = parse("enum A { X\ntype B { y: Int }\nenum C { type D @deprecated }").unwrap();
        let names: Vec<_> = schema.types().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C", "D"]);
        assert_eq!(schema.types()[0].values().len(), 1);
        assert!(schema.types()[2].values().is_empty());
    }

    #[test]
    fn keyword_named_fields() {
        let decl = parse_one("type Node { type: String enum: Kind id: ID }");
        assert_eq!(field_names(&decl), ["type", "enum", "id"]);
        assert_eq!(decl.fields()[1].type_name.as_str(), "Kind");
    }

    // -- Descriptions --

    #[test]
    fn descriptions_on_types_and_fields() {
        let decl = parse_one(
            r#""A registered account."
type User {
  """
  Primary contact address.
  Must be verified.
  """
  email: String
}"#,
        );
        assert_eq!(decl.description.as_deref(), Some("A registered account."));
        assert_eq!(
            decl.fields()[0].description.as_deref(),
            Some("Primary contact address.\nMust be verified.")
        );
    }

    #[test]
    fn description_before_next_header_belongs_to_it() {
        let schema = parse("type A { x: Int }\n\"The B.\"\ntype B { y: Int }").unwrap();
        assert!(schema.types()[0].description.is_none());
        assert_eq!(schema.types()[1].description.as_deref(), Some("The B."));
        assert!(schema.types()[0].fields()[0].description.is_none());
    }

    #[test]
    fn block_string_dedent() {
        assert_eq!(block_string_value("\"\"\"one line\"\"\""), "one line");
        assert_eq!(
            block_string_value("\"\"\"\n    a\n      b\n    \"\"\""),
            "a\n  b"
        );
    }

    // -- Directives --

    #[test]
    fn directives_on_types_and_fields() {
        let decl = parse_one(
            r#"type User @dataEntity(dataEntityVersionId: "v-3") @deprecated {
  salary: Float @dpi_requiredScope(scope:"hr") @deprecated
}"#,
        );
        assert_eq!(decl.directives.len(), 2);
        assert_eq!(decl.directives[0].argument("dataEntityVersionId"), Some("v-3"));
        assert!(decl.directives[1].is_deprecated());
        let salary = &decl.fields()[0];
        assert_eq!(salary.access_scope(), Some("hr"));
        assert_eq!(salary.directives.len(), 2);
    }

    #[test]
    fn directive_argument_forms() {
        let decl = parse_one(
            "type T { f: String @meta(a: \"1\", b = '2', c: BARE, d: 42 e: -1.5, f: \"x,y\") }",
        );
        let d = &decl.fields()[0].directives[0];
        assert_eq!(d.argument("a"), Some("1"));
        assert_eq!(d.argument("b"), Some("2"));
        assert_eq!(d.argument("c"), Some("BARE"));
        assert_eq!(d.argument("d"), Some("42"));
        assert_eq!(d.argument("e"), Some("-1.5"));
        assert_eq!(d.argument("f"), Some("x,y"));
    }

    #[test]
    fn single_quoted_attribute_from_older_files() {
        let decl = parse_one(
            "type T { f: String @standardizedAttribute(standardizedAttributeVersionId='sa-9') }",
        );
        assert_eq!(
            decl.fields()[0].directives[0].argument("standardizedAttributeVersionId"),
            Some("sa-9")
        );
    }

    #[test]
    fn enum_value_extras_are_dropped() {
        let decl = parse_one("enum Status {\n  \"Live\" ACTIVE\n  OLD @deprecated\n}");
        let values: Vec<_> = decl.values().iter().map(Name::as_str).collect();
        assert_eq!(values, ["ACTIVE", "OLD"]);
    }

    // -- Duplicates --

    #[test]
    fn duplicate_names_are_accepted() {
        let schema = parse("type A { code: String code: Int }\ntype A { x: ID }").unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(field_names(&schema.types()[0]), ["code", "code"]);
    }

    // -- Errors --

    #[test]
    fn unsupported_declaration() {
        let errors = parse_err("input NewUser { name: String }");
        assert!(matches!(
            &errors[0],
            DslError::UnsupportedDeclaration { keyword, .. } if keyword == "input"
        ));
    }

    #[test]
    fn missing_type_name() {
        let errors = parse_err("type { id: ID }");
        assert!(matches!(&errors[0], DslError::UnexpectedToken { expected, .. } if expected == "type name"));
    }

    #[test]
    fn missing_field_type() {
        let errors = parse_err("type User { id: \n name: String }");
        assert!(matches!(
            &errors[0],
            DslError::MissingFieldType { field, .. } if field == "id"
        ));
        let errors = parse_err("type User { id: }");
        assert!(matches!(&errors[0], DslError::MissingFieldType { .. }));
    }

    #[test]
    fn missing_field_type_before_next_header() {
        let errors = parse_err("type A { x: \ntype B { y: Int }");
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], DslError::MissingFieldType { .. }));
    }

    #[test]
    fn unterminated_list_type() {
        let errors = parse_err("type T { tags: [String }");
        assert!(matches!(
            &errors[0],
            DslError::UnexpectedToken { expected, .. } if expected.contains("']'")
        ));
    }

    #[test]
    fn malformed_directive_argument() {
        let errors = parse_err("type T @auth(scope) { x: Int }");
        assert!(matches!(
            &errors[0],
            DslError::MalformedDirectiveArgument { directive, .. } if directive == "auth"
        ));
        let errors = parse_err("type T @auth(scope: { x: Int }");
        assert!(matches!(&errors[0], DslError::MalformedDirectiveArgument { .. }));
    }

    #[test]
    fn unclosed_directive_arguments() {
        let errors = parse_err("type T @auth(scope: \"a\"");
        assert!(matches!(&errors[0], DslError::UnexpectedEndOfInput { .. }));
    }

    #[test]
    fn invalid_token_is_reported() {
        let errors = parse_err("type T { x: Int $ }");
        assert!(matches!(&errors[0], DslError::InvalidToken { .. }));
    }

    #[test]
    fn recovery_reports_every_declaration_error() {
        let errors = parse_err(
            "interface Node { id: ID! }\ntype Ok { a: Int }\ntype Bad { b: }\nunion U = A",
        );
        assert_eq!(errors.len(), 3, "errors: {errors:?}");
        assert!(matches!(&errors[0], DslError::UnsupportedDeclaration { .. }));
        assert!(matches!(&errors[1], DslError::MissingFieldType { .. }));
        assert!(matches!(&errors[2], DslError::UnsupportedDeclaration { .. }));
    }

    #[test]
    fn error_spans_point_into_source() {
        let source = "type User { id ID }";
        let errors = parse_err(source);
        let span = errors[0].span().unwrap();
        assert_eq!(&source[span.start..span.end], "ID");
    }

    #[test]
    fn single_directive_entry_point() {
        let tokens = crate::lexer::tokenize("@deprecated extra").unwrap();
        let err = Parser::new(tokens).parse_single_directive().unwrap_err();
        assert!(matches!(err, DslError::UnexpectedToken { .. }));
    }
}
