//! Lexer (tokenizer) for Tern source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser. The lexer is a single left-to-right pass with one character of
//! lookahead; it keeps two pieces of state across tokens: the kind of the
//! previously emitted token (used to decide whether `-` starts a negative
//! literal) and the set of class names the source has declared so far
//! (identifiers matching the set lex as [`TokenKind::ClassType`]).

use rustc_hash::FxHashSet;
use std::fmt;

/// All token kinds produced by the lexer.
///
/// Tokens carry their source text separately (see [`Token`]), so the kind
/// set is a plain fieldless enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Binary operators
    Equals,       // =
    EqualsEquals, // ==
    NotEquals,    // !=
    GreaterThan,  // >
    LessThan,     // <
    ShiftLeft,    // <<
    ShiftRight,   // >>
    Plus,         // +
    Minus,        // -
    Divide,       // /
    Multiply,     // *
    Exponent,     // **
    Modulus,      // %
    And,          // &
    AndAnd,       // &&
    Or,           // |
    OrOr,         // ||
    Dot,          // .
    ColonColon,   // ::

    // Unary operators
    MinusMinus, // --
    Not,        // !
    PlusPlus,   // ++

    // Sigils
    Pointer,     // ->
    Reference,   // ~
    Semicolon,   // ;
    Colon,       // :
    Comma,       // ,
    OParen,      // (
    CParen,      // )
    OCurlyBrace, // {
    CCurlyBrace, // }

    // Literals
    IntegerLiteral,
    NegativeIntegerLiteral,
    FloatLiteral,
    StringLiteral,
    CharLiteral,
    BoolLiteral,

    // Identifier-like
    Identifier,
    ClassType,
    PrimitiveType,

    // Keywords
    For,
    While,
    If,
    In,
    Return,
    Null,
    Cast,
    Constexpr,
    Namespace,
    Class,
    Public,
    Private,
    Protected,
    Mutable,

    // End of input
    Eof,
}

impl TokenKind {
    /// True for every operator that joins two operands, `=` included.
    pub fn is_binary_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Equals
                | TokenKind::EqualsEquals
                | TokenKind::NotEquals
                | TokenKind::GreaterThan
                | TokenKind::LessThan
                | TokenKind::ShiftLeft
                | TokenKind::ShiftRight
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Divide
                | TokenKind::Multiply
                | TokenKind::Exponent
                | TokenKind::Modulus
                | TokenKind::And
                | TokenKind::AndAnd
                | TokenKind::Or
                | TokenKind::OrOr
                | TokenKind::Dot
                | TokenKind::ColonColon
        )
    }

    /// `==` and `!=`, the equality level of the expression ladder.
    pub fn is_boolean_operator(self) -> bool {
        matches!(self, TokenKind::EqualsEquals | TokenKind::NotEquals)
    }

    /// `*`, `/` and `%`.
    pub fn is_mult_level(self) -> bool {
        matches!(
            self,
            TokenKind::Multiply | TokenKind::Divide | TokenKind::Modulus
        )
    }

    /// The `~` and `->` type sigils.
    pub fn is_ref_or_ptr(self) -> bool {
        matches!(self, TokenKind::Reference | TokenKind::Pointer)
    }

    /// A token that can open a type: primitive or class type.
    pub fn is_type(self) -> bool {
        matches!(self, TokenKind::PrimitiveType | TokenKind::ClassType)
    }

    /// `public`, `private` or `protected`.
    pub fn is_access_specifier(self) -> bool {
        matches!(
            self,
            TokenKind::Public | TokenKind::Private | TokenKind::Protected
        )
    }
}

/// A lexical unit: its [`TokenKind`] plus the literal (or canonical) source
/// text it was scanned from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::ClassType => write!(f, "class type '{}'", self.text),
            TokenKind::PrimitiveType => write!(f, "type '{}'", self.text),
            TokenKind::IntegerLiteral | TokenKind::NegativeIntegerLiteral => {
                write!(f, "integer literal {}", self.text)
            }
            TokenKind::FloatLiteral => write!(f, "float literal {}", self.text),
            TokenKind::StringLiteral => {
                write!(f, "string literal \"{}\"", self.text)
            }
            TokenKind::CharLiteral => write!(f, "char literal '{}'", self.text),
            TokenKind::BoolLiteral => write!(f, "bool literal {}", self.text),
            TokenKind::Eof => write!(f, "end of file"),
            _ => write!(f, "'{}'", self.text),
        }
    }
}

/// A full token stream; always ends with a single [`TokenKind::Eof`] token.
pub type TokenList = Vec<Token>;

/// Lexer error type
#[derive(Debug)]
pub struct LexError {
    pub message: String,
}

impl LexError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lexer error: {}", self.message)
    }
}

impl std::error::Error for LexError {}

/// Lexer for Tern source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    /// Kind of the last emitted token. Seeds as [`TokenKind::Eof`], so a
    /// leading `-` is never treated as a sign prefix.
    last_kind: TokenKind,
    /// Names introduced by `class` declarations seen so far in this input.
    class_names: FxHashSet<String>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            last_kind: TokenKind::Eof,
            class_names: FxHashSet::default(),
        }
    }

    /// Tokenize the entire input.
    pub fn tokenize(&mut self) -> Result<TokenList, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments();

            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::Eof, ""));
                break;
            }

            let token = self.next_token()?;
            self.last_kind = token.kind;
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let ch = self
            .advance()
            .ok_or_else(|| LexError::new("unexpected end of input"))?;

        let token = match ch {
            '"' => self.string_literal()?,
            '\'' => self.char_literal(),
            '0'..='9' => self.number_literal(String::from(ch)),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(ch),

            ';' => Token::new(TokenKind::Semicolon, ";"),
            ',' => Token::new(TokenKind::Comma, ","),
            '(' => Token::new(TokenKind::OParen, "("),
            ')' => Token::new(TokenKind::CParen, ")"),
            '{' => Token::new(TokenKind::OCurlyBrace, "{"),
            '}' => Token::new(TokenKind::CCurlyBrace, "}"),
            '~' => Token::new(TokenKind::Reference, "~"),
            '%' => Token::new(TokenKind::Modulus, "%"),
            // Comments were skipped before dispatch, so a slash is division.
            '/' => Token::new(TokenKind::Divide, "/"),

            '<' => {
                if self.peek() == Some('<') {
                    self.advance();
                    Token::new(TokenKind::ShiftLeft, "<<")
                } else {
                    Token::new(TokenKind::LessThan, "<")
                }
            }
            '>' => {
                if self.peek() == Some('>') {
                    self.advance();
                    Token::new(TokenKind::ShiftRight, ">>")
                } else {
                    Token::new(TokenKind::GreaterThan, ">")
                }
            }
            '+' => {
                if self.peek() == Some('+') {
                    self.advance();
                    Token::new(TokenKind::PlusPlus, "++")
                } else {
                    Token::new(TokenKind::Plus, "+")
                }
            }
            '-' => {
                if self.peek() == Some('>') {
                    self.advance();
                    Token::new(TokenKind::Pointer, "->")
                } else if self.sign_prefix_context() {
                    self.number_literal(String::from("-"))
                } else if self.peek() == Some('-') {
                    self.advance();
                    Token::new(TokenKind::MinusMinus, "--")
                } else {
                    Token::new(TokenKind::Minus, "-")
                }
            }
            '*' => {
                if self.peek() == Some('*') {
                    self.advance();
                    Token::new(TokenKind::Exponent, "**")
                } else {
                    Token::new(TokenKind::Multiply, "*")
                }
            }
            ':' => {
                if self.peek() == Some(':') {
                    self.advance();
                    Token::new(TokenKind::ColonColon, "::")
                } else {
                    Token::new(TokenKind::Colon, ":")
                }
            }
            '&' => {
                if self.peek() == Some('&') {
                    self.advance();
                    Token::new(TokenKind::AndAnd, "&&")
                } else {
                    Token::new(TokenKind::And, "&")
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    Token::new(TokenKind::OrOr, "||")
                } else {
                    Token::new(TokenKind::Or, "|")
                }
            }
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::EqualsEquals, "==")
                } else {
                    Token::new(TokenKind::Equals, "=")
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::NotEquals, "!=")
                } else {
                    Token::new(TokenKind::Not, "!")
                }
            }
            '.' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.number_literal(String::from("."))
                } else {
                    Token::new(TokenKind::Dot, ".")
                }
            }

            _ => {
                return Err(LexError::new(format!(
                    "unrecognized character in source: '{}'",
                    ch
                )));
            }
        };

        Ok(token)
    }

    /// A minus sign starts a negative literal when the previous token could
    /// not end an operand: any binary operator (`=` included), an opening
    /// paren, or a comma.
    fn sign_prefix_context(&self) -> bool {
        self.last_kind.is_binary_operator()
            || matches!(self.last_kind, TokenKind::OParen | TokenKind::Comma)
    }

    /// Scan the remainder of a numeric literal. `text` already holds the
    /// consumed prefix: a leading digit, a `-` sign, or a lone `.` for
    /// fraction-only floats.
    fn number_literal(&mut self, mut text: String) -> Token {
        let negative = text.starts_with('-');
        let mut fractional = text.ends_with('.');

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if !fractional && self.peek() == Some('.') {
            fractional = true;
            text.push('.');
            self.advance();
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    text.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        let kind = if fractional {
            TokenKind::FloatLiteral
        } else if negative {
            TokenKind::NegativeIntegerLiteral
        } else {
            TokenKind::IntegerLiteral
        };

        Token::new(kind, text)
    }

    /// Scan a string literal; the opening quote is already consumed. The
    /// inner text is preserved verbatim: escape sequences are not decoded.
    fn string_literal(&mut self) -> Result<Token, LexError> {
        let mut text = String::new();

        while let Some(c) = self.peek() {
            match c {
                '"' => {
                    self.advance();
                    return Ok(Token::new(TokenKind::StringLiteral, text));
                }
                '\n' | '\r' => {
                    return Err(LexError::new("string literal spans a line break"));
                }
                _ => {
                    text.push(c);
                    self.advance();
                }
            }
        }

        Err(LexError::new("unterminated string literal"))
    }

    /// Scan a char literal; the opening quote is already consumed. Captures
    /// one character, two when the first is a backslash, so the token text
    /// carries escapes undecoded. A closing quote is consumed when present
    /// but never demanded.
    fn char_literal(&mut self) -> Token {
        let mut text = String::new();

        if let Some(c) = self.advance() {
            text.push(c);
            if c == '\\' {
                if let Some(escaped) = self.advance() {
                    text.push(escaped);
                }
            }
        }

        if self.peek() == Some('\'') {
            self.advance();
        }

        Token::new(TokenKind::CharLiteral, text)
    }

    /// Scan an identifier and classify it: bool literal, keyword, built-in
    /// type, class type, or plain identifier.
    fn identifier_or_keyword(&mut self, first: char) -> Token {
        let mut ident = String::from(first);

        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if ident == "true" || ident == "false" {
            return Token::new(TokenKind::BoolLiteral, ident);
        }

        if let Some(kind) = keyword_kind(&ident) {
            return Token::new(kind, ident);
        }

        if is_default_type(&ident) {
            // `String` is the one built-in that behaves as a class type.
            let kind = if ident == "String" {
                TokenKind::ClassType
            } else {
                TokenKind::PrimitiveType
            };
            return Token::new(kind, ident);
        }

        // The word after `class` names a new class; remember it so later
        // uses of the bare name lex as a class type.
        if self.last_kind == TokenKind::Class {
            self.class_names.insert(ident.clone());
            return Token::new(TokenKind::ClassType, ident);
        }

        if self.class_names.contains(&ident) {
            return Token::new(TokenKind::ClassType, ident);
        }

        Token::new(TokenKind::Identifier, ident)
    }

    /// Skip whitespace and `//` line comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\n') | Some('\r') => {
                    self.advance();
                }
                Some('/') if self.peek_ahead(1) == Some('/') => {
                    self.skip_line_comment();
                }
                _ => break,
            }
        }
    }

    /// Skip a `//` comment through the end of the line.
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

/// Keyword lexemes and their kinds.
fn keyword_kind(ident: &str) -> Option<TokenKind> {
    let kind = match ident {
        "class" => TokenKind::Class,
        "public" => TokenKind::Public,
        "private" => TokenKind::Private,
        "protected" => TokenKind::Protected,
        "mutable" => TokenKind::Mutable,
        "cast" => TokenKind::Cast,
        "constexpr" => TokenKind::Constexpr,
        "return" => TokenKind::Return,
        "for" => TokenKind::For,
        "while" => TokenKind::While,
        "in" => TokenKind::In,
        "if" => TokenKind::If,
        "null" => TokenKind::Null,
        "namespace" => TokenKind::Namespace,
        _ => return None,
    };
    Some(kind)
}

/// Built-in type names. All lex as [`TokenKind::PrimitiveType`] except
/// `String`, which is a built-in class type.
fn is_default_type(ident: &str) -> bool {
    matches!(
        ident,
        "auto"
            | "char"
            | "int8"
            | "int16"
            | "int32"
            | "int64"
            | "uint8"
            | "uint16"
            | "uint32"
            | "uint64"
            | "float"
            | "double"
            | "bool"
            | "String"
            | "void"
    )
}
