//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing
//! infrastructure: the error type, token-cursor helpers, and the
//! `parse_program` entry point.
//!
//! # Parser Architecture
//!
//! The parser uses recursive descent with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: statement dispatch, `if`, `namespace`, `return`
//! - `declarations`: variable, function, and class declarations
//! - `expressions`: expression parsing with precedence climbing
//!
//! Parser methods are split across multiple files using `impl Parser`
//! blocks, allowing each module to extend the Parser with related
//! functionality while sharing the cursor state kept here.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Token, TokenKind, TokenList};
use std::fmt;

/// Parser error type
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
        }
    }
}

/// Recursive descent parser over a lexed token list.
///
/// The parser stops at the first malformed construct; it never attempts
/// recovery.
pub struct Parser {
    pub(crate) tokens: TokenList,
    pub(crate) position: usize,
}

impl Parser {
    /// Create a parser over an already-lexed token list. The list must be
    /// terminated by the lexer's end-of-input token.
    pub fn new(tokens: TokenList) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse the entire token stream into a [`Program`].
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            program.body.push(self.parse_statement(true)?);
        }

        Ok(program)
    }

    // ===== Cursor helpers =====

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.tokens[self.position].kind
    }

    pub(crate) fn peek_next_kind(&self) -> TokenKind {
        self.peek_to(self.position + 1)
    }

    /// Kind of the token at an absolute index; lookahead past the end of
    /// the list reads as end-of-input.
    pub(crate) fn peek_to(&self, index: usize) -> TokenKind {
        match self.tokens.get(index) {
            Some(token) => token.kind,
            None => TokenKind::Eof,
        }
    }

    pub(crate) fn eat(&mut self) -> Token {
        let token = self.tokens[self.position].clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.eat();
            true
        } else {
            false
        }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    /// Consume a token of the given kind or fail with the expectation and
    /// the token actually found.
    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.eat())
        } else {
            Err(ParseError::new(format!("{}, found {}", message, self.peek())))
        }
    }

    /// Consume a token matching either kind, or fail.
    pub(crate) fn expect_either(
        &mut self,
        first: TokenKind,
        second: TokenKind,
        message: &str,
    ) -> Result<Token, ParseError> {
        if self.check(first) || self.check(second) {
            Ok(self.eat())
        } else {
            Err(ParseError::new(format!("{}, found {}", message, self.peek())))
        }
    }

    /// Consume a leading `mutable` keyword when present.
    pub(crate) fn eat_if_mutable(&mut self) -> bool {
        self.match_kind(TokenKind::Mutable)
    }

    /// Consume a trailing `~` or `->` type sigil when present.
    pub(crate) fn eat_if_ref_or_ptr(&mut self) -> RefPtr {
        match self.peek_kind() {
            TokenKind::Reference => {
                self.eat();
                RefPtr::Reference
            }
            TokenKind::Pointer => {
                self.eat();
                RefPtr::Pointer
            }
            _ => RefPtr::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    fn parse(source: &str) -> Result<Program, ParseError> {
        let tokens = Lexer::new(source).tokenize()?;
        Parser::new(tokens).parse_program()
    }

    fn expression(stmt: &Statement) -> &Expression {
        stmt.as_expression()
    }

    #[test]
    fn test_empty_program() {
        let program = parse("").unwrap();
        assert!(program.body.is_empty());
    }

    #[test]
    fn test_variable_declaration_with_precedence() {
        // int32 x = 1 + 2 * 3; keeps '+' at the root with the product on
        // the right.
        let program = parse("int32 x = 1 + 2 * 3;").unwrap();
        assert_eq!(program.body.len(), 1);

        let Expression::VariableDeclaration(var) = expression(&program.body[0]) else {
            panic!("expected a variable declaration");
        };
        assert!(!var.is_mutable);
        assert_eq!(var.type_name, TypeName::plain("int32"));
        assert_eq!(var.name.symbol, "x");

        let Some(value) = &var.value else {
            panic!("declaration carries an initializer");
        };
        let Expression::Binary { lhs, op, rhs } = value.as_ref() else {
            panic!("initializer is a binary expression");
        };
        assert_eq!(op, "+");
        assert_eq!(
            lhs.as_ref(),
            &Expression::NumericLiteral(NumericValue::UInt(1))
        );
        let Expression::Binary { op: inner_op, .. } = rhs.as_ref() else {
            panic!("right side is the product");
        };
        assert_eq!(inner_op, "*");
    }

    #[test]
    fn test_exponent_folds_left() {
        let program = parse("x = a ** b ** c;").unwrap();
        let Expression::Assignment { rhs, .. } = expression(&program.body[0]) else {
            panic!("expected an assignment");
        };
        // Two '**' nodes, outer one folded from the left.
        let Expression::Binary { lhs, op, .. } = rhs.as_ref() else {
            panic!("expected a binary expression");
        };
        assert_eq!(op, "**");
        let Expression::Binary { op: inner_op, .. } = lhs.as_ref() else {
            panic!("expected a nested exponent");
        };
        assert_eq!(inner_op, "**");
    }

    #[test]
    fn test_mutable_declaration_without_initializer() {
        // The node records is_mutable = false even under the prefix; the
        // type keeps the truthful record.
        let program = parse("mutable int32 y;").unwrap();
        let Expression::VariableDeclaration(var) = expression(&program.body[0]) else {
            panic!("expected a variable declaration");
        };
        assert!(!var.is_mutable);
        assert!(var.type_name.is_mutable);
        assert_eq!(var.name.symbol, "y");
        assert!(var.value.is_none());
    }

    #[test]
    fn test_mutable_declaration_with_initializer() {
        let program = parse("mutable int32 y = 4;").unwrap();
        let Expression::VariableDeclaration(var) = expression(&program.body[0]) else {
            panic!("expected a variable declaration");
        };
        assert!(var.is_mutable);
        assert!(var.type_name.is_mutable);
        assert_eq!(
            var.value.as_deref(),
            Some(&Expression::NumericLiteral(NumericValue::UInt(4)))
        );
    }

    #[test]
    fn test_string_declaration() {
        let program = parse(r#"String s = "hi";"#).unwrap();
        let Expression::VariableDeclaration(var) = expression(&program.body[0]) else {
            panic!("expected a variable declaration");
        };
        assert_eq!(var.type_name.name, "String");
        assert_eq!(
            var.value.as_deref(),
            Some(&Expression::StringLiteral("hi".to_string()))
        );
    }

    #[test]
    fn test_reference_and_pointer_declarations() {
        let program = parse("mutable int32 ~r = x;").unwrap();
        let Expression::VariableDeclaration(var) = expression(&program.body[0]) else {
            panic!("expected a variable declaration");
        };
        assert_eq!(var.type_name.ref_ptr, RefPtr::Reference);

        let program = parse("mutable int32 ->p = x;").unwrap();
        let Expression::VariableDeclaration(var) = expression(&program.body[0]) else {
            panic!("expected a variable declaration");
        };
        assert_eq!(var.type_name.ref_ptr, RefPtr::Pointer);
    }

    #[test]
    fn test_statement_level_function_call() {
        let program = parse("f(1, -2, a.b);").unwrap();
        let Expression::FunctionCall { name, arguments } = expression(&program.body[0]) else {
            panic!("expected a function call");
        };
        assert_eq!(name.symbol, "f");
        assert_eq!(arguments.len(), 3);
        assert_eq!(
            arguments[0].as_expression(),
            &Expression::NumericLiteral(NumericValue::UInt(1))
        );
        // -2 arrives as a signed literal straight from the lexer.
        assert_eq!(
            arguments[1].as_expression(),
            &Expression::NumericLiteral(NumericValue::Int(-2))
        );
        let Expression::Binary { op, .. } = arguments[2].as_expression() else {
            panic!("third argument is a dot expression");
        };
        assert_eq!(op, ".");
    }

    #[test]
    fn test_missing_semicolon_is_error() {
        let err = parse("x = 1").unwrap_err();
        assert!(err.message.contains("semicolon"), "{}", err.message);
    }

    #[test]
    fn test_unexpected_token_is_error() {
        assert!(parse("} ;").is_err());
    }
}
