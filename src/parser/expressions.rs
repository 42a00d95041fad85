//! Expression parsing implementation
//!
//! Expressions are parsed by a fixed ladder of methods, one per precedence
//! level, each folding its operator left-associatively over the level
//! below (low → high):
//!
//! 1. Assignment (`=`, right-associative; top-level calls also consume the
//!    statement's terminating semicolon)
//! 2. Equality (`==`, `!=`)
//! 3. Additive (`+`, `-`)
//! 4. Multiplicative (`*`, `/`, `%`)
//! 5. Exponent (`**`)
//! 6. Member access (`.`)
//! 7. Primary: identifiers (or calls when a `(` follows), literals, and
//!    parenthesized expressions
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse one expression. `top_level` marks a statement-position parse,
    /// which must end with a semicolon and may turn out to be a variable
    /// declaration.
    pub(crate) fn parse_expression(&mut self, top_level: bool) -> Result<Expression, ParseError> {
        self.parse_assignment_expression(top_level)
    }

    /// Parse the assignment level. Right-associative: `a = b = c` nests to
    /// the right. A top-level call first checks whether the NEXT token
    /// opens a type, which reroutes the whole statement into a variable
    /// declaration (this keys on the next token alone, so it fires for
    /// shapes like `mutable int32 x = …`).
    pub(crate) fn parse_assignment_expression(
        &mut self,
        top_level: bool,
    ) -> Result<Expression, ParseError> {
        if top_level {
            let next = self.peek_next_kind();
            if next.is_type() || next.is_ref_or_ptr() {
                let var = self.parse_variable_declaration()?;
                return Ok(Expression::VariableDeclaration(var));
            }
        }

        let mut left = self.parse_boolean_expression()?;

        if self.check(TokenKind::Equals) {
            self.eat();
            let right = self.parse_assignment_expression(false)?;
            left = Expression::Assignment {
                lhs: Box::new(left),
                rhs: Box::new(right),
            };
        }

        if top_level {
            self.expect(
                TokenKind::Semicolon,
                "a statement must end with a semicolon",
            )?;
        }

        Ok(left)
    }

    /// Parse a function call: name, parenthesized comma-separated
    /// arguments. Arguments parse at the additive level. When `lone_call`
    /// is set the call is its own statement and consumes the trailing
    /// semicolon itself.
    pub(crate) fn parse_function_call(
        &mut self,
        lone_call: bool,
    ) -> Result<Expression, ParseError> {
        let name = self.expect(TokenKind::Identifier, "expected a function name")?;
        self.expect(TokenKind::OParen, "a function call must open with '('")?;

        let mut arguments = Vec::new();
        while !self.check(TokenKind::CParen) && !self.is_at_end() {
            arguments.push(Statement::Expression(self.parse_additive_expression()?));
            if self.check(TokenKind::Comma) {
                self.eat();
            }
        }

        self.expect(TokenKind::CParen, "Expected ')' to close the function call")?;

        if lone_call {
            self.expect(TokenKind::Semicolon, "Expected ';' to end the statement")?;
        }

        Ok(Expression::FunctionCall {
            name: Identifier::new(name.text),
            arguments,
        })
    }

    // ===== Precedence ladder =====

    fn parse_boolean_expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_additive_expression()?;

        while self.peek_kind().is_boolean_operator() {
            let op = self.eat().text;
            let right = self.parse_additive_expression()?;
            left = Expression::Binary {
                lhs: Box::new(left),
                op,
                rhs: Box::new(right),
            };
        }

        Ok(left)
    }

    pub(crate) fn parse_additive_expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_multiplicative_expression()?;

        while matches!(self.peek_kind(), TokenKind::Plus | TokenKind::Minus) {
            let op = self.eat().text;
            let right = self.parse_multiplicative_expression()?;
            left = Expression::Binary {
                lhs: Box::new(left),
                op,
                rhs: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_multiplicative_expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_exponential_expression()?;

        while self.peek_kind().is_mult_level() {
            let op = self.eat().text;
            let right = self.parse_exponential_expression()?;
            left = Expression::Binary {
                lhs: Box::new(left),
                op,
                rhs: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_exponential_expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_dot_expression()?;

        while self.check(TokenKind::Exponent) {
            let op = self.eat().text;
            let right = self.parse_dot_expression()?;
            left = Expression::Binary {
                lhs: Box::new(left),
                op,
                rhs: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_dot_expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_primary_expression()?;

        while self.check(TokenKind::Dot) {
            let op = self.eat().text;
            let right = self.parse_primary_expression()?;
            left = Expression::Binary {
                lhs: Box::new(left),
                op,
                rhs: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parse a primary: a literal, an identifier (a call when followed by
    /// `(`), or a parenthesized expression.
    fn parse_primary_expression(&mut self) -> Result<Expression, ParseError> {
        match self.peek_kind() {
            TokenKind::Identifier => {
                if self.peek_next_kind() == TokenKind::OParen {
                    return self.parse_function_call(false);
                }
                Ok(Expression::Identifier(Identifier::new(self.eat().text)))
            }
            TokenKind::NegativeIntegerLiteral => {
                let token = self.eat();
                let value = token.text.parse::<i64>().map_err(|_| {
                    ParseError::new(format!("invalid integer literal '{}'", token.text))
                })?;
                Ok(Expression::NumericLiteral(NumericValue::Int(value)))
            }
            TokenKind::IntegerLiteral => {
                let token = self.eat();
                let value = token.text.parse::<u64>().map_err(|_| {
                    ParseError::new(format!("invalid integer literal '{}'", token.text))
                })?;
                Ok(Expression::NumericLiteral(NumericValue::UInt(value)))
            }
            TokenKind::FloatLiteral => {
                let token = self.eat();
                let value = token.text.parse::<f64>().map_err(|_| {
                    ParseError::new(format!("invalid float literal '{}'", token.text))
                })?;
                Ok(Expression::NumericLiteral(NumericValue::Float(value)))
            }
            TokenKind::StringLiteral => Ok(Expression::StringLiteral(self.eat().text)),
            TokenKind::CharLiteral => Ok(Expression::CharacterLiteral(self.eat().text)),
            TokenKind::BoolLiteral => Ok(Expression::BoolLiteral(self.eat().text == "true")),
            TokenKind::OParen => {
                self.eat();
                let value = self.parse_expression(false)?;
                self.expect(
                    TokenKind::CParen,
                    "Expected ')' to close the grouped expression",
                )?;
                Ok(value)
            }
            _ => Err(ParseError::new(format!(
                "unexpected {} in expression",
                self.peek()
            ))),
        }
    }
}
