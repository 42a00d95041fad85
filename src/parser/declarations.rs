//! Declaration parsing implementation
//!
//! This module handles the declaration forms of the language:
//!
//! - Variable declarations: `[mutable] type [~|->] name [= value];`
//! - Function declarations: `[mutable] type [~|->] name(params) { body }`
//! - Class definitions: `class Name { members }` with sticky
//!   `public`/`private`/`protected` access sections
//!
//! # Grammar
//!
//! ```text
//! decl     ::= [ "mutable" ] type [ refptr ] ident
//!              ( "(" params ")" "{" body "}" | [ "=" expr ] ";" )
//! classDef ::= "class" classType "{" { accessSpec ":" | decl } "}"
//! refptr   ::= "~" | "->"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a variable declaration. The caller has already decided the
    /// shape by lookahead; this consumes `[mutable] type [~|->] name` and
    /// then either a bare `;` or `= <expression>;`.
    pub(crate) fn parse_variable_declaration(
        &mut self,
    ) -> Result<VariableDeclaration, ParseError> {
        let is_mutable = self.eat_if_mutable();

        let type_token = self.expect_either(
            TokenKind::ClassType,
            TokenKind::PrimitiveType,
            "expected a type to open the variable declaration",
        )?;
        let ref_ptr = self.eat_if_ref_or_ptr();
        let type_name = TypeName::new(type_token.text, is_mutable, ref_ptr);

        let name = self.expect(TokenKind::Identifier, "expected a name for the variable")?;

        if self.match_kind(TokenKind::Semicolon) {
            // TODO: initializer-less declarations drop the mutable prefix
            // on the node; decide whether it should be carried (the
            // TypeName above already records it).
            return Ok(VariableDeclaration {
                is_mutable: false,
                type_name,
                name: Identifier::new(name.text),
                value: None,
            });
        }

        self.expect(TokenKind::Equals, "expected '=' after the variable name")?;
        // The initializer is a top-level expression parse, which also
        // consumes the terminating semicolon.
        let value = self.parse_expression(true)?;

        Ok(VariableDeclaration {
            is_mutable,
            type_name,
            name: Identifier::new(name.text),
            value: Some(Box::new(value)),
        })
    }

    /// Parse a function declaration: return type, name, parameter list,
    /// braced body. Collecting body statements stops early when a
    /// `return` statement is parsed.
    pub(crate) fn parse_function_declaration(
        &mut self,
    ) -> Result<FunctionDeclaration, ParseError> {
        let is_mutable = self.eat_if_mutable();

        let type_token = self.expect_either(
            TokenKind::ClassType,
            TokenKind::PrimitiveType,
            "a function must have a return type",
        )?;
        let ref_ptr = self.eat_if_ref_or_ptr();
        let return_type = TypeName::new(type_token.text, is_mutable, ref_ptr);

        let name = Identifier::new(
            self.expect(TokenKind::Identifier, "a function must have a name")?
                .text,
        );

        self.expect(TokenKind::OParen, "Expected '(' to open the parameter list")?;

        let mut parameters = Vec::new();
        while self.peek_kind().is_type() || self.check(TokenKind::Mutable) {
            let p_mutable = self.eat_if_mutable();

            let p_type = self.expect_either(
                TokenKind::ClassType,
                TokenKind::PrimitiveType,
                "parameters must have a type and a name",
            )?;
            let p_ref_ptr = self.eat_if_ref_or_ptr();
            let p_name =
                self.expect(TokenKind::Identifier, "parameters must have a type and a name")?;

            match self.peek_kind() {
                TokenKind::Comma => {
                    self.eat();
                }
                TokenKind::CParen => {}
                _ => {
                    return Err(ParseError::new(format!(
                        "invalid parameter list for function {}",
                        name.symbol
                    )));
                }
            }

            parameters.push(Parameter {
                type_name: TypeName::new(p_type.text, p_mutable, p_ref_ptr),
                name: Identifier::new(p_name.text),
            });
        }

        self.expect(TokenKind::CParen, "Expected ')' to close the parameter list")?;
        self.expect(TokenKind::OCurlyBrace, "Expected '{' to open the function body")?;

        let mut body = Vec::new();
        while !self.check(TokenKind::CCurlyBrace) && !self.is_at_end() {
            if self.check(TokenKind::Return) {
                body.push(self.parse_return_statement()?);
                break;
            }
            body.push(self.parse_statement(true)?);
        }

        self.expect(
            TokenKind::CCurlyBrace,
            &format!("no matching '}}' on function {}", name.symbol),
        )?;

        Ok(FunctionDeclaration {
            return_type,
            name,
            parameters,
            body,
        })
    }

    /// Parse a class definition. Members are classified by looking past
    /// the type, optional sigil, and name: a `(` there makes a method,
    /// anything else a field. Access specifier lines update the sticky
    /// access level for the members that follow.
    pub(crate) fn parse_class_definition(&mut self) -> Result<Statement, ParseError> {
        self.eat(); // 'class'

        let type_token = self.expect(
            TokenKind::ClassType,
            "a class type name must follow 'class'",
        )?;
        self.expect(TokenKind::OCurlyBrace, "Expected '{' to open the class body")?;

        let mut fields = Vec::new();
        let mut methods = Vec::new();
        let mut access = AccessSpecifier::Public;

        while !self.check(TokenKind::CCurlyBrace) && !self.is_at_end() {
            let kind = self.peek_kind();

            if kind.is_access_specifier() {
                access = match self.eat().kind {
                    TokenKind::Public => AccessSpecifier::Public,
                    TokenKind::Protected => AccessSpecifier::Protected,
                    _ => AccessSpecifier::Private,
                };
                self.expect(TokenKind::Colon, "Expected ':' after the access specifier")?;
                continue;
            }

            let mut offset = 0;
            let mut member_kind = kind;
            if member_kind == TokenKind::Mutable {
                offset = 1;
                member_kind = self.peek_next_kind();
            }
            if !member_kind.is_type() {
                return Err(ParseError::new(format!(
                    "class members must start with a type, found {}",
                    self.peek()
                )));
            }

            if self.peek_to(self.position + 1 + offset).is_ref_or_ptr() {
                offset += 1;
            }

            if self.peek_to(self.position + 2 + offset) == TokenKind::OParen {
                let func = self.parse_function_declaration()?;
                methods.push(MethodDeclaration { decl: func, access });
            } else {
                let var = self.parse_variable_declaration()?;
                fields.push(FieldDeclaration { decl: var, access });
            }
        }

        self.expect(TokenKind::CCurlyBrace, "Expected '}' to close the class body")?;

        Ok(Expression::ClassDeclaration(ClassDeclaration {
            type_name: TypeName::plain(type_token.text),
            fields,
            methods,
        })
        .into())
    }
}
