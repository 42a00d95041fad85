//! # Introduction
//!
//! Tern is the front-end of a small statically-typed language: it consumes
//! one source file as UTF-8 text and produces an in-memory AST of the
//! program's declarations, statements, and expressions. It does not
//! execute, type-check, or lower the tree; those belong to later phases.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Token list → Parser → Program AST
//! ```
//!
//! 1. [`parser::lexer`] — tokenises the source, tracking declared class
//!    names so later uses of a class name lex as a type.
//! 2. [`parser::parse`] — hand-written recursive descent with precedence
//!    climbing; fatal on the first malformed construct.
//! 3. [`parser::ast`] — the owned tree the parser produces.
//! 4. [`pprint`] — renders an AST back to source text; parsing that text
//!    reproduces a structurally equal tree.
//!
//! The bundled binary reads a file named on the command line, prints the
//! source, and dumps the parsed tree.

pub mod parser;
pub mod pprint;
