//! # ghjq Query Language - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) shared by both surface
//! syntaxes of the ghjq predicate language: the infix/keyword form and the
//! nested-list form.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer (infix form only)
//! - **[expressions]** - Expression nodes (literals, field paths, calls)
//! - **[operators]** - Named operators (comparison, string, membership, logical)
//!
//! ## The Two Surface Syntaxes
//!
//! Infix/keyword form, parsed by [`crate::lexer`] and [`crate::parser`]:
//!
//! ```text
//! :language eq? Python AND :stargazers_count gt? 50
//! ```
//!
//! Nested-list form, parsed by [`crate::sexpr`] straight from JSON:
//!
//! ```text
//! ["and", ["eq?", ["path", "language"], "Python"],
//!         ["gt?", ["path", "stargazers_count"], 50]]
//! ```
//!
//! Both parse to the same [`Expr`] tree, so the evaluator cannot tell them
//! apart. Parsing is pure: identical input always yields an identical AST.
//!
//! ## Core Concepts
//!
//! - Field references are written `:dotted.path` (infix) or
//!   `["path", "dotted.path"]` (nested-list) and resolve via
//!   [`crate::path::Path`].
//! - Comparison operators carry a trailing `?` in the infix form: `gt?`,
//!   `eq?`, `contains?`, ...
//! - `AND`, `OR`, `NOT` combine predicates, with `NOT` binding tightest and
//!   `OR` loosest; parentheses override.
//! - `lower-case` / `upper-case` apply prefix-style to a single operand.
pub mod tokens;
pub mod expressions;
pub mod operators;

pub use tokens::Token;
pub use expressions::Expr;
pub use operators::Op;
