//! sitemig Parser
//!
//! Builds trees from source text.
//! Includes both the HTML tree builder (for the token stream produced by
//! `sitemig-lexer`) and a tolerant CSS parser that never rejects input,
//! matching how browsers and postcss' safe parser recover from broken
//! stylesheets.

pub mod ast;
pub mod css_lexer;
pub mod css_parser;
pub mod parser;

pub use ast::{Attribute, CssNode, Document, Element, Node, Stylesheet};
pub use css_parser::CssParser;
pub use parser::Parser;

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
