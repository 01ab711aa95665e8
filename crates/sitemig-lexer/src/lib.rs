//! sitemig Lexer
//!
//! Tokenizes static HTML pages into a stream of tokens.
//! Handles start and end tags with raw attributes, comments, doctypes,
//! and the raw text bodies of `script`, `style`, `textarea` and `title`.
//!
//! # Example
//!
//! ```
//! use sitemig_lexer::Scanner;
//!
//! let tokens = Scanner::tokenize("").unwrap();
//! assert_eq!(tokens.len(), 1); // Just EOF
//! ```

pub mod scanner;
pub mod token;

pub use scanner::Scanner;
pub use token::{is_void_element, Quote, RawAttribute, Span, Token, TokenKind, VOID_ELEMENTS};

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Lexer error at line {line}, column {column}: {message}")]
pub struct LexerError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
