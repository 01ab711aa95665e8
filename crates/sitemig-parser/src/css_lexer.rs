//! Lexer for CSS stylesheets.
//!
//! Splits a stylesheet into the coarse tokens the tolerant parser needs:
//! braces, semicolons, at-keywords, comments, and raw chunks of everything
//! else. Quoted strings and parenthesized groups (`url(data:...;...)`) are
//! kept inside a single chunk so their punctuation never splits a rule.
//!
//! Spans are byte offsets into the source, so parser output can be
//! spliced back into the original text.
//!
//! # Examples
//!
//! ```
//! use sitemig_parser::css_lexer::{CssLexer, CssTokenKind};
//!
//! let tokens = CssLexer::tokenize("a { color: red }");
//! assert_eq!(tokens[0].kind, CssTokenKind::Chunk);
//! assert_eq!(tokens[1].kind, CssTokenKind::LBrace);
//! ```

use crate::ast::SourceRange;

/// A token produced by the CSS lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct CssToken {
    pub kind: CssTokenKind,
    pub range: SourceRange,
}

impl CssToken {
    /// Source text covered by this token.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.range.start..self.range.end]
    }
}

/// CSS token classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssTokenKind {
    LBrace,
    RBrace,
    Semicolon,
    /// `@media` → `media`
    AtKeyword(String),
    /// `/* x */` → ` x `
    Comment(String),
    /// Any other run of source text.
    Chunk,
    Eof,
}

/// CSS lexer. Never fails: unterminated strings and comments run to the end
/// of input.
pub struct CssLexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<CssToken>,
}

impl<'a> CssLexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    /// Tokenize an entire stylesheet.
    pub fn tokenize(source: &str) -> Vec<CssToken> {
        let mut lexer = CssLexer::new(source);
        while lexer.pos < lexer.bytes.len() {
            lexer.scan_token();
        }
        let end = lexer.bytes.len();
        lexer.push(CssTokenKind::Eof, end, end);
        lexer.tokens
    }

    fn scan_token(&mut self) {
        let start = self.pos;
        match self.bytes[self.pos] {
            b'{' => {
                self.pos += 1;
                self.push(CssTokenKind::LBrace, start, self.pos);
            }
            b'}' => {
                self.pos += 1;
                self.push(CssTokenKind::RBrace, start, self.pos);
            }
            b';' => {
                self.pos += 1;
                self.push(CssTokenKind::Semicolon, start, self.pos);
            }
            b'/' if self.peek_at(1) == b'*' => self.scan_comment(),
            b'@' if is_ident_byte(self.peek_at(1)) => self.scan_at_keyword(),
            _ => self.scan_chunk(),
        }
    }

    fn scan_comment(&mut self) {
        let start = self.pos;
        self.pos += 2; // consume `/*`
        let body_start = self.pos;
        let body_end = match self.source[body_start..].find("*/") {
            Some(offset) => {
                self.pos = body_start + offset + 2;
                body_start + offset
            }
            None => {
                self.pos = self.bytes.len();
                self.bytes.len()
            }
        };
        let content = self.source[body_start..body_end].to_string();
        self.push(CssTokenKind::Comment(content), start, self.pos);
    }

    fn scan_at_keyword(&mut self) {
        let start = self.pos;
        self.pos += 1; // consume `@`
        while self.pos < self.bytes.len() && is_ident_byte(self.bytes[self.pos]) {
            self.pos += 1;
        }
        let name = self.source[start + 1..self.pos].to_string();
        self.push(CssTokenKind::AtKeyword(name), start, self.pos);
    }

    /// Consume until a structural character at paren depth zero, outside strings.
    fn scan_chunk(&mut self) {
        let start = self.pos;
        let mut depth = 0usize;
        let mut quote: Option<u8> = None;

        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if let Some(q) = quote {
                if b == b'\\' {
                    self.pos += 1;
                } else if b == q {
                    quote = None;
                }
                self.pos += 1;
                continue;
            }
            match b {
                b'"' | b'\'' => quote = Some(b),
                b'(' => depth += 1,
                b')' => depth = depth.saturating_sub(1),
                b'{' | b'}' | b';' if depth == 0 => break,
                b'/' if self.peek_at(1) == b'*' => break,
                _ => {}
            }
            self.pos += 1;
        }

        // A backslash escape at end of input can step past the end.
        self.pos = self.pos.min(self.bytes.len());
        self.push(CssTokenKind::Chunk, start, self.pos);
    }

    fn peek_at(&self, offset: usize) -> u8 {
        self.bytes.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn push(&mut self, kind: CssTokenKind, start: usize, end: usize) {
        self.tokens.push(CssToken {
            kind,
            range: SourceRange::new(start, end),
        });
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}
