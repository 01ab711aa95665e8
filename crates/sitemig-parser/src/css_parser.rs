//! Tolerant CSS parser.
//!
//! Parses the token stream from `css_lexer` into a `Stylesheet`. Like a
//! browser, it never rejects input: stray `}` are skipped, a missing `;`
//! before `}` is fine, blocks left open at end of input are closed, and
//! declarations without a `:` are dropped.

use crate::ast::{AtRule, CssNode, Declaration, Rule, SourceRange, Stylesheet};
use crate::css_lexer::{CssLexer, CssToken, CssTokenKind};

/// CSS parser over a single stylesheet source.
pub struct CssParser<'a> {
    source: &'a str,
    tokens: Vec<CssToken>,
    pos: usize,
}

impl<'a> CssParser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: CssLexer::tokenize(source),
            pos: 0,
        }
    }

    /// Parse a complete stylesheet.
    pub fn parse(source: &str) -> Stylesheet {
        let mut parser = CssParser::new(source);
        let nodes = parser.parse_block(false);
        Stylesheet { nodes }
    }

    /// Parse nodes until the closing `}` of the current block (consumed) or EOF.
    fn parse_block(&mut self, nested: bool) -> Vec<CssNode> {
        let mut nodes = Vec::new();

        loop {
            match &self.peek().kind {
                CssTokenKind::Eof => break,
                CssTokenKind::RBrace => {
                    self.advance();
                    if nested {
                        break;
                    }
                    // Stray `}` at top level
                }
                CssTokenKind::Semicolon => self.advance(),
                CssTokenKind::Comment(text) => {
                    nodes.push(CssNode::Comment(text.clone()));
                    self.advance();
                }
                CssTokenKind::AtKeyword(name) => {
                    let name = name.clone();
                    self.advance();
                    nodes.push(self.parse_at_rule(name));
                }
                CssTokenKind::LBrace => {
                    // Block without a prelude; parse and discard its contents.
                    self.advance();
                    self.parse_block(true);
                }
                CssTokenKind::Chunk if self.peek().text(self.source).trim().is_empty() => {
                    self.advance();
                }
                CssTokenKind::Chunk => {
                    if let Some(node) = self.parse_rule_or_declaration() {
                        nodes.push(node);
                    }
                }
            }
        }

        nodes
    }

    /// `@name params;` or `@name params { ... }`
    fn parse_at_rule(&mut self, name: String) -> CssNode {
        let range = self.collect_prelude();
        let params = self.slice(range).trim().to_string();

        let block = if self.peek().kind == CssTokenKind::LBrace {
            self.advance();
            Some(self.parse_block(true))
        } else {
            if self.peek().kind == CssTokenKind::Semicolon {
                self.advance();
            }
            None
        };

        CssNode::AtRule(AtRule {
            name,
            params,
            block,
        })
    }

    /// A prelude followed by `{` is a rule, anything else a declaration.
    fn parse_rule_or_declaration(&mut self) -> Option<CssNode> {
        let range = self.collect_prelude();

        if self.peek().kind == CssTokenKind::LBrace {
            self.advance();
            let selector_range = trim_range(self.source, range);
            let children = self.parse_block(true);
            return Some(CssNode::Rule(Rule {
                selector: self.slice(selector_range).to_string(),
                selector_range,
                children,
            }));
        }

        if self.peek().kind == CssTokenKind::Semicolon {
            self.advance();
        }
        parse_declaration(self.slice(range)).map(CssNode::Declaration)
    }

    /// Consume chunks and inline comments up to `{`, `;`, `}` or EOF.
    fn collect_prelude(&mut self) -> SourceRange {
        let start = self.peek().range.start;
        let mut end = start;
        while matches!(
            self.peek().kind,
            CssTokenKind::Chunk | CssTokenKind::Comment(_)
        ) {
            end = self.peek().range.end;
            self.advance();
        }
        SourceRange::new(start, end)
    }

    // =========================================================================
    // Token navigation helpers
    // =========================================================================

    fn peek(&self) -> &CssToken {
        // The token stream always ends with Eof and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn slice(&self, range: SourceRange) -> &'a str {
        &self.source[range.start..range.end]
    }
}

/// Split `prop: value !important` into a declaration.
fn parse_declaration(text: &str) -> Option<Declaration> {
    let (property, value) = text.split_once(':')?;
    let property = property.trim();
    if property.is_empty() {
        return None;
    }

    let mut value = value.trim();
    let mut important = false;
    if let Some(idx) = value.rfind('!') {
        if value[idx + 1..].trim().eq_ignore_ascii_case("important") {
            important = true;
            value = value[..idx].trim_end();
        }
    }

    Some(Declaration {
        property: property.to_string(),
        value: value.to_string(),
        important,
    })
}

fn trim_range(source: &str, range: SourceRange) -> SourceRange {
    let raw = &source[range.start..range.end];
    let leading = raw.len() - raw.trim_start().len();
    let trailing = raw.len() - raw.trim_end().len();
    if leading == raw.len() {
        return SourceRange::new(range.start, range.start);
    }
    SourceRange::new(range.start + leading, range.end - trailing)
}
