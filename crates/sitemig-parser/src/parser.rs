//! Document parser for HTML.
//!
//! Parses the token stream from `sitemig-lexer` into a `Document` tree.
//! Recovers the way browsers do for the cases static pages actually hit:
//! stray end tags are dropped, an end tag for an ancestor closes everything
//! inside it, void elements never take children, and the common optional
//! end tags (`li`, `p`, `dt`/`dd`, `option`, `tr`, `td`/`th`) are implied.
//!
//! Uses recursive descent with an explicit stack of open tag names.

use crate::ast::{Attribute, Document, Element, Node};
use crate::ParseError;
use sitemig_lexer::{Token, TokenKind};

/// Elements whose start tag closes an open `<p>`.
const CLOSES_PARAGRAPH: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "div", "dl", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "main", "nav", "ol", "p", "pre", "section", "table", "ul",
];

/// HTML document parser.
///
/// Converts a flat token stream into a hierarchical `Document`.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    open: Vec<String>,
}

impl Parser {
    /// Create a new parser for the given tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            open: Vec::new(),
        }
    }

    /// Parse source markup (a full page or a fragment) into a document tree.
    pub fn parse(source: &str) -> Result<Document, ParseError> {
        let tokens = sitemig_lexer::Scanner::tokenize(source).map_err(|e| ParseError {
            message: e.message,
            line: e.line,
            column: e.column,
        })?;

        let mut parser = Parser::new(tokens);
        Ok(parser.parse_document())
    }

    /// Parse a full document.
    fn parse_document(&mut self) -> Document {
        // With nothing open, `parse_nodes` only stops at EOF.
        Document {
            nodes: self.parse_nodes(),
        }
    }

    // =========================================================================
    // Node parsing
    // =========================================================================

    /// Parse sibling nodes until EOF, or an end tag / start tag that closes
    /// the innermost open element. The terminating token is not consumed.
    fn parse_nodes(&mut self) -> Vec<Node> {
        let mut nodes = Vec::new();

        loop {
            match &self.peek().kind {
                TokenKind::Eof => break,
                TokenKind::Text(text) => {
                    nodes.push(Node::Text(text.clone()));
                    self.advance();
                }
                TokenKind::Comment(text) => {
                    nodes.push(Node::Comment(text.clone()));
                    self.advance();
                }
                TokenKind::Doctype(text) => {
                    nodes.push(Node::Doctype(text.clone()));
                    self.advance();
                }
                TokenKind::EndTag(name) => {
                    if self.is_open(name) {
                        break;
                    }
                    // Stray end tag, e.g. `</br>` or `</span>` with no `<span>`
                    self.advance();
                }
                TokenKind::StartTag { name, .. } => {
                    let closes_current = self
                        .open
                        .last()
                        .is_some_and(|current| closes_implicitly(current, name));
                    if closes_current {
                        break;
                    }
                    nodes.push(Node::Element(self.parse_element()));
                }
            }
        }

        nodes
    }

    /// Parse an element starting at the current start tag.
    fn parse_element(&mut self) -> Element {
        let (tag, attributes, self_closing) = match &self.peek().kind {
            TokenKind::StartTag {
                name,
                attributes,
                self_closing,
            } => (
                name.clone(),
                attributes.iter().cloned().map(Attribute::from).collect(),
                *self_closing,
            ),
            _ => unreachable!("parse_element called on a non start tag"),
        };
        self.advance();

        let mut el = Element {
            tag,
            attributes,
            children: Vec::new(),
            self_closing,
            has_end_tag: false,
        };

        if self_closing || el.is_void() {
            return el;
        }

        self.open.push(el.tag.clone());
        el.children = self.parse_nodes();
        self.open.pop();

        if let TokenKind::EndTag(name) = &self.peek().kind {
            if name.eq_ignore_ascii_case(&el.tag) {
                el.has_end_tag = true;
                self.advance();
            }
        }

        el
    }

    // =========================================================================
    // Token navigation helpers
    // =========================================================================

    fn peek(&self) -> &Token {
        static EOF: std::sync::LazyLock<Token> = std::sync::LazyLock::new(|| {
            Token::new(TokenKind::Eof, sitemig_lexer::Span::new(0, 0, 0, 0))
        });
        self.tokens.get(self.pos).unwrap_or(&EOF)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn is_open(&self, name: &str) -> bool {
        self.open.iter().any(|open| open.eq_ignore_ascii_case(name))
    }
}

/// Whether a start tag for `incoming` implies the end of `current`.
fn closes_implicitly(current: &str, incoming: &str) -> bool {
    let current = current.to_ascii_lowercase();
    let incoming = incoming.to_ascii_lowercase();
    match current.as_str() {
        "li" => incoming == "li",
        "dt" | "dd" => matches!(incoming.as_str(), "dt" | "dd"),
        "option" => incoming == "option",
        "tr" => incoming == "tr",
        "td" | "th" => matches!(incoming.as_str(), "td" | "th" | "tr"),
        "p" => CLOSES_PARAGRAPH.contains(&incoming.as_str()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Document {
        Parser::parse(source).unwrap()
    }

    fn first_element(doc: &Document) -> &Element {
        doc.nodes
            .iter()
            .find_map(|n| match n {
                Node::Element(el) => Some(el),
                _ => None,
            })
            .expect("no element parsed")
    }

    fn child_tags(el: &Element) -> Vec<&str> {
        el.children
            .iter()
            .filter_map(|n| match n {
                Node::Element(c) => Some(c.tag.as_str()),
                _ => None,
            })
            .collect()
    }

    // =========================================================================
    // Basic structure
    // =========================================================================

    #[test]
    fn test_empty_document() {
        assert_eq!(parse(""), Document { nodes: vec![] });
    }

    #[test]
    fn test_single_element() {
        let doc = parse("<div>x</div>");
        let el = first_element(&doc);
        assert_eq!(el.tag, "div");
        assert!(el.has_end_tag);
        assert_eq!(el.children, vec![Node::Text("x".into())]);
    }

    #[test]
    fn test_nested_elements() {
        let doc = parse("<ul><li>a</li><li>b</li></ul>");
        assert_eq!(child_tags(first_element(&doc)), vec!["li", "li"]);
    }

    #[test]
    fn test_attributes_preserved() {
        let doc = parse("<a href='/about' data-x>go</a>");
        let el = first_element(&doc);
        assert_eq!(el.attribute("href"), Some("/about"));
        assert!(el.has_attribute("data-x"));
    }

    #[test]
    fn test_find_body() {
        let doc = parse("<html><head><title>t</title></head><body><p>hi</p></body></html>");
        let body = doc.find("body").unwrap();
        assert_eq!(child_tags(body), vec!["p"]);
    }

    #[test]
    fn test_doctype_and_comment_nodes() {
        let doc = parse("<!DOCTYPE html><!-- c --><p>x</p>");
        assert_eq!(doc.nodes[0], Node::Doctype("DOCTYPE html".into()));
        assert_eq!(doc.nodes[1], Node::Comment(" c ".into()));
    }

    // =========================================================================
    // Void and self-closing elements
    // =========================================================================

    #[test]
    fn test_void_element_takes_no_children() {
        let doc = parse("<div><img src=\"x.png\"><span>a</span></div>");
        assert_eq!(child_tags(first_element(&doc)), vec!["img", "span"]);
    }

    #[test]
    fn test_self_closing_non_void() {
        let doc = parse("<div/><p>x</p>");
        let el = first_element(&doc);
        assert!(el.self_closing);
        assert!(el.children.is_empty());
        assert_eq!(doc.nodes.len(), 2);
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    #[test]
    fn test_stray_end_tag_ignored() {
        let doc = parse("<div>a</span>b</div>");
        assert_eq!(
            first_element(&doc).children,
            vec![Node::Text("a".into()), Node::Text("b".into())]
        );
    }

    #[test]
    fn test_ancestor_end_tag_closes_inner() {
        let doc = parse("<div><span>a</div><p>b</p>");
        let div = first_element(&doc);
        assert!(div.has_end_tag);
        match &div.children[0] {
            Node::Element(span) => assert!(!span.has_end_tag),
            other => panic!("expected span, got {other:?}"),
        }
        assert_eq!(doc.nodes.len(), 2);
    }

    #[test]
    fn test_implied_li_end() {
        let doc = parse("<ul><li>a<li>b</ul>");
        assert_eq!(child_tags(first_element(&doc)), vec!["li", "li"]);
    }

    #[test]
    fn test_paragraph_closed_by_div() {
        let doc = parse("<p>a<div>b</div>");
        assert_eq!(doc.nodes.len(), 2);
    }

    #[test]
    fn test_unclosed_at_eof() {
        let doc = parse("<div><span>a");
        let div = first_element(&doc);
        assert!(!div.has_end_tag);
        assert_eq!(child_tags(div), vec!["span"]);
    }

    #[test]
    fn test_lexer_error_becomes_parse_error() {
        let err = Parser::parse("<p>\n<!-- open").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("Unterminated comment"));
    }
}
