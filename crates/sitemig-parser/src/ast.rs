//! Syntax trees for HTML pages and CSS stylesheets.
//!
//! The HTML tree keeps enough of the source form (attribute quoting,
//! explicit end tags, self-closing slashes) to be serialized back without
//! gratuitous changes. The CSS tree records the byte range of every
//! selector so rewrites can be spliced into the untouched source.

use sitemig_lexer::{Quote, RawAttribute};

// ---------------------------------------------------------------------------
// HTML
// ---------------------------------------------------------------------------

/// A parsed HTML document or fragment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub nodes: Vec<Node>,
}

/// A node in the HTML tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),

    /// Raw character data (entities are not decoded).
    Text(String),

    /// `<!-- ... -->` content.
    Comment(String),

    /// `<!DOCTYPE ...>` content.
    Doctype(String),
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    /// Written as `<tag ... />` in the source.
    pub self_closing: bool,
    /// Closed by an explicit `</tag>` in the source.
    pub has_end_tag: bool,
}

/// An attribute on an element.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
    pub quote: Quote,
}

impl From<RawAttribute> for Attribute {
    fn from(raw: RawAttribute) -> Self {
        Self {
            name: raw.name,
            value: raw.value,
            quote: raw.quote,
        }
    }
}

impl Element {
    /// Create an element with the given tag and attributes and no children.
    pub fn new(tag: &str, attributes: Vec<Attribute>) -> Self {
        Self {
            tag: tag.to_string(),
            attributes,
            children: Vec::new(),
            self_closing: false,
            has_end_tag: !sitemig_lexer::is_void_element(tag),
        }
    }

    /// Case-insensitive tag comparison.
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn is_void(&self) -> bool {
        sitemig_lexer::is_void_element(&self.tag)
    }

    /// Value of the first attribute with the given (case-insensitive) name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes
            .iter()
            .any(|a| a.name.eq_ignore_ascii_case(name))
    }
}

impl Attribute {
    /// A double-quoted `name="value"` attribute.
    pub fn quoted(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: Some(value.to_string()),
            quote: Quote::Double,
        }
    }
}

impl Document {
    /// Depth-first search for the first element with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        find_in(&self.nodes, tag)
    }

    /// Mutable variant of [`Document::find`].
    pub fn find_mut(&mut self, tag: &str) -> Option<&mut Element> {
        find_in_mut(&mut self.nodes, tag)
    }
}

fn find_in<'a>(nodes: &'a [Node], tag: &str) -> Option<&'a Element> {
    nodes.iter().find_map(|node| match node {
        Node::Element(el) if el.is(tag) => Some(el),
        Node::Element(el) => find_in(&el.children, tag),
        _ => None,
    })
}

fn find_in_mut<'a>(nodes: &'a mut [Node], tag: &str) -> Option<&'a mut Element> {
    for node in nodes.iter_mut() {
        if let Node::Element(el) = node {
            if el.is(tag) {
                return Some(el);
            }
            if let Some(found) = find_in_mut(&mut el.children, tag) {
                return Some(found);
            }
        }
    }
    None
}

// ---------------------------------------------------------------------------
// CSS
// ---------------------------------------------------------------------------

/// Byte range into the stylesheet source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRange {
    pub start: usize,
    pub end: usize,
}

impl SourceRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A parsed stylesheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stylesheet {
    pub nodes: Vec<CssNode>,
}

/// A node in the CSS tree.
#[derive(Debug, Clone, PartialEq)]
pub enum CssNode {
    /// `selector { ... }`
    Rule(Rule),

    /// `@name params;` or `@name params { ... }`
    AtRule(AtRule),

    /// `property: value` (with optional `!important`).
    Declaration(Declaration),

    /// `/* ... */` content.
    Comment(String),
}

/// A qualified rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selector: String,
    pub selector_range: SourceRange,
    pub children: Vec<CssNode>,
}

/// An at-rule. `block` is `None` for statement at-rules such as `@import`.
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    pub name: String,
    pub params: String,
    pub block: Option<Vec<CssNode>>,
}

/// A declaration. `value` excludes the `!important` flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}
