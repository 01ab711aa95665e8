/// A position in source text, tracking line and column for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// How an attribute value was quoted in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Double,
    Single,
    None,
}

impl Quote {
    pub fn as_char(self) -> Option<char> {
        match self {
            Quote::Double => Some('"'),
            Quote::Single => Some('\''),
            Quote::None => None,
        }
    }
}

/// An attribute as written inside a start tag.
///
/// Values are kept raw: entities are not decoded, so serializing the
/// attribute back reproduces the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAttribute {
    pub name: String,
    pub value: Option<String>,
    pub quote: Quote,
}

/// Token classification for HTML source.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `<!DOCTYPE html>`, content between `<!` and `>`.
    Doctype(String),

    /// `<tag attr="x">` or `<tag attr="x" />`.
    StartTag {
        name: String,
        attributes: Vec<RawAttribute>,
        self_closing: bool,
    },

    /// `</tag>`
    EndTag(String),

    /// Character data, including the raw body of `script`/`style`.
    Text(String),

    /// `<!-- ... -->`, content between the markers.
    Comment(String),

    // End of input
    Eof,
}

/// A token produced by the markup scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// HTML5 void elements (self-closing, no children).
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose content is scanned as opaque text.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Check if a tag name is an HTML5 void element.
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Check if a tag name switches the scanner into raw text mode.
pub fn is_raw_text_element(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}
