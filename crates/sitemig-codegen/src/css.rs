//! Stylesheet transformations.
//!
//! - [`clean_css`] drops declarations whose property is unknown or whose
//!   value looks broken, then drops whatever that leaves empty.
//! - [`camelcase_css`] rewrites hyphenated class selectors to camelCase so
//!   they can be used as CSS module keys (`styles.heroBanner`).

use regex::{Captures, Regex};
use sitemig_parser::ast::{CssNode, Declaration, SourceRange};
use sitemig_parser::CssParser;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Properties accepted by [`clean_css`], besides vendor-prefixed ones.
pub const KNOWN_PROPERTIES: &[&str] = &[
    // Layout
    "display", "position", "top", "right", "bottom", "left", "z-index", "float", "clear",
    "overflow", "overflow-x", "overflow-y", "clip", "visibility", "box-sizing",
    // Dimensions
    "width", "height", "min-width", "max-width", "min-height", "max-height",
    // Margin & padding
    "margin", "margin-top", "margin-right", "margin-bottom", "margin-left", "padding",
    "padding-top", "padding-right", "padding-bottom", "padding-left",
    // Border
    "border", "border-top", "border-right", "border-bottom", "border-left", "border-width",
    "border-style", "border-color", "border-radius", "border-top-width", "border-right-width",
    "border-bottom-width", "border-left-width", "border-top-style", "border-right-style",
    "border-bottom-style", "border-left-style", "border-top-color", "border-right-color",
    "border-bottom-color", "border-left-color", "border-top-left-radius",
    "border-top-right-radius", "border-bottom-right-radius", "border-bottom-left-radius",
    // Background
    "background", "background-color", "background-image", "background-repeat",
    "background-position", "background-size", "background-attachment", "background-clip",
    "background-origin",
    // Text & font
    "color", "font", "font-family", "font-size", "font-weight", "font-style", "font-variant",
    "line-height", "letter-spacing", "word-spacing", "text-align", "text-decoration",
    "text-transform", "text-indent", "text-shadow", "white-space", "word-wrap", "word-break",
    // Flexbox
    "flex", "flex-direction", "flex-wrap", "flex-flow", "flex-grow", "flex-shrink",
    "flex-basis", "justify-content", "align-items", "align-self", "align-content", "order",
    // Grid
    "grid", "grid-template", "grid-template-columns", "grid-template-rows",
    "grid-template-areas", "grid-gap", "grid-column-gap", "grid-row-gap", "grid-column",
    "grid-row", "grid-area", "justify-self", "place-items",
    // Animation & transform
    "transform", "transform-origin", "transition", "transition-property",
    "transition-duration", "transition-timing-function", "transition-delay", "animation",
    "animation-name", "animation-duration", "animation-timing-function", "animation-delay",
    "animation-iteration-count", "animation-direction", "animation-fill-mode",
    "animation-play-state",
    // Other
    "opacity", "cursor", "outline", "outline-width", "outline-style", "outline-color",
    "box-shadow", "resize", "user-select", "pointer-events", "content", "list-style",
    "list-style-type", "list-style-position", "list-style-image", "table-layout",
    "border-collapse", "border-spacing", "caption-side", "empty-cells", "vertical-align",
];

const VENDOR_PREFIXES: &[&str] = &["-webkit-", "-moz-", "-ms-", "-o-"];

static VALUE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^[a-zA-Z][a-zA-Z0-9-]*$",
        r"^#[0-9a-fA-F]{3,8}$",
        r"^rgb\([^)]+\)$",
        r"^rgba\([^)]+\)$",
        r"^hsl\([^)]+\)$",
        r"^hsla\([^)]+\)$",
        r"^[0-9]+(\.[0-9]+)?(px|em|rem|%|vh|vw|pt|pc|in|cm|mm|ex|ch|vmin|vmax|fr)$",
        r"^[0-9]+(\.[0-9]+)?$",
        r"^calc\([^)]+\)$",
        r"^url\([^)]+\)$",
        r"^var\([^)]+\)$",
        r"^[a-zA-Z0-9\s,.-]+$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("value pattern is valid"))
    .collect()
});

static AT_RULE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z-]+$").expect("at-rule pattern is valid"));

static CLASS_SELECTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([A-Za-z0-9_-]+)").expect("class pattern is valid"));

static HYPHEN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-([A-Za-z0-9_])").expect("hyphen pattern is valid"));

// =========================================================================
// Cleaning
// =========================================================================

/// Whether a property name is on the allow-list or vendor-prefixed.
pub fn is_valid_property(property: &str) -> bool {
    let lower = property.to_ascii_lowercase();
    KNOWN_PROPERTIES.contains(&lower.as_str())
        || VENDOR_PREFIXES.iter().any(|p| property.starts_with(p))
}

/// Whether a declaration value looks like real CSS.
pub fn is_valid_value(value: &str) -> bool {
    let cleaned: String = value.chars().filter(|c| *c != '"' && *c != '\'').collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned.contains("undefined") || cleaned.contains("null") {
        return false;
    }

    VALUE_PATTERNS.iter().any(|re| re.is_match(cleaned))
}

fn is_valid_declaration(decl: &Declaration) -> bool {
    is_valid_property(&decl.property) && is_valid_value(&decl.value)
}

/// Remove invalid declarations and the rules and at-rules they leave empty.
///
/// The result is serialized canonically: two-space indentation, one
/// declaration per line, a blank line between top-level nodes. Comments are
/// not carried over.
pub fn clean_css(source: &str) -> String {
    let sheet = CssParser::parse(source);
    let nodes = clean_block(sheet.nodes, false);
    serialize_stylesheet(&nodes)
}

/// Clean one block. Bare declarations survive only inside a block that
/// can hold them (rules and at-rules), never at stylesheet top level.
fn clean_block(nodes: Vec<CssNode>, allow_declarations: bool) -> Vec<CssNode> {
    let mut cleaned = Vec::new();

    for node in nodes {
        match node {
            CssNode::Declaration(decl) => {
                if allow_declarations && is_valid_declaration(&decl) {
                    cleaned.push(CssNode::Declaration(decl));
                }
            }
            CssNode::Rule(mut rule) => {
                rule.children = clean_block(rule.children, true);
                if !rule.children.is_empty() {
                    cleaned.push(CssNode::Rule(rule));
                }
            }
            CssNode::AtRule(mut at) => {
                if !AT_RULE_NAME.is_match(&at.name) {
                    continue;
                }
                match at.block.take() {
                    None => cleaned.push(CssNode::AtRule(at)),
                    Some(block) => {
                        let block = clean_block(block, true);
                        if !block.is_empty() {
                            at.block = Some(block);
                            cleaned.push(CssNode::AtRule(at));
                        }
                    }
                }
            }
            CssNode::Comment(_) => {}
        }
    }

    discard_duplicates(cleaned)
}

/// Drop nodes that serialize identically to a later sibling; the last wins.
fn discard_duplicates(nodes: Vec<CssNode>) -> Vec<CssNode> {
    let mut seen = HashSet::new();
    let mut kept: Vec<CssNode> = nodes
        .into_iter()
        .rev()
        .filter(|node| {
            let mut key = String::new();
            write_node(node, 0, &mut key);
            seen.insert(key)
        })
        .collect();
    kept.reverse();
    kept
}

// =========================================================================
// Serialization
// =========================================================================

/// Serialize nodes canonically.
pub fn serialize_stylesheet(nodes: &[CssNode]) -> String {
    let mut out = String::new();
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_node(node, 0, &mut out);
    }
    out
}

fn write_node(node: &CssNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        CssNode::Declaration(decl) => {
            out.push_str(&indent);
            out.push_str(&format!("{}: {}", decl.property, decl.value));
            if decl.important {
                out.push_str(" !important");
            }
            out.push_str(";\n");
        }
        CssNode::Rule(rule) => {
            out.push_str(&indent);
            out.push_str(&rule.selector);
            out.push_str(" {\n");
            write_children(&rule.children, depth + 1, out);
            out.push_str(&indent);
            out.push_str("}\n");
        }
        CssNode::AtRule(at) => {
            out.push_str(&indent);
            out.push('@');
            out.push_str(&at.name);
            if !at.params.is_empty() {
                out.push(' ');
                out.push_str(&at.params);
            }
            match &at.block {
                None => out.push_str(";\n"),
                Some(children) => {
                    out.push_str(" {\n");
                    write_children(children, depth + 1, out);
                    out.push_str(&indent);
                    out.push_str("}\n");
                }
            }
        }
        CssNode::Comment(text) => {
            out.push_str(&indent);
            out.push_str(&format!("/*{text}*/\n"));
        }
    }
}

fn write_children(children: &[CssNode], depth: usize, out: &mut String) {
    for child in children {
        write_node(child, depth, out);
    }
}

// =========================================================================
// camelCase class names
// =========================================================================

/// `hero-banner` → `heroBanner`, `col-2` → `col2`.
pub fn kebab_to_camel(name: &str) -> String {
    HYPHEN_WORD
        .replace_all(name, |caps: &Captures| caps[1].to_uppercase())
        .into_owned()
}

/// Rewrite hyphenated class names in one selector.
pub fn camelcase_selector(selector: &str) -> String {
    CLASS_SELECTOR
        .replace_all(selector, |caps: &Captures| {
            if caps[1].contains('-') {
                format!(".{}", kebab_to_camel(&caps[1]))
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// Rewrite hyphenated class selectors in every rule to camelCase. Text
/// outside selectors (declarations, comments, at-rule preludes, formatting)
/// is copied through unchanged.
pub fn camelcase_css(source: &str) -> String {
    let sheet = CssParser::parse(source);
    let mut ranges = Vec::new();
    collect_selector_ranges(&sheet.nodes, &mut ranges);
    ranges.sort_by_key(|r| r.start);

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for range in ranges {
        out.push_str(&source[cursor..range.start]);
        out.push_str(&camelcase_selector(&source[range.start..range.end]));
        cursor = range.end;
    }
    out.push_str(&source[cursor..]);
    out
}

fn collect_selector_ranges(nodes: &[CssNode], ranges: &mut Vec<SourceRange>) {
    for node in nodes {
        match node {
            CssNode::Rule(rule) => {
                ranges.push(rule.selector_range);
                collect_selector_ranges(&rule.children, ranges);
            }
            CssNode::AtRule(at) => {
                if let Some(block) = &at.block {
                    collect_selector_ranges(block, ranges);
                }
            }
            _ => {}
        }
    }
}
