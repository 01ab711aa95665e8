//! HTML → JSX rewriting.
//!
//! All rewrites run on the parsed tree, so markup that merely looks like a
//! tag or attribute (inside a `<script>` body, an attribute value or a
//! comment) is never touched:
//!
//! - void element normalization (`<img src="x">` → `<img src="x" />`)
//! - comment stripping
//! - attribute renaming (`class` → `className` by default)

use crate::html::{serialize, Flavor};
use sitemig_parser::ast::Node;
use sitemig_parser::{ParseError, Parser};

/// Attribute renames applied when converting markup to JSX.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsxOptions {
    /// `(html_name, jsx_name)` pairs; HTML names match case-insensitively.
    pub attribute_renames: Vec<(String, String)>,
}

impl Default for JsxOptions {
    fn default() -> Self {
        Self {
            attribute_renames: vec![("class".into(), "className".into())],
        }
    }
}

// =========================================================================
// Tree-level passes
// =========================================================================

/// Mark every void element as self-closing.
pub fn normalize_void_elements(nodes: &mut [Node]) {
    for node in nodes {
        if let Node::Element(el) = node {
            if el.is_void() {
                el.self_closing = true;
            }
            normalize_void_elements(&mut el.children);
        }
    }
}

/// Remove every comment node, at any depth.
pub fn strip_comments(nodes: &mut Vec<Node>) {
    nodes.retain(|n| !matches!(n, Node::Comment(_)));
    for node in nodes.iter_mut() {
        if let Node::Element(el) = node {
            strip_comments(&mut el.children);
        }
    }
}

/// Rename attribute keys according to `renames`, at any depth.
pub fn rename_attributes(nodes: &mut [Node], renames: &[(String, String)]) {
    for node in nodes {
        if let Node::Element(el) = node {
            for attr in &mut el.attributes {
                if let Some((_, to)) = renames
                    .iter()
                    .find(|(from, _)| attr.name.eq_ignore_ascii_case(from))
                {
                    attr.name = to.clone();
                }
            }
            rename_attributes(&mut el.children, renames);
        }
    }
}

/// Run the full JSX pipeline over an already parsed node list.
pub fn nodes_to_jsx(mut nodes: Vec<Node>, options: &JsxOptions) -> String {
    normalize_void_elements(&mut nodes);
    strip_comments(&mut nodes);
    rename_attributes(&mut nodes, &options.attribute_renames);
    serialize(&nodes, Flavor::Jsx)
}

// =========================================================================
// String-level entry points
// =========================================================================

/// Rewrite void element tags into explicit self-closing form, leaving
/// everything else as written.
pub fn normalize_void_tags(markup: &str) -> Result<String, ParseError> {
    let mut doc = Parser::parse(markup)?;
    normalize_void_elements(&mut doc.nodes);
    Ok(serialize(&doc.nodes, Flavor::Html))
}

/// Strip comments, then rename attributes, leaving everything else as written.
pub fn rewrite_comments_and_attributes(
    markup: &str,
    options: &JsxOptions,
) -> Result<String, ParseError> {
    let mut doc = Parser::parse(markup)?;
    strip_comments(&mut doc.nodes);
    rename_attributes(&mut doc.nodes, &options.attribute_renames);
    Ok(serialize(&doc.nodes, Flavor::Html))
}

/// Convert an HTML fragment into JSX markup.
pub fn html_to_jsx(markup: &str, options: &JsxOptions) -> Result<String, ParseError> {
    let doc = Parser::parse(markup)?;
    Ok(nodes_to_jsx(doc.nodes, options))
}
