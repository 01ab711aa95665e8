//! Tree serializer.
//!
//! Writes a parsed node list back out as markup. The HTML flavour keeps the
//! source form (end tags only where the source had them, original attribute
//! quoting, comments and doctypes). The JSX flavour closes every element,
//! self-closes void elements, quotes every attribute value, and turns
//! comments into `{/* ... */}` expressions.

use sitemig_lexer::Quote;
use sitemig_parser::ast::{Attribute, Element, Node};

/// Output dialect for [`serialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Html,
    Jsx,
}

/// Serialize nodes in the given flavour.
pub fn serialize(nodes: &[Node], flavor: Flavor) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, flavor, &mut out);
    }
    out
}

fn write_node(node: &Node, flavor: Flavor, out: &mut String) {
    match node {
        Node::Element(el) => write_element(el, flavor, out),
        Node::Text(text) => out.push_str(text),
        Node::Comment(text) => match flavor {
            Flavor::Html => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            Flavor::Jsx => {
                out.push_str("{/*");
                out.push_str(&text.replace("*/", "* /"));
                out.push_str("*/}");
            }
        },
        Node::Doctype(text) => {
            if flavor == Flavor::Html {
                out.push_str("<!");
                out.push_str(text);
                out.push('>');
            }
        }
    }
}

fn write_element(el: &Element, flavor: Flavor, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for attr in &el.attributes {
        write_attribute(attr, flavor, out);
    }

    let void = el.is_void();
    let self_close = match flavor {
        Flavor::Html => el.self_closing,
        Flavor::Jsx => void || (el.self_closing && el.children.is_empty()),
    };
    if self_close {
        out.push_str(" />");
        return;
    }
    out.push('>');
    if void {
        return;
    }

    for child in &el.children {
        write_node(child, flavor, out);
    }

    if flavor == Flavor::Jsx || el.has_end_tag {
        out.push_str("</");
        out.push_str(&el.tag);
        out.push('>');
    }
}

fn write_attribute(attr: &Attribute, flavor: Flavor, out: &mut String) {
    out.push(' ');
    out.push_str(&attr.name);
    let Some(value) = &attr.value else {
        return;
    };
    out.push('=');
    match (attr.quote, flavor) {
        (Quote::None, Flavor::Html) => out.push_str(value),
        (Quote::None, Flavor::Jsx) => {
            out.push('"');
            out.push_str(value);
            out.push('"');
        }
        (quote, _) => {
            let q = quote.as_char().unwrap_or('"');
            out.push(q);
            out.push_str(value);
            out.push(q);
        }
    }
}
