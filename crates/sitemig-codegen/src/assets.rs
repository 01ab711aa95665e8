//! Inline asset extraction.
//!
//! Moves `<style>` bodies and inline `<script>` bodies out of a page so the
//! page references external `index.css` / `index.js` files instead.

use crate::html::{serialize, Flavor};
use regex::Regex;
use sitemig_parser::ast::{Attribute, Element, Node};
use sitemig_parser::{ParseError, Parser};
use std::sync::LazyLock;

static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"));

static COMMENT_OPEN_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*<!--\s*").expect("open pattern is valid"));

static COMMENT_CLOSE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*-->\s*").expect("close pattern is valid"));

/// A page after extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPage {
    /// Rewritten page markup.
    pub html: String,
    /// Collected stylesheet, if the page had any non-empty `<style>`.
    pub css: Option<String>,
    /// Collected script, if the page had any inline `<script>`.
    pub js: Option<String>,
}

#[derive(Default)]
struct Collected {
    styles: Vec<String>,
    scripts: Vec<String>,
}

/// Extract inline styles and scripts from `markup`.
///
/// `base_name` names the external files (`index` → `index.css`, `index.js`).
/// External scripts (`src=`) and JSON-LD blocks stay in place. The link and
/// script references are appended to `<head>` and `<body>` when those
/// elements exist.
pub fn extract_assets(markup: &str, base_name: &str) -> Result<ExtractedPage, ParseError> {
    let mut doc = Parser::parse(markup)?;

    let mut collected = Collected::default();
    extract_from(&mut doc.nodes, &mut collected);

    let css = Some(collected.styles.join("\n\n")).filter(|css| !css.is_empty());
    let js = (!collected.scripts.is_empty()).then(|| collected.scripts.join("\n\n"));

    if css.is_some() {
        if let Some(head) = doc.find_mut("head") {
            let link = Element::new(
                "link",
                vec![
                    Attribute::quoted("rel", "stylesheet"),
                    Attribute::quoted("href", &format!("{base_name}.css")),
                ],
            );
            append_indented(head, link);
        }
    }

    if js.is_some() {
        if let Some(body) = doc.find_mut("body") {
            let script = Element::new(
                "script",
                vec![Attribute::quoted("src", &format!("{base_name}.js"))],
            );
            append_indented(body, script);
        }
    }

    Ok(ExtractedPage {
        html: serialize(&doc.nodes, Flavor::Html),
        css,
        js,
    })
}

fn append_indented(parent: &mut Element, child: Element) {
    parent.children.push(Node::Text("  ".to_string()));
    parent.children.push(Node::Element(child));
    parent.children.push(Node::Text("\n".to_string()));
}

fn extract_from(nodes: &mut Vec<Node>, collected: &mut Collected) {
    nodes.retain(|node| {
        let Node::Element(el) = node else {
            return true;
        };
        if el.is("style") {
            let css = text_content(el).trim().to_string();
            if !css.is_empty() {
                collected.styles.push(css);
            }
            return false;
        }
        if is_inline_script(el) {
            collected.scripts.push(clean_script(&text_content(el)));
            return false;
        }
        true
    });

    for node in nodes.iter_mut() {
        if let Node::Element(el) = node {
            extract_from(&mut el.children, collected);
        }
    }
}

fn is_inline_script(el: &Element) -> bool {
    el.is("script")
        && !el.has_attribute("src")
        && !el
            .attribute("type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("application/ld+json"))
}

fn text_content(el: &Element) -> String {
    el.children
        .iter()
        .filter_map(|n| match n {
            Node::Text(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// Strip HTML comment markers that legacy pages wrap around script bodies.
pub fn clean_script(source: &str) -> String {
    let without_comments = HTML_COMMENT.replace_all(source, "");
    let without_open = COMMENT_OPEN_LINE.replace_all(&without_comments, "");
    let without_close = COMMENT_CLOSE_LINE.replace_all(&without_open, "");
    without_close.trim().to_string()
}
