//! Page component synthesis.
//!
//! Turns a folder name into a component identifier and renders the page
//! component module that wraps the converted body markup.

use std::collections::HashMap;

/// Derive a component identifier from a folder name.
///
/// Every run of non-alphanumeric characters (`-`, `_`, space, ...) separates
/// segments; each segment gets an uppercase first character and the
/// segments are concatenated. A leading digit gets a `Page` prefix and an
/// empty result becomes `Page`, so the output is always a valid identifier.
///
/// ```
/// use sitemig_codegen::component::component_name;
///
/// assert_eq!(component_name("about-us"), "AboutUs");
/// assert_eq!(component_name("my_cool site"), "MyCoolSite");
/// ```
pub fn component_name(folder: &str) -> String {
    let name: String = folder
        .split(|c: char| !c.is_alphanumeric())
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect();

    match name.chars().next() {
        None => "Page".to_string(),
        Some(c) if c.is_numeric() => format!("Page{name}"),
        Some(_) => name,
    }
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Hands out unique component names within one migration run.
///
/// The first claim of a name gets it unchanged; later claims get the
/// smallest free numeric suffix (`About`, `About2`, `About3`).
#[derive(Debug, Default)]
pub struct NameRegistry {
    claimed: HashMap<String, usize>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `base`, returning the name actually assigned.
    pub fn claim(&mut self, base: &str) -> String {
        let Some(&count) = self.claimed.get(base) else {
            self.claimed.insert(base.to_string(), 1);
            return base.to_string();
        };

        let mut n = count + 1;
        let mut candidate = format!("{base}{n}");
        while self.claimed.contains_key(&candidate) {
            n += 1;
            candidate = format!("{base}{n}");
        }
        self.claimed.insert(base.to_string(), n);
        self.claimed.insert(candidate.clone(), 1);
        candidate
    }
}

/// Everything needed to render one page component module.
#[derive(Debug, Clone, PartialEq)]
pub struct PageComponent {
    pub name: String,
    /// Module path of the CSS module, e.g. `./index.module.css`.
    pub style_import: Option<String>,
    /// Module path of the page script, e.g. `./index.js`.
    pub script_import: Option<String>,
    /// JSX markup placed inside the wrapper element.
    pub body: String,
}

impl PageComponent {
    /// Render the component module source.
    pub fn render(&self) -> String {
        let mut out = String::new();

        // Imports
        out.push_str("import Head from 'next/head';\n");
        if let Some(style) = &self.style_import {
            out.push_str(&format!("import styles from '{style}';\n"));
        }
        if let Some(script) = &self.script_import {
            out.push_str(&format!("import pageScript from '{script}';\n"));
            out.push_str("import { useEffect } from 'react';\n");
        }
        out.push('\n');

        out.push_str(&format!("export default function {}() {{\n", self.name));

        // Mount-time page script
        if self.script_import.is_some() {
            out.push_str("  useEffect(() => {\n");
            out.push_str("    if (pageScript && typeof pageScript === 'function') {\n");
            out.push_str("      pageScript();\n");
            out.push_str("    }\n");
            out.push_str("  }, []);\n\n");
        }

        out.push_str("  return (\n");
        out.push_str("    <>\n");
        out.push_str("      <Head>\n");
        out.push_str(&format!("        <title>{}</title>\n", self.name));
        out.push_str("      </Head>\n");
        if self.style_import.is_some() {
            out.push_str("      <div className={styles.wrapper}>\n");
        } else {
            out.push_str("      <div>\n");
        }
        if !self.body.is_empty() {
            out.push_str("        ");
            out.push_str(&self.body);
            out.push('\n');
        }
        out.push_str("      </div>\n");
        out.push_str("    </>\n");
        out.push_str("  );\n");
        out.push_str("}\n");

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // =========================================================================
    // Names
    // =========================================================================

    #[test]
    fn test_name_kebab() {
        assert_eq!(component_name("contact-page"), "ContactPage");
    }

    #[test]
    fn test_name_single_word() {
        assert_eq!(component_name("faq"), "Faq");
    }

    #[test]
    fn test_name_mixed_separators() {
        assert_eq!(component_name("my_cool site"), "MyCoolSite");
    }

    #[test]
    fn test_name_keeps_inner_case() {
        assert_eq!(component_name("myPage-v2"), "MyPageV2");
    }

    #[test]
    fn test_name_repeated_and_edge_separators() {
        assert_eq!(component_name("--about__us-"), "AboutUs");
    }

    #[test]
    fn test_name_sanitizes_punctuation() {
        assert_eq!(component_name("about.us(old)"), "AboutUsOld");
    }

    #[test]
    fn test_name_leading_digit() {
        assert_eq!(component_name("404"), "Page404");
    }

    #[test]
    fn test_name_empty() {
        assert_eq!(component_name("---"), "Page");
    }

    #[test]
    fn test_name_idempotent() {
        let once = component_name("contact-page");
        assert_eq!(component_name(&once), once);
    }

    #[test]
    fn test_registry_suffixes_collisions() {
        let mut names = NameRegistry::new();
        assert_eq!(names.claim("About"), "About");
        assert_eq!(names.claim("About"), "About2");
        assert_eq!(names.claim("About"), "About3");
        assert_eq!(names.claim("Faq"), "Faq");
    }

    #[test]
    fn test_registry_skips_taken_suffix() {
        let mut names = NameRegistry::new();
        assert_eq!(names.claim("About2"), "About2");
        assert_eq!(names.claim("About"), "About");
        assert_eq!(names.claim("About"), "About3");
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    #[test]
    fn test_render_style_only() {
        let page = PageComponent {
            name: "Home".into(),
            style_import: Some("./index.module.css".into()),
            script_import: None,
            body: "<div className=\"hero-banner\">Hi</div>".into(),
        };
        assert_eq!(
            page.render(),
            "import Head from 'next/head';\n\
             import styles from './index.module.css';\n\
             \n\
             export default function Home() {\n\
             \x20 return (\n\
             \x20   <>\n\
             \x20     <Head>\n\
             \x20       <title>Home</title>\n\
             \x20     </Head>\n\
             \x20     <div className={styles.wrapper}>\n\
             \x20       <div className=\"hero-banner\">Hi</div>\n\
             \x20     </div>\n\
             \x20   </>\n\
             \x20 );\n\
             }\n"
        );
    }

    #[test]
    fn test_render_with_script() {
        let page = PageComponent {
            name: "Faq".into(),
            style_import: None,
            script_import: Some("./index.js".into()),
            body: String::new(),
        };
        let src = page.render();
        assert!(src.contains("import pageScript from './index.js';"));
        assert!(src.contains("import { useEffect } from 'react';"));
        assert!(src.contains("pageScript();"));
        assert!(src.contains("      <div>\n      </div>"));
        assert!(!src.contains("styles"));
    }

    #[test]
    fn test_render_without_script_has_no_hook() {
        let page = PageComponent {
            name: "Faq".into(),
            style_import: None,
            script_import: None,
            body: "<p>x</p>".into(),
        };
        let src = page.render();
        assert!(!src.contains("useEffect"));
        assert!(!src.contains("pageScript"));
    }
}
