//! sitemig Code Generator
//!
//! Pure string-to-string transformations used by the migration tool. No
//! filesystem access happens here.
//!
//! ```text
//! page body  → jsx::nodes_to_jsx()    → JSX markup
//! JSX markup → PageComponent::render → page component module
//! page       → assets::extract_assets → page + index.css + index.js
//! stylesheet → css::clean_css / css::camelcase_css
//! ```

pub mod assets;
pub mod component;
pub mod css;
pub mod html;
pub mod jsx;

pub use assets::{extract_assets, ExtractedPage};
pub use component::{component_name, NameRegistry, PageComponent};
pub use css::{camelcase_css, clean_css};
pub use html::{serialize, Flavor};
pub use jsx::{html_to_jsx, nodes_to_jsx, JsxOptions};
pub use sitemig_parser::ParseError;
