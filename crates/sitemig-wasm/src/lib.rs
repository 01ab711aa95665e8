//! WASM bindings for sitemig.
//!
//! Exposes the pure transformations to JavaScript via wasm-bindgen for an
//! in-browser preview. Functions that can fail throw a JS error.

use sitemig_codegen::{JsxOptions, PageComponent};
use wasm_bindgen::prelude::*;

/// Convert an HTML fragment to JSX with the default attribute renames.
#[wasm_bindgen(js_name = htmlToJsx)]
pub fn html_to_jsx(markup: &str) -> Result<String, JsError> {
    sitemig_codegen::html_to_jsx(markup, &JsxOptions::default())
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Drop invalid declarations from a stylesheet.
#[wasm_bindgen(js_name = cleanCss)]
pub fn clean_css(source: &str) -> String {
    sitemig_codegen::clean_css(source)
}

/// camelCase hyphenated class selectors.
#[wasm_bindgen(js_name = camelcaseCss)]
pub fn camelcase_css(source: &str) -> String {
    sitemig_codegen::camelcase_css(source)
}

/// Component identifier for a folder name.
#[wasm_bindgen(js_name = componentName)]
pub fn component_name(folder: &str) -> String {
    sitemig_codegen::component_name(folder)
}

/// Render the page component for a folder.
///
/// Returns a JS object `{ name: string, source: string }`.
#[wasm_bindgen(js_name = renderComponent)]
pub fn render_component(
    folder: &str,
    markup: &str,
    has_style: bool,
    has_script: bool,
) -> Result<JsValue, JsError> {
    let page = build_component(folder, markup, has_style, has_script)
        .map_err(|e| JsError::new(&e.to_string()))?;

    let js_obj = js_sys::Object::new();
    js_sys::Reflect::set(&js_obj, &"name".into(), &page.name.as_str().into())
        .map_err(|_| JsError::new("Failed to set name property"))?;
    js_sys::Reflect::set(&js_obj, &"source".into(), &page.render().into())
        .map_err(|_| JsError::new("Failed to set source property"))?;

    Ok(js_obj.into())
}

fn build_component(
    folder: &str,
    markup: &str,
    has_style: bool,
    has_script: bool,
) -> Result<PageComponent, sitemig_codegen::ParseError> {
    let body = sitemig_codegen::html_to_jsx(markup, &JsxOptions::default())?;
    Ok(PageComponent {
        name: sitemig_codegen::component_name(folder),
        style_import: has_style.then(|| "./index.module.css".to_string()),
        script_import: has_script.then(|| "./index.js".to_string()),
        body: body.trim().to_string(),
    })
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
