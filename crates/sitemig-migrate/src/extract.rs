//! In-place extraction of inline styles and scripts across a static tree.

use crate::error::{MigrateError, Result};
use crate::page::ENTRY_FILE;
use crate::walker::visit_dirs;
use sitemig_codegen::extract_assets;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Rewrite one page, writing `<stem>.css` / `<stem>.js` beside it when the
/// page had inline styles or scripts.
pub fn extract_page(html_path: &Path) -> Result<()> {
    let html = fs::read_to_string(html_path).map_err(MigrateError::io(html_path))?;
    let stem = html_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "index".to_string());
    let dir = html_path.parent().unwrap_or(Path::new("."));

    let page = extract_assets(&html, &stem).map_err(|source| MigrateError::Parse {
        path: html_path.to_path_buf(),
        source,
    })?;

    if let Some(css) = &page.css {
        let css_path = dir.join(format!("{stem}.css"));
        fs::write(&css_path, css).map_err(MigrateError::io(&css_path))?;
    }
    if let Some(js) = &page.js {
        let js_path = dir.join(format!("{stem}.js"));
        fs::write(&js_path, js).map_err(MigrateError::io(&js_path))?;
    }
    fs::write(html_path, &page.html).map_err(MigrateError::io(html_path))?;

    info!("Processed: {}", html_path.display());
    Ok(())
}

/// Run [`extract_page`] on every `index.html` under `root`.
pub fn extract_tree(root: &Path) -> Result<Vec<PathBuf>> {
    let mut processed = Vec::new();
    visit_dirs(root, |dir, _| {
        let page = dir.join(ENTRY_FILE);
        if page.is_file() {
            extract_page(&page)?;
            processed.push(page);
        }
        Ok(())
    })?;
    Ok(processed)
}
