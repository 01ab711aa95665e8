//! Page folder migration: one static page folder in, one component folder out.

use crate::config::MigrateConfig;
use crate::error::{MigrateError, Result};
use sitemig_codegen::{component_name, nodes_to_jsx, NameRegistry, PageComponent};
use sitemig_parser::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const ENTRY_FILE: &str = "index.html";
pub const STYLE_FILE: &str = "index.css";
pub const SCRIPT_FILE: &str = "index.js";

/// What one migrated folder produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOutcome {
    pub source: PathBuf,
    pub component_path: PathBuf,
    pub component_name: String,
    pub has_style: bool,
    pub has_script: bool,
}

/// Migrate the page in `source` into `dest`.
///
/// Returns [`MigrateError::MissingEntryFile`] without touching `dest` when
/// `source` has no `index.html`. Existing files in `dest` are overwritten.
pub fn migrate_page(
    source: &Path,
    dest: &Path,
    names: &mut NameRegistry,
    config: &MigrateConfig,
) -> Result<PageOutcome> {
    let entry = source.join(ENTRY_FILE);
    if !entry.is_file() {
        return Err(MigrateError::MissingEntryFile {
            folder: source.to_path_buf(),
        });
    }

    let html = fs::read_to_string(&entry).map_err(MigrateError::io(&entry))?;
    let doc = Parser::parse(&html).map_err(|source| MigrateError::Parse {
        path: entry.clone(),
        source,
    })?;
    let body = doc
        .find("body")
        .map(|body| body.children.clone())
        .unwrap_or_default();
    let jsx = nodes_to_jsx(body, &config.jsx_options());

    fs::create_dir_all(dest).map_err(MigrateError::io(dest))?;

    let has_style = copy_if_present(&source.join(STYLE_FILE), &dest.join(&config.style_module))?;
    let has_script = copy_if_present(&source.join(SCRIPT_FILE), &dest.join(&config.script_file))?;

    let folder = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = names.claim(&component_name(&folder));

    let component = PageComponent {
        name: name.clone(),
        style_import: has_style.then(|| format!("./{}", config.style_module)),
        script_import: has_script.then(|| format!("./{}", config.script_file)),
        body: jsx.trim().to_string(),
    };

    let component_path = dest.join(format!("index.{}", config.component_extension));
    fs::write(&component_path, component.render()).map_err(MigrateError::io(&component_path))?;

    info!(
        "Converted {} → {}",
        source.display(),
        component_path.display()
    );

    Ok(PageOutcome {
        source: source.to_path_buf(),
        component_path,
        component_name: name,
        has_style,
        has_script,
    })
}

/// Byte-copy `from` to `to` if `from` is a file.
fn copy_if_present(from: &Path, to: &Path) -> Result<bool> {
    if !from.is_file() {
        return Ok(false);
    }
    fs::copy(from, to).map_err(MigrateError::io(from))?;
    Ok(true)
}
