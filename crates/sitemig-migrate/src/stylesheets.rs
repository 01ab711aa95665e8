//! Stylesheet file commands: cleaning and class camelCasing.

use crate::error::{MigrateError, Result};
use sitemig_codegen::{camelcase_css, clean_css};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

fn transform_file(input: &Path, output: &Path, transform: fn(&str) -> String) -> Result<()> {
    let css = fs::read_to_string(input).map_err(MigrateError::io(input))?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(MigrateError::io(parent))?;
    }
    fs::write(output, transform(&css)).map_err(MigrateError::io(output))
}

/// Write a copy of `input` without invalid declarations to `output`.
pub fn clean_css_file(input: &Path, output: &Path) -> Result<()> {
    info!("Processing: {}", input.display());
    transform_file(input, output, clean_css)?;
    info!("Cleaned: {}", output.display());
    Ok(())
}

/// Write a copy of `input` with camelCased class selectors to `output`.
pub fn camelcase_file(input: &Path, output: &Path) -> Result<()> {
    info!("Converting class names in: {}", input.display());
    transform_file(input, output, camelcase_css)?;
    info!("Converted: {}", output.display());
    Ok(())
}

/// `styles/site.css` → `styles/site-camelcase.css`.
pub fn camelcase_output_path(input: &Path) -> PathBuf {
    let name = input.to_string_lossy();
    match name.strip_suffix(".css") {
        Some(stem) => PathBuf::from(format!("{stem}-camelcase.css")),
        None => PathBuf::from(format!("{name}-camelcase.css")),
    }
}

/// camelCase every `*.css` file directly inside `input_dir` into a file of
/// the same name in `output_dir`. Returns the written paths in name order.
pub fn camelcase_dir(input_dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir).map_err(MigrateError::io(output_dir))?;

    let mut inputs = Vec::new();
    for entry in fs::read_dir(input_dir).map_err(MigrateError::io(input_dir))? {
        let path = entry.map_err(MigrateError::io(input_dir))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "css") {
            inputs.push(path);
        }
    }
    inputs.sort();

    let mut written = Vec::with_capacity(inputs.len());
    for input in inputs {
        let Some(file_name) = input.file_name() else {
            continue;
        };
        let output = output_dir.join(file_name);
        camelcase_file(&input, &output)?;
        written.push(output);
    }
    Ok(written)
}
