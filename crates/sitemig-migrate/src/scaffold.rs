//! Project scaffolding: the root-level files of the generated project.

use crate::config::ScaffoldConfig;
use crate::error::{MigrateError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::info;

pub const NEXT_CONFIG_FILE: &str = "next.config.js";
pub const MANIFEST_FILE: &str = "package.json";

/// `next.config.js` source.
pub fn next_config(config: &ScaffoldConfig) -> String {
    format!(
        "/** @type {{import('next').NextConfig}} */\n\
         const nextConfig = {{\n\
         \x20 reactStrictMode: {},\n\
         }}\n\
         \n\
         module.exports = nextConfig;\n",
        config.react_strict_mode
    )
}

/// `package.json` source, pretty-printed with keys in declaration order.
pub fn package_manifest(config: &ScaffoldConfig) -> Result<String> {
    let scripts: Map<String, Value> = config
        .scripts
        .iter()
        .map(|s| (s.name.clone(), Value::String(s.command.clone())))
        .collect();
    let dependencies: Map<String, Value> = config
        .dependencies
        .iter()
        .map(|d| (d.name.clone(), Value::String(d.version.clone())))
        .collect();

    let mut manifest = Map::new();
    manifest.insert("name".into(), Value::String(config.name.clone()));
    manifest.insert("version".into(), Value::String(config.version.clone()));
    manifest.insert("private".into(), Value::Bool(config.private));
    manifest.insert("scripts".into(), Value::Object(scripts));
    manifest.insert("dependencies".into(), Value::Object(dependencies));

    let mut text = serde_json::to_string_pretty(&Value::Object(manifest))?;
    text.push('\n');
    Ok(text)
}

/// Write both scaffold files into `dest_root`, creating it if needed.
pub fn write_scaffold(dest_root: &Path, config: &ScaffoldConfig) -> Result<()> {
    fs::create_dir_all(dest_root).map_err(MigrateError::io(dest_root))?;

    let config_path = dest_root.join(NEXT_CONFIG_FILE);
    fs::write(&config_path, next_config(config)).map_err(MigrateError::io(&config_path))?;

    let manifest_path = dest_root.join(MANIFEST_FILE);
    fs::write(&manifest_path, package_manifest(config)?)
        .map_err(MigrateError::io(&manifest_path))?;

    info!("Wrote {} and {}", config_path.display(), manifest_path.display());
    Ok(())
}
