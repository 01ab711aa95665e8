//! Run configuration.
//!
//! Every value has a default, so an empty (or absent) `sitemig.toml`
//! reproduces the stock migration:
//!
//! ```toml
//! [migrate]
//! source = "hood-static"
//! destination = "hood-next"
//!
//! [migrate.attribute_renames]
//! class = "className"
//! for = "htmlFor"
//!
//! [scaffold]
//! name = "hood-next"
//!
//! [[scaffold.dependencies]]
//! name = "next"
//! version = "^13.4.0"
//! ```

use crate::error::{MigrateError, Result};
use serde::{Deserialize, Serialize};
use sitemig_codegen::JsxOptions;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "sitemig.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub migrate: MigrateConfig,
    pub scaffold: ScaffoldConfig,
}

/// Where pages are read from and how they are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrateConfig {
    /// Root of the static site.
    pub source: PathBuf,
    /// Root of the generated project.
    pub destination: PathBuf,
    /// Directory under `destination` that mirrors `source`.
    pub pages_dir: String,
    /// Extension of generated component files.
    pub component_extension: String,
    /// Name of the copied stylesheet module.
    pub style_module: String,
    /// Name of the copied page script.
    pub script_file: String,
    /// HTML attribute → JSX prop renames. Replaces the default set.
    pub attribute_renames: BTreeMap<String, String>,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("hood-static"),
            destination: PathBuf::from("hood-next"),
            pages_dir: "pages".to_string(),
            component_extension: "jsx".to_string(),
            style_module: "index.module.css".to_string(),
            script_file: "index.js".to_string(),
            attribute_renames: BTreeMap::from([("class".to_string(), "className".to_string())]),
        }
    }
}

impl MigrateConfig {
    /// Directory the page tree is mirrored into.
    pub fn pages_root(&self) -> PathBuf {
        self.destination.join(&self.pages_dir)
    }

    pub fn jsx_options(&self) -> JsxOptions {
        JsxOptions {
            attribute_renames: self
                .attribute_renames
                .iter()
                .map(|(from, to)| (from.clone(), to.clone()))
                .collect(),
        }
    }
}

/// Contents of `package.json` and `next.config.js`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    pub name: String,
    pub version: String,
    pub private: bool,
    pub react_strict_mode: bool,
    pub scripts: Vec<Script>,
    pub dependencies: Vec<Dependency>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub name: String,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub version: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        let script = |name: &str, command: &str| Script {
            name: name.to_string(),
            command: command.to_string(),
        };
        let dependency = |name: &str, version: &str| Dependency {
            name: name.to_string(),
            version: version.to_string(),
        };
        Self {
            name: "hood-next".to_string(),
            version: "1.0.0".to_string(),
            private: true,
            react_strict_mode: true,
            scripts: vec![
                script("dev", "next dev"),
                script("build", "next build"),
                script("start", "next start"),
            ],
            dependencies: vec![
                dependency("react", "^18.2.0"),
                dependency("react-dom", "^18.2.0"),
                dependency("next", "^13.4.0"),
            ],
        }
    }
}

impl Config {
    /// Parse a TOML config file.
    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).map_err(MigrateError::io(path))?;
        Self::from_toml(&text).map_err(|source| MigrateError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> std::result::Result<Config, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load `explicit` if given, else [`DEFAULT_CONFIG_FILE`] if it exists,
    /// else the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Config> {
        if let Some(path) = explicit {
            debug!("Loading config from {}", path.display());
            return Self::load(path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            debug!("Loading config from {}", fallback.display());
            return Self::load(fallback);
        }
        Ok(Config::default())
    }
}
