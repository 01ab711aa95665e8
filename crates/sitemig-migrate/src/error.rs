use sitemig_parser::ParseError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by the filesystem layer.
///
/// Only [`MigrateError::MissingEntryFile`] is recovered from (the folder is
/// skipped); every other variant aborts the run.
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("no index.html in {}", folder.display())]
    MissingEntryFile { folder: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed markup in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize package manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

impl MigrateError {
    /// Adapter for `map_err` that attaches `path` to an I/O error.
    pub fn io(path: &Path) -> impl FnOnce(io::Error) -> MigrateError + '_ {
        move |source| MigrateError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether the run may continue past this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MigrateError::MissingEntryFile { .. })
    }
}

pub type Result<T> = std::result::Result<T, MigrateError>;
