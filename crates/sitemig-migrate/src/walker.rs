//! Directory tree traversal.
//!
//! Follows symbolic links. A link back to one of its own ancestors, or to a
//! directory already visited through another path, is skipped with a
//! warning, so every reachable directory is visited exactly once. Entries
//! are visited in file-name order.

use crate::config::MigrateConfig;
use crate::error::{MigrateError, Result};
use crate::page::{migrate_page, PageOutcome};
use sitemig_codegen::NameRegistry;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Call `visit` once per distinct directory under `root` (including `root`),
/// with its path and its path relative to `root`.
pub fn visit_dirs<F>(root: &Path, mut visit: F) -> Result<()>
where
    F: FnMut(&Path, &Path) -> Result<()>,
{
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut entries = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = entries.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.loop_ancestor().is_some() => {
                warn!(
                    "Skipping symlink cycle at {}",
                    err.path().unwrap_or(root).display()
                );
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let canonical = fs::canonicalize(entry.path()).map_err(MigrateError::io(entry.path()))?;
        if !visited.insert(canonical) {
            warn!("Skipping {}: already visited", entry.path().display());
            entries.skip_current_dir();
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(Path::new(""));
        debug!("Visiting {}", entry.path().display());
        visit(entry.path(), relative)?;
    }

    Ok(())
}

/// Folders migrated and skipped during one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationReport {
    pub migrated: Vec<PageOutcome>,
    pub skipped: Vec<PathBuf>,
}

/// Migrate every page folder under `source_root` into the mirrored path
/// under `dest_root`.
///
/// Folders without `index.html` are skipped but still descended into. Any
/// other error aborts the walk; files already written are left in place.
pub fn migrate_tree(
    source_root: &Path,
    dest_root: &Path,
    config: &MigrateConfig,
) -> Result<MigrationReport> {
    let mut report = MigrationReport::default();
    let mut names = NameRegistry::new();

    visit_dirs(source_root, |dir, relative| {
        let dest = dest_root.join(relative);
        match migrate_page(dir, &dest, &mut names, config) {
            Ok(outcome) => report.migrated.push(outcome),
            Err(MigrateError::MissingEntryFile { folder }) => {
                warn!("Skipping {}: no index.html found", folder.display());
                report.skipped.push(folder);
            }
            Err(err) => return Err(err),
        }
        Ok(())
    })?;

    Ok(report)
}
