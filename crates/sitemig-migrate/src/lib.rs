//! sitemig Migrate
//!
//! Filesystem side of the tool. Walks a static site, converts every page
//! folder into a page component folder, and writes the project scaffold.
//! Also hosts the file-level stylesheet and asset extraction commands.
//!
//! ```text
//! hood-static/about-us/index.html  →  hood-next/pages/about-us/index.jsx
//! hood-static/about-us/index.css   →  hood-next/pages/about-us/index.module.css
//! hood-static/about-us/index.js    →  hood-next/pages/about-us/index.js
//!                                     hood-next/next.config.js
//!                                     hood-next/package.json
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod page;
pub mod scaffold;
pub mod stylesheets;
pub mod walker;

pub use config::{Config, MigrateConfig, ScaffoldConfig};
pub use error::{MigrateError, Result};
pub use page::{migrate_page, PageOutcome};
pub use walker::{migrate_tree, MigrationReport};

use std::fs;
use tracing::info;

/// Run a full migration: walk the page tree, then write the scaffold.
///
/// The scaffold is written only if the walk completes.
pub fn run_migration(config: &Config) -> Result<MigrationReport> {
    let dest = &config.migrate.destination;
    fs::create_dir_all(dest).map_err(MigrateError::io(dest))?;

    let report = migrate_tree(
        &config.migrate.source,
        &config.migrate.pages_root(),
        &config.migrate,
    )?;
    scaffold::write_scaffold(dest, &config.scaffold)?;

    info!(
        "Migration complete: {} page(s) converted, {} folder(s) skipped",
        report.migrated.len(),
        report.skipped.len()
    );
    info!(
        "Run `cd {} && npm install && npm run dev` to start the app",
        dest.display()
    );

    Ok(report)
}
