use clap::{Parser, Subcommand};
use sitemig_migrate::stylesheets::{
    camelcase_dir, camelcase_file, camelcase_output_path, clean_css_file,
};
use sitemig_migrate::{extract, run_migration, Config, MigrateError};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sitemig")]
#[command(about = "sitemig: migrate a static HTML site to Next.js page components")]
#[command(version)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert every page folder into a page component and write the project scaffold
    Migrate {
        /// Config file (defaults to ./sitemig.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Static site root (overrides the config file)
        #[arg(long)]
        source: Option<PathBuf>,

        /// Generated project root (overrides the config file)
        #[arg(long)]
        dest: Option<PathBuf>,
    },

    /// Drop invalid declarations from a stylesheet
    CleanCss {
        #[arg(default_value = "styles/test.css")]
        input: PathBuf,

        #[arg(default_value = "styles/test-cleaned.css")]
        output: PathBuf,
    },

    /// Rewrite hyphenated class selectors to camelCase.
    ///
    /// Without arguments, converts every stylesheet in styles/ into
    /// camelcase-styles/. With one argument, writes <name>-camelcase.css
    /// next to the input.
    Camelcase {
        input: Option<PathBuf>,
        output: Option<PathBuf>,
    },

    /// Move inline <style> and <script> blocks of every index.html into index.css / index.js
    ExtractAssets {
        #[arg(default_value = "hood-static")]
        root: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<(), MigrateError> {
    match command {
        Command::Migrate {
            config,
            source,
            dest,
        } => cmd_migrate(config, source, dest),
        Command::CleanCss { input, output } => {
            clean_css_file(&input, &output)?;
            info!("CSS cleaning completed");
            Ok(())
        }
        Command::Camelcase { input, output } => cmd_camelcase(input, output),
        Command::ExtractAssets { root } => {
            let pages = extract::extract_tree(&root)?;
            info!("Extracted assets from {} page(s)", pages.len());
            Ok(())
        }
    }
}

fn cmd_migrate(
    config_path: Option<PathBuf>,
    source: Option<PathBuf>,
    dest: Option<PathBuf>,
) -> Result<(), MigrateError> {
    let mut config = Config::discover(config_path.as_deref())?;
    if let Some(source) = source {
        config.migrate.source = source;
    }
    if let Some(dest) = dest {
        config.migrate.destination = dest;
    }

    run_migration(&config)?;
    Ok(())
}

fn cmd_camelcase(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<(), MigrateError> {
    match (input, output) {
        (None, _) => {
            let written = camelcase_dir(Path::new("styles"), Path::new("camelcase-styles"))?;
            info!("Converted {} file(s) into camelcase-styles/", written.len());
        }
        (Some(input), None) => {
            let output = camelcase_output_path(&input);
            camelcase_file(&input, &output)?;
        }
        (Some(input), Some(output)) => camelcase_file(&input, &output)?,
    }
    info!("camelCase conversion completed");
    Ok(())
}
