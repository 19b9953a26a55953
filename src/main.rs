//! xfeatures CLI - Command-line interface for the path feature store

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use xfeatures::config;
use xfeatures::storage::XFeatureStore;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "xfeatures")]
#[command(version)]
#[command(about = "Path-keyed feature store with inherited read/write permissions")]
#[command(long_about = r#"
xfeatures attaches multi-valued key/value data to filesystem-like paths and
uses it to resolve permissions that are inherited down the path hierarchy.

Example usage:
  xfeatures set acc/photos/ 0 alice bob
  xfeatures grant acc/photos/ --read '*' --write alice
  xfeatures check acc/photos/2024/beach.jpg bob
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit machine-readable JSON instead of human output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Create features for paths (existing ones are kept)
    Create {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Show the features and values of paths
    Get {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Destroy features and all their values
    Destroy {
        paths: Vec<String>,

        /// Destroy every feature whose path starts with this prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Do not ask for confirmation
        #[arg(long)]
        force: bool,
    },

    /// List features
    List {
        /// Only list paths starting with this prefix
        #[arg(short, long)]
        prefix: Option<String>,
    },

    /// Show the features a path inherits from, most specific first
    Inherit {
        path: String,
    },

    /// Add values under a key of a path's feature
    Set {
        path: String,
        key: i64,
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Remove values under a key of a path's feature
    Unset {
        path: String,
        key: i64,
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Show the values of a path's feature
    Values {
        path: String,
        /// Only show this key
        key: Option<i64>,
    },

    /// Remove every value under a key of a path's feature
    Clear {
        path: String,
        key: i64,
    },

    /// Replace the read/write grants on a path
    Grant {
        path: String,

        /// Members given read access (`*` for everyone)
        #[arg(long, num_args = 1..)]
        read: Vec<String>,

        /// Members given write access (`*` for everyone)
        #[arg(long, num_args = 1..)]
        write: Vec<String>,
    },

    /// Remove the grants on a path
    Revoke {
        path: String,
    },

    /// Show the grants on a path and where they come from
    Access {
        path: String,
    },

    /// Check whether a member may access a path
    Check {
        path: String,
        member: String,

        /// Check write access instead of read access
        #[arg(long)]
        write: bool,
    },

    /// List paths under a prefix that carry grants
    Shared {
        #[arg(default_value = "")]
        prefix: String,
    },

    /// Import features from a JSON file
    Import {
        file: PathBuf,
    },

    /// Export all features as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show statistics about the store
    Info,

    /// Print version information
    Version,
}

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

/// JSON wrapper around the result of a successful command
pub fn envelope(command: &str, data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "status": "ok",
        "command": command,
        "data": data,
    })
}

/// Print a successful JSON envelope (no-op in human mode)
pub fn emit_success(output_mode: OutputMode, command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    if output_mode.is_human() {
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(&envelope(command, data))?);
    Ok(())
}

fn emit_error(output_mode: OutputMode, err: &anyhow::Error) {
    if output_mode.is_human() {
        xfeatures::ui::error(&format!("{:#}", err));
    } else {
        let envelope = serde_json::json!({
            "status": "error",
            "message": format!("{:#}", err),
        });
        println!("{}", envelope);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Human };
    if let Err(err) = run(cli, output_mode) {
        emit_error(output_mode, &err);
        std::process::exit(1);
    }
}

fn run(cli: Cli, output_mode: OutputMode) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);

    // Commands that do not need the store
    match &cli.command {
        Commands::Init { force } => {
            return commands::run_init(output_mode, &config_path, cli.database.as_deref(), *force);
        }
        Commands::Version => return commands::run_version(output_mode),
        _ => {}
    }

    let loaded = config::load_config(Some(&config_path))?;
    let database = config::resolve_database(cli.database.as_deref(), loaded.as_ref());
    config::ensure_db_dir(&database)?;
    tracing::debug!("Using database {}", database.display());
    let store = XFeatureStore::open(&database)?;

    match cli.command {
        Commands::Create { paths } => commands::run_create(&store, output_mode, &paths),
        Commands::Get { paths } => commands::run_get(&store, output_mode, &paths),
        Commands::Destroy { paths, prefix, force } => {
            commands::run_destroy(&store, output_mode, &paths, prefix.as_deref(), force)
        }
        Commands::List { prefix } => commands::run_list(&store, output_mode, prefix.as_deref()),
        Commands::Inherit { path } => commands::run_inherit(&store, output_mode, &path),
        Commands::Set { path, key, values } => commands::run_set(&store, output_mode, &path, key, &values),
        Commands::Unset { path, key, values } => commands::run_unset(&store, output_mode, &path, key, &values),
        Commands::Values { path, key } => commands::run_values(&store, output_mode, &path, key),
        Commands::Clear { path, key } => commands::run_clear(&store, output_mode, &path, key),
        Commands::Grant { path, read, write } => commands::run_grant(&store, output_mode, &path, read, write),
        Commands::Revoke { path } => commands::run_revoke(&store, output_mode, &path),
        Commands::Access { path } => commands::run_access(&store, output_mode, &path),
        Commands::Check { path, member, write } => commands::run_check(&store, output_mode, &path, &member, write),
        Commands::Shared { prefix } => commands::run_shared(&store, output_mode, &prefix),
        Commands::Import { file } => commands::run_import(&store, output_mode, &file),
        Commands::Export { output } => commands::run_export(&store, output_mode, output.as_deref()),
        Commands::Info => commands::run_info(&store, output_mode, &database),
        Commands::Init { .. } | Commands::Version => Ok(()),
    }
}
