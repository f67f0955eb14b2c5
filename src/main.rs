//! Grape CLI - Command-line interface for the code base catalogue

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use grape::commands::{self, Listing};
use grape::config::{self, GrapeConfig};
use grape::model::EntityKind;
use grape::seed::SeedFile;
use grape::server::{self, AppState};
use grape::storage::SqliteStore;
use grape::ui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "grape")]
#[command(version)]
#[command(about = "Catalogue of a code base's versions, modules, classes, methods and their test coverage")]
#[command(long_about = r#"
Grape keeps a relational catalogue of a code base:
  • versions and the modules they ship
  • classes, methods and method arguments
  • human and fuzzer test coverage per method

Example usage:
  grape init
  grape seed --file fixtures.toml
  grape list class --version-code 1.0.0
  grape find version --field version_name --value winecountry
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file (overrides the config)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Write grape.toml and ignore the local database directory
    Init {
        /// Project directory
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Show row counts per table
    Stats,

    /// List the rows of a table
    List {
        /// Entity kind (version, module, class, method, args, type)
        kind: EntityKind,

        /// Only rows belonging to this version code
        #[arg(long)]
        version_code: Option<String>,

        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<usize>,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Find rows by exact field match
    Find {
        /// Entity kind (version, module, class, method, args, type)
        kind: EntityKind,

        /// Column to match
        #[arg(long)]
        field: String,

        /// Value to match
        #[arg(long)]
        value: String,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Load rows from a TOML seed file
    Seed {
        /// Seed file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Delete all rows of one table, or of every table
    Clear {
        /// Entity kind; every table when omitted
        kind: Option<EntityKind>,
    },

    /// Serve the catalogue as read-only JSON over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(cli) {
        ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    let database = config.database_path(cli.database.clone(), &cwd);

    match cli.command {
        Commands::Init { path, force } => {
            let report = commands::init(&path, cli.config.as_deref(), force)?;
            ui::success(&format!("Wrote {}", report.config_path.display()));
            if report.gitignore_updated {
                ui::info("Added to .gitignore", ".grape/");
            }
        }

        Commands::Stats => {
            let store = open_store(&database, &config)?;
            let stats = store.stats()?;
            ui::header(&format!("Grape Statistics ({})", database.display()));
            println!("{}", ui::stats_table(&stats));
        }

        Commands::List { kind, version_code, limit, format } => {
            let store = open_store(&database, &config)?;
            let listing = commands::list(&store, kind, version_code.as_deref(), limit)?;
            show(&listing, format)?;
        }

        Commands::Find { kind, field, value, format } => {
            let store = open_store(&database, &config)?;
            let listing = commands::find(&store, kind, &field, &value)?;
            show(&listing, format)?;
        }

        Commands::Seed { file } => {
            let mut store = open_store(&database, &config)?;
            let seed = SeedFile::from_path(&file)?;
            let counts = seed.apply(&mut store)?;
            ui::success(&format!("Seeded {} from {}", database.display(), file.display()));
            println!("{}", ui::stats_table(&counts));
        }

        Commands::Clear { kind } => {
            let store = open_store(&database, &config)?;
            let removed = commands::clear(&store, kind)?;
            ui::success(&format!("Deleted {} rows", removed));
        }

        Commands::Serve { port } => {
            // Schema must exist before the first request
            open_store(&database, &config)?;
            let state = AppState {
                database_path: database,
                busy_timeout_ms: config.busy_timeout_ms(),
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::start_server(config.port(port), state))?;
        }
    }

    Ok(())
}

fn open_store(database: &Path, config: &GrapeConfig) -> anyhow::Result<SqliteStore> {
    config::ensure_db_dir(database)?;
    Ok(SqliteStore::open_with_timeout(database, config.busy_timeout_ms())?)
}

fn show(listing: &Listing, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listing.rows)?),
        OutputFormat::Table if listing.is_empty() => ui::warn(&format!("No {} rows found.", listing.kind)),
        OutputFormat::Table => println!("{}", ui::listing_table(listing)),
    }
    Ok(())
}
