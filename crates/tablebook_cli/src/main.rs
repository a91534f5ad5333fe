//! Demonstration CLI for the reservation data store.
//!
//! ```bash
//! tablebook seed
//! tablebook list reservations
//! tablebook update
//! tablebook delete --leaves-first
//! ```
//!
//! Every command opens one session against the configured database and
//! aborts on the first error.

mod commands;

use clap::{Parser, Subcommand};
use log::{error, info};
use std::io::Write;
use std::path::PathBuf;
use tablebook_core::{init_logging_from_config, EntityKind, Session, StoreConfig};

#[derive(Parser)]
#[command(
    name = "tablebook",
    about = "Scripted CRUD against the tablebook reservation store",
    version
)]
struct Cli {
    /// SQLite database file (overrides TABLEBOOK_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error (overrides TABLEBOOK_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files (overrides TABLEBOOK_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert two users, a store, a table, a favorite and a reservation
    Seed,
    /// Print rows as JSON
    List {
        /// Entity to list (user, store, table, favorite, reservation); all when omitted
        #[arg(value_parser = parse_entity)]
        entity: Option<EntityKind>,
    },
    /// Apply the scripted update to the first row of every entity
    Update {
        /// User id the first favorite is reassigned to
        #[arg(long, default_value_t = 2)]
        favorite_customer: i64,
    },
    /// Delete the first row of every entity
    Delete {
        /// Delete reservations first and users last instead of users first
        #[arg(long)]
        leaves_first: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        error!("event=cli_run module=cli status=error error={err}");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = resolve_config(&cli)?;
    init_logging_from_config(&config).map_err(|err| err.to_string())?;

    let mut session = Session::open(&config)
        .map_err(|err| format!("failed to open {}: {err}", config.db_path.display()))?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command {
        Commands::Seed => commands::seed::run(&mut session, &mut out),
        Commands::List { entity } => commands::list::run(&session, entity, &mut out),
        Commands::Update { favorite_customer } => {
            commands::update::run(&session, favorite_customer, &mut out)
        }
        Commands::Delete { leaves_first } => {
            commands::delete::run(&session, leaves_first, &mut out)
        }
    };
    out.flush().map_err(|err| err.to_string())?;
    result?;

    session.close().map_err(|err| err.to_string())?;
    info!("event=cli_run module=cli status=ok");
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<StoreConfig, String> {
    let mut config = StoreConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(db) = &cli.db {
        config = config.with_db_path(db);
    }
    if let Some(level) = &cli.log_level {
        config = config.with_log_level(level.as_str());
    }
    if let Some(dir) = &cli.log_dir {
        config = config.with_log_dir(dir).map_err(|err| err.to_string())?;
    }
    Ok(config)
}

fn parse_entity(value: &str) -> Result<EntityKind, String> {
    EntityKind::parse(value).ok_or_else(|| {
        format!("unknown entity `{value}`; expected user|store|table|favorite|reservation")
    })
}
