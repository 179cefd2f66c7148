//! # Onboard CLI Module
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `init` - Initialize a new database
//! - `enroll` - Add an employee (or, with `--admin`, an administrator)
//! - `list` - List records
//! - `progress` - Show one employee's progress
//! - `complete` - Mark a step as completed
//! - `remove` - Delete a record
//! - `stats` - Show population statistics

mod commands;

use crate::config::AppConfig;
use clap::{Parser, Subcommand, ValueEnum};
use onboard_core::{OnboardError, StepId};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Onboard - employee onboarding tracker
///
/// Tracks each employee through a fixed catalog of onboarding steps and
/// reports population statistics to administrators.
#[derive(Parser, Debug)]
#[command(name = "onboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML config file (default: ./onboard.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the record database
    #[arg(short = 'D', long, global = true, default_value = "onboard.db")]
    pub database: PathBuf,

    /// Storage backend
    #[arg(short = 'B', long, global = true, value_enum, default_value_t = Backend::Redb)]
    pub backend: Backend,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where records are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// ACID database file (redb)
    Redb,
    /// Volatile, lost on exit
    Memory,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Initialize a new empty database
    Init {
        /// Force initialization even if database exists
        #[arg(short, long)]
        force: bool,
    },

    /// Add a record
    Enroll {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// Create an administrator instead of an employee
        #[arg(long)]
        admin: bool,
    },

    /// List all records
    List,

    /// Show an employee's progress
    Progress {
        /// Employee id
        id: String,
    },

    /// Mark a step as completed
    Complete {
        /// Employee id
        id: String,

        /// Step number
        step: StepId,
    },

    /// Delete a record
    Remove {
        /// Employee id
        id: String,
    },

    /// Show population statistics
    Stats,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), OnboardError> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    let store = StoreArgs {
        path: cli.database,
        backend: cli.backend,
        onboarding: config.onboarding,
    };
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_server(&store, &config).await
        }
        Some(Commands::Init { force }) => cmd_init(&store, force),
        Some(Commands::Enroll {
            name,
            email,
            password,
            admin,
        }) => cmd_enroll(&store, json_mode, name, email, password, admin),
        Some(Commands::List) => cmd_list(&store, json_mode),
        Some(Commands::Progress { id }) => cmd_progress(&store, json_mode, &id),
        Some(Commands::Complete { id, step }) => cmd_complete(&store, json_mode, &id, step),
        Some(Commands::Remove { id }) => cmd_remove(&store, &id),
        Some(Commands::Stats) | None => cmd_stats(&store, json_mode),
    }
}
