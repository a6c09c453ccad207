//! # Saaty CLI Module
//!
//! ## Available Commands
//!
//! - `ask` - Interactive questionnaire (default when no command is given)
//! - `solve` - Compute weights from a JSON file
//! - `scale` - Show the judgment scale
//! - `records` - List saved submissions
//! - `init` - Initialize a new database
//! - `config` - Print the effective configuration
//! - `server` - Start the HTTP server

mod commands;
mod questionnaire;

use crate::config::{Config, ConfigError};
use clap::{Parser, Subcommand};
use saaty_core::SaatyError;
use std::path::PathBuf;
use thiserror::Error;

pub use commands::*;
pub use questionnaire::{Questionnaire, QuestionnaireOutcome};

// =============================================================================
// ERRORS
// =============================================================================

/// Errors that end a CLI invocation with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] SaatyError),

    /// Weights were computed and shown, but the row was not stored.
    #[error("Weights computed but not saved: {0}")]
    NotSaved(String),
}

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Saaty - pairwise criteria weighting (Analytic Hierarchy Process)
///
/// Compare criteria two at a time on the 1-3-5-7-9 scale and get their
/// priority weights by the geometric-mean method.
#[derive(Parser, Debug)]
#[command(name = "saaty")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the TOML configuration file (default: ./saaty.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the submissions database (":memory:" for no persistence)
    #[arg(short = 'D', long, global = true)]
    pub database: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer the questionnaire interactively
    Ask {
        /// Label language (en, es)
        #[arg(short, long)]
        locale: Option<String>,

        /// Show the weights without saving a row
        #[arg(long)]
        no_save: bool,
    },

    /// Compute weights from a JSON request file
    Solve {
        /// Path to the request file
        #[arg(short, long)]
        file: PathBuf,

        /// Append the result to the configured sheet
        #[arg(short, long)]
        save: bool,

        /// Label language (en, es)
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// Show the judgment scale
    Scale {
        /// Label language (en, es)
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// List saved submissions
    Records {
        /// Sheet to read (default: configured sheet)
        #[arg(short = 'S', long)]
        sheet: Option<String>,
    },

    /// Initialize a new empty database
    Init {
        /// Replace an existing database
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Config,

    /// Start HTTP server
    Server {
        /// Host to bind to (default: configured host)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (default: configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Load configuration, apply CLI overrides.
pub fn resolve_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(database) = &cli.database {
        config.storage.database.clone_from(database);
    }
    Ok(config)
}

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), CliError> {
    let mut config = resolve_config(&cli)?;
    let json_mode = cli.json_mode;
    tracing::debug!(database = %config.storage.database.display(), sheet = %config.storage.sheet, "Configuration loaded");

    match cli.command {
        Some(Commands::Server { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_server(&config).await
        }
        Some(Commands::Solve { file, save, locale }) => {
            let locale = resolve_locale(&config, locale.as_deref())?;
            cmd_solve(&config, &file, save, locale, json_mode)
        }
        Some(Commands::Scale { locale }) => {
            let locale = resolve_locale(&config, locale.as_deref())?;
            cmd_scale(locale, json_mode)
        }
        Some(Commands::Records { sheet }) => cmd_records(&config, sheet.as_deref(), json_mode),
        Some(Commands::Init { force }) => cmd_init(&config, force),
        Some(Commands::Config) => cmd_config(&config),
        Some(Commands::Ask { locale, no_save }) => {
            let locale = resolve_locale(&config, locale.as_deref())?;
            cmd_ask(&config, locale, !no_save, json_mode)
        }
        None => {
            // No subcommand - run the questionnaire
            cmd_ask(&config, config.report.locale, true, json_mode)
        }
    }
}
