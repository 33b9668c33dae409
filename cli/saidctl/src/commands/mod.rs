//! CLI commands.

mod records;
mod validate;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config;
use crate::output::OutputFormat;

/// said CLI - Validate and register South African ID numbers.
#[derive(Debug, Parser)]
#[command(name = "said")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// Path to the record database file.
    #[arg(long, global = true, env = "SAID_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate an ID number without storing it.
    Validate(validate::ValidateArgs),

    /// Validate an ID number and store it.
    Add(records::AddArgs),

    /// Check whether an ID number is registered.
    Check(records::CheckArgs),

    /// Remove a registered ID number.
    Remove(records::RemoveArgs),

    /// List registered ID records.
    List(records::ListArgs),
}

/// Shared context passed to command handlers.
pub struct CommandContext {
    pub format: OutputFormat,
    pub database_url: String,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let format = match self.format.as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        };

        let ctx = CommandContext {
            format,
            database_url: config::database_url(self.db)?,
        };

        match self.command {
            Commands::Validate(args) => validate::run(ctx, args),
            Commands::Add(args) => records::add(ctx, args).await,
            Commands::Check(args) => records::check(ctx, args).await,
            Commands::Remove(args) => records::remove(ctx, args).await,
            Commands::List(args) => records::list(ctx, args).await,
        }
    }
}
