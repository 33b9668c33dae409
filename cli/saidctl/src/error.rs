//! Error handling and display for the CLI.

use colored::Colorize;
use said_id::ValidationError;
use said_store::StoreError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid ID number: {0}")]
    Invalid(#[from] ValidationError),

    #[error("ID number {0} is already registered")]
    Duplicate(String),

    #[error("no record found for {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(StoreError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(id) => CliError::Duplicate(id),
            StoreError::InvalidId(e) => CliError::Invalid(e),
            other => CliError::Store(other),
        }
    }
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    // Check for specific error types and provide hints
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        match cli_err {
            CliError::Invalid(e) if e.is_format_error() => {
                eprintln!(
                    "\n{}",
                    "Hint: An ID number is exactly 13 digits with no separators.".yellow()
                );
            }
            CliError::Invalid(ValidationError::ChecksumMismatch { .. }) => {
                eprintln!(
                    "\n{}",
                    "Hint: The check digit does not match; the number was likely mistyped."
                        .yellow()
                );
            }
            CliError::Duplicate(id) => {
                eprintln!(
                    "\n{}",
                    format!("Hint: Run `said check {id}` to confirm the stored record.").yellow()
                );
            }
            _ => {}
        }
    }
}
