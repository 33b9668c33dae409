//! Validate an ID number without touching the database.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use said_id::{Citizenship, Gender, IdNumber};
use serde::Serialize;

use super::CommandContext;
use crate::error::CliError;
use crate::output::{print_single, print_success, OutputFormat};

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Candidate 13-digit ID number.
    id: String,

    /// Year used for century resolution (defaults to the current year).
    #[arg(long)]
    year: Option<i32>,
}

/// Fields reported for a valid ID number.
#[derive(Debug, Serialize)]
struct ValidationReport {
    id_number: IdNumber,
    birth_date: NaiveDate,
    gender: Gender,
    citizenship: Citizenship,
    checksum_digit: u8,
}

pub fn run(ctx: CommandContext, args: ValidateArgs) -> Result<()> {
    let year = args.year.unwrap_or_else(said_id::current_year);

    let id = IdNumber::parse(&args.id, year).map_err(CliError::Invalid)?;
    let parsed = id.decode(year).map_err(CliError::Invalid)?;

    let report = ValidationReport {
        id_number: id,
        birth_date: parsed.birth_date,
        gender: parsed.gender,
        citizenship: parsed.citizenship,
        checksum_digit: parsed.checksum_digit,
    };

    match ctx.format {
        OutputFormat::Table => {
            print_success(&format!(
                "{} is valid: born {}, {}, {}",
                report.id_number, report.birth_date, report.gender, report.citizenship
            ));
        }
        OutputFormat::Json => print_single(&report),
    }

    Ok(())
}
