//! Record store commands.

use anyhow::Result;
use clap::Args;
use said_store::{Database, IdRecord, RecordStore, StoreConfig};
use serde::Serialize;
use tabled::Tabled;

use super::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, print_single, print_success, OutputFormat};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Candidate 13-digit ID number.
    id: String,

    /// Year used for century resolution (defaults to the current year).
    #[arg(long)]
    year: Option<i32>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Registered 13-digit ID number.
    id: String,
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Registered 13-digit ID number.
    id: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Order by birth date, oldest first.
    #[arg(long)]
    by_birth_date: bool,
}

/// Row shape for `said list`.
#[derive(Debug, Serialize, Tabled)]
struct RecordRow {
    #[tabled(rename = "ID Number")]
    id_number: String,

    #[tabled(rename = "Birth Date")]
    birth_date: String,

    #[tabled(rename = "Gender")]
    gender: String,

    #[tabled(rename = "Citizenship")]
    citizenship: String,

    #[tabled(rename = "Added")]
    date_added: String,
}

impl From<&IdRecord> for RecordRow {
    fn from(record: &IdRecord) -> Self {
        Self {
            id_number: record.id_number.clone(),
            birth_date: record.birth_date.to_string(),
            gender: record.gender.to_string(),
            citizenship: record.citizenship.to_string(),
            date_added: record.date_added.date_naive().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CheckReport {
    id_number: String,
    registered: bool,
}

async fn open_store(ctx: &CommandContext) -> Result<RecordStore> {
    let config = StoreConfig {
        database_url: ctx.database_url.clone(),
        ..Default::default()
    };
    let db = Database::connect(&config).await.map_err(CliError::from)?;
    Ok(db.records())
}

pub async fn add(ctx: CommandContext, args: AddArgs) -> Result<()> {
    let store = open_store(&ctx).await?;
    let year = args.year.unwrap_or_else(said_id::current_year);

    let record = store.insert(&args.id, year).await.map_err(CliError::from)?;

    match ctx.format {
        OutputFormat::Table => {
            print_success(&format!(
                "Registered {} (born {}, {}, {})",
                record.id_number, record.birth_date, record.gender, record.citizenship
            ));
        }
        OutputFormat::Json => print_single(&RecordRow::from(&record)),
    }

    Ok(())
}

pub async fn check(ctx: CommandContext, args: CheckArgs) -> Result<()> {
    let store = open_store(&ctx).await?;
    let registered = store.exists(&args.id).await.map_err(CliError::from)?;

    match ctx.format {
        OutputFormat::Table => {
            if registered {
                print_success(&format!("{} is registered", args.id));
            }
        }
        OutputFormat::Json => print_single(&CheckReport {
            id_number: args.id.clone(),
            registered,
        }),
    }

    if !registered {
        return Err(CliError::NotFound(args.id).into());
    }
    Ok(())
}

pub async fn remove(ctx: CommandContext, args: RemoveArgs) -> Result<()> {
    let store = open_store(&ctx).await?;
    let deleted = store.delete(&args.id).await.map_err(CliError::from)?;

    if !deleted {
        return Err(CliError::NotFound(args.id).into());
    }

    match ctx.format {
        OutputFormat::Table => print_success(&format!("Removed {}", args.id)),
        OutputFormat::Json => print_single(&serde_json::json!({
            "id_number": args.id,
            "removed": true,
        })),
    }

    Ok(())
}

pub async fn list(ctx: CommandContext, args: ListArgs) -> Result<()> {
    let store = open_store(&ctx).await?;

    let records = if args.by_birth_date {
        store.list_by_birth_date().await
    } else {
        store.list().await
    }
    .map_err(CliError::from)?;

    let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
    print_output(&rows, ctx.format);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use said_id::{Citizenship, Gender};

    #[test]
    fn test_record_row_rendering() {
        let record = IdRecord {
            id: 1,
            id_number: "2001014800086".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            gender: Gender::Female,
            citizenship: Citizenship::Citizen,
            date_added: Utc::now(),
        };

        let row = RecordRow::from(&record);
        assert_eq!(row.id_number, "2001014800086");
        assert_eq!(row.birth_date, "2020-01-01");
        assert_eq!(row.gender, "Female");
        assert_eq!(row.citizenship, "Citizen");
    }
}
