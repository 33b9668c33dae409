//! Stored ID record row type.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use said_id::{Citizenship, Gender};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// A row from the `sa_id_records` table.
#[derive(Debug, Clone, Serialize)]
pub struct IdRecord {
    /// Row id assigned by the database.
    pub id: i64,

    /// The validated 13-digit ID number.
    pub id_number: String,

    /// Birth date derived from the ID number at insert time.
    pub birth_date: NaiveDate,

    /// Gender derived from the sequence field.
    pub gender: Gender,

    /// Citizenship status derived from the eleventh digit.
    pub citizenship: Citizenship,

    /// When the record was stored.
    pub date_added: DateTime<Utc>,
}

impl IdRecord {
    /// Age in whole calendar years at `current_year`.
    pub fn age_at(&self, current_year: i32) -> i32 {
        current_year - self.birth_date.year()
    }
}

impl<'r> sqlx::FromRow<'r, SqliteRow> for IdRecord {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let gender: String = row.try_get("gender")?;
        let citizenship: String = row.try_get("citizenship")?;

        Ok(Self {
            id: row.try_get("id")?,
            id_number: row.try_get("id_number")?,
            birth_date: row.try_get("birth_date")?,
            gender: decode_tag(&gender, "gender", Gender::from_char)?,
            citizenship: decode_tag(&citizenship, "citizenship", Citizenship::from_char)?,
            date_added: row.try_get("date_added")?,
        })
    }
}

fn decode_tag<T>(
    raw: &str,
    column: &'static str,
    decode: impl Fn(char) -> Option<T>,
) -> Result<T, sqlx::Error> {
    raw.chars()
        .next()
        .and_then(decode)
        .ok_or_else(|| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: format!("unrecognized {column} tag {raw:?}").into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_at() {
        let record = IdRecord {
            id: 1,
            id_number: "2909035800085".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1929, 9, 3).unwrap(),
            gender: Gender::Male,
            citizenship: Citizenship::Citizen,
            date_added: Utc::now(),
        };
        assert_eq!(record.age_at(2024), 95);
    }
}
