//! CRUD operations over the `sa_id_records` table.

use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

use crate::error::StoreError;
use crate::record::IdRecord;

const RECORD_COLUMNS: &str = "id, id_number, birth_date, gender, citizenship, date_added";

/// Record store keyed by the ID number string.
///
/// Every write validates its candidate through `said-id` first, so the
/// table only ever holds ID numbers that were valid when inserted.
#[derive(Clone)]
pub struct RecordStore {
    pool: SqlitePool,
}

impl RecordStore {
    /// Create a new record store over an open pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Validates `candidate` and stores it with its derived fields.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidId` if validation fails and
    /// `StoreError::Duplicate` if the ID number is already registered;
    /// nothing is written in either case.
    pub async fn insert(
        &self,
        candidate: &str,
        current_year: i32,
    ) -> Result<IdRecord, StoreError> {
        let parsed = said_id::parse(candidate, current_year)?;
        let date_added = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO sa_id_records (id_number, birth_date, gender, citizenship, date_added)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(candidate)
        .bind(parsed.birth_date)
        .bind(parsed.gender.as_char().to_string())
        .bind(parsed.citizenship.as_char().to_string())
        .bind(date_added)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => {
                debug!(id_number = candidate, "Stored ID record");
                Ok(IdRecord {
                    id: done.last_insert_rowid(),
                    id_number: candidate.to_string(),
                    birth_date: parsed.birth_date,
                    gender: parsed.gender,
                    citizenship: parsed.citizenship,
                    date_added,
                })
            }
            Err(e) if is_unique_violation(&e) => Err(StoreError::Duplicate(candidate.to_string())),
            Err(e) => Err(StoreError::Query(e)),
        }
    }

    /// Returns true if `id_number` is already registered.
    pub async fn exists(&self, id_number: &str) -> Result<bool, StoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sa_id_records WHERE id_number = ?1")
                .bind(id_number)
                .fetch_one(&self.pool)
                .await
                .map_err(StoreError::Query)?;

        Ok(count > 0)
    }

    /// Deletes the record for `id_number`, returning false if none existed.
    pub async fn delete(&self, id_number: &str) -> Result<bool, StoreError> {
        let done = sqlx::query("DELETE FROM sa_id_records WHERE id_number = ?1")
            .bind(id_number)
            .execute(&self.pool)
            .await
            .map_err(StoreError::Query)?;

        let deleted = done.rows_affected() > 0;
        if deleted {
            debug!(id_number, "Deleted ID record");
        }
        Ok(deleted)
    }

    /// Returns all stored records in insertion order.
    pub async fn list(&self) -> Result<Vec<IdRecord>, StoreError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM sa_id_records");
        sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::Query)
    }

    /// Returns all stored records ordered by birth date, oldest first.
    pub async fn list_by_birth_date(&self) -> Result<Vec<IdRecord>, StoreError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM sa_id_records ORDER BY birth_date ASC");
        sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::Query)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, StoreConfig};
    use chrono::NaiveDate;
    use said_id::{Citizenship, Gender, ValidationError};

    const CURRENT_YEAR: i32 = 2024;

    /// An in-memory database must stay on a single connection; a second
    /// pooled connection would see a different empty database.
    async fn memory_store() -> RecordStore {
        let config = StoreConfig {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Default::default()
        };
        Database::connect(&config).await.unwrap().records()
    }

    #[tokio::test]
    async fn test_insert_derives_fields() {
        let store = memory_store().await;

        let record = store.insert("2001014800086", CURRENT_YEAR).await.unwrap();
        assert_eq!(record.id_number, "2001014800086");
        assert_eq!(
            record.birth_date,
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
        );
        assert_eq!(record.gender, Gender::Female);
        assert_eq!(record.citizenship, Citizenship::Citizen);
    }

    #[tokio::test]
    async fn test_insert_then_list_roundtrip() {
        let store = memory_store().await;

        let inserted = store.insert("2909035800085", CURRENT_YEAR).await.unwrap();
        let listed = store.list().await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, inserted.id);
        assert_eq!(listed[0].id_number, inserted.id_number);
        assert_eq!(listed[0].birth_date, inserted.birth_date);
        assert_eq!(listed[0].gender, Gender::Male);
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let store = memory_store().await;

        store.insert("2001014800086", CURRENT_YEAR).await.unwrap();
        let err = store
            .insert("2001014800086", CURRENT_YEAR)
            .await
            .unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_id_never_stored() {
        let store = memory_store().await;

        let err = store
            .insert("2001014800087", CURRENT_YEAR)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidId(ValidationError::ChecksumMismatch { .. })
        ));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let store = memory_store().await;

        assert!(!store.exists("2001014800086").await.unwrap());

        store.insert("2001014800086", CURRENT_YEAR).await.unwrap();
        assert!(store.exists("2001014800086").await.unwrap());

        assert!(store.delete("2001014800086").await.unwrap());
        assert!(!store.exists("2001014800086").await.unwrap());

        // Deleting again reports nothing removed.
        assert!(!store.delete("2001014800086").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_by_birth_date_oldest_first() {
        let store = memory_store().await;

        // Born 2020-01-01, 1929-09-03, and 2000-02-29 respectively.
        store.insert("2001014800086", CURRENT_YEAR).await.unwrap();
        store.insert("2909035800085", CURRENT_YEAR).await.unwrap();
        store.insert("0002294800087", CURRENT_YEAR).await.unwrap();

        let records = store.list_by_birth_date().await.unwrap();
        let ages: Vec<i32> = records.iter().map(|r| r.age_at(CURRENT_YEAR)).collect();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id_number, "2909035800085");
        assert_eq!(records[1].id_number, "0002294800087");
        assert_eq!(records[2].id_number, "2001014800086");
        assert_eq!(ages, vec![95, 24, 4]);
    }
}
