use async_trait::async_trait;
use hopper_core::repository::{Mapping, ReadRepository, Repository, Result};
use hopper_core::{ShortCode, StorageError};
use sqlx::{MySqlPool, Row};
use tracing::trace;

/// DDL for the `url_mappings` table.
pub const SCHEMA: &str = include_str!("../ddl/mysql/url_mappings.sql");

/// MySQL implementation of the durable-tier contract.
///
/// One row per code. The `code` column carries a unique key with a binary
/// collation, so codes differing only in case are distinct and a duplicate
/// insert surfaces as [`StorageError::Conflict`].
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the `url_mappings` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<Mapping>> {
        trace!(code = %code, "querying url_mappings");

        let row = sqlx::query(
            r#"
            SELECT url
            FROM url_mappings
            WHERE code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let url: String = row.try_get("url").map_err(map_sqlx_error)?;
        Ok(Some(Mapping::new(code.clone(), url)))
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn insert(&self, mapping: &Mapping) -> Result<()> {
        trace!(code = %mapping.code, "inserting into url_mappings");

        let result = sqlx::query(
            r#"
            INSERT INTO url_mappings (code, url)
            VALUES (?, ?)
            "#,
        )
        .bind(mapping.code.as_str())
        .bind(mapping.url.as_str())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::Conflict(mapping.code.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}
