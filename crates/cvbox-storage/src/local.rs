use crate::traits::{CvError, CvResult, CvStore};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use cvbox_core::constants::LOCAL_SCHEMA_VERSION;
use cvbox_core::{CvId, CvRecord, NewCv};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::PathBuf;

const MAX_CONNECTIONS: u32 = 4;

#[derive(sqlx::FromRow)]
struct CvRow {
    id: i64,
    name: String,
    size: i64,
    content_type: String,
    created_at: i64,
    blob: Vec<u8>,
}

impl From<CvRow> for CvRecord {
    fn from(row: CvRow) -> Self {
        CvRecord {
            id: CvId::from(row.id),
            name: row.name,
            size: row.size.max(0) as u64,
            content_type: row.content_type,
            created_at: DateTime::from_timestamp_millis(row.created_at).unwrap_or_default(),
            blob: Some(Bytes::from(row.blob)),
            url: None,
        }
    }
}

/// Embedded SQLite storage
///
/// One database file per data directory holds every record, content
/// included, in the `cvs` table with an index on `created_at`.
#[derive(Clone)]
pub struct LocalStore {
    pool: SqlitePool,
}

impl LocalStore {
    /// Open (creating if needed) the database at `path` and bring its schema
    /// up to date.
    pub async fn open(path: impl Into<PathBuf>) -> CvResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                CvError::Storage(format!(
                    "Failed to create data directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|e| {
                CvError::Storage(format!(
                    "Failed to open database {}: {}",
                    path.display(),
                    e
                ))
            })?;

        let store = LocalStore { pool };
        store.migrate().await?;

        tracing::info!(path = %path.display(), "Local database opened");
        Ok(store)
    }

    /// Create the table and index if the stored schema version is behind.
    /// Safe to run on every open.
    async fn migrate(&self) -> CvResult<()> {
        let version: i64 = sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(&self.pool)
            .await?;

        if version >= LOCAL_SCHEMA_VERSION {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cvs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                size INTEGER NOT NULL,
                content_type TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                blob BLOB NOT NULL
            )
            "#,
        )
        .execute(&mut *tx)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_cvs_created_at ON cvs (created_at)")
            .execute(&mut *tx)
            .await?;
        sqlx::query(&format!("PRAGMA user_version = {}", LOCAL_SCHEMA_VERSION))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(
            from_version = version,
            to_version = LOCAL_SCHEMA_VERSION,
            "Local database schema upgraded"
        );
        Ok(())
    }
}

#[async_trait]
impl CvStore for LocalStore {
    async fn add_cv(&self, file: NewCv) -> CvResult<CvId> {
        let start = std::time::Instant::now();
        let size = file.size();
        let created_at = Utc::now().timestamp_millis();

        let result = sqlx::query(
            r#"
            INSERT INTO cvs (name, size, content_type, created_at, blob)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&file.name)
        .bind(size as i64)
        .bind(&file.content_type)
        .bind(created_at)
        .bind(file.data.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                name = %file.name,
                size_bytes = size,
                "Local insert failed"
            );
            CvError::from(e)
        })?;

        let id = CvId::from(result.last_insert_rowid());

        tracing::info!(
            id = %id,
            name = %file.name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(id)
    }

    async fn list_cvs(&self) -> CvResult<Vec<CvRecord>> {
        let rows = sqlx::query_as::<_, CvRow>(
            r#"
            SELECT id, name, size, content_type, created_at, blob
            FROM cvs
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = rows.len(), "Local storage listed records");
        Ok(rows.into_iter().map(CvRecord::from).collect())
    }

    async fn get_cv(&self, id: &CvId) -> CvResult<Option<CvRecord>> {
        let Some(local_id) = id.as_local() else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, CvRow>(
            r#"
            SELECT id, name, size, content_type, created_at, blob
            FROM cvs
            WHERE id = ?
            "#,
        )
        .bind(local_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CvRecord::from))
    }

    async fn delete_cv(&self, id: &CvId) -> CvResult<()> {
        let Some(local_id) = id.as_local() else {
            return Ok(());
        };

        let result = sqlx::query("DELETE FROM cvs WHERE id = ?")
            .bind(local_id)
            .execute(&self.pool)
            .await?;

        tracing::info!(
            id = %id,
            rows_affected = result.rows_affected(),
            "Local storage delete successful"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
