use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::protocol::{RegistrationDocument, RegistrationPayload};

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

/// A persisted registration row. The document is the full submission as it
/// went over the wire, plus the server-assigned submission time.
#[derive(Debug, Clone)]
pub struct StoredRegistration {
    pub id: i64,
    pub document: RegistrationDocument,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;

        let storage = Self { pool };
        storage.ensure_registrations_table().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    async fn ensure_registrations_table(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS registrations (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                document     TEXT NOT NULL,
                submitted_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to ensure registrations table exists")?;

        Ok(())
    }

    /// Stores one registration as a whole document, stamping the submission
    /// time. Every call creates a new row; resubmissions are not deduplicated.
    pub async fn insert_registration(
        &self,
        registration: &RegistrationPayload,
    ) -> Result<StoredRegistration> {
        let document = RegistrationDocument {
            registration: registration.clone(),
            submitted_at: Utc::now(),
        };
        let raw = serde_json::to_string(&document)
            .context("failed to serialize registration document")?;

        let rec = sqlx::query(
            "INSERT INTO registrations (document, submitted_at) VALUES (?, ?) RETURNING id",
        )
        .bind(&raw)
        .bind(document.submitted_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(StoredRegistration {
            id: rec.get::<i64, _>(0),
            document,
        })
    }

    /// Returns up to `limit` of the most recent registrations, oldest first.
    pub async fn list_registrations(&self, limit: u32) -> Result<Vec<StoredRegistration>> {
        let mut rows = sqlx::query(
            "SELECT id, document
             FROM registrations
             ORDER BY id DESC
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.reverse();
        rows.into_iter()
            .map(|r| {
                let id = r.get::<i64, _>(0);
                let document = serde_json::from_str(&r.get::<String, _>(1))
                    .with_context(|| format!("stored registration {id} is not a valid document"))?;
                Ok(StoredRegistration { id, document })
            })
            .collect()
    }

    pub async fn count_registrations(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM registrations")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
