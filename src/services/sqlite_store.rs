//! SQLite-backed record store for running the extractor outside AWS.
//!
//! Mirrors the DynamoDB table: one row per object key, replaced on every
//! write. The schema is embedded from `migrations/0001_init.sql` and applied
//! with `--migrate`.

use crate::{models::record::PersistedRecord, services::ports::RecordStore};
use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::{path::Path, str::FromStr};

const INIT_MIGRATION: &str = include_str!("../../migrations/0001_init.sql");

#[derive(Clone, Debug)]
pub struct SqliteRecordStore {
    db: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Open (creating if needed) the database at `url`, e.g.
    /// `sqlite://./data/extractions.db`.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("parsing record store url `{}`", url))?
            .create_if_missing(true);

        if let Some(parent) = Path::new(options.get_filename()).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                tracing::info!("Created missing directory {:?}", parent);
            }
        }

        let db = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| format!("connecting to `{}`", url))?;
        Ok(Self::new(db))
    }

    /// Apply the embedded schema. Safe to run repeatedly.
    pub async fn migrate(&self) -> Result<()> {
        let statements = INIT_MIGRATION
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        tracing::info!("Running {} migration statements...", statements.len());

        for stmt in statements {
            tracing::debug!("Executing migration SQL: {}", stmt);
            sqlx::query(stmt).execute(&self.db).await?;
        }

        Ok(())
    }

    #[cfg(test)]
    pub async fn get(&self, key: &str) -> Result<Option<PersistedRecord>> {
        let record = sqlx::query_as::<_, PersistedRecord>(
            "SELECT object_key, extracted_text FROM extracted_text WHERE object_key = ?",
        )
        .bind(key)
        .fetch_optional(&self.db)
        .await?;
        Ok(record)
    }

    #[cfg(test)]
    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM extracted_text")
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }
}

impl RecordStore for SqliteRecordStore {
    #[tracing::instrument(skip(self, record), fields(key = %record.key))]
    async fn put(&self, record: &PersistedRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO extracted_text (object_key, extracted_text, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(object_key) DO UPDATE SET
                extracted_text = excluded.extracted_text,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&record.key)
        .bind(&record.extracted_text)
        .bind(Utc::now())
        .execute(&self.db)
        .await
        .with_context(|| format!("writing record for `{}`", record.key))?;

        Ok(())
    }

    async fn check(&self) -> Result<()> {
        match sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.db)
            .await?
        {
            1 => Ok(()),
            v => anyhow::bail!("unexpected result: {}", v),
        }
    }
}
