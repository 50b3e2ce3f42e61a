use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use log::info;
use sqlx::SqlitePool;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;

use crate::error::{ForkfulError, Result};

/// Durable string key-value storage
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// `KeyValueStore` over the `kv_store` table
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wrap a pool that already has migrations applied
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the database if needed, connect, and run migrations
    pub async fn open(database_url: &str) -> Result<Self> {
        if !sqlx::Sqlite::database_exists(database_url).await? {
            info!("Creating database {}", database_url);
            sqlx::Sqlite::create_database(database_url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Session-only store, used when the database cannot be opened
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| ForkfulError::StorageFailure(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| ForkfulError::StorageFailure(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
