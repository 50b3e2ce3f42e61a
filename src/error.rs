use thiserror::Error;

use crate::models::ItemId;

#[derive(Error, Debug)]
pub enum ForkfulError {
    #[error("Search for '{query}' failed: {reason}")]
    SearchFailure { query: String, reason: String },

    #[error("Failed to load recipe {id}: {reason}")]
    RecipeFetchFailure { id: String, reason: String },

    #[error("Storage error: {0}")]
    StorageFailure(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Shopping item not found with id: {0}")]
    ItemNotFound(ItemId),

    #[error("Liked recipe not found with id: {0}")]
    LikeNotFound(String),

    #[error("Servings must be at least 1, got {0}")]
    InvalidServings(u32),
}

pub type Result<T> = std::result::Result<T, ForkfulError>;
