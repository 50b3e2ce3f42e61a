use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rstest::*;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

use crate::api::{RecipeApi, RecipeDetail, RecipeSummary};
use crate::error::{ForkfulError, Result};
use crate::storage::KeyValueStore;

/// Test fixture that creates an in-memory SQLite database with migrations applied
#[fixture]
pub async fn test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// In-process recipe API.
///
/// "pizza" yields 30 summaries `r-1`..`r-30`, "broken" fails, anything else
/// finds nothing. Every `r-N` id has a three-ingredient detail.
#[derive(Default)]
pub struct FakeApi {
    search_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl FakeApi {
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

pub fn summary(n: usize) -> RecipeSummary {
    RecipeSummary {
        id: format!("r-{}", n),
        title: format!("Pizza number {}", n),
        publisher: "Test Kitchen".to_string(),
        image: format!("http://img/{}.jpg", n),
    }
}

#[async_trait]
impl RecipeApi for FakeApi {
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        match query {
            "pizza" => Ok((1..=30).map(summary).collect()),
            "broken" => Err(ForkfulError::SearchFailure {
                query: query.to_string(),
                reason: "connection refused".to_string(),
            }),
            _ => Ok(Vec::new()),
        }
    }

    async fn fetch_by_id(&self, id: &str) -> Result<RecipeDetail> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if !id.starts_with("r-") {
            return Err(ForkfulError::RecipeFetchFailure {
                id: id.to_string(),
                reason: "404 Not Found".to_string(),
            });
        }

        Ok(RecipeDetail {
            id: id.to_string(),
            title: format!("Recipe {}", id),
            publisher: "Test Kitchen".to_string(),
            source_url: format!("http://example.com/{}", id),
            image: format!("http://img/{}.jpg", id),
            ingredients: vec![
                "2 cups flour".to_string(),
                "1 1/2 teaspoons salt".to_string(),
                "3 eggs".to_string(),
            ],
        })
    }
}

#[fixture]
pub fn fake_api() -> FakeApi {
    FakeApi::default()
}

/// Store whose every operation fails, like a disabled or full local storage
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(ForkfulError::StorageFailure("storage disabled".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(ForkfulError::StorageFailure("quota exceeded".to_string()))
    }
}
