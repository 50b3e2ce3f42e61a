mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use http::HttpRecipeApi;

/// One search hit as returned by the recipe API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    #[serde(rename = "recipe_id")]
    pub id: String,
    pub title: String,
    pub publisher: String,
    #[serde(rename = "image_url")]
    pub image: String,
}

/// Full recipe payload from the detail endpoint, before ingredient parsing
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecipeDetail {
    #[serde(rename = "recipe_id")]
    pub id: String,
    pub title: String,
    pub publisher: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(rename = "image_url", default)]
    pub image: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Remote recipe database.
///
/// Errors are reported as `SearchFailure` / `RecipeFetchFailure`; callers do
/// not see HTTP status codes.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>>;
    async fn fetch_by_id(&self, id: &str) -> Result<RecipeDetail>;
}
