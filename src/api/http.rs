use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use super::{RecipeApi, RecipeDetail, RecipeSummary};
use crate::error::{ForkfulError, Result};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    count: usize,
    recipes: Vec<RecipeSummary>,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    recipe: RecipeDetail,
}

/// `RecipeApi` backed by the forkify HTTP endpoints
#[derive(Debug, Clone)]
pub struct HttpRecipeApi {
    client: Client,
    base_url: String,
}

impl HttpRecipeApi {
    /// No timeout is applied unless one is given; a hung request stays pending.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent("forkful/0.1");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>> {
        let failure = |reason: String| ForkfulError::SearchFailure {
            query: query.to_string(),
            reason,
        };

        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| failure(e.to_string()))?;

        if !response.status().is_success() {
            return Err(failure(format!("HTTP {}", response.status())));
        }

        let body: SearchResponse = response.json().await.map_err(|e| failure(e.to_string()))?;
        debug!(
            "Search '{}' returned {} recipes (count={})",
            query,
            body.recipes.len(),
            body.count
        );

        Ok(body.recipes)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<RecipeDetail> {
        let failure = |reason: String| ForkfulError::RecipeFetchFailure {
            id: id.to_string(),
            reason,
        };

        let response = self
            .client
            .get(format!("{}/get", self.base_url))
            .query(&[("rId", id)])
            .send()
            .await
            .map_err(|e| failure(e.to_string()))?;

        if !response.status().is_success() {
            return Err(failure(format!("HTTP {}", response.status())));
        }

        let body: DetailResponse = response.json().await.map_err(|e| failure(e.to_string()))?;
        debug!(
            "Fetched recipe {} with {} ingredients",
            body.recipe.id,
            body.recipe.ingredients.len()
        );

        Ok(body.recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_search_parses_summaries() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::UrlEncoded("q".into(), "pizza".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "count": 2,
                    "recipes": [
                        {"publisher": "Closet Cooking", "title": "Pizza Dip", "recipe_id": "35477", "image_url": "http://img/1.jpg", "social_rank": 99.9},
                        {"publisher": "101 Cookbooks", "title": "Pizza Bianca", "recipe_id": "47746", "image_url": "http://img/2.jpg"}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let api = HttpRecipeApi::new(&server.url(), None).unwrap();
        let results = api.search("pizza").await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "35477");
        assert_eq!(results[0].title, "Pizza Dip");
        assert_eq!(results[0].publisher, "Closet Cooking");
        assert_eq!(results[1].image, "http://img/2.jpg");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_malformed_body_is_search_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"error": "Not found"}"#)
            .create_async()
            .await;

        let api = HttpRecipeApi::new(&server.url(), None).unwrap();
        let result = api.search("zzz").await;

        match result {
            Err(ForkfulError::SearchFailure { query, .. }) => assert_eq!(query, "zzz"),
            other => panic!("Expected SearchFailure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_server_error_is_search_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let api = HttpRecipeApi::new(&server.url(), None).unwrap();

        assert!(matches!(
            api.search("pizza").await,
            Err(ForkfulError::SearchFailure { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_by_id() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/get")
            .match_query(Matcher::UrlEncoded("rId".into(), "47746".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "recipe": {
                        "publisher": "101 Cookbooks",
                        "f2f_url": "http://f2f/47746",
                        "ingredients": ["4 1/2 cups flour", "2 tablespoons olive oil"],
                        "source_url": "http://www.101cookbooks.com/archives/pizza",
                        "recipe_id": "47746",
                        "image_url": "http://img/2.jpg",
                        "title": "Best Pizza Dough Ever"
                    }
                }"#,
            )
            .create_async()
            .await;

        let api = HttpRecipeApi::new(&format!("{}/", server.url()), None).unwrap();
        let detail = api.fetch_by_id("47746").await.unwrap();

        assert_eq!(detail.id, "47746");
        assert_eq!(detail.title, "Best Pizza Dough Ever");
        assert_eq!(detail.publisher, "101 Cookbooks");
        assert_eq!(detail.source_url, "http://www.101cookbooks.com/archives/pizza");
        assert_eq!(detail.ingredients.len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_by_id_not_found_is_fetch_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/get")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let api = HttpRecipeApi::new(&server.url(), None).unwrap();

        match api.fetch_by_id("nope").await {
            Err(ForkfulError::RecipeFetchFailure { id, .. }) => assert_eq!(id, "nope"),
            other => panic!("Expected RecipeFetchFailure, got {:?}", other),
        }
    }

    /// Accepts connections and never writes a byte back
    async fn silent_server() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_search_times_out_as_search_failure() {
        let url = silent_server().await;
        let api = HttpRecipeApi::new(&url, Some(Duration::from_millis(100))).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), api.search("pizza"))
            .await
            .expect("Client timeout should fire first");

        match result {
            Err(ForkfulError::SearchFailure { query, .. }) => assert_eq!(query, "pizza"),
            other => panic!("Expected SearchFailure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_by_id_times_out_as_fetch_failure() {
        let url = silent_server().await;
        let api = HttpRecipeApi::new(&url, Some(Duration::from_millis(100))).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), api.fetch_by_id("47746"))
            .await
            .expect("Client timeout should fire first");

        match result {
            Err(ForkfulError::RecipeFetchFailure { id, .. }) => assert_eq!(id, "47746"),
            other => panic!("Expected RecipeFetchFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpRecipeApi::new("https://example.com/api/", None).unwrap();
        assert_eq!(api.base_url(), "https://example.com/api");
    }
}
