use std::collections::HashMap;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;
use crate::models::{DEFAULT_RESULTS_PER_PAGE, DEFAULT_SERVINGS, UnitTable};

/// Application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Base URL of the recipe API (search and get endpoints live under it)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// SQLite database holding liked recipes
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_results_per_page")]
    pub results_per_page: usize,
    /// Servings a freshly loaded recipe starts with
    #[serde(default = "default_servings")]
    pub default_servings: u32,
    /// Request timeout in seconds. Unset means requests may wait forever.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Where log output goes; the terminal belongs to the UI
    #[serde(default = "default_log_file")]
    pub log_file: String,
    /// Extra unit synonyms, e.g. `cloves = "clove"`
    #[serde(default)]
    pub unit_synonyms: HashMap<String, String>,
}

fn default_api_base_url() -> String {
    "https://forkify-api.herokuapp.com/api".to_string()
}

fn default_database_url() -> String {
    "sqlite://forkful.db".to_string()
}

fn default_results_per_page() -> usize {
    DEFAULT_RESULTS_PER_PAGE
}

fn default_servings() -> u32 {
    DEFAULT_SERVINGS
}

fn default_log_file() -> String {
    "forkful.log".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            database_url: default_database_url(),
            results_per_page: default_results_per_page(),
            default_servings: default_servings(),
            request_timeout_secs: None,
            log_file: default_log_file(),
            unit_synonyms: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables with FORKFUL__ prefix
    /// 2. `path`, or forkful.toml in the current directory
    /// 3. Default values
    ///
    /// Environment variable format: FORKFUL__API_BASE_URL
    pub fn load(path: Option<&str>) -> Result<Self> {
        let file = match path {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name("forkful").required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("FORKFUL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn unit_table(&self) -> UnitTable {
        UnitTable::default().with_synonyms(&self.unit_synonyms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        let config = AppConfig::default();

        assert_eq!(config.api_base_url, "https://forkify-api.herokuapp.com/api");
        assert_eq!(config.results_per_page, 10);
        assert_eq!(config.default_servings, 4);
        assert_eq!(config.request_timeout(), None);
        assert!(config.unit_synonyms.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("forkful-test-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).expect("Failed to create config file");
        writeln!(
            file,
            r#"
api_base_url = "http://localhost:9999/api"
results_per_page = 5
request_timeout_secs = 7

[unit_synonyms]
cloves = "clove"
"#
        )
        .expect("Failed to write config file");

        let config = AppConfig::load(path.to_str()).expect("Failed to load config");
        std::fs::remove_file(&path).ok();

        assert_eq!(config.api_base_url, "http://localhost:9999/api");
        assert_eq!(config.results_per_page, 5);
        assert_eq!(config.default_servings, 4);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(7)));
        assert_eq!(config.unit_table().canonical("cloves"), Some("clove"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        assert!(AppConfig::load(Some("/nonexistent/forkful-config.toml")).is_err());
    }
}
