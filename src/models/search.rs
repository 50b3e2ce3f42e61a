use log::info;

use crate::api::{RecipeApi, RecipeSummary};
use crate::error::Result;

pub const DEFAULT_RESULTS_PER_PAGE: usize = 10;
pub const TITLE_LIMIT: usize = 17;

/// A submitted query and the summaries it produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Search {
    pub query: String,
    pub results: Vec<RecipeSummary>,
}

impl Search {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            results: Vec::new(),
        }
    }

    /// Run the query against the API, replacing any stored results
    pub async fn execute<A: RecipeApi + ?Sized>(&mut self, api: &A) -> Result<&[RecipeSummary]> {
        self.results = api.search(&self.query).await?;
        info!("Search '{}' found {} recipes", self.query, self.results.len());
        Ok(&self.results)
    }
}

pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// Items `[(page - 1) * per_page, min(page * per_page, len))`; empty when the
/// page is out of range.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if page == 0 || per_page == 0 {
        return &[];
    }

    let start = (page - 1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = page.saturating_mul(per_page).min(items.len());

    &items[start..end]
}

/// Which page navigation buttons to show under a results page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButtons {
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

impl PageButtons {
    pub fn for_page(page: usize, pages: usize) -> Self {
        let prev = (page > 1 && pages > 1).then(|| page - 1);
        let next = (page < pages).then(|| page + 1);
        Self { prev, next }
    }
}

/// Shorten a title to whole words fitting in `limit` characters, marking the cut with "..."
pub fn limit_title(title: &str, limit: usize) -> String {
    if title.chars().count() <= limit {
        return title.to_string();
    }

    let mut kept: Vec<&str> = Vec::new();
    let mut length = 0;
    for word in title.split_whitespace() {
        let word_length = word.chars().count();
        if length + word_length > limit {
            break;
        }
        kept.push(word);
        length += word_length;
    }

    format!("{} ...", kept.join(" "))
}
