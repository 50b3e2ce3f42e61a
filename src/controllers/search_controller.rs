use log::{debug, error, info};

use super::Completion;
use crate::api::RecipeApi;
use crate::error::Result;
use crate::models::Search;
use crate::state::{AppState, LoadStatus};

pub const SEARCH_FAILED_NOTICE: &str = "Something went wrong :(";

/// Identifies one issued search so late results can be recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
}

/// Start a search: replace the current search, go back to page 1 and mark
/// results as loading. Blank queries are ignored.
pub fn begin_search(state: &mut AppState, query: &str) -> Option<SearchTicket> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    state.search = Some(Search::new(query));
    state.view.page = 1;
    state.view.highlighted = None;
    state.view.search_status = LoadStatus::Loading;

    let seq = state.search_requests.issue();
    info!("Searching for '{}' (request {})", query, seq);

    Some(SearchTicket {
        seq,
        query: query.to_string(),
    })
}

/// Fetch results for `query` without touching application state
pub async fn run_search<A: RecipeApi + ?Sized>(api: &A, query: String) -> Result<Search> {
    let mut search = Search::new(query);
    search.execute(api).await?;
    Ok(search)
}

/// Apply a finished search if it is still the latest one issued
pub fn complete_search(
    state: &mut AppState,
    ticket: &SearchTicket,
    outcome: Result<Search>,
) -> Completion {
    if !state.search_requests.is_latest(ticket.seq) {
        debug!(
            "Discarding stale results for '{}' (request {})",
            ticket.query, ticket.seq
        );
        return Completion::Discarded;
    }

    match outcome {
        Ok(search) => {
            state.search = Some(search);
            state.view.search_status = LoadStatus::Idle;
            Completion::Applied
        }
        Err(e) => {
            error!("{}", e);
            state.view.search_status = LoadStatus::Failed;
            state.view.notice = Some(SEARCH_FAILED_NOTICE.to_string());
            Completion::Failed
        }
    }
}

/// Submit a search and wait for it. `None` when the query was blank.
pub async fn control_search<A: RecipeApi + ?Sized>(
    state: &mut AppState,
    api: &A,
    query: &str,
) -> Option<Completion> {
    let ticket = begin_search(state, query)?;
    let outcome = run_search(api, ticket.query.clone()).await;
    Some(complete_search(state, &ticket, outcome))
}
