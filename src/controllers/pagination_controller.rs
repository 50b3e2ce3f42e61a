use log::debug;

use crate::api::RecipeSummary;
use crate::models::{page_count, paginate};
use crate::state::AppState;

/// Switch the results view to `page`. Purely local: no request is made.
pub fn go_to_page(state: &mut AppState, page: usize) -> bool {
    let Some(search) = &state.search else {
        return false;
    };

    let pages = page_count(search.results.len(), state.view.per_page);
    if page == 0 || page > pages {
        debug!("Page {} outside 1..={}", page, pages);
        return false;
    }

    state.view.page = page;
    true
}

/// Results visible on the current page
pub fn current_page(state: &AppState) -> &[RecipeSummary] {
    match &state.search {
        Some(search) => paginate(&search.results, state.view.page, state.view.per_page),
        None => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Search;
    use crate::models::test_fixtures::summary;

    fn state_with_results(count: usize) -> AppState {
        let mut state = AppState::default();
        state.search = Some(Search {
            query: "pizza".to_string(),
            results: (1..=count).map(summary).collect(),
        });
        state
    }

    #[test]
    fn test_go_to_page_shows_slice() {
        let mut state = state_with_results(30);

        assert!(go_to_page(&mut state, 2));

        let ids: Vec<&str> = current_page(&state).iter().map(|r| r.id.as_str()).collect();
        let expected: Vec<String> = (11..=20).map(|n| format!("r-{}", n)).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_last_partial_page() {
        let mut state = state_with_results(23);

        assert!(go_to_page(&mut state, 3));
        assert_eq!(current_page(&state).len(), 3);
    }

    #[test]
    fn test_out_of_range_page_rejected() {
        let mut state = state_with_results(30);

        assert!(!go_to_page(&mut state, 0));
        assert!(!go_to_page(&mut state, 4));
        assert_eq!(state.view.page, 1);
    }

    #[test]
    fn test_no_search_no_page() {
        let mut state = AppState::default();

        assert!(!go_to_page(&mut state, 1));
        assert!(current_page(&state).is_empty());
    }
}
