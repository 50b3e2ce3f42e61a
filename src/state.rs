use crate::models::{DEFAULT_RESULTS_PER_PAGE, Likes, Recipe, Search, ShoppingList};

/// Progress of one asynchronous load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Failed,
}

/// Monotonic request counter. Only the most recently issued number is current.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

/// Presentation state the controllers maintain for the views
#[derive(Debug)]
pub struct ViewState {
    pub page: usize,
    pub per_page: usize,
    pub highlighted: Option<String>,
    pub search_status: LoadStatus,
    pub recipe_status: LoadStatus,
    /// Blocking notice shown to the user until dismissed
    pub notice: Option<String>,
}

impl ViewState {
    pub fn new(per_page: usize) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            highlighted: None,
            search_status: LoadStatus::Idle,
            recipe_status: LoadStatus::Idle,
            notice: None,
        }
    }
}

/// Everything the application knows. Passed explicitly to every controller.
#[derive(Debug)]
pub struct AppState {
    pub search: Option<Search>,
    pub recipe: Option<Recipe>,
    pub list: Option<ShoppingList>,
    pub likes: Likes,
    /// Location fragment, e.g. "#47746"
    pub location: String,
    pub view: ViewState,
    pub(crate) search_requests: RequestSequence,
    pub(crate) recipe_requests: RequestSequence,
}

impl AppState {
    pub fn new(per_page: usize) -> Self {
        Self {
            search: None,
            recipe: None,
            list: None,
            likes: Likes::new(),
            location: String::new(),
            view: ViewState::new(per_page),
            search_requests: RequestSequence::default(),
            recipe_requests: RequestSequence::default(),
        }
    }

    /// Whether the recipe on screen is liked
    pub fn current_recipe_liked(&self) -> bool {
        self.recipe
            .as_ref()
            .is_some_and(|recipe| self.likes.is_liked(&recipe.id))
    }

    pub fn dismiss_notice(&mut self) {
        self.view.notice = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_RESULTS_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_sequence_latest_wins() {
        let mut seq = RequestSequence::default();
        let first = seq.issue();
        let second = seq.issue();

        assert!(second > first);
        assert!(!seq.is_latest(first));
        assert!(seq.is_latest(second));
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = AppState::default();

        assert!(state.search.is_none());
        assert!(state.recipe.is_none());
        assert!(state.list.is_none());
        assert_eq!(state.likes.count(), 0);
        assert_eq!(state.view.page, 1);
        assert_eq!(state.view.per_page, DEFAULT_RESULTS_PER_PAGE);
        assert!(!state.current_recipe_liked());
    }

    #[test]
    fn test_per_page_at_least_one() {
        assert_eq!(ViewState::new(0).per_page, 1);
    }
}
