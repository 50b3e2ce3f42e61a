mod likes_controller;
mod list_controller;
mod pagination_controller;
mod recipe_controller;
mod search_controller;

use crate::models::ItemId;

pub use likes_controller::{LikeToggle, control_like, restore_likes};
pub use list_controller::{control_list, handle_list_event};
pub use pagination_controller::{current_page, go_to_page};
pub use recipe_controller::{
    RECIPE_FAILED_NOTICE, RecipeTicket, begin_recipe, complete_recipe, control_recipe,
    handle_recipe_event, navigate, run_recipe,
};
pub use search_controller::{
    SEARCH_FAILED_NOTICE, SearchTicket, begin_search, complete_search, control_search, run_search,
};

/// What happened when a fetch result came back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed,
    /// A newer request was issued; this result was dropped
    Discarded,
}

/// Shopping list interactions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListEvent {
    Delete(ItemId),
    UpdateCount(ItemId, f64),
}

/// Interactions on the recipe detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeEvent {
    DecreaseServings,
    IncreaseServings,
    AddToList,
    ToggleLike,
}
