use log::{debug, error, info};

use super::{Completion, RecipeEvent, control_like, control_list};
use crate::api::RecipeApi;
use crate::error::Result;
use crate::models::{Recipe, ServingsChange, UnitTable};
use crate::state::{AppState, LoadStatus};
use crate::storage::KeyValueStore;

pub const RECIPE_FAILED_NOTICE: &str = "Error with loading the recipe...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeTicket {
    pub seq: u64,
    pub id: String,
}

/// Point the location at `id` and start loading it
pub fn navigate(state: &mut AppState, id: &str) -> Option<RecipeTicket> {
    begin_recipe(state, &format!("#{}", id))
}

/// React to a location fragment ("#47746"): clear the detail view, highlight
/// the matching search result and mark the recipe as loading.
pub fn begin_recipe(state: &mut AppState, fragment: &str) -> Option<RecipeTicket> {
    let id = fragment.trim_start_matches('#').trim();
    if id.is_empty() {
        return None;
    }
    let id = id.to_string();

    state.location = format!("#{}", id);
    state.recipe = None;
    state.view.recipe_status = LoadStatus::Loading;
    if state.search.is_some() {
        state.view.highlighted = Some(id.clone());
    }

    let seq = state.recipe_requests.issue();
    info!("Loading recipe {} (request {})", id, seq);

    Some(RecipeTicket { seq, id })
}

pub async fn run_recipe<A: RecipeApi + ?Sized>(
    api: &A,
    id: String,
    units: &UnitTable,
    servings: u32,
) -> Result<Recipe> {
    Recipe::load(api, &id, units, servings).await
}

pub fn complete_recipe(
    state: &mut AppState,
    ticket: &RecipeTicket,
    outcome: Result<Recipe>,
) -> Completion {
    if !state.recipe_requests.is_latest(ticket.seq) {
        debug!(
            "Discarding stale recipe {} (request {})",
            ticket.id, ticket.seq
        );
        return Completion::Discarded;
    }

    match outcome {
        Ok(recipe) => {
            state.recipe = Some(recipe);
            state.view.recipe_status = LoadStatus::Idle;
            Completion::Applied
        }
        Err(e) => {
            error!("{}", e);
            state.view.recipe_status = LoadStatus::Failed;
            state.view.notice = Some(RECIPE_FAILED_NOTICE.to_string());
            Completion::Failed
        }
    }
}

/// Load the recipe named by `fragment` and wait for it
pub async fn control_recipe<A: RecipeApi + ?Sized>(
    state: &mut AppState,
    api: &A,
    fragment: &str,
    units: &UnitTable,
    servings: u32,
) -> Option<Completion> {
    let ticket = begin_recipe(state, fragment)?;
    let outcome = run_recipe(api, ticket.id.clone(), units, servings).await;
    Some(complete_recipe(state, &ticket, outcome))
}

/// Returns false when the event had nothing to act on
pub async fn handle_recipe_event(
    state: &mut AppState,
    store: &dyn KeyValueStore,
    event: RecipeEvent,
) -> bool {
    let Some(recipe) = state.recipe.as_mut() else {
        debug!("Ignoring {:?} with no recipe loaded", event);
        return false;
    };

    match event {
        RecipeEvent::DecreaseServings => recipe.update_servings(ServingsChange::Decrease),
        RecipeEvent::IncreaseServings => recipe.update_servings(ServingsChange::Increase),
        RecipeEvent::AddToList => !control_list(state).is_empty(),
        RecipeEvent::ToggleLike => control_like(state, store).await.is_some(),
    }
}
