use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc::UnboundedSender;

use super::app::Command;
use crate::api::RecipeApi;
use crate::controllers::{
    Completion, RecipeTicket, SearchTicket, begin_recipe, begin_search, complete_recipe,
    complete_search, go_to_page, handle_list_event, handle_recipe_event, navigate, run_recipe,
    run_search,
};
use crate::error::Result;
use crate::models::{Recipe, Search, UnitTable};
use crate::state::AppState;
use crate::storage::KeyValueStore;

/// A fetch result on its way back to the event loop
pub enum Fetched {
    Search(SearchTicket, Result<Search>),
    Recipe(RecipeTicket, Result<Recipe>),
}

/// Runs API requests on the tokio runtime and reports back over a channel.
/// Requests are never cancelled; tickets decide which results count.
pub struct Fetcher {
    api: Arc<dyn RecipeApi>,
    units: UnitTable,
    servings: u32,
    tx: UnboundedSender<Fetched>,
}

impl Fetcher {
    pub fn new(
        api: Arc<dyn RecipeApi>,
        units: UnitTable,
        servings: u32,
        tx: UnboundedSender<Fetched>,
    ) -> Self {
        Self {
            api,
            units,
            servings,
            tx,
        }
    }

    pub fn search(&self, ticket: SearchTicket) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = run_search(api.as_ref(), ticket.query.clone()).await;
            if tx.send(Fetched::Search(ticket, outcome)).is_err() {
                debug!("Event loop gone; dropping search result");
            }
        });
    }

    pub fn recipe(&self, ticket: RecipeTicket) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let units = self.units.clone();
        let servings = self.servings;
        tokio::spawn(async move {
            let outcome = run_recipe(api.as_ref(), ticket.id.clone(), &units, servings).await;
            if tx.send(Fetched::Recipe(ticket, outcome)).is_err() {
                debug!("Event loop gone; dropping recipe result");
            }
        });
    }
}

/// Hand a command to the controller responsible for it
pub async fn dispatch(
    command: Command,
    state: &mut AppState,
    store: &dyn KeyValueStore,
    fetcher: &Fetcher,
) {
    match command {
        Command::Search(query) => {
            if let Some(ticket) = begin_search(state, &query) {
                fetcher.search(ticket);
            }
        }
        Command::GoToPage(page) => {
            go_to_page(state, page);
        }
        Command::OpenRecipe(id) => {
            if let Some(ticket) = navigate(state, &id) {
                fetcher.recipe(ticket);
            }
        }
        Command::Recipe(event) => {
            handle_recipe_event(state, store, event).await;
        }
        Command::List(event) => {
            handle_list_event(state, event);
        }
        Command::DismissNotice => state.dismiss_notice(),
    }
}

/// The initial "load": act on a location fragment given at startup
pub fn load_fragment(state: &mut AppState, fragment: &str, fetcher: &Fetcher) {
    if let Some(ticket) = begin_recipe(state, fragment) {
        fetcher.recipe(ticket);
    }
}

pub fn apply(state: &mut AppState, fetched: Fetched) -> Completion {
    match fetched {
        Fetched::Search(ticket, outcome) => complete_search(state, &ticket, outcome),
        Fetched::Recipe(ticket, outcome) => complete_recipe(state, &ticket, outcome),
    }
}
