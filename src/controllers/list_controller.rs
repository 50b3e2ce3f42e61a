use log::{debug, info};

use super::ListEvent;
use crate::models::{ShoppingItem, ShoppingList};
use crate::state::AppState;

/// Add every ingredient of the current recipe to the shopping list, creating
/// the list on first use. Returns the new items in recipe order.
pub fn control_list(state: &mut AppState) -> Vec<ShoppingItem> {
    let Some(recipe) = &state.recipe else {
        debug!("No recipe loaded; nothing to add to the list");
        return Vec::new();
    };

    let list = state.list.get_or_insert_with(ShoppingList::new);
    let items: Vec<ShoppingItem> = recipe
        .ingredients
        .iter()
        .map(|ingredient| {
            list.add_item(
                ingredient.quantity,
                ingredient.unit.clone(),
                ingredient.name.clone(),
            )
        })
        .collect();

    info!("Added {} items from {} to the list", items.len(), recipe.id);
    items
}

/// Returns false when the event referred to nothing or carried an unusable value
pub fn handle_list_event(state: &mut AppState, event: ListEvent) -> bool {
    let Some(list) = state.list.as_mut() else {
        return false;
    };

    let result = match event {
        ListEvent::Delete(id) => list.delete_item(id).map(|_| ()),
        ListEvent::UpdateCount(_, quantity) if !quantity.is_finite() || quantity < 0.0 => {
            debug!("Ignoring invalid quantity {}", quantity);
            return false;
        }
        ListEvent::UpdateCount(id, quantity) => list.update_count(id, Some(quantity)),
    };

    match result {
        Ok(()) => true,
        Err(e) => {
            debug!("Ignoring list event: {}", e);
            false
        }
    }
}
