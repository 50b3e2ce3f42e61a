use log::info;

use crate::models::LikedRecipe;
use crate::state::AppState;
use crate::storage::KeyValueStore;

/// Which way a like toggle went, for the like button and the likes panel
#[derive(Debug, Clone, PartialEq)]
pub enum LikeToggle {
    Liked(LikedRecipe),
    Unliked(String),
}

/// Like or unlike the current recipe and persist the result
pub async fn control_like(state: &mut AppState, store: &dyn KeyValueStore) -> Option<LikeToggle> {
    let recipe = state.recipe.as_ref()?;

    let toggle = if state.likes.is_liked(&recipe.id) {
        let removed = state.likes.delete_like(&recipe.id).ok()?;
        LikeToggle::Unliked(removed.id)
    } else {
        LikeToggle::Liked(state.likes.add_like(
            recipe.id.clone(),
            recipe.title.clone(),
            recipe.author.clone(),
            recipe.image.clone(),
        ))
    };

    state.likes.persist(store).await;
    info!("{:?}; {} liked recipes", toggle, state.likes.count());

    Some(toggle)
}

/// Load persisted likes at startup
pub async fn restore_likes(state: &mut AppState, store: &dyn KeyValueStore) {
    state.likes.restore(store).await;
    info!("Restored {} liked recipes", state.likes.count());
}
