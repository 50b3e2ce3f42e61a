mod ingredient;
mod likes;
mod recipe;
mod search;
mod shopping_list;

#[cfg(test)]
pub mod test_fixtures;

pub use ingredient::{IngredientLine, UnitTable, format_quantity, parse_ingredient, parse_ingredients};
pub use likes::{LIKES_KEY, LikedRecipe, Likes};
pub use recipe::{DEFAULT_SERVINGS, Recipe, ServingsChange, estimate_time_minutes};
pub use search::{
    DEFAULT_RESULTS_PER_PAGE, PageButtons, Search, TITLE_LIMIT, limit_title, page_count, paginate,
};
pub use shopping_list::{ItemId, ShoppingItem, ShoppingList};
