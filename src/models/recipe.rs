use log::debug;

use super::ingredient::{IngredientLine, UnitTable, parse_ingredients};
use crate::api::{RecipeApi, RecipeDetail};
use crate::error::{ForkfulError, Result};

pub const DEFAULT_SERVINGS: u32 = 4;

const BASE_PREP_MINUTES: u32 = 15;
const MINUTES_PER_INGREDIENT: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServingsChange {
    Increase,
    Decrease,
}

/// Full detail for the recipe currently on screen
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub image: String,
    pub servings: u32,
    pub prep_time_minutes: u32,
    pub ingredients: Vec<IngredientLine>,
}

/// Rough preparation estimate; grows with every extra ingredient
pub fn estimate_time_minutes(ingredient_count: usize) -> u32 {
    let count = u32::try_from(ingredient_count).unwrap_or(u32::MAX);
    BASE_PREP_MINUTES.saturating_add(count.saturating_mul(MINUTES_PER_INGREDIENT))
}

impl Recipe {
    /// Fetch a recipe by id and derive ingredients, servings and prep time
    pub async fn load<A: RecipeApi + ?Sized>(
        api: &A,
        id: &str,
        units: &UnitTable,
        servings: u32,
    ) -> Result<Self> {
        let detail = api.fetch_by_id(id).await?;
        Ok(Self::from_detail(detail, units, servings))
    }

    pub fn from_detail(detail: RecipeDetail, units: &UnitTable, servings: u32) -> Self {
        let ingredients = parse_ingredients(&detail.ingredients, units);
        debug!(
            "Parsed {} ingredients for recipe {}",
            ingredients.len(),
            detail.id
        );

        Self {
            id: detail.id,
            title: detail.title,
            author: detail.publisher,
            url: detail.source_url,
            image: detail.image,
            servings: servings.max(1),
            prep_time_minutes: estimate_time_minutes(ingredients.len()),
            ingredients,
        }
    }

    /// Rescale every ingredient quantity to `new_servings`
    pub fn scale_servings(&mut self, new_servings: u32) -> Result<()> {
        if new_servings < 1 {
            return Err(ForkfulError::InvalidServings(new_servings));
        }

        let factor = f64::from(new_servings) / f64::from(self.servings);
        for ingredient in &mut self.ingredients {
            if let Some(quantity) = ingredient.quantity.as_mut() {
                *quantity *= factor;
            }
        }
        self.servings = new_servings;

        Ok(())
    }

    /// Step servings by one. Returns false when nothing changed (decrease at 1).
    pub fn update_servings(&mut self, change: ServingsChange) -> bool {
        let new_servings = match change {
            ServingsChange::Increase => self.servings.saturating_add(1),
            ServingsChange::Decrease if self.servings > 1 => self.servings - 1,
            ServingsChange::Decrease => return false,
        };

        self.scale_servings(new_servings).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_fixtures::{FakeApi, fake_api};
    use rstest::*;

    fn detail() -> RecipeDetail {
        RecipeDetail {
            id: "47746".to_string(),
            title: "Best Pizza Dough Ever".to_string(),
            publisher: "101 Cookbooks".to_string(),
            source_url: "http://www.101cookbooks.com/archives/pizza".to_string(),
            image: "http://img/47746.jpg".to_string(),
            ingredients: vec![
                "4 1/2 cups flour".to_string(),
                "2 tablespoons olive oil".to_string(),
                "Salt to taste".to_string(),
            ],
        }
    }

    #[test]
    fn test_from_detail_maps_fields() {
        let recipe = Recipe::from_detail(detail(), &UnitTable::default(), DEFAULT_SERVINGS);

        assert_eq!(recipe.id, "47746");
        assert_eq!(recipe.author, "101 Cookbooks");
        assert_eq!(recipe.url, "http://www.101cookbooks.com/archives/pizza");
        assert_eq!(recipe.image, "http://img/47746.jpg");
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.prep_time_minutes, estimate_time_minutes(3));
        assert_eq!(recipe.ingredients.len(), 3);
        assert_eq!(recipe.ingredients[1].unit, "tbsp");
        assert_eq!(recipe.ingredients[2].quantity, None);
    }

    #[test]
    fn test_from_detail_clamps_zero_servings() {
        let recipe = Recipe::from_detail(detail(), &UnitTable::default(), 0);
        assert_eq!(recipe.servings, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_load_uses_api(fake_api: FakeApi) {
        let recipe = Recipe::load(&fake_api, "r-3", &UnitTable::default(), 4)
            .await
            .expect("Failed to load recipe");

        assert_eq!(recipe.id, "r-3");
        assert_eq!(fake_api.fetch_calls(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_load_unknown_id_fails(fake_api: FakeApi) {
        let result = Recipe::load(&fake_api, "missing", &UnitTable::default(), 4).await;

        assert!(matches!(
            result,
            Err(ForkfulError::RecipeFetchFailure { .. })
        ));
    }

    #[test]
    fn test_scale_servings_is_proportional() {
        let mut recipe = Recipe::from_detail(detail(), &UnitTable::default(), 4);
        recipe.scale_servings(8).unwrap();

        assert_eq!(recipe.servings, 8);
        assert_eq!(recipe.ingredients[0].quantity, Some(9.0));
        assert_eq!(recipe.ingredients[1].quantity, Some(4.0));
        assert_eq!(recipe.ingredients[2].quantity, None);
    }

    #[test]
    fn test_scale_servings_round_trip() {
        let mut recipe = Recipe::from_detail(detail(), &UnitTable::default(), 4);
        let original = recipe.ingredients.clone();

        recipe.scale_servings(7).unwrap();
        recipe.scale_servings(3).unwrap();
        recipe.scale_servings(4).unwrap();

        for (scaled, before) in recipe.ingredients.iter().zip(&original) {
            match (scaled.quantity, before.quantity) {
                (Some(a), Some(b)) => assert!((a - b).abs() < 1e-9, "{} != {}", a, b),
                (a, b) => assert_eq!(a, b),
            }
        }
    }

    #[test]
    fn test_scale_servings_rejects_zero() {
        let mut recipe = Recipe::from_detail(detail(), &UnitTable::default(), 4);
        let before = recipe.clone();

        assert!(matches!(
            recipe.scale_servings(0),
            Err(ForkfulError::InvalidServings(0))
        ));
        assert_eq!(recipe, before);
    }

    #[test]
    fn test_update_servings_never_below_one() {
        let mut recipe = Recipe::from_detail(detail(), &UnitTable::default(), 2);

        assert!(recipe.update_servings(ServingsChange::Decrease));
        assert_eq!(recipe.servings, 1);
        assert!(!recipe.update_servings(ServingsChange::Decrease));
        assert_eq!(recipe.servings, 1);

        assert!(recipe.update_servings(ServingsChange::Increase));
        assert_eq!(recipe.servings, 2);
    }

    #[test]
    fn test_estimate_time_grows_with_ingredients() {
        assert_eq!(estimate_time_minutes(0), 15);
        assert_eq!(estimate_time_minutes(5), 30);
        for count in 0..40 {
            assert!(estimate_time_minutes(count + 1) > estimate_time_minutes(count));
        }
    }
}
