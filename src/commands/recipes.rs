//! Recipe commands

use serde::Serialize;

use crate::api::ApiResult;
use crate::models::{FoodType, MacroBreakdown, NutrientProfile, NutrientSource, Part, Recipe};
use crate::services::{RecipeService, Store};
use super::{ListArgs, ListResponse};

#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub part_count: usize,
    pub calories: i64,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id().to_string(),
            name: recipe.name.clone(),
            brand: recipe.brand.clone(),
            part_count: recipe.parts().len(),
            calories: recipe.calories(),
        }
    }
}

/// One line of a recipe
#[derive(Debug, Serialize)]
pub struct PartLine {
    pub id: String,
    pub food_id: String,
    pub food_name: String,
    pub food_type: FoodType,
    pub amount: f64,
    pub unit: String,
    pub calories: i64,
}

impl From<&Part> for PartLine {
    fn from(part: &Part) -> Self {
        Self {
            id: part.id().to_string(),
            food_id: part.food().id().to_string(),
            food_name: part.food().name().to_string(),
            food_type: part.food().food_type(),
            amount: part.amount(),
            unit: part.unit().to_string(),
            calories: part.calories(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub summary: RecipeSummary,
    pub parts: Vec<PartLine>,
    pub nutrients: NutrientProfile,
    pub macro_breakdown: MacroBreakdown,
}

impl From<&Recipe> for RecipeDetail {
    fn from(recipe: &Recipe) -> Self {
        Self {
            summary: RecipeSummary::from(recipe),
            parts: recipe.parts().iter().map(PartLine::from).collect(),
            nutrients: *recipe.nutrients(),
            macro_breakdown: recipe.macro_breakdown(),
        }
    }
}

pub async fn list_recipes(store: &mut Store<Recipe>, args: &ListArgs) -> ApiResult<ListResponse<RecipeSummary>> {
    store.set_options(args.to_options());
    store.refresh().await?;

    let total = store.options().search_list(store.service().cached().iter().collect::<Vec<_>>()).len();
    let items = store.view().into_iter().map(RecipeSummary::from).collect();
    Ok(ListResponse::new(items, total))
}

pub async fn show_recipe(service: &RecipeService, id: &str) -> ApiResult<RecipeDetail> {
    let recipe = service.get_by_id(id).await?;
    Ok(RecipeDetail::from(&recipe))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    use crate::models::Food;
    use crate::services::testing::MockTransport;
    use crate::services::EntityService;

    fn staple(id: &str, name: &str) -> Food {
        Food::new(id)
            .with_name(name)
            .with_serving(100.0, "g")
            .with_protein(10.0)
            .with_fat(5.0)
            .with_carbs(20.0)
    }

    fn stir_fry() -> Recipe {
        Recipe::new("r1")
            .with_name("Stir Fry")
            .with_part(Part::with_id("p1", staple("f1", "Rice"), 100.0, "g"))
            .with_part(Part::with_id("p2", staple("f2", "Tofu"), 100.0, "g"))
    }

    #[test]
    fn test_detail_lists_parts() {
        let detail = RecipeDetail::from(&stir_fry());
        assert_eq!(detail.summary.part_count, 2);
        assert_eq!(detail.summary.calories, 330);
        assert_eq!(detail.parts[1].food_name, "Tofu");
        assert_eq!(detail.parts[1].calories, 165);
        assert_eq!(detail.nutrients.protein, 20.0);
    }

    #[tokio::test]
    async fn test_list_recipes_searches_cache() {
        let mock = Arc::new(MockTransport::new());
        mock.push_ok(json!([
            stir_fry().to_payload(),
            Recipe::new("r2").with_name("Overnight Oats").to_payload(),
        ]));
        let mut store = Store::new(EntityService::new(mock.clone()));

        let args = ListArgs {
            search: "stir".into(),
            ..ListArgs::default()
        };
        let response = list_recipes(&mut store, &args).await.unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.items[0].name, "Stir Fry");
        assert_eq!(response.items[0].calories, 330);
    }

    #[tokio::test]
    async fn test_show_recipe_not_found() {
        let mock = Arc::new(MockTransport::new());
        mock.push_ok(json!([]));
        let service: RecipeService = EntityService::new(mock);

        let err = show_recipe(&service, "missing").await.unwrap_err();
        assert_eq!(err.to_string(), "Recipes with id missing not found");
    }
}
