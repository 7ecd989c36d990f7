//! Food commands

use serde::Serialize;

use crate::api::ApiResult;
use crate::filter::FilterOptions;
use crate::models::{Food, FoodSortField, MacroBreakdown, NutrientProfile, NutrientSource};
use crate::services::{Entity, FoodService};
use super::{ListArgs, ListResponse};

/// Summary of a food for list results
#[derive(Debug, Serialize)]
pub struct FoodSummary {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub serving_size: f64,
    pub serving_unit: String,
    pub calories: i64,
}

impl From<&Food> for FoodSummary {
    fn from(food: &Food) -> Self {
        Self {
            id: food.id().to_string(),
            name: food.name.clone(),
            brand: food.brand.clone(),
            serving_size: food.serving().size,
            serving_unit: food.serving().unit.clone(),
            calories: food.calories(),
        }
    }
}

/// Full food detail
#[derive(Debug, Serialize)]
pub struct FoodDetail {
    #[serde(flatten)]
    pub summary: FoodSummary,
    pub nutrients: NutrientProfile,
    pub macro_breakdown: MacroBreakdown,
    /// Nutrients for the requested amount, when one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portion: Option<PortionNutrients>,
}

#[derive(Debug, Serialize)]
pub struct PortionNutrients {
    pub amount: f64,
    pub unit: String,
    pub calories: i64,
    pub nutrients: NutrientProfile,
}

impl FoodDetail {
    pub fn from_food(food: &Food, amount: Option<f64>) -> Self {
        let portion = amount.map(|amount| {
            let nutrients = food.calculate_nutrients(amount, &food.serving().unit);
            PortionNutrients {
                amount,
                unit: food.serving().unit.clone(),
                calories: nutrients.calories(),
                nutrients,
            }
        });

        Self {
            summary: FoodSummary::from(food),
            nutrients: *food.nutrients(),
            macro_breakdown: food.macro_breakdown(),
            portion,
        }
    }
}

/// Load foods and apply the list flags
pub async fn list_foods(service: &mut FoodService, args: &ListArgs) -> ApiResult<ListResponse<FoodSummary>> {
    service.list_from_server(0, Food::PAGE_SIZE).await?;

    let candidates = if args.server_search && !args.search.is_empty() {
        service.search(&args.search, true).await?
    } else {
        service.cached().to_vec()
    };

    let options: FilterOptions<FoodSortField> = args.to_options();
    let total = options.search_list(candidates.iter().collect::<Vec<_>>()).len();
    let items = options
        .apply(candidates.iter().collect::<Vec<_>>())
        .into_iter()
        .map(FoodSummary::from)
        .collect();

    Ok(ListResponse::new(items, total))
}

pub async fn show_food(service: &FoodService, id: &str, amount: Option<f64>) -> ApiResult<FoodDetail> {
    let food = service.get_by_id(id).await?;
    Ok(FoodDetail::from_food(&food, amount))
}
