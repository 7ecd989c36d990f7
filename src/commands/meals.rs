//! Meal commands and daily intake totals

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::api::ApiResult;
use crate::filter::FilterOptionsPaging;
use crate::models::{Intake, MacroBreakdown, Meal, MealEntry, NutrientProfile};
use crate::services::Store;
use super::{ListArgs, ListResponse};

#[derive(Debug, Serialize)]
pub struct MealSummary {
    pub id: String,
    pub name: String,
    pub date: DateTime<Utc>,
    pub entry_count: usize,
    pub total_calories: i64,
}

impl From<&Meal> for MealSummary {
    fn from(meal: &Meal) -> Self {
        Self {
            id: meal.id().to_string(),
            name: meal.name.clone(),
            date: meal.date(),
            entry_count: meal.entries().len(),
            total_calories: meal.total_calories(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EntryLine {
    pub id: String,
    pub food_name: String,
    pub amount: f64,
    pub unit: String,
    pub calories: i64,
}

impl From<&MealEntry> for EntryLine {
    fn from(entry: &MealEntry) -> Self {
        Self {
            id: entry.id().to_string(),
            food_name: entry.food().name().to_string(),
            amount: entry.amount(),
            unit: entry.unit().to_string(),
            calories: entry.calories(),
        }
    }
}

/// Totals for one calendar day
#[derive(Debug, Serialize)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub meal_count: usize,
    pub total_calories: i64,
    pub nutrients: NutrientProfile,
    pub macro_breakdown: MacroBreakdown,
    pub meals: Vec<MealSummary>,
}

impl From<&Intake> for DailyTotals {
    fn from(intake: &Intake) -> Self {
        Self {
            date: intake.date(),
            meal_count: intake.meal_count(),
            total_calories: intake.total_calories(),
            nutrients: *intake.totals(),
            macro_breakdown: intake.macro_breakdown(),
            meals: intake.meals().iter().map(MealSummary::from).collect(),
        }
    }
}

/// Meals after search, sort, date range and paging
pub async fn list_meals(store: &mut Store<Meal>, args: &ListArgs) -> ApiResult<ListResponse<MealSummary>> {
    store.set_options(args.to_options());
    store.refresh().await?;

    let mut unpaged = store.options().clone();
    unpaged.page = FilterOptionsPaging::default();
    let total = unpaged
        .apply_dated(store.service().cached().iter().collect::<Vec<_>>())
        .len();
    let items = store.view_in_range().into_iter().map(MealSummary::from).collect();

    Ok(ListResponse::new(items, total))
}

/// Entries of one meal
pub async fn meal_entries(store: &Store<Meal>, id: &str) -> ApiResult<Vec<EntryLine>> {
    let meal = store.service().get_by_id(id).await?;
    Ok(meal.entries().iter().map(EntryLine::from).collect())
}

/// Per-day totals for the meals in the selected range, oldest day first
pub async fn daily_totals(store: &mut Store<Meal>, args: &ListArgs) -> ApiResult<Vec<DailyTotals>> {
    let mut options = args.to_options();
    options.page = FilterOptionsPaging::default();
    store.set_options(options);
    store.refresh().await?;

    let meals: Vec<Meal> = store.view_in_range().into_iter().cloned().collect();
    Ok(Intake::group_by_day(meals).iter().map(DailyTotals::from).collect())
}
