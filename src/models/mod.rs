//! Data models
//!
//! Typed entities built from, and serialized back to, the API's raw records.

mod exercise;
mod food;
mod intake;
mod meal;
mod nutrition;
mod part;
pub mod payload;
mod recipe;
mod weight;

pub use exercise::{
    average_weight, filter_by_name, filter_by_type, personal_record, total_volume, Exercise,
    ExerciseName, ExerciseSortField, ExerciseType,
};
pub use food::{BaseFood, Food, FoodSortField, FoodType, NutrientSource, ServingInfo};
pub use intake::Intake;
pub use meal::{Meal, MealSortField};
pub use nutrition::{
    calories_from_macros, round_to_tenth, MacroBreakdown, Nutrient, NutrientProfile,
};
pub use part::{generate_id, MealEntry, Part};
pub use payload::PayloadError;
pub use recipe::{Recipe, RECIPE_UNIT};
pub use weight::{Weight, WeightSortField};
