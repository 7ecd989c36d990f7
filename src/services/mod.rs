//! Entity services
//!
//! Per-entity CRUD with a local cache, and the list store that filters the
//! cache for display.

pub mod entity;
pub mod service;
pub mod store;

use std::sync::Arc;

pub use entity::Entity;
pub use service::EntityService;
pub use store::Store;

use crate::api::Transport;
use crate::models::{Exercise, Food, Meal, Recipe, Weight};

pub type FoodService = EntityService<Food>;
pub type RecipeService = EntityService<Recipe>;
pub type MealService = EntityService<Meal>;
pub type ExerciseService = EntityService<Exercise>;
pub type WeightService = EntityService<Weight>;

/// One service per entity type, all sharing a transport
pub struct Services {
    pub foods: FoodService,
    pub recipes: RecipeService,
    pub meals: MealService,
    pub exercises: ExerciseService,
    pub weights: WeightService,
}

impl Services {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            foods: EntityService::new(transport.clone()),
            recipes: EntityService::new(transport.clone()),
            meals: EntityService::new(transport.clone()),
            exercises: EntityService::new(transport.clone()),
            weights: EntityService::new(transport),
        }
    }
}
