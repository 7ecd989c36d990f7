//! Part model
//!
//! A quantity of one food inside a recipe or a meal.

use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use super::food::{BaseFood, NutrientSource};
use super::payload::{coerce_f64, coerce_string, PayloadError};
use super::NutrientProfile;

/// Meal entries are parts scoped to a meal
pub type MealEntry = Part;

/// Generate an in-memory id such as `part_5f0c…`
pub fn generate_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

/// An amount of a food
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Part {
    id: String,
    food: BaseFood,
    amount: f64,
    unit: String,
}

impl Part {
    /// New part with a generated `part_` id
    pub fn new(food: impl Into<BaseFood>, amount: f64, unit: impl Into<String>) -> Self {
        Self::with_id(generate_id("part"), food, amount, unit)
    }

    pub fn with_id(
        id: impl Into<String>,
        food: impl Into<BaseFood>,
        amount: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            food: food.into(),
            amount,
            unit: unit.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn food(&self) -> &BaseFood {
        &self.food
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Nutrients contributed by this part
    pub fn nutrients(&self) -> NutrientProfile {
        self.food.calculate_nutrients(self.amount, &self.unit)
    }

    pub fn calories(&self) -> i64 {
        self.nutrients().calories()
    }

    /// Change the amount, and the unit when one is given. Only the owning
    /// recipe or meal may call this so it can recompute its totals.
    pub(crate) fn set_amount(&mut self, amount: f64, unit: Option<&str>) {
        self.amount = amount;
        if let Some(unit) = unit.filter(|u| !u.is_empty()) {
            self.unit = unit.to_string();
        }
    }

    /// Build from `{ id, food, amount, unit }`
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        let food_payload = payload
            .get("food")
            .filter(|f| f.is_object())
            .ok_or(PayloadError::MissingField("food"))?;
        let food = BaseFood::from_payload(food_payload)?;

        let mut unit = coerce_string(&payload["unit"]);
        if unit.is_empty() {
            unit = food.serving().unit.clone();
        }

        let mut id = coerce_string(&payload["id"]);
        if id.is_empty() {
            id = generate_id("part");
        }

        Ok(Self {
            id,
            food,
            amount: coerce_f64(&payload["amount"]),
            unit,
        })
    }

    pub fn to_payload(&self) -> Value {
        json!({
            "id": self.id,
            "food": self.food.to_payload(),
            "amount": self.amount,
            "unit": self.unit,
        })
    }
}
