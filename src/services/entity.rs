//! Entities the API stores
//!
//! Maps each model to its controller `type` and its raw record form.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::models::payload::format_date;
use crate::models::{Exercise, Food, Meal, PayloadError, Recipe, Weight};

/// A model persisted through the controller
pub trait Entity: Clone + Send + Sync + 'static {
    /// Controller `type` value
    const ENTITY_TYPE: &'static str;

    /// Records fetched by a plain list call
    const PAGE_SIZE: usize = 25;

    fn entity_id(&self) -> &str;

    fn from_record(record: &Value) -> Result<Self, PayloadError>;

    fn to_record(&self) -> Value;
}

impl Entity for Food {
    const ENTITY_TYPE: &'static str = "Foods";
    const PAGE_SIZE: usize = 100;

    fn entity_id(&self) -> &str {
        self.id()
    }

    fn from_record(record: &Value) -> Result<Self, PayloadError> {
        Ok(Food::from_payload(record))
    }

    fn to_record(&self) -> Value {
        self.to_payload()
    }
}

impl Entity for Recipe {
    const ENTITY_TYPE: &'static str = "Recipes";

    fn entity_id(&self) -> &str {
        self.id()
    }

    fn from_record(record: &Value) -> Result<Self, PayloadError> {
        Recipe::from_payload(record)
    }

    fn to_record(&self) -> Value {
        self.to_payload()
    }
}

impl Entity for Meal {
    const ENTITY_TYPE: &'static str = "Meals";

    fn entity_id(&self) -> &str {
        self.id()
    }

    fn from_record(record: &Value) -> Result<Self, PayloadError> {
        Meal::from_payload(record)
    }

    fn to_record(&self) -> Value {
        self.to_payload()
    }
}

impl Entity for Exercise {
    const ENTITY_TYPE: &'static str = "Exercises";

    fn entity_id(&self) -> &str {
        &self.id
    }

    fn from_record(record: &Value) -> Result<Self, PayloadError> {
        Exercise::from_payload(record)
    }

    fn to_record(&self) -> Value {
        self.to_payload()
    }
}

impl Entity for Weight {
    const ENTITY_TYPE: &'static str = "Weight";

    fn entity_id(&self) -> &str {
        &self.id
    }

    fn from_record(record: &Value) -> Result<Self, PayloadError> {
        Ok(Weight::deserialize(record)?)
    }

    fn to_record(&self) -> Value {
        json!({
            "id": self.id,
            "date": format_date(&self.date),
            "pounds": self.pounds,
        })
    }
}
