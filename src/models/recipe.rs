//! Recipe model
//!
//! A compound food whose nutrition is the sum of its parts.

use serde::Serialize;
use serde_json::{json, Value};

use crate::filter::{Searchable, SortKey, Sortable};
use super::food::{food_sort_key, FoodSortField, FoodType, NutrientSource, ServingInfo};
use super::part::Part;
use super::payload::{coerce_string, PayloadError};
use super::NutrientProfile;

/// Serving unit every recipe reports
pub const RECIPE_UNIT: &str = "recipe";

/// A recipe made of parts.
///
/// `nutrients` is recomputed by every method that changes `parts`, so the
/// stored profile always equals the sum of the parts' contributions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    id: String,
    pub name: String,
    pub brand: String,
    serving: ServingInfo,
    parts: Vec<Part>,
    nutrients: NutrientProfile,
}

impl Recipe {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            brand: String::new(),
            serving: ServingInfo::new(1.0, RECIPE_UNIT),
            parts: Vec::new(),
            nutrients: NutrientProfile::zero(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn food_type(&self) -> FoodType {
        FoodType::Compound
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn get_part(&self, part_id: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.id() == part_id)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn with_part(mut self, part: Part) -> Self {
        self.add_part(part);
        self
    }

    pub fn add_part(&mut self, part: Part) -> &mut Self {
        self.parts.push(part);
        self.update_nutrients();
        self
    }

    /// Remove a part by id, returning it if it was present
    pub fn remove_part(&mut self, part_id: &str) -> Option<Part> {
        let index = self.parts.iter().position(|p| p.id() == part_id)?;
        let removed = self.parts.remove(index);
        self.update_nutrients();
        Some(removed)
    }

    /// Remove every part that uses the given food; returns how many went
    pub fn remove_parts_with_food(&mut self, food_id: &str) -> usize {
        let before = self.parts.len();
        self.parts.retain(|p| p.food().id() != food_id);
        let removed = before - self.parts.len();
        if removed > 0 {
            self.update_nutrients();
        }
        removed
    }

    /// Change a part's amount (and unit, if given). Returns false when no
    /// part has that id.
    pub fn update_part(&mut self, part_id: &str, amount: f64, unit: Option<&str>) -> bool {
        let Some(part) = self.parts.iter_mut().find(|p| p.id() == part_id) else {
            return false;
        };
        part.set_amount(amount, unit);
        self.update_nutrients();
        true
    }

    pub fn set_parts(&mut self, parts: Vec<Part>) -> &mut Self {
        self.parts = parts;
        self.update_nutrients();
        self
    }

    fn update_nutrients(&mut self) {
        self.nutrients = self.parts.iter().map(Part::nutrients).sum();
    }

    /// Build from `{ id, name, brand, parts }`. Older records call the parts
    /// `ingredients`.
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        let raw_parts = payload
            .get("parts")
            .or_else(|| payload.get("ingredients"))
            .and_then(Value::as_array);

        let parts = match raw_parts {
            Some(items) => items
                .iter()
                .map(Part::from_payload)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let mut recipe = Recipe::new(coerce_string(&payload["id"]))
            .with_name(coerce_string(&payload["name"]))
            .with_brand(coerce_string(&payload["brand"]));
        recipe.set_parts(parts);
        Ok(recipe)
    }

    pub fn to_payload(&self) -> Value {
        let mut record = json!({
            "id": self.id,
            "name": self.name,
            "type": FoodType::Compound.as_str(),
            "parts": self.parts.iter().map(Part::to_payload).collect::<Vec<_>>(),
        });
        if !self.brand.is_empty() {
            record["brand"] = json!(self.brand);
        }
        record
    }
}

impl NutrientSource for Recipe {
    fn serving(&self) -> &ServingInfo {
        &self.serving
    }

    fn nutrients(&self) -> &NutrientProfile {
        &self.nutrients
    }
}

impl Searchable for Recipe {
    fn search_text(&self) -> String {
        format!("{} {}", self.name, self.brand)
    }
}

impl Sortable for Recipe {
    type Field = FoodSortField;

    fn sort_key(&self, field: FoodSortField) -> SortKey {
        food_sort_key(self, &self.name, &self.brand, field)
    }
}
