//! Meal model
//!
//! A dated, named list of food entries with running totals.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::filter::{Dated, Searchable, SortField, SortKey, Sortable};
use super::food::BaseFood;
use super::part::{generate_id, MealEntry};
use super::payload::{coerce_string, format_date, parse_date, PayloadError};
use super::{MacroBreakdown, Nutrient, NutrientProfile};

/// A meal eaten at a point in time.
///
/// `totals` is recomputed by every method that changes `entries`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meal {
    id: String,
    pub name: String,
    date: DateTime<Utc>,
    entries: Vec<MealEntry>,
    totals: NutrientProfile,
}

impl Meal {
    pub fn new(id: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            date,
            entries: Vec::new(),
            totals: NutrientProfile::zero(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn entries(&self) -> &[MealEntry] {
        &self.entries
    }

    pub fn totals(&self) -> &NutrientProfile {
        &self.totals
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn set_date(&mut self, date: DateTime<Utc>) -> &mut Self {
        self.date = date;
        self
    }

    /// Log an amount of a food; the new entry gets an `entry_` id
    pub fn add_entry(
        &mut self,
        food: impl Into<BaseFood>,
        amount: f64,
        unit: impl Into<String>,
    ) -> &MealEntry {
        let entry = MealEntry::with_id(generate_id("entry"), food, amount, unit);
        self.push_entry(entry)
    }

    /// Add an entry that already has an id
    pub fn push_entry(&mut self, entry: MealEntry) -> &MealEntry {
        self.entries.push(entry);
        self.update_totals();
        let last = self.entries.len() - 1;
        &self.entries[last]
    }

    pub fn remove_entry(&mut self, entry_id: &str) -> Option<MealEntry> {
        let index = self.entries.iter().position(|e| e.id() == entry_id)?;
        let removed = self.entries.remove(index);
        self.update_totals();
        Some(removed)
    }

    pub fn update_entry(&mut self, entry_id: &str, amount: f64, unit: Option<&str>) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id() == entry_id) else {
            return false;
        };
        entry.set_amount(amount, unit);
        self.update_totals();
        true
    }

    fn update_totals(&mut self) {
        self.totals = self.entries.iter().map(MealEntry::nutrients).sum();
    }

    /// Sum of each entry's rounded calories
    pub fn total_calories(&self) -> i64 {
        self.entries.iter().map(MealEntry::calories).sum()
    }

    /// Calories of the summed totals
    pub fn calories(&self) -> i64 {
        self.totals.calories()
    }

    pub fn macro_breakdown(&self) -> MacroBreakdown {
        self.totals.macro_breakdown()
    }

    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        let date = parse_date(&coerce_string(&payload["date"]))?;

        let mut meal = Meal::new(coerce_string(&payload["id"]), date)
            .with_name(coerce_string(&payload["name"]));

        if let Some(entries) = payload.get("entries").and_then(Value::as_array) {
            meal.entries = entries
                .iter()
                .map(MealEntry::from_payload)
                .collect::<Result<Vec<_>, _>>()?;
            meal.update_totals();
        }

        Ok(meal)
    }

    pub fn to_payload(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "date": format_date(&self.date),
            "entries": self.entries.iter().map(MealEntry::to_payload).collect::<Vec<_>>(),
        })
    }
}

/// Fields meals can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealSortField {
    Date,
    Name,
    Calories,
    Nutrient(Nutrient),
}

impl SortField for MealSortField {
    fn as_str(&self) -> &'static str {
        match self {
            MealSortField::Date => "date",
            MealSortField::Name => "name",
            MealSortField::Calories => "calories",
            MealSortField::Nutrient(n) => n.as_str(),
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "date" => Some(MealSortField::Date),
            "name" => Some(MealSortField::Name),
            "calories" => Some(MealSortField::Calories),
            _ => Nutrient::from_str(name).map(MealSortField::Nutrient),
        }
    }
}

impl Searchable for Meal {
    fn search_text(&self) -> String {
        self.name.clone()
    }
}

impl Sortable for Meal {
    type Field = MealSortField;

    fn sort_key(&self, field: MealSortField) -> SortKey {
        match field {
            MealSortField::Date => SortKey::from(self.date),
            MealSortField::Name => SortKey::optional_text(&self.name),
            MealSortField::Calories => SortKey::from(self.total_calories()),
            MealSortField::Nutrient(n) => SortKey::from(self.totals.get(n)),
        }
    }
}

impl Dated for Meal {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }
}
