//! Body weight model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::{Dated, Searchable, SortField, SortKey, Sortable};
use super::payload::{date_from_payload, date_to_payload, format_date, lenient_f64, lenient_string};

/// A body-weight reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "date_from_payload", serialize_with = "date_to_payload")]
    pub date: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pounds: f64,
}

impl Weight {
    pub fn new(id: impl Into<String>, date: DateTime<Utc>, pounds: f64) -> Self {
        Self {
            id: id.into(),
            date,
            pounds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightSortField {
    Date,
    Pounds,
}

impl SortField for WeightSortField {
    fn as_str(&self) -> &'static str {
        match self {
            WeightSortField::Date => "date",
            WeightSortField::Pounds => "pounds",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "date" => Some(WeightSortField::Date),
            "pounds" | "weight" => Some(WeightSortField::Pounds),
            _ => None,
        }
    }
}

impl Searchable for Weight {
    fn search_text(&self) -> String {
        format!("{} {}", format_date(&self.date), self.pounds)
    }
}

impl Sortable for Weight {
    type Field = WeightSortField;

    fn sort_key(&self, field: WeightSortField) -> SortKey {
        match field {
            WeightSortField::Date => SortKey::from(self.date),
            WeightSortField::Pounds => SortKey::from(self.pounds),
        }
    }
}

impl Dated for Weight {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }
}
