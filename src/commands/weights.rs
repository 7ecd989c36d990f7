//! Body weight commands

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::ApiResult;
use crate::filter::{filter_date_range, FilterOptions, FilterOptionsPaging, Sort};
use crate::models::{round_to_tenth, Weight, WeightSortField};
use crate::services::Store;
use super::{ListArgs, ListResponse};

#[derive(Debug, Serialize)]
pub struct WeightSummary {
    pub id: String,
    pub date: DateTime<Utc>,
    pub pounds: f64,
}

impl From<&Weight> for WeightSummary {
    fn from(weight: &Weight) -> Self {
        Self {
            id: weight.id.clone(),
            date: weight.date,
            pounds: weight.pounds,
        }
    }
}

/// Change between the earliest and latest readings in a window
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct WeightTrend {
    pub readings: usize,
    pub first: f64,
    pub latest: f64,
    pub change: f64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl WeightTrend {
    pub fn from_readings(readings: &[&Weight]) -> Self {
        let sorted = Sort::asc(WeightSortField::Date).apply(readings.to_vec());
        let (Some(first), Some(latest)) = (sorted.first(), sorted.last()) else {
            return Self::default();
        };

        let total: f64 = sorted.iter().map(|w| w.pounds).sum();
        Self {
            readings: sorted.len(),
            first: first.pounds,
            latest: latest.pounds,
            change: round_to_tenth(latest.pounds - first.pounds),
            average: round_to_tenth(total / sorted.len() as f64),
            min: sorted.iter().map(|w| w.pounds).fold(f64::INFINITY, f64::min),
            max: sorted.iter().map(|w| w.pounds).fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WeightListResponse {
    #[serde(flatten)]
    pub list: ListResponse<WeightSummary>,
    pub trend: WeightTrend,
}

/// Readings after the list flags, plus the trend over every reading in the
/// selected window
pub async fn list_weights(store: &mut Store<Weight>, args: &ListArgs) -> ApiResult<WeightListResponse> {
    let options: FilterOptions<WeightSortField> = args.to_options();
    store.set_options(options);
    store.refresh().await?;

    let mut unpaged = store.options().clone();
    unpaged.page = FilterOptionsPaging::default();
    let matching = unpaged.apply_dated(store.service().cached().iter().collect::<Vec<_>>());
    let in_window = filter_date_range(store.options().range.as_ref(), store.service().cached().iter().collect::<Vec<_>>());

    let items = store.view_in_range().into_iter().map(WeightSummary::from).collect();
    Ok(WeightListResponse {
        list: ListResponse::new(items, matching.len()),
        trend: WeightTrend::from_readings(&in_window),
    })
}
