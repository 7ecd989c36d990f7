//! Exercise commands

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::ApiResult;
use crate::filter::{filter_date_range, FilterOptions, FilterOptionsPaging};
use crate::models::{
    average_weight, filter_by_name, filter_by_type, personal_record, total_volume, Exercise,
    ExerciseName, ExerciseSortField, ExerciseType,
};
use crate::services::Store;
use super::{ListArgs, ListResponse};

#[derive(Debug, Serialize)]
pub struct ExerciseSummary {
    pub id: String,
    pub date: DateTime<Utc>,
    pub activity: &'static str,
    pub name: String,
    pub sets: f64,
    pub reps: f64,
    pub weight: f64,
    pub volume: f64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub feedback: String,
}

impl From<&Exercise> for ExerciseSummary {
    fn from(exercise: &Exercise) -> Self {
        Self {
            id: exercise.id.clone(),
            date: exercise.date,
            activity: exercise.activity.as_str(),
            name: exercise.name.display_name(),
            sets: exercise.sets,
            reps: exercise.reps,
            weight: exercise.weight,
            volume: exercise.total_weight_moved(),
            feedback: exercise.feedback.clone(),
        }
    }
}

/// Progress figures for one movement
#[derive(Debug, Serialize)]
pub struct ExerciseStatsResponse {
    pub name: String,
    pub sessions: usize,
    pub total_volume: f64,
    pub average_weight: f64,
    pub personal_record: f64,
}

/// Exercises after the list flags, optionally only one activity type
pub async fn list_exercises(
    store: &mut Store<Exercise>,
    args: &ListArgs,
    activity: Option<ExerciseType>,
) -> ApiResult<ListResponse<ExerciseSummary>> {
    let options: FilterOptions<ExerciseSortField> = args.to_options();
    store.set_options(options);
    store.refresh().await?;

    let cached = store.service().cached();
    let candidates: Vec<&Exercise> = match activity {
        Some(activity) => filter_by_type(cached, activity),
        None => cached.iter().collect(),
    };

    let mut unpaged = store.options().clone();
    unpaged.page = FilterOptionsPaging::default();
    let total = unpaged.apply_dated(candidates.clone()).len();
    let items = store
        .options()
        .apply_dated(candidates)
        .into_iter()
        .map(ExerciseSummary::from)
        .collect();
    Ok(ListResponse::new(items, total))
}

/// Volume, average and best weight for `name`, within the `--from`/`--to`
/// window when one is given
pub async fn exercise_stats(
    store: &mut Store<Exercise>,
    name: ExerciseName,
    args: &ListArgs,
) -> ApiResult<ExerciseStatsResponse> {
    store.refresh().await?;

    let options: FilterOptions<ExerciseSortField> = args.to_options();
    let cached = store.service().cached();
    let named: Vec<Exercise> = filter_by_name(cached, name).into_iter().cloned().collect();

    let in_window: Vec<Exercise> = filter_date_range(options.range.as_ref(), named.iter().collect::<Vec<_>>())
        .into_iter()
        .cloned()
        .collect();

    Ok(ExerciseStatsResponse {
        name: name.display_name(),
        sessions: in_window.len(),
        total_volume: total_volume(&named, options.range.as_ref()),
        average_weight: average_weight(&in_window, name),
        personal_record: personal_record(&in_window, name),
    })
}
