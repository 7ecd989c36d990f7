//! Exercise model
//!
//! Strength, cardio and stretching log entries plus the volume statistics the
//! exercise views show.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::filter::{filter_date_range, Dated, FilterOptionsRange, Searchable, SortField, SortKey, Sortable};
use super::payload::{coerce_f64, coerce_string, format_date, parse_date, PayloadError};

/// Kind of activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExerciseType {
    #[default]
    Lift,
    Cardio,
    Stretch,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 3] = [ExerciseType::Lift, ExerciseType::Cardio, ExerciseType::Stretch];

    /// Position used on the wire
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Lift => "Lift",
            ExerciseType::Cardio => "Cardio",
            ExerciseType::Stretch => "Stretch",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lift" => Some(ExerciseType::Lift),
            "cardio" => Some(ExerciseType::Cardio),
            "stretch" => Some(ExerciseType::Stretch),
            _ => None,
        }
    }
}

/// The closed list of tracked movements, in wire-index order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExerciseName {
    // Chest
    #[default]
    BenchPress,
    CloseGripBenchPress,
    DumbellFly,
    // Shoulders
    OverheadBarbellPress,
    OverheadDumbellPress,
    DumbellFrontRaise,
    DumbellLateralRaise,
    // Arms
    TricepExtention,
    TricepPressDown,
    SkullCrushers,
    BicepCurl,
    // Back
    Deadlift,
    BarbellRow,
    DumbellRow,
    GoodMorning,
    LatPullDown,
    Shrugs,
    FacePulls,
    // Core
    Situp,
    LegRaise,
    Plank,
    // Legs
    Squat,
    SplitSquat,
    BodyweightSquat,
    Lunge,
    // Cardio
    Eliptical,
    DumbellSwings,
    Walk,
    // Stretches
    StretchNeckRollAround,
    StretchHamstringToeGrab,
    StretchCalf,
    StretchShoulders,
    StretchInnerThigh,
    StretchAnkles,
}

impl ExerciseName {
    pub const ALL: [ExerciseName; 34] = [
        ExerciseName::BenchPress,
        ExerciseName::CloseGripBenchPress,
        ExerciseName::DumbellFly,
        ExerciseName::OverheadBarbellPress,
        ExerciseName::OverheadDumbellPress,
        ExerciseName::DumbellFrontRaise,
        ExerciseName::DumbellLateralRaise,
        ExerciseName::TricepExtention,
        ExerciseName::TricepPressDown,
        ExerciseName::SkullCrushers,
        ExerciseName::BicepCurl,
        ExerciseName::Deadlift,
        ExerciseName::BarbellRow,
        ExerciseName::DumbellRow,
        ExerciseName::GoodMorning,
        ExerciseName::LatPullDown,
        ExerciseName::Shrugs,
        ExerciseName::FacePulls,
        ExerciseName::Situp,
        ExerciseName::LegRaise,
        ExerciseName::Plank,
        ExerciseName::Squat,
        ExerciseName::SplitSquat,
        ExerciseName::BodyweightSquat,
        ExerciseName::Lunge,
        ExerciseName::Eliptical,
        ExerciseName::DumbellSwings,
        ExerciseName::Walk,
        ExerciseName::StretchNeckRollAround,
        ExerciseName::StretchHamstringToeGrab,
        ExerciseName::StretchCalf,
        ExerciseName::StretchShoulders,
        ExerciseName::StretchInnerThigh,
        ExerciseName::StretchAnkles,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseName::BenchPress => "BenchPress",
            ExerciseName::CloseGripBenchPress => "CloseGripBenchPress",
            ExerciseName::DumbellFly => "DumbellFly",
            ExerciseName::OverheadBarbellPress => "OverheadBarbellPress",
            ExerciseName::OverheadDumbellPress => "OverheadDumbellPress",
            ExerciseName::DumbellFrontRaise => "DumbellFrontRaise",
            ExerciseName::DumbellLateralRaise => "DumbellLateralRaise",
            ExerciseName::TricepExtention => "TricepExtention",
            ExerciseName::TricepPressDown => "TricepPressDown",
            ExerciseName::SkullCrushers => "SkullCrushers",
            ExerciseName::BicepCurl => "BicepCurl",
            ExerciseName::Deadlift => "Deadlift",
            ExerciseName::BarbellRow => "BarbellRow",
            ExerciseName::DumbellRow => "DumbellRow",
            ExerciseName::GoodMorning => "GoodMorning",
            ExerciseName::LatPullDown => "LatPullDown",
            ExerciseName::Shrugs => "Shrugs",
            ExerciseName::FacePulls => "FacePulls",
            ExerciseName::Situp => "Situp",
            ExerciseName::LegRaise => "LegRaise",
            ExerciseName::Plank => "Plank",
            ExerciseName::Squat => "Squat",
            ExerciseName::SplitSquat => "SplitSquat",
            ExerciseName::BodyweightSquat => "BodyweightSquat",
            ExerciseName::Lunge => "Lunge",
            ExerciseName::Eliptical => "Eliptical",
            ExerciseName::DumbellSwings => "DumbellSwings",
            ExerciseName::Walk => "Walk",
            ExerciseName::StretchNeckRollAround => "StretchNeckRollAround",
            ExerciseName::StretchHamstringToeGrab => "StretchHamstringToeGrab",
            ExerciseName::StretchCalf => "StretchCalf",
            ExerciseName::StretchShoulders => "StretchShoulders",
            ExerciseName::StretchInnerThigh => "StretchInnerThigh",
            ExerciseName::StretchAnkles => "StretchAnkles",
        }
    }

    /// Words split on capitals: `CloseGripBenchPress` -> `Close Grip Bench Press`
    pub fn display_name(&self) -> String {
        let mut out = String::new();
        for (i, ch) in self.as_str().chars().enumerate() {
            if i > 0 && ch.is_uppercase() {
                out.push(' ');
            }
            out.push(ch);
        }
        out
    }

    /// Lookup ignoring case, spaces and underscores
    pub fn from_str(s: &str) -> Option<Self> {
        let wanted: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|n| n.as_str().to_lowercase() == wanted)
    }
}

/// One logged exercise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exercise {
    pub id: String,
    pub date: DateTime<Utc>,
    pub activity: ExerciseType,
    pub name: ExerciseName,
    pub sets: f64,
    pub reps: f64,
    pub weight: f64,
    pub feedback: String,
}

impl Exercise {
    pub fn new(id: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            date,
            activity: ExerciseType::default(),
            name: ExerciseName::default(),
            sets: 0.0,
            reps: 0.0,
            weight: 0.0,
            feedback: String::new(),
        }
    }

    pub fn with_exercise(mut self, activity: ExerciseType, name: ExerciseName) -> Self {
        self.activity = activity;
        self.name = name;
        self
    }

    pub fn with_details(mut self, weight: f64, sets: f64, reps: f64, feedback: impl Into<String>) -> Self {
        self.weight = weight;
        self.sets = sets;
        self.reps = reps;
        self.feedback = feedback.into();
        self
    }

    /// weight x reps x sets
    pub fn total_weight_moved(&self) -> f64 {
        self.weight * self.reps * self.sets
    }

    /// Build from a raw record. `activity` and `name` may be wire indices or
    /// names; when absent they take their defaults.
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        let date = parse_date(&coerce_string(&payload["date"]))?;
        let activity = enum_field(&payload["activity"], ExerciseType::from_index, ExerciseType::from_str)
            .map_err(PayloadError::UnknownExerciseType)?
            .unwrap_or_default();
        let name = enum_field(&payload["name"], ExerciseName::from_index, ExerciseName::from_str)
            .map_err(PayloadError::UnknownExerciseName)?
            .unwrap_or_default();

        Ok(Exercise::new(coerce_string(&payload["id"]), date)
            .with_exercise(activity, name)
            .with_details(
                coerce_f64(&payload["weight"]),
                coerce_f64(&payload["sets"]),
                coerce_f64(&payload["reps"]),
                coerce_string(&payload["feedback"]),
            ))
    }

    pub fn to_payload(&self) -> Value {
        json!({
            "id": self.id,
            "date": format_date(&self.date),
            "activity": self.activity.index(),
            "name": self.name.index(),
            "sets": self.sets,
            "reps": self.reps,
            "weight": self.weight,
            "feedback": self.feedback,
        })
    }
}

/// Resolve an enum carried as an index, a numeric string or a name.
/// `Ok(None)` when the field is absent; `Err` with the raw text when it is unknown.
fn enum_field<T>(
    value: &Value,
    from_index: fn(usize) -> Option<T>,
    from_name: fn(&str) -> Option<T>,
) -> Result<Option<T>, String> {
    let resolved = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_u64().and_then(|i| from_index(i as usize)),
        Value::String(s) => match s.trim().parse::<usize>() {
            Ok(i) => from_index(i),
            Err(_) => from_name(s),
        },
        _ => None,
    };
    resolved.map(Some).ok_or_else(|| value.to_string())
}

/// Fields exercises can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseSortField {
    Date,
    Activity,
    Name,
    Sets,
    Reps,
    Weight,
    Volume,
}

impl SortField for ExerciseSortField {
    fn as_str(&self) -> &'static str {
        match self {
            ExerciseSortField::Date => "date",
            ExerciseSortField::Activity => "activity",
            ExerciseSortField::Name => "name",
            ExerciseSortField::Sets => "sets",
            ExerciseSortField::Reps => "reps",
            ExerciseSortField::Weight => "weight",
            ExerciseSortField::Volume => "volume",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "date" => Some(ExerciseSortField::Date),
            "activity" | "type" => Some(ExerciseSortField::Activity),
            "name" => Some(ExerciseSortField::Name),
            "sets" => Some(ExerciseSortField::Sets),
            "reps" => Some(ExerciseSortField::Reps),
            "weight" => Some(ExerciseSortField::Weight),
            "volume" => Some(ExerciseSortField::Volume),
            _ => None,
        }
    }
}

impl Searchable for Exercise {
    fn search_text(&self) -> String {
        format!("{} {} {}", self.name.as_str(), self.activity.as_str(), self.feedback)
    }
}

impl Sortable for Exercise {
    type Field = ExerciseSortField;

    fn sort_key(&self, field: ExerciseSortField) -> SortKey {
        match field {
            ExerciseSortField::Date => SortKey::from(self.date),
            // Enum fields order by wire index
            ExerciseSortField::Activity => SortKey::from(self.activity.index() as i64),
            ExerciseSortField::Name => SortKey::from(self.name.index() as i64),
            ExerciseSortField::Sets => SortKey::from(self.sets),
            ExerciseSortField::Reps => SortKey::from(self.reps),
            ExerciseSortField::Weight => SortKey::from(self.weight),
            ExerciseSortField::Volume => SortKey::from(self.total_weight_moved()),
        }
    }
}

impl Dated for Exercise {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

pub fn filter_by_type(exercises: &[Exercise], activity: ExerciseType) -> Vec<&Exercise> {
    exercises.iter().filter(|e| e.activity == activity).collect()
}

pub fn filter_by_name(exercises: &[Exercise], name: ExerciseName) -> Vec<&Exercise> {
    exercises.iter().filter(|e| e.name == name).collect()
}

/// Total weight moved, optionally limited to a date window
pub fn total_volume(exercises: &[Exercise], range: Option<&FilterOptionsRange>) -> f64 {
    filter_date_range(range, exercises.iter().collect::<Vec<_>>())
        .iter()
        .map(|e| e.total_weight_moved())
        .sum()
}

/// Mean working weight for a movement, rounded; 0 when never logged
pub fn average_weight(exercises: &[Exercise], name: ExerciseName) -> f64 {
    let matching = filter_by_name(exercises, name);
    if matching.is_empty() {
        return 0.0;
    }
    let total: f64 = matching.iter().map(|e| e.weight).sum();
    (total / matching.len() as f64).round()
}

/// Heaviest weight logged for a movement; 0 when never logged
pub fn personal_record(exercises: &[Exercise], name: ExerciseName) -> f64 {
    filter_by_name(exercises, name)
        .iter()
        .map(|e| e.weight)
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::filter::{search_list, Sort};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, d, 18, 0, 0).unwrap()
    }

    fn log() -> Vec<Exercise> {
        vec![
            Exercise::new("1", day(1))
                .with_exercise(ExerciseType::Lift, ExerciseName::BenchPress)
                .with_details(135.0, 3.0, 10.0, "felt strong"),
            Exercise::new("2", day(3))
                .with_exercise(ExerciseType::Lift, ExerciseName::BenchPress)
                .with_details(150.0, 3.0, 8.0, ""),
            Exercise::new("3", day(4))
                .with_exercise(ExerciseType::Lift, ExerciseName::Squat)
                .with_details(185.0, 5.0, 5.0, "knees ok"),
            Exercise::new("4", day(5))
                .with_exercise(ExerciseType::Cardio, ExerciseName::Walk)
                .with_details(0.0, 1.0, 1.0, "30 minutes"),
        ]
    }

    #[test]
    fn test_name_table() {
        assert_eq!(ExerciseName::ALL.len(), 34);
        for (i, name) in ExerciseName::ALL.iter().enumerate() {
            assert_eq!(name.index(), i);
            assert_eq!(ExerciseName::from_index(i), Some(*name));
            assert_eq!(ExerciseName::from_str(name.as_str()), Some(*name));
        }
        assert_eq!(ExerciseName::from_index(34), None);
        assert_eq!(ExerciseName::StretchAnkles.index(), 33);
    }

    #[test]
    fn test_name_parsing_and_display() {
        assert_eq!(ExerciseName::from_str("close grip bench press"), Some(ExerciseName::CloseGripBenchPress));
        assert_eq!(ExerciseName::from_str("lat_pull_down"), Some(ExerciseName::LatPullDown));
        assert_eq!(ExerciseName::from_str("burpee"), None);
        assert_eq!(ExerciseName::CloseGripBenchPress.display_name(), "Close Grip Bench Press");
    }

    #[test]
    fn test_total_weight_moved() {
        let e = &log()[0];
        assert_eq!(e.total_weight_moved(), 4050.0);
    }

    #[test]
    fn test_from_payload_accepts_indices_and_names() {
        let by_index = Exercise::from_payload(&json!({
            "id": 9, "date": "2025-05-01", "activity": 0, "name": 21,
            "sets": "5", "reps": 5, "weight": 225, "feedback": null
        }))
        .unwrap();
        assert_eq!(by_index.id, "9");
        assert_eq!(by_index.name, ExerciseName::Squat);
        assert_eq!(by_index.sets, 5.0);
        assert_eq!(by_index.feedback, "");

        let by_name = Exercise::from_payload(&json!({
            "id": "10", "date": "2025-05-01", "activity": "Cardio", "name": "Walk"
        }))
        .unwrap();
        assert_eq!(by_name.activity, ExerciseType::Cardio);
        assert_eq!(by_name.name, ExerciseName::Walk);

        let defaults = Exercise::from_payload(&json!({ "id": "11", "date": "2025-05-01" })).unwrap();
        assert_eq!(defaults.activity, ExerciseType::Lift);
        assert_eq!(defaults.name, ExerciseName::BenchPress);
    }

    #[test]
    fn test_from_payload_rejects_unknown_enums() {
        let err = Exercise::from_payload(&json!({ "date": "2025-05-01", "activity": 7 })).unwrap_err();
        assert!(matches!(err, PayloadError::UnknownExerciseType(_)));

        let err = Exercise::from_payload(&json!({ "date": "2025-05-01", "name": "Burpee" })).unwrap_err();
        assert!(matches!(err, PayloadError::UnknownExerciseName(_)));
    }

    #[test]
    fn test_payload_round_trip() {
        let original = log().remove(2);
        let payload = original.to_payload();
        assert_eq!(payload["name"], 21);
        assert_eq!(Exercise::from_payload(&payload).unwrap(), original);
    }

    #[test]
    fn test_search_and_filters() {
        let list = log();
        assert_eq!(search_list("bench", list.iter().collect::<Vec<_>>()).len(), 2);
        assert_eq!(search_list("cardio", list.iter().collect::<Vec<_>>()).len(), 1);
        assert_eq!(search_list("KNEES", list.iter().collect::<Vec<_>>())[0].id, "3");
        assert_eq!(search_list("bench, strong", list.iter().collect::<Vec<_>>())[0].id, "1");
        assert_eq!(filter_by_type(&list, ExerciseType::Lift).len(), 3);
        assert_eq!(filter_by_name(&list, ExerciseName::Squat).len(), 1);
    }

    #[test]
    fn test_name_sorts_by_index() {
        let sorted = Sort::asc(ExerciseSortField::Name).apply(log());
        let names: Vec<_> = sorted.iter().map(|e| e.name).collect();
        assert_eq!(
            names,
            vec![ExerciseName::BenchPress, ExerciseName::BenchPress, ExerciseName::Squat, ExerciseName::Walk]
        );
        assert!(ExerciseName::Squat.index() < ExerciseName::Walk.index());

        let sorted = Sort::desc(ExerciseSortField::Activity).apply(log());
        assert_eq!(sorted[0].activity, ExerciseType::Cardio);
    }

    #[test]
    fn test_statistics() {
        let list = log();
        assert_eq!(total_volume(&list, None), 4050.0 + 3600.0 + 4625.0);

        let window = FilterOptionsRange::new(day(2), day(4));
        assert_eq!(total_volume(&list, Some(&window)), 3600.0 + 4625.0);

        assert_eq!(average_weight(&list, ExerciseName::BenchPress), 143.0);
        assert_eq!(average_weight(&list, ExerciseName::Deadlift), 0.0);
        assert_eq!(personal_record(&list, ExerciseName::BenchPress), 150.0);
        assert_eq!(personal_record(&list, ExerciseName::Plank), 0.0);
    }

    #[test]
    fn test_sort_by_volume() {
        let sorted = crate::filter::Sort::desc(ExerciseSortField::Volume).apply(log());
        let ids: Vec<_> = sorted.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2", "4"]);
    }
}
