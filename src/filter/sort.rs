//! Typed multi-field sorting
//!
//! Each sortable entity names its fields with a closed enum. A field resolves
//! to a [`SortKey`] and keys compare by kind: numbers numerically, text by
//! collation key, dates chronologically. Missing keys always sort last.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::Sortable;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Unset; sorts like `Desc`
    None,
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::None => "none",
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => SortDirection::Asc,
            "desc" | "descending" => SortDirection::Desc,
            _ => SortDirection::None,
        }
    }
}

/// A closed set of field identifiers an entity can be sorted by
pub trait SortField: Copy + PartialEq + std::fmt::Debug + 'static {
    /// Stable name of the field (used for display and CLI parsing)
    fn as_str(&self) -> &'static str;

    /// Look a field up by name, ignoring case
    fn parse(name: &str) -> Option<Self>;
}

/// Collation key for text.
///
/// Letters compare by their base form first, so accents and case never move a
/// word past an unaccented neighbour; `"Éclair"` sorts between `"apple"` and
/// `"zebra"`. Words equal on base letters fall back to the accented form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TextKey {
    base: String,
    accented: String,
}

impl TextKey {
    pub fn new(value: &str) -> Self {
        let accented = value.to_lowercase();
        let base = accented.nfd().filter(|c| !is_combining_mark(*c)).collect();
        Self { base, accented }
    }
}

/// Value a list item exposes for one sort field
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Missing,
    Number(f64),
    Text(TextKey),
    Date(DateTime<Utc>),
}

impl SortKey {
    /// Text key, compared case- and accent-insensitively
    pub fn text(value: &str) -> Self {
        SortKey::Text(TextKey::new(value))
    }

    /// Text key that is [`SortKey::Missing`] when empty
    pub fn optional_text(value: &str) -> Self {
        if value.is_empty() {
            SortKey::Missing
        } else {
            SortKey::text(value)
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, SortKey::Missing)
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Text(_) => 1,
            SortKey::Date(_) => 2,
            SortKey::Missing => 3,
        }
    }

    /// Ascending comparison of two present keys. Keys of different kinds fall
    /// back to a fixed kind order so the comparison stays total.
    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<f64> for SortKey {
    fn from(value: f64) -> Self {
        SortKey::Number(value)
    }
}

impl From<i64> for SortKey {
    fn from(value: i64) -> Self {
        SortKey::Number(value as f64)
    }
}

impl From<DateTime<Utc>> for SortKey {
    fn from(value: DateTime<Utc>) -> Self {
        SortKey::Date(value)
    }
}

/// Active sort field and direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sort<F: SortField> {
    /// Field to sort by; `None` disables sorting
    pub active: Option<F>,
    pub direction: SortDirection,
}

impl<F: SortField> Default for Sort<F> {
    fn default() -> Self {
        Self {
            active: None,
            direction: SortDirection::Desc,
        }
    }
}

impl<F: SortField> Sort<F> {
    pub fn new(active: F, direction: SortDirection) -> Self {
        Self {
            active: Some(active),
            direction,
        }
    }

    pub fn asc(active: F) -> Self {
        Self::new(active, SortDirection::Asc)
    }

    pub fn desc(active: F) -> Self {
        Self::new(active, SortDirection::Desc)
    }

    pub fn set_direction(&mut self, direction: SortDirection) -> &mut Self {
        self.direction = direction;
        self
    }

    /// Asc -> Desc -> Asc; an unsorted list starts ascending
    pub fn toggle_direction(&mut self) {
        self.direction = match self.direction {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
            SortDirection::None => SortDirection::Asc,
        };
    }

    /// Sort a list by the active field.
    ///
    /// With no active field the input is returned as is. Any direction other
    /// than `Asc` sorts descending. The sort is stable: items with equal keys
    /// keep their relative order.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T>
    where
        T: Sortable<Field = F>,
    {
        let Some(field) = self.active else {
            return items;
        };
        let descending = self.direction != SortDirection::Asc;

        let mut keyed: Vec<(SortKey, T)> = items
            .into_iter()
            .map(|item| (item.sort_key(field), item))
            .collect();

        keyed.sort_by(|(a, _), (b, _)| match (a.is_missing(), b.is_missing()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ordering = a.compare(b);
                if descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            }
        });

        keyed.into_iter().map(|(_, item)| item).collect()
    }
}

/// Sort a list by `sort`; see [`Sort::apply`]
pub fn sort_list<T: Sortable>(sort: &Sort<T::Field>, items: Vec<T>) -> Vec<T> {
    sort.apply(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum RowField {
        W,
        Label,
        When,
    }

    impl SortField for RowField {
        fn as_str(&self) -> &'static str {
            match self {
                RowField::W => "w",
                RowField::Label => "label",
                RowField::When => "when",
            }
        }

        fn parse(name: &str) -> Option<Self> {
            match name.to_lowercase().as_str() {
                "w" => Some(RowField::W),
                "label" => Some(RowField::Label),
                "when" => Some(RowField::When),
                _ => None,
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        w: Option<f64>,
        label: &'static str,
        when: i64,
    }

    fn row(w: f64, label: &'static str) -> Row {
        Row { w: Some(w), label, when: 0 }
    }

    impl Sortable for Row {
        type Field = RowField;

        fn sort_key(&self, field: RowField) -> SortKey {
            match field {
                RowField::W => self.w.map(SortKey::Number).unwrap_or(SortKey::Missing),
                RowField::Label => SortKey::optional_text(self.label),
                RowField::When => SortKey::Date(Utc.timestamp_opt(self.when, 0).unwrap()),
            }
        }
    }

    fn weights(rows: &[Row]) -> Vec<Option<f64>> {
        rows.iter().map(|r| r.w).collect()
    }

    #[test]
    fn test_numeric_ascending_and_descending() {
        let rows = vec![row(30.0, "a"), row(10.0, "b"), row(20.0, "c")];

        let asc = Sort::asc(RowField::W).apply(rows.clone());
        assert_eq!(weights(&asc), vec![Some(10.0), Some(20.0), Some(30.0)]);

        let desc = Sort::desc(RowField::W).apply(rows);
        assert_eq!(weights(&desc), vec![Some(30.0), Some(20.0), Some(10.0)]);
    }

    #[test]
    fn test_no_active_field_is_noop() {
        let rows = vec![row(3.0, "a"), row(1.0, "b")];
        let sort: Sort<RowField> = Sort::default();
        assert_eq!(sort.apply(rows.clone()), rows);
    }

    #[test]
    fn test_direction_none_sorts_descending() {
        let rows = vec![row(30.0, "a"), row(10.0, "b"), row(20.0, "c")];
        let sorted = Sort::new(RowField::W, SortDirection::None).apply(rows);
        assert_eq!(weights(&sorted), vec![Some(30.0), Some(20.0), Some(10.0)]);
    }

    #[test]
    fn test_missing_sorts_last_in_both_directions() {
        let rows = vec![
            Row { w: None, label: "x", when: 0 },
            row(2.0, "a"),
            row(1.0, "b"),
        ];

        let asc = Sort::asc(RowField::W).apply(rows.clone());
        assert_eq!(weights(&asc), vec![Some(1.0), Some(2.0), None]);

        let desc = Sort::desc(RowField::W).apply(rows);
        assert_eq!(weights(&desc), vec![Some(2.0), Some(1.0), None]);
    }

    #[test]
    fn test_text_is_case_insensitive() {
        let rows = vec![row(0.0, "banana"), row(0.0, "Apple"), row(0.0, "cherry")];
        let sorted = Sort::asc(RowField::Label).apply(rows);
        let labels: Vec<_> = sorted.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_accented_text_sorts_with_base_letter() {
        let rows = vec![row(0.0, "zebra"), row(0.0, "Éclair"), row(0.0, "apple")];
        let sorted = Sort::asc(RowField::Label).apply(rows);
        let labels: Vec<_> = sorted.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["apple", "Éclair", "zebra"]);

        let rows = vec![row(0.0, "crème brûlée"), row(0.0, "creme"), row(0.0, "cremini")];
        let sorted = Sort::asc(RowField::Label).apply(rows);
        let labels: Vec<_> = sorted.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["creme", "crème brûlée", "cremini"]);
    }

    #[test]
    fn test_text_key_ties_break_on_accent() {
        assert!(TextKey::new("resume") < TextKey::new("Résumé"));
        assert_eq!(TextKey::new("ÉCLAIR"), TextKey::new("éclair"));
    }

    #[test]
    fn test_dates_sort_chronologically() {
        let rows = vec![
            Row { w: Some(1.0), label: "late", when: 2_000 },
            Row { w: Some(2.0), label: "early", when: 1_000 },
        ];
        let sorted = Sort::asc(RowField::When).apply(rows);
        assert_eq!(sorted[0].label, "early");
    }

    #[test]
    fn test_stable_for_ties() {
        let rows = vec![row(1.0, "first"), row(0.0, "zero"), row(1.0, "second"), row(1.0, "third")];
        let asc = Sort::asc(RowField::W).apply(rows.clone());
        let labels: Vec<_> = asc.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["zero", "first", "second", "third"]);

        let desc = Sort::desc(RowField::W).apply(rows);
        let labels: Vec<_> = desc.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["first", "second", "third", "zero"]);
    }

    #[test]
    fn test_idempotent() {
        let rows = vec![row(5.0, "a"), row(3.0, "b"), row(9.0, "c"), row(3.0, "d")];
        let sort = Sort::asc(RowField::W);
        let once = sort.apply(rows);
        let twice = sort.apply(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_reversing_direction_reverses_distinct_keys() {
        let rows = vec![row(5.0, "a"), row(3.0, "b"), row(9.0, "c"), row(1.0, "d")];
        let mut sort = Sort::asc(RowField::W);
        let asc = sort.apply(rows.clone());
        sort.toggle_direction();
        let mut desc = sort.apply(rows);
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_toggle_direction_cycle() {
        let mut sort = Sort::new(RowField::W, SortDirection::None);
        sort.toggle_direction();
        assert_eq!(sort.direction, SortDirection::Asc);
        sort.toggle_direction();
        assert_eq!(sort.direction, SortDirection::Desc);
        sort.toggle_direction();
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_mixed_kinds_do_not_panic() {
        let keys = [SortKey::Number(1.0), SortKey::text("a"), SortKey::Number(f64::NAN)];
        for a in &keys {
            for b in &keys {
                let _ = a.compare(b);
            }
        }
        assert_eq!(SortKey::Number(1.0).compare(&SortKey::text("a")), Ordering::Less);
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!(SortDirection::from_str("ASC"), SortDirection::Asc);
        assert_eq!(SortDirection::from_str("descending"), SortDirection::Desc);
        assert_eq!(SortDirection::from_str("sideways"), SortDirection::None);
    }
}
