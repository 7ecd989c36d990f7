//! Inclusive date-window filter

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::Dated;

const MS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// A date window `[start, end]`, inclusive at both ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterOptionsRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub active: bool,
}

impl Default for FilterOptionsRange {
    fn default() -> Self {
        let now = Utc::now();
        Self::new(now, now)
    }
}

impl FilterOptionsRange {
    /// An active window between two instants
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            active: true,
        }
    }

    /// The whole of one calendar day (UTC)
    pub fn for_day(date: NaiveDate) -> Self {
        let start = date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
        let end = date
            .and_hms_milli_opt(23, 59, 59, 999)
            .map(|naive| Utc.from_utc_datetime(&naive));
        Self {
            start,
            end,
            active: true,
        }
    }

    /// Whole calendar days from `from` through `to` (UTC)
    pub fn for_days(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            start: Self::for_day(from).start,
            end: Self::for_day(to).end,
            active: true,
        }
    }

    pub fn set_active(&mut self, active: bool) -> &mut Self {
        self.active = active;
        self
    }

    /// Move the end bound `days` days after the start bound. The end is left
    /// unset when the result falls outside the representable dates.
    pub fn set_end_days_from_start(&mut self, days: i64) -> &mut Self {
        self.end = self
            .start
            .zip(Duration::try_days(days))
            .and_then(|(start, offset)| start.checked_add_signed(offset));
        self
    }

    /// Whole days between start and end (floored); 0 when a bound is unset
    pub fn days_between(&self) -> i64 {
        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                let diff_ms = (end - start).num_milliseconds();
                diff_ms.div_euclid(MS_PER_DAY)
            }
            _ => 0,
        }
    }

    /// Whether an instant falls inside the window. An unset bound never matches.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => instant >= start && instant <= end,
            _ => false,
        }
    }
}

/// Keep the items dated inside `range`. With no range, or an inactive one, the
/// input is returned unchanged.
pub fn filter_date_range<T: Dated>(range: Option<&FilterOptionsRange>, items: Vec<T>) -> Vec<T> {
    let Some(range) = range.filter(|r| r.active) else {
        return items;
    };

    items
        .into_iter()
        .filter(|item| range.contains(item.date()))
        .collect()
}
