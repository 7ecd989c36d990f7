//! List filtering engine
//!
//! Search, sort, date-range and paging over in-memory lists. Every operation
//! takes a list by value and returns a list; a disabled filter hands its input
//! back untouched.

pub mod options;
pub mod range;
pub mod search;
pub mod sort;

use chrono::{DateTime, Utc};

pub use options::{title_case, FilterOptions, FilterOptionsPaging};
pub use range::{filter_date_range, FilterOptionsRange};
pub use search::{parse_terms, search_list};
pub use sort::{sort_list, Sort, SortDirection, SortField, SortKey, TextKey};

/// Items that can be matched by a free-text search
pub trait Searchable {
    /// The text search terms are matched against (case is ignored)
    fn search_text(&self) -> String;
}

/// Items that can be ordered by a closed set of fields
pub trait Sortable {
    type Field: SortField;

    fn sort_key(&self, field: Self::Field) -> SortKey;
}

/// Items that carry the date used by the range filter
pub trait Dated {
    fn date(&self) -> DateTime<Utc>;
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn search_text(&self) -> String {
        (**self).search_text()
    }
}

impl<T: Sortable + ?Sized> Sortable for &T {
    type Field = T::Field;

    fn sort_key(&self, field: Self::Field) -> SortKey {
        (**self).sort_key(field)
    }
}

impl<T: Dated + ?Sized> Dated for &T {
    fn date(&self) -> DateTime<Utc> {
        (**self).date()
    }
}
