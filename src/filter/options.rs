//! Filter options: search, sort, date range and paging for one list view

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::range::{filter_date_range, FilterOptionsRange};
use super::search::search_list;
use super::sort::{Sort, SortField};
use super::{Dated, Searchable, Sortable};

/// Window of a list to show; `count == 0` shows everything after `offset`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptionsPaging {
    pub offset: usize,
    pub count: usize,
}

impl FilterOptionsPaging {
    pub fn new(offset: usize, count: usize) -> Self {
        Self { offset, count }
    }

    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        if self.offset == 0 && self.count == 0 {
            return items;
        }
        let iter = items.into_iter().skip(self.offset);
        if self.count == 0 {
            iter.collect()
        } else {
            iter.take(self.count).collect()
        }
    }
}

/// Everything that shapes one list view
#[derive(Debug, Clone)]
pub struct FilterOptions<F: SortField> {
    pub preset: String,
    /// Comma-separated search terms, all of which must match
    pub search: String,
    pub sort: Sort<F>,
    pub range: Option<FilterOptionsRange>,
    pub page: FilterOptionsPaging,
}

impl<F: SortField> Default for FilterOptions<F> {
    fn default() -> Self {
        Self {
            preset: String::new(),
            search: String::new(),
            sort: Sort::default(),
            range: None,
            page: FilterOptionsPaging::default(),
        }
    }
}

impl<F: SortField> FilterOptions<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = preset.into();
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_sort(mut self, sort: Sort<F>) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_range(mut self, range: FilterOptionsRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_page(mut self, page: FilterOptionsPaging) -> Self {
        self.page = page;
        self
    }

    pub fn search_list<T: Searchable>(&self, items: Vec<T>) -> Vec<T> {
        search_list(&self.search, items)
    }

    pub fn sort_list<T: Sortable<Field = F>>(&self, items: Vec<T>) -> Vec<T> {
        self.sort.apply(items)
    }

    pub fn filter_date_range<T: Dated>(&self, items: Vec<T>) -> Vec<T> {
        filter_date_range(self.range.as_ref(), items)
    }

    pub fn page_list<T>(&self, items: Vec<T>) -> Vec<T> {
        self.page.apply(items)
    }

    /// search -> sort -> page
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T>
    where
        T: Searchable + Sortable<Field = F>,
    {
        let items = self.search_list(items);
        let items = self.sort_list(items);
        self.page_list(items)
    }

    /// search -> sort -> date range -> page
    pub fn apply_dated<T>(&self, items: Vec<T>) -> Vec<T>
    where
        T: Searchable + Sortable<Field = F> + Dated,
    {
        let items = self.search_list(items);
        let items = self.sort_list(items);
        let items = self.filter_date_range(items);
        self.page_list(items)
    }

    pub fn display_preset(&self) -> String {
        title_case(&self.preset)
    }

    pub fn display_active_sort(&self) -> String {
        self.sort
            .active
            .map(|field| title_case(field.as_str()))
            .unwrap_or_default()
    }

    pub fn display_search_term(&self) -> String {
        title_case(&self.search)
    }

    /// `YYYY-MM-DD`, or a placeholder when no range is configured
    pub fn display_date(&self, date: &DateTime<Utc>) -> String {
        if self.range.is_none() {
            return "Invalid Start Date".to_string();
        }
        date.format("%Y-%m-%d").to_string()
    }
}

/// Upper-case the first ASCII word character of each whitespace-separated
/// word and lower-case the rest of it. Leading non-ASCII letters are kept as
/// they are, so `"élan"` becomes `"éLan"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for ch in s.chars() {
        if ch.is_whitespace() {
            in_word = false;
            out.push(ch);
        } else if in_word {
            out.extend(ch.to_lowercase());
        } else if ch.is_ascii_alphanumeric() || ch == '_' {
            in_word = true;
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
    }

    out
}
