//! CLI commands
//!
//! Each module loads one entity type through its service, shapes it with the
//! list filters and returns serializable response structs.

pub mod exercises;
pub mod foods;
pub mod meals;
pub mod recipes;
pub mod weights;

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use tracing::warn;

use crate::filter::{
    FilterOptions, FilterOptionsPaging, FilterOptionsRange, Sort, SortDirection, SortField,
};

/// Filter flags shared by every list command
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Comma-separated search terms; all must match
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Field to sort by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort direction: asc or desc
    #[arg(long, default_value = "desc")]
    pub direction: String,

    /// First day to include (YYYY-MM-DD); dated lists only
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD); defaults to `from`
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Items to skip
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Items to show (0 for all)
    #[arg(long, default_value_t = 0)]
    pub count: usize,

    /// Try the server's search action before searching locally
    #[arg(long)]
    pub server_search: bool,
}

impl ListArgs {
    /// Filter options for these flags. An unknown sort field is logged and
    /// leaves the list unsorted.
    pub fn to_options<F: SortField>(&self) -> FilterOptions<F> {
        let mut options = FilterOptions::new()
            .with_search(self.search.clone())
            .with_page(FilterOptionsPaging::new(self.offset, self.count));

        if let Some(name) = &self.sort {
            match F::parse(name) {
                Some(field) => {
                    options = options.with_sort(Sort::new(field, SortDirection::from_str(&self.direction)))
                }
                None => warn!("Unknown sort field '{}', leaving list unsorted", name),
            }
        }

        if let Some(from) = self.from {
            let to = self.to.unwrap_or(from);
            options = options.with_range(FilterOptionsRange::for_days(from, to));
        }

        options
    }
}

/// A page of list results
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(items: Vec<T>, total: usize) -> Self {
        Self { items, total }
    }
}
