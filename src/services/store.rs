//! List store
//!
//! Holds a service plus the filter options of one list view and re-applies
//! them to the cached items on every read.

use crate::api::ApiResult;
use crate::filter::{Dated, FilterOptions, Searchable, Sortable};
use super::{Entity, EntityService};

pub struct Store<E>
where
    E: Entity + Searchable + Sortable,
{
    service: EntityService<E>,
    options: FilterOptions<E::Field>,
}

impl<E> Store<E>
where
    E: Entity + Searchable + Sortable,
{
    pub fn new(service: EntityService<E>) -> Self {
        Self {
            service,
            options: FilterOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FilterOptions<E::Field>) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &FilterOptions<E::Field> {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut FilterOptions<E::Field> {
        &mut self.options
    }

    pub fn set_options(&mut self, options: FilterOptions<E::Field>) {
        self.options = options;
    }

    pub fn service(&self) -> &EntityService<E> {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut EntityService<E> {
        &mut self.service
    }

    /// Reload the first page from the server; returns how many items arrived
    pub async fn refresh(&mut self) -> ApiResult<usize> {
        let items = self.service.list_from_server(0, E::PAGE_SIZE).await?;
        Ok(items.len())
    }

    /// Cached items after search, sort and paging
    pub fn view(&self) -> Vec<&E> {
        self.options.apply(self.service.cached().iter().collect())
    }
}

impl<E> Store<E>
where
    E: Entity + Searchable + Sortable + Dated,
{
    /// Like [`Store::view`], also restricted to the configured date range
    pub fn view_in_range(&self) -> Vec<&E> {
        self.options.apply_dated(self.service.cached().iter().collect())
    }
}
