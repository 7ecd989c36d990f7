//! Entity service
//!
//! CRUD round-trips for one entity type, backed by a local cache of the last
//! list fetched and everything created or updated since.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{ApiError, ApiRequest, ApiResult, Transport};
use crate::filter::{search_list, Searchable};
use super::Entity;

/// Client-side service for one entity type
pub struct EntityService<E: Entity> {
    transport: Arc<dyn Transport>,
    cache: Vec<E>,
}

impl<E: Entity> EntityService<E> {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            cache: Vec::new(),
        }
    }

    pub fn entity_type(&self) -> &'static str {
        E::ENTITY_TYPE
    }

    /// Everything currently cached
    pub fn cached(&self) -> &[E] {
        &self.cache
    }

    pub fn find_cached(&self, id: &str) -> Option<&E> {
        self.cache.iter().find(|e| e.entity_id() == id)
    }

    /// Fetch a page and replace the cache with it
    pub async fn list_from_server(&mut self, start: usize, count: usize) -> ApiResult<&[E]> {
        let data = self
            .transport
            .send(&ApiRequest::list(E::ENTITY_TYPE, start, count))
            .await?;
        let items = decode_all::<E>(records(data, "list", E::ENTITY_TYPE)?)?;
        debug!("Fetched {} {}", items.len(), E::ENTITY_TYPE);
        self.cache = items;
        Ok(&self.cache)
    }

    /// Cached item when present, otherwise a detail call
    pub async fn get_by_id(&self, id: &str) -> ApiResult<E> {
        if let Some(hit) = self.find_cached(id) {
            debug!("{} {} served from cache", E::ENTITY_TYPE, id);
            return Ok(hit.clone());
        }
        self.get_from_server_by_id(id).await
    }

    pub async fn get_from_server_by_id(&self, id: &str) -> ApiResult<E> {
        let data = self
            .transport
            .send(&ApiRequest::detail(E::ENTITY_TYPE, id))
            .await?;

        let first = match data {
            Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
            _ => {
                return Err(ApiError::NotFound {
                    entity: E::ENTITY_TYPE.to_string(),
                    id: id.to_string(),
                })
            }
        };
        Ok(E::from_record(&first)?)
    }

    /// Create on the server; the stored record (or the submitted one when the
    /// server answers with an empty list) is cached if its id is new
    pub async fn create(&mut self, item: &E) -> ApiResult<E> {
        let record = item.to_record();
        let data = self
            .transport
            .send(&ApiRequest::create(E::ENTITY_TYPE, record.clone()))
            .await?;
        let created = E::from_record(&confirmed(data, record, "create", E::ENTITY_TYPE)?)?;

        if self.find_cached(created.entity_id()).is_none() {
            self.cache.push(created.clone());
        }
        Ok(created)
    }

    /// Update on the server and replace the cached copy
    pub async fn update(&mut self, item: &E) -> ApiResult<E> {
        let record = item.to_record();
        let data = self
            .transport
            .send(&ApiRequest::update(E::ENTITY_TYPE, record.clone()))
            .await?;
        let updated = E::from_record(&confirmed(data, record, "update", E::ENTITY_TYPE)?)?;

        self.replace_cached(updated.clone());
        Ok(updated)
    }

    /// Delete on the server and evict from the cache
    pub async fn delete(&mut self, id: &str) -> ApiResult<()> {
        self.transport
            .send(&ApiRequest::delete(E::ENTITY_TYPE, id))
            .await?;
        self.cache.retain(|e| e.entity_id() != id);
        Ok(())
    }

    pub async fn batch_create(&mut self, items: &[E]) -> ApiResult<Vec<E>> {
        let submitted: Vec<Value> = items.iter().map(Entity::to_record).collect();
        let data = self
            .transport
            .send(&ApiRequest::batch_create(E::ENTITY_TYPE, submitted.clone()))
            .await?;
        let created = decode_all::<E>(batch_confirmed(data, submitted, "batch_create")?)?;

        for item in &created {
            if self.find_cached(item.entity_id()).is_none() {
                self.cache.push(item.clone());
            }
        }
        Ok(created)
    }

    pub async fn batch_update(&mut self, items: &[E]) -> ApiResult<Vec<E>> {
        let submitted: Vec<Value> = items.iter().map(Entity::to_record).collect();
        let data = self
            .transport
            .send(&ApiRequest::batch_update(E::ENTITY_TYPE, submitted.clone()))
            .await?;
        let updated = decode_all::<E>(batch_confirmed(data, submitted, "batch_update")?)?;

        for item in &updated {
            self.replace_cached(item.clone());
        }
        Ok(updated)
    }

    fn replace_cached(&mut self, item: E) {
        if let Some(slot) = self
            .cache
            .iter_mut()
            .find(|e| e.entity_id() == item.entity_id())
        {
            *slot = item;
        }
    }
}

impl<E: Entity + Searchable> EntityService<E> {
    /// Search by name and brand. With `server` set the controller's search
    /// action is tried first; on failure the cached list is searched instead.
    pub async fn search(&self, query: &str, server: bool) -> ApiResult<Vec<E>> {
        if server {
            let result = self
                .transport
                .send(&ApiRequest::search(E::ENTITY_TYPE, query))
                .await
                .and_then(|data| records(data, "search", E::ENTITY_TYPE))
                .and_then(decode_all::<E>);
            match result {
                Ok(items) => return Ok(items),
                Err(e) => warn!(
                    "Server search for {} failed, falling back to local search: {}",
                    E::ENTITY_TYPE,
                    e
                ),
            }
        }

        Ok(search_list(query, self.cache.clone()))
    }
}

/// A list payload; null counts as empty
fn records(data: Value, action: &str, entity_type: &str) -> ApiResult<Vec<Value>> {
    match data {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        other => Err(ApiError::UnexpectedResponse(format!(
            "{action} {entity_type}: expected a list, got {other}"
        ))),
    }
}

/// First returned record, or the submitted one when the server returned none
fn confirmed(data: Value, submitted: Value, action: &str, entity_type: &str) -> ApiResult<Value> {
    match data {
        Value::Array(mut items) if !items.is_empty() => Ok(items.swap_remove(0)),
        Value::Array(_) => Ok(submitted),
        _ => Err(ApiError::UnexpectedResponse(format!(
            "Failed to {action} {entity_type}"
        ))),
    }
}

fn batch_confirmed(data: Value, submitted: Vec<Value>, action: &str) -> ApiResult<Vec<Value>> {
    let items = records(data, action, "batch")?;
    if items.is_empty() {
        Ok(submitted)
    } else {
        Ok(items)
    }
}

fn decode_all<E: Entity>(records: Vec<Value>) -> ApiResult<Vec<E>> {
    records
        .iter()
        .map(|r| E::from_record(r).map_err(ApiError::from))
        .collect()
}
