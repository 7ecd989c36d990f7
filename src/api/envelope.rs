//! Request and response envelopes
//!
//! Every call is a JSON body `{action, type, ...}` POSTed to the controller.
//! Responses come back as a one-element array whose first element carries
//! either `data` or `success: false` with a message.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiError, ApiResult};

/// Controller action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    List,
    Detail,
    Create,
    Update,
    Delete,
    BatchCreate,
    BatchUpdate,
    Search,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Detail => "detail",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::BatchCreate => "batch_create",
            Action::BatchUpdate => "batch_update",
            Action::Search => "search",
        }
    }
}

/// Body of one controller call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiRequest {
    pub action: Action,
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl ApiRequest {
    fn new(action: Action, entity_type: &str) -> Self {
        Self {
            action,
            entity_type: entity_type.to_string(),
            start: None,
            count: None,
            object: None,
            objects: None,
            query: None,
        }
    }

    pub fn list(entity_type: &str, start: usize, count: usize) -> Self {
        Self {
            start: Some(start),
            count: Some(count),
            ..Self::new(Action::List, entity_type)
        }
    }

    pub fn detail(entity_type: &str, id: &str) -> Self {
        Self {
            object: Some(serde_json::json!({ "id": id })),
            ..Self::new(Action::Detail, entity_type)
        }
    }

    pub fn create(entity_type: &str, object: Value) -> Self {
        Self {
            object: Some(object),
            ..Self::new(Action::Create, entity_type)
        }
    }

    pub fn update(entity_type: &str, object: Value) -> Self {
        Self {
            object: Some(object),
            ..Self::new(Action::Update, entity_type)
        }
    }

    pub fn delete(entity_type: &str, id: &str) -> Self {
        Self {
            object: Some(serde_json::json!({ "id": id })),
            ..Self::new(Action::Delete, entity_type)
        }
    }

    pub fn batch_create(entity_type: &str, objects: Vec<Value>) -> Self {
        Self {
            objects: Some(objects),
            ..Self::new(Action::BatchCreate, entity_type)
        }
    }

    pub fn batch_update(entity_type: &str, objects: Vec<Value>) -> Self {
        Self {
            objects: Some(objects),
            ..Self::new(Action::BatchUpdate, entity_type)
        }
    }

    pub fn search(entity_type: &str, query: &str) -> Self {
        Self {
            query: Some(query.to_string()),
            ..Self::new(Action::Search, entity_type)
        }
    }

    /// Reject bodies the controller could never act on
    pub fn validate(&self) -> ApiResult<()> {
        if self.entity_type.is_empty() {
            return Err(ApiError::InvalidRequest("entity type not set".into()));
        }
        let ok = match self.action {
            Action::List => true,
            Action::Detail | Action::Delete | Action::Create | Action::Update => self.object.is_some(),
            Action::BatchCreate | Action::BatchUpdate => self.objects.is_some(),
            Action::Search => self.query.is_some(),
        };
        if ok {
            Ok(())
        } else {
            Err(ApiError::InvalidRequest(format!(
                "{} request for {} is missing its body",
                self.action.as_str(),
                self.entity_type
            )))
        }
    }
}

/// Unwrap a decoded response body.
///
/// A non-empty array yields `[0].data` (null when absent), or a
/// [`ApiError::Rejected`] when `[0].success` is `false`. Anything else is
/// passed through unchanged.
pub fn unwrap_envelope(body: Value, status: Option<u16>) -> ApiResult<Value> {
    let Value::Array(mut items) = body else {
        return Ok(body);
    };
    if items.is_empty() {
        return Ok(Value::Array(items));
    }

    let mut first = items.swap_remove(0);
    if first.get("success") == Some(&Value::Bool(false)) {
        let message = first
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or("API request failed")
            .to_string();
        let errors = match first.get("errors") {
            Some(Value::Array(list)) => list
                .iter()
                .map(|e| e.as_str().map(str::to_string).unwrap_or_else(|| e.to_string()))
                .collect(),
            Some(Value::String(s)) => vec![s.clone()],
            _ => Vec::new(),
        };
        return Err(ApiError::Rejected {
            message,
            status,
            errors,
        });
    }

    Ok(first.get_mut("data").map(Value::take).unwrap_or(Value::Null))
}
