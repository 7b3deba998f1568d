//! Domain DTOs for the todo API.
//!
//! # Design
//! The backend keys records by `_id` and sends `createdAt` in camelCase; the
//! serde attributes below absorb both so the rest of the crate works with
//! plain Rust names. Ids are opaque strings: the client never mints one.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// Server-assigned todo identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    #[serde(rename = "_id", alias = "id")]
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// `createdAt` is display-only, so a bad value must not sink the record.
/// Accepts RFC 3339 strings and epoch milliseconds; anything else is `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    })
}

impl Todo {
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Done"
        } else {
            "Pending"
        }
    }
}

/// Envelope of `GET /todos`. A missing or `null` `todos` key reads as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoList {
    #[serde(default)]
    pub todos: Option<Vec<Todo>>,
}

impl TodoList {
    pub fn into_todos(self) -> Vec<Todo> {
        self.todos.unwrap_or_default()
    }
}

/// Body of create and update requests.
///
/// Only obtainable through [`TodoDraft::new`], so every draft that reaches
/// the wire has a non-blank title and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoDraft {
    title: String,
    description: String,
}

impl TodoDraft {
    /// Reject whitespace-only fields, title first. Accepted text is sent
    /// exactly as typed.
    pub fn new(title: &str, description: &str) -> Result<Self, ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(Self {
            title: title.to_string(),
            description: description.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Body of `PUT /completed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteTodo {
    pub id: TodoId,
}
