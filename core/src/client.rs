//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`; the host executes the round-trip in
//! between. Create and update validate their draft before a request exists,
//! so a blank field never costs a network call.
//!
//! Write endpoints only promise a 2xx status. When the body happens to carry
//! the affected todo (bare, or wrapped as `{"todo": ...}`) it is returned,
//! otherwise the parse yields `None` rather than failing.

use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CompleteTodo, Todo, TodoDraft, TodoId, TodoList};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl Default for TodoClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.url("/todos"))
    }

    pub fn build_create_todo(&self, draft: &TodoDraft) -> Result<HttpRequest, ApiError> {
        let body = to_json(draft)?;
        debug!(title = draft.title(), "building create request");
        Ok(HttpRequest::new(HttpMethod::Post, self.url("/todo")).with_json(body))
    }

    pub fn build_update_todo(&self, id: &TodoId, draft: &TodoDraft) -> Result<HttpRequest, ApiError> {
        let body = to_json(draft)?;
        debug!(%id, "building update request");
        Ok(HttpRequest::new(HttpMethod::Put, self.url(&format!("/todos/{id}"))).with_json(body))
    }

    pub fn build_mark_complete(&self, id: &TodoId) -> Result<HttpRequest, ApiError> {
        let body = to_json(&CompleteTodo { id: id.clone() })?;
        debug!(%id, "building mark-complete request");
        Ok(HttpRequest::new(HttpMethod::Put, self.url("/completed")).with_json(body))
    }

    pub fn build_delete_todo(&self, id: &TodoId) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, self.url(&format!("/todos/{id}")))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let list: TodoList = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(list.into_todos())
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Option<Todo>, ApiError> {
        parse_write(response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Option<Todo>, ApiError> {
        parse_write(response)
    }

    pub fn parse_mark_complete(&self, response: HttpResponse) -> Result<Option<Todo>, ApiError> {
        parse_write(response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Echo {
    Bare(Todo),
    Wrapped { todo: Todo },
}

fn parse_write(response: HttpResponse) -> Result<Option<Todo>, ApiError> {
    check_status(&response)?;
    Ok(match serde_json::from_str::<Echo>(&response.body) {
        Ok(Echo::Bare(todo)) | Ok(Echo::Wrapped { todo }) => Some(todo),
        Err(_) => None,
    })
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Rejected {
        status: response.status,
        body: response.body.clone(),
    })
}
