//! Client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the state of a
//! todo manager screen: the form, the fetched list, the filter, the theme
//! and the notification stack.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit.
//! - `TodoManager` hands out `Pending` requests and consumes their outcomes,
//!   which keeps all UI state transitions testable without a server.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod filter;
pub mod form;
pub mod http;
pub mod manager;
pub mod notify;
pub mod theme;
pub mod time;
pub mod types;

pub use client::TodoClient;
pub use error::{ApiError, ErrorKind, ValidationError};
pub use filter::Filter;
pub use form::{EditMode, FormState};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use manager::{Operation, Pending, TodoManager};
pub use notify::{Level, Notification, Notifications};
pub use theme::{Palette, Rgb, Theme};
pub use types::{CompleteTodo, Todo, TodoDraft, TodoId, TodoList};
