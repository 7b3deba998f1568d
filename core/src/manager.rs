//! The todo manager: form, list, filter, theme and notifications in one
//! place, driven by the host.
//!
//! # Design
//! The manager never performs I/O. Every user action that needs the server
//! returns a [`Pending`] (the operation plus the `HttpRequest` to execute).
//! The host runs the request however it likes and reports back through
//! [`TodoManager::finish`], which applies the outcome and may hand back a
//! follow-up `Pending` (the list refresh after a successful write).
//!
//! Create, update and mark-complete refresh from the server afterwards so
//! the local list always reflects server truth. Delete is applied locally as
//! soon as the server confirms it and triggers no refresh.
//!
//! Guards: one busy flag covers create/update (one form, one submit), and a
//! per-todo in-flight set covers mark-complete and delete so repeated key
//! presses cannot fire duplicate requests for the same item. Overlapping list
//! refreshes are last-write-wins, except that a todo deleted while a refresh
//! was outstanding stays gone when that refresh lands.

use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::filter::Filter;
use crate::form::FormState;
use crate::http::{HttpRequest, HttpResponse};
use crate::notify::Notifications;
use crate::theme::Theme;
use crate::types::{Todo, TodoId};

pub const FILL_ALL_FIELDS: &str = "Please fill all fields";

/// A remote operation the manager is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update(TodoId),
    Complete(TodoId),
    Delete(TodoId),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::List => f.write_str("list"),
            Operation::Create => f.write_str("create"),
            Operation::Update(id) => write!(f, "update {id}"),
            Operation::Complete(id) => write!(f, "complete {id}"),
            Operation::Delete(id) => write!(f, "delete {id}"),
        }
    }
}

/// A request the host must execute and report back via `finish`.
#[derive(Debug, Clone)]
pub struct Pending {
    pub op: Operation,
    pub request: HttpRequest,
}

#[derive(Debug)]
pub struct TodoManager {
    client: TodoClient,
    todos: Vec<Todo>,
    filter: Filter,
    form: FormState,
    theme: Theme,
    notifications: Notifications,
    busy: bool,
    in_flight: HashSet<TodoId>,
    refreshing: usize,
    /// Deleted while a refresh was out; cleared once no refresh is pending.
    deleted: HashSet<TodoId>,
    list_error: Option<ApiError>,
}

impl TodoManager {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            todos: Vec::new(),
            filter: Filter::default(),
            form: FormState::default(),
            theme: Theme::default(),
            notifications: Notifications::default(),
            busy: false,
            in_flight: HashSet::new(),
            refreshing: 0,
            deleted: HashSet::new(),
            list_error: None,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_notification_ttl(mut self, ttl: Duration) -> Self {
        self.notifications = Notifications::new(ttl);
        self
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// The list as seen through the current filter.
    pub fn visible(&self) -> Vec<&Todo> {
        self.filter.apply(&self.todos)
    }

    pub fn find(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| &t.id == id)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_in_flight(&self, id: &TodoId) -> bool {
        self.in_flight.contains(id)
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing > 0
    }

    /// The last list failure, cleared by the next successful refresh.
    pub fn list_error(&self) -> Option<&ApiError> {
        self.list_error.as_ref()
    }

    pub fn submit_label(&self) -> &'static str {
        self.form.submit_label(self.busy)
    }

    // -----------------------------------------------------------------------
    // Local state changes
    // -----------------------------------------------------------------------

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Expire old notifications.
    pub fn tick(&mut self, now: Instant) {
        self.notifications.expire(now);
    }

    /// Load `id` into the form for editing. Refused while a submit is out.
    pub fn begin_edit(&mut self, id: &TodoId) -> bool {
        if self.busy {
            return false;
        }
        let Some(todo) = self.todos.iter().find(|t| &t.id == id) else {
            return false;
        };
        self.form.begin_edit(todo);
        true
    }

    /// Leave edit mode without saving. Refused while a submit is out.
    pub fn cancel_edit(&mut self) -> bool {
        if self.busy || self.form.editing().is_none() {
            return false;
        }
        self.form.reset();
        true
    }

    // -----------------------------------------------------------------------
    // Remote actions
    // -----------------------------------------------------------------------

    pub fn refresh(&mut self) -> Pending {
        self.refreshing += 1;
        Pending {
            op: Operation::List,
            request: self.client.build_list_todos(),
        }
    }

    /// Create or update, depending on the form's mode.
    ///
    /// Returns `None` when a submit is already out, or when validation fails
    /// (a warning is posted and no request is built).
    pub fn submit(&mut self, now: Instant) -> Option<Pending> {
        if self.busy {
            return None;
        }
        let draft = match self.form.draft() {
            Ok(draft) => draft,
            Err(e) => {
                debug!(error = %e, "submit rejected by validation");
                self.notifications.warn(FILL_ALL_FIELDS, now);
                return None;
            }
        };
        let (op, request) = match self.form.editing() {
            None => (Operation::Create, self.client.build_create_todo(&draft)),
            Some(id) => (
                Operation::Update(id.clone()),
                self.client.build_update_todo(id, &draft),
            ),
        };
        match request {
            Ok(request) => {
                self.busy = true;
                debug!(%op, "submitting");
                Some(Pending { op, request })
            }
            Err(e) => {
                self.report_failure(&op, &e, now);
                None
            }
        }
    }

    pub fn mark_complete(&mut self, id: &TodoId, now: Instant) -> Option<Pending> {
        if self.in_flight.contains(id) {
            return None;
        }
        let op = Operation::Complete(id.clone());
        match self.client.build_mark_complete(id) {
            Ok(request) => {
                self.in_flight.insert(id.clone());
                Some(Pending { op, request })
            }
            Err(e) => {
                self.report_failure(&op, &e, now);
                None
            }
        }
    }

    pub fn delete(&mut self, id: &TodoId) -> Option<Pending> {
        if !self.in_flight.insert(id.clone()) {
            return None;
        }
        Some(Pending {
            op: Operation::Delete(id.clone()),
            request: self.client.build_delete_todo(id),
        })
    }

    /// Apply the outcome of a request previously handed out by this manager.
    ///
    /// `response` is `Err` when the host could not complete the round-trip;
    /// hosts should map their transport failures to `ApiError::Transport`.
    pub fn finish(
        &mut self,
        op: Operation,
        response: Result<HttpResponse, ApiError>,
        now: Instant,
    ) -> Option<Pending> {
        match &op {
            Operation::List => {
                self.refreshing = self.refreshing.saturating_sub(1);
                match response.and_then(|r| self.client.parse_list_todos(r)) {
                    Ok(mut todos) => {
                        if !self.deleted.is_empty() {
                            todos.retain(|t| !self.deleted.contains(&t.id));
                        }
                        debug!(count = todos.len(), "list refreshed");
                        self.todos = todos;
                        self.list_error = None;
                    }
                    Err(e) => {
                        self.report_failure(&op, &e, now);
                        self.list_error = Some(e);
                    }
                }
                if self.refreshing == 0 {
                    self.deleted.clear();
                }
                None
            }
            Operation::Create => {
                self.busy = false;
                match response.and_then(|r| self.client.parse_create_todo(r)) {
                    Ok(_) => {
                        self.notifications.success("Todo created", now);
                        self.form.reset();
                        Some(self.refresh())
                    }
                    Err(e) => {
                        self.report_failure(&op, &e, now);
                        None
                    }
                }
            }
            Operation::Update(id) => {
                self.busy = false;
                match response.and_then(|r| self.client.parse_update_todo(r)) {
                    Ok(_) => {
                        self.notifications.success("Todo updated", now);
                        if self.form.editing() == Some(id) {
                            self.form.reset();
                        }
                        Some(self.refresh())
                    }
                    Err(e) => {
                        self.report_failure(&op, &e, now);
                        None
                    }
                }
            }
            Operation::Complete(id) => {
                self.in_flight.remove(id);
                match response.and_then(|r| self.client.parse_mark_complete(r)) {
                    Ok(_) => {
                        self.notifications.success("Marked as done", now);
                        Some(self.refresh())
                    }
                    Err(e) => {
                        self.report_failure(&op, &e, now);
                        None
                    }
                }
            }
            Operation::Delete(id) => {
                self.in_flight.remove(id);
                match response.and_then(|r| self.client.parse_delete_todo(r)) {
                    Ok(()) => {
                        self.todos.retain(|t| &t.id != id);
                        if self.refreshing > 0 {
                            self.deleted.insert(id.clone());
                        }
                        if self.form.editing() == Some(id) {
                            self.form.reset();
                        }
                        self.notifications.success("Todo deleted", now);
                    }
                    Err(e) => self.report_failure(&op, &e, now),
                }
                None
            }
        }
    }

    fn report_failure(&mut self, op: &Operation, error: &ApiError, now: Instant) {
        warn!(%op, %error, retryable = error.is_retryable(), "request failed");
        let what = match op {
            Operation::List => "load todos",
            Operation::Create => "create todo",
            Operation::Update(_) => "update todo",
            Operation::Complete(_) => "mark todo as done",
            Operation::Delete(_) => "delete todo",
        };
        self.notifications
            .error(format!("Failed to {what}: {error}"), now);
    }
}
