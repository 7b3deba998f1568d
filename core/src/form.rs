//! Form state and the create/edit mode it submits in.

use crate::error::ValidationError;
use crate::types::{Todo, TodoDraft, TodoId};

/// What a submit does: create a new todo, or update the one being edited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Creating,
    Editing(TodoId),
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub title: String,
    pub description: String,
    mode: EditMode,
}

impl FormState {
    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn editing(&self) -> Option<&TodoId> {
        match &self.mode {
            EditMode::Creating => None,
            EditMode::Editing(id) => Some(id),
        }
    }

    /// Enter edit mode for `todo`, replacing whatever was typed.
    pub fn begin_edit(&mut self, todo: &Todo) {
        self.title = todo.title.clone();
        self.description = todo.description.clone();
        self.mode = EditMode::Editing(todo.id.clone());
    }

    /// Back to `Creating` with empty fields.
    pub fn reset(&mut self) {
        self.title.clear();
        self.description.clear();
        self.mode = EditMode::Creating;
    }

    pub fn draft(&self) -> Result<TodoDraft, ValidationError> {
        TodoDraft::new(&self.title, &self.description)
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            EditMode::Creating => "Create Todo",
            EditMode::Editing(_) => "Edit Todo",
        }
    }

    pub fn submit_label(&self, busy: bool) -> &'static str {
        match (&self.mode, busy) {
            (EditMode::Creating, false) => "Add Todo",
            (EditMode::Creating, true) => "Creating...",
            (EditMode::Editing(_), false) => "Update Todo",
            (EditMode::Editing(_), true) => "Updating...",
        }
    }
}
