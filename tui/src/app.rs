//! Screen state and key handling.
//!
//! `App` wraps the core `TodoManager` with what only a terminal needs: which
//! widget has focus and which row of the list is highlighted. Key handling
//! returns the requests to dispatch instead of running them, so every
//! interaction can be tested without a terminal or a server.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::widgets::ListState;
use todo_core::{ApiError, Filter, HttpResponse, Operation, Pending, Todo, TodoId, TodoManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Title,
    Description,
    List,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Title => Focus::Description,
            Focus::Description => Focus::List,
            Focus::List => Focus::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Title => Focus::List,
            Focus::Description => Focus::Title,
            Focus::List => Focus::Description,
        }
    }
}

pub struct App {
    pub manager: TodoManager,
    pub focus: Focus,
    pub list_state: ListState,
    pub should_quit: bool,
}

impl App {
    pub fn new(manager: TodoManager) -> Self {
        Self {
            manager,
            focus: Focus::Title,
            list_state: ListState::default(),
            should_quit: false,
        }
    }

    /// The first request of a session: load the list.
    pub fn start(&mut self) -> Pending {
        self.manager.refresh()
    }

    pub fn tick(&mut self, now: Instant) {
        self.manager.tick(now);
    }

    /// The todo under the list cursor, if any.
    pub fn selected(&self) -> Option<&Todo> {
        let idx = self.list_state.selected()?;
        self.manager.visible().get(idx).copied()
    }

    fn selected_id(&self) -> Option<TodoId> {
        self.selected().map(|t| t.id.clone())
    }

    /// Feed a request outcome back into the manager.
    pub fn on_completion(
        &mut self,
        op: Operation,
        outcome: Result<HttpResponse, ApiError>,
        now: Instant,
    ) -> Option<Pending> {
        let next = self.manager.finish(op, outcome, now);
        self.clamp_selection();
        next
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Vec<Pending> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('t') => {
                    self.manager.toggle_theme();
                }
                _ => {}
            }
            return Vec::new();
        }
        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return Vec::new();
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return Vec::new();
            }
            _ => {}
        }
        match self.focus {
            Focus::Title | Focus::Description => self.handle_input_key(key.code, now),
            Focus::List => self.handle_list_key(key.code, now),
        }
    }

    fn handle_input_key(&mut self, code: KeyCode, now: Instant) -> Vec<Pending> {
        let focus = self.focus;
        let form = self.manager.form_mut();
        let field = match focus {
            Focus::Title => &mut form.title,
            _ => &mut form.description,
        };
        match code {
            KeyCode::Char(c) => field.push(c),
            KeyCode::Backspace => {
                field.pop();
            }
            KeyCode::Enter => return self.manager.submit(now).into_iter().collect(),
            KeyCode::Esc => {
                if !self.manager.cancel_edit() {
                    self.focus = Focus::List;
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_list_key(&mut self, code: KeyCode, now: Instant) -> Vec<Pending> {
        let mut out = Vec::new();
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    if self.manager.begin_edit(&id) {
                        self.focus = Focus::Title;
                    }
                }
            }
            KeyCode::Char('c') => {
                if let Some(todo) = self.selected() {
                    if !todo.completed {
                        let id = todo.id.clone();
                        out.extend(self.manager.mark_complete(&id, now));
                    }
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id() {
                    out.extend(self.manager.delete(&id));
                }
            }
            KeyCode::Char('1') => self.set_filter(Filter::All),
            KeyCode::Char('2') => self.set_filter(Filter::Pending),
            KeyCode::Char('3') => self.set_filter(Filter::Completed),
            KeyCode::Char('f') | KeyCode::Right => self.set_filter(self.manager.filter().next()),
            KeyCode::Left => self.set_filter(self.manager.filter().prev()),
            KeyCode::Char('r') => out.push(self.manager.refresh()),
            KeyCode::Char('t') => {
                self.manager.toggle_theme();
            }
            KeyCode::Char('n') | KeyCode::Char('i') => self.focus = Focus::Title,
            KeyCode::Esc => {
                self.manager.cancel_edit();
            }
            _ => {}
        }
        out
    }

    fn set_filter(&mut self, filter: Filter) {
        self.manager.set_filter(filter);
        let first = if self.manager.visible().is_empty() {
            None
        } else {
            Some(0)
        };
        self.list_state.select(first);
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.manager.visible().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let next = match self.list_state.selected() {
            None => 0,
            Some(i) => (i as isize + delta).rem_euclid(len as isize) as usize,
        };
        self.list_state.select(Some(next));
    }

    /// Keep the cursor on a real row after the list changed size.
    fn clamp_selection(&mut self) {
        let len = self.manager.visible().len();
        let selected = match (len, self.list_state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some(i.min(len - 1)),
        };
        self.list_state.select(selected);
    }
}
