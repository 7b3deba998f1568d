//! Client-side view selector over the fetched todo list.

use std::fmt;
use std::str::FromStr;

use crate::types::Todo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Pending, Filter::Completed];

    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }

    /// Order-preserving view of `todos` passing this filter.
    pub fn apply(self, todos: &[Todo]) -> Vec<&Todo> {
        todos.iter().filter(|t| self.matches(t)).collect()
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Pending => "Pending",
            Filter::Completed => "Completed",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Filter::All => Filter::Pending,
            Filter::Pending => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Filter::All => Filter::Completed,
            Filter::Pending => Filter::All,
            Filter::Completed => Filter::Pending,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Filter::All => "all",
            Filter::Pending => "pending",
            Filter::Completed => "completed",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter {0:?}, expected all, pending or completed")]
pub struct UnknownFilter(pub String);

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "pending" => Ok(Filter::Pending),
            "completed" | "done" => Ok(Filter::Completed),
            _ => Err(UnknownFilter(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TodoId;

    fn todo(id: &str, completed: bool) -> Todo {
        Todo {
            id: TodoId::new(id),
            title: format!("todo {id}"),
            description: String::new(),
            completed,
            created_at: None,
        }
    }

    fn ids(view: Vec<&Todo>) -> Vec<&str> {
        view.into_iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn pending_and_completed_partition_the_list() {
        let todos = vec![todo("a", true), todo("b", false), todo("c", true), todo("d", false)];
        assert_eq!(ids(Filter::Pending.apply(&todos)), ["b", "d"]);
        assert_eq!(ids(Filter::Completed.apply(&todos)), ["a", "c"]);
        assert_eq!(ids(Filter::All.apply(&todos)), ["a", "b", "c", "d"]);
    }

    #[test]
    fn empty_list_yields_empty_views() {
        for filter in Filter::ALL {
            assert!(filter.apply(&[]).is_empty());
        }
    }

    #[test]
    fn default_is_all() {
        assert_eq!(Filter::default(), Filter::All);
    }

    #[test]
    fn cycling_visits_every_filter() {
        let mut f = Filter::All;
        for expected in [Filter::Pending, Filter::Completed, Filter::All] {
            f = f.next();
            assert_eq!(f, expected);
        }
        assert_eq!(Filter::All.prev(), Filter::Completed);
        assert_eq!(Filter::Pending.prev().next(), Filter::Pending);
    }

    #[test]
    fn parses_names() {
        assert_eq!("pending".parse::<Filter>().unwrap(), Filter::Pending);
        assert_eq!("Completed".parse::<Filter>().unwrap(), Filter::Completed);
        assert!("archived".parse::<Filter>().is_err());
        for f in Filter::ALL {
            assert_eq!(f.to_string().parse::<Filter>().unwrap(), f);
        }
    }
}
