//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use todo_core::client::DEFAULT_BASE_URL;
use todo_core::{Filter, Theme};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "todo",
    version,
    about = "Terminal todo manager for a REST todo backend",
    after_help = "EXAMPLES:\n    # Against the bundled mock backend\n    PORT=3000 mock-server &\n    todo --base-url http://localhost:3000\n\n    # Keep a debug log while using the UI\n    TODO_LOG=debug todo --log-file /tmp/todo.log"
)]
pub struct Config {
    /// Base URL of the todo API.
    #[arg(long, env = "TODO_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Give up on a request after this many seconds.
    #[arg(
        long,
        env = "TODO_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// How long notifications stay on screen, in milliseconds.
    #[arg(long, env = "TODO_NOTIFY_TTL_MS", default_value_t = 4000)]
    pub notify_ttl_ms: u64,

    /// Initial list filter: all, pending or completed (alias: done).
    #[arg(long, env = "TODO_FILTER", default_value_t = Filter::All)]
    pub filter: Filter,

    /// Start in dark mode.
    #[arg(long)]
    pub dark: bool,

    /// Write logs to this file (the terminal belongs to the UI).
    #[arg(long, env = "TODO_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn notify_ttl(&self) -> Duration {
        Duration::from_millis(self.notify_ttl_ms)
    }

    pub fn theme(&self) -> Theme {
        if self.dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags_are_parsed() {
        let config = Config::try_parse_from([
            "todo",
            "--base-url",
            "http://api.example:8080/",
            "--timeout-secs",
            "3",
            "--notify-ttl-ms",
            "1500",
            "--dark",
            "--filter",
            "done",
            "--log-file",
            "/tmp/todo.log",
        ])
        .unwrap();
        assert_eq!(config.base_url, "http://api.example:8080/");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.notify_ttl(), Duration::from_millis(1500));
        assert_eq!(config.theme(), Theme::Dark);
        assert_eq!(config.filter, Filter::Completed);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/todo.log")));
    }

    #[test]
    fn filter_defaults_to_all_and_rejects_unknown_names() {
        let config = Config::try_parse_from(["todo"]).unwrap();
        assert_eq!(config.filter, Filter::All);
        let err = Config::try_parse_from(["todo", "--filter", "someday"]).unwrap_err();
        assert!(err.to_string().contains("someday"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Config::try_parse_from(["todo", "--timeout-secs", "0"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
