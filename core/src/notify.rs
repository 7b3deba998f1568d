//! Transient user-facing messages.
//!
//! Messages stack in arrival order and each one expires on its own after the
//! sink's TTL. Time is always passed in, so expiry is deterministic in tests.

use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Notifications {
    ttl: Duration,
    items: Vec<Notification>,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, level: Level, message: impl Into<String>, now: Instant) {
        self.items.push(Notification {
            level,
            message: message.into(),
            expires_at: now + self.ttl,
        });
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) {
        self.push(Level::Success, message, now);
    }

    pub fn warn(&mut self, message: impl Into<String>, now: Instant) {
        self.push(Level::Warning, message, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.push(Level::Error, message, now);
    }

    /// Drop every message whose deadline has passed.
    pub fn expire(&mut self, now: Instant) {
        self.items.retain(|n| n.expires_at > now);
    }

    pub fn active(&self) -> &[Notification] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }
}
