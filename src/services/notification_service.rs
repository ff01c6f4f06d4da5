use std::sync::{Arc, Mutex};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// A transient, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn success(&self, message: &str) {
        self.notify(Notification {
            level: NotificationLevel::Success,
            message: message.to_string(),
        });
    }

    fn info(&self, message: &str) {
        self.notify(Notification {
            level: NotificationLevel::Info,
            message: message.to_string(),
        });
    }

    fn error(&self, message: &str) {
        self.notify(Notification {
            level: NotificationLevel::Error,
            message: message.to_string(),
        });
    }

    /// Report a failed call. `fallback` is shown unless the server supplied
    /// its own message.
    fn failure(&self, err: &Error, fallback: &str) {
        let message = match err {
            Error::BadRequest(msg) if !msg.is_empty() => msg.clone(),
            Error::Validation(_) | Error::Unauthorized(_) => err.user_message(),
            _ => fallback.to_string(),
        };
        self.error(&message);
    }
}

/// Writes notifications to the terminal and the trace log.
#[derive(Debug, Default, Clone)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => {
                tracing::info!(message = %notification.message, "notification");
                println!("✔ {}", notification.message);
            }
            NotificationLevel::Info => {
                tracing::info!(message = %notification.message, "notification");
                println!("• {}", notification.message);
            }
            NotificationLevel::Error => {
                tracing::warn!(message = %notification.message, "notification");
                eprintln!("✖ {}", notification.message);
            }
        }
    }
}

/// Keeps every notification in memory, for embedding and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.seen.lock().unwrap_or_else(|e| e.into_inner()))
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    pub fn errors(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|n| n.level == NotificationLevel::Error)
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
    }
}
