//! Toast notifications

use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;
use std::sync::Mutex;

const MAX_TOASTS: usize = 5;

/// Fire-and-forget user-facing notifications
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str, title: &str);
    fn success(&self, message: &str, title: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Toasts waiting to be drawn. Expired toasts are dropped when read.
#[derive(Debug)]
pub struct ToastQueue {
    ttl: Duration,
    toasts: Mutex<VecDeque<Toast>>,
}

impl ToastQueue {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs as i64),
            toasts: Mutex::new(VecDeque::new()),
        }
    }

    fn push(&self, level: ToastLevel, message: &str, title: &str) {
        match level {
            ToastLevel::Error => log::warn!("Toast [{}] {}", title, message),
            ToastLevel::Success => log::info!("Toast [{}] {}", title, message),
        }

        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push_back(Toast {
                level,
                title: title.to_string(),
                message: message.to_string(),
                created_at: Utc::now(),
            });
            while toasts.len() > MAX_TOASTS {
                toasts.pop_front();
            }
        }
    }

    /// Toasts still within their TTL, oldest first
    pub fn active(&self) -> Vec<Toast> {
        self.active_at(Utc::now())
    }

    fn active_at(&self, now: DateTime<Utc>) -> Vec<Toast> {
        let Ok(mut toasts) = self.toasts.lock() else {
            return Vec::new();
        };
        toasts.retain(|toast| now - toast.created_at < self.ttl);
        toasts.iter().cloned().collect()
    }
}

impl Notifier for ToastQueue {
    fn error(&self, message: &str, title: &str) {
        self.push(ToastLevel::Error, message, title);
    }

    fn success(&self, message: &str, title: &str) {
        self.push(ToastLevel::Success, message, title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_expire() {
        let queue = ToastQueue::new(5);
        queue.error("No Switch Found", "Error");

        assert_eq!(queue.active().len(), 1);
        assert!(queue.active_at(Utc::now() + Duration::seconds(6)).is_empty());
        // Expired toasts are gone for good
        assert!(queue.active().is_empty());
    }

    #[test]
    fn test_queue_is_bounded() {
        let queue = ToastQueue::new(60);
        for i in 0..(MAX_TOASTS + 3) {
            queue.success(&format!("copied {}", i), "Clipboard");
        }

        let active = queue.active();
        assert_eq!(active.len(), MAX_TOASTS);
        assert_eq!(active[0].message, "copied 3");
    }
}
