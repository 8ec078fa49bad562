//! Key bindings, channel streams and the disposal group for listeners

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use futures::Stream;
use std::collections::HashMap;
use tokio::sync::{broadcast, watch};
use tokio::task::AbortHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        // Shifted characters arrive with SHIFT set; the char already encodes it
        let modifiers = match event.code {
            KeyCode::Char(_) => event.modifiers.difference(KeyModifiers::SHIFT),
            _ => event.modifiers,
        };
        self.code == event.code && self.modifiers == modifiers
    }

    pub fn label(&self) -> String {
        match self.code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            other => format!("{:?}", other),
        }
    }
}

impl From<KeyCode> for KeyBinding {
    fn from(code: KeyCode) -> Self {
        KeyBinding::new(code)
    }
}

/// A keyboard shortcut an app listens for while active
pub struct Subscription<Msg> {
    pub binding: KeyBinding,
    pub description: String,
    pub msg: Msg,
}

impl<Msg> Subscription<Msg> {
    pub fn keyboard(binding: impl Into<KeyBinding>, description: &str, msg: Msg) -> Self {
        Self {
            binding: binding.into(),
            description: description.to_string(),
            msg,
        }
    }
}

/// Every listener task an app has running, released together on teardown
#[derive(Debug, Default)]
pub struct SubscriptionGroup {
    handles: HashMap<String, AbortHandle>,
}

impl SubscriptionGroup {
    /// Register a listener, cancelling any previous one under the same key
    pub fn insert(&mut self, key: impl Into<String>, handle: AbortHandle) {
        let key = key.into();
        if let Some(previous) = self.handles.insert(key.clone(), handle) {
            log::debug!("Replacing listener '{}'", key);
            previous.abort();
        }
    }

    pub fn cancel(&mut self, key: &str) -> bool {
        match self.handles.remove(key) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.handles.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn dispose(&mut self) {
        for (key, handle) in self.handles.drain() {
            log::debug!("Disposing listener '{}'", key);
            handle.abort();
        }
    }
}

impl Drop for SubscriptionGroup {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Items of a broadcast channel as a stream. Lagged items are skipped.
pub fn broadcast_stream<T>(rx: broadcast::Receiver<T>) -> impl Stream<Item = T> + Send + 'static
where
    T: Clone + Send + 'static,
{
    futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(item) => return Some((item, rx)),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::warn!("Listener lagged, skipped {} item(s)", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    })
}

/// The current value of a watch channel, then every change
pub fn watch_stream<T>(rx: watch::Receiver<T>) -> impl Stream<Item = T> + Send + 'static
where
    T: Clone + Send + Sync + 'static,
{
    futures::stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let value = rx.borrow_and_update().clone();
        Some((value, (rx, false)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::future::pending;

    #[tokio::test]
    async fn test_insert_replaces_and_aborts_previous() {
        let mut group = SubscriptionGroup::default();
        let first = tokio::spawn(pending::<()>());
        let second = tokio::spawn(pending::<()>());

        group.insert("store-setting", first.abort_handle());
        group.insert("store-setting", second.abort_handle());

        assert_eq!(group.len(), 1);
        assert!(first.await.unwrap_err().is_cancelled());
        assert!(!second.is_finished());
        group.dispose();
        assert!(second.await.unwrap_err().is_cancelled());
    }

    #[tokio::test]
    async fn test_dispose_aborts_everything() {
        let mut group = SubscriptionGroup::default();
        let tasks: Vec<_> = (0..3).map(|_| tokio::spawn(pending::<()>())).collect();
        for (i, task) in tasks.iter().enumerate() {
            group.insert(format!("listener-{}", i), task.abort_handle());
        }

        group.dispose();

        assert!(group.is_empty());
        for task in tasks {
            assert!(task.await.unwrap_err().is_cancelled());
        }
    }

    #[tokio::test]
    async fn test_watch_stream_starts_with_current_value() {
        let (tx, rx) = watch::channel(1);
        let mut stream = Box::pin(watch_stream(rx));

        assert_eq!(stream.next().await, Some(1));
        tx.send(2).unwrap();
        assert_eq!(stream.next().await, Some(2));
        drop(tx);
        assert_eq!(stream.next().await, None);
    }

    #[test]
    fn test_shifted_char_matches() {
        let binding = KeyBinding::new(KeyCode::Char('N'));
        let event = KeyEvent::new(KeyCode::Char('N'), KeyModifiers::SHIFT);
        assert!(binding.matches(&event));
    }
}
