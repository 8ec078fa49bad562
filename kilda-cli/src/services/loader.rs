//! Global loading overlay

use std::sync::Mutex;

pub trait Loader: Send + Sync {
    fn show(&self, caption: &str);
    fn hide(&self);
}

/// Caption of the blocking overlay, `None` while hidden
#[derive(Debug, Default)]
pub struct LoaderOverlay {
    caption: Mutex<Option<String>>,
}

impl LoaderOverlay {
    pub fn caption(&self) -> Option<String> {
        self.caption.lock().ok().and_then(|c| c.clone())
    }

    pub fn is_visible(&self) -> bool {
        self.caption().is_some()
    }
}

impl Loader for LoaderOverlay {
    fn show(&self, caption: &str) {
        if let Ok(mut current) = self.caption.lock() {
            *current = Some(caption.to_string());
        }
    }

    fn hide(&self) {
        if let Ok(mut current) = self.caption.lock() {
            *current = None;
        }
    }
}
