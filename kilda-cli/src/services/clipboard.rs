//! Clipboard access

use anyhow::Result;
use std::sync::Mutex;

pub trait ClipboardService: Send + Sync {
    fn copy_from_content(&self, text: &str) -> Result<()>;
}

/// The desktop clipboard. A fresh handle per copy, since some platforms
/// drop clipboard ownership with the handle's thread.
#[cfg(feature = "system-clipboard")]
#[derive(Debug, Default)]
pub struct SystemClipboard;

#[cfg(feature = "system-clipboard")]
impl ClipboardService for SystemClipboard {
    fn copy_from_content(&self, text: &str) -> Result<()> {
        use anyhow::Context;

        let mut clipboard = arboard::Clipboard::new().context("Clipboard is not available")?;
        clipboard
            .set_text(text.to_string())
            .context("Failed to write to clipboard")?;
        log::debug!("Copied {} chars to system clipboard", text.len());
        Ok(())
    }
}

/// Keeps copied text in memory, for builds without a desktop clipboard
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    history: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    #[cfg(test)]
    pub fn history(&self) -> Vec<String> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }
}

impl ClipboardService for MemoryClipboard {
    fn copy_from_content(&self, text: &str) -> Result<()> {
        let mut history = self
            .history
            .lock()
            .map_err(|_| anyhow::anyhow!("clipboard lock poisoned"))?;
        history.push(text.to_string());
        Ok(())
    }
}

/// The clipboard used by the console in this build
pub fn default_clipboard() -> std::sync::Arc<dyn ClipboardService> {
    #[cfg(feature = "system-clipboard")]
    {
        std::sync::Arc::new(SystemClipboard)
    }
    #[cfg(not(feature = "system-clipboard"))]
    {
        std::sync::Arc::new(MemoryClipboard::default())
    }
}
