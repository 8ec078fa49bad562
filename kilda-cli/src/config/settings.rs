//! Client-local persisted settings
//!
//! A small string key/value store shared by the whole console. The SQLite
//! implementation lives in [`crate::config::repository::settings`].

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// `"1"` when switch metadata comes from an inventory store
pub const HAS_SWITCH_STORE_SETTING: &str = "hasSwtStoreSetting";

/// Raw JSON of the most recently loaded switch. One slot for the whole
/// console, the last write wins.
pub const SWITCH_DETAILS_JSON: &str = "switchDetailsJSON";

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Read the store-setting flag. Unreadable counts as unset.
pub async fn has_store_setting(settings: &dyn SettingsStore) -> bool {
    match settings.get(HAS_SWITCH_STORE_SETTING).await {
        Ok(value) => value.as_deref() == Some("1"),
        Err(e) => {
            log::warn!("Failed to read {}: {:#}", HAS_SWITCH_STORE_SETTING, e);
            false
        }
    }
}

/// Settings kept in memory only (headless runs and tests)
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl SettingsStore for MemorySettings {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|_| anyhow::anyhow!("settings lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| anyhow::anyhow!("settings lock poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_flag_is_only_set_by_one() {
        let settings = MemorySettings::default();
        assert!(!has_store_setting(&settings).await);

        settings.set(HAS_SWITCH_STORE_SETTING, "true").await.unwrap();
        assert!(!has_store_setting(&settings).await);

        settings.set(HAS_SWITCH_STORE_SETTING, "1").await.unwrap();
        assert!(has_store_setting(&settings).await);
    }
}
