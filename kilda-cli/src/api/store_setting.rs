//! Switch store setting notifier
//!
//! Whether switch metadata is sourced from an external inventory store is a
//! per-deployment setting. Checking it persists the result under
//! [`HAS_SWITCH_STORE_SETTING`] and broadcasts it to every subscriber.

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::broadcast;

use super::models::{CacheBuster, StoreSetting, SwitchStoreConfig};
use crate::config::settings::{HAS_SWITCH_STORE_SETTING, SettingsStore};

const CHANNEL_CAPACITY: usize = 16;

/// Where the store configuration comes from (the backend, in production)
#[async_trait]
pub trait StoreConfigSource: Send + Sync {
    async fn switch_store_config(&self, query: CacheBuster) -> Result<SwitchStoreConfig>;
}

#[async_trait]
pub trait StoreSettingService: Send + Sync {
    /// Receive every setting broadcast from now on
    fn subscribe(&self) -> broadcast::Receiver<StoreSetting>;

    /// Re-check the store configuration. Subscribers are notified even when
    /// the check fails, with the setting disabled.
    async fn check_switch_store_details(&self, query: CacheBuster) -> Result<StoreSetting>;
}

pub struct StoreSettingNotifier {
    source: Arc<dyn StoreConfigSource>,
    settings: Arc<dyn SettingsStore>,
    sender: broadcast::Sender<StoreSetting>,
}

impl StoreSettingNotifier {
    pub fn new(source: Arc<dyn StoreConfigSource>, settings: Arc<dyn SettingsStore>) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            source,
            settings,
            sender,
        }
    }

    fn publish(&self, setting: StoreSetting) {
        let receivers = self.sender.send(setting).unwrap_or(0);
        debug!("Store setting {:?} delivered to {} subscriber(s)", setting, receivers);
    }
}

#[async_trait]
impl StoreSettingService for StoreSettingNotifier {
    fn subscribe(&self) -> broadcast::Receiver<StoreSetting> {
        self.sender.subscribe()
    }

    async fn check_switch_store_details(&self, query: CacheBuster) -> Result<StoreSetting> {
        let enabled = match self.source.switch_store_config(query).await {
            Ok(config) => config.is_configured(),
            Err(e) => {
                warn!("Switch store config check failed, treating store as disabled: {:#}", e);
                false
            }
        };

        let flag = if enabled { "1" } else { "0" };
        let persisted = self.settings.set(HAS_SWITCH_STORE_SETTING, flag).await;

        let setting = StoreSetting { enabled };
        self.publish(setting);

        persisted?;
        Ok(setting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{MemorySettings, has_store_setting};
    use serde_json::json;

    struct FixedSource(Option<serde_json::Value>);

    #[async_trait]
    impl StoreConfigSource for FixedSource {
        async fn switch_store_config(&self, _query: CacheBuster) -> Result<SwitchStoreConfig> {
            match &self.0 {
                Some(value) => Ok(serde_json::from_value(value.clone())?),
                None => anyhow::bail!("connection refused"),
            }
        }
    }

    #[tokio::test]
    async fn test_check_persists_and_broadcasts() {
        let settings = Arc::new(MemorySettings::default());
        let source = FixedSource(Some(json!({
            "urls": { "get-all-switches": { "url": "http://inventory/switches" } }
        })));
        let notifier = StoreSettingNotifier::new(Arc::new(source), settings.clone());
        let mut rx = notifier.subscribe();

        let setting = notifier.check_switch_store_details(CacheBuster(1)).await.unwrap();

        assert!(setting.enabled);
        assert_eq!(rx.recv().await.unwrap(), StoreSetting { enabled: true });
        assert!(has_store_setting(settings.as_ref()).await);
    }

    #[tokio::test]
    async fn test_failed_check_still_notifies() {
        let settings = Arc::new(MemorySettings::default());
        settings.set(HAS_SWITCH_STORE_SETTING, "1").await.unwrap();
        let notifier = StoreSettingNotifier::new(Arc::new(FixedSource(None)), settings.clone());
        let mut rx = notifier.subscribe();

        let setting = notifier.check_switch_store_details(CacheBuster(2)).await.unwrap();

        assert!(!setting.enabled);
        assert_eq!(rx.recv().await.unwrap(), StoreSetting { enabled: false });
        assert!(!has_store_setting(settings.as_ref()).await);
    }
}
