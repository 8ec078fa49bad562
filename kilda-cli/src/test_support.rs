//! Test doubles for the console's collaborators

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

use crate::api::{
    CacheBuster, StoreConfigSource, StoreSettingNotifier, SwitchDetail, SwitchService,
    SwitchStoreConfig,
};
use crate::config::settings::MemorySettings;
use crate::services::{LoaderOverlay, MemoryClipboard, Services, ToastQueue};
use crate::tui::router::Router;

/// What the fake backend answers with
#[derive(Clone)]
pub enum Reply {
    Body(Value),
    Error(String),
}

/// Switch backend answering every request with the same reply
pub struct FakeSwitchService {
    reply: Mutex<Reply>,
    calls: Mutex<Vec<String>>,
    listing: Vec<SwitchDetail>,
}

impl FakeSwitchService {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply: Mutex::new(reply),
            calls: Mutex::new(Vec::new()),
            listing: Vec::new(),
        }
    }

    pub fn with_listing(mut self, listing: Vec<SwitchDetail>) -> Self {
        self.listing = listing;
        self
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SwitchService for FakeSwitchService {
    async fn switch_detail(&self, switch_id: &str) -> Result<Option<SwitchDetail>> {
        self.calls.lock().unwrap().push(switch_id.to_string());
        let reply = self.reply.lock().unwrap().clone();
        match reply {
            Reply::Body(value) => SwitchDetail::from_value(value),
            Reply::Error(e) => anyhow::bail!(e),
        }
    }

    async fn list_switches(&self) -> Result<Vec<SwitchDetail>> {
        match self.reply.lock().unwrap().clone() {
            Reply::Error(e) => anyhow::bail!(e),
            Reply::Body(_) => Ok(self.listing.clone()),
        }
    }
}

/// Store configuration that is either configured or not
pub struct FakeStoreConfig(pub bool);

#[async_trait]
impl StoreConfigSource for FakeStoreConfig {
    async fn switch_store_config(&self, _query: CacheBuster) -> Result<SwitchStoreConfig> {
        let body = if self.0 {
            serde_json::json!({ "urls": { "get-all-switches": { "url": "http://inventory" } } })
        } else {
            serde_json::json!({})
        };
        Ok(serde_json::from_value(body)?)
    }
}

/// Handles onto the concrete doubles behind a [`Services`] bundle
pub struct Doubles {
    pub switches: Arc<FakeSwitchService>,
    pub store_settings: Arc<StoreSettingNotifier>,
    pub settings: Arc<MemorySettings>,
    pub toasts: Arc<ToastQueue>,
    pub loader: Arc<LoaderOverlay>,
    pub clipboard: Arc<MemoryClipboard>,
}

pub fn services(url: &str, switches: FakeSwitchService, store_enabled: bool) -> (Services, Doubles) {
    let settings = Arc::new(MemorySettings::default());
    let doubles = Doubles {
        switches: Arc::new(switches),
        store_settings: Arc::new(StoreSettingNotifier::new(
            Arc::new(FakeStoreConfig(store_enabled)),
            settings.clone(),
        )),
        settings,
        toasts: Arc::new(ToastQueue::new(60)),
        loader: Arc::new(LoaderOverlay::default()),
        clipboard: Arc::new(MemoryClipboard::default()),
    };

    let router = Router::new(url);
    router.navigate(url);

    let services = Services {
        switches: doubles.switches.clone(),
        store_settings: doubles.store_settings.clone(),
        settings: doubles.settings.clone(),
        notifier: doubles.toasts.clone(),
        loader: doubles.loader.clone(),
        clipboard: doubles.clipboard.clone(),
        router,
    };
    (services, doubles)
}
