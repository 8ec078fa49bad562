//! Collaborators injected into the console's apps

pub mod clipboard;
pub mod loader;
pub mod notification;

pub use clipboard::{ClipboardService, MemoryClipboard};
pub use loader::{Loader, LoaderOverlay};
pub use notification::{Notifier, ToastLevel, ToastQueue};

use anyhow::Result;
use std::sync::Arc;

use crate::api::{KildaClient, StoreSettingNotifier, StoreSettingService, SwitchService};
use crate::config::repository::settings::SqliteSettings;
use crate::config::settings::SettingsStore;
use crate::config::{self, Config};
use crate::tui::router::Router;

/// Everything an app talks to outside its own state
#[derive(Clone)]
pub struct Services {
    pub switches: Arc<dyn SwitchService>,
    pub store_settings: Arc<dyn StoreSettingService>,
    pub settings: Arc<dyn SettingsStore>,
    pub notifier: Arc<dyn Notifier>,
    pub loader: Arc<dyn Loader>,
    pub clipboard: Arc<dyn ClipboardService>,
    pub router: Router,
}

/// Concrete overlay state the runtime draws on top of the active app
#[derive(Clone)]
pub struct Overlays {
    pub toasts: Arc<ToastQueue>,
    pub loader: Arc<LoaderOverlay>,
}

/// Wire up the production collaborators, starting the router at `initial_url`
pub async fn bootstrap(config: &Config, initial_url: &str) -> Result<(Services, Overlays)> {
    let client = Arc::new(KildaClient::new(&config.api)?);
    let settings: Arc<dyn SettingsStore> =
        Arc::new(SqliteSettings::open(&config::settings_db_path()?).await?);
    let store_settings = Arc::new(StoreSettingNotifier::new(client.clone(), settings.clone()));

    let overlays = Overlays {
        toasts: Arc::new(ToastQueue::new(config.ui.toast_ttl_secs)),
        loader: Arc::new(LoaderOverlay::default()),
    };

    let services = Services {
        switches: client,
        store_settings,
        settings,
        notifier: overlays.toasts.clone(),
        loader: overlays.loader.clone(),
        clipboard: clipboard::default_clipboard(),
        router: Router::new(initial_url),
    };

    log::info!("Console services ready against {}", config.api.base_url);
    Ok((services, overlays))
}
