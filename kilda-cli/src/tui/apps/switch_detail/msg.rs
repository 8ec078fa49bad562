//! Message types for the Switch Detail App

use crate::api::{StoreSetting, SwitchDetail};
use crate::tui::router::NavigationEnd;

use super::state::{ClipboardItem, DetailTab};

#[derive(Clone)]
pub enum Msg {
    // === Routing ===
    /// Switch id published by the route
    RouteParams(String),
    /// A navigation completed somewhere in the console
    NavigationEnd(NavigationEnd),
    /// Leave the port sub-view, or the page
    Back,

    // === Loading ===
    /// Persisted store flag read at startup
    StoreFlagRead(bool),
    /// The store-setting notifier fired
    StoreSettingReceived(StoreSetting),
    /// The store check we triggered finished
    StoreCheckFinished(Result<StoreSetting, String>),
    SwitchDetailLoaded {
        switch_id: String,
        has_store_setting: bool,
        result: Result<Option<SwitchDetail>, String>,
    },
    DetailPersisted(Result<(), String>),

    // === UI callbacks ===
    /// Activate a tab; the flag says whether its content is still loading
    ToggleTab(DetailTab, bool),
    NextTab,
    /// Mask checkbox changed to the given checked state
    MaskSwitchId(bool),
    ToggleMask,
    CopyToClip(ClipboardItem),
}
