//! OpenKilda GUI backend access
//!
//! REST client, wire models, the store-setting notifier and the switch
//! identifier display formats.

pub mod client;
pub mod models;
pub mod store_setting;
pub mod switch_id;

pub use client::{KildaClient, SwitchService};
pub use models::{CacheBuster, StoreSetting, SwitchDetail, SwitchStoreConfig};
pub use store_setting::{StoreConfigSource, StoreSettingNotifier, StoreSettingService};
pub use switch_id::{MaskMode, transform};
