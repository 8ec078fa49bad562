//! Switch List App
//!
//! Inventory of every switch the controller knows. `Enter` opens the
//! selected switch's detail page.

pub mod app;
pub mod state;
pub mod view;

pub use app::SwitchListApp;
pub use state::{Msg, State};
