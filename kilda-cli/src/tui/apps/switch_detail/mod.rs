//! Switch Detail App
//!
//! Detail page for a single switch. Shows its identity and state, flags a
//! controller/inventory status discrepancy, and hosts the port sub-view
//! reached through `/switches/{id}/port/{port}`.
//!
//! Keys: `1`-`4`/`Tab` switch tabs, `m` toggles the legacy ID mask,
//! `n`/`i`/`h` copy name, ID and hostname, `Esc` goes back.

pub mod app;
pub mod msg;
pub mod state;
pub mod view;


pub use app::SwitchDetailApp;
pub use msg::Msg;
pub use state::State;
