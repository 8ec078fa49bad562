pub mod switch_detail;
pub mod switch_list;

pub use switch_detail::SwitchDetailApp;
pub use switch_list::SwitchListApp;
