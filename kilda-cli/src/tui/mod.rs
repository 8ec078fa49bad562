pub mod app;
pub mod apps;
pub mod command;
pub mod multi_runtime;
pub mod resource;
pub mod router;
pub mod runtime;
pub mod state;
pub mod subscription;

pub use multi_runtime::MultiAppRuntime;
