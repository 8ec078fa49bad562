//! Repository layer for database operations

pub mod settings;
