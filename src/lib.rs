//! Vista Admin
//!
//! A session-authenticated admin panel over a single table of contact
//! records: SQLite-backed CRUD, an opaque-token auth gateway, and an
//! explicit state machine for inline row editing.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod ui;

// Re-export commonly used types
pub use api::ApiServer;
pub use crate::core::Config;
pub use db::DatabaseManager;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
