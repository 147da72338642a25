//! API handlers module

pub mod pages;
pub mod records;

pub use records::{add_record, delete_record, list_page, update_record};

use crate::auth::AuthGateway;
use crate::core::config::SessionConfig;
use crate::db::repository::RecordRepository;
use std::sync::Arc;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<RecordRepository>,
    pub gateway: Arc<AuthGateway>,
    pub session: SessionConfig,
}
