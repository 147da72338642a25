//! Record table editing model

pub mod inline_edit;

pub use inline_edit::{EditTable, FieldValues, Notice, RowEditor, RowMode, RowView, UpdateBackend};

use crate::db::repository::RecordRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// [`UpdateBackend`] backed directly by the record store, for embedded use
/// and tests that want real persistence behind the editor.
pub struct RepositoryBackend {
    records: Arc<RecordRepository>,
}

impl RepositoryBackend {
    pub fn new(records: Arc<RecordRepository>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl UpdateBackend for RepositoryBackend {
    async fn update(&self, id: i64, name: &str, email: &str) -> Result<(), String> {
        self.records
            .update(id, name, email)
            .await
            .map_err(|e| e.public_message())
    }
}
