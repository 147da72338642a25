//! Inline row editing state machine
//!
//! Each record row owns an explicit editor state; what the row shows is a
//! pure projection of that state via [`RowEditor::render`]. The update
//! transport sits behind [`UpdateBackend`] so the transitions can be tested
//! without a server.

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::db::models::Record;

/// Editable fields of a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValues {
    pub name: String,
    pub email: String,
}

impl FieldValues {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    fn trimmed(&self) -> FieldValues {
        FieldValues::new(self.name.trim(), self.email.trim())
    }

    fn has_blank_field(&self) -> bool {
        self.name.is_empty() || self.email.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    Viewing,
    Editing,
    Saving,
}

/// User-visible feedback attached to a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Validation(String),
    Error(String),
    Success(String),
}

/// What a row should show for its current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowView {
    Display {
        name: String,
        email: String,
        notice: Option<Notice>,
    },
    Editor {
        name: String,
        email: String,
        save_enabled: bool,
        saving: bool,
        focus_name: bool,
        notice: Option<Notice>,
    },
}

/// Server side of a row save
#[async_trait]
pub trait UpdateBackend: Send + Sync {
    /// Persist new field values for a record. `Err` carries the reason shown
    /// to the user.
    async fn update(&self, id: i64, name: &str, email: &str) -> std::result::Result<(), String>;
}

/// Editing state for a single record row
#[derive(Debug, Clone)]
pub struct RowEditor {
    id: i64,
    mode: RowMode,
    displayed: FieldValues,
    /// Values last confirmed by the server, captured lazily on first edit.
    last_confirmed: Option<FieldValues>,
    current_input: FieldValues,
    notice: Option<Notice>,
    focus_name: bool,
}

impl RowEditor {
    pub fn new(record: &Record) -> Self {
        let values = FieldValues::new(&record.name, &record.email);
        Self {
            id: record.id,
            mode: RowMode::Viewing,
            current_input: values.clone(),
            displayed: values,
            last_confirmed: None,
            notice: None,
            focus_name: false,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn mode(&self) -> RowMode {
        self.mode
    }

    /// Enter edit mode. No-op unless the row is currently viewing.
    pub fn begin_edit(&mut self) {
        if self.mode != RowMode::Viewing {
            return;
        }
        if self.last_confirmed.is_none() {
            self.last_confirmed = Some(self.displayed.clone());
        }
        self.current_input = self.displayed.clone();
        self.mode = RowMode::Editing;
        self.notice = None;
        self.focus_name = true;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if self.mode == RowMode::Editing {
            self.current_input.name = name.into();
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        if self.mode == RowMode::Editing {
            self.current_input.email = email.into();
        }
    }

    /// Abandon the edit and restore the last confirmed values.
    pub fn cancel(&mut self) {
        if self.mode != RowMode::Editing {
            return;
        }
        if let Some(confirmed) = &self.last_confirmed {
            self.displayed = confirmed.clone();
        }
        self.mode = RowMode::Viewing;
        self.notice = None;
        self.focus_name = false;
    }

    /// Validate the current input and push it to the backend.
    ///
    /// Blank fields never reach the backend; the row stays editable with a
    /// validation notice. A backend failure also keeps the row editable,
    /// with the attempted values intact so nothing typed is lost.
    pub async fn save(&mut self, backend: &dyn UpdateBackend) {
        if self.mode != RowMode::Editing {
            return;
        }

        let attempted = self.current_input.trimmed();
        if attempted.has_blank_field() {
            self.notice = Some(Notice::Validation(
                "Name and email are required".to_string(),
            ));
            return;
        }

        self.mode = RowMode::Saving;
        self.focus_name = false;
        self.notice = None;

        match backend
            .update(self.id, &attempted.name, &attempted.email)
            .await
        {
            Ok(()) => {
                self.displayed = attempted.clone();
                self.last_confirmed = Some(attempted);
                self.mode = RowMode::Viewing;
                self.notice = Some(Notice::Success("Record updated".to_string()));
            }
            Err(reason) => {
                self.current_input = attempted;
                self.mode = RowMode::Editing;
                self.notice = Some(Notice::Error(reason));
            }
        }
    }

    /// Project the state into what the row should show. Pure; calling it
    /// never changes state.
    pub fn render(&self) -> RowView {
        match self.mode {
            RowMode::Viewing => RowView::Display {
                name: self.displayed.name.clone(),
                email: self.displayed.email.clone(),
                notice: self.notice.clone(),
            },
            RowMode::Editing => RowView::Editor {
                name: self.current_input.name.clone(),
                email: self.current_input.email.clone(),
                save_enabled: true,
                saving: false,
                focus_name: self.focus_name,
                notice: self.notice.clone(),
            },
            RowMode::Saving => RowView::Editor {
                name: self.current_input.name.clone(),
                email: self.current_input.email.clone(),
                save_enabled: false,
                saving: true,
                focus_name: false,
                notice: None,
            },
        }
    }
}

/// Editors for a whole record table, keyed by record id.
///
/// Rows are fully independent; editing one never touches its siblings.
#[derive(Debug, Default)]
pub struct EditTable {
    rows: BTreeMap<i64, RowEditor>,
}

impl EditTable {
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            rows: records
                .iter()
                .map(|r| (r.id, RowEditor::new(r)))
                .collect(),
        }
    }

    pub fn row(&self, id: i64) -> Option<&RowEditor> {
        self.rows.get(&id)
    }

    pub fn row_mut(&mut self, id: i64) -> Option<&mut RowEditor> {
        self.rows.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
