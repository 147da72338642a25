//! Record CRUD handlers
//!
//! Every mutation answers in the caller's declared response mode: browser
//! forms get redirects back to the list page, structured callers get
//! `{ok, ...}` JSON bodies.

use crate::api::handlers::{pages, AppState};
use crate::api::respond::{failure, JsonOrForm, ResponseMode};
use crate::auth::CurrentUser;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

/// Incoming record fields for create and update.
///
/// Both field names from the original admin forms are accepted.
#[derive(Debug, Deserialize)]
pub struct RecordInput {
    #[serde(alias = "nombre")]
    pub name: Option<String>,
    #[serde(alias = "correo")]
    pub email: Option<String>,
}

impl RecordInput {
    /// Trim both fields and reject blank ones.
    fn validated(&self) -> Option<(String, String)> {
        let name = self.name.as_deref().unwrap_or("").trim();
        let email = self.email.as_deref().unwrap_or("").trim();

        if name.is_empty() || email.is_empty() {
            return None;
        }
        Some((name.to_string(), email.to_string()))
    }
}

/// Handler for GET / - render the record list
///
/// A storage failure here degrades to an empty list instead of an error
/// page, so the admin panel stays reachable.
pub async fn list_page(State(state): State<AppState>, user: CurrentUser) -> Html<String> {
    let records = match state.records.list().await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load records, rendering empty list");
            Vec::new()
        }
    };

    Html(pages::render_list_page(&records, &user.username))
}

/// Handler for POST /add - create a record
pub async fn add_record(
    State(state): State<AppState>,
    mode: ResponseMode,
    JsonOrForm(input): JsonOrForm<RecordInput>,
) -> Response {
    let (name, email) = match input.validated() {
        Some(fields) => fields,
        None => {
            return failure(
                mode,
                StatusCode::BAD_REQUEST,
                "Name and email are required",
            )
        }
    };

    match state.records.create(&name, &email).await {
        Ok(record) => {
            tracing::info!(id = record.id, "Record created");
            match mode {
                ResponseMode::Redirect => Redirect::to("/").into_response(),
                ResponseMode::Structured => {
                    (StatusCode::CREATED, Json(json!({ "ok": true, "record": record })))
                        .into_response()
                }
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create record");
            failure(mode, StatusCode::INTERNAL_SERVER_ERROR, "Could not add record")
        }
    }
}

/// Handler for POST /update/:id - overwrite a record's fields
///
/// Last write wins; updating an id that no longer exists succeeds with no
/// effect.
pub async fn update_record(
    State(state): State<AppState>,
    mode: ResponseMode,
    Path(id): Path<String>,
    JsonOrForm(input): JsonOrForm<RecordInput>,
) -> Response {
    let id = match parse_record_id(&id) {
        Some(id) => id,
        None => return failure(mode, StatusCode::BAD_REQUEST, "Invalid record id"),
    };

    let (name, email) = match input.validated() {
        Some(fields) => fields,
        None => {
            return failure(
                mode,
                StatusCode::BAD_REQUEST,
                "Name and email are required",
            )
        }
    };

    match state.records.update(id, &name, &email).await {
        Ok(()) => match mode {
            ResponseMode::Structured => Json(json!({ "ok": true })).into_response(),
            ResponseMode::Redirect => Redirect::to("/").into_response(),
        },
        Err(e) => {
            tracing::error!(error = %e, id, "Failed to update record");
            failure(
                mode,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not update record",
            )
        }
    }
}

/// Handler for GET /delete/:id - remove a record
///
/// Idempotent: deleting an absent id still lands back on the list page.
pub async fn delete_record(
    State(state): State<AppState>,
    mode: ResponseMode,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_record_id(&id) {
        Some(id) => id,
        None => return failure(mode, StatusCode::BAD_REQUEST, "Invalid record id"),
    };

    match state.records.delete(id).await {
        Ok(()) => {
            tracing::info!(id, "Record deleted");
            match mode {
                ResponseMode::Structured => Json(json!({ "ok": true })).into_response(),
                ResponseMode::Redirect => Redirect::to("/").into_response(),
            }
        }
        Err(e) => {
            tracing::error!(error = %e, id, "Failed to delete record");
            failure(
                mode,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not delete record",
            )
        }
    }
}

fn parse_record_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}
