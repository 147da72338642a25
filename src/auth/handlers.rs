//! Authentication API handlers

use crate::api::handlers::pages;
use crate::api::handlers::AppState;
use crate::api::respond::JsonOrForm;
use crate::auth::cookies::{clear_session_cookie, session_cookie, token_from_headers};
use crate::auth::models::{LoginRequest, LoginResponse, OkResponse, SessionResponse};
use crate::core::error::{AdminError, Result};
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};

/// Handler for POST /api/login - open a session
///
/// A malformed body maps to a 400 `{ok:false, message}` like every other
/// validation failure, not the extractor's plain-text rejection.
pub async fn login(
    State(state): State<AppState>,
    JsonOrForm(req): JsonOrForm<LoginRequest>,
) -> Result<Response> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AdminError::Validation(
            "Username and password are required".to_string(),
        ));
    }

    tracing::info!(username = %req.username, "Login attempt");
    let session = state.gateway.authenticate(&req.username, &req.password).await?;

    let cookie = session_cookie(
        &state.session.cookie_name,
        &session.token,
        state.session.ttl_secs,
    );

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            ok: true,
            message: "Login successful".to_string(),
        }),
    )
        .into_response())
}

/// Handler for POST /api/logout - destroy the session
///
/// Idempotent: logging out without a live session still reports success.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = token_from_headers(&headers, &state.session.cookie_name) {
        state.gateway.end_session(&token).await;
    }

    (
        [(
            header::SET_COOKIE,
            clear_session_cookie(&state.session.cookie_name),
        )],
        Json(OkResponse { ok: true }),
    )
        .into_response()
}

/// Handler for GET /api/session - report session state without side effects
pub async fn session_check(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<SessionResponse> {
    let session = match token_from_headers(&headers, &state.session.cookie_name) {
        Some(token) => state.gateway.check_session(&token).await,
        None => None,
    };

    match session {
        Some(s) => Json(SessionResponse {
            ok: true,
            username: Some(s.username),
        }),
        None => Json(SessionResponse {
            ok: false,
            username: None,
        }),
    }
}

/// Handler for GET /login - render the login form
///
/// Already-authenticated visitors are sent back to the list page.
pub async fn login_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = token_from_headers(&headers, &state.session.cookie_name) {
        if state.gateway.check_session(&token).await.is_some() {
            return Redirect::to("/").into_response();
        }
    }

    Html(pages::render_login_page()).into_response()
}
