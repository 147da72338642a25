//! Session-gating middleware
//!
//! Every CRUD route sits behind `require_session`. The rejection shape
//! depends on the caller's declared response mode: structured callers get a
//! 401 `{ok:false}` body, browser navigations get a redirect to the login
//! page.

use crate::api::respond::ResponseMode;
use crate::auth::cookies::token_from_headers;
use crate::core::error::{AdminError, Result};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

/// Authenticated user attached to gated requests
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub user_id: i64,
    pub username: String,
}

/// Middleware guarding the CRUD routes
pub async fn require_session(
    State(state): State<crate::api::handlers::AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = token_from_headers(request.headers(), &state.session.cookie_name);

    // Missing, unknown and expired tokens are all equally anonymous.
    let session = match token {
        Some(t) => state.gateway.check_session(&t).await,
        None => None,
    };

    let session = match session {
        Some(s) => s,
        None => {
            return match ResponseMode::from_headers(request.headers()) {
                ResponseMode::Structured => {
                    AdminError::Unauthenticated("Session required".to_string()).into_response()
                }
                ResponseMode::Redirect => Redirect::to("/login").into_response(),
            };
        }
    };

    request.extensions_mut().insert(CurrentUser {
        user_id: session.user_id,
        username: session.username,
    });

    next.run(request).await
}

// Allow handlers to take CurrentUser as an extractor.
use axum::{extract::FromRequestParts, http::request::Parts};

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AdminError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AdminError::Unauthenticated("Session required".to_string()))
    }
}
