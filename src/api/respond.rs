//! Transport-boundary response plumbing
//!
//! The CRUD operations never sniff the request themselves; the response mode
//! is decided once here, from the request's declared preferences, and passed
//! down as an explicit input.

use crate::core::error::{AdminError, ErrorResponse, Result};
use axum::{
    extract::{Form, FromRequest, FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

/// How the caller wants to be answered.
///
/// Structured callers (JSON Accept/Content-Type, or XHR) get machine-readable
/// `{ok, message}` bodies; everything else is treated as a browser navigation
/// and gets redirects or plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    Structured,
    Redirect,
}

impl ResponseMode {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header_contains = |name: header::HeaderName, needle: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.contains(needle))
                .unwrap_or(false)
        };

        let accepts_json = header_contains(header::ACCEPT, "application/json");
        let sends_json = header_contains(header::CONTENT_TYPE, "application/json");
        let is_xhr = headers
            .get("x-requested-with")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
            .unwrap_or(false);

        if accepts_json || sends_json || is_xhr {
            ResponseMode::Structured
        } else {
            ResponseMode::Redirect
        }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for ResponseMode
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        Ok(ResponseMode::from_headers(&parts.headers))
    }
}

/// Body extractor accepting either JSON or urlencoded-form payloads,
/// selected by the declared Content-Type.
pub struct JsonOrForm<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AdminError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if content_type.starts_with("application/json") {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AdminError::Validation(format!("Invalid JSON body: {}", e)))?;
            Ok(JsonOrForm(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AdminError::Validation(format!("Invalid form body: {}", e)))?;
            Ok(JsonOrForm(value))
        }
    }
}

/// Build a failure response in the caller's declared mode.
///
/// Structured callers get `{ok:false, message}`; browser callers get the
/// message as plain text with the same status code.
pub fn failure(mode: ResponseMode, status: StatusCode, message: &str) -> Response {
    match mode {
        ResponseMode::Structured => {
            (status, Json(ErrorResponse::new(message.to_string()))).into_response()
        }
        ResponseMode::Redirect => (status, message.to_string()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(name: &str, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::HeaderName::from_bytes(name.as_bytes()).unwrap(),
            value.parse().unwrap(),
        );
        headers
    }

    #[test]
    fn test_json_accept_is_structured() {
        let headers = headers_with("accept", "application/json, text/plain");
        assert_eq!(ResponseMode::from_headers(&headers), ResponseMode::Structured);
    }

    #[test]
    fn test_json_content_type_is_structured() {
        let headers = headers_with("content-type", "application/json");
        assert_eq!(ResponseMode::from_headers(&headers), ResponseMode::Structured);
    }

    #[test]
    fn test_xhr_is_structured() {
        let headers = headers_with("x-requested-with", "XMLHttpRequest");
        assert_eq!(ResponseMode::from_headers(&headers), ResponseMode::Structured);
    }

    #[test]
    fn test_browser_navigation_is_redirect() {
        let headers = headers_with(
            "accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        );
        assert_eq!(ResponseMode::from_headers(&headers), ResponseMode::Redirect);

        assert_eq!(
            ResponseMode::from_headers(&HeaderMap::new()),
            ResponseMode::Redirect
        );
    }
}
