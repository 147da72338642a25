//! Error type system for the admin panel
//!
//! This module provides the error taxonomy shared by the auth gateway and the
//! CRUD API:
//! - Hierarchical error classification
//! - HTTP status code mapping
//! - Structured `{ok, message}` bodies with trace IDs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Main error type for the admin panel
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    // System-level errors
    #[error("System initialization failed: {0}")]
    InitializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    // API-level errors
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    // Login failure. Deliberately a single generic message so callers cannot
    // distinguish an unknown username from a wrong password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // Blocking-task failures from the database executor
    #[error("Task error: {0}")]
    TaskError(String),
}

impl AdminError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdminError::Validation(_) => StatusCode::BAD_REQUEST,

            AdminError::Unauthenticated(_) | AdminError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }

            AdminError::InitializationError(_)
            | AdminError::ConfigError(_)
            | AdminError::DatabaseError(_)
            | AdminError::IoError(_)
            | AdminError::TaskError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type name for logging
    pub fn error_type(&self) -> &'static str {
        match self {
            AdminError::InitializationError(_) => "InitializationError",
            AdminError::ConfigError(_) => "ConfigError",
            AdminError::DatabaseError(_) => "DatabaseError",
            AdminError::Validation(_) => "Validation",
            AdminError::Unauthenticated(_) => "Unauthenticated",
            AdminError::InvalidCredentials => "InvalidCredentials",
            AdminError::IoError(_) => "IoError",
            AdminError::TaskError(_) => "TaskError",
        }
    }

    /// The message shown to API callers.
    ///
    /// Store and system errors never leak their internals; the original error
    /// is logged and the caller gets a generic message.
    pub fn public_message(&self) -> String {
        match self {
            AdminError::Validation(msg) => msg.clone(),
            AdminError::Unauthenticated(msg) => msg.clone(),
            AdminError::InvalidCredentials => self.to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

/// Error response body for structured (JSON) callers
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false` for errors; mirrors the `{ok, message}` success shape
    pub ok: bool,
    /// Human-readable, client-safe error message
    pub message: String,
    /// Unique trace ID for correlating with server logs
    pub trace_id: String,
}

impl ErrorResponse {
    /// Create a new error response with a generated trace ID
    pub fn new(message: String) -> Self {
        Self {
            ok: false,
            message,
            trace_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an error response from an AdminError
    pub fn from_error(error: &AdminError) -> Self {
        Self::new(error.public_message())
    }
}

/// Implement IntoResponse for AdminError to enable automatic error handling in Axum
impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let error_response = ErrorResponse::from_error(&self);

        tracing::error!(
            error_type = self.error_type(),
            trace_id = %error_response.trace_id,
            status_code = %status_code,
            "Request failed: {}",
            self
        );

        (status_code, Json(error_response)).into_response()
    }
}

/// Result type alias for operations that can fail with AdminError
pub type Result<T> = std::result::Result<T, AdminError>;

/// Context extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let context_str = context.into();
            AdminError::InitializationError(format!("{}: {}", context_str, e))
        })
    }
}
