//! Error types for the analytics router.
//!
//! Defines a unified error type that maps cleanly to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::{Command, HandlerKind, Verb};
use crate::handlers::HandlerError;

/// Unified error type for router operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// No resource group matches the command for this verb.
    #[error("No route for {verb} {command}")]
    UnknownRoute { verb: Verb, command: Command },

    /// The route resolved, but no handler was registered for the kind.
    #[error("No handler registered for {0}")]
    HandlerUnavailable(HandlerKind),

    /// A handler's execute call failed. The source is the handler's own error.
    #[error("Handler {kind} failed for {verb} {command}: {source}")]
    Handler {
        kind: HandlerKind,
        verb: Verb,
        command: Command,
        #[source]
        source: HandlerError,
    },

    #[error("No API key with ID {0}")]
    UnknownApiKey(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error response body for API clients.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AnalyticsError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AnalyticsError::UnknownRoute { .. } => (StatusCode::NOT_FOUND, "UNKNOWN_ROUTE"),
            AnalyticsError::HandlerUnavailable(_) => {
                (StatusCode::NOT_IMPLEMENTED, "HANDLER_UNAVAILABLE")
            }
            AnalyticsError::Handler {
                source: HandlerError::InvalidInput(_),
                ..
            } => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            AnalyticsError::Handler { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "HANDLER_FAILED")
            }
            AnalyticsError::UnknownApiKey(_) => (StatusCode::NOT_FOUND, "UNKNOWN_API_KEY"),
            AnalyticsError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AnalyticsError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            AnalyticsError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            AnalyticsError::Serialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "SERIALIZATION_ERROR")
            }
        }
    }
}

impl IntoResponse for AnalyticsError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let (message, details) = match &self {
            AnalyticsError::UnknownRoute { .. }
            | AnalyticsError::HandlerUnavailable(_)
            | AnalyticsError::UnknownApiKey(_)
            | AnalyticsError::BadRequest(_) => (self.to_string(), None),
            AnalyticsError::Handler {
                source: HandlerError::InvalidInput(msg),
                ..
            } => ("Invalid handler input".to_string(), Some(msg.clone())),
            AnalyticsError::Handler { .. } => {
                // Log the actual error but don't expose internals
                tracing::error!(error = %self, "Handler error");
                ("The handler failed to execute".to_string(), None)
            }
            AnalyticsError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                ("A database error occurred".to_string(), None)
            }
            AnalyticsError::Config(msg) => ("Configuration error".to_string(), Some(msg.clone())),
            AnalyticsError::Serialization(e) => (
                "Failed to serialize handler output".to_string(),
                Some(e.to_string()),
            ),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for router operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
