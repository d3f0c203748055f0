//! Handlers - the collaborators the router dispatches to.
//!
//! Every handler implements the same capability: execute a command and
//! return a JSON value. Concrete handlers are supplied at startup through
//! the [`HandlerRegistry`].

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Command;

mod not_found;
mod query;
mod registry;

pub use not_found::*;
pub use query::*;
pub use registry::*;

/// Errors raised by a handler's execute call.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The command does not carry what the handler needs.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Catch-all for handlers registered from outside this crate whose
    /// failures fit neither bad input nor a database error.
    #[error("Handler failed: {0}")]
    Failed(String),
}

/// A single data operation.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Execute the operation for the full command.
    async fn execute(&self, command: &Command) -> Result<serde_json::Value, HandlerError>;
}
