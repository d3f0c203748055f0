//! Built-in handler for known resource groups with unknown operations.

use async_trait::async_trait;
use serde_json::json;

use crate::domain::Command;
use crate::handlers::{Handler, HandlerError};

/// Always answers with the same not-found payload shape:
/// `{"error": "not_found", "message": ..., "command": [...]}`.
pub struct NotFoundHandler;

#[async_trait]
impl Handler for NotFoundHandler {
    async fn execute(&self, command: &Command) -> Result<serde_json::Value, HandlerError> {
        Ok(json!({
            "error": "not_found",
            "message": format!("No operation matches '{}'", command),
            "command": command,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_not_found_payload_shape() {
        let command = Command::from_path("live-visitors/everything").unwrap();
        let value = NotFoundHandler.execute(&command).await.unwrap();

        assert_eq!(
            value,
            json!({
                "error": "not_found",
                "message": "No operation matches 'live-visitors/everything'",
                "command": ["live-visitors", "everything"],
            })
        );
    }
}
