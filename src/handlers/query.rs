//! SQL-backed handler.
//!
//! Runs one configured statement against the analytics database, binding
//! selected command segments as positional parameters, and returns the rows
//! as a JSON array of objects.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

use crate::domain::Command;
use crate::handlers::{Handler, HandlerError};
use crate::storage::row_to_json;

/// Handler backed by a single SQL statement.
pub struct QueryHandler {
    pool: SqlitePool,
    sql: String,
    /// Command segment indices, bound in order.
    bind: Vec<usize>,
}

impl QueryHandler {
    pub fn new(pool: SqlitePool, sql: impl Into<String>, bind: Vec<usize>) -> Self {
        Self {
            pool,
            sql: sql.into(),
            bind,
        }
    }
}

#[async_trait]
impl Handler for QueryHandler {
    async fn execute(&self, command: &Command) -> Result<serde_json::Value, HandlerError> {
        let mut query = sqlx::query(&self.sql);

        for &index in &self.bind {
            let segment = command.get(index).ok_or_else(|| {
                HandlerError::InvalidInput(format!(
                    "Command '{}' has no segment at position {}",
                    command, index
                ))
            })?;
            query = query.bind(segment.to_string());
        }

        let rows = query.fetch_all(&self.pool).await?;

        tracing::debug!(command = %command, rows = rows.len(), "Query executed");

        Ok(serde_json::Value::Array(
            rows.iter().map(row_to_json).collect(),
        ))
    }
}
