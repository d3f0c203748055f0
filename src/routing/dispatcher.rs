//! Dispatcher - resolves a command, runs its handler and serializes the result.

use uuid::Uuid;

use crate::domain::{Command, HandlerKind, Verb};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::handlers::HandlerRegistry;
use crate::routing::RouteTable;

/// Serialized output of one dispatched command.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    /// The handler kind that produced the body.
    pub handler: HandlerKind,
    /// JSON text. Slashes and non-ASCII characters are not escaped.
    pub body: String,
}

/// Binds the routing table to the handler registry.
pub struct Dispatcher {
    table: RouteTable,
    registry: HandlerRegistry,
}

impl Dispatcher {
    pub fn new(table: RouteTable, registry: HandlerRegistry) -> Self {
        Self { table, registry }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Resolve the command, execute its handler and serialize the result.
    ///
    /// Handler errors are returned unchanged as the source of
    /// [`AnalyticsError::Handler`], together with the route that produced them.
    pub async fn dispatch(&self, verb: &Verb, command: &Command) -> AnalyticsResult<DispatchOutcome> {
        let request_id = Uuid::new_v4();

        let kind = self.table.resolve(verb, command).map_err(|e| {
            tracing::warn!(
                request_id = %request_id,
                verb = %verb,
                command = %command,
                "No route for command"
            );
            e
        })?;

        tracing::debug!(
            request_id = %request_id,
            verb = %verb,
            command = %command,
            handler = %kind,
            "Command resolved"
        );

        let handler = self
            .registry
            .get(kind)
            .ok_or(AnalyticsError::HandlerUnavailable(kind))?;

        let value = handler.execute(command).await.map_err(|source| {
            tracing::error!(
                request_id = %request_id,
                verb = %verb,
                command = %command,
                handler = %kind,
                error = %source,
                "Handler failed"
            );
            AnalyticsError::Handler {
                kind,
                verb: verb.clone(),
                command: command.clone(),
                source,
            }
        })?;

        // serde_json never escapes '/' or non-ASCII characters.
        let body = serde_json::to_string(&value)?;

        tracing::info!(
            request_id = %request_id,
            verb = %verb,
            command = %command,
            handler = %kind,
            bytes = body.len(),
            "Command dispatched"
        );

        Ok(DispatchOutcome {
            handler: kind,
            body,
        })
    }
}
