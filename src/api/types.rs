//! API response types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::HandlerKind;
use crate::routing::VerbScope;

/// One routing table row.
#[derive(Debug, Serialize, ToSchema)]
pub struct RouteInfo {
    /// Verb the route answers to (`ANY` for verb-independent routes).
    pub verb: VerbScope,
    /// Command segments joined with `/`.
    pub path: String,
    pub handler: HandlerKind,
    /// Whether a handler is registered for this route.
    pub registered: bool,
}

/// Response for listing routes.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListRoutesResponse {
    pub routes: Vec<RouteInfo>,
    pub total: usize,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Rows in the routing table.
    pub routes: usize,
    /// Registered handlers, including the built-in not-found handler.
    pub registered_handlers: usize,
    /// Whether the configured analytics CLI is present on disk.
    pub analytics_cli_available: bool,
    pub timestamp: DateTime<Utc>,
}
