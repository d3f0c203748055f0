//! HTTP request handlers.

use axum::{
    extract::{Path, State},
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

use crate::api::types::*;
use crate::domain::{Command, HandlerKind, Verb};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::AppState;

/// Mount point of the command endpoint.
const COMMAND_PREFIX: &str = "/v1/analytics/";

/// Dispatch a command to its handler.
///
/// GET|POST|PUT /v1/analytics/{command}
///
/// The request method selects the routing sub-table. The raw path after
/// `/v1/analytics/` is split on `/` before each segment is percent-decoded,
/// so `%2F` inside a segment never creates a new one. POST and PUT are
/// served by the same endpoint.
#[utoipa::path(
    get,
    path = "/v1/analytics/{command}",
    params(
        ("command" = String, Path, description = "Command segments separated by '/', e.g. statistics/attributes")
    ),
    responses(
        (status = 200, description = "Handler output as JSON"),
        (status = 404, description = "Unknown route, or unknown operation in a known group"),
        (status = 501, description = "No handler registered for the route"),
        (status = 500, description = "Handler failed")
    ),
    security(("api_key" = [])),
    tag = "analytics"
)]
pub async fn dispatch_command(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> AnalyticsResult<Response> {
    let raw = uri
        .path()
        .strip_prefix(COMMAND_PREFIX)
        .ok_or_else(|| {
            AnalyticsError::BadRequest(format!("path must start with {COMMAND_PREFIX}"))
        })?;
    let command = Command::from_encoded_path(raw).map_err(AnalyticsError::BadRequest)?;
    let verb = Verb::from(method.as_str());

    let outcome = state.dispatcher.dispatch(&verb, &command).await?;

    let status = if outcome.handler == HandlerKind::NotFound {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        outcome.body,
    )
        .into_response())
}

/// List the routing table.
///
/// GET /v1/routes
#[utoipa::path(
    get,
    path = "/v1/routes",
    responses(
        (status = 200, description = "Routing table", body = ListRoutesResponse)
    ),
    security(("api_key" = [])),
    tag = "analytics"
)]
pub async fn list_routes(State(state): State<AppState>) -> Json<ListRoutesResponse> {
    let registry = state.dispatcher.registry();

    let routes: Vec<RouteInfo> = state
        .dispatcher
        .table()
        .entries()
        .iter()
        .map(|entry| RouteInfo {
            verb: entry.scope,
            path: entry.path.join("/"),
            handler: entry.handler,
            registered: registry.contains(entry.handler),
        })
        .collect();

    Json(ListRoutesResponse {
        total: routes.len(),
        routes,
    })
}

/// Revoke an API key by its ID. The key is rejected from the next request on.
///
/// DELETE /v1/keys/{id}
#[utoipa::path(
    delete,
    path = "/v1/keys/{id}",
    params(
        ("id" = String, Path, description = "Configured key ID")
    ),
    responses(
        (status = 204, description = "Key revoked"),
        (status = 404, description = "No key with this ID")
    ),
    security(("api_key" = [])),
    tag = "auth"
)]
pub async fn revoke_api_key(
    State(state): State<AppState>,
    Path(key_id): Path<String>,
) -> AnalyticsResult<StatusCode> {
    if !state.api_keys.revoke_key(&key_id).await {
        return Err(AnalyticsError::UnknownApiKey(key_id));
    }

    tracing::info!(key_id = %key_id, "API key revoked");
    Ok(StatusCode::NO_CONTENT)
}

/// Health check endpoint.
///
/// GET /v1/health
#[utoipa::path(
    get,
    path = "/v1/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        routes: state.dispatcher.table().entries().len(),
        registered_handlers: state.dispatcher.registry().len(),
        analytics_cli_available: state.analytics.cli_exists(),
        timestamp: chrono::Utc::now(),
    })
}
