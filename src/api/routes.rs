//! Route definitions for the API.

use axum::{
    middleware,
    routing::{any, delete, get},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::auth::require_api_key;
use crate::AppState;

/// Security scheme modifier for OpenAPI.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-API-Key"))),
            );
        }
    }
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::dispatch_command,
        handlers::list_routes,
        handlers::revoke_api_key,
        handlers::health_check,
    ),
    components(schemas(
        crate::api::types::RouteInfo,
        crate::api::types::ListRoutesResponse,
        crate::api::types::HealthResponse,
        crate::domain::HandlerKind,
        crate::routing::VerbScope,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "analytics", description = "Analytics and consent commands"),
        (name = "auth", description = "API key management"),
        (name = "health", description = "Health and status endpoints")
    ),
    info(
        title = "Analytics Router API",
        version = "0.1.0",
        description = "Dispatches analytics and consent commands to their data handlers",
        license(name = "GPL-2.0-or-later")
    )
)]
pub struct ApiDoc;

/// Build the API router. Command routes require an API key when auth is
/// enabled; key revocation is only mounted then.
pub fn build_router(state: AppState, auth_enabled: bool) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let command_routes = Router::new()
        .route("/v1/analytics/*command", any(handlers::dispatch_command))
        .route("/v1/routes", get(handlers::list_routes));

    let command_routes = if auth_enabled {
        command_routes
            .route("/v1/keys/:id", delete(handlers::revoke_api_key))
            .layer(middleware::from_fn_with_state(
                state.api_keys.clone(),
                require_api_key,
            ))
    } else {
        command_routes
    };

    Router::new()
        .merge(command_routes)
        // Health
        .route("/v1/health", get(handlers::health_check))
        .with_state(state)
        // OpenAPI docs
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
