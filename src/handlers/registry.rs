//! Handler registry - maps handler kinds to handler objects.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::sqlite::SqlitePool;

use crate::config::HandlerConfig;
use crate::domain::HandlerKind;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::handlers::{Handler, NotFoundHandler, QueryHandler};

/// Registry of handlers, supplied to the dispatcher at startup.
///
/// The not-found handler is always present.
pub struct HandlerRegistry {
    handlers: HashMap<HandlerKind, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        let mut handlers: HashMap<HandlerKind, Arc<dyn Handler>> = HashMap::new();
        handlers.insert(HandlerKind::NotFound, Arc::new(NotFoundHandler));
        Self { handlers }
    }

    /// Build a registry of query handlers from configuration.
    ///
    /// Each kind may be configured once, and the not-found handler is not
    /// configurable.
    pub fn from_config(configs: &[HandlerConfig], pool: &SqlitePool) -> AnalyticsResult<Self> {
        let mut registry = Self::new();

        for config in configs {
            if config.kind == HandlerKind::NotFound {
                return Err(AnalyticsError::Config(
                    "NotFound is built in and cannot be configured".to_string(),
                ));
            }
            if registry.contains(config.kind) {
                return Err(AnalyticsError::Config(format!(
                    "Handler {} is configured more than once",
                    config.kind
                )));
            }
            registry.register(
                config.kind,
                Arc::new(QueryHandler::new(
                    pool.clone(),
                    config.query.clone(),
                    config.bind.clone(),
                )),
            );
        }

        Ok(registry)
    }

    /// Register a handler, replacing any previous one for the same kind.
    pub fn register(&mut self, kind: HandlerKind, handler: Arc<dyn Handler>) {
        tracing::debug!(handler = %kind, "registering handler");
        self.handlers.insert(kind, handler);
    }

    pub fn get(&self, kind: HandlerKind) -> Option<&dyn Handler> {
        self.handlers.get(&kind).map(|h| h.as_ref())
    }

    pub fn contains(&self, kind: HandlerKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Number of registered handlers, including the built-in not-found handler.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("kinds", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Command;
    use sqlx::sqlite::SqlitePoolOptions;
    use tokio_test::{assert_err, assert_ok};

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    fn query_config(kind: HandlerKind, query: &str) -> HandlerConfig {
        HandlerConfig {
            kind,
            query: query.to_string(),
            bind: vec![],
        }
    }

    #[test]
    fn test_new_registry_has_not_found() {
        let registry = HandlerRegistry::new();
        assert!(registry.contains(HandlerKind::NotFound));
        assert!(!registry.contains(HandlerKind::JobGeo));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_from_config_registers_query_handlers() {
        let pool = memory_pool().await;
        let registry = assert_ok!(HandlerRegistry::from_config(
            &[
                query_config(HandlerKind::GetAllCountries, "SELECT 'DK' AS country"),
                query_config(HandlerKind::GetNonce, "SELECT 'abc' AS nonce"),
            ],
            &pool,
        ));

        assert_eq!(registry.len(), 3);
        let handler = registry.get(HandlerKind::GetNonce).unwrap();
        let value = handler
            .execute(&Command::from_path("wallet/metamask").unwrap())
            .await
            .unwrap();
        assert_eq!(value, serde_json::json!([{ "nonce": "abc" }]));
    }

    #[tokio::test]
    async fn test_duplicate_kind_rejected() {
        let pool = memory_pool().await;
        let err = assert_err!(HandlerRegistry::from_config(
            &[
                query_config(HandlerKind::GetAllPages, "SELECT 1"),
                query_config(HandlerKind::GetAllPages, "SELECT 2"),
            ],
            &pool,
        ));
        assert!(matches!(err, AnalyticsError::Config(_)));
    }

    #[tokio::test]
    async fn test_not_found_not_configurable() {
        let pool = memory_pool().await;
        let err = assert_err!(HandlerRegistry::from_config(
            &[query_config(HandlerKind::NotFound, "SELECT 1")],
            &pool,
        ));
        assert!(matches!(err, AnalyticsError::Config(_)));
    }
}
