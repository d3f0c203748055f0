//! HTTP API layer for the analytics router.
//!
//! Exposes command dispatch, the routing table and health.

pub mod handlers;
mod routes;
mod types;

pub use routes::build_router;
