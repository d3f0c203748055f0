//! API key authentication for the command endpoints.

mod api_key;
mod middleware;

pub use api_key::*;
pub use middleware::*;
