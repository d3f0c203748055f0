//! Storage layer for the analytics database.

mod rows;

pub use rows::*;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;
use crate::error::AnalyticsResult;

/// Open the connection pool handlers query through.
pub async fn connect(config: &DatabaseConfig) -> AnalyticsResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    Ok(pool)
}
