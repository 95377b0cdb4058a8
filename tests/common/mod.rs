//! Common test utilities and helpers
//!
//! Shared test infrastructure for the integration tests.

use rentalboard::config::ConnectionConfig;
use rentalboard::db::postgres::PostgresProvider;

/// Test database connection config, from `TEST_DB_*` variables
pub fn test_config() -> ConnectionConfig {
    ConnectionConfig {
        host: std::env::var("TEST_DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
        port: std::env::var("TEST_DB_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5433),
        database: std::env::var("TEST_DB_NAME").unwrap_or_else(|_| "postgres".to_string()),
        username: std::env::var("TEST_DB_USER").unwrap_or_else(|_| "postgres".to_string()),
        password: Some(
            std::env::var("TEST_DB_PASSWORD").unwrap_or_else(|_| "test_password".to_string()),
        ),
    }
}

/// Connect to the test database, or `None` (with a note) when it is not
/// available
pub async fn connect_or_skip() -> Option<PostgresProvider> {
    let config = test_config();
    match PostgresProvider::connect(&config).await {
        Ok(provider) => Some(provider),
        Err(e) => {
            eprintln!(
                "Skipping test: Database not available at {}:{} - {}",
                config.host, config.port, e
            );
            None
        }
    }
}
