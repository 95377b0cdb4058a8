//! Error types for rentalboard
//!
//! This module defines the error hierarchy used throughout the library.
//! We use `thiserror` for library-style errors with clear error chains; the
//! binary wraps them in `anyhow` at the edge.

use std::io;

/// Database operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DbError {
    /// Failed to establish connection (unreachable host, bad credentials,
    /// unknown database)
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Query execution failed (bad SQL, missing relation or column,
    /// permission denied, unexpected result shape)
    #[error("Query execution failed: {0}")]
    QueryFailed(String),
}

/// Errors that end a reporting pass.
///
/// Every variant keeps the underlying driver message so it can be shown to
/// the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// The connection could not be opened
    #[error("{0}")]
    Connection(DbError),

    /// Connected, but the smoke-test query against the view failed
    #[error("Connected to database, but {view} is not accessible. Error: {source}")]
    ViewUnavailable { view: &'static str, source: DbError },

    /// One of the report queries failed
    #[error("Report query failed: {0}")]
    Query(DbError),
}

/// Configuration loading/parsing errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Home directory not found
    #[error("Could not determine home directory")]
    NoHomeDir,

    /// Config file could not be read
    #[error("Failed to read configuration: {0}")]
    Io(#[from] io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Specialized Result type for database operations
pub type DbResult<T> = std::result::Result<T, DbError>;

/// Specialized Result type for reporting passes
pub type ReportResult<T> = std::result::Result<T, ReportError>;

/// Specialized Result type for config operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
