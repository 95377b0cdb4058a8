//! User settings and preferences
//!
//! Manages application settings stored in ~/.rentalboard/config.toml:
//!
//! ```toml
//! [connection]
//! host = "warehouse.internal"
//! port = 5432
//! database = "pagila_dwh"
//! user = "analyst"
//!
//! [display]
//! metric = "revenue"
//! show_tables = true
//! ```
//!
//! A password in the file is ignored; it is only taken from the command
//! line, the environment or the connection form.

use crate::config::ConnectionConfig;
use crate::error::ConfigResult;
use crate::report::Metric;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Connection form defaults
    #[serde(default)]
    pub connection: ConnectionConfig,

    #[serde(default)]
    pub display: DisplaySettings,
}

/// Initial dashboard state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Metric selected when the dashboard opens
    #[serde(default)]
    pub metric: Metric,

    /// Whether the data tables start expanded
    #[serde(default)]
    pub show_tables: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            metric: Metric::Rentals,
            show_tables: false,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let mut settings: Settings = toml::from_str(content)?;
        settings.connection.password = None;
        Ok(settings)
    }
}

/// Load settings from the default config file, falling back to defaults
/// when it does not exist
pub fn load_settings() -> ConfigResult<Settings> {
    let path = ConnectionConfig::config_dir()?.join("config.toml");
    load_settings_from(&path)
}

/// Load settings from an explicit path
pub fn load_settings_from(path: &Path) -> ConfigResult<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)?;
    Settings::from_toml(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.connection, ConnectionConfig::default());
        assert_eq!(settings.display.metric, Metric::Rentals);
        assert!(!settings.display.show_tables);
    }

    #[test]
    fn test_partial_connection_table() {
        let settings = Settings::from_toml(
            r#"
            [connection]
            host = "warehouse"
            user = "analyst"

            [display]
            metric = "revenue"
            show_tables = true
            "#,
        )
        .unwrap();
        assert_eq!(settings.connection.host, "warehouse");
        assert_eq!(settings.connection.username, "analyst");
        assert_eq!(settings.connection.port, 5432);
        assert_eq!(settings.connection.database, "pagila_dwh");
        assert_eq!(settings.display.metric, Metric::Revenue);
        assert!(settings.display.show_tables);
    }

    #[test]
    fn test_password_in_file_is_ignored() {
        let settings = Settings::from_toml(
            r#"
            [connection]
            password = "from-file"
            "#,
        )
        .unwrap();
        assert!(settings.connection.password.is_none());
    }

    #[test]
    fn test_invalid_metric_is_an_error() {
        assert!(Settings::from_toml("[display]\nmetric = \"profit\"").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings =
            load_settings_from(Path::new("/nonexistent/rentalboard/config.toml")).unwrap();
        assert_eq!(settings.connection.host, "localhost");
    }
}
