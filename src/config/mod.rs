//! Configuration management
//!
//! Handles connection parameters and user settings.

pub mod connections;
pub mod settings;

pub use connections::ConnectionConfig;
pub use settings::{DisplaySettings, Settings, load_settings};
