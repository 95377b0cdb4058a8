//! Terminal UI components
//!
//! All UI widgets and rendering logic using ratatui. Widgets hold their own
//! interaction state and render from the app state they are given; none of
//! them talk to the database.

pub mod charts;
pub mod connection_dialog;
pub mod data_table;
pub mod help;
pub mod layout;
pub mod render;
pub mod theme;
