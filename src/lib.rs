//! Headless core of the IMGO dashboard: sample-data loading, filtering and
//! aggregation. The `imgo-dashboard` binary renders it with egui.

pub mod config;
pub mod data;

/// Shown in the sidebar and About page.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
