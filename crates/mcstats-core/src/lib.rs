//! mcstats-core - Core library for mcstats
//!
//! Locates Minecraft Java Edition saves and logs, normalizes them into typed
//! tables, and renders the summary dashboard.

pub mod charts;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod parsers;
pub mod store;

pub use config::{ConfigFile, Layout, ReportConfig};
pub use error::{CoreError, LoadError, LoadReport};
pub use export::{
    export_dashboard_to_html, export_logins_to_csv, export_report_to_json, export_stats_to_csv,
    export_worlds_to_csv, render_dashboard, Dashboard,
};
pub use store::ReportStore;
