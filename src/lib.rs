pub mod constants;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod reports;
pub mod server;
pub mod sheets;

// Layered boundaries for application and infrastructure
pub mod app;
pub mod infra;
