pub mod config;
pub mod directives;
pub mod error;
pub mod telemetry;
