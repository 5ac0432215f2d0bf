//! Configuration loading for the caselink bridge.
//!
//! Uses figment to merge built-in defaults, a YAML or JSON file, and
//! `CASELINK_*` environment variables. The configuration is read once at
//! start-up.

pub mod schema;

pub use schema::{Config, LogConfig, UpstreamConfig};
