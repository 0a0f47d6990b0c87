//! skillradar-api — Remote candidate API client.
//!
//! Implements the `RemoteDirectory` trait over the dashboard's HTTP API,
//! plus an in-memory directory for tests and the workspace configuration.

pub mod client;
pub mod config;
pub mod error;
pub mod mock;

pub use client::ApiClient;
pub use config::{load_config_from, SkillRadarConfig};
pub use error::ApiError;
pub use mock::MockDirectory;
