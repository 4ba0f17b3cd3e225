//! jobtrail Client
//!
//! Everything needed to run a board outside a browser: TOML configuration,
//! a [`JobStore`](jobtrail_core::JobStore) over HTTP, a file-backed override
//! slot, and tracing setup.

pub mod config;
pub mod error;
pub mod rest;
pub mod telemetry;

pub use config::{AuthConfig, ClientConfig, ConfigError, LogConfig, OverridesConfig};
pub use error::ClientError;
pub use rest::RestJobStore;
pub use telemetry::init_tracing;

use jobtrail_board::Board;
use jobtrail_storage::{FileKeyValueStore, LocalOverrideStore};
use std::sync::Arc;

/// Override slot persisted to the configured file.
pub type FileOverrides = LocalOverrideStore<FileKeyValueStore>;

/// Open the override slot described by `config`.
pub fn open_overrides(config: &ClientConfig) -> Result<FileOverrides, ClientError> {
    let kv = FileKeyValueStore::open(config.overrides.path.clone())?;
    Ok(LocalOverrideStore::new(kv, &config.overrides.scope))
}

/// Build a board wired to the REST job store and the file override slot.
pub fn connect(config: &ClientConfig) -> Result<Board<FileOverrides>, ClientError> {
    let store = RestJobStore::new(config)?;
    let overrides = open_overrides(config)?;
    Ok(Board::new(Arc::new(store), overrides))
}
