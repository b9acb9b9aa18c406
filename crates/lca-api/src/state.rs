//! Application state shared by every command.

use std::path::PathBuf;

use lca_infra::config::load_config;
use lca_infra::filesystem::{config_path, resolve_data_dir};
use lca_types::config::AssistantConfig;

/// Resolved data directory and the configuration loaded from it.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AssistantConfig,
    pub data_dir: PathBuf,
    pub config_path: PathBuf,
}

impl AppState {
    /// Resolve the data directory and load `config.toml`.
    ///
    /// A missing or malformed config file falls back to defaults; nothing
    /// is written to disk.
    pub async fn init() -> Self {
        let data_dir = resolve_data_dir();
        let config = load_config(&data_dir).await;
        let config_path = config_path(&data_dir);
        tracing::debug!(data_dir = %data_dir.display(), "Application state initialized");

        Self {
            config,
            data_dir,
            config_path,
        }
    }
}
