//! Assistant configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.lca/` in production)
//! and deserializes it into [`AssistantConfig`]. The default loader falls
//! back to built-in defaults when the file is missing or malformed; the
//! strict loader reports the problem instead.

use std::path::Path;

use lca_types::config::AssistantConfig;
use lca_types::error::ConfigError;
use lca_types::rule::validate_rules;

use crate::filesystem::config_path;

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AssistantConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
/// - Otherwise returns the parsed config.
///
/// Custom rules are not checked here; building the responder rejects an
/// invalid table.
pub async fn load_config(data_dir: &Path) -> AssistantConfig {
    match read_config(data_dir).await {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path(data_dir).display()
            );
            AssistantConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            AssistantConfig::default()
        }
    }
}

/// Load configuration, surfacing read, parse, and rule-table failures.
///
/// Returns `Ok(None)` when the file does not exist.
pub async fn load_config_strict(data_dir: &Path) -> Result<Option<AssistantConfig>, ConfigError> {
    let config = read_config(data_dir).await?;
    if let Some(config) = &config {
        validate_rules(&config.rules)?;
    }
    Ok(config)
}

async fn read_config(data_dir: &Path) -> Result<Option<AssistantConfig>, ConfigError> {
    let path = config_path(data_dir);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(ConfigError::Read(format!("{}: {err}", path.display()))),
    };

    toml::from_str::<AssistantConfig>(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse(format!("{}: {err}", path.display())))
}
