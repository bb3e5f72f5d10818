//! Global configuration loader for Roster.
//!
//! Reads `config.toml` from the data directory (`~/.roster/` in production)
//! and deserializes it into [`RosterConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::Path;

use roster_types::config::RosterConfig;

use crate::filesystem::config_path;

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`RosterConfig::default()`].
/// - Unreadable or unparsable file: logs a warning, returns the default.
pub async fn load_config(data_dir: &Path) -> RosterConfig {
    let path = config_path(data_dir);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            return RosterConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return RosterConfig::default();
        }
    };

    match toml::from_str::<RosterConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            RosterConfig::default()
        }
    }
}

/// Resolve the neighbor count for a search: explicit flag first, then config.
pub fn resolve_search_k(config: &RosterConfig, requested: Option<usize>) -> usize {
    requested.unwrap_or(config.search.default_k)
}
