//! Data directory layout.

use std::path::{Path, PathBuf};

/// File holding the assignment snapshot inside the data directory.
pub const ASSIGNMENTS_FILE: &str = "assignments.json";

/// File holding global configuration inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Resolve the data directory.
///
/// `ROSTER_DATA_DIR` wins, then `~/.roster`, then `./.roster`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ROSTER_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".roster");
    }

    PathBuf::from(".roster")
}

pub fn assignments_path(data_dir: &Path) -> PathBuf {
    data_dir.join(ASSIGNMENTS_FILE)
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}
