//! Top-level subcommand orchestration.
pub mod add;
pub mod backup;

use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::paths::HomeDir;

/// Resolve the manifest location string for this invocation.
///
/// `--config` wins; otherwise `$XDG_CONFIG_HOME/dotty/config.json`, falling
/// back to `~/.config/dotty/config.json`. The returned string may still
/// carry a leading `~` (from `--config`) — callers resolve it.
pub(crate) fn manifest_location(global: &GlobalOpts, home: &HomeDir) -> String {
    if let Some(config) = &global.config {
        return config.clone();
    }
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home.path().join(".config"));
    config_dir
        .join("dotty")
        .join("config.json")
        .to_string_lossy()
        .into_owned()
}
