//! Per-world TOML configuration for ItemGuard.
//!
//! Layout under the config directory:
//! - `config.toml`: global settings (debounce)
//! - `worlds/<world>.toml`: one settings file per scope
//!
//! Scopes never inherit from each other. Anything unset reads as the key's
//! built-in default.

mod settings;
mod source;
mod store;

pub use settings::WorldSettings;
pub use source::PolicyConfig;
pub use store::ConfigStore;

use itemguard_policy::DebounceConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings read from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalSettings {
    #[serde(default)]
    pub debounce: DebounceConfig,
}

impl GlobalSettings {
    /// Load `config.toml` from `config_dir`, returning defaults on any error.
    pub fn load(config_dir: &Path) -> Self {
        load_settings_file(&config_dir.join("config.toml"))
    }
}

/// Get the ItemGuard config directory path (~/.itemguard/).
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ITEMGUARD_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".itemguard")
}

/// Directory holding one settings file per world.
pub fn worlds_dir(config_dir: &Path) -> PathBuf {
    config_dir.join("worlds")
}

fn load_settings_file(path: &Path) -> GlobalSettings {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse {}: {}", path.display(), e);
            GlobalSettings::default()
        }),
        Err(_) => GlobalSettings::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_settings_default_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = GlobalSettings::load(dir.path());
        assert_eq!(settings.debounce, DebounceConfig::default());
    }

    #[test]
    fn test_global_settings_parse() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[debounce]\ncooldown_ms = 2500\n",
        )
        .unwrap();
        let settings = GlobalSettings::load(dir.path());
        assert_eq!(settings.debounce.cooldown_ms, 2500);
        assert_eq!(settings.debounce.capacity, 4096);
    }

    #[test]
    fn test_global_settings_bad_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[debounce\n").unwrap();
        let settings = GlobalSettings::load(dir.path());
        assert_eq!(settings.debounce, DebounceConfig::default());
    }

    #[test]
    fn test_worlds_dir_is_nested() {
        assert_eq!(
            worlds_dir(Path::new("/srv/guard")),
            PathBuf::from("/srv/guard/worlds")
        );
    }
}
