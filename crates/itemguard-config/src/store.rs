//! The set of loaded world settings files.

use crate::settings::WorldSettings;
use itemguard_types::{ConfigError, Key, Scope};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// World settings loaded from a directory of `<world>.toml` files.
#[derive(Debug)]
pub struct ConfigStore {
    dir: PathBuf,
    worlds: BTreeMap<Scope, WorldSettings>,
    /// Returned for scopes without a file; every read yields the default.
    unset: WorldSettings,
}

impl ConfigStore {
    /// Load every `*.toml` file in `dir`. A missing directory loads nothing.
    ///
    /// A file that fails to parse is logged and treated as empty.
    pub fn load(dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let mut store = Self {
            dir: dir.into(),
            worlds: BTreeMap::new(),
            unset: WorldSettings::default(),
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-read the directory, replacing everything loaded so far.
    ///
    /// A file that cannot be read or parsed is logged and treated as empty.
    /// If the directory itself cannot be listed, the previous settings stay.
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        let mut worlds = BTreeMap::new();
        if self.dir.exists() {
            for entry in std::fs::read_dir(&self.dir)? {
                let path = match entry {
                    Ok(entry) => entry.path(),
                    Err(e) => {
                        tracing::warn!("Skipping entry in {}: {}", self.dir.display(), e);
                        continue;
                    }
                };
                if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                    continue;
                }
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let settings = read_settings(&path).unwrap_or_else(|e| {
                    tracing::warn!("{e}; treating {stem} as unconfigured");
                    WorldSettings::default()
                });
                worlds.insert(Scope::new(stem), settings);
            }
        }

        tracing::debug!(
            "Loaded {} world settings from {}",
            worlds.len(),
            self.dir.display()
        );
        self.worlds = worlds;
        Ok(())
    }

    /// Settings for `scope`, or an empty table if it has no file.
    pub fn settings(&self, scope: &Scope) -> &WorldSettings {
        self.worlds.get(scope).unwrap_or(&self.unset)
    }

    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.worlds.keys()
    }

    /// Add any of `keys` missing from each loaded world at their defaults,
    /// writing back changed files. Returns the number of files written.
    pub fn ensure_keys_present(&mut self, keys: &[Key]) -> Result<usize, ConfigError> {
        let mut written = 0;
        for (scope, settings) in &mut self.worlds {
            let mut changed = false;
            for key in keys {
                changed |= settings.insert_default(*key);
            }
            if changed {
                let path = self.dir.join(format!("{scope}.toml"));
                write_settings(&path, settings)?;
                tracing::info!("Added missing keys to {}", path.display());
                written += 1;
            }
        }
        Ok(written)
    }

    /// Create a defaults-filled settings file for `scope` if it has none.
    /// Returns whether a file was created.
    pub fn ensure_scope(&mut self, scope: &Scope) -> Result<bool, ConfigError> {
        if self.worlds.contains_key(scope) {
            return Ok(false);
        }
        let path = self.path_for(scope)?;

        std::fs::create_dir_all(&self.dir)?;
        let settings = WorldSettings::with_defaults();
        write_settings(&path, &settings)?;
        self.worlds.insert(scope.clone(), settings);
        tracing::info!("Created default settings for {}", scope);
        Ok(true)
    }

    fn path_for(&self, scope: &Scope) -> Result<PathBuf, ConfigError> {
        let name = scope.as_str();
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(ConfigError::InvalidValue {
                key: "scope".into(),
                message: format!("'{name}' cannot be used as a file name"),
            });
        }
        Ok(self.dir.join(format!("{name}.toml")))
    }
}

fn read_settings(path: &Path) -> Result<WorldSettings, ConfigError> {
    let parse_error = |message: String| ConfigError::Parse {
        path: path.display().to_string(),
        message,
    };
    let content = std::fs::read_to_string(path).map_err(|e| parse_error(e.to_string()))?;
    WorldSettings::parse(&content).map_err(|e| parse_error(e.to_string()))
}

/// Atomic write: .tmp → rename.
fn write_settings(path: &Path, settings: &WorldSettings) -> Result<(), ConfigError> {
    let content = settings
        .to_toml_string()
        .map_err(|e| ConfigError::InvalidValue {
            key: path.display().to_string(),
            message: e.to_string(),
        })?;
    let tmp_path = path.with_extension("tmp");
    let write_err = |source| ConfigError::Write {
        path: path.display().to_string(),
        source,
    };
    std::fs::write(&tmp_path, content).map_err(write_err)?;
    std::fs::rename(&tmp_path, path).map_err(write_err)?;
    Ok(())
}
