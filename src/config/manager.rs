use super::defaults::{default_config, get_config_file_path};
use super::{Config, ConfigError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct ConfigManager;

impl ConfigManager {
    pub fn resolve_path(config_path: Option<&Path>) -> PathBuf {
        match config_path {
            Some(path) => path.to_path_buf(),
            None => get_config_file_path(),
        }
    }

    /// Loads the config for a cleanup run. A missing file means defaults; a
    /// broken one is reported and replaced by defaults, never fatal.
    pub fn load_or_default(config_path: Option<&Path>) -> Config {
        let path = Self::resolve_path(config_path);

        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return default_config();
        }

        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "ignoring unreadable config file, using defaults"
                );
                default_config()
            }
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
        config.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(config)?;
        let mut file = fs::File::create(path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        Ok(())
    }

    /// Writes the default config. Refuses to replace an existing file unless `force` is set.
    pub fn init(config_path: Option<&Path>, force: bool) -> Result<PathBuf> {
        let path = Self::resolve_path(config_path);
        if path.exists() && !force {
            return Err(ConfigError::Validation(format!(
                "{} already exists, use --force to overwrite",
                path.display()
            )));
        }

        Self::save_to_path(&default_config(), &path)?;
        Ok(path)
    }
}
