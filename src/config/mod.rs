use serde::{Deserialize, Serialize};

pub mod defaults;
pub mod manager;
pub mod validation;

pub use manager::ConfigManager;

/// Settings for a cleanup run. Built once at startup from defaults, the
/// config file and command-line flags, then passed down by reference.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub protected_branches: Vec<String>,
    pub dry_run: bool,
    pub interactive: bool,
    pub skip_gc: bool,
    pub fetch: bool,
    pub reflog_expiry: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        defaults::default_config()
    }
}

/// Values given on the command line. `None` leaves the file/default value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub dry_run: Option<bool>,
    pub interactive: Option<bool>,
    pub skip_gc: Option<bool>,
    pub fetch: Option<bool>,
    pub extra_protected: Vec<String>,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Validation(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Json(e) => write!(f, "JSON error: {}", e),
            ConfigError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(error: std::io::Error) -> Self {
        ConfigError::Io(error)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::Json(error)
    }
}

impl From<ConfigError> for crate::utils::ArboristError {
    fn from(error: ConfigError) -> Self {
        crate::utils::ArboristError::config_error(error.to_string())
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Flags win over the file. Extra protected names are added, never removed.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(dry_run) = overrides.dry_run {
            self.dry_run = dry_run;
        }
        if let Some(interactive) = overrides.interactive {
            self.interactive = interactive;
        }
        if let Some(skip_gc) = overrides.skip_gc {
            self.skip_gc = skip_gc;
        }
        if let Some(fetch) = overrides.fetch {
            self.fetch = fetch;
        }
        for name in &overrides.extra_protected {
            if !self.protected_branches.contains(name) {
                self.protected_branches.push(name.clone());
            }
        }
        self
    }
}
