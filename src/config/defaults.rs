use super::Config;
use std::path::PathBuf;

pub const CONFIG_PATH_ENV: &str = "ARBORIST_CONFIG_PATH";
pub const DEFAULT_REFLOG_EXPIRY: &str = "90.days";

pub fn default_config() -> Config {
    Config {
        protected_branches: default_protected_branches(),
        dry_run: false,
        interactive: true,
        skip_gc: false,
        fetch: true,
        reflog_expiry: Some(DEFAULT_REFLOG_EXPIRY.to_string()),
    }
}

pub fn default_protected_branches() -> Vec<String> {
    vec!["main".to_string(), "master".to_string()]
}

pub fn get_default_config_dir() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "arborist") {
        proj_dirs.config_dir().to_path_buf()
    } else if let Some(base) = directories::BaseDirs::new() {
        base.home_dir().join(".config").join("arborist")
    } else {
        PathBuf::from(".").join(".config").join("arborist")
    }
}

pub fn get_config_file_path() -> PathBuf {
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(config_path);
    }

    get_default_config_dir().join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_creation() {
        let config = default_config();
        assert_eq!(config.protected_branches, vec!["main", "master"]);
        assert!(!config.dry_run);
        assert!(config.interactive);
        assert!(!config.skip_gc);
        assert!(config.fetch);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_paths() {
        let config_file = get_config_file_path();
        assert!(config_file.parent().is_some());

        let config_dir = get_default_config_dir();
        assert!(!config_dir.as_os_str().is_empty());
        assert!(config_dir.to_string_lossy().contains("arborist"));
    }
}
