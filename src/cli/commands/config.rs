use crate::cli::parser::{ConfigArgs, ConfigCommands};
use crate::config::ConfigManager;
use crate::utils::{ArboristError, Result};
use std::path::Path;

pub fn execute(args: ConfigArgs, config_path: Option<&Path>) -> Result<()> {
    match args.command {
        Some(ConfigCommands::Show) | None => execute_show(config_path),
        Some(ConfigCommands::Path) => execute_path(config_path),
        Some(ConfigCommands::Init { force }) => execute_init(config_path, force),
    }
}

fn execute_show(config_path: Option<&Path>) -> Result<()> {
    let path = ConfigManager::resolve_path(config_path);
    if path.exists() {
        ConfigManager::load_from_file(&path).map_err(|e| {
            ArboristError::config_error(format!(
                "Failed to load {}: {e}. Cleanup runs fall back to the defaults.",
                path.display()
            ))
        })?;
    }

    let config = ConfigManager::load_or_default(Some(&path));
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn execute_path(config_path: Option<&Path>) -> Result<()> {
    let path = ConfigManager::resolve_path(config_path);
    let marker = if path.exists() { "" } else { " (not created yet)" };
    println!("{}{}", path.display(), marker);
    Ok(())
}

fn execute_init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = ConfigManager::init(config_path, force)?;
    println!("✅ Wrote default configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_init_then_show() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("arborist.json");

        execute_init(Some(&path), false).unwrap();
        assert!(path.exists());
        assert!(execute_show(Some(&path)).is_ok());
        assert!(execute_path(Some(&path)).is_ok());
    }

    #[test]
    fn test_show_reports_broken_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("arborist.json");
        fs::write(&path, "[1, 2").unwrap();

        let err = execute_show(Some(&path)).unwrap_err();
        assert!(matches!(err, ArboristError::Config { .. }));
    }

    #[test]
    fn test_init_without_force_keeps_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("arborist.json");
        fs::write(&path, r#"{"protected_branches": ["trunk"]}"#).unwrap();

        let result = execute(
            ConfigArgs {
                command: Some(ConfigCommands::Init { force: false }),
            },
            Some(&path),
        );
        assert!(result.is_err());
        assert!(fs::read_to_string(&path).unwrap().contains("trunk"));
    }
}
