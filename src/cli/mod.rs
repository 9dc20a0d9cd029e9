pub mod commands;
pub mod parser;

pub use parser::{Cli, Commands};

use crate::config::{Config, ConfigManager, ConfigOverrides};
use crate::utils::{ArboristError, Result};
use std::path::Path;

pub fn execute_command(cli: Cli) -> Result<()> {
    let config_path = cli.config_path.as_deref();

    if cli.command.is_some() && !cli.clean.is_empty() {
        return Err(ArboristError::invalid_args(
            "cleanup flags go after the subcommand, e.g. `arborist clean --dry-run`",
        ));
    }

    match cli.command {
        Some(Commands::Clean(args)) => {
            args.validate()?;
            let config = load_config(config_path, &args.overrides());
            commands::clean::execute(config)
        }
        Some(Commands::Status(args)) => {
            args.validate()?;
            let config = load_config(config_path, &args.overrides());
            commands::status::execute(config)
        }
        Some(Commands::Config(args)) => commands::config::execute(args, config_path),
        None => {
            cli.clean.validate()?;
            let config = load_config(config_path, &cli.clean.overrides());
            commands::clean::execute(config)
        }
    }
}

fn load_config(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Config {
    ConfigManager::load_or_default(config_path).with_overrides(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_top_level_flags_rejected_with_subcommand() {
        let cli = Cli::try_parse_from(["arborist", "--dry-run", "status"]).unwrap();
        assert!(matches!(
            execute_command(cli),
            Err(ArboristError::InvalidArgs { .. })
        ));
    }

    #[test]
    fn test_invalid_protect_flag_rejected() {
        let cli = Cli::try_parse_from(["arborist", "clean", "--protect=-x"]).unwrap();
        assert!(matches!(
            execute_command(cli),
            Err(ArboristError::InvalidArgs { .. })
        ));
    }

    #[test]
    fn test_load_config_applies_flags_over_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"protected_branches": ["trunk"], "interactive": true}"#,
        )
        .unwrap();

        let overrides = ConfigOverrides {
            interactive: Some(false),
            extra_protected: vec!["release".into()],
            ..ConfigOverrides::default()
        };
        let config = load_config(Some(&path), &overrides);

        assert!(!config.interactive);
        assert_eq!(config.protected_branches, vec!["trunk", "release"]);
    }

    #[test]
    fn test_config_command_uses_config_flag() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/config.json");
        let path_arg = path.to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["arborist", "--config", &path_arg, "config", "init"]).unwrap();
        execute_command(cli).unwrap();
        assert!(path.exists());
    }
}
