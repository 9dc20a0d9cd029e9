use crate::config::validation::validate_protected_branches;
use crate::config::ConfigOverrides;
use crate::utils::{ArboristError, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "arborist")]
#[command(about = "Clean up git branches that are gone or merged")]
#[command(
    version,
    long_about = "Deletes local branches whose upstream is gone or that are fully merged into \
                  every protected branch. When run without a command, cleans the current repository."
)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long = "config", global = true, value_name = "PATH")]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub clean: CleanArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Delete merged and gone branches (default)
    Clean(CleanArgs),
    /// Show how each branch would be classified, without fetching or deleting
    #[command(alias = "ls")]
    Status(StatusArgs),
    /// Inspect or create the config file
    Config(ConfigArgs),
}

#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
#[command(after_help = "EXAMPLES:
    # Preview what would be deleted
    arborist --dry-run

    # Delete without prompting, keeping develop as well
    arborist clean --yes --protect develop

    # Skip the network and the gc step
    arborist clean --no-fetch --no-gc")]
pub struct CleanArgs {
    /// Show what would be deleted without deleting anything
    #[arg(long, short = 'd')]
    pub dry_run: bool,

    /// Ask before deleting each branch
    #[arg(long, short = 'i', conflicts_with = "yes")]
    pub interactive: bool,

    /// Delete without asking
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Skip reflog expiry and garbage collection
    #[arg(long)]
    pub no_gc: bool,

    /// Do not run `git fetch --prune` first
    #[arg(long)]
    pub no_fetch: bool,

    /// Additional protected branches (comma-separated)
    #[arg(long, short = 'p', value_delimiter = ',', value_name = "BRANCHES")]
    pub protect: Vec<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct StatusArgs {
    /// Additional protected branches (comma-separated)
    #[arg(long, short = 'p', value_delimiter = ',', value_name = "BRANCHES")]
    pub protect: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Write the default configuration to the config file
    Init {
        /// Overwrite an existing config file
        #[arg(long, short = 'f')]
        force: bool,
    },
}

impl CleanArgs {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        validate_protect_flag(&self.protect)
    }

    pub fn overrides(&self) -> ConfigOverrides {
        let interactive = if self.yes {
            Some(false)
        } else if self.interactive {
            Some(true)
        } else {
            None
        };

        ConfigOverrides {
            dry_run: self.dry_run.then_some(true),
            interactive,
            skip_gc: self.no_gc.then_some(true),
            fetch: self.no_fetch.then_some(false),
            extra_protected: trimmed(&self.protect),
        }
    }
}

impl StatusArgs {
    pub fn validate(&self) -> Result<()> {
        validate_protect_flag(&self.protect)
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            extra_protected: trimmed(&self.protect),
            ..ConfigOverrides::default()
        }
    }
}

fn trimmed(names: &[String]) -> Vec<String> {
    names.iter().map(|n| n.trim().to_string()).collect()
}

fn validate_protect_flag(names: &[String]) -> Result<()> {
    if names.is_empty() {
        return Ok(());
    }
    validate_protected_branches(&trimmed(names))
        .map_err(|e| ArboristError::invalid_args(format!("--protect: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_invocation_uses_top_level_clean_args() {
        let cli = Cli::try_parse_from(["arborist", "--dry-run", "-p", "develop,release"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.clean.dry_run);
        assert_eq!(cli.clean.protect, vec!["develop", "release"]);
    }

    #[test]
    fn test_clean_subcommand() {
        let cli = Cli::try_parse_from(["arborist", "clean", "--yes", "--no-gc"]).unwrap();
        match cli.command {
            Some(Commands::Clean(args)) => {
                assert!(args.yes);
                assert!(args.no_gc);
                let overrides = args.overrides();
                assert_eq!(overrides.interactive, Some(false));
                assert_eq!(overrides.skip_gc, Some(true));
                assert_eq!(overrides.dry_run, None);
                assert_eq!(overrides.fetch, None);
            }
            other => panic!("Expected clean command, got {:?}", other),
        }
    }

    #[test]
    fn test_interactive_conflicts_with_yes() {
        assert!(Cli::try_parse_from(["arborist", "clean", "-i", "-y"]).is_err());
    }

    #[test]
    fn test_no_flags_leave_config_untouched() {
        let overrides = CleanArgs::default().overrides();
        assert_eq!(overrides, ConfigOverrides::default());
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::try_parse_from(["arborist", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config(ConfigArgs {
                command: Some(ConfigCommands::Init { force: true })
            }))
        ));

        let cli =
            Cli::try_parse_from(["arborist", "--config", "/tmp/a.json", "config", "path"]).unwrap();
        assert_eq!(cli.config_path, Some(PathBuf::from("/tmp/a.json")));
    }

    #[test]
    fn test_config_flag_before_any_subcommand() {
        let cli = Cli::try_parse_from([
            "arborist", "--config", "/tmp/a.json", "clean", "--dry-run",
        ])
        .unwrap();
        assert_eq!(cli.config_path, Some(PathBuf::from("/tmp/a.json")));
        assert!(cli.clean.is_empty());
        assert!(matches!(cli.command, Some(Commands::Clean(ref args)) if args.dry_run));

        let cli = Cli::try_parse_from(["arborist", "--config", "/tmp/a.json", "status"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Status(_))));

        let cli = Cli::try_parse_from(["arborist", "status", "--config", "/tmp/a.json"]).unwrap();
        assert_eq!(cli.config_path, Some(PathBuf::from("/tmp/a.json")));
    }

    #[test]
    fn test_protect_validation() {
        let args = CleanArgs {
            protect: vec!["develop".into(), " ".into()],
            ..CleanArgs::default()
        };
        assert!(args.validate().is_err());

        let args = StatusArgs {
            protect: vec![" develop ".into()],
        };
        assert!(args.validate().is_ok());
        assert_eq!(args.overrides().extra_protected, vec!["develop"]);
    }
}
