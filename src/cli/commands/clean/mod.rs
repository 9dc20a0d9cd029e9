use crate::config::Config;
use crate::core::cleanup::{Orchestrator, RunMode, RunReport, RunSettings, TerminalConfirmer};
use crate::core::git::GitService;
use crate::utils::{ArboristError, Result};

pub mod reporter;

use reporter::CleanupReporter;

pub fn execute(config: Config) -> Result<()> {
    let git_service = GitService::discover()?;

    let cleaner = BranchCleaner::new(git_service, config);
    cleaner.execute_clean()
}

struct BranchCleaner {
    git_service: GitService,
    settings: RunSettings,
}

impl BranchCleaner {
    fn new(git_service: GitService, config: Config) -> Self {
        Self {
            git_service,
            settings: RunSettings::from_config(&config),
        }
    }

    fn execute_clean(&self) -> Result<()> {
        if self.settings.mode == RunMode::Interactive && TerminalConfirmer::is_non_interactive() {
            return Err(ArboristError::invalid_args(
                "Cannot ask for confirmation without a terminal. Use --yes to delete without \
                 prompting or --dry-run to preview.",
            ));
        }

        let reporter = CleanupReporter::new();
        reporter.show_header(&self.settings);

        let confirmer = TerminalConfirmer;
        let mut orchestrator = Orchestrator::new(&self.git_service, &confirmer, &self.settings);
        let report = orchestrator.run()?;

        reporter.show_results(&report);
        check_failures(&report)
    }
}

fn check_failures(report: &RunReport) -> Result<()> {
    if report.has_failures() {
        return Err(ArboristError::deletion_failures(report.failures.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cleanup::BranchFailure;
    use crate::test_utils::test_helpers::*;

    #[test]
    fn test_clean_execution_in_repository() {
        let (temp_dir, git_service) = setup_test_repo();
        git(temp_dir.path(), &["branch", "feature/merged"]);
        create_unmerged_branch(temp_dir.path(), "feature/wip");

        let cleaner = BranchCleaner::new(git_service, create_test_config());
        cleaner.execute_clean().unwrap();

        let branches = cleaner.git_service.branch_manager();
        assert!(!branches.branch_exists("feature/merged").unwrap());
        assert!(branches.branch_exists("feature/wip").unwrap());
        assert!(branches.branch_exists("main").unwrap());
    }

    #[test]
    fn test_clean_dry_run_keeps_branches() {
        let (temp_dir, git_service) = setup_test_repo();
        git(temp_dir.path(), &["branch", "feature/merged"]);

        let mut config = create_test_config();
        config.dry_run = true;
        let cleaner = BranchCleaner::new(git_service, config);
        cleaner.execute_clean().unwrap();

        assert!(cleaner
            .git_service
            .branch_manager()
            .branch_exists("feature/merged")
            .unwrap());
    }

    #[test]
    fn test_check_failures() {
        let mut report = RunReport::new(RunMode::NonInteractive);
        assert!(check_failures(&report).is_ok());

        report.failures.push(BranchFailure {
            name: "feature/x".into(),
            error: "locked".into(),
        });
        assert!(matches!(
            check_failures(&report),
            Err(ArboristError::DeletionFailures { count: 1 })
        ));
    }
}
