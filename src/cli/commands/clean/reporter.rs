use crate::core::cleanup::{RunOutcome, RunReport, RunSettings, SkipReason};

pub struct CleanupReporter;

impl CleanupReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn show_header(&self, settings: &RunSettings) {
        if settings.mode.is_dry_run() {
            println!("🧹 Arborist Cleanup - Dry Run");
            println!("============================");
            println!("No changes will be made.\n");
        } else {
            println!("🧹 Arborist Cleanup");
            println!("==================\n");
        }

        let protected: Vec<&str> = settings.protected.iter().collect();
        println!("Protected branches: {}\n", protected.join(", "));
    }

    pub fn show_results(&self, report: &RunReport) {
        self.show_deleted(report);
        self.show_previewed(report);
        self.show_errors(report);

        if report.optimized {
            println!("⚡ Repository optimized");
        }

        println!("\n{}", summary_line(report));
        println!("{}", outcome_message(report));
    }

    fn show_deleted(&self, report: &RunReport) {
        if !report.deleted.is_empty() {
            println!("Deleted branches ({}):", report.deleted.len());
            for branch in &report.deleted {
                println!("  ✅ {}", branch);
            }
            println!();
        }
    }

    fn show_previewed(&self, report: &RunReport) {
        let previewed: Vec<&str> = report.skipped_with(SkipReason::DryRun).collect();
        if !previewed.is_empty() {
            println!("Would delete ({}):", previewed.len());
            for branch in previewed {
                println!("  🌿 {}", branch);
            }
            println!();
        }
    }

    fn show_errors(&self, report: &RunReport) {
        if !report.failures.is_empty() {
            println!("⚠️  Some branches couldn't be deleted:");
            for failure in &report.failures {
                println!("  • {}: {}", failure.name, failure.error);
            }
            println!();
        }
    }
}

impl Default for CleanupReporter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn summary_line(report: &RunReport) -> String {
    format!(
        "Deleted: {}  Skipped: {}  Failed: {}",
        report.deleted.len(),
        report.skipped.len(),
        report.failures.len()
    )
}

pub fn outcome_message(report: &RunReport) -> String {
    match report.outcome() {
        RunOutcome::NothingToClean => {
            "✨ Nothing to clean - no merged or gone branches found.".to_string()
        }
        RunOutcome::DryRunPreview => format!(
            "🔍 Dry run: {} branch(es) would be deleted. Run again without --dry-run to delete them.",
            report.candidates
        ),
        RunOutcome::NothingApproved => {
            "No branches deleted - every candidate was declined.".to_string()
        }
        RunOutcome::Cleaned => format!("✨ Deleted {} branch(es).", report.deleted.len()),
        RunOutcome::DeletionFailures => format!(
            "❌ {} of {} deletion(s) failed. Recover mistakes with `git reflog`.",
            report.failures.len(),
            report.failures.len() + report.deleted.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cleanup::{BranchFailure, RunMode, SkippedBranch};

    fn report(mode: RunMode) -> RunReport {
        RunReport::new(mode)
    }

    #[test]
    fn test_reporter_handles_empty_report() {
        let reporter = CleanupReporter::new();
        reporter.show_results(&report(RunMode::NonInteractive));
    }

    #[test]
    fn test_messages_distinguish_empty_outcomes() {
        let nothing = report(RunMode::NonInteractive);
        assert!(outcome_message(&nothing).contains("Nothing to clean"));

        let mut preview = report(RunMode::DryRun);
        preview.candidates = 2;
        preview.skipped.push(SkippedBranch {
            name: "feature/a".into(),
            reason: SkipReason::DryRun,
        });
        assert!(outcome_message(&preview).contains("2 branch(es) would be deleted"));

        let mut declined = report(RunMode::Interactive);
        declined.candidates = 1;
        assert!(outcome_message(&declined).contains("declined"));

        let mut failed = report(RunMode::NonInteractive);
        failed.candidates = 2;
        failed.deleted.push("feature/a".into());
        failed.failures.push(BranchFailure {
            name: "feature/b".into(),
            error: "locked".into(),
        });
        assert!(outcome_message(&failed).starts_with("❌ 1 of 2"));
    }

    #[test]
    fn test_summary_line_counts() {
        let mut r = report(RunMode::NonInteractive);
        r.deleted.push("a".into());
        r.skipped.push(SkippedBranch {
            name: "main".into(),
            reason: SkipReason::Protected,
        });
        assert_eq!(summary_line(&r), "Deleted: 1  Skipped: 1  Failed: 0");
    }
}
