use super::classifier::{Category, Classification};
use super::planner::{DeletionPlan, RunMode};
use crate::core::git::GitOperations;
use std::fmt;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Protected,
    Active,
    CheckedOut,
    Declined,
    DryRun,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkipReason::Protected => "protected",
            SkipReason::Active => "active",
            SkipReason::CheckedOut => "checked-out",
            SkipReason::Declined => "declined",
            SkipReason::DryRun => "dry-run",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBranch {
    pub name: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchFailure {
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub mode: RunMode,
    pub deleted: Vec<String>,
    pub skipped: Vec<SkippedBranch>,
    pub failures: Vec<BranchFailure>,
    pub optimized: bool,
    /// Branches that were eligible for deletion, approved or not.
    pub candidates: usize,
}

/// Why a run ended the way it did, for the summary line and exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    NothingToClean,
    DryRunPreview,
    NothingApproved,
    Cleaned,
    DeletionFailures,
}

impl RunReport {
    pub fn new(mode: RunMode) -> Self {
        Self {
            mode,
            deleted: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
            optimized: false,
            candidates: 0,
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn skipped_with(&self, reason: SkipReason) -> impl Iterator<Item = &str> {
        self.skipped
            .iter()
            .filter(move |s| s.reason == reason)
            .map(|s| s.name.as_str())
    }

    pub fn outcome(&self) -> RunOutcome {
        if self.has_failures() {
            RunOutcome::DeletionFailures
        } else if self.candidates == 0 {
            RunOutcome::NothingToClean
        } else if self.mode.is_dry_run() {
            RunOutcome::DryRunPreview
        } else if self.deleted.is_empty() {
            RunOutcome::NothingApproved
        } else {
            RunOutcome::Cleaned
        }
    }

    fn skip(&mut self, name: &str, reason: SkipReason) {
        self.skipped.push(SkippedBranch {
            name: name.to_string(),
            reason,
        });
    }
}

pub struct Executor<'a> {
    git: &'a dyn GitOperations,
}

impl<'a> Executor<'a> {
    pub fn new(git: &'a dyn GitOperations) -> Self {
        Self { git }
    }

    /// Applies the plan. One branch failing never stops the others.
    pub fn execute(&self, plan: DeletionPlan, classification: &Classification) -> RunReport {
        let mut report = RunReport::new(plan.mode);
        report.candidates = plan.candidates.len();

        for entry in classification.in_category(Category::Protected) {
            report.skip(&entry.record.name, SkipReason::Protected);
        }
        for entry in classification.in_category(Category::Active) {
            let reason = if entry.checked_out {
                SkipReason::CheckedOut
            } else {
                SkipReason::Active
            };
            report.skip(&entry.record.name, reason);
        }

        for candidate in plan.candidates {
            let name = candidate.branch.name;

            if !candidate.approved {
                let reason = if plan.mode.is_dry_run() {
                    SkipReason::DryRun
                } else {
                    SkipReason::Declined
                };
                report.skip(&name, reason);
                continue;
            }

            match self.git.delete_branch(&name, true) {
                Ok(()) => {
                    info!(branch = %name, reason = %candidate.reason, "deleted branch");
                    report.deleted.push(name);
                }
                Err(e) => {
                    warn!(branch = %name, error = %e, "failed to delete branch");
                    report.failures.push(BranchFailure {
                        name,
                        error: e.to_string(),
                    });
                }
            }
        }

        report
    }

    /// Best-effort housekeeping. Every step runs; failures are logged and
    /// make the result `false`.
    pub fn optimize(&self, reflog_expiry: Option<&str>) -> bool {
        let mut ok = true;

        if let Some(expiry) = reflog_expiry {
            if let Err(e) = self.git.expire_reflog(expiry) {
                warn!(error = %e, "reflog expiry failed");
                ok = false;
            }
        }

        if let Err(e) = self.git.garbage_collect() {
            warn!(error = %e, "repository optimization failed");
            ok = false;
        }

        ok
    }
}
