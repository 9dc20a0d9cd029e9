use super::classifier::{Category, ClassifiedBranch, Classification};
use super::inventory::BranchRecord;
use dialoguer::Confirm;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    DryRun,
    Interactive,
    NonInteractive,
}

impl RunMode {
    pub fn from_flags(dry_run: bool, interactive: bool) -> Self {
        match (dry_run, interactive) {
            (true, _) => RunMode::DryRun,
            (false, true) => RunMode::Interactive,
            (false, false) => RunMode::NonInteractive,
        }
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(self, RunMode::DryRun)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::DryRun => write!(f, "dry-run"),
            RunMode::Interactive => write!(f, "interactive"),
            RunMode::NonInteractive => write!(f, "non-interactive"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionReason {
    GoneRemote,
    Merged,
}

impl fmt::Display for DeletionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletionReason::GoneRemote => write!(f, "upstream gone"),
            DeletionReason::Merged => write!(f, "merged"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionCandidate {
    pub branch: BranchRecord,
    pub reason: DeletionReason,
    pub approved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionPlan {
    pub mode: RunMode,
    pub candidates: Vec<DeletionCandidate>,
}

impl DeletionPlan {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn approved_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.approved).count()
    }

    pub fn names(&self) -> Vec<&str> {
        self.candidates
            .iter()
            .map(|c| c.branch.name.as_str())
            .collect()
    }
}

/// Yes/no decision source for interactive runs.
pub trait Confirmer {
    fn confirm(&self, question: &str, default: bool) -> bool;
}

/// Prompts on the terminal. Anything other than an explicit "yes" is a "no".
pub struct TerminalConfirmer;

impl TerminalConfirmer {
    pub fn is_non_interactive() -> bool {
        std::env::var("ARBORIST_NON_INTERACTIVE").is_ok()
            || std::env::var("CI").is_ok()
            || !atty::is(atty::Stream::Stdin)
    }
}

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, question: &str, default: bool) -> bool {
        if Self::is_non_interactive() {
            warn!(question, "no terminal attached, treating prompt as declined");
            return false;
        }

        Confirm::new()
            .with_prompt(question)
            .default(default)
            .interact()
            .unwrap_or(false)
    }
}

pub struct DeletionPlanner<'a> {
    confirmer: &'a dyn Confirmer,
}

impl<'a> DeletionPlanner<'a> {
    pub fn new(confirmer: &'a dyn Confirmer) -> Self {
        Self { confirmer }
    }

    /// Gone-remote branches come first, then merged ones, each in inventory order.
    pub fn plan(&self, classification: &Classification, mode: RunMode) -> DeletionPlan {
        let ordered = classification
            .in_category(Category::GoneRemote)
            .chain(classification.in_category(Category::Merged));

        let mut candidates = Vec::new();
        for entry in ordered {
            let Some(reason) = deletion_reason(entry) else {
                continue;
            };

            let approved = self.approve(entry, reason, mode);
            debug!(branch = %entry.record.name, %reason, approved, "planned");
            candidates.push(DeletionCandidate {
                branch: entry.record.clone(),
                reason,
                approved,
            });
        }

        DeletionPlan { mode, candidates }
    }

    fn approve(&self, entry: &ClassifiedBranch, reason: DeletionReason, mode: RunMode) -> bool {
        match mode {
            RunMode::DryRun => false,
            RunMode::NonInteractive => true,
            RunMode::Interactive => {
                let question = format!("Delete branch {} ({})?", entry.record.name, reason);
                self.confirmer.confirm(&question, false)
            }
        }
    }
}

fn deletion_reason(entry: &ClassifiedBranch) -> Option<DeletionReason> {
    if entry.checked_out {
        return None;
    }
    match entry.category {
        Category::GoneRemote => Some(DeletionReason::GoneRemote),
        Category::Merged => Some(DeletionReason::Merged),
        Category::Protected | Category::Active => None,
    }
}
