use super::classifier::{Classification, Classifier, ProtectedSet};
use super::executor::{Executor, RunReport};
use super::inventory::{BranchInventory, Inventory};
use super::planner::{Confirmer, DeletionPlanner, RunMode};
use crate::config::Config;
use crate::core::git::GitOperations;
use crate::utils::error::{ArboristError, Result};
use std::fmt;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunState {
    Init,
    Fetching,
    Inventorying,
    Classifying,
    Planning,
    Executing,
    Optimizing,
    Done,
    Aborted,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The per-run view of the configuration, resolved once before the run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub protected: ProtectedSet,
    pub mode: RunMode,
    pub fetch: bool,
    pub skip_gc: bool,
    pub reflog_expiry: Option<String>,
}

impl RunSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            protected: ProtectedSet::new(config.protected_branches.iter().cloned()),
            mode: RunMode::from_flags(config.dry_run, config.interactive),
            fetch: config.fetch,
            skip_gc: config.skip_gc,
            reflog_expiry: config.reflog_expiry.clone(),
        }
    }
}

pub struct Orchestrator<'a> {
    git: &'a dyn GitOperations,
    confirmer: &'a dyn Confirmer,
    settings: &'a RunSettings,
    state: RunState,
    history: Vec<RunState>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        git: &'a dyn GitOperations,
        confirmer: &'a dyn Confirmer,
        settings: &'a RunSettings,
    ) -> Self {
        Self {
            git,
            confirmer,
            settings,
            state: RunState::Init,
            history: vec![RunState::Init],
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn history(&self) -> &[RunState] {
        &self.history
    }

    /// Runs every stage once, in order. A fatal error moves the machine to
    /// `Aborted` before anything is deleted.
    pub fn run(&mut self) -> Result<RunReport> {
        if self.state != RunState::Init {
            return Err(ArboristError::invalid_args(
                "a cleanup run cannot be restarted, create a new orchestrator",
            ));
        }

        match self.run_stages() {
            Ok(report) => {
                self.advance(RunState::Done);
                Ok(report)
            }
            Err(e) => {
                warn!(state = %self.state, error = %e, "cleanup aborted");
                self.advance(RunState::Aborted);
                Err(e)
            }
        }
    }

    fn run_stages(&mut self) -> Result<RunReport> {
        if !self.git.is_repository() {
            return Err(ArboristError::not_a_repository(
                "the working directory is not inside a git work tree",
            ));
        }

        self.advance(RunState::Fetching);
        self.fetch()?;

        self.advance(RunState::Inventorying);
        let inventory = BranchInventory::new(self.git).snapshot()?;
        debug!(
            branches = inventory.branches.len(),
            current = ?inventory.current,
            "inventory snapshot taken"
        );

        self.advance(RunState::Classifying);
        let classification = self.classify(&inventory)?;

        self.advance(RunState::Planning);
        let plan = DeletionPlanner::new(self.confirmer).plan(&classification, self.settings.mode);

        self.advance(RunState::Executing);
        let executor = Executor::new(self.git);
        let mut report = executor.execute(plan, &classification);

        if self.should_optimize() {
            self.advance(RunState::Optimizing);
            report.optimized = executor.optimize(self.settings.reflog_expiry.as_deref());
        }

        info!(
            deleted = report.deleted.len(),
            skipped = report.skipped.len(),
            failed = report.failures.len(),
            "cleanup finished"
        );
        Ok(report)
    }

    /// Refreshes remote tracking state. Dry runs fetch too.
    fn fetch(&self) -> Result<()> {
        if !self.settings.fetch {
            debug!("fetch disabled");
            return Ok(());
        }

        self.git.fetch_and_prune().map_err(|e| {
            ArboristError::git_operation(format!(
                "fetch --prune failed ({}); rerun with --no-fetch to use local tracking state",
                e
            ))
        })
    }

    fn classify(&self, inventory: &Inventory) -> Result<Classification> {
        Classifier::new(self.git, &self.settings.protected).classify(inventory)
    }

    fn should_optimize(&self) -> bool {
        !self.settings.skip_gc && !self.settings.mode.is_dry_run()
    }

    fn advance(&mut self, next: RunState) {
        debug_assert!(
            next == RunState::Aborted || next > self.state,
            "illegal transition {} -> {}",
            self.state,
            next
        );
        debug!(from = %self.state, to = %next, "state transition");
        self.state = next;
        self.history.push(next);
    }
}
