use crate::core::git::{GitOperations, TrackedBranch};
use crate::utils::error::{ArboristError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    /// Upstream configured and still present.
    Tracked,
    /// Upstream configured but the remote ref no longer exists.
    Gone,
    /// No upstream configured.
    None,
}

impl fmt::Display for TrackingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackingState::Tracked => write!(f, "tracked"),
            TrackingState::Gone => write!(f, "gone"),
            TrackingState::None => write!(f, "local"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRecord {
    pub name: String,
    pub upstream: Option<String>,
    pub tracking: TrackingState,
    pub commit_id: String,
}

impl BranchRecord {
    pub fn short_commit(&self) -> &str {
        let end = self.commit_id.len().min(8);
        &self.commit_id[..end]
    }
}

impl From<TrackedBranch> for BranchRecord {
    fn from(branch: TrackedBranch) -> Self {
        let tracking = match (&branch.upstream, branch.gone) {
            (_, true) => TrackingState::Gone,
            (Some(_), false) => TrackingState::Tracked,
            (None, false) => TrackingState::None,
        };

        Self {
            name: branch.name,
            upstream: branch.upstream,
            tracking,
            commit_id: branch.commit_id,
        }
    }
}

/// A single read of the local branch set. Branches created or removed
/// after the snapshot is taken are not observed by the run.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub branches: Vec<BranchRecord>,
    pub current: Option<String>,
}

impl Inventory {
    pub fn contains(&self, name: &str) -> bool {
        self.branches.iter().any(|b| b.name == name)
    }

    pub fn is_current(&self, name: &str) -> bool {
        self.current.as_deref() == Some(name)
    }
}

pub struct BranchInventory<'a> {
    git: &'a dyn GitOperations,
}

impl<'a> BranchInventory<'a> {
    pub fn new(git: &'a dyn GitOperations) -> Self {
        Self { git }
    }

    pub fn list(&self) -> Result<Vec<BranchRecord>> {
        let branches = self
            .git
            .list_branches_with_tracking()
            .map_err(as_inventory_error)?;

        Ok(branches.into_iter().map(BranchRecord::from).collect())
    }

    pub fn snapshot(&self) -> Result<Inventory> {
        if !self.git.is_repository() {
            return Err(ArboristError::not_a_repository(
                "the working directory is not inside a git work tree",
            ));
        }

        let current = self.git.current_branch().map_err(as_inventory_error)?;
        let branches = self.list()?;

        Ok(Inventory { branches, current })
    }
}

fn as_inventory_error(error: ArboristError) -> ArboristError {
    match error {
        ArboristError::NotARepository { .. } | ArboristError::Inventory { .. } => error,
        other => ArboristError::inventory(other.to_string()),
    }
}
