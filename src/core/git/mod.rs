use crate::utils::error::Result;
use std::path::Path;

pub mod branch;
pub mod maintenance;
pub mod repository;

pub use branch::{BranchManager, TrackedBranch};
pub use maintenance::MaintenanceManager;
pub use repository::GitRepository;

/// Everything the cleanup engine needs from version control.
///
/// Every call blocks until git returns. Implementations must not cache
/// state between calls; the engine takes its own snapshot.
pub trait GitOperations {
    fn is_repository(&self) -> bool;
    fn current_branch(&self) -> Result<Option<String>>;
    fn list_branches_with_tracking(&self) -> Result<Vec<TrackedBranch>>;
    fn is_ancestor(&self, branch: &str, of_branch: &str) -> Result<bool>;
    fn delete_branch(&self, name: &str, force: bool) -> Result<()>;
    fn fetch_and_prune(&self) -> Result<()>;
    fn expire_reflog(&self, expiry: &str) -> Result<()>;
    fn garbage_collect(&self) -> Result<()>;
}

pub struct GitService {
    repo: GitRepository,
}

impl GitService {
    pub fn discover() -> Result<Self> {
        let repo = GitRepository::discover()?;
        Ok(Self { repo })
    }

    pub fn discover_from(path: &Path) -> Result<Self> {
        let repo = GitRepository::discover_from(path)?;
        Ok(Self { repo })
    }

    pub fn repository(&self) -> &GitRepository {
        &self.repo
    }

    pub fn branch_manager(&self) -> BranchManager<'_> {
        BranchManager::new(&self.repo)
    }

    pub fn maintenance_manager(&self) -> MaintenanceManager<'_> {
        MaintenanceManager::new(&self.repo)
    }
}

impl GitOperations for GitService {
    fn is_repository(&self) -> bool {
        self.repo.root.exists() && self.repo.is_inside_work_tree()
    }

    fn current_branch(&self) -> Result<Option<String>> {
        self.repo.get_current_branch()
    }

    fn list_branches_with_tracking(&self) -> Result<Vec<TrackedBranch>> {
        self.branch_manager().list_branches_with_tracking()
    }

    fn is_ancestor(&self, branch: &str, of_branch: &str) -> Result<bool> {
        self.branch_manager().is_ancestor(branch, of_branch)
    }

    fn delete_branch(&self, name: &str, force: bool) -> Result<()> {
        self.branch_manager().delete_branch(name, force)
    }

    fn fetch_and_prune(&self) -> Result<()> {
        self.maintenance_manager().fetch_and_prune()
    }

    fn expire_reflog(&self, expiry: &str) -> Result<()> {
        self.maintenance_manager().expire_reflog(expiry)
    }

    fn garbage_collect(&self) -> Result<()> {
        self.maintenance_manager().garbage_collect()
    }
}
