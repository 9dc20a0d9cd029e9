use super::repository::{execute_git_command, GitRepository};
use crate::utils::error::Result;
use std::fs;
use tracing::debug;

/// Remote refresh and object store housekeeping.
pub struct MaintenanceManager<'a> {
    repo: &'a GitRepository,
}

impl<'a> MaintenanceManager<'a> {
    pub fn new(repo: &'a GitRepository) -> Self {
        Self { repo }
    }

    pub fn fetch_and_prune(&self) -> Result<()> {
        execute_git_command(self.repo, &["fetch", "--all", "--prune"]).map(|_| ())
    }

    pub fn expire_reflog(&self, expiry: &str) -> Result<()> {
        let expire = format!("--expire={}", expiry);
        execute_git_command(self.repo, &["reflog", "expire", &expire, "--all"]).map(|_| ())
    }

    pub fn garbage_collect(&self) -> Result<()> {
        // A leftover gc.log makes git skip auto gc until it is removed.
        let gc_log = self.repo.git_dir.join("gc.log");
        if gc_log.exists() {
            debug!(path = %gc_log.display(), "removing stale gc.log");
            fs::remove_file(&gc_log)?;
        }

        execute_git_command(self.repo, &["prune"])?;
        execute_git_command(self.repo, &["gc", "--quiet"])?;
        Ok(())
    }
}
