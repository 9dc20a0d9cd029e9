use crate::utils::error::{ArboristError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct GitRepository {
    pub root: PathBuf,
    pub git_dir: PathBuf,
}

impl GitRepository {
    pub fn discover() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            ArboristError::git_operation(format!("Failed to get current directory: {}", e))
        })?;

        Self::discover_from(&current_dir)
    }

    pub fn discover_from(path: &Path) -> Result<Self> {
        let output = Command::new("git")
            .current_dir(path)
            .args(["rev-parse", "--show-toplevel"])
            .output()
            .map_err(|e| ArboristError::git_operation(format!("Failed to execute git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ArboristError::not_a_repository(format!(
                "{} ({})",
                path.display(),
                stderr.trim()
            )));
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let root = PathBuf::from(root);

        let git_dir = Self::get_git_dir(&root)?;

        Ok(Self { root, git_dir })
    }

    pub fn is_inside_work_tree(&self) -> bool {
        execute_git_command(self, &["rev-parse", "--is-inside-work-tree"])
            .map(|out| out == "true")
            .unwrap_or(false)
    }

    /// Short name of the checked-out branch, `None` on a detached HEAD.
    pub fn get_current_branch(&self) -> Result<Option<String>> {
        let output = run_git(self, &["symbolic-ref", "--quiet", "--short", "HEAD"])?;
        match output.status.code() {
            Some(0) => Ok(Some(
                String::from_utf8_lossy(&output.stdout).trim().to_string(),
            )),
            Some(1) => Ok(None),
            _ => Err(command_failure(
                &["symbolic-ref", "--quiet", "--short", "HEAD"],
                &output,
            )),
        }
    }

    fn get_git_dir(repo_root: &Path) -> Result<PathBuf> {
        let output = Command::new("git")
            .current_dir(repo_root)
            .args(["rev-parse", "--git-dir"])
            .output()
            .map_err(|e| ArboristError::git_operation(format!("Failed to get git dir: {}", e)))?;

        if !output.status.success() {
            return Err(ArboristError::git_operation(
                "Failed to determine git directory".to_string(),
            ));
        }

        let git_dir = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let git_dir = PathBuf::from(git_dir);
        let git_dir = if git_dir.is_absolute() {
            git_dir
        } else {
            repo_root.join(git_dir)
        };

        Ok(git_dir)
    }
}

/// Runs git in the repository root and hands back the raw output, whatever the exit code.
pub fn run_git(repo: &GitRepository, args: &[&str]) -> Result<Output> {
    debug!(args = %args.join(" "), "running git");
    Command::new("git")
        .current_dir(&repo.root)
        .args(args)
        .output()
        .map_err(|e| ArboristError::git_operation(format!("Failed to execute git: {}", e)))
}

pub fn execute_git_command(repo: &GitRepository, args: &[&str]) -> Result<String> {
    let output = run_git(repo, args)?;

    if !output.status.success() {
        return Err(command_failure(args, &output));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.trim().to_string())
}

fn command_failure(args: &[&str], output: &Output) -> ArboristError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    ArboristError::git_operation(format!(
        "Git command failed ({}): {}",
        args.join(" "),
        stderr.trim()
    ))
}
