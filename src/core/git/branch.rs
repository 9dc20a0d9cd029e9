use super::repository::{execute_git_command, run_git, GitRepository};
use crate::utils::error::{ArboristError, Result};

const FIELD_SEPARATOR: char = '\0';
const TRACKING_FORMAT: &str =
    "--format=%(refname:lstrip=2)%00%(upstream:short)%00%(upstream:track)%00%(objectname)";

/// A local branch as reported by git, before any classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedBranch {
    pub name: String,
    pub upstream: Option<String>,
    pub gone: bool,
    pub commit_id: String,
}

pub struct BranchManager<'a> {
    repo: &'a GitRepository,
}

impl<'a> BranchManager<'a> {
    pub fn new(repo: &'a GitRepository) -> Self {
        Self { repo }
    }

    pub fn list_branches_with_tracking(&self) -> Result<Vec<TrackedBranch>> {
        let output = execute_git_command(self.repo, &["for-each-ref", TRACKING_FORMAT, "refs/heads"])
            .map_err(|e| ArboristError::inventory(e.to_string()))?;

        let mut branches = Vec::new();
        for line in output.lines() {
            if let Some(branch) = parse_tracking_line(line)? {
                branches.push(branch);
            }
        }

        Ok(branches)
    }

    pub fn branch_exists(&self, name: &str) -> Result<bool> {
        let result = execute_git_command(
            self.repo,
            &["rev-parse", "--verify", "--quiet", &local_ref(name)],
        );
        Ok(result.is_ok())
    }

    /// True when the tip of `branch` is reachable from the tip of `of_branch`.
    pub fn is_ancestor(&self, branch: &str, of_branch: &str) -> Result<bool> {
        let args = [
            "merge-base",
            "--is-ancestor",
            &local_ref(branch),
            &local_ref(of_branch),
        ];
        let output = run_git(self.repo, &args)?;

        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(ArboristError::git_operation(format!(
                "Cannot determine whether '{}' is merged into '{}': {}",
                branch,
                of_branch,
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }

    pub fn delete_branch(&self, name: &str, force: bool) -> Result<()> {
        validate_branch_name(name)?;

        if self.repo.get_current_branch()?.as_deref() == Some(name) {
            return Err(ArboristError::git_operation(format!(
                "Cannot delete checked-out branch '{}'",
                name
            )));
        }

        let flag = if force { "-D" } else { "-d" };
        execute_git_command(self.repo, &["branch", flag, name]).map(|_| ())
    }
}

fn local_ref(name: &str) -> String {
    format!("refs/heads/{}", name)
}

fn validate_branch_name(name: &str) -> Result<()> {
    if name.is_empty() || name.starts_with('-') {
        return Err(ArboristError::invalid_args(format!(
            "Refusing to operate on branch name '{}'",
            name
        )));
    }
    Ok(())
}

fn parse_tracking_line(line: &str) -> Result<Option<TrackedBranch>> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let [name, upstream, track, commit_id] = fields.as_slice() else {
        return Err(ArboristError::inventory(format!(
            "Unexpected for-each-ref output: {:?}",
            line
        )));
    };

    let upstream = (!upstream.is_empty()).then(|| upstream.to_string());

    Ok(Some(TrackedBranch {
        name: name.to_string(),
        upstream,
        gone: track.trim() == "[gone]",
        commit_id: commit_id.trim().to_string(),
    }))
}
