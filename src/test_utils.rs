pub mod test_helpers {
    use crate::config::Config;
    use crate::core::git::GitService;
    use std::fs;
    use std::path::Path;
    use std::process::Command;
    use tempfile::TempDir;

    pub fn create_test_config() -> Config {
        let mut config = crate::config::defaults::default_config();
        config.interactive = false;
        config.skip_gc = true;
        config.fetch = false;
        config
    }

    pub fn git(repo_path: &Path, args: &[&str]) {
        let output = Command::new("git")
            .current_dir(repo_path)
            .args(args)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    pub fn commit_file(repo_path: &Path, file: &str, content: &str) {
        fs::write(repo_path.join(file), content).expect("Failed to write file");
        git(repo_path, &["add", file]);
        git(repo_path, &["commit", "-m", &format!("Add {}", file)]);
    }

    pub fn setup_test_repo() -> (TempDir, GitService) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo_path = temp_dir.path();

        git(repo_path, &["init", "--initial-branch=main"]);
        git(repo_path, &["config", "user.name", "Test User"]);
        git(repo_path, &["config", "user.email", "test@example.com"]);
        git(repo_path, &["config", "commit.gpgsign", "false"]);
        commit_file(repo_path, "README.md", "# Test Repository");

        let service = GitService::discover_from(repo_path).expect("Failed to discover repo");
        (temp_dir, service)
    }

    /// Adds a bare repository as `origin` and pushes `main` to it.
    pub fn add_bare_remote(repo_path: &Path) -> TempDir {
        let remote_dir = TempDir::new().expect("Failed to create remote dir");
        git(remote_dir.path(), &["init", "--bare", "--initial-branch=main"]);

        let remote_path = remote_dir.path().to_string_lossy().to_string();
        git(repo_path, &["remote", "add", "origin", &remote_path]);
        git(repo_path, &["push", "-u", "origin", "main"]);
        remote_dir
    }

    /// Creates `name` with its own commit, publishes it, then deletes it on the remote.
    pub fn create_gone_branch(repo_path: &Path, name: &str) {
        git(repo_path, &["checkout", "-b", name]);
        commit_file(repo_path, &format!("{}.txt", name.replace('/', "-")), name);
        git(repo_path, &["push", "-u", "origin", name]);
        git(repo_path, &["checkout", "main"]);
        git(repo_path, &["push", "origin", "--delete", name]);
    }

    /// Creates `name` with a commit that is not on `main`.
    pub fn create_unmerged_branch(repo_path: &Path, name: &str) {
        git(repo_path, &["checkout", "-b", name]);
        commit_file(repo_path, &format!("{}.txt", name.replace('/', "-")), name);
        git(repo_path, &["checkout", "main"]);
    }
}

pub mod mock_git {
    use crate::core::cleanup::planner::Confirmer;
    use crate::core::git::{GitOperations, TrackedBranch};
    use crate::utils::error::{ArboristError, Result};
    use std::cell::{Cell, RefCell};
    use std::collections::{HashSet, VecDeque};

    /// In-memory stand-in for a repository, with switchable failures.
    #[derive(Default)]
    pub struct MockGit {
        branches: RefCell<Vec<TrackedBranch>>,
        current: Option<String>,
        ancestry: HashSet<(String, String)>,
        failing_deletes: HashSet<String>,
        pruned_on_fetch: HashSet<String>,
        not_a_repository: bool,
        inventory_fails: bool,
        fetch_fails: bool,
        reflog_fails: bool,
        gc_fails: bool,
        pub delete_calls: RefCell<Vec<String>>,
        pub fetch_calls: Cell<usize>,
        pub gc_calls: Cell<usize>,
        pub reflog_calls: RefCell<Vec<String>>,
    }

    impl MockGit {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_branch(self, name: &str) -> Self {
            self.push_branch(name, None, false)
        }

        pub fn with_tracked_branch(self, name: &str) -> Self {
            let upstream = format!("origin/{}", name);
            self.push_branch(name, Some(upstream), false)
        }

        pub fn with_gone_branch(self, name: &str) -> Self {
            let upstream = format!("origin/{}", name);
            self.push_branch(name, Some(upstream), true)
        }

        pub fn merged_into(mut self, branch: &str, target: &str) -> Self {
            self.ancestry
                .insert((branch.to_string(), target.to_string()));
            self
        }

        /// The remote branch was deleted, but the local tracking ref only
        /// turns gone once a fetch prunes it.
        pub fn removed_on_remote(mut self, name: &str) -> Self {
            for branch in self.branches.borrow_mut().iter_mut() {
                if branch.name == name && branch.upstream.is_none() {
                    branch.upstream = Some(format!("origin/{}", name));
                }
            }
            self.pruned_on_fetch.insert(name.to_string());
            self
        }

        pub fn checked_out(mut self, name: &str) -> Self {
            self.current = Some(name.to_string());
            self
        }

        pub fn failing_delete(mut self, name: &str) -> Self {
            self.failing_deletes.insert(name.to_string());
            self
        }

        pub fn not_a_repository(mut self) -> Self {
            self.not_a_repository = true;
            self
        }

        pub fn failing_inventory(mut self) -> Self {
            self.inventory_fails = true;
            self
        }

        pub fn failing_fetch(mut self) -> Self {
            self.fetch_fails = true;
            self
        }

        pub fn failing_reflog(mut self) -> Self {
            self.reflog_fails = true;
            self
        }

        pub fn failing_gc(mut self) -> Self {
            self.gc_fails = true;
            self
        }

        pub fn branch_names(&self) -> Vec<String> {
            self.branches
                .borrow()
                .iter()
                .map(|b| b.name.clone())
                .collect()
        }

        fn push_branch(self, name: &str, upstream: Option<String>, gone: bool) -> Self {
            let commit_id = format!("{:040x}", self.branches.borrow().len() + 1);
            self.branches.borrow_mut().push(TrackedBranch {
                name: name.to_string(),
                upstream,
                gone,
                commit_id,
            });
            self.branches
                .borrow_mut()
                .sort_by(|a, b| a.name.cmp(&b.name));
            self
        }
    }

    impl GitOperations for MockGit {
        fn is_repository(&self) -> bool {
            !self.not_a_repository
        }

        fn current_branch(&self) -> Result<Option<String>> {
            Ok(self.current.clone())
        }

        fn list_branches_with_tracking(&self) -> Result<Vec<TrackedBranch>> {
            if self.inventory_fails {
                return Err(ArboristError::inventory("simulated for-each-ref failure"));
            }
            Ok(self.branches.borrow().clone())
        }

        fn is_ancestor(&self, branch: &str, of_branch: &str) -> Result<bool> {
            Ok(branch == of_branch
                || self
                    .ancestry
                    .contains(&(branch.to_string(), of_branch.to_string())))
        }

        fn delete_branch(&self, name: &str, _force: bool) -> Result<()> {
            self.delete_calls.borrow_mut().push(name.to_string());
            if self.failing_deletes.contains(name) {
                return Err(ArboristError::git_operation(format!(
                    "cannot lock ref 'refs/heads/{}'",
                    name
                )));
            }
            self.branches.borrow_mut().retain(|b| b.name != name);
            Ok(())
        }

        fn fetch_and_prune(&self) -> Result<()> {
            self.fetch_calls.set(self.fetch_calls.get() + 1);
            if self.fetch_fails {
                return Err(ArboristError::git_operation("could not read from remote"));
            }
            for branch in self.branches.borrow_mut().iter_mut() {
                if self.pruned_on_fetch.contains(&branch.name) {
                    branch.gone = true;
                }
            }
            Ok(())
        }

        fn expire_reflog(&self, expiry: &str) -> Result<()> {
            self.reflog_calls.borrow_mut().push(expiry.to_string());
            if self.reflog_fails {
                return Err(ArboristError::git_operation("reflog expire failed"));
            }
            Ok(())
        }

        fn garbage_collect(&self) -> Result<()> {
            self.gc_calls.set(self.gc_calls.get() + 1);
            if self.gc_fails {
                return Err(ArboristError::git_operation("gc failed"));
            }
            Ok(())
        }
    }

    /// Answers confirmation prompts from a script, falling back to the prompt default.
    #[derive(Default)]
    pub struct ScriptedConfirmer {
        answers: RefCell<VecDeque<bool>>,
        pub questions: RefCell<Vec<String>>,
    }

    impl ScriptedConfirmer {
        pub fn new(answers: &[bool]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().copied().collect()),
                questions: RefCell::new(Vec::new()),
            }
        }

        pub fn always(answer: bool) -> Self {
            Self::new(&[answer; 64])
        }
    }

    impl Confirmer for ScriptedConfirmer {
        fn confirm(&self, question: &str, default: bool) -> bool {
            self.questions.borrow_mut().push(question.to_string());
            self.answers.borrow_mut().pop_front().unwrap_or(default)
        }
    }
}
