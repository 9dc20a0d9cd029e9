use super::inventory::{BranchRecord, Inventory, TrackingState};
use crate::core::git::GitOperations;
use crate::utils::error::Result;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// Branch names that are never deleted. Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedSet {
    names: BTreeSet<String>,
}

impl ProtectedSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ProtectedSet {
    fn default() -> Self {
        Self::new(["main", "master"])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Protected,
    GoneRemote,
    Merged,
    Active,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Protected => "protected",
            Category::GoneRemote => "gone",
            Category::Merged => "merged",
            Category::Active => "active",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedBranch {
    pub record: BranchRecord,
    pub category: Category,
    pub checked_out: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub entries: Vec<ClassifiedBranch>,
    pub merge_targets: Vec<String>,
}

impl Classification {
    pub fn category_of(&self, name: &str) -> Option<Category> {
        self.entries
            .iter()
            .find(|e| e.record.name == name)
            .map(|e| e.category)
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &ClassifiedBranch> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn count(&self, category: Category) -> usize {
        self.in_category(category).count()
    }
}

enum Guard {
    Protected,
    CheckedOut,
    Eligible,
}

pub struct Classifier<'a> {
    git: &'a dyn GitOperations,
    protected: &'a ProtectedSet,
}

impl<'a> Classifier<'a> {
    pub fn new(git: &'a dyn GitOperations, protected: &'a ProtectedSet) -> Self {
        Self { git, protected }
    }

    /// Protected branches that exist locally. A merged branch must be
    /// reachable from all of them.
    pub fn merge_targets(&self, inventory: &Inventory) -> Vec<String> {
        self.protected
            .iter()
            .filter(|name| inventory.contains(name))
            .map(str::to_string)
            .collect()
    }

    pub fn classify(&self, inventory: &Inventory) -> Result<Classification> {
        let merge_targets = self.merge_targets(inventory);
        if merge_targets.is_empty() {
            debug!("no protected branch exists locally, merge detection disabled");
        }

        let mut entries = Vec::with_capacity(inventory.branches.len());
        for record in &inventory.branches {
            let checked_out = inventory.is_current(&record.name);
            let category = match self.guard(record, checked_out) {
                Guard::Protected => Category::Protected,
                Guard::CheckedOut => Category::Active,
                Guard::Eligible => self.classify_eligible(record, &merge_targets)?,
            };

            debug!(branch = %record.name, %category, checked_out, "classified");
            entries.push(ClassifiedBranch {
                record: record.clone(),
                category,
                checked_out,
            });
        }

        Ok(Classification {
            entries,
            merge_targets,
        })
    }

    // Protection wins over everything, then the checked-out branch is held back.
    fn guard(&self, record: &BranchRecord, checked_out: bool) -> Guard {
        if self.protected.contains(&record.name) {
            Guard::Protected
        } else if checked_out {
            Guard::CheckedOut
        } else {
            Guard::Eligible
        }
    }

    fn classify_eligible(&self, record: &BranchRecord, merge_targets: &[String]) -> Result<Category> {
        if record.tracking == TrackingState::Gone {
            return Ok(Category::GoneRemote);
        }

        if merge_targets.is_empty() {
            return Ok(Category::Active);
        }

        for target in merge_targets {
            if !self.git.is_ancestor(&record.name, target)? {
                return Ok(Category::Active);
            }
        }

        Ok(Category::Merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cleanup::inventory::BranchInventory;
    use crate::test_utils::mock_git::MockGit;

    fn classify(git: &MockGit, protected: &ProtectedSet) -> Classification {
        let inventory = BranchInventory::new(git).snapshot().unwrap();
        Classifier::new(git, protected).classify(&inventory).unwrap()
    }

    fn scenario() -> MockGit {
        MockGit::new()
            .with_tracked_branch("main")
            .with_branch("feature/a")
            .merged_into("feature/a", "main")
            .with_gone_branch("feature/b")
            .with_branch("feature/c")
            .checked_out("main")
    }

    #[test]
    fn test_default_protected_set() {
        let set = ProtectedSet::default();
        assert!(set.contains("main"));
        assert!(set.contains("master"));
        assert!(!set.contains("Main"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_classifies_each_category() {
        let git = scenario();
        let result = classify(&git, &ProtectedSet::default());

        assert_eq!(result.category_of("main"), Some(Category::Protected));
        assert_eq!(result.category_of("feature/a"), Some(Category::Merged));
        assert_eq!(result.category_of("feature/b"), Some(Category::GoneRemote));
        assert_eq!(result.category_of("feature/c"), Some(Category::Active));
        assert_eq!(result.merge_targets, vec!["main".to_string()]);
    }

    #[test]
    fn test_protection_dominates_gone_and_merged() {
        let git = MockGit::new()
            .with_branch("main")
            .with_gone_branch("master")
            .merged_into("master", "main")
            .with_branch("develop")
            .merged_into("develop", "main")
            .merged_into("develop", "master");
        let protected = ProtectedSet::new(["main", "master", "develop"]);

        let result = classify(&git, &protected);
        for entry in &result.entries {
            assert_eq!(entry.category, Category::Protected, "{}", entry.record.name);
        }
    }

    #[test]
    fn test_reconfigured_protected_set_keeps_develop() {
        let git = MockGit::new()
            .with_branch("main")
            .with_branch("develop")
            .merged_into("develop", "main")
            .checked_out("main");
        let protected = ProtectedSet::new(["main", "develop"]);

        let result = classify(&git, &protected);
        assert_eq!(result.category_of("develop"), Some(Category::Protected));
    }

    #[test]
    fn test_checked_out_branch_is_never_a_candidate() {
        let git = MockGit::new()
            .with_branch("main")
            .with_gone_branch("feature/here")
            .merged_into("feature/here", "main")
            .checked_out("feature/here");

        let result = classify(&git, &ProtectedSet::default());
        let entry = &result.entries[0];
        assert_eq!(entry.record.name, "feature/here");
        assert_eq!(entry.category, Category::Active);
        assert!(entry.checked_out);
    }

    #[test]
    fn test_gone_takes_precedence_over_merged() {
        let git = MockGit::new()
            .with_branch("main")
            .with_gone_branch("both")
            .merged_into("both", "main");

        let result = classify(&git, &ProtectedSet::default());
        assert_eq!(result.category_of("both"), Some(Category::GoneRemote));
        assert_eq!(result.count(Category::Merged), 0);
    }

    #[test]
    fn test_merged_requires_every_protected_branch() {
        let git = MockGit::new()
            .with_branch("main")
            .with_branch("release")
            .with_branch("partial")
            .merged_into("partial", "main")
            .with_branch("full")
            .merged_into("full", "main")
            .merged_into("full", "release");
        let protected = ProtectedSet::new(["main", "release"]);

        let result = classify(&git, &protected);
        assert_eq!(result.category_of("partial"), Some(Category::Active));
        assert_eq!(result.category_of("full"), Some(Category::Merged));
    }

    #[test]
    fn test_no_local_protected_branch_disables_merge_detection() {
        let git = MockGit::new()
            .with_branch("trunk")
            .with_branch("topic")
            .merged_into("topic", "trunk");

        let result = classify(&git, &ProtectedSet::default());
        assert!(result.merge_targets.is_empty());
        assert_eq!(result.category_of("topic"), Some(Category::Active));
        assert_eq!(result.category_of("trunk"), Some(Category::Active));
    }

    #[test]
    fn test_protected_match_is_case_sensitive() {
        let git = MockGit::new()
            .with_branch("main")
            .with_branch("Main")
            .merged_into("Main", "main");

        let result = classify(&git, &ProtectedSet::default());
        assert_eq!(result.category_of("Main"), Some(Category::Merged));
    }
}
