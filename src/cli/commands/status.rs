use crate::config::Config;
use crate::core::cleanup::{
    BranchInventory, Category, Classification, ClassifiedBranch, Classifier, ProtectedSet,
};
use crate::core::git::{GitOperations, GitService};
use crate::utils::Result;

pub fn execute(config: Config) -> Result<()> {
    let git_service = GitService::discover()?;
    let classification = classify_branches(&git_service, &config)?;
    display_classification(&classification);
    Ok(())
}

/// Reads and classifies the local branches without fetching or deleting anything.
pub fn classify_branches(git: &dyn GitOperations, config: &Config) -> Result<Classification> {
    let protected = ProtectedSet::new(config.protected_branches.iter().cloned());
    let inventory = BranchInventory::new(git).snapshot()?;
    Classifier::new(git, &protected).classify(&inventory)
}

fn display_classification(classification: &Classification) {
    if classification.entries.is_empty() {
        println!("No local branches found.");
        return;
    }

    println!(
        "{:<2} {:<40} {:<10} {:<10} {:<8}",
        "St", "Branch", "Category", "Tracking", "Commit"
    );
    println!("{}", "-".repeat(74));

    for entry in &classification.entries {
        println!("{}", format_row(entry));
    }

    println!();
    if classification.merge_targets.is_empty() {
        println!("Merge detection disabled: no protected branch exists locally.");
    } else {
        println!("Merged into: {}", classification.merge_targets.join(", "));
    }
    println!("{}", format_counts(classification));
}

fn category_symbol(category: Category) -> &'static str {
    match category {
        Category::Protected => "🔒",
        Category::GoneRemote => "👻",
        Category::Merged => "✓",
        Category::Active => "🌿",
    }
}

fn format_row(entry: &ClassifiedBranch) -> String {
    let current_marker = if entry.checked_out { "*" } else { " " };
    format!(
        "{}{} {:<40} {:<10} {:<10} {:<8}",
        current_marker,
        category_symbol(entry.category),
        truncate_string(&entry.record.name, 40),
        entry.category,
        entry.record.tracking,
        entry.record.short_commit()
    )
}

fn format_counts(classification: &Classification) -> String {
    let removable =
        classification.count(Category::GoneRemote) + classification.count(Category::Merged);
    format!(
        "{} branch(es): {} protected, {} gone, {} merged, {} active ({} removable)",
        classification.entries.len(),
        classification.count(Category::Protected),
        classification.count(Category::GoneRemote),
        classification.count(Category::Merged),
        classification.count(Category::Active),
        removable
    )
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
