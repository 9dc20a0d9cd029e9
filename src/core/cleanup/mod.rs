//! Branch classification and safe deletion.
//!
//! A run reads the branch set once, sorts every branch into exactly one
//! [`Category`], plans deletions for the gone and merged ones, and applies
//! that plan branch by branch.

pub mod classifier;
pub mod executor;
pub mod inventory;
pub mod orchestrator;
pub mod planner;

pub use classifier::{Category, Classification, ClassifiedBranch, Classifier, ProtectedSet};
pub use executor::{BranchFailure, Executor, RunOutcome, RunReport, SkipReason, SkippedBranch};
pub use inventory::{BranchInventory, BranchRecord, Inventory, TrackingState};
pub use orchestrator::{Orchestrator, RunSettings, RunState};
pub use planner::{
    Confirmer, DeletionCandidate, DeletionPlan, DeletionPlanner, DeletionReason, RunMode,
    TerminalConfirmer,
};
