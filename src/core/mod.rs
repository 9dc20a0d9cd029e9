pub mod cleanup;
pub mod git;
