//! Command implementations
//!
//! Commands are methods on [`crate::areas::repository::Repository`], grouped
//! the way git groups them:
//!
//! - `plumbing`: direct object access (cat-file, hash-object, ls-tree)
//! - `porcelain`: everyday workflow (init, add, commit, status, log, branch)

pub mod plumbing;
pub mod porcelain;
