//! Repository data structures and algorithms
//!
//! - `branch`: Branch names
//! - `database`: Entries of stored trees
//! - `index`: Staging area entries and file modes
//! - `log`: Commit history traversal
//! - `objects`: Object types (blob, tree, commit) and their codecs
//! - `status`: Three-way status reconciliation

pub mod branch;
pub mod database;
pub mod index;
pub mod log;
pub mod objects;
pub mod status;
