//! Plumbing commands (low-level object access)
//!
//! ## Commands
//!
//! - `cat-file`: Print an object's payload or type
//! - `hash-object`: Compute a blob id and optionally store the blob
//! - `ls-tree`: List the files of a tree or commit, recursively

pub mod cat_file;
pub mod hash_object;
pub mod ls_tree;
