//! Storage areas of a repository
//!
//! - `database`: content-addressed object store
//! - `index`: staging area persisted as JSON
//! - `lock`: advisory lock held by mutating commands
//! - `refs`: HEAD and branch references
//! - `repository`: ties the areas to one work-tree root
//! - `workspace`: working directory listing and ignore rules

pub mod database;
pub mod index;
pub mod lock;
pub mod refs;
pub mod repository;
pub mod workspace;
