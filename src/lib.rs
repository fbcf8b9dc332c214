//! `kit`: a minimal content-addressed version control engine
//!
//! File contents are stored as blobs in an object store keyed by SHA-256,
//! staged in a JSON index, snapshotted into trees and linked into a linear
//! commit history. Status compares the last commit, the index and the
//! working directory.
//!
//! ## Layout
//!
//! - `areas`: on-disk storage (object database, index, refs, workspace)
//! - `artifacts`: data types and algorithms (objects, tree building, status)
//! - `commands`: porcelain and plumbing commands, as methods on
//!   [`areas::repository::Repository`]
//! - `errors`: the library error type

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
pub mod logging;

pub use areas::repository::Repository;
pub use errors::{KitError, Result};
