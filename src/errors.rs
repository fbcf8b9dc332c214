//! Library error types
//!
//! Every failure raised by the storage areas (object database, index, refs,
//! workspace) and by the object codecs is a [`KitError`]. Porcelain commands
//! wrap these in `anyhow` with extra context; callers that need the kind back
//! can use `anyhow::Error::downcast_ref::<KitError>()`.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KitError {
    /// no object file exists under the given id
    #[error("object not found: {oid}")]
    ObjectNotFound { oid: ObjectId },

    /// the object file exists but cannot be decoded
    #[error("corrupt object {oid}: {reason}")]
    CorruptObject { oid: ObjectId, reason: String },

    /// the staging file cannot be parsed
    #[error("corrupt index at {path}: {source}")]
    IndexCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("nothing to commit (index is empty)")]
    EmptyIndex,

    #[error("aborting commit due to empty commit message")]
    EmptyMessage,

    /// HEAD or a branch ref is missing, unreadable or malformed
    #[error("cannot resolve ref {name}: {reason}")]
    RefResolutionFailed { name: String, reason: String },

    #[error("pathspec '{0}' did not match any files")]
    PathNotFound(PathBuf),

    /// a staged path is used both as a file and as a directory
    #[error("path {path} is staged both as a file and as a directory")]
    AmbiguousPathCollision { path: String },

    /// a staged path that cannot be placed in a tree (empty segment, `..`)
    #[error("invalid path '{0}'")]
    InvalidPath(String),

    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("invalid entry mode: {0}")]
    InvalidEntryMode(String),

    #[error("invalid branch name '{0}'")]
    InvalidBranchName(String),

    #[error("a branch named '{0}' already exists")]
    BranchExists(String),

    #[error("branch '{0}' not found")]
    BranchNotFound(String),

    #[error("invalid ignore pattern '{pattern}': {source}")]
    InvalidIgnorePattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("not a kit repository: {0}")]
    NotARepository(PathBuf),

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl KitError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        KitError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn corrupt(oid: &ObjectId, reason: impl Into<String>) -> Self {
        KitError::CorruptObject {
            oid: oid.clone(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KitError>;

/// Attach the offending path to an `io::Error`.
pub(crate) trait IoContext<T> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| KitError::io(path, source))
    }
}
