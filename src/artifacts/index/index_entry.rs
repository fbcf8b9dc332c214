//! Index entry representation
//!
//! Each entry in the index represents a staged file with:
//! - File path, relative to the work tree and `/`-separated
//! - Content hash (object ID of the blob)
//! - File metadata (mode, size, modification time)
//!
//! Entries are persisted as JSON objects of the form
//! `{"path": .., "hash": .., "mode": .., "size": .., "mtime": ..}`.

use crate::artifacts::index::entry_mode::{EntryMode, FileMode};
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use is_executable::IsExecutable;
use serde::{Deserialize, Serialize};
use std::fs::Metadata;
use std::os::unix::prelude::MetadataExt;
use std::path::Path;

/// Index entry representing a staged file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct IndexEntry {
    /// File path relative to the work tree root
    pub path: String,
    /// Hash of the staged blob
    #[serde(rename = "hash")]
    pub oid: ObjectId,
    /// File metadata captured when the file was staged
    #[serde(flatten)]
    pub metadata: EntryMetadata,
}

impl IndexEntry {
    /// Every ancestor directory of the entry, outermost first
    ///
    /// `a/b/c.txt` yields `["a", "a/b"]`; a top-level file yields nothing.
    pub fn parent_dirs(&self) -> Vec<&str> {
        self.path
            .match_indices('/')
            .map(|(position, _)| &self.path[..position])
            .collect()
    }

    pub fn mode(&self) -> EntryMode {
        self.metadata.mode
    }
}

/// File metadata stored in index entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMetadata {
    /// File mode (regular or executable)
    pub mode: EntryMode,
    /// File size in bytes
    pub size: u64,
    /// Modification time (seconds since Unix epoch)
    pub mtime: i64,
}

impl From<(&Path, &Metadata)> for EntryMetadata {
    fn from((file_path, metadata): (&Path, &Metadata)) -> Self {
        let mode = match file_path.is_executable() {
            true => EntryMode::File(FileMode::Executable),
            false => EntryMode::File(FileMode::Regular),
        };

        Self {
            mode,
            size: metadata.size(),
            mtime: metadata.mtime(),
        }
    }
}
