//! Index (staging area)
//!
//! The index records which file contents go into the next commit. It is
//! persisted as a JSON array of [`IndexEntry`] values and always rewritten as
//! a whole; there is no partial update.
//!
//! A missing or empty index file is an empty staging area, not an error.
//! Mutating callers hold the repository lock (see
//! [`crate::areas::lock::RepositoryLock`]) across `rehydrate` and
//! `write_updates`, since the sequence is a read-modify-write.

use crate::artifacts::index::index_entry::{EntryMetadata, IndexEntry};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IoContext, KitError, Result};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.kit/index`)
    path: Box<Path>,
    /// Staged entries, unique by path, in insertion order
    entries: Vec<IndexEntry>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index from disk, replacing whatever is held in memory
    pub fn rehydrate(&mut self) -> Result<()> {
        self.entries = Self::read_entries(&self.path)?;

        Ok(())
    }

    /// Load and return the staged set
    pub fn load(&mut self) -> Result<&[IndexEntry]> {
        self.rehydrate()?;

        Ok(&self.entries)
    }

    fn read_entries(path: &Path) -> Result<Vec<IndexEntry>> {
        let content = match std::fs::read(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(KitError::io(path, err)),
        };

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&content).map_err(|source| KitError::IndexCorrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stage an entry
    ///
    /// An entry with the same path is replaced in place. Entries that would
    /// collide with the new one in a tree (a staged file where the new entry
    /// needs a directory, or staged files below the new entry's path) are
    /// dropped first.
    pub fn add(&mut self, entry: IndexEntry) {
        self.discard_conflicts(&entry);

        match self.entries.iter_mut().find(|staged| staged.path == entry.path) {
            Some(staged) => *staged = entry,
            None => self.entries.push(entry),
        }
    }

    /// Stage a file from its parts, persisting the index straight away
    pub fn add_entry(
        &mut self,
        path: String,
        oid: ObjectId,
        metadata: EntryMetadata,
    ) -> Result<()> {
        self.rehydrate()?;
        self.add(IndexEntry::new(path, oid, metadata));
        self.write_updates()
    }

    /// Unstage a path; returns whether anything was removed
    pub fn remove(&mut self, path: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.path != path);

        self.entries.len() != before
    }

    fn discard_conflicts(&mut self, entry: &IndexEntry) {
        let parents = entry.parent_dirs();
        let children_prefix = format!("{}/", entry.path);

        let before = self.entries.len();
        self.entries.retain(|staged| {
            !parents.contains(&staged.path.as_str()) && !staged.path.starts_with(&children_prefix)
        });

        if self.entries.len() != before {
            debug!(path = %entry.path, "dropped entries colliding with new index entry");
        }
    }

    /// Persist the full entry list
    pub fn write_updates(&mut self) -> Result<()> {
        let content = serde_json::to_vec_pretty(&self.entries).map_err(|source| {
            KitError::IndexCorrupt {
                path: self.path.to_path_buf(),
                source,
            }
        })?;

        std::fs::write(&self.path, content).at(self.path.as_ref())?;
        debug!(entries = self.entries.len(), "wrote index");

        Ok(())
    }
}
