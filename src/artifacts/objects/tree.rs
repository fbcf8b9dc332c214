//! Tree object and tree builder
//!
//! Trees represent directory snapshots. Each child is one text line:
//!
//! ```text
//! <mode> <type> <hash> <name>
//! ```
//!
//! with `type` either `blob` or `tree`. Lines are joined with `\n` and carry
//! no trailing newline.
//!
//! ## Tree Building
//!
//! A commit turns the flat list of staged paths into a [`TreeNode`] hierarchy,
//! then writes it bottom-up: every directory's children are stored before the
//! directory itself, because the parent line embeds the child hash.
//!
//! Siblings always live in a `BTreeMap` keyed by name, so lines come out in
//! byte-wise name order and identical content hashes identically.

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::KitError;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;

/// Stored tree object: name-ordered children of one directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, DatabaseEntry>,
}

impl Tree {
    pub fn insert(&mut self, name: String, entry: DatabaseEntry) {
        self.entries.insert(name, entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &DatabaseEntry)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, DatabaseEntry)> {
        self.entries.into_iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Bytes {
        let lines = self
            .entries
            .iter()
            .map(|(name, entry)| {
                format!(
                    "{} {} {} {}",
                    entry.mode.as_str(),
                    entry.object_type().as_str(),
                    entry.oid,
                    name
                )
            })
            .collect::<Vec<_>>();

        Bytes::from(lines.join("\n"))
    }
}

impl Unpackable for Tree {
    fn deserialize(payload: Bytes) -> anyhow::Result<Self> {
        let content = std::str::from_utf8(&payload).context("tree is not valid utf-8")?;
        let mut tree = Tree::default();

        for line in content.split('\n').filter(|line| !line.is_empty()) {
            // the name is last, so it may itself contain spaces
            let mut parts = line.splitn(4, ' ');
            let (Some(mode), Some(object_type), Some(oid), Some(name)) =
                (parts.next(), parts.next(), parts.next(), parts.next())
            else {
                anyhow::bail!("malformed tree line '{line}'");
            };

            let mode = EntryMode::from_octal_str(mode)?;
            let object_type = ObjectType::try_from(object_type).map_err(anyhow::Error::msg)?;
            let oid = ObjectId::try_parse(oid.to_string())?;

            let entry = DatabaseEntry::new(oid, mode);
            if entry.object_type() != object_type {
                anyhow::bail!("mode {mode} does not match type {object_type} for '{name}'");
            }
            if tree.entries.insert(name.to_string(), entry).is_some() {
                anyhow::bail!("duplicate tree entry '{name}'");
            }
        }

        Ok(tree)
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|(name, entry)| {
                format!(
                    "{} {} {}\t{}",
                    entry.mode.as_str(),
                    entry.object_type().as_str(),
                    entry.oid,
                    name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

/// Transient snapshot hierarchy built from the index for one commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// A staged file: its blob is already in the store
    Leaf(DatabaseEntry),
    /// A directory; it gets a hash only once written
    Directory(BTreeMap<String, TreeNode>),
}

impl Default for TreeNode {
    fn default() -> Self {
        TreeNode::Directory(BTreeMap::new())
    }
}

impl TreeNode {
    /// Build the root directory from a flat set of index entries
    ///
    /// Entries sharing a path prefix share the same directory node. A path
    /// that is used both as a file and as a directory fails with
    /// [`KitError::AmbiguousPathCollision`]. Empty, `.` or `..` segments and
    /// names containing a newline cannot form a tree line and fail with
    /// [`KitError::InvalidPath`].
    pub fn build<'e>(entries: impl IntoIterator<Item = &'e IndexEntry>) -> Result<Self, KitError> {
        let mut root = Self::default();

        for entry in entries {
            let segments = entry.path.split('/').collect::<Vec<_>>();
            if segments.iter().any(|segment| {
                segment.is_empty() || *segment == "." || *segment == ".." || segment.contains('\n')
            }) {
                return Err(KitError::InvalidPath(entry.path.clone()));
            }

            root.add_entry(&segments, 0, entry)?;
        }

        Ok(root)
    }

    fn add_entry(
        &mut self,
        segments: &[&str],
        depth: usize,
        entry: &IndexEntry,
    ) -> Result<(), KitError> {
        let TreeNode::Directory(children) = self else {
            return Err(KitError::AmbiguousPathCollision {
                path: segments[..depth].join("/"),
            });
        };

        let name = segments[depth].to_string();
        if depth + 1 == segments.len() {
            if let Some(TreeNode::Directory(_)) = children.get(&name) {
                return Err(KitError::AmbiguousPathCollision {
                    path: entry.path.clone(),
                });
            }
            children.insert(
                name,
                TreeNode::Leaf(DatabaseEntry::new(entry.oid.clone(), entry.mode())),
            );

            return Ok(());
        }

        children
            .entry(name)
            .or_default()
            .add_entry(segments, depth + 1, entry)
    }

    /// Write the hierarchy bottom-up and return the hash of this node
    ///
    /// Leaves return their blob hash unchanged. Every directory is turned
    /// into a [`Tree`] once all of its children have hashes, and handed to
    /// `store`, which must persist it and return its id.
    pub fn write<F>(&self, store: &mut F) -> Result<ObjectId, KitError>
    where
        F: FnMut(&Tree) -> Result<ObjectId, KitError>,
    {
        match self {
            TreeNode::Leaf(entry) => Ok(entry.oid.clone()),
            TreeNode::Directory(children) => {
                let mut tree = Tree::default();
                for (name, child) in children {
                    let oid = child.write(store)?;
                    let mode = match child {
                        TreeNode::Leaf(entry) => entry.mode,
                        TreeNode::Directory(_) => EntryMode::Directory,
                    };
                    tree.insert(name.clone(), DatabaseEntry::new(oid, mode));
                }

                store(&tree)
            }
        }
    }
}
