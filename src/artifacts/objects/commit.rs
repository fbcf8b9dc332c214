//! Commit object
//!
//! Commits link a tree snapshot to at most one parent commit and carry a
//! free-form message. History is strictly linear.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>      (absent on a root commit)
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;

const TREE_PREFIX: &str = "tree ";
const PARENT_PREFIX: &str = "parent ";

/// Commit object
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit ID (None for the root commit)
    parent: Option<ObjectId>,
    /// Tree object ID representing the directory snapshot
    tree_oid: ObjectId,
    /// Commit message, stored verbatim
    message: String,
}

impl Commit {
    pub fn new(parent: Option<ObjectId>, tree_oid: ObjectId, message: String) -> Self {
        Commit {
            parent,
            tree_oid,
            message,
        }
    }

    /// First line of the message, for one-line output
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Bytes {
        let mut content = format!("{TREE_PREFIX}{}\n", self.tree_oid);
        if let Some(parent) = &self.parent {
            content.push_str(&format!("{PARENT_PREFIX}{parent}\n"));
        }
        content.push_str(&self.message);

        Bytes::from(content)
    }
}

impl Unpackable for Commit {
    fn deserialize(payload: Bytes) -> anyhow::Result<Self> {
        let content = std::str::from_utf8(&payload).context("commit is not valid utf-8")?;

        let (tree_line, rest) = content
            .split_once('\n')
            .context("missing tree line terminator")?;
        let tree_oid = tree_line
            .strip_prefix(TREE_PREFIX)
            .context("first line is not a tree line")?;
        let tree_oid = ObjectId::try_parse(tree_oid.to_string())?;

        // only a well-formed `parent <hash>` line counts; anything else is message
        let parent_line = rest.split_once('\n').and_then(|(line, message)| {
            let parent = line.strip_prefix(PARENT_PREFIX)?;
            ObjectId::try_parse(parent.to_string())
                .ok()
                .filter(|oid| oid.to_string() == parent)
                .map(|oid| (oid, message))
        });
        let (parent, message) = match parent_line {
            Some((parent, message)) => (Some(parent), message),
            None => (None, rest),
        };

        Ok(Self::new(parent, tree_oid, message.to_string()))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.serialize()).into_owned()
    }
}
