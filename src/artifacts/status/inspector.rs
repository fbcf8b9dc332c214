use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::status::file_change::{IndexChangeType, WorkspaceChangeType};
use crate::errors::Result;
use derive_new::new;

/// Per-path comparisons between the three areas
#[derive(new)]
pub struct Inspector<'w> {
    workspace: &'w Workspace,
}

impl<'w> Inspector<'w> {
    /// Blob id the working copy of `path` would get, `None` if it is not a file
    pub fn workspace_oid(&self, path: &str) -> Result<Option<ObjectId>> {
        if !self.workspace.is_file(path) {
            return Ok(None);
        }

        let content = self.workspace.read_file(path)?;
        Ok(Some(Database::hash_only(&content, ObjectType::Blob)))
    }

    pub fn check_index_against_workspace(
        &self,
        index_entry: Option<&IndexEntry>,
        workspace_oid: Option<&ObjectId>,
    ) -> WorkspaceChangeType {
        match (index_entry, workspace_oid) {
            (None, Some(_)) => WorkspaceChangeType::Untracked,
            (Some(_), None) => WorkspaceChangeType::Deleted,
            (Some(entry), Some(oid)) if &entry.oid != oid => WorkspaceChangeType::Modified,
            _ => WorkspaceChangeType::None,
        }
    }

    pub fn check_index_against_head_tree(
        &self,
        index_entry: Option<&IndexEntry>,
        head_entry: Option<&DatabaseEntry>,
    ) -> IndexChangeType {
        match (index_entry, head_entry) {
            (Some(index_entry), Some(head_entry)) if head_entry.oid != index_entry.oid => {
                IndexChangeType::Modified
            }
            (Some(_), None) => IndexChangeType::Added,
            (None, Some(_)) => IndexChangeType::Deleted,
            _ => IndexChangeType::None,
        }
    }
}
