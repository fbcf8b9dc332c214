use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::status::file_change::{
    FileChange, FileChangeType, IndexChangeType, WorkspaceChangeType,
};
use crate::artifacts::status::inspector::Inspector;
use crate::errors::Result;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

pub type HeadTree = BTreeMap<String, DatabaseEntry>;
type StagedSet<'i> = BTreeMap<&'i str, &'i IndexEntry>;

/// Outcome of comparing HEAD, the index and the working directory
///
/// Every path that differs in at least one comparison has a [`FileChange`];
/// the list accessors return paths in byte order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    /// Whether the current branch has a commit at all
    pub has_commits: bool,
    pub changes: BTreeMap<String, FileChange>,
}

impl StatusReport {
    fn paths_where(&self, predicate: impl Fn(&FileChange) -> bool) -> Vec<&str> {
        self.changes
            .iter()
            .filter(|(_, change)| predicate(change))
            .map(|(path, _)| path.as_str())
            .collect()
    }

    pub fn staged_modified(&self) -> Vec<&str> {
        self.paths_where(|change| change.index_change == IndexChangeType::Modified)
    }

    pub fn staged_new(&self) -> Vec<&str> {
        self.paths_where(|change| change.index_change == IndexChangeType::Added)
    }

    pub fn staged_deleted(&self) -> Vec<&str> {
        self.paths_where(|change| change.index_change == IndexChangeType::Deleted)
    }

    pub fn unstaged_modified(&self) -> Vec<&str> {
        self.paths_where(|change| change.workspace_change == WorkspaceChangeType::Modified)
    }

    pub fn unstaged_deleted(&self) -> Vec<&str> {
        self.paths_where(|change| change.workspace_change == WorkspaceChangeType::Deleted)
    }

    pub fn untracked(&self) -> Vec<&str> {
        self.paths_where(|change| change.workspace_change == WorkspaceChangeType::Untracked)
    }

    /// Staged changes with their long-form label
    pub fn index_changeset(&self) -> Vec<(&str, FileChangeType)> {
        self.changes
            .iter()
            .filter(|(_, change)| change.index_change != IndexChangeType::None)
            .map(|(path, change)| (path.as_str(), FileChangeType::Index(change.index_change)))
            .collect()
    }

    /// Unstaged changes to tracked files with their long-form label
    pub fn workspace_changeset(&self) -> Vec<(&str, FileChangeType)> {
        self.changes
            .iter()
            .filter(|(_, change)| {
                matches!(
                    change.workspace_change,
                    WorkspaceChangeType::Modified | WorkspaceChangeType::Deleted
                )
            })
            .map(|(path, change)| {
                (
                    path.as_str(),
                    FileChangeType::Workspace(change.workspace_change),
                )
            })
            .collect()
    }

    /// `<code> <path>` lines in path order
    pub fn porcelain_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        for (path, change) in &self.changes {
            lines.push(format!("{change} {path}"));

            if change.index_change != IndexChangeType::None
                && change.workspace_change == WorkspaceChangeType::Untracked
            {
                lines.push(format!("?? {path}"));
            }
        }

        lines
    }

    pub fn is_clean(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Computes a [`StatusReport`] from the repository areas
#[derive(new)]
pub struct Status<'r> {
    database: &'r Database,
    workspace: &'r Workspace,
    refs: &'r Refs,
}

impl<'r> Status<'r> {
    pub fn initialize(&self, index: &Index) -> Result<StatusReport> {
        let inspector = Inspector::new(self.workspace);
        let (has_commits, head_tree) = self.load_head_tree()?;
        let staged = index
            .entries()
            .map(|entry| (entry.path.as_str(), entry))
            .collect::<StagedSet<'_>>();
        let ignores = self.workspace.load_ignores()?;
        let walked = self
            .workspace
            .list_files(None, &ignores)?
            .into_iter()
            .collect::<BTreeSet<_>>();
        let mut changes = BTreeMap::<String, FileChange>::new();

        for &entry in staged.values() {
            // a staged path the walk skips (now ignored, or gone) reads as deleted
            let workspace_oid = if walked.contains(&entry.path) {
                inspector.workspace_oid(&entry.path)?
            } else {
                None
            };
            let change = FileChange {
                index_change: inspector
                    .check_index_against_head_tree(Some(entry), head_tree.get(&entry.path)),
                workspace_change: inspector
                    .check_index_against_workspace(Some(entry), workspace_oid.as_ref()),
            };

            if !change.is_unchanged() {
                changes.insert(entry.path.clone(), change);
            }
        }

        self.collect_deleted_head_files(&head_tree, &staged, &inspector, &mut changes);
        Self::collect_untracked_files(walked, &staged, &mut changes);
        debug!(changes = changes.len(), has_commits, "computed status");

        Ok(StatusReport {
            has_commits,
            changes,
        })
    }

    fn load_head_tree(&self) -> Result<(bool, HeadTree)> {
        match self.refs.read_head()? {
            Some(head_oid) => {
                let commit = self.database.load_commit(&head_oid)?;
                Ok((true, self.database.flatten_tree(commit.tree_oid())?))
            }
            None => Ok((false, HeadTree::new())),
        }
    }

    fn collect_deleted_head_files(
        &self,
        head_tree: &HeadTree,
        staged: &StagedSet<'_>,
        inspector: &Inspector<'_>,
        changes: &mut BTreeMap<String, FileChange>,
    ) {
        for (path, head_entry) in head_tree {
            if !staged.contains_key(path.as_str()) {
                changes.entry(path.clone()).or_default().index_change =
                    inspector.check_index_against_head_tree(None, Some(head_entry));
            }
        }
    }

    fn collect_untracked_files(
        walked: BTreeSet<String>,
        staged: &StagedSet<'_>,
        changes: &mut BTreeMap<String, FileChange>,
    ) {
        for path in walked {
            if !staged.contains_key(path.as_str()) {
                // a path only deleted from the index is also untracked on disk
                let change = changes.entry(path).or_default();
                change.workspace_change = WorkspaceChangeType::Untracked;
            }
        }
    }
}
