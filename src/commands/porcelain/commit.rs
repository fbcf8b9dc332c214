use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeNode};
use crate::errors::KitError;
use anyhow::Context;
use std::io::Write;
use tracing::info;

impl Repository {
    /// Snapshot the index as a new commit on the current branch
    ///
    /// The message is stored as given. Nothing is written when the index is
    /// empty or the message is blank. The branch ref only moves once the
    /// commit object is stored.
    pub fn commit(&self, message: &str) -> anyhow::Result<ObjectId> {
        if message.trim().is_empty() {
            return Err(KitError::EmptyMessage.into());
        }

        let _lock = self.lock()?;
        let mut index = self.index();

        index.rehydrate().context("failed to load index")?;
        if index.is_empty() {
            return Err(KitError::EmptyIndex.into());
        }

        let branch = self.refs().current_branch()?;
        let parent = self.refs().read_branch(&branch)?;

        let root = TreeNode::build(index.entries())?;
        let tree_oid = root
            .write(&mut |tree: &Tree| self.database().store(tree))
            .context("failed to write tree")?;

        let commit = Commit::new(parent, tree_oid, message.to_string());
        let commit_oid = self
            .database()
            .store(&commit)
            .context("failed to store commit")?;
        self.refs()
            .update_ref(&branch.to_ref_name(), &commit_oid)
            .with_context(|| format!("failed to move branch {branch}"))?;

        info!(%branch, commit = %commit_oid, root = commit.is_root(), "created commit");

        let is_root = if commit.is_root() { "(root-commit) " } else { "" };
        writeln!(
            self.writer(),
            "[{} {}{}] {}",
            branch,
            is_root,
            commit_oid.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_oid)
    }
}
