use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::io::Write;
use tracing::info;

impl Repository {
    /// Create `branch_name` from `source_branch`, or from the current branch
    pub fn branch(
        &self,
        branch_name: &str,
        source_branch: Option<&str>,
    ) -> anyhow::Result<ObjectId> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let source = match source_branch {
            Some(source) => BranchName::try_parse(source.to_string())?,
            None => self.refs().current_branch()?,
        };

        let _lock = self.lock()?;
        let oid = self.refs().create_branch(&branch_name, &source)?;
        info!(branch = %branch_name, %source, commit = %oid, "created branch");

        Ok(oid)
    }

    /// Print every branch, marking the one HEAD points at
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let current = self.refs().current_branch()?;
        let branches = self.refs().list_branches()?;

        for branch in &branches {
            if branch == &current {
                writeln!(self.writer(), "* {}", branch.as_ref().green())?;
            } else {
                writeln!(self.writer(), "  {}", branch)?;
            }
        }

        Ok(branches)
    }
}
