use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Commits reachable from HEAD, most recent first
    pub fn history(&self) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        let head = self.refs().read_head()?;

        RevList::new(self.database(), head)
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .context("failed to walk commit history")
    }

    pub fn log(&self, oneline: bool) -> anyhow::Result<()> {
        for (position, (oid, commit)) in self.history()?.into_iter().enumerate() {
            if oneline {
                writeln!(
                    self.writer(),
                    "{} {}",
                    oid.to_short_oid().yellow(),
                    commit.short_message()
                )?;
                continue;
            }

            if position > 0 {
                writeln!(self.writer())?;
            }
            writeln!(self.writer(), "{}", format!("commit {oid}").yellow())?;
            writeln!(self.writer(), "{}", commit.display())?;
        }

        Ok(())
    }
}
