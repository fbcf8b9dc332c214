use crate::areas::repository::Repository;
use crate::artifacts::status::file_change::FileChangeType;
use crate::artifacts::status::status_info::{Status, StatusReport};
use anyhow::Context;
use colored::Colorize;
use std::io::Write;

const INDENT: &str = "        ";

impl Repository {
    /// Compare HEAD, the index and the working directory
    pub fn status_report(&self) -> anyhow::Result<StatusReport> {
        let mut index = self.index();
        index.rehydrate().context("failed to load index")?;

        Status::new(self.database(), self.workspace(), self.refs())
            .initialize(&index)
            .context("failed to compute status")
    }

    pub fn status(&self, porcelain: bool) -> anyhow::Result<StatusReport> {
        let report = self.status_report()?;

        if porcelain {
            for line in report.porcelain_lines() {
                writeln!(self.writer(), "{line}")?;
            }
        } else {
            self.print_long_status(&report)?;
        }

        Ok(report)
    }

    fn print_long_status(&self, report: &StatusReport) -> anyhow::Result<()> {
        writeln!(self.writer(), "On branch {}", self.refs().current_branch()?)?;
        if !report.has_commits {
            writeln!(self.writer(), "\nNo commits yet")?;
        }

        self.print_changeset("Changes to be committed", &report.index_changeset())?;
        self.print_changeset("Changes not staged for commit", &report.workspace_changeset())?;

        let untracked = report.untracked();
        if !untracked.is_empty() {
            writeln!(self.writer(), "\nUntracked files:")?;
            for path in untracked {
                writeln!(self.writer(), "{INDENT}{}", path.red())?;
            }
        }

        if report.is_clean() {
            writeln!(self.writer(), "\nnothing to commit, working tree clean")?;
        }

        Ok(())
    }

    fn print_changeset(
        &self,
        title: &str,
        changeset: &[(&str, FileChangeType)],
    ) -> anyhow::Result<()> {
        if changeset.is_empty() {
            return Ok(());
        }

        writeln!(self.writer(), "\n{title}:")?;
        for (path, change) in changeset {
            let path = match change {
                FileChangeType::Index(_) => path.green(),
                FileChangeType::Workspace(_) => path.red(),
            };
            writeln!(self.writer(), "{change}{path}")?;
        }

        Ok(())
    }
}
