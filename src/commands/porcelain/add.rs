use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Outcome of staging several paths
///
/// Each argument is handled on its own; one failing does not stop the rest.
#[derive(Debug, Default)]
pub struct AddReport {
    /// Files staged, in the order they were added
    pub added: Vec<String>,
    /// Arguments or files that could not be staged, with the reason
    pub failed: Vec<(String, anyhow::Error)>,
}

impl AddReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl Repository {
    /// Stage files and directories (recursively), relative to the work tree
    ///
    /// Successfully staged files are persisted in one index write even when
    /// other paths fail. An unreadable index aborts the whole call.
    pub fn add(&self, paths: &[String]) -> anyhow::Result<AddReport> {
        let _lock = self.lock()?;
        let mut index = self.index();

        index.rehydrate().context("failed to load index")?;
        let ignores = self.workspace().load_ignores()?;

        let mut report = AddReport::default();
        for path in paths {
            let files = match self.workspace().list_files(Some(Path::new(path)), &ignores) {
                Ok(files) => files,
                Err(err) => {
                    warn!(path = %path, error = %err, "cannot add path");
                    report.failed.push((path.clone(), err.into()));
                    continue;
                }
            };

            if files.is_empty() {
                debug!(path = %path, "nothing to add");
            }

            for file in files {
                match self.stage_file(&file, &mut index) {
                    Ok(()) => report.added.push(file),
                    Err(err) => {
                        warn!(path = %file, error = %err, "cannot add file");
                        report.failed.push((file, err));
                    }
                }
            }
        }

        if !report.added.is_empty() {
            index.write_updates().context("failed to write index")?;
        }

        for file in &report.added {
            writeln!(self.writer(), "added {file}")?;
        }

        Ok(report)
    }

    fn stage_file(&self, file: &str, index: &mut Index) -> anyhow::Result<()> {
        let data = self.workspace().read_file(file)?;
        let stat = self.workspace().stat_file(file)?;
        let oid = self.database().put(&data, ObjectType::Blob)?;

        index.add(IndexEntry::new(file.to_string(), oid, stat));

        Ok(())
    }
}
