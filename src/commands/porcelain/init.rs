use crate::areas::repository::Repository;
use crate::areas::workspace::IGNORE_FILE_NAME;
use crate::artifacts::branch::branch_name::BranchName;
use anyhow::Context;
use std::fs;
use std::io::Write;
use tracing::info;

const DEFAULT_IGNORE_CONTENT: &str = "# one glob per line, matched against file and directory names\n";

impl Repository {
    /// Create the `.kit` layout; existing files are left alone
    pub fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .kit/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .kit/refs/heads directory")?;

        fs::create_dir_all(self.refs().tags_path())
            .context("Failed to create .kit/refs/tags directory")?;

        if !self.refs().head_path().exists() {
            self.refs()
                .set_head(&BranchName::default())
                .context("Failed to create initial HEAD reference")?;
        }

        {
            let mut index = self.index();
            if !index.path().exists() {
                index
                    .write_updates()
                    .context("Failed to create .kit/index file")?;
            }
        }

        let ignore_path = self.path().join(IGNORE_FILE_NAME);
        if !ignore_path.exists() {
            fs::write(&ignore_path, DEFAULT_IGNORE_CONTENT)
                .with_context(|| format!("Failed to create {IGNORE_FILE_NAME}"))?;
        }

        info!(path = %self.path().display(), "initialized repository");
        writeln!(
            self.writer(),
            "Initialized empty kit repository in {}",
            self.kit_path().display()
        )?;

        Ok(())
    }
}
