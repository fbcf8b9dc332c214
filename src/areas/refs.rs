//! References (HEAD and branches)
//!
//! A branch is a file under `refs/heads/` whose content is a commit hash.
//! HEAD is always symbolic: `ref: refs/heads/<name>`. A detached HEAD is not
//! supported and reading one fails with `RefResolutionFailed`.
//!
//! A branch ref that does not exist yet (or is empty) means the branch has no
//! commits; the next commit on it is a root commit.

use crate::artifacts::branch::HEADS_PREFIX;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IoContext, KitError, Result};
use derive_new::new;
use fake::rand;
use std::io::Write;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.kit`)
    path: Box<Path>,
}

impl Refs {
    /// Full ref name HEAD points at, e.g. `refs/heads/main`
    pub fn current_ref(&self) -> Result<String> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path).map_err(|err| {
            KitError::RefResolutionFailed {
                name: HEAD_REF_NAME.to_string(),
                reason: err.to_string(),
            }
        })?;

        let re = regex::Regex::new(SYMREF_REGEX).map_err(|err| KitError::RefResolutionFailed {
            name: HEAD_REF_NAME.to_string(),
            reason: err.to_string(),
        })?;

        match re.captures(content.trim()) {
            Some(symref) if symref[1].starts_with(HEADS_PREFIX) => Ok(symref[1].to_string()),
            _ => Err(KitError::RefResolutionFailed {
                name: HEAD_REF_NAME.to_string(),
                reason: format!("expected 'ref: {HEADS_PREFIX}<name>', found '{}'", content.trim()),
            }),
        }
    }

    pub fn current_branch(&self) -> Result<BranchName> {
        BranchName::try_from_ref_name(&self.current_ref()?)
    }

    /// Commit the current branch points at, `None` before the first commit
    pub fn read_head(&self) -> Result<Option<ObjectId>> {
        self.read_ref(&self.current_ref()?)
    }

    /// Commit a ref points at; a missing or empty ref file yields `None`
    pub fn read_ref(&self, ref_name: &str) -> Result<Option<ObjectId>> {
        let ref_path = self.path.join(ref_name);

        let content = match std::fs::read_to_string(&ref_path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(KitError::RefResolutionFailed {
                    name: ref_name.to_string(),
                    reason: err.to_string(),
                });
            }
        };

        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        ObjectId::try_parse(content.to_string())
            .map(Some)
            .map_err(|err| KitError::RefResolutionFailed {
                name: ref_name.to_string(),
                reason: err.to_string(),
            })
    }

    pub fn read_branch(&self, branch_name: &BranchName) -> Result<Option<ObjectId>> {
        self.read_ref(&branch_name.to_ref_name())
    }

    /// Overwrite a ref with a commit hash, creating parent directories
    pub fn update_ref(&self, ref_name: &str, oid: &ObjectId) -> Result<()> {
        self.update_ref_file(&self.path.join(ref_name), oid.as_ref())?;
        debug!(ref_name, %oid, "updated ref");

        Ok(())
    }

    /// Point HEAD at a branch
    pub fn set_head(&self, branch_name: &BranchName) -> Result<()> {
        self.update_ref_file(
            &self.head_path(),
            &format!("ref: {}\n", branch_name.to_ref_name()),
        )
    }

    /// Replace a ref file as a whole
    ///
    /// The content goes to a `<name>.<random>.lock` sibling first and is
    /// renamed over the ref, so a failed write never leaves a truncated ref.
    /// The `.lock` suffix keeps the temp file out of branch listings.
    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> Result<()> {
        let parent = path.parent().unwrap_or(&self.path);
        std::fs::create_dir_all(parent).at(parent)?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_path = parent.join(format!("{file_name}.{}.lock", rand::random::<u32>()));

        let mut temp_file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .at(&temp_path)?;
        let written = temp_file
            .write_all(raw_ref.as_bytes())
            .and_then(|()| temp_file.sync_all());
        drop(temp_file);

        if let Err(err) = written.and_then(|()| std::fs::rename(&temp_path, path)) {
            // the ref itself is untouched; only the temp file needs cleaning up
            let _ = std::fs::remove_file(&temp_path);
            return Err(KitError::io(path, err));
        }

        Ok(())
    }

    /// Create `name` pointing at the commit `source` points at
    ///
    /// Fails with `BranchExists` if `name` already has a ref file and with
    /// `BranchNotFound` if `source` has no commit to copy.
    pub fn create_branch(&self, name: &BranchName, source: &BranchName) -> Result<ObjectId> {
        let branch_path = self.heads_path().join(name.as_ref());
        if branch_path.exists() {
            return Err(KitError::BranchExists(name.to_string()));
        }

        let source_oid = self
            .read_branch(source)?
            .ok_or_else(|| KitError::BranchNotFound(source.to_string()))?;

        self.update_ref(&name.to_ref_name(), &source_oid)?;

        Ok(source_oid)
    }

    /// Every branch with a ref file, sorted by name
    pub fn list_branches(&self) -> Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                BranchName::try_parse(name).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    pub fn tags_path(&self) -> Box<Path> {
        self.refs_path().join("tags").into_boxed_path()
    }
}
