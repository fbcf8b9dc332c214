//! Working directory access
//!
//! Paths handed out by the workspace are relative to the work-tree root and
//! `/`-separated, the same form the index and trees use.
//!
//! ## Ignore file
//!
//! `.kitignore` holds one glob per line; blank lines and `#` comments are
//! skipped. Each pattern is matched against a single path segment (a file or
//! directory name), never against the whole path, and an ignored directory is
//! pruned with everything below it. `.kit` and `.git` are always ignored.

use crate::artifacts::index::index_entry::EntryMetadata;
use crate::errors::{IoContext, KitError, Result};
use bytes::Bytes;
use glob::Pattern;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub const IGNORE_FILE_NAME: &str = ".kitignore";

const ALWAYS_IGNORED: [&str; 2] = [".kit", ".git"];

#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    patterns: Vec<Pattern>,
}

impl IgnoreList {
    /// Parse ignore file content on top of the built-in entries
    pub fn parse(content: &str) -> Result<Self> {
        let mut ignores = Self::default();

        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // `build/` names a directory; segments are matched by name alone
            let pattern = line.trim_end_matches('/');
            let pattern = Pattern::new(pattern).map_err(|source| {
                KitError::InvalidIgnorePattern {
                    pattern: line.to_string(),
                    source,
                }
            })?;
            ignores.patterns.push(pattern);
        }

        Ok(ignores)
    }

    /// Read an ignore file; a missing file only yields the built-in entries
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(KitError::io(path, err)),
        }
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        ALWAYS_IGNORED.contains(&name) || self.patterns.iter().any(|pattern| pattern.matches(name))
    }

    /// Whether any segment of a `/`-separated relative path is ignored
    pub fn is_path_ignored(&self, path: &str) -> bool {
        path.split('/').any(|segment| self.is_ignored(segment))
    }
}

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_ignores(&self) -> Result<IgnoreList> {
        IgnoreList::load(&self.path.join(IGNORE_FILE_NAME))
    }

    /// Every non-ignored regular file, sorted by path
    ///
    /// With a target, only files at or below it are listed; the target is
    /// taken relative to the work-tree root. A target that does not exist
    /// fails with `PathNotFound`. An ignored target lists nothing.
    pub fn list_files(&self, target: Option<&Path>, ignores: &IgnoreList) -> Result<Vec<String>> {
        let root = match target {
            Some(target) => self.resolve(target)?,
            None => self.path.to_path_buf(),
        };

        let relative_root = self.relative_path(&root)?;
        if !relative_root.is_empty() && ignores.is_path_ignored(&relative_root) {
            debug!(path = %relative_root, "target is ignored");
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0 || !ignores.is_ignored(&entry.file_name().to_string_lossy())
            });

        for entry in walker {
            let entry = entry.map_err(|err| {
                let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                match err.into_io_error() {
                    Some(source) => KitError::io(path, source),
                    None => KitError::io(path, std::io::Error::other("filesystem loop")),
                }
            })?;

            if entry.file_type().is_file() {
                files.push(self.relative_path(entry.path())?);
            }
        }

        files.sort();
        Ok(files)
    }

    fn resolve(&self, target: &Path) -> Result<PathBuf> {
        let joined = self.path.join(target);

        std::fs::canonicalize(&joined).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => KitError::PathNotFound(target.to_path_buf()),
            _ => KitError::io(joined, err),
        })
    }

    /// `/`-separated path relative to the work-tree root
    fn relative_path(&self, path: &Path) -> Result<String> {
        let relative = path
            .strip_prefix(&self.path)
            .map_err(|_| KitError::InvalidPath(path.display().to_string()))?;

        Ok(relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/"))
    }

    pub fn is_file(&self, file_path: &str) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &str) -> Result<Bytes> {
        let full_path = self.path.join(file_path);

        std::fs::read(&full_path).map(Bytes::from).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => KitError::PathNotFound(PathBuf::from(file_path)),
            _ => KitError::io(full_path, err),
        })
    }

    pub fn stat_file(&self, file_path: &str) -> Result<EntryMetadata> {
        let full_path = self.path.join(file_path);
        let metadata = std::fs::metadata(&full_path).at(&full_path)?;

        Ok((full_path.as_path(), &metadata).into())
    }
}
