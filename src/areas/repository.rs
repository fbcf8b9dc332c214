use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::lock::RepositoryLock;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::errors::KitError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Name of the metadata directory inside the work tree
pub const KIT_DIR_NAME: &str = ".kit";

/// A work tree together with its `.kit` metadata directory
///
/// Every operation goes through a `Repository`, which carries the work-tree
/// root explicitly; nothing below it looks at the process working directory.
/// Command output is written to `writer`.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open the repository rooted at `path` without requiring `.kit` to exist
    ///
    /// Only `init` should use this directly; everything else goes through
    /// [`Repository::open`].
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("failed to create work tree at {}", path.display()))?;
        }

        let path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve work tree {}", path.display()))?;
        let kit_path = path.join(KIT_DIR_NAME);

        Ok(Repository {
            index: RefCell::new(Index::new(kit_path.join("index").into_boxed_path())),
            database: Database::new(kit_path.join("objects").into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            refs: Refs::new(kit_path.into_boxed_path()),
            writer: RefCell::new(writer),
            path: path.into_boxed_path(),
        })
    }

    /// Open an initialised repository; fails with `NotARepository` otherwise
    pub fn open(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !path.join(KIT_DIR_NAME).is_dir() {
            return Err(KitError::NotARepository(path.to_path_buf()).into());
        }

        Self::new(path, writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kit_path(&self) -> Box<Path> {
        self.path.join(KIT_DIR_NAME).into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Take the advisory lock that serialises mutating commands
    pub fn lock(&self) -> anyhow::Result<RepositoryLock> {
        RepositoryLock::acquire(&self.kit_path()).context("failed to lock repository")
    }
}
