//! Advisory repository lock
//!
//! Mutating commands (`add`, `commit`, branch creation) take an exclusive
//! `file-guard` lock on `.kit/LOCK` and hold it until the guard is dropped.
//! A second process blocks in [`RepositoryLock::acquire`] until the first one
//! releases. Tools that write the repository without taking the lock are not
//! excluded.

use crate::errors::{IoContext, Result};
use file_guard::{FileGuard, Lock};
use std::fs::File;
use std::path::Path;
use tracing::debug;

pub const LOCK_FILE_NAME: &str = "LOCK";

pub struct RepositoryLock {
    _guard: FileGuard<Box<File>>,
}

impl RepositoryLock {
    /// Block until the exclusive lock on `<kit_dir>/LOCK` is held
    pub fn acquire(kit_dir: &Path) -> Result<Self> {
        let lock_path = kit_dir.join(LOCK_FILE_NAME);
        let lock_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .at(&lock_path)?;

        let guard = file_guard::lock(Box::new(lock_file), Lock::Exclusive, 0, 1).at(&lock_path)?;
        debug!(path = %lock_path.display(), "acquired repository lock");

        Ok(Self { _guard: guard })
    }
}
