//! File handle with scoped advisory locking.
//!
//! Locks are acquired through guards that release them on drop, so every
//! exit path out of a parse or write unlocks the file.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::Error;

/// A readable `.env` file whose cursor only moves forward unless
/// explicitly rewound.
#[derive(Debug)]
pub struct EnvFile {
    path: PathBuf,
    file: File,
}

/// Holds an advisory lock until dropped.
#[derive(Debug)]
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct LockGuard<'a> {
    file: &'a File,
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.file.unlock() {
            tracing::warn!(%err, "failed to release file lock");
        }
    }
}

impl EnvFile {
    /// Open `path` for reading.
    ///
    /// Fails eagerly when the path is missing, is not a regular file,
    /// or cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(Error::NotAFile(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire a shared (read) lock.
    pub fn lock_shared(&self) -> Result<LockGuard<'_>, Error> {
        self.file.lock_shared()?;
        Ok(LockGuard { file: &self.file })
    }

    /// Read everything from the current position to end of stream.
    pub fn read_remaining(&self) -> Result<String, Error> {
        let mut contents = String::new();
        (&self.file).read_to_string(&mut contents)?;
        Ok(contents)
    }

    /// Move the cursor back to the start of the file.
    pub fn rewind(&self) -> Result<(), Error> {
        (&self.file).seek(SeekFrom::Start(0))?;
        Ok(())
    }

    /// Replace the file contents under an exclusive lock.
    ///
    /// Returns the number of bytes written.
    pub fn overwrite(&self, contents: &str) -> Result<usize, Error> {
        let file = OpenOptions::new().write(true).open(&self.path)?;
        file.lock()?;
        let _guard = LockGuard { file: &file };
        file.set_len(0)?;
        (&file).write_all(contents.as_bytes())?;
        (&file).flush()?;
        Ok(contents.len())
    }
}
