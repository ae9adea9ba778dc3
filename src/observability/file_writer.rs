//! Size-rotated append-only file for exported trace lines.
//!
//! When the active file grows past the limit it is shifted to `<path>.1`,
//! existing backups move up by one (`.1` → `.2`, ...), and anything beyond
//! the retention count is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Rotation threshold (10 MiB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Backups kept after rotation.
pub const MAX_BACKUP_FILES: usize = 3;

/// Appends lines to a file, rotating it by size.
///
/// The handle is opened lazily on the first write and shared behind a mutex,
/// so one `RotatingFile` can be written from any thread.
pub struct RotatingFile {
    /// Active file; backups sit next to it with a numeric suffix.
    path: PathBuf,
    /// Size past which the next write rotates first.
    max_bytes: u64,
    /// Number of backups kept.
    backups: usize,
    /// Append handle, opened on the first write.
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    /// Rotating file at `path` with the default limits.
    ///
    /// Nothing is opened until the first write.
    ///
    /// # Parameters
    ///
    /// * `path` - Active file (created if missing)
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    /// Rotating file with explicit limits.
    ///
    /// # Parameters
    ///
    /// * `path` - Active file (created if missing)
    /// * `max_bytes` - Size that triggers rotation before the next write
    /// * `backups` - Backups kept; `0` discards the old file on rotation
    #[must_use]
    pub const fn with_limits(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            backups,
            handle: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the `n`th backup (1 is the most recent).
    #[must_use]
    pub fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    /// Appends `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotating, opening, or writing the file.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self.handle.lock().unwrap_or_else(PoisonError::into_inner);

        let size = fs::metadata(&self.path).map_or(0, |m| m.len());
        if size > self.max_bytes {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            *handle = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        if let Some(file) = handle.as_mut() {
            writeln!(file, "{line}")?;
            file.flush()?;
        }
        Ok(())
    }

    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return fs::remove_file(&self.path);
        }

        let oldest = self.backup_path(self.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (1..self.backups).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                fs::rename(&from, self.backup_path(n + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}
