//! Reference-count files for shared locks
//!
//! The owner creates the counter at 1, workers joining a shared lock bump it and
//! the worker that brings it back to zero is the last holder. A counter at zero
//! belongs to a generation that is being torn down and can no longer be joined.
//! Read-modify-write happens under an exclusive `fs2` lock on the count file so
//! concurrent workers never lose an update.

use super::LockError;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::warn;

/// Increment the counter, creating the file at 1 when missing
pub fn increment(path: &Path) -> Result<u64, LockError> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|e| LockError::io(path, e))?;

    update(path, file, |count| Some(count + 1)).map(|count| count.unwrap_or(1))
}

/// Join a live holder group. `None` when the file is missing or already at
/// zero; the counter is left untouched then.
pub fn join(path: &Path) -> Result<Option<u64>, LockError> {
    match open_existing(path)? {
        Some(file) => update(path, file, |count| (count > 0).then_some(count + 1)),
        None => Ok(None),
    }
}

/// Decrement the counter; a missing file reads as zero
pub fn decrement(path: &Path) -> Result<u64, LockError> {
    match open_existing(path)? {
        Some(file) => update(path, file, |count| Some(count.saturating_sub(1)))
            .map(|count| count.unwrap_or(0)),
        None => Ok(0),
    }
}

/// Current counter value, `None` when the file does not exist
pub fn read(path: &Path) -> Result<Option<u64>, LockError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse(path, &content).map(Some),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(LockError::io(path, e)),
    }
}

fn open_existing(path: &Path) -> Result<Option<File>, LockError> {
    match OpenOptions::new().read(true).write(true).open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(LockError::io(path, e)),
    }
}

/// Apply `next` under the file lock; `None` from `next` leaves the file as is
fn update(
    path: &Path,
    mut file: File,
    next: impl FnOnce(u64) -> Option<u64>,
) -> Result<Option<u64>, LockError> {
    file.lock_exclusive().map_err(|e| LockError::io(path, e))?;

    let result = rewrite(path, &mut file, next);

    if let Err(e) = FileExt::unlock(&file) {
        warn!("Failed to unlock count file {:?}: {}", path, e);
    }

    result
}

fn rewrite(
    path: &Path,
    file: &mut File,
    next: impl FnOnce(u64) -> Option<u64>,
) -> Result<Option<u64>, LockError> {
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| LockError::io(path, e))?;

    let Some(count) = next(parse(path, &content)?) else {
        return Ok(None);
    };

    file.seek(SeekFrom::Start(0))
        .map_err(|e| LockError::io(path, e))?;
    file.set_len(0).map_err(|e| LockError::io(path, e))?;
    file.write_all(count.to_string().as_bytes())
        .map_err(|e| LockError::io(path, e))?;
    file.sync_all().map_err(|e| LockError::io(path, e))?;

    Ok(Some(count))
}

fn parse(path: &Path, content: &str) -> Result<u64, LockError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| LockError::CorruptCount {
        path: path.to_path_buf(),
        content: trimmed.to_string(),
    })
}
