//! Atomic I/O operations with file locking

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use fs2::FileExt;
use tempfile::Builder;

use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file with locking.
///
/// Writers of the same destination are serialized on a sidecar lock file
/// (`.<name>.lock`) held across the temp-file write and the rename. Each
/// call gets its own temp file, so a reader never observes a partially
/// written artifact and two writers never interleave.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();
    let file_name = native_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let parent = match native_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    fs::create_dir_all(&parent).map_err(|e| Error::io(&parent, e))?;

    // Never truncated, so the lock survives every writer
    let lock_path = parent.join(format!(".{file_name}.lock"));
    let lock_file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|e| Error::io(&lock_path, e))?;
    lock_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    let result = replace_locked(&parent, &file_name, &native_path, content);

    lock_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;
    result?;

    tracing::trace!(path = %path, bytes = content.len(), "atomic write complete");
    Ok(())
}

fn replace_locked(parent: &Path, file_name: &str, target: &Path, content: &[u8]) -> Result<()> {
    // Same directory keeps the rename on one filesystem
    let mut temp = Builder::new()
        .prefix(&format!(".{file_name}."))
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| Error::io(parent, e))?;

    temp.write_all(content)
        .map_err(|e| Error::io(temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| Error::io(temp.path(), e))?;

    temp.persist(target)
        .map_err(|e| Error::io(target, e.error))?;
    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Create a directory and all missing parents.
pub fn create_dir_all(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    fs::create_dir_all(&native_path).map_err(|e| Error::io(&native_path, e))
}
