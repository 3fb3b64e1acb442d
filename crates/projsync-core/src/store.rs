//! Artifact storage
//!
//! The engine never touches the filesystem directly; it goes through an
//! [`ArtifactStore`] so tests can count reads and writes in memory.

use projsync_fs::NormalizedPath;

use crate::Result;

/// Existence, read and write access to artifact files.
pub trait ArtifactStore: Send + Sync {
    fn exists(&self, path: &str) -> bool;

    fn read(&self, path: &str) -> Result<String>;

    fn write(&self, path: &str, content: &str) -> Result<()>;

    fn create_directory(&self, path: &str) -> Result<()>;
}

/// What [`write_if_changed`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// Write `content` to `path` unless the stored content is already identical.
///
/// A file that exists but cannot be read is rewritten.
pub fn write_if_changed(store: &dyn ArtifactStore, path: &str, content: &str) -> Result<WriteOutcome> {
    if store.exists(path) {
        match store.read(path) {
            Ok(current) if current == content => {
                tracing::debug!(path, "artifact unchanged, skipping write");
                return Ok(WriteOutcome::Unchanged);
            }
            Ok(_) => {}
            Err(e) => tracing::debug!(path, error = %e, "existing artifact unreadable, rewriting"),
        }
    }

    store.write(path, content)?;
    tracing::debug!(path, bytes = content.len(), "artifact written");
    Ok(WriteOutcome::Written)
}

/// Filesystem-backed store using locked atomic writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsArtifactStore;

impl FsArtifactStore {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactStore for FsArtifactStore {
    fn exists(&self, path: &str) -> bool {
        NormalizedPath::new(path).to_native().exists()
    }

    fn read(&self, path: &str) -> Result<String> {
        Ok(projsync_fs::io::read_text(&NormalizedPath::new(path))?)
    }

    fn write(&self, path: &str, content: &str) -> Result<()> {
        Ok(projsync_fs::io::write_text(&NormalizedPath::new(path), content)?)
    }

    fn create_directory(&self, path: &str) -> Result<()> {
        Ok(projsync_fs::io::create_dir_all(&NormalizedPath::new(path))?)
    }
}
