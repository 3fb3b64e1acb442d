//! [`MemoryArtifactStore`] for asserting what a sync pass wrote.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use projsync_core::{ArtifactStore, Error, Result};

#[derive(Debug, Default)]
struct State {
    files: HashMap<String, String>,
    directories: HashSet<String>,
    write_counts: HashMap<String, usize>,
    read_counts: HashMap<String, usize>,
    failing: HashSet<String>,
}

/// An artifact store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    state: Mutex<State>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Seed a file without counting it as a write.
    pub fn insert(&self, path: &str, content: &str) {
        self.state().files.insert(path.to_string(), content.to_string());
    }

    /// Current content of `path`.
    pub fn contents(&self, path: &str) -> Option<String> {
        self.state().files.get(path).cloned()
    }

    /// All stored paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.state().files.keys().cloned().collect();
        paths.sort();
        paths
    }

    pub fn delete_file(&self, path: &str) {
        self.state().files.remove(path);
    }

    /// Make every later write to `path` fail.
    pub fn fail_writes_for(&self, path: &str) {
        self.state().failing.insert(path.to_string());
    }

    /// Number of writes issued for `path`.
    pub fn write_times(&self, path: &str) -> usize {
        self.state().write_counts.get(path).copied().unwrap_or(0)
    }

    /// Number of writes issued for any path.
    pub fn total_writes(&self) -> usize {
        self.state().write_counts.values().sum()
    }

    pub fn read_times(&self, path: &str) -> usize {
        self.state().read_counts.get(path).copied().unwrap_or(0)
    }

    pub fn directory_exists(&self, path: &str) -> bool {
        self.state().directories.contains(path)
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn exists(&self, path: &str) -> bool {
        let state = self.state();
        state.files.contains_key(path) || state.directories.contains(path)
    }

    fn read(&self, path: &str) -> Result<String> {
        let mut state = self.state();
        *state.read_counts.entry(path.to_string()).or_default() += 1;
        state
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::ArtifactWrite {
                path: path.to_string(),
                reason: "no such file".into(),
            })
    }

    fn write(&self, path: &str, content: &str) -> Result<()> {
        let mut state = self.state();
        *state.write_counts.entry(path.to_string()).or_default() += 1;
        if state.failing.contains(path) {
            return Err(Error::ArtifactWrite {
                path: path.to_string(),
                reason: "write rejected".into(),
            });
        }
        state.files.insert(path.to_string(), content.to_string());
        Ok(())
    }

    fn create_directory(&self, path: &str) -> Result<()> {
        self.state().directories.insert(path.to_string());
        Ok(())
    }
}
