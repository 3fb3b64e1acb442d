//! A [`MetadataProvider`] backed by a JSON snapshot document
//!
//! Hosts that cannot link against projsync can dump their unit graph to a
//! snapshot file and run the CLI against it:
//!
//! ```json
//! {
//!   "units": [{ "name": "Game", "output_path": "Library/Game.dll",
//!               "source_files": ["Assets/Game/Player.cs"] }],
//!   "assets": ["Assets/Game/Player.cs", "Assets/Game/Water.shader"],
//!   "packages": [{ "root": "Packages/com.vendor.tools", "origin": "registry" }],
//!   "manifests": { "Game": "Assets/Game/Game.asmdef" },
//!   "owners": [{ "directory": "Assets/Game", "unit": "Game" }],
//!   "default_unit": "Assembly-CSharp"
//! }
//! ```
//!
//! Response files are read from disk with the regular parser.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use projsync_fs::NormalizedPath;

use crate::model::{CompilationUnit, PackageOrigin};
use crate::provider::MetadataProvider;
use crate::response::{ResponseFileDirectives, ResponseFileParser};
use crate::{Error, Result};

/// A package root and where the package comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRoot {
    pub root: String,
    pub origin: PackageOrigin,
}

/// Assigns every asset below `directory` to `unit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerDirectory {
    pub directory: String,
    pub unit: String,
}

/// Serialized form of a host's unit graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub units: Vec<CompilationUnit>,
    pub assets: Vec<String>,
    pub packages: Vec<PackageRoot>,
    /// Unit name to manifest path
    pub manifests: HashMap<String, String>,
    pub owners: Vec<OwnerDirectory>,
    /// Owner of assets matched by nothing else
    pub default_unit: Option<String>,
    pub analyzers: Vec<String>,
    pub user_extensions: Vec<String>,
    pub active_defines: Vec<String>,
    pub system_reference_directories: Vec<String>,
}

/// Provider reading a [`Snapshot`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotProvider {
    snapshot: Snapshot,
    parser: ResponseFileParser,
}

impl SnapshotProvider {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            parser: ResponseFileParser::new(),
        }
    }

    /// Load a snapshot from a JSON file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let text = projsync_fs::io::read_text(path)?;
        let snapshot: Snapshot =
            serde_json::from_str(&text).map_err(|e| Error::InvalidSnapshot {
                path: path.to_native(),
                message: e.to_string(),
            })?;
        tracing::debug!(
            path = %path,
            units = snapshot.units.len(),
            assets = snapshot.assets.len(),
            "snapshot loaded"
        );
        Ok(Self::new(snapshot))
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

/// Longest entry whose directory contains `path`, compared case-insensitively.
fn longest_match<'a, T>(
    path: &str,
    entries: &'a [T],
    dir_of: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    let path = NormalizedPath::new(path);
    entries
        .iter()
        .filter(|entry| {
            let dir = NormalizedPath::new(format!("{}/", dir_of(entry).trim_end_matches(['/', '\\'])));
            path.starts_with_ignore_case(&dir)
        })
        .max_by_key(|entry| dir_of(entry).len())
}

impl MetadataProvider for SnapshotProvider {
    fn all_units(&self) -> Vec<CompilationUnit> {
        self.snapshot.units.clone()
    }

    fn all_asset_paths(&self) -> Vec<String> {
        self.snapshot.assets.clone()
    }

    fn owning_unit_name(&self, path: &str) -> Option<String> {
        let normalized = NormalizedPath::new(path);
        let declared = self.snapshot.units.iter().find(|unit| {
            unit.source_files
                .iter()
                .any(|source| NormalizedPath::new(source) == normalized)
        });
        if let Some(unit) = declared {
            return Some(unit.name.clone());
        }

        if let Some(owner) = longest_match(path, &self.snapshot.owners, |o| o.directory.as_str()) {
            return Some(owner.unit.clone());
        }

        self.snapshot.default_unit.clone()
    }

    fn package_origin(&self, path: &str) -> Option<PackageOrigin> {
        longest_match(path, &self.snapshot.packages, |p| p.root.as_str()).map(|p| p.origin)
    }

    fn parse_response_file(
        &self,
        path: &str,
        base_dir: &str,
        system_dirs: &[String],
    ) -> ResponseFileDirectives {
        self.parser.parse_file(path, base_dir, system_dirs)
    }

    fn manifest_path_for_unit(&self, name: &str) -> Option<String> {
        self.snapshot.manifests.get(name).cloned()
    }

    fn roslyn_analyzer_paths(&self) -> Vec<String> {
        self.snapshot.analyzers.clone()
    }

    fn supported_user_extensions(&self) -> Vec<String> {
        self.snapshot.user_extensions.clone()
    }

    fn system_reference_directories(&self, _unit: &CompilationUnit) -> Vec<String> {
        self.snapshot.system_reference_directories.clone()
    }

    fn active_defines(&self) -> Vec<String> {
        self.snapshot.active_defines.clone()
    }
}
