//! [`FakeProvider`] builder for engine test scenarios.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use projsync_core::{
    CompilationUnit, MetadataProvider, PackageOrigin, ResponseFileDirectives, ResponseFileParser,
};

/// An in-memory unit graph.
///
/// Owner lookups answer with `<unit>.dll`, the way editor hosts name the
/// owning assembly, so callers exercise the suffix handling.
///
/// # Example
///
/// ```rust,no_run
/// use projsync_core::CompilationUnit;
/// use projsync_test_utils::FakeProvider;
///
/// let provider = FakeProvider::new()
///     .with_unit(CompilationUnit::new("Game").with_source_files(["Assets/Player.cs"]))
///     .with_asset_files(["Assets/Player.cs", "Assets/Water.shader"])
///     .assign_directory_to_unit("Assets", "Game");
/// ```
#[derive(Debug, Default)]
pub struct FakeProvider {
    units: Vec<CompilationUnit>,
    assets: Vec<String>,
    file_owners: HashMap<String, String>,
    directory_owners: Vec<(String, String)>,
    package_roots: Vec<(String, PackageOrigin)>,
    response_data: HashMap<String, ResponseFileDirectives>,
    response_texts: HashMap<String, String>,
    existing_files: HashSet<String>,
    manifests: HashMap<String, String>,
    analyzers: Vec<String>,
    user_extensions: Vec<String>,
    active_defines: Vec<String>,
    system_dirs: Vec<String>,
    unit_queries: AtomicUsize,
}

impl FakeProvider {
    /// Create a provider with no units and no assets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the unit list.
    pub fn with_units(mut self, units: impl IntoIterator<Item = CompilationUnit>) -> Self {
        self.units = units.into_iter().collect();
        self
    }

    pub fn with_unit(mut self, unit: CompilationUnit) -> Self {
        self.units.push(unit);
        self
    }

    /// Add paths to the asset database.
    pub fn with_asset_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assets.extend(files.into_iter().map(Into::into));
        self
    }

    /// Make `unit` the owner of each of `files`.
    pub fn assign_files_to_unit<I, S>(mut self, unit: &str, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for file in files {
            self.file_owners.insert(file.into(), unit.to_string());
        }
        self
    }

    /// Make `unit` the owner of everything below `directory`.
    pub fn assign_directory_to_unit(mut self, directory: &str, unit: &str) -> Self {
        self.directory_owners
            .push((directory.trim_end_matches('/').to_string(), unit.to_string()));
        self
    }

    /// Mark `root` (a file or directory) as coming from a package.
    pub fn with_package_root(mut self, root: &str, origin: PackageOrigin) -> Self {
        self.package_roots
            .push((root.trim_end_matches('/').to_string(), origin));
        self
    }

    /// Answer `path` with ready-made directives.
    pub fn with_response_file_data(mut self, path: &str, directives: ResponseFileDirectives) -> Self {
        self.response_data.insert(path.to_string(), directives);
        self
    }

    /// Answer `path` by parsing `text`; references are probed against the
    /// files registered with [`FakeProvider::with_existing_files`].
    pub fn with_response_file_text(mut self, path: &str, text: &str) -> Self {
        self.response_texts.insert(path.to_string(), text.to_string());
        self
    }

    pub fn with_existing_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.existing_files.extend(files.into_iter().map(Into::into));
        self
    }

    pub fn with_manifest(mut self, unit: &str, path: &str) -> Self {
        self.manifests.insert(unit.to_string(), path.to_string());
        self
    }

    pub fn with_analyzers<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.analyzers = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_user_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_active_defines<I, S>(mut self, defines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.active_defines = defines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_system_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.system_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// How many times the unit list has been requested.
    pub fn unit_queries(&self) -> usize {
        self.unit_queries.load(Ordering::SeqCst)
    }
}

fn is_within(path: &str, root: &str) -> bool {
    path == root || path.strip_prefix(root).is_some_and(|rest| rest.starts_with('/'))
}

impl MetadataProvider for FakeProvider {
    fn all_units(&self) -> Vec<CompilationUnit> {
        self.unit_queries.fetch_add(1, Ordering::SeqCst);
        self.units.clone()
    }

    fn all_asset_paths(&self) -> Vec<String> {
        self.assets.clone()
    }

    fn owning_unit_name(&self, path: &str) -> Option<String> {
        let unit = self
            .file_owners
            .get(path)
            .cloned()
            .or_else(|| {
                self.units
                    .iter()
                    .find(|unit| unit.source_files.iter().any(|source| source == path))
                    .map(|unit| unit.name.clone())
            })
            .or_else(|| {
                self.directory_owners
                    .iter()
                    .filter(|(dir, _)| is_within(path, dir))
                    .max_by_key(|(dir, _)| dir.len())
                    .map(|(_, unit)| unit.clone())
            })?;
        Some(format!("{unit}.dll"))
    }

    fn package_origin(&self, path: &str) -> Option<PackageOrigin> {
        self.package_roots
            .iter()
            .filter(|(root, _)| is_within(path, root))
            .max_by_key(|(root, _)| root.len())
            .map(|(_, origin)| *origin)
    }

    fn parse_response_file(
        &self,
        path: &str,
        base_dir: &str,
        system_dirs: &[String],
    ) -> ResponseFileDirectives {
        if let Some(directives) = self.response_data.get(path) {
            return directives.clone();
        }
        match self.response_texts.get(path) {
            Some(text) => ResponseFileParser::new().parse_text(
                text,
                path,
                base_dir,
                system_dirs,
                |candidate| self.existing_files.contains(candidate),
            ),
            None => ResponseFileDirectives::default(),
        }
    }

    fn manifest_path_for_unit(&self, name: &str) -> Option<String> {
        self.manifests.get(name).cloned()
    }

    fn roslyn_analyzer_paths(&self) -> Vec<String> {
        self.analyzers.clone()
    }

    fn supported_user_extensions(&self) -> Vec<String> {
        self.user_extensions.clone()
    }

    fn system_reference_directories(&self, _unit: &CompilationUnit) -> Vec<String> {
        self.system_dirs.clone()
    }

    fn active_defines(&self) -> Vec<String> {
        self.active_defines.clone()
    }
}
