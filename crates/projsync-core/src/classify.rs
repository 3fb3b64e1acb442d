//! Asset eligibility and classification
//!
//! The classifier answers, for any asset path, whether it belongs in a
//! generated project and in what role. Answers are cached per pass because
//! package lookups on the provider can be expensive.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::model::{AssetClass, AssetRecord, PackageOrigin};
use crate::provider::MetadataProvider;

/// Whether a known extension produces compilable source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptingLanguage {
    CSharp,
    None,
}

/// Built-in extension table.
const BUILTIN_EXTENSIONS: &[(&str, ScriptingLanguage)] = &[
    ("cs", ScriptingLanguage::CSharp),
    ("uxml", ScriptingLanguage::None),
    ("uss", ScriptingLanguage::None),
    ("shader", ScriptingLanguage::None),
    ("compute", ScriptingLanguage::None),
    ("cginc", ScriptingLanguage::None),
    ("hlsl", ScriptingLanguage::None),
    ("glslinc", ScriptingLanguage::None),
    ("template", ScriptingLanguage::None),
    ("raytrace", ScriptingLanguage::None),
];

/// Extensions whose reimport invalidates the unit graph.
const RESYNC_ON_REIMPORT: &[&str] = &["dll", "asmdef"];

/// Language of a built-in extension (no leading dot, any case).
pub fn scripting_language(extension: &str) -> ScriptingLanguage {
    let extension = extension.trim_start_matches('.').to_ascii_lowercase();
    BUILTIN_EXTENSIONS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, language)| *language)
        .unwrap_or(ScriptingLanguage::None)
}

/// Lowercased extension of `path` without the dot, or empty.
pub fn extension_of(path: &str) -> String {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx + 1..].to_ascii_lowercase(),
        _ => String::new(),
    }
}

/// Classifies asset paths with per-pass caching.
pub struct UnitClassifier {
    provider: Arc<dyn MetadataProvider>,
    generate_all: bool,
    user_extensions: Mutex<Vec<String>>,
    eligibility: Mutex<HashMap<String, bool>>,
    package_origins: Mutex<HashMap<String, Option<PackageOrigin>>>,
}

impl UnitClassifier {
    pub fn new(provider: Arc<dyn MetadataProvider>, generate_all: bool) -> Self {
        let user_extensions = normalize_extensions(provider.supported_user_extensions());
        Self {
            provider,
            generate_all,
            user_extensions: Mutex::new(user_extensions),
            eligibility: Mutex::new(HashMap::new()),
            package_origins: Mutex::new(HashMap::new()),
        }
    }

    /// Drop all cached answers and re-read the user extension allowlist.
    pub fn invalidate(&self) {
        lock(&self.eligibility).clear();
        lock(&self.package_origins).clear();
        *lock(&self.user_extensions) =
            normalize_extensions(self.provider.supported_user_extensions());
    }

    /// Package origin of `path`, cached for the pass.
    pub fn package_origin(&self, path: &str) -> Option<PackageOrigin> {
        if let Some(origin) = lock(&self.package_origins).get(path) {
            return *origin;
        }
        let origin = self.provider.package_origin(path);
        lock(&self.package_origins).insert(path.to_string(), origin);
        origin
    }

    /// Project content, or content of an embedded/local package.
    fn is_internalized(&self, path: &str) -> bool {
        self.provider.is_internalized_package_path(path)
    }

    /// Whether `path` may appear in a generated project at all.
    pub fn is_eligible(&self, path: &str) -> bool {
        if path.trim().is_empty() {
            return false;
        }
        if let Some(eligible) = lock(&self.eligibility).get(path) {
            return *eligible;
        }

        let eligible =
            (self.generate_all || self.is_internalized(path)) && self.has_valid_extension(path);
        lock(&self.eligibility).insert(path.to_string(), eligible);
        eligible
    }

    /// Whether a reimport of `path` requires regenerating projects.
    pub fn triggers_resync_on_reimport(&self, path: &str) -> bool {
        RESYNC_ON_REIMPORT.contains(&extension_of(path).as_str())
    }

    /// Role of `path` in a generated project.
    pub fn classify(&self, path: &str) -> AssetClass {
        if !self.is_eligible(path) {
            return AssetClass::Excluded;
        }
        match extension_of(path).as_str() {
            "dll" => AssetClass::Reference,
            "asmdef" => AssetClass::Manifest,
            ext if scripting_language(ext) == ScriptingLanguage::CSharp => AssetClass::Compile,
            _ => AssetClass::NonCompile,
        }
    }

    /// Classify `path` and attach its owning unit name.
    pub fn record(&self, path: &str, owner: Option<String>) -> AssetRecord {
        AssetRecord {
            path: path.to_string(),
            class: self.classify(path),
            owner,
        }
    }

    fn has_valid_extension(&self, path: &str) -> bool {
        let extension = extension_of(path);
        if RESYNC_ON_REIMPORT.contains(&extension.as_str()) {
            return true;
        }
        if BUILTIN_EXTENSIONS.iter().any(|(ext, _)| *ext == extension) {
            return true;
        }
        !extension.is_empty() && lock(&self.user_extensions).contains(&extension)
    }
}

impl std::fmt::Debug for UnitClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitClassifier")
            .field("generate_all", &self.generate_all)
            .finish_non_exhaustive()
    }
}

fn normalize_extensions(extensions: Vec<String>) -> Vec<String> {
    extensions
        .into_iter()
        .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

// A poisoned cache only holds memoized answers; recover the data.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
