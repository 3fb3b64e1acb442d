//! Compilation unit model supplied by a [`MetadataProvider`](crate::MetadataProvider)

use serde::{Deserialize, Serialize};

/// Compiler options attached to a compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    pub allow_unsafe: bool,
    /// Response files (`.rsp`) consulted for extra directives, in order
    pub response_files: Vec<String>,
    pub analyzer_paths: Vec<String>,
    pub ruleset_path: Option<String>,
}

/// A single compilation unit as known for the duration of one sync pass.
///
/// Referenced units are held by name and resolved against the unit list of
/// the same pass, so a unit never owns another unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilationUnit {
    /// Unique within a pass; doubles as the project file stem
    pub name: String,
    /// Path of the compiled output artifact (e.g. `Library/ScriptAssemblies/A.dll`)
    pub output_path: String,
    /// Source entries in declaration order
    pub source_files: Vec<String>,
    pub defines: Vec<String>,
    /// Names of other units this unit references
    pub references: Vec<String>,
    /// Precompiled assemblies referenced by path
    pub compiled_references: Vec<String>,
    pub compiler_options: CompilerOptions,
}

impl CompilationUnit {
    /// Create an empty unit with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_output_path(mut self, path: impl Into<String>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_source_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_defines<I, S>(mut self, defines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defines = defines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_references<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_compiled_references<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compiled_references = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_response_files<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compiler_options.response_files = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_analyzers<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compiler_options.analyzer_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ruleset(mut self, path: impl Into<String>) -> Self {
        self.compiler_options.ruleset_path = Some(path.into());
        self
    }

    pub fn with_unsafe(mut self, allow: bool) -> Self {
        self.compiler_options.allow_unsafe = allow;
        self
    }
}

/// Where a package-provided asset comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageOrigin {
    /// Package lives inside the project tree
    Embedded,
    /// Package referenced from a local folder
    Local,
    Registry,
    Git,
    BuiltIn,
    LocalTarball,
}

impl PackageOrigin {
    /// Embedded and local packages are edited like project code.
    pub fn is_internalized(self) -> bool {
        matches!(self, PackageOrigin::Embedded | PackageOrigin::Local)
    }
}

/// Classification of an asset path for project generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetClass {
    /// Compilable source (`<Compile>`)
    Compile,
    /// Eligible non-compilable asset (`<None>`)
    NonCompile,
    /// Precompiled binary (`.dll`)
    Reference,
    /// Unit manifest (`.asmdef`)
    Manifest,
    /// Not part of any generated project
    Excluded,
}

/// A file path together with its classification and owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    pub path: String,
    pub class: AssetClass,
    pub owner: Option<String>,
}

/// A rendered artifact waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub path: String,
    pub text: String,
}
