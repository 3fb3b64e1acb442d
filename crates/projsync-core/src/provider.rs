//! The seam between the engine and whatever knows about compilation units
//!
//! A host (an editor, a build tool, a JSON snapshot on disk) implements
//! [`MetadataProvider`]; the engine never inspects the source tree itself.

use crate::model::{CompilationUnit, PackageOrigin};
use crate::response::ResponseFileDirectives;

/// Supplies compilation units, assets and their metadata to the engine.
///
/// Queries are issued many times per pass; implementations should be cheap
/// or cache internally.
pub trait MetadataProvider: Send + Sync {
    /// All compilation units known to the host, including ones without
    /// sources.
    fn all_units(&self) -> Vec<CompilationUnit>;

    /// Every asset path known to the host.
    fn all_asset_paths(&self) -> Vec<String>;

    /// Name (or output file name, e.g. `A.dll`) of the unit owning `path`.
    fn owning_unit_name(&self, path: &str) -> Option<String>;

    /// Package the path belongs to, `None` when it is plain project content.
    fn package_origin(&self, path: &str) -> Option<PackageOrigin>;

    /// Whether `path` is project content or comes from an embedded/local
    /// package.
    fn is_internalized_package_path(&self, path: &str) -> bool {
        self.package_origin(path)
            .is_none_or(PackageOrigin::is_internalized)
    }

    /// Parse a response file into directives.
    fn parse_response_file(
        &self,
        path: &str,
        base_dir: &str,
        system_dirs: &[String],
    ) -> ResponseFileDirectives;

    /// Path of the manifest (`.asmdef`) declaring the named unit, if any.
    fn manifest_path_for_unit(&self, name: &str) -> Option<String>;

    /// Analyzer assemblies that apply to every unit.
    fn roslyn_analyzer_paths(&self) -> Vec<String>;

    /// Extra non-compilable extensions (without the dot) the user opted into.
    fn supported_user_extensions(&self) -> Vec<String>;

    /// Directories probed when resolving bare response-file references.
    fn system_reference_directories(&self, unit: &CompilationUnit) -> Vec<String>;

    /// Defines active for the whole process (e.g. the current build target).
    fn active_defines(&self) -> Vec<String>;
}
