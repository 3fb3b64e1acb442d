//! SyncEngine implementation
//!
//! The SyncEngine pulls the unit graph from a [`MetadataProvider`], resolves
//! each unit, renders project and solution text and hands it to an
//! [`ArtifactStore`], writing only what changed.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, error, info};

use projsync_fs::NormalizedPath;

use crate::classify::{UnitClassifier, extension_of};
use crate::config::{ProjectStyle, SyncSettings};
use crate::exclude::excluded_paths;
use crate::ident::{DigestIdentifiers, IdentifierGenerator};
use crate::model::{CompilationUnit, RenderedArtifact};
use crate::paths::PathRenderer;
use crate::provider::MetadataProvider;
use crate::render::{ProjectInput, ProjectRenderer, RenderContext, SolutionEntry, render_solution, renderer};
use crate::resolve::{
    ReferenceResolver, collect_non_compile_assets, merge_defines, unit_name_from_owner,
};
use crate::response::ResponseFileDirectives;
use crate::store::{ArtifactStore, WriteOutcome, write_if_changed};
use crate::{Error, Result};

use super::report::SyncReport;

/// Data gathered once per pass and shared by every unit.
struct Pass {
    units: Vec<CompilationUnit>,
    /// Names of units with at least one qualifying source
    eligible: HashSet<String>,
    non_compile: HashMap<String, Vec<String>>,
    /// Manifests of eligible units, for nested-unit exclusion
    manifests: Vec<String>,
    global_analyzers: Vec<String>,
    active_defines: Vec<String>,
}

/// Engine for synchronizing project artifacts
///
/// Holds the per-pass caches (through its [`UnitClassifier`]) for its whole
/// lifetime; every pass starts by invalidating them.
pub struct SyncEngine {
    project_dir: NormalizedPath,
    aggregate: String,
    settings: SyncSettings,
    provider: Arc<dyn MetadataProvider>,
    store: Arc<dyn ArtifactStore>,
    identifiers: Arc<dyn IdentifierGenerator>,
    classifier: UnitClassifier,
    renderer: Box<dyn ProjectRenderer>,
    paths: PathRenderer,
}

impl SyncEngine {
    /// Create a new SyncEngine
    ///
    /// # Arguments
    ///
    /// * `project_dir` - Directory receiving the artifacts; its final
    ///   component names the aggregate
    /// * `settings` - Style, naming and formatting options
    /// * `provider` - Source of units and assets
    /// * `store` - Where artifacts are read from and written to
    ///
    /// # Errors
    ///
    /// Returns an error if `project_dir` has no final component.
    pub fn new(
        project_dir: NormalizedPath,
        settings: SyncSettings,
        provider: Arc<dyn MetadataProvider>,
        store: Arc<dyn ArtifactStore>,
    ) -> Result<Self> {
        let project_dir = NormalizedPath::new(project_dir.as_str().trim_end_matches('/'));
        let aggregate = project_dir
            .file_name()
            .filter(|name| !name.is_empty() && *name != "." && *name != "..")
            .ok_or_else(|| Error::InvalidProjectDirectory {
                path: project_dir.to_string(),
            })?
            .to_string();

        let classifier = UnitClassifier::new(Arc::clone(&provider), settings.generate_all);
        let renderer = renderer(settings.style);
        let paths = PathRenderer::new(&project_dir);

        Ok(Self {
            project_dir,
            aggregate,
            settings,
            provider,
            store,
            identifiers: Arc::new(DigestIdentifiers::new()),
            classifier,
            renderer,
            paths,
        })
    }

    /// Name of the aggregate (the project directory's final component).
    pub fn aggregate_name(&self) -> &str {
        &self.aggregate
    }

    /// Path of the solution artifact.
    pub fn solution_path(&self) -> String {
        self.project_dir
            .join(&format!("{}.{}", self.aggregate, self.settings.solution_extension))
            .to_string()
    }

    /// Path of a unit's project artifact.
    pub fn project_path(&self, unit: &str) -> String {
        self.project_dir
            .join(&format!("{unit}.{}", self.settings.project_extension))
            .to_string()
    }

    pub fn solution_exists(&self) -> bool {
        self.store.exists(&self.solution_path())
    }

    /// Regenerate the solution and every eligible unit's project.
    ///
    /// # Errors
    ///
    /// Storage failures are recorded per artifact in the report and do not
    /// abort the pass.
    pub fn full_sync(&self) -> Result<SyncReport> {
        let mut report = SyncReport::new();
        let pass = self.begin_pass();

        if !self.store.exists(self.project_dir.as_str())
            && let Err(e) = self.store.create_directory(self.project_dir.as_str())
        {
            error!(path = %self.project_dir, error = %e, "failed to create project directory");
            report.errors.push(format!("{}: {e}", self.project_dir));
        }

        let solution = self.render_solution_artifact(&pass);
        self.store_artifact(solution, &mut report);

        for unit in pass.units.iter().filter(|u| pass.eligible.contains(&u.name)) {
            let artifact = self.render_project_artifact(&pass, unit, &mut report);
            self.store_artifact(artifact, &mut report);
        }

        info!(
            aggregate = %self.aggregate,
            written = report.written.len(),
            unchanged = report.unchanged.len(),
            errors = report.errors.len(),
            "full sync complete"
        );
        Ok(report)
    }

    /// Regenerate what a set of changed files implicates, if anything.
    ///
    /// Returns `false` without any I/O beyond an existence check when no
    /// solution has been generated yet.
    pub fn sync_if_needed(&self, affected: &[String], reimported: &[String]) -> Result<bool> {
        Ok(self.sync_if_needed_report(affected, reimported)?.is_some())
    }

    /// Like [`SyncEngine::sync_if_needed`], returning the pass report when a
    /// pass ran.
    pub fn sync_if_needed_report(
        &self,
        affected: &[String],
        reimported: &[String],
    ) -> Result<Option<SyncReport>> {
        if !self.solution_exists() {
            debug!("no solution generated yet, skipping incremental sync");
            return Ok(None);
        }

        self.classifier.invalidate();
        let needed = affected.iter().any(|path| self.classifier.is_eligible(path))
            || reimported
                .iter()
                .any(|path| self.classifier.triggers_resync_on_reimport(path));
        if !needed {
            debug!(
                affected = affected.len(),
                reimported = reimported.len(),
                "no relevant changes"
            );
            return Ok(None);
        }

        let implicated: HashSet<String> = affected
            .iter()
            .chain(reimported)
            .filter_map(|path| self.provider.owning_unit_name(path))
            .map(|owner| unit_name_from_owner(&owner))
            .collect();

        let mut report = SyncReport::new();
        let pass = self.begin_pass();

        let solution = self.render_solution_artifact(&pass);
        self.store_artifact(solution, &mut report);

        for unit in pass
            .units
            .iter()
            .filter(|u| pass.eligible.contains(&u.name) && implicated.contains(&u.name))
        {
            let artifact = self.render_project_artifact(&pass, unit, &mut report);
            self.store_artifact(artifact, &mut report);
        }

        info!(
            aggregate = %self.aggregate,
            implicated = implicated.len(),
            written = report.written.len(),
            errors = report.errors.len(),
            "incremental sync complete"
        );
        Ok(Some(report))
    }

    /// Render every artifact a full sync would write, without writing.
    pub fn render_all(&self) -> Vec<RenderedArtifact> {
        let mut report = SyncReport::new();
        let pass = self.begin_pass();
        let mut artifacts = vec![self.render_solution_artifact(&pass)];
        for unit in pass.units.iter().filter(|u| pass.eligible.contains(&u.name)) {
            artifacts.push(self.render_project_artifact(&pass, unit, &mut report));
        }
        artifacts
    }

    fn resolver(&self) -> ReferenceResolver<'_> {
        ReferenceResolver::new(
            &self.classifier,
            self.identifiers.as_ref(),
            &self.aggregate,
            &self.project_dir,
        )
    }

    fn begin_pass(&self) -> Pass {
        self.classifier.invalidate();

        let units = self.provider.all_units();
        let assets = self.provider.all_asset_paths();
        let resolver = self.resolver();

        let eligible: HashSet<String> = units
            .iter()
            .filter(|unit| resolver.has_qualifying_sources(unit))
            .map(|unit| unit.name.clone())
            .collect();
        let manifests = units
            .iter()
            .filter(|unit| eligible.contains(&unit.name))
            .filter_map(|unit| self.provider.manifest_path_for_unit(&unit.name))
            .collect();
        let non_compile =
            collect_non_compile_assets(&assets, &self.classifier, self.provider.as_ref());

        debug!(
            units = units.len(),
            eligible = eligible.len(),
            assets = assets.len(),
            "pass prepared"
        );

        Pass {
            units,
            eligible,
            non_compile,
            manifests,
            global_analyzers: self.provider.roslyn_analyzer_paths(),
            active_defines: self.provider.active_defines(),
        }
    }

    fn render_solution_artifact(&self, pass: &Pass) -> RenderedArtifact {
        let entries: Vec<SolutionEntry> = pass
            .units
            .iter()
            .filter(|unit| pass.eligible.contains(&unit.name))
            .filter_map(|unit| {
                let extension = extension_of(unit.source_files.first()?);
                (extension == "cs").then(|| SolutionEntry {
                    name: unit.name.clone(),
                    project_file: format!("{}.{}", unit.name, self.settings.project_extension),
                    type_id: self.identifiers.aggregate_id(&self.aggregate, &extension),
                    unit_id: self.identifiers.unit_id(&self.aggregate, &unit.name),
                })
            })
            .collect();

        RenderedArtifact {
            path: self.solution_path(),
            text: render_solution(&entries, self.settings.newline()),
        }
    }

    fn render_project_artifact(
        &self,
        pass: &Pass,
        unit: &CompilationUnit,
        report: &mut SyncReport,
    ) -> RenderedArtifact {
        let directives = self.response_directives(unit, report);

        let non_compile = pass
            .non_compile
            .get(&unit.name)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let resolved = self.resolver().resolve(
            unit,
            &pass.units,
            &directives,
            &pass.global_analyzers,
            non_compile,
        );

        let defines = merge_defines(
            unit.defines.iter().map(String::as_str),
            directives.defines.iter().map(String::as_str),
            pass.active_defines.iter().map(String::as_str),
        );
        let unit_id = self.identifiers.unit_id(&self.aggregate, &unit.name);
        let manifest_path = self.provider.manifest_path_for_unit(&unit.name);
        let excluded_dirs = match self.settings.style {
            ProjectStyle::Sdk => excluded_paths(manifest_path.as_deref(), &pass.manifests),
            ProjectStyle::Legacy => Vec::new(),
        };

        let input = ProjectInput {
            unit_name: &unit.name,
            unit_id: &unit_id,
            defines: &defines,
            allow_unsafe: unit.compiler_options.allow_unsafe || directives.unsafe_code,
            ruleset_path: unit.compiler_options.ruleset_path.as_deref(),
            resolved: &resolved,
            manifest_path: manifest_path.as_deref(),
            excluded_dirs: &excluded_dirs,
        };
        let ctx = RenderContext {
            settings: &self.settings,
            paths: &self.paths,
        };

        RenderedArtifact {
            path: self.project_path(&unit.name),
            text: self.renderer.render(&ctx, &input),
        }
    }

    /// Parse and merge a unit's response files, reporting parse errors.
    fn response_directives(
        &self,
        unit: &CompilationUnit,
        report: &mut SyncReport,
    ) -> ResponseFileDirectives {
        if unit.compiler_options.response_files.is_empty() {
            return ResponseFileDirectives::default();
        }

        let system_dirs = self.provider.system_reference_directories(unit);
        let parsed: Vec<(String, ResponseFileDirectives)> = unit
            .compiler_options
            .response_files
            .iter()
            .map(|file| {
                let directives = self.provider.parse_response_file(
                    file,
                    self.project_dir.as_str(),
                    &system_dirs,
                );
                (file.clone(), directives)
            })
            .collect();

        for (file, directives) in &parsed {
            for e in &directives.errors {
                error!(unit = %unit.name, file = %file, error = %e, "response file parse error");
                report.diagnostics.push(format!("{file} Parse Error : {e}"));
            }
        }

        ResponseFileDirectives::merge(parsed.iter().map(|(_, directives)| directives))
    }

    fn store_artifact(&self, artifact: RenderedArtifact, report: &mut SyncReport) {
        match write_if_changed(self.store.as_ref(), &artifact.path, &artifact.text) {
            Ok(WriteOutcome::Written) => report.written.push(artifact.path),
            Ok(WriteOutcome::Unchanged) => report.unchanged.push(artifact.path),
            Err(e) => {
                error!(path = %artifact.path, error = %e, "failed to write artifact");
                report.errors.push(format!("{}: {e}", artifact.path));
            }
        }
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("project_dir", &self.project_dir)
            .field("aggregate", &self.aggregate)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
