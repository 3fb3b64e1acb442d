//! Per-unit reference resolution
//!
//! Decides which source entries become items, which referenced units become
//! project references, which binaries become hint-path references, which
//! analyzers apply, and the final define list.

use std::collections::{HashMap, HashSet};

use projsync_fs::NormalizedPath;

use crate::classify::UnitClassifier;
use crate::ident::IdentifierGenerator;
use crate::model::{AssetClass, AssetRecord, CompilationUnit};
use crate::provider::MetadataProvider;
use crate::response::ResponseFileDirectives;

/// Defines every generated project carries.
pub const BASE_DEFINES: [&str; 2] = ["DEBUG", "TRACE"];

/// A project item together with whether it comes from a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceItem {
    pub path: String,
    pub in_package: bool,
}

/// A reference to another generated project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectReference {
    pub name: String,
    pub id: String,
}

/// Resolved contents of one unit's project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedReferences {
    pub compile_items: Vec<SourceItem>,
    pub non_compile_items: Vec<SourceItem>,
    pub project_references: Vec<ProjectReference>,
    /// Hint-path references, as given (relative or rooted)
    pub external_references: Vec<String>,
    pub analyzers: Vec<String>,
}

/// Insertion-ordered set of strings.
#[derive(Debug, Default)]
struct OrderedSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedSet {
    fn insert(&mut self, item: impl Into<String>) {
        let item = item.into();
        if self.seen.insert(item.clone()) {
            self.items.push(item);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.items
    }
}

/// Resolves units against one pass's unit list.
pub struct ReferenceResolver<'a> {
    classifier: &'a UnitClassifier,
    identifiers: &'a dyn IdentifierGenerator,
    aggregate: &'a str,
    project_dir: &'a NormalizedPath,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(
        classifier: &'a UnitClassifier,
        identifiers: &'a dyn IdentifierGenerator,
        aggregate: &'a str,
        project_dir: &'a NormalizedPath,
    ) -> Self {
        Self {
            classifier,
            identifiers,
            aggregate,
            project_dir,
        }
    }

    /// Whether `unit` has at least one source entry that becomes an item.
    pub fn has_qualifying_sources(&self, unit: &CompilationUnit) -> bool {
        unit.source_files.iter().any(|file| {
            matches!(
                self.classifier.classify(file),
                AssetClass::Compile | AssetClass::NonCompile
            )
        })
    }

    /// Resolve everything `unit`'s project needs.
    ///
    /// `non_compile_items` are the assets already attributed to this unit
    /// (see [`collect_non_compile_assets`]).
    pub fn resolve(
        &self,
        unit: &CompilationUnit,
        all_units: &[CompilationUnit],
        directives: &ResponseFileDirectives,
        global_analyzers: &[String],
        non_compile_items: &[String],
    ) -> ResolvedReferences {
        let mut resolved = ResolvedReferences::default();
        let mut dll_sources = Vec::new();

        for file in &unit.source_files {
            match self.classifier.classify(file) {
                AssetClass::Compile | AssetClass::NonCompile => {
                    resolved.compile_items.push(self.item(file));
                }
                AssetClass::Reference => dll_sources.push(file.clone()),
                AssetClass::Manifest | AssetClass::Excluded => {}
            }
        }

        resolved.non_compile_items = non_compile_items.iter().map(|f| self.item(f)).collect();
        resolved.analyzers = self.analyzers(unit, directives, global_analyzers);

        let mut demoted = Vec::new();
        for name in &unit.references {
            let Some(referenced) = all_units.iter().find(|u| &u.name == name) else {
                tracing::warn!(unit = %unit.name, reference = %name, "referenced unit is unknown, skipping");
                continue;
            };
            if self.has_qualifying_sources(referenced) {
                resolved.project_references.push(ProjectReference {
                    name: referenced.name.clone(),
                    id: self.identifiers.unit_id(self.aggregate, &referenced.name),
                });
            } else if !referenced.output_path.is_empty() {
                tracing::debug!(unit = %unit.name, reference = %name, "demoting reference without sources to hint path");
                demoted.push(referenced.output_path.clone());
            }
        }

        let analyzers: HashSet<NormalizedPath> = resolved
            .analyzers
            .iter()
            .map(|path| self.absolute(path))
            .collect();
        let mut external = OrderedSet::default();
        let candidates = unit
            .compiled_references
            .iter()
            .cloned()
            .chain(directives.references.iter().map(|r| r.path.clone()))
            .chain(dll_sources)
            .chain(demoted);
        for candidate in candidates {
            if !analyzers.contains(&self.absolute(&candidate)) {
                external.insert(candidate);
            }
        }
        resolved.external_references = external.into_vec();

        resolved
    }

    /// `path` rooted at the project directory and lexically cleaned, the
    /// form references and analyzers are compared in.
    fn absolute(&self, path: &str) -> NormalizedPath {
        let path = NormalizedPath::new(path);
        if path.is_absolute() {
            path.clean()
        } else {
            self.project_dir.join(path.as_str()).clean()
        }
    }

    fn item(&self, path: &str) -> SourceItem {
        SourceItem {
            path: path.to_string(),
            in_package: self.classifier.package_origin(path).is_some(),
        }
    }

    fn analyzers(
        &self,
        unit: &CompilationUnit,
        directives: &ResponseFileDirectives,
        global_analyzers: &[String],
    ) -> Vec<String> {
        let mut analyzers = OrderedSet::default();
        for path in unit
            .compiler_options
            .analyzer_paths
            .iter()
            .chain(global_analyzers)
        {
            if !path.is_empty() {
                analyzers.insert(path.as_str());
            }
        }

        let from_arguments = directives
            .option_values("analyzer")
            .chain(directives.option_values("a"))
            .flat_map(|value| value.split(';'))
            .map(str::trim)
            .filter(|value| !value.is_empty());
        for value in from_arguments {
            let path = NormalizedPath::new(value);
            if path.is_absolute() {
                analyzers.insert(value);
            } else {
                analyzers.insert(self.project_dir.join(path.as_str()).as_str());
            }
        }

        analyzers.into_vec()
    }
}

/// Final define list: base defines, then unit, response-file and active
/// defines.
///
/// Empty entries are dropped and duplicates removed case-insensitively,
/// keeping the first spelling seen.
pub fn merge_defines<'a>(
    unit_defines: impl IntoIterator<Item = &'a str>,
    response_defines: impl IntoIterator<Item = &'a str>,
    active_defines: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let mut seen = HashSet::new();
    BASE_DEFINES
        .into_iter()
        .chain(unit_defines)
        .chain(response_defines)
        .chain(active_defines)
        .map(str::trim)
        .filter(|define| !define.is_empty())
        .filter(|define| seen.insert(define.to_ascii_uppercase()))
        .map(String::from)
        .collect()
}

/// Attribute eligible non-compilable assets to their owning units.
///
/// The owner is found by asking the provider which unit a script next to the
/// asset (`asset + ".cs"`) would belong to. Owner names are reduced to their
/// file stem so `Assembly-CSharp.dll` and `Assembly-CSharp` match.
pub fn collect_non_compile_assets(
    assets: &[String],
    classifier: &UnitClassifier,
    provider: &dyn MetadataProvider,
) -> HashMap<String, Vec<String>> {
    let mut by_unit: HashMap<String, Vec<String>> = HashMap::new();
    for asset in assets {
        if classifier.classify(asset) != AssetClass::NonCompile {
            continue;
        }
        let owner = provider
            .owning_unit_name(&format!("{asset}.cs"))
            .filter(|name| !name.is_empty())
            .map(|name| unit_name_from_owner(&name));
        let record: AssetRecord = classifier.record(asset, owner);
        if let Some(owner) = record.owner {
            by_unit.entry(owner).or_default().push(record.path);
        }
    }
    by_unit
}

/// Reduce an owner answer (`Lib/Assembly-CSharp.dll`) to a unit name.
///
/// Only a `.dll` extension is dropped so dotted unit names survive.
pub fn unit_name_from_owner(owner: &str) -> String {
    let path = NormalizedPath::new(owner);
    let name = path.file_name().unwrap_or(owner);
    match name.len().checked_sub(4) {
        Some(cut) if name.is_char_boundary(cut) && name[cut..].eq_ignore_ascii_case(".dll") => {
            name[..cut].to_string()
        }
        _ => name.to_string(),
    }
}
