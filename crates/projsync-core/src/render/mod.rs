//! Project and solution renderers
//!
//! This module provides the text generators for sync artifacts:
//!
//! - **LegacyRenderer**: itemized project listing every file
//! - **SdkRenderer**: SDK-style project using a scoped glob plus removals
//! - **solution**: the aggregate solution listing all projects
//!
//! Renderers are pure: the same input always produces the same text.

mod legacy;
mod sdk;
pub mod solution;

pub use legacy::LegacyRenderer;
pub use sdk::SdkRenderer;
pub use solution::{SolutionEntry, render_solution};

use crate::config::{ProjectStyle, SyncSettings};
use crate::paths::PathRenderer;
use crate::resolve::ResolvedReferences;

/// Everything a renderer needs to produce one unit's project text.
#[derive(Debug, Clone)]
pub struct ProjectInput<'a> {
    pub unit_name: &'a str,
    pub unit_id: &'a str,
    /// Merged define list, base defines first
    pub defines: &'a [String],
    pub allow_unsafe: bool,
    pub ruleset_path: Option<&'a str>,
    pub resolved: &'a ResolvedReferences,
    /// Manifest declaring the unit; `None` for the implicit root unit
    pub manifest_path: Option<&'a str>,
    /// Directories of nested units to cut out of the glob (SDK style only)
    pub excluded_dirs: &'a [String],
}

/// Shared rendering context for one pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub settings: &'a SyncSettings,
    pub paths: &'a PathRenderer,
}

impl RenderContext<'_> {
    pub fn newline(&self) -> &'static str {
        self.settings.newline()
    }

    /// File name of a unit's project (`A.csproj`).
    pub fn project_file_name(&self, unit: &str) -> String {
        format!("{unit}.{}", self.settings.project_extension)
    }
}

/// A strategy that renders a project artifact for one unit.
pub trait ProjectRenderer: Send + Sync {
    fn render(&self, ctx: &RenderContext<'_>, input: &ProjectInput<'_>) -> String;
}

/// Renderer for the configured project style.
pub fn renderer(style: ProjectStyle) -> Box<dyn ProjectRenderer> {
    match style {
        ProjectStyle::Legacy => Box::new(LegacyRenderer),
        ProjectStyle::Sdk => Box::new(SdkRenderer),
    }
}

/// Line-oriented text builder that terminates lines with a fixed newline.
#[derive(Debug)]
pub(crate) struct TextBuilder {
    text: String,
    newline: &'static str,
}

impl TextBuilder {
    pub(crate) fn new(newline: &'static str) -> Self {
        Self {
            text: String::new(),
            newline,
        }
    }

    pub(crate) fn line(&mut self, line: impl AsRef<str>) -> &mut Self {
        self.text.push_str(line.as_ref());
        self.text.push_str(self.newline);
        self
    }

    pub(crate) fn finish(self) -> String {
        self.text
    }
}

/// Boolean as written in project properties.
pub(crate) fn msbuild_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}
