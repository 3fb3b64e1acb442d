//! Sync settings
//!
//! Settings are read from TOML, JSON or YAML through
//! [`projsync_fs::ConfigStore`]; every field has a default so an empty file
//! (or none at all) yields a working configuration.

use serde::{Deserialize, Serialize};

use projsync_fs::{ConfigStore, NormalizedPath};

use crate::{Error, Result};

/// Which project layout to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStyle {
    /// Itemized projects listing every file
    #[default]
    Legacy,
    /// SDK-style projects using globs with nested-unit removals
    Sdk,
}

impl ProjectStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStyle::Legacy => "legacy",
            ProjectStyle::Sdk => "sdk",
        }
    }
}

/// Line terminator used in generated artifacts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\r\n` on Windows, `\n` elsewhere
    #[default]
    Host,
    Crlf,
    Lf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Crlf => "\r\n",
            LineEnding::Lf => "\n",
            LineEnding::Host => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
        }
    }
}

/// Settings controlling a sync pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    pub style: ProjectStyle,
    /// Include assets from non-internalized packages too
    pub generate_all: bool,
    pub root_namespace: String,
    pub lang_version: String,
    pub target_framework_version: String,
    pub line_ending: LineEnding,
    pub project_extension: String,
    pub solution_extension: String,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            style: ProjectStyle::Legacy,
            generate_all: false,
            root_namespace: String::new(),
            lang_version: "latest".to_string(),
            target_framework_version: "v4.7.1".to_string(),
            line_ending: LineEnding::Host,
            project_extension: "csproj".to_string(),
            solution_extension: "sln".to_string(),
        }
    }
}

impl SyncSettings {
    /// Load settings from `path`, format chosen by extension.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        if !path.to_native().is_file() {
            return Err(Error::ConfigNotFound {
                path: path.to_native(),
            });
        }
        Ok(ConfigStore::new().load(path)?)
    }

    /// Load settings from `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&NormalizedPath>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn newline(&self) -> &'static str {
        self.line_ending.as_str()
    }

    /// SDK target framework moniker derived from the framework version
    /// (`v4.7.1` becomes `net471`).
    pub fn target_framework_moniker(&self) -> String {
        let digits: String = self
            .target_framework_version
            .trim_start_matches(['v', 'V'])
            .chars()
            .filter(|c| *c != '.')
            .collect();
        format!("net{digits}")
    }
}
