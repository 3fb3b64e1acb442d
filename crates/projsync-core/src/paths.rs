//! Path rendering for project artifacts
//!
//! Items are written relative to the project directory with backslash
//! separators; hint paths are written absolute with forward slashes. Both are
//! markup-escaped after normalization, never before.

use projsync_fs::NormalizedPath;

/// Renders asset and reference paths relative to one project directory.
#[derive(Debug, Clone)]
pub struct PathRenderer {
    root: NormalizedPath,
}

impl PathRenderer {
    pub fn new(root: &NormalizedPath) -> Self {
        Self {
            root: NormalizedPath::new(root.as_str().trim_end_matches('/')),
        }
    }

    /// Path of a compile or non-compile item as written into a project.
    ///
    /// `in_package` triggers a lexical re-resolution against the root, since
    /// package assets may be addressed through `..` segments.
    pub fn item_path(&self, asset: &str, in_package: bool) -> String {
        let backslashed_root = self.root.to_backslashed();
        let backslashed = asset.replace('/', "\\");
        let mut relative = skip_prefix(&backslashed, &backslashed_root).to_string();

        if in_package {
            let absolute = self.root.join(&relative).clean();
            relative = skip_prefix(&absolute.to_backslashed(), &backslashed_root).to_string();
        }

        escape_markup(&relative)
    }

    /// Absolute hint path of an external reference, escaped.
    pub fn hint_path(&self, reference: &str) -> String {
        escape_markup(self.absolute_reference(reference).as_str())
    }

    /// Display name of an external reference (file stem), escaped.
    pub fn reference_name(&self, reference: &str) -> String {
        let absolute = self.absolute_reference(reference);
        escape_markup(absolute.file_stem().unwrap_or(absolute.as_str()))
    }

    fn absolute_reference(&self, reference: &str) -> NormalizedPath {
        let path = NormalizedPath::new(reference);
        if path.is_absolute() {
            path
        } else {
            self.root.join(path.as_str())
        }
    }
}

fn skip_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    path.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('\\'))
        .unwrap_or(path)
}

/// Escape the five XML-significant characters.
///
/// Backslash is left alone so Windows-style item paths survive intact.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
