//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Source trees handed to projsync mix separators freely (`Assets\Foo/Bar.cs`
/// is common), so every path is normalized to forward slashes on entry and
/// only converted to a platform-native or artifact-specific form at the
/// boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes. No other rewriting happens;
    /// use [`NormalizedPath::clean`] for lexical `.`/`..` resolution.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: path_str.replace('\\', "/"),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Render with backslash separators.
    pub fn to_backslashed(&self) -> String {
        self.inner.replace('/', "\\")
    }

    /// Join this path with a segment.
    ///
    /// An absolute segment replaces the base entirely.
    pub fn join(&self, segment: &str) -> Self {
        let segment = Self::new(segment);
        if segment.is_absolute() || self.inner.is_empty() {
            return segment;
        }
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment.inner)
        } else {
            format!("{}/{}", self.inner, segment.inner)
        };
        Self { inner: joined }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the file name without its final extension.
    pub fn file_stem(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(idx) if idx > 0 => Some(&name[..idx]),
            _ => Some(name),
        }
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Whether the path is rooted (`/x`, `//server/x` or `C:/x`).
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/') || drive_prefix_len(&self.inner) > 0
    }

    /// Lexically resolve `.` and `..` segments and collapse repeated
    /// separators.
    ///
    /// `..` never climbs above the root of an absolute path; leading `..`
    /// segments of a relative path are preserved.
    pub fn clean(&self) -> Self {
        let (root, rest) = split_root(&self.inner);
        let mut parts: Vec<&str> = Vec::new();
        for part in rest.split('/') {
            match part {
                "" | "." => {}
                ".." => match parts.last() {
                    Some(&last) if last != ".." => {
                        parts.pop();
                    }
                    _ if root.is_empty() => parts.push(".."),
                    _ => {}
                },
                other => parts.push(other),
            }
        }
        let body = parts.join("/");
        let inner = if root.is_empty() && body.is_empty() {
            ".".to_string()
        } else {
            format!("{root}{body}")
        };
        Self { inner }
    }

    /// Return the remainder after `prefix/`, comparing case-sensitively.
    pub fn strip_prefix(&self, prefix: &NormalizedPath) -> Option<&str> {
        let prefix = prefix.inner.trim_end_matches('/');
        let rest = self.inner.strip_prefix(prefix)?;
        rest.strip_prefix('/')
    }

    /// Case-insensitive prefix test on the normalized text.
    pub fn starts_with_ignore_case(&self, prefix: &NormalizedPath) -> bool {
        let own = self.inner.as_bytes();
        let other = prefix.inner.as_bytes();
        own.len() >= other.len() && own[..other.len()].eq_ignore_ascii_case(other)
    }
}

fn drive_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        if bytes.len() >= 3 && bytes[2] == b'/' {
            3
        } else {
            2
        }
    } else {
        0
    }
}

fn split_root(s: &str) -> (&str, &str) {
    let drive = drive_prefix_len(s);
    if drive > 0 {
        return s.split_at(drive);
    }
    if s.starts_with("//") && !s.starts_with("///") {
        return s.split_at(2);
    }
    if s.starts_with('/') {
        return s.split_at(1);
    }
    ("", s)
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
