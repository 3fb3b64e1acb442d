//! Compiler response file (`.rsp`) parsing
//!
//! Response files carry extra compiler switches for a unit. Only the
//! switches that change project generation are interpreted (`/define`,
//! `/reference`, `/unsafe`); everything else is kept verbatim so callers can
//! pick out what they need, such as `/analyzer`.
//!
//! The tokenizer follows the Mono compiler's rules: one or more arguments per
//! line, separated by spaces, with `'` or `"` quoting a span that may contain
//! spaces. A leading `-` is treated as `/`.

use std::fmt;

use projsync_fs::NormalizedPath;

/// Separators accepted inside list-valued switches.
const LIST_SEPARATORS: &[char] = &[';', ','];

/// A parse problem in a single response file directive.
///
/// These never abort a sync pass; they are reported and the directive is
/// skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    #[error("No value set for define ({directive})")]
    NoDefineValue { directive: String },

    #[error("No value set for reference ({directive})")]
    NoReferenceValue { directive: String },

    #[error("Cannot specify multiple aliases using single /reference option ({directive})")]
    MultipleAliases { directive: String },

    #[error(
        "{file}: not parsed correctly: {reference} could not be found as a system library. \
         If this was meant as a user reference please provide the relative path from the \
         project root in the response file."
    )]
    UnresolvedReference { file: String, reference: String },

    #[error("{file}: could not be read: {message}")]
    Unreadable { file: String, message: String },
}

/// A `/reference` entry with its resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseReference {
    pub alias: Option<String>,
    /// Resolved path using `/` separators
    pub path: String,
}

/// A switch not interpreted by the parser, kept as `flag` + `value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompilerOption {
    /// Switch including its leading `/`
    pub flag: String,
    pub value: String,
}

impl CompilerOption {
    /// Switch name without the leading `/`.
    pub fn key(&self) -> &str {
        self.flag.strip_prefix('/').unwrap_or(&self.flag)
    }
}

impl fmt::Display for CompilerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "{}", self.flag)
        } else {
            write!(f, "{}:{}", self.flag, self.value)
        }
    }
}

/// Everything a response file contributes to project generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseFileDirectives {
    pub defines: Vec<String>,
    pub references: Vec<ResponseReference>,
    pub other_arguments: Vec<CompilerOption>,
    pub unsafe_code: bool,
    pub errors: Vec<DirectiveError>,
}

impl ResponseFileDirectives {
    /// Combine the directives of several response files.
    ///
    /// Defines and references are unioned in first-seen order, other
    /// arguments deduplicated, unsafe is OR-ed and errors concatenated.
    pub fn merge<'a>(all: impl IntoIterator<Item = &'a ResponseFileDirectives>) -> Self {
        let mut merged = Self::default();
        for directives in all {
            for define in &directives.defines {
                if !merged.defines.contains(define) {
                    merged.defines.push(define.clone());
                }
            }
            for reference in &directives.references {
                if !merged.references.iter().any(|r| r.path == reference.path) {
                    merged.references.push(reference.clone());
                }
            }
            for option in &directives.other_arguments {
                if !merged.other_arguments.contains(option) {
                    merged.other_arguments.push(option.clone());
                }
            }
            merged.unsafe_code |= directives.unsafe_code;
            merged.errors.extend(directives.errors.iter().cloned());
        }
        merged
    }

    /// Values of every other argument whose switch is `key` (without `/`).
    pub fn option_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.other_arguments
            .iter()
            .filter(move |option| option.key() == key)
            .map(|option| option.value.as_str())
    }
}

/// Response file parser.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseFileParser;

impl ResponseFileParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse the response file at `path`.
    ///
    /// Relative paths are taken relative to `base_dir`. A missing file yields
    /// empty directives. Bare references are probed on disk.
    pub fn parse_file(
        &self,
        path: &str,
        base_dir: &str,
        system_dirs: &[String],
    ) -> ResponseFileDirectives {
        let full_path = NormalizedPath::new(base_dir).join(path);
        if !full_path.to_native().is_file() {
            tracing::debug!(path = %full_path, "response file not found, using empty directives");
            return ResponseFileDirectives::default();
        }

        match projsync_fs::io::read_text(&full_path) {
            Ok(text) => self.parse_text(&text, path, base_dir, system_dirs, |candidate| {
                std::path::Path::new(candidate).is_file()
            }),
            Err(e) => ResponseFileDirectives {
                errors: vec![DirectiveError::Unreadable {
                    file: path.to_string(),
                    message: e.to_string(),
                }],
                ..Default::default()
            },
        }
    }

    /// Parse response file text.
    ///
    /// `probe` reports whether a candidate reference path exists; it is only
    /// consulted for references that are not rooted.
    pub fn parse_text(
        &self,
        text: &str,
        file_name: &str,
        base_dir: &str,
        system_dirs: &[String],
        probe: impl Fn(&str) -> bool,
    ) -> ResponseFileDirectives {
        let mut directives = ResponseFileDirectives::default();

        for token in tokenize(text) {
            let option = split_option(&token);
            match option.flag.as_str() {
                "/d" | "/define" => {
                    if option.value.is_empty() {
                        directives.errors.push(DirectiveError::NoDefineValue {
                            directive: token.clone(),
                        });
                        continue;
                    }
                    directives.defines.extend(
                        option
                            .value
                            .split(LIST_SEPARATORS)
                            .map(str::trim)
                            .filter(|d| !d.is_empty())
                            .map(String::from),
                    );
                }
                "/r" | "/reference" => {
                    match resolve_reference(&option.value, &token, file_name, base_dir, system_dirs, &probe)
                    {
                        Ok(Some(reference)) => directives.references.push(reference),
                        Ok(None) => {}
                        Err(e) => directives.errors.push(e),
                    }
                }
                "/unsafe" | "/unsafe+" => directives.unsafe_code = true,
                "/unsafe-" => directives.unsafe_code = false,
                _ => directives.other_arguments.push(option),
            }
        }

        directives
    }
}

fn resolve_reference(
    value: &str,
    directive: &str,
    file_name: &str,
    base_dir: &str,
    system_dirs: &[String],
    probe: &impl Fn(&str) -> bool,
) -> Result<Option<ResponseReference>, DirectiveError> {
    if value.is_empty() {
        return Err(DirectiveError::NoReferenceValue {
            directive: directive.to_string(),
        });
    }
    let parts: Vec<&str> = value.split(LIST_SEPARATORS).collect();
    if parts.len() != 1 {
        return Err(DirectiveError::MultipleAliases {
            directive: directive.to_string(),
        });
    }

    let (alias, assembly) = match parts[0].split_once('=') {
        Some((alias, assembly)) => (Some(alias.to_string()), assembly),
        None => (None, parts[0]),
    };
    if assembly.is_empty() {
        return Ok(None);
    }

    let candidate = NormalizedPath::new(assembly);
    let resolved = if candidate.is_absolute() {
        Some(candidate)
    } else {
        let from_system = system_dirs
            .iter()
            .map(|dir| NormalizedPath::new(dir).join(assembly))
            .find(|path| probe(path.as_str()));
        let from_base = NormalizedPath::new(base_dir).join(assembly);
        // The project directory takes precedence over system directories
        if probe(from_base.as_str()) {
            Some(from_base)
        } else {
            from_system
        }
    };

    match resolved {
        Some(path) => Ok(Some(ResponseReference {
            alias,
            path: path.as_str().to_string(),
        })),
        None => Err(DirectiveError::UnresolvedReference {
            file: file_name.to_string(),
            reference: assembly.to_string(),
        }),
    }
}

fn split_option(token: &str) -> CompilerOption {
    let (flag, value) = match token.split_once(':') {
        Some((flag, value)) => (flag, value),
        None => (token, ""),
    };
    let flag = match flag.strip_prefix('-') {
        Some(rest) => format!("/{rest}"),
        None => flag.to_string(),
    };
    CompilerOption {
        flag,
        value: value.to_string(),
    }
}

/// Split response file text into arguments.
fn tokenize(text: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();

    for line in text.split(['\n', '\r']) {
        let mut chars = line.chars();
        while let Some(c) = chars.next() {
            match c {
                '"' | '\'' => {
                    for quoted in chars.by_ref() {
                        if quoted == c {
                            break;
                        }
                        current.push(quoted);
                    }
                }
                ' ' => {
                    if !current.is_empty() {
                        args.push(std::mem::take(&mut current));
                    }
                }
                other => current.push(other),
            }
        }
        if !current.is_empty() {
            args.push(std::mem::take(&mut current));
        }
    }

    args
}
