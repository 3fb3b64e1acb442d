//! Nested unit exclusion for glob-based projects
//!
//! A glob such as `Assets/Game/**/*.cs` also matches sources of any unit
//! whose manifest lives below `Assets/Game`. Those directories must be
//! removed from the glob again.

use projsync_fs::NormalizedPath;

/// Directories to exclude from the glob of the unit declared by
/// `current_manifest`.
///
/// With no current manifest (the implicit root unit) every other manifest's
/// directory is excluded. Otherwise only manifests below the current
/// manifest's directory are, compared case-insensitively. Results are
/// containing directories, deduplicated, in input order.
pub fn excluded_paths(current_manifest: Option<&str>, all_manifests: &[String]) -> Vec<String> {
    let current = current_manifest.map(NormalizedPath::new);
    let scope = current.as_ref().and_then(NormalizedPath::parent);

    let mut excluded: Vec<String> = Vec::new();
    for manifest in all_manifests {
        if manifest.trim().is_empty() {
            continue;
        }
        let manifest = NormalizedPath::new(manifest);
        if current.as_ref() == Some(&manifest) {
            continue;
        }

        let in_scope = match (&current, &scope) {
            (None, _) => true,
            (Some(_), Some(scope)) => is_below(&manifest, scope),
            // Manifest at the tree root: everything else is nested
            (Some(_), None) => true,
        };
        if !in_scope {
            continue;
        }

        let Some(dir) = manifest.parent() else {
            continue;
        };
        let dir = dir.as_str().to_string();
        if !excluded.contains(&dir) {
            excluded.push(dir);
        }
    }
    excluded
}

fn is_below(path: &NormalizedPath, dir: &NormalizedPath) -> bool {
    let with_separator = NormalizedPath::new(format!("{}/", dir.as_str().trim_end_matches('/')));
    path.starts_with_ignore_case(&with_separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifests(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn root_unit_excludes_every_manifest_directory() {
        let all = manifests(&["Assets/A/A.asmdef", "Assets/B/Editor/B.asmdef"]);
        assert_eq!(
            excluded_paths(None, &all),
            vec!["Assets/A", "Assets/B/Editor"]
        );
    }

    #[test]
    fn only_nested_manifests_are_excluded() {
        let all = manifests(&[
            "Assets/Game/Game.asmdef",
            "Assets/Game/Editor/GameEditor.asmdef",
            "Assets/GameTools/Tools.asmdef",
            "Assets/Other/Other.asmdef",
        ]);
        assert_eq!(
            excluded_paths(Some("Assets/Game/Game.asmdef"), &all),
            vec!["Assets/Game/Editor"]
        );
    }

    #[test]
    fn prefix_comparison_ignores_case() {
        let all = manifests(&["assets/game/editor/E.asmdef"]);
        assert_eq!(
            excluded_paths(Some("Assets/Game/Game.asmdef"), &all),
            vec!["assets/game/editor"]
        );
    }

    #[test]
    fn blank_and_self_entries_are_skipped() {
        let all = manifests(&["", "/folder/F.asmdef"]);
        assert!(excluded_paths(Some("/folder/F.asmdef"), &all).is_empty());
    }
}
