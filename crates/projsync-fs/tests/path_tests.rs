use projsync_fs::NormalizedPath;
use rstest::rstest;

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("Assets\\Scripts\\Player.cs");
    assert_eq!(path.as_str(), "Assets/Scripts/Player.cs");
}

#[test]
fn test_normalize_mixed_slashes() {
    let path = NormalizedPath::new("C:\\Dimmer/foo.cs");
    assert_eq!(path.as_str(), "C:/Dimmer/foo.cs");
}

#[test]
fn test_new_keeps_parent_segments() {
    let path = NormalizedPath::new("..\\path\\file.cs");
    assert_eq!(path.as_str(), "../path/file.cs");
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("/FullPath/Example");
    assert_eq!(base.join("Assets/a.cs").as_str(), "/FullPath/Example/Assets/a.cs");
}

#[test]
fn test_join_absolute_segment_replaces_base() {
    let base = NormalizedPath::new("/FullPath/Example");
    assert_eq!(base.join("/some/path/Hello.dll").as_str(), "/some/path/Hello.dll");
}

#[test]
fn test_file_stem_and_extension() {
    let path = NormalizedPath::new("/path/with.cs/assembly.dll");
    assert_eq!(path.file_name(), Some("assembly.dll"));
    assert_eq!(path.file_stem(), Some("assembly"));
    assert_eq!(path.extension(), Some("dll"));
}

#[test]
fn test_extension_absent_for_dotfile() {
    let path = NormalizedPath::new("folder/.hidden");
    assert_eq!(path.extension(), None);
    assert_eq!(path.file_stem(), Some(".hidden"));
}

#[test]
fn test_parent() {
    let path = NormalizedPath::new("Assets/Editor/Editor.asmdef");
    assert_eq!(path.parent().unwrap().as_str(), "Assets/Editor");
}

#[rstest]
#[case("a/../b", "b")]
#[case("../a", "../a")]
#[case("/a/b/../../c", "/c")]
#[case("/../a", "/a")]
#[case("a\\..\\b", "b")]
#[case("a/./b//c", "a/b/c")]
#[case("a/..", ".")]
#[case("Packages/com.foo/../../Library/PackageCache/x.cs", "Library/PackageCache/x.cs")]
fn test_clean(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(NormalizedPath::new(input).clean().as_str(), expected);
}

#[rstest]
#[case("Assets/Editor/Foo.asmdef", "assets/editor", true)]
#[case("Assets/Editor/Foo.asmdef", "Assets/Runtime", false)]
#[case("Assets", "Assets/Editor", false)]
fn test_starts_with_ignore_case(#[case] path: &str, #[case] prefix: &str, #[case] expected: bool) {
    let path = NormalizedPath::new(path);
    assert_eq!(path.starts_with_ignore_case(&NormalizedPath::new(prefix)), expected);
}
