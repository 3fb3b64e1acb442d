//! Tests for how item paths and names end up in project text

use std::sync::Arc;

use projsync_core::{CompilationUnit, LineEnding, SyncEngine, SyncSettings};
use projsync_fs::NormalizedPath;
use projsync_test_utils::{FakeProvider, MemoryArtifactStore};
use rstest::rstest;

fn render_game(sources: &[&str]) -> String {
    let unit = CompilationUnit::new("Game").with_source_files(sources.iter().copied());
    let store = Arc::new(MemoryArtifactStore::new());
    let engine = SyncEngine::new(
        NormalizedPath::new("/FullPath/Example"),
        SyncSettings {
            line_ending: LineEnding::Lf,
            ..Default::default()
        },
        Arc::new(FakeProvider::new().with_unit(unit)),
        store.clone(),
    )
    .unwrap();
    engine.full_sync().unwrap();
    store.contents("/FullPath/Example/Game.csproj").unwrap()
}

#[rstest]
#[case("x & y.cs", "x &amp; y.cs")]
#[case("x ' y.cs", "x &apos; y.cs")]
#[case("x < y.cs", "x &lt; y.cs")]
#[case("Dimmer&\\foo.cs", "Dimmer&amp;\\foo.cs")]
#[case("C:\\Dimmer/foo.cs", "C:\\Dimmer\\foo.cs")]
#[case("..\\path\\file.cs", "..\\path\\file.cs")]
#[case("/FullPath/Example/dimmer.cs", "dimmer.cs")]
#[case("/FullPath/Example/Assets/Sub/deep.cs", "Assets\\Sub\\deep.cs")]
fn test_compile_item_paths(#[case] source: &str, #[case] expected: &str) {
    let text = render_game(&[source]);
    assert!(
        text.contains(&format!("     <Compile Include=\"{expected}\" />\n")),
        "expected item {expected} in:\n{text}"
    );
}

#[test]
fn test_unit_name_is_escaped_in_assembly_name() {
    let unit = CompilationUnit::new("Tom&Jerry").with_source_files(["Assets/a.cs"]);
    let store = Arc::new(MemoryArtifactStore::new());
    let engine = SyncEngine::new(
        NormalizedPath::new("/FullPath/Example"),
        SyncSettings::default(),
        Arc::new(FakeProvider::new().with_unit(unit)),
        store.clone(),
    )
    .unwrap();
    engine.full_sync().unwrap();

    let text = store.contents("/FullPath/Example/Tom&Jerry.csproj").unwrap();
    assert!(text.contains("<AssemblyName>Tom&amp;Jerry</AssemblyName>"));
}

#[test]
fn test_root_namespace_and_language_version_come_from_settings() {
    let unit = CompilationUnit::new("Game").with_source_files(["Assets/a.cs"]);
    let store = Arc::new(MemoryArtifactStore::new());
    let settings = SyncSettings {
        root_namespace: "Studio.Game".into(),
        lang_version: "9.0".into(),
        target_framework_version: "v4.8".into(),
        ..Default::default()
    };
    let engine = SyncEngine::new(
        NormalizedPath::new("/FullPath/Example"),
        settings,
        Arc::new(FakeProvider::new().with_unit(unit)),
        store.clone(),
    )
    .unwrap();
    engine.full_sync().unwrap();

    let text = store.contents("/FullPath/Example/Game.csproj").unwrap();
    assert!(text.contains("<RootNamespace>Studio.Game</RootNamespace>"));
    assert!(text.contains("<LangVersion>9.0</LangVersion>"));
    assert!(text.contains("<TargetFrameworkVersion>v4.8</TargetFrameworkVersion>"));
}
