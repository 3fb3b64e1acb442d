//! Tests for the SyncEngine

use std::sync::Arc;

use pretty_assertions::assert_eq;
use projsync_core::{
    CompilationUnit, DigestIdentifiers, IdentifierGenerator, LineEnding, PackageOrigin,
    ProjectStyle, SyncEngine, SyncSettings,
};
use projsync_fs::NormalizedPath;
use projsync_test_utils::{FakeProvider, MemoryArtifactStore};
use regex::Regex;

const PROJECT_DIR: &str = "/FullPath/Example";
const SOLUTION: &str = "/FullPath/Example/Example.sln";

fn project(name: &str) -> String {
    format!("{PROJECT_DIR}/{name}.csproj")
}

fn lf_settings() -> SyncSettings {
    SyncSettings {
        line_ending: LineEnding::Lf,
        ..Default::default()
    }
}

fn setup_with(
    provider: FakeProvider,
    settings: SyncSettings,
) -> (SyncEngine, Arc<FakeProvider>, Arc<MemoryArtifactStore>) {
    let provider = Arc::new(provider);
    let store = Arc::new(MemoryArtifactStore::new());
    let engine = SyncEngine::new(
        NormalizedPath::new(PROJECT_DIR),
        settings,
        provider.clone(),
        store.clone(),
    )
    .unwrap();
    (engine, provider, store)
}

fn setup(provider: FakeProvider) -> (SyncEngine, Arc<FakeProvider>, Arc<MemoryArtifactStore>) {
    setup_with(provider, lf_settings())
}

fn game_unit() -> CompilationUnit {
    CompilationUnit::new("Game")
        .with_output_path("Library/ScriptAssemblies/Game.dll")
        .with_source_files(["Assets/Player.cs"])
}

#[test]
fn test_full_sync_writes_solution_and_projects() {
    let (engine, _, store) = setup(FakeProvider::new().with_unit(game_unit()));

    let report = engine.full_sync().unwrap();

    assert!(report.success());
    assert_eq!(report.written, vec![SOLUTION.to_string(), project("Game")]);
    assert!(store.directory_exists(PROJECT_DIR));

    let solution = store.contents(SOLUTION).unwrap();
    assert!(solution.starts_with('\u{feff}'));
    assert!(solution.contains("\"Game\", \"Game.csproj\""));
    assert!(solution.contains("Project(\"{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}\")"));
}

#[test]
fn test_aggregate_name_is_last_directory_component() {
    let (engine, _, _) = setup(FakeProvider::new());
    assert_eq!(engine.aggregate_name(), "Example");
    assert_eq!(engine.solution_path(), SOLUTION);
    assert_eq!(engine.project_path("Game"), project("Game"));
}

#[test]
fn test_root_directory_is_rejected() {
    let result = SyncEngine::new(
        NormalizedPath::new("/"),
        SyncSettings::default(),
        Arc::new(FakeProvider::new()),
        Arc::new(MemoryArtifactStore::new()),
    );
    assert!(result.is_err());
}

#[test]
fn test_compile_items_keep_declaration_order() {
    let unit = CompilationUnit::new("Game").with_source_files([
        "Assets/Zebra.cs",
        "Assets/Apple.cs",
        "Assets/Mango.cs",
    ]);
    let (engine, _, store) = setup(FakeProvider::new().with_unit(unit));
    engine.full_sync().unwrap();

    let text = store.contents(&project("Game")).unwrap();
    assert!(text.contains(
        "     <Compile Include=\"Assets\\Zebra.cs\" />\n     <Compile Include=\"Assets\\Apple.cs\" />\n     <Compile Include=\"Assets\\Mango.cs\" />\n"
    ));
}

#[test]
fn test_absolute_sources_inside_project_dir_become_relative() {
    let unit = CompilationUnit::new("Game").with_source_files(["/FullPath/Example/dimmer.cs"]);
    let (engine, _, store) = setup(FakeProvider::new().with_unit(unit));
    engine.full_sync().unwrap();

    let text = store.contents(&project("Game")).unwrap();
    assert!(text.contains("<Compile Include=\"dimmer.cs\" />"));
}

#[test]
fn test_response_file_defines_follow_base_defines() {
    let unit = game_unit()
        .with_defines(["UNITY_EDITOR"])
        .with_response_files(["Assets/csc.rsp"]);
    let provider = FakeProvider::new()
        .with_unit(unit)
        .with_response_file_text("Assets/csc.rsp", "-define:DEF1;DEF2\n/d:DEF5")
        .with_active_defines(["UNITY_EDITOR", "ACTIVE"]);
    let (engine, _, store) = setup(provider);
    engine.full_sync().unwrap();

    let text = store.contents(&project("Game")).unwrap();
    assert!(text.contains(
        "<DefineConstants>DEBUG;TRACE;UNITY_EDITOR;DEF1;DEF2;DEF5;ACTIVE</DefineConstants>"
    ));
}

#[test]
fn test_base_defines_are_always_present() {
    let (engine, _, store) = setup(FakeProvider::new().with_unit(game_unit()));
    engine.full_sync().unwrap();

    let text = store.contents(&project("Game")).unwrap();
    assert!(text.contains("<DefineConstants>DEBUG;TRACE</DefineConstants>"));
}

#[test]
fn test_response_file_unsafe_and_references() {
    let unit = game_unit().with_response_files(["csc.rsp"]);
    let provider = FakeProvider::new()
        .with_unit(unit)
        .with_response_file_text("csc.rsp", "-unsafe\n-r:Plugins/Native.dll")
        .with_existing_files(["/FullPath/Example/Plugins/Native.dll"]);
    let (engine, _, store) = setup(provider);
    engine.full_sync().unwrap();

    let text = store.contents(&project("Game")).unwrap();
    assert_eq!(text.matches("<AllowUnsafeBlocks>True</AllowUnsafeBlocks>").count(), 2);
    assert!(text.contains(
        "    <Reference Include=\"Native\">\n        <HintPath>/FullPath/Example/Plugins/Native.dll</HintPath>\n    </Reference>\n"
    ));
}

#[test]
fn test_response_file_errors_become_diagnostics() {
    let unit = game_unit().with_response_files(["csc.rsp"]);
    let provider = FakeProvider::new()
        .with_unit(unit)
        .with_response_file_text("csc.rsp", "-define:\n-define:KEPT");
    let (engine, _, store) = setup(provider);

    let report = engine.full_sync().unwrap();

    assert!(report.success());
    assert_eq!(report.diagnostics.len(), 1);
    assert!(report.diagnostics[0].contains("No value set for define"));
    let text = store.contents(&project("Game")).unwrap();
    assert!(text.contains("<DefineConstants>DEBUG;TRACE;KEPT</DefineConstants>"));
}

#[test]
fn test_project_reference_uses_referenced_unit_id() {
    let a = CompilationUnit::new("A")
        .with_source_files(["Assets/A/a.cs"])
        .with_references(["B"]);
    let b = CompilationUnit::new("B").with_source_files(["Assets/B/b.cs"]);
    let (engine, _, store) = setup(FakeProvider::new().with_units([a, b]));
    engine.full_sync().unwrap();

    let id = DigestIdentifiers::new().unit_id("Example", "B");
    let text = store.contents(&project("A")).unwrap();
    assert!(text.contains("    <ProjectReference Include=\"B.csproj\">\n"));
    assert!(text.contains(&format!("      <Project>{{{id}}}</Project>\n")));
    assert!(text.contains("      <ReferenceOutputAssembly>false</ReferenceOutputAssembly>\n"));

    let b_text = store.contents(&project("B")).unwrap();
    assert!(b_text.contains(&format!("<ProjectGuid>{{{id}}}</ProjectGuid>")));
}

#[test]
fn test_reference_without_sources_is_demoted_to_hint_path() {
    let a = CompilationUnit::new("A")
        .with_source_files(["Assets/A/a.cs"])
        .with_references(["B"]);
    let b = CompilationUnit::new("B").with_output_path("Library/ScriptAssemblies/B.dll");
    let (engine, _, store) = setup(FakeProvider::new().with_units([a, b]));
    engine.full_sync().unwrap();

    let text = store.contents(&project("A")).unwrap();
    assert!(!text.contains("<ProjectReference"));
    assert!(text.contains(
        "    <Reference Include=\"B\">\n        <HintPath>/FullPath/Example/Library/ScriptAssemblies/B.dll</HintPath>\n"
    ));
    assert!(store.contents(&project("B")).is_none());
}

#[test]
fn test_unit_without_sources_is_absent_from_both_artifacts() {
    let empty = CompilationUnit::new("Empty").with_output_path("Library/Empty.dll");
    let (engine, _, store) = setup(FakeProvider::new().with_units([game_unit(), empty]));
    engine.full_sync().unwrap();

    assert!(store.contents(&project("Empty")).is_none());
    assert!(!store.contents(SOLUTION).unwrap().contains("Empty"));
}

#[test]
fn test_second_sync_writes_nothing() {
    let (engine, _, store) = setup(FakeProvider::new().with_unit(game_unit()));

    engine.full_sync().unwrap();
    let second = engine.full_sync().unwrap();

    assert!(second.is_noop());
    assert_eq!(second.unchanged.len(), 2);
    assert_eq!(store.write_times(SOLUTION), 1);
    assert_eq!(store.write_times(&project("Game")), 1);
}

#[test]
fn test_write_failure_is_recorded_and_pass_continues() {
    let other = CompilationUnit::new("Other").with_source_files(["Assets/Other/o.cs"]);
    let (engine, _, store) = setup(FakeProvider::new().with_units([game_unit(), other]));
    store.fail_writes_for(&project("Game"));

    let report = engine.full_sync().unwrap();

    assert!(!report.success());
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].starts_with(&project("Game")));
    assert!(store.contents(SOLUTION).is_some());
    assert!(store.contents(&project("Other")).is_some());
}

#[test]
fn test_sync_if_needed_without_solution_does_nothing() {
    let (engine, provider, store) = setup(FakeProvider::new().with_unit(game_unit()));

    let synced = engine
        .sync_if_needed(&[], &["reimport.dll".to_string()])
        .unwrap();

    assert!(!synced);
    assert_eq!(provider.unit_queries(), 0);
    assert_eq!(store.total_writes(), 0);
}

#[test]
fn test_reimported_binary_triggers_sync_after_full_sync() {
    let (engine, _, _) = setup(FakeProvider::new().with_unit(game_unit()));
    engine.full_sync().unwrap();

    let synced = engine
        .sync_if_needed(&[], &["reimport.dll".to_string()])
        .unwrap();
    assert!(synced);
}

#[test]
fn test_affected_binary_without_solution_does_nothing() {
    let (engine, provider, store) = setup(FakeProvider::new().with_unit(game_unit()));

    let synced = engine
        .sync_if_needed(&["reimport.dll".to_string()], &[])
        .unwrap();

    assert!(!synced);
    assert_eq!(provider.unit_queries(), 0);
    assert_eq!(store.total_writes(), 0);
}

#[test]
fn test_affected_binary_and_manifest_trigger_sync_after_full_sync() {
    let (engine, _, store) = setup(FakeProvider::new().with_unit(game_unit()));
    engine.full_sync().unwrap();
    store.insert(SOLUTION, "stale");

    for changed in ["reimport.dll", "Assets/Game/Game.asmdef"] {
        let synced = engine.sync_if_needed(&[changed.to_string()], &[]).unwrap();
        assert!(synced, "{changed}");
    }
    assert!(store.contents(SOLUTION).unwrap().starts_with('\u{feff}'));
}

#[test]
fn test_irrelevant_change_does_not_sync() {
    let (engine, _, store) = setup(FakeProvider::new().with_unit(game_unit()));
    engine.full_sync().unwrap();
    let writes = store.total_writes();

    let synced = engine
        .sync_if_needed(&["Assets/readme.txt".to_string()], &[])
        .unwrap();

    assert!(!synced);
    assert_eq!(store.total_writes(), writes);
}

#[test]
fn test_incremental_sync_regenerates_only_implicated_units() {
    let other = CompilationUnit::new("Other").with_source_files(["Assets/Other/o.cs"]);
    let (engine, _, store) = setup(FakeProvider::new().with_units([game_unit(), other]));
    engine.full_sync().unwrap();
    store.delete_file(&project("Game"));
    store.delete_file(&project("Other"));

    let report = engine
        .sync_if_needed_report(&["Assets/Player.cs".to_string()], &[])
        .unwrap()
        .unwrap();

    assert_eq!(report.written, vec![project("Game")]);
    assert_eq!(report.unchanged, vec![SOLUTION.to_string()]);
    assert!(store.contents(&project("Other")).is_none());
}

#[test]
fn test_registry_package_sources_need_generate_all() {
    let unit = CompilationUnit::new("Vendor").with_source_files(["Packages/com.vendor/V.cs"]);
    let provider = || {
        FakeProvider::new()
            .with_unit(unit.clone())
            .with_package_root("Packages/com.vendor", PackageOrigin::Registry)
    };

    let (engine, _, store) = setup(provider());
    engine.full_sync().unwrap();
    assert!(store.contents(&project("Vendor")).is_none());

    let settings = SyncSettings {
        generate_all: true,
        ..lf_settings()
    };
    let (engine, _, store) = setup_with(provider(), settings);
    engine.full_sync().unwrap();
    let text = store.contents(&project("Vendor")).unwrap();
    assert!(text.contains("<Compile Include=\"Packages\\com.vendor\\V.cs\" />"));
}

#[test]
fn test_embedded_package_sources_are_included() {
    let unit = CompilationUnit::new("Local").with_source_files(["Packages/com.local/L.cs"]);
    let provider = FakeProvider::new()
        .with_unit(unit)
        .with_package_root("Packages/com.local", PackageOrigin::Embedded);
    let (engine, _, store) = setup(provider);
    engine.full_sync().unwrap();

    assert!(store.contents(&project("Local")).is_some());
}

#[test]
fn test_non_compile_assets_go_to_owning_unit() {
    let provider = FakeProvider::new()
        .with_unit(game_unit())
        .with_asset_files(["Assets/Player.cs", "Assets/Water.shader", "Assets/notes.txt"])
        .assign_directory_to_unit("Assets", "Game");
    let (engine, _, store) = setup(provider);
    engine.full_sync().unwrap();

    let text = store.contents(&project("Game")).unwrap();
    assert!(text.contains("     <None Include=\"Assets\\Water.shader\" />\n"));
    assert!(!text.contains("notes.txt"));
    assert_eq!(text.matches("<None Include").count(), 1);
}

#[test]
fn test_user_extensions_make_assets_eligible() {
    let provider = FakeProvider::new()
        .with_unit(game_unit())
        .with_asset_files(["Assets/notes.txt"])
        .with_user_extensions(["txt"])
        .assign_directory_to_unit("Assets", "Game");
    let (engine, _, store) = setup(provider);
    engine.full_sync().unwrap();

    let text = store.contents(&project("Game")).unwrap();
    assert!(text.contains("<None Include=\"Assets\\notes.txt\" />"));
}

#[test]
fn test_analyzers_from_all_sources_in_order() {
    let unit = game_unit()
        .with_analyzers(["/Tools/UnitAnalyzer.dll"])
        .with_response_files(["csc.rsp"]);
    let provider = FakeProvider::new()
        .with_unit(unit)
        .with_analyzers(["/Tools/Global.dll"])
        .with_response_file_text("csc.rsp", "-a:Local/Args.dll");
    let (engine, _, store) = setup(provider);
    engine.full_sync().unwrap();

    let text = store.contents(&project("Game")).unwrap();
    let unit_pos = text.find("<Analyzer Include=\"/Tools/UnitAnalyzer.dll\" />").unwrap();
    let global_pos = text.find("<Analyzer Include=\"/Tools/Global.dll\" />").unwrap();
    let args_pos = text
        .find("<Analyzer Include=\"/FullPath/Example/Local/Args.dll\" />")
        .unwrap();
    assert!(unit_pos < global_pos && global_pos < args_pos);
}

#[test]
fn test_analyzer_dll_is_not_also_a_plain_reference() {
    let unit = game_unit()
        .with_compiled_references(["Assets/Analyzers/Rules.dll", "Plugins/Json.dll"])
        .with_response_files(["csc.rsp"]);
    let provider = FakeProvider::new()
        .with_unit(unit)
        .with_response_file_text("csc.rsp", "-a:Assets/Analyzers/Rules.dll");
    let (engine, _, store) = setup(provider);
    engine.full_sync().unwrap();

    let text = store.contents(&project("Game")).unwrap();
    assert!(text.contains(
        "<Analyzer Include=\"/FullPath/Example/Assets/Analyzers/Rules.dll\" />"
    ));
    assert!(!text.contains("<Reference Include=\"Rules\">"));
    assert!(text.contains("<Reference Include=\"Json\">"));
}

#[test]
fn test_analyzer_exclusion_compares_cleaned_paths() {
    let unit = game_unit()
        .with_analyzers(["/FullPath/Example/Tools/Gen.dll"])
        .with_compiled_references(["Tools/../Tools/./Gen.dll"]);
    let (engine, _, store) = setup(FakeProvider::new().with_unit(unit));
    engine.full_sync().unwrap();

    let text = store.contents(&project("Game")).unwrap();
    assert!(text.contains("<Analyzer Include=\"/FullPath/Example/Tools/Gen.dll\" />"));
    assert!(!text.contains("<Reference Include=\"Gen\">"));
}

#[test]
fn test_project_guid_is_hyphenated_uuid() {
    let (engine, _, store) = setup(FakeProvider::new().with_unit(game_unit()));
    engine.full_sync().unwrap();

    let guid = Regex::new(
        r"<ProjectGuid>\{[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\}</ProjectGuid>",
    )
    .unwrap();
    assert!(guid.is_match(&store.contents(&project("Game")).unwrap()));
}

#[test]
fn test_sdk_style_removes_nested_unit_directories() {
    let root = CompilationUnit::new("Root").with_source_files(["Assets/Root.cs"]);
    let nested = CompilationUnit::new("Nested").with_source_files(["Assets/Nested/N.cs"]);
    let provider = FakeProvider::new()
        .with_units([root, nested])
        .with_manifest("Nested", "Assets/Nested/Nested.asmdef");
    let settings = SyncSettings {
        style: ProjectStyle::Sdk,
        ..lf_settings()
    };
    let (engine, _, store) = setup_with(provider, settings);
    engine.full_sync().unwrap();

    let root_text = store.contents(&project("Root")).unwrap();
    assert!(root_text.starts_with("<Project Sdk=\"Microsoft.NET.Sdk\">\n"));
    assert!(root_text.contains("    <Compile Include=\"**\\*.cs\" />\n"));
    assert!(root_text.contains(
        "    <Compile Remove=\"Assets\\Nested\\**\" /> <None Remove=\"Assets\\Nested\\**\" />\n"
    ));
    assert!(root_text.contains("<TargetFramework>net471</TargetFramework>"));

    let nested_text = store.contents(&project("Nested")).unwrap();
    assert!(nested_text.contains("    <Compile Include=\"Assets\\Nested\\**\\*.cs\" />\n"));
    assert!(!nested_text.contains("Compile Remove"));
}

#[test]
fn test_crlf_line_endings() {
    let settings = SyncSettings {
        line_ending: LineEnding::Crlf,
        ..Default::default()
    };
    let (engine, _, store) = setup_with(FakeProvider::new().with_unit(game_unit()), settings);
    engine.full_sync().unwrap();

    let solution = store.contents(SOLUTION).unwrap();
    assert!(solution.contains("EndProject\r\n"));
    let text = store.contents(&project("Game")).unwrap();
    assert!(text.ends_with("</Project>\r\n"));
    assert!(!text.replace("\r\n", "").contains('\n'));
}

#[test]
fn test_render_all_does_not_write() {
    let (engine, _, store) = setup(FakeProvider::new().with_unit(game_unit()));

    let artifacts = engine.render_all();

    assert_eq!(artifacts.len(), 2);
    assert_eq!(artifacts[0].path, SOLUTION);
    assert_eq!(artifacts[1].path, project("Game"));
    assert_eq!(store.total_writes(), 0);
}

#[test]
fn test_solution_lists_only_csharp_units() {
    let shader_only = CompilationUnit::new("Shaders").with_source_files(["Assets/Fx/water.shader"]);
    let (engine, _, store) = setup(FakeProvider::new().with_units([game_unit(), shader_only]));
    engine.full_sync().unwrap();

    let solution = store.contents(SOLUTION).unwrap();
    assert!(solution.contains("\"Game\""));
    assert!(!solution.contains("\"Shaders\""));
    assert!(store.contents(&project("Shaders")).is_some());
}
