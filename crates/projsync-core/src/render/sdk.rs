//! SDK-style project renderer
//!
//! Compile items are not listed. Instead one glob covers the unit's manifest
//! directory (or the whole tree for the implicit root unit) and directories
//! owned by nested units are removed from it again.

use projsync_fs::NormalizedPath;

use super::{ProjectInput, ProjectRenderer, RenderContext, TextBuilder, msbuild_bool};
use crate::paths::escape_markup;

#[derive(Debug, Default, Clone, Copy)]
pub struct SdkRenderer;

impl ProjectRenderer for SdkRenderer {
    fn render(&self, ctx: &RenderContext<'_>, input: &ProjectInput<'_>) -> String {
        let settings = ctx.settings;
        let mut out = TextBuilder::new(ctx.newline());

        out.line(r#"<Project Sdk="Microsoft.NET.Sdk">"#);
        out.line("  <PropertyGroup>");
        out.line(format!(
            "    <TargetFramework>{}</TargetFramework>",
            settings.target_framework_moniker()
        ));
        out.line(format!("    <LangVersion>{}</LangVersion>", settings.lang_version));
        out.line(format!(
            "    <AssemblyName>{}</AssemblyName>",
            escape_markup(input.unit_name)
        ));
        out.line(format!(
            "    <RootNamespace>{}</RootNamespace>",
            escape_markup(&settings.root_namespace)
        ));
        out.line(format!("    <ProjectGuid>{{{}}}</ProjectGuid>", input.unit_id));
        out.line(format!(
            "    <DefineConstants>{}</DefineConstants>",
            escape_markup(&input.defines.join(";"))
        ));
        out.line(format!(
            "    <AllowUnsafeBlocks>{}</AllowUnsafeBlocks>",
            msbuild_bool(input.allow_unsafe)
        ));
        out.line("    <EnableDefaultItems>false</EnableDefaultItems>");
        if let Some(ruleset) = input.ruleset_path {
            out.line(format!(
                "    <CodeAnalysisRuleSet>{}</CodeAnalysisRuleSet>",
                ctx.paths.hint_path(ruleset)
            ));
        }
        out.line("  </PropertyGroup>");

        out.line("  <ItemGroup>");
        out.line(format!("    <Compile Include=\"{}\" />", compile_glob(ctx, input)));
        for dir in input.excluded_dirs {
            let dir = ctx.paths.item_path(dir, false);
            out.line(format!(
                "    <Compile Remove=\"{dir}\\**\" /> <None Remove=\"{dir}\\**\" />"
            ));
        }
        out.line(r#"    <None Remove="**\*.meta" />"#);
        for item in &input.resolved.non_compile_items {
            out.line(format!(
                "    <None Include=\"{}\" />",
                ctx.paths.item_path(&item.path, item.in_package)
            ));
        }
        out.line("  </ItemGroup>");

        if !input.resolved.external_references.is_empty() {
            out.line("  <ItemGroup>");
            for reference in &input.resolved.external_references {
                out.line(format!(
                    "    <Reference Include=\"{}\">",
                    ctx.paths.reference_name(reference)
                ));
                out.line(format!(
                    "      <HintPath>{}</HintPath>",
                    ctx.paths.hint_path(reference)
                ));
                out.line("    </Reference>");
            }
            out.line("  </ItemGroup>");
        }

        if !input.resolved.project_references.is_empty() {
            out.line("  <ItemGroup>");
            for reference in &input.resolved.project_references {
                out.line(format!(
                    "    <ProjectReference Include=\"{}\">",
                    escape_markup(&ctx.project_file_name(&reference.name))
                ));
                out.line(format!("      <Project>{{{}}}</Project>", reference.id));
                out.line(format!("      <Name>{}</Name>", escape_markup(&reference.name)));
                out.line("    </ProjectReference>");
            }
            out.line("  </ItemGroup>");
        }

        if !input.resolved.analyzers.is_empty() {
            out.line("  <ItemGroup>");
            for analyzer in &input.resolved.analyzers {
                out.line(format!(
                    "    <Analyzer Include=\"{}\" />",
                    ctx.paths.hint_path(analyzer)
                ));
            }
            out.line("  </ItemGroup>");
        }

        out.line("</Project>");
        out.finish()
    }
}

fn compile_glob(ctx: &RenderContext<'_>, input: &ProjectInput<'_>) -> String {
    let scope = input
        .manifest_path
        .and_then(|manifest| NormalizedPath::new(manifest).parent())
        .map(|dir| ctx.paths.item_path(dir.as_str(), false));
    match scope {
        Some(dir) => format!("{dir}\\**\\*.cs"),
        None => r"**\*.cs".to_string(),
    }
}
