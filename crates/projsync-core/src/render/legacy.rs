//! Itemized (pre-SDK) project renderer

use super::{ProjectInput, ProjectRenderer, RenderContext, TextBuilder, msbuild_bool};
use crate::paths::escape_markup;

const TOOLS_VERSION: &str = "4.0";
const PRODUCT_VERSION: &str = "10.0.20506";
const BASE_DIRECTORY: &str = ".";
const MSBUILD_NAMESPACE: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

/// Renders projects that list every compile item, asset and reference
/// explicitly.
#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyRenderer;

impl ProjectRenderer for LegacyRenderer {
    fn render(&self, ctx: &RenderContext<'_>, input: &ProjectInput<'_>) -> String {
        let mut out = TextBuilder::new(ctx.newline());
        header(&mut out, ctx, input);

        for item in &input.resolved.compile_items {
            out.line(format!(
                "     <Compile Include=\"{}\" />",
                ctx.paths.item_path(&item.path, item.in_package)
            ));
        }
        for item in &input.resolved.non_compile_items {
            out.line(format!(
                "     <None Include=\"{}\" />",
                ctx.paths.item_path(&item.path, item.in_package)
            ));
        }
        for reference in &input.resolved.external_references {
            out.line(format!(
                "    <Reference Include=\"{}\">",
                ctx.paths.reference_name(reference)
            ));
            out.line(format!(
                "        <HintPath>{}</HintPath>",
                ctx.paths.hint_path(reference)
            ));
            out.line("    </Reference>");
        }

        if !input.resolved.project_references.is_empty() {
            out.line("  </ItemGroup>");
            out.line("  <ItemGroup>");
            for reference in &input.resolved.project_references {
                out.line(format!(
                    "    <ProjectReference Include=\"{}\">",
                    escape_markup(&ctx.project_file_name(&reference.name))
                ));
                out.line(format!("      <Project>{{{}}}</Project>", reference.id));
                out.line(format!("      <Name>{}</Name>", escape_markup(&reference.name)));
                out.line("      <ReferenceOutputAssembly>false</ReferenceOutputAssembly>");
                out.line("    </ProjectReference>");
            }
        }

        footer(&mut out);
        out.finish()
    }
}

fn header(out: &mut TextBuilder, ctx: &RenderContext<'_>, input: &ProjectInput<'_>) {
    let settings = ctx.settings;
    let defines = input.defines.join(";");
    let allow_unsafe = msbuild_bool(input.allow_unsafe);

    out.line(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    out.line(format!(
        r#"<Project ToolsVersion="{TOOLS_VERSION}" DefaultTargets="Build" xmlns="{MSBUILD_NAMESPACE}">"#
    ));
    out.line("  <PropertyGroup>");
    out.line(format!("    <LangVersion>{}</LangVersion>", settings.lang_version));
    out.line("  </PropertyGroup>");
    out.line("  <PropertyGroup>");
    out.line(r#"    <Configuration Condition=" '$(Configuration)' == '' ">Debug</Configuration>"#);
    out.line(r#"    <Platform Condition=" '$(Platform)' == '' ">AnyCPU</Platform>"#);
    out.line(format!("    <ProductVersion>{PRODUCT_VERSION}</ProductVersion>"));
    out.line("    <SchemaVersion>2.0</SchemaVersion>");
    out.line(format!(
        "    <RootNamespace>{}</RootNamespace>",
        escape_markup(&settings.root_namespace)
    ));
    out.line(format!("    <ProjectGuid>{{{}}}</ProjectGuid>", input.unit_id));
    out.line("    <OutputType>Library</OutputType>");
    out.line("    <AppDesignerFolder>Properties</AppDesignerFolder>");
    out.line(format!(
        "    <AssemblyName>{}</AssemblyName>",
        escape_markup(input.unit_name)
    ));
    out.line(format!(
        "    <TargetFrameworkVersion>{}</TargetFrameworkVersion>",
        settings.target_framework_version
    ));
    out.line("    <FileAlignment>512</FileAlignment>");
    out.line(format!("    <BaseDirectory>{BASE_DIRECTORY}</BaseDirectory>"));
    out.line("  </PropertyGroup>");
    out.line(r#"  <PropertyGroup Condition=" '$(Configuration)|$(Platform)' == 'Debug|AnyCPU' ">"#);
    out.line("    <DebugSymbols>true</DebugSymbols>");
    out.line("    <DebugType>full</DebugType>");
    out.line("    <Optimize>false</Optimize>");
    out.line(r"    <OutputPath>Temp\bin\Debug\</OutputPath>");
    out.line(format!(
        "    <DefineConstants>{}</DefineConstants>",
        escape_markup(&defines)
    ));
    out.line("    <ErrorReport>prompt</ErrorReport>");
    out.line("    <WarningLevel>4</WarningLevel>");
    out.line("    <NoWarn>0169</NoWarn>");
    out.line(format!("    <AllowUnsafeBlocks>{allow_unsafe}</AllowUnsafeBlocks>"));
    out.line("  </PropertyGroup>");
    out.line(r#"  <PropertyGroup Condition=" '$(Configuration)|$(Platform)' == 'Release|AnyCPU' ">"#);
    out.line("    <DebugType>pdbonly</DebugType>");
    out.line("    <Optimize>true</Optimize>");
    out.line(r"    <OutputPath>Temp\bin\Release\</OutputPath>");
    out.line("    <ErrorReport>prompt</ErrorReport>");
    out.line("    <WarningLevel>4</WarningLevel>");
    out.line("    <NoWarn>0169</NoWarn>");
    out.line(format!("    <AllowUnsafeBlocks>{allow_unsafe}</AllowUnsafeBlocks>"));
    out.line("  </PropertyGroup>");
    out.line("  <PropertyGroup>");
    out.line("    <NoConfig>true</NoConfig>");
    out.line("    <NoStdLib>true</NoStdLib>");
    out.line(
        "    <AddAdditionalExplicitAssemblyReferences>false</AddAdditionalExplicitAssemblyReferences>",
    );
    out.line("    <ImplicitlyExpandNETStandardFacades>false</ImplicitlyExpandNETStandardFacades>");
    out.line("    <ImplicitlyExpandDesignTimeFacades>false</ImplicitlyExpandDesignTimeFacades>");
    out.line("  </PropertyGroup>");

    if let Some(ruleset) = input.ruleset_path {
        out.line("  <PropertyGroup>");
        out.line(format!(
            "    <CodeAnalysisRuleSet>{}</CodeAnalysisRuleSet>",
            ctx.paths.hint_path(ruleset)
        ));
        out.line("  </PropertyGroup>");
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

    out.line("  <ItemGroup>");
}

fn footer(out: &mut TextBuilder) {
    out.line("  </ItemGroup>");
    out.line(r#"  <Import Project="$(MSBuildToolsPath)\Microsoft.CSharp.targets" />"#);
    out.line(
        "  <!-- To modify your build process, add your task inside one of the targets below and uncomment it.",
    );
    out.line("       Other similar extension points exist, see Microsoft.Common.targets.");
    out.line(r#"  <Target Name="BeforeBuild">"#);
    out.line("  </Target>");
    out.line(r#"  <Target Name="AfterBuild">"#);
    out.line("  </Target>");
    out.line("  -->");
    out.line("</Project>");
}
