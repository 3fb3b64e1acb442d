//! Solution (aggregate) renderer

use super::TextBuilder;

/// UTF-8 byte-order mark the solution format expects.
pub const BOM: char = '\u{feff}';

const FORMAT_VERSION: &str = "11.00";
const VISUAL_STUDIO_VERSION: &str = "2010";

/// One project listed in the solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionEntry {
    pub name: String,
    pub project_file: String,
    /// Project-type id (C# class library for `.cs` units)
    pub type_id: String,
    pub unit_id: String,
}

/// Render the solution text, BOM included.
///
/// Indentation uses tabs. An empty entry list still yields a valid solution
/// with empty project and configuration sections.
pub fn render_solution(entries: &[SolutionEntry], newline: &'static str) -> String {
    let mut out = TextBuilder::new(newline);
    out.line(BOM.to_string());
    out.line(format!(
        "Microsoft Visual Studio Solution File, Format Version {FORMAT_VERSION}"
    ));
    out.line(format!("# Visual Studio {VISUAL_STUDIO_VERSION}"));

    if entries.is_empty() {
        out.line("");
    }
    for entry in entries {
        out.line(format!(
            "Project(\"{{{}}}\") = \"{}\", \"{}\", \"{{{}}}\"",
            entry.type_id, entry.name, entry.project_file, entry.unit_id
        ));
        out.line("EndProject");
    }

    out.line("Global");
    out.line("\tGlobalSection(SolutionConfigurationPlatforms) = preSolution");
    out.line("\t\tDebug|Any CPU = Debug|Any CPU");
    out.line("\t\tRelease|Any CPU = Release|Any CPU");
    out.line("\tEndGlobalSection");
    out.line("\tGlobalSection(ProjectConfigurationPlatforms) = postSolution");
    if entries.is_empty() {
        out.line("");
    }
    for entry in entries {
        let id = &entry.unit_id;
        out.line(format!("\t\t{{{id}}}.Debug|Any CPU.ActiveCfg = Debug|Any CPU"));
        out.line(format!("\t\t{{{id}}}.Debug|Any CPU.Build.0 = Debug|Any CPU"));
        out.line(format!("\t\t{{{id}}}.Release|Any CPU.ActiveCfg = Release|Any CPU"));
        out.line(format!("\t\t{{{id}}}.Release|Any CPU.Build.0 = Release|Any CPU"));
    }
    out.line("\tEndGlobalSection");
    out.line("\tGlobalSection(SolutionProperties) = preSolution");
    out.line("\t\tHideSolutionNode = FALSE");
    out.line("\tEndGlobalSection");
    out.line("EndGlobal");
    out.finish()
}
