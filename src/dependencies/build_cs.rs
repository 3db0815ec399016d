//! `<Module>.Build.cs` rules-file scraper.

use std::fs;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Dependencies, DependencyKind};

static RE_PUBLIC: Lazy<Regex> = Lazy::new(|| dependency_pattern(DependencyKind::Public));
static RE_PRIVATE: Lazy<Regex> = Lazy::new(|| dependency_pattern(DependencyKind::Private));
static RE_DYNAMIC: Lazy<Regex> = Lazy::new(|| dependency_pattern(DependencyKind::Dynamic));

static RE_STRING_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]+)""#).unwrap());

static RE_MODULE_RULES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"public\s+class\s+([A-Za-z0-9_]+)\s*:\s*ModuleRules").unwrap());

// Field.AddRange(new string[] { ... }) or Field.Add("Name")
fn dependency_pattern(kind: DependencyKind) -> Regex {
    Regex::new(&format!(
        r#"{}\.(?:AddRange\s*\(\s*new\s+string\[\]\s*\{{([^}}]+)\}}|Add\s*\(\s*"([^"]+)"\s*\))"#,
        kind.rules_field()
    ))
    .unwrap()
}

fn pattern_for(kind: DependencyKind) -> &'static Regex {
    match kind {
        DependencyKind::Public => &RE_PUBLIC,
        DependencyKind::Private => &RE_PRIVATE,
        DependencyKind::Dynamic => &RE_DYNAMIC,
    }
}

/// Reads dependencies out of a Build.cs file.
pub struct BuildCsParser {
    path: PathBuf,
}

impl BuildCsParser {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parses the rules file. A file that cannot be read yields empty
    /// dependencies and a warning; it never fails the caller.
    pub fn parse_dependencies(&self) -> Dependencies {
        match fs::read_to_string(&self.path) {
            Ok(content) => Self::parse_content(&content),
            Err(e) => {
                tracing::warn!("Error reading {}: {}", self.path.display(), e);
                Dependencies::default()
            }
        }
    }

    /// Parses rules-file text.
    pub fn parse_content(content: &str) -> Dependencies {
        let mut deps = Dependencies::default();

        for kind in DependencyKind::ALL {
            for caps in pattern_for(kind).captures_iter(content) {
                if let Some(range) = caps.get(1) {
                    for name in Self::parse_string_array(range.as_str()) {
                        deps.push(kind, name);
                    }
                } else if let Some(single) = caps.get(2) {
                    deps.push(kind, single.as_str());
                }
            }
        }

        deps
    }

    /// Module name declared by `public class X : ModuleRules`.
    pub fn module_name(content: &str) -> Option<String> {
        RE_MODULE_RULES
            .captures(content)
            .map(|caps| caps[1].to_string())
    }

    fn parse_string_array(content: &str) -> Vec<String> {
        RE_STRING_LITERAL
            .captures_iter(content)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const RULES: &str = r#"
using UnrealBuildTool;

public class Engine : ModuleRules
{
    public Engine(ReadOnlyTargetRules Target) : base(Target)
    {
        PublicDependencyModuleNames.AddRange(
            new string[] {
                "Core",
                "CoreUObject",
                "NetCore",
            }
        );

        PrivateDependencyModuleNames.AddRange(new string[] { "Json", "Slate" });
        PrivateDependencyModuleNames.Add("Json");
        PublicDependencyModuleNames.Add("Core");

        DynamicallyLoadedModuleNames.Add("Renderer");
    }
}
"#;

    #[test]
    fn test_parse_add_range_and_add() {
        let deps = BuildCsParser::parse_content(RULES);
        assert_eq!(deps.public, vec!["Core", "CoreUObject", "NetCore"]);
        assert_eq!(deps.private, vec!["Json", "Slate"]);
        assert_eq!(deps.dynamic, vec!["Renderer"]);
    }

    #[test]
    fn test_module_name() {
        assert_eq!(BuildCsParser::module_name(RULES), Some("Engine".to_string()));
        assert_eq!(BuildCsParser::module_name("class Foo {}"), None);
    }

    #[test]
    fn test_empty_content() {
        assert!(BuildCsParser::parse_content("").is_empty());
    }

    #[test]
    fn test_unreadable_file_yields_empty() {
        let temp_dir = TempDir::new().unwrap();
        let parser = BuildCsParser::new(temp_dir.path().join("Missing.Build.cs"));
        assert!(parser.parse_dependencies().is_empty());
    }

    #[test]
    fn test_parse_file_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Engine.Build.cs");
        std::fs::write(&path, RULES).unwrap();

        let deps = BuildCsParser::new(&path).parse_dependencies();
        assert_eq!(deps.total(), 6);
    }
}
