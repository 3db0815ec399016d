//! Integration tests for end-to-end documentation generation.
//!
//! Each test builds a small engine tree in a temp directory, runs the
//! generator, and inspects the written Markdown and JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;
use walkdir::WalkDir;

use ue_api_docs::{Config, DocGenError, GenerationReport, Generator, OutputFormat};

fn create_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Engine tree with three source modules, one plugin module and excluded
/// third-party code. Returns a config pointing at it.
fn create_engine(root: &Path) -> Config {
    create_file(
        root,
        "Engine/Source/Runtime/Core/Core.Build.cs",
        r#"public class Core : ModuleRules
{
    public Core(ReadOnlyTargetRules Target) : base(Target)
    {
        PrivateDependencyModuleNames.Add("BuildSettings");
    }
}"#,
    );
    create_file(
        root,
        "Engine/Source/Runtime/Core/Public/Misc/Guid.h",
        "struct CORE_API FGuid\n{\n};\n\nCORE_API uint32 GetTypeHash(const FGuid& Guid);\n",
    );

    create_file(
        root,
        "Engine/Source/Runtime/Engine/Engine.Build.cs",
        r#"public class Engine : ModuleRules
{
    public Engine(ReadOnlyTargetRules Target) : base(Target)
    {
        PublicDependencyModuleNames.AddRange(new string[] { "Core", "CoreUObject" });
        PrivateDependencyModuleNames.AddRange(new string[] { "Slate" });
    }
}"#,
    );
    create_file(
        root,
        "Engine/Source/Runtime/Engine/Public/GameFramework/Actor.h",
        "class ENGINE_API AActor : public UObject\n{\n};\n\nenum EEndPlayReason\n{\n\tDestroyed,\n\tQuit = 4\n};\n",
    );

    create_file(root, "Engine/Source/Runtime/ThirdParty/ThirdParty.Build.cs", "");
    create_file(root, "Engine/Source/Runtime/ThirdParty/Public/zlib.h", "class FZlib\n{\n};\n");

    create_file(
        root,
        "Engine/Source/Editor/UnrealEd/UnrealEd.Build.cs",
        r#"DynamicallyLoadedModuleNames.Add("AssetTools");"#,
    );
    create_file(
        root,
        "Engine/Source/Editor/UnrealEd/Public/EditorModeManager.h",
        "class UNREALED_API FEditorModeManager\n{\npublic:\n\tstatic FEditorModeManager& Get();\n};\n",
    );

    create_file(root, "Engine/Plugins/2D/Paper2D/Source/Paper2D/Paper2D.Build.cs", "");
    create_file(
        root,
        "Engine/Plugins/2D/Paper2D/Source/Paper2D/Public/PaperSprite.h",
        "class PAPER2D_API UPaperSprite : public UObject\n{\n};\n",
    );
    create_file(root, "Engine/Plugins/Vendor/ThirdParty/Lib/Lib.Build.cs", "");
    create_file(root, "Engine/Plugins/Vendor/ThirdParty/Lib/Public/Lib.h", "");

    Config {
        source_dir: root.join("Engine/Source"),
        plugins_dir: Some(root.join("Engine/Plugins")),
        output_dir: root.join("docs"),
        parallel_threads: 2,
        ..Config::default()
    }
}

fn run(config: Config) -> GenerationReport {
    Generator::new(config).run().expect("generation failed")
}

fn read_json(path: PathBuf) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ============================================================================
// Discovery
// ============================================================================

mod discovery {
    use super::*;

    #[test]
    fn test_modules_in_category_order_then_plugins() {
        let temp_dir = TempDir::new().unwrap();
        let config = create_engine(temp_dir.path());
        let modules = Generator::new(config).scan_modules().unwrap();

        let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Core", "Engine", "UnrealEd", "Paper2D"]);
        assert_eq!(modules[0].path, "Engine/Source/Runtime/Core");
        assert_eq!(modules[2].category, "Editor");
        assert_eq!(modules[3].category, "Plugins");
        assert_eq!(modules[3].path, "Engine/Plugins/2D/Paper2D/Source/Paper2D");
    }

    #[test]
    fn test_missing_source_dir_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            source_dir: temp_dir.path().join("Nope"),
            output_dir: temp_dir.path().join("docs"),
            ..Config::default()
        };
        let err = Generator::new(config).run().unwrap_err();
        assert!(matches!(err, DocGenError::SourceNotFound(_)));
        assert!(!temp_dir.path().join("docs").exists());
    }
}

// ============================================================================
// Generated output
// ============================================================================

mod output {
    use super::*;

    #[test]
    fn test_report_counts() {
        let temp_dir = TempDir::new().unwrap();
        let report = run(create_engine(temp_dir.path()));

        assert_eq!(report.modules_found, 4);
        assert_eq!(report.modules_processed, 4);
        assert_eq!(report.modules_rendered, 4);
        assert_eq!(report.files_parsed, 4);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert!(!report.has_errors());

        let text = fs::read_to_string(temp_dir.path().join("docs/generation_report.txt")).unwrap();
        assert!(text.contains("Modules processed: 4"));
    }

    #[test]
    fn test_modules_json() {
        let temp_dir = TempDir::new().unwrap();
        run(create_engine(temp_dir.path()));

        let json = read_json(temp_dir.path().join("docs/data/modules.json"));
        assert_eq!(json["version"], "5.1");
        assert_eq!(json["module_count"], 4);

        let engine = &json["modules"][1];
        assert_eq!(engine["name"], "Engine");
        assert_eq!(engine["path"], "Engine/Source/Runtime/Engine");
        assert_eq!(engine["dependencies"]["public"], serde_json::json!(["Core", "CoreUObject"]));
        assert_eq!(engine["dependencies"]["private"], serde_json::json!(["Slate"]));
        assert_eq!(engine["class_count"], 1);
        assert_eq!(engine["enum_count"], 1);

        let unreal_ed = &json["modules"][2];
        assert_eq!(unreal_ed["dependencies"]["dynamic"], serde_json::json!(["AssetTools"]));
    }

    #[test]
    fn test_api_index_and_module_file() {
        let temp_dir = TempDir::new().unwrap();
        run(create_engine(temp_dir.path()));

        let index = read_json(temp_dir.path().join("docs/data/api-index.json"));
        let classes: Vec<_> = index["classes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| (c["name"].as_str().unwrap(), c["module"].as_str().unwrap()))
            .collect();
        assert_eq!(
            classes,
            vec![
                ("AActor", "Engine"),
                ("FEditorModeManager", "UnrealEd"),
                ("UPaperSprite", "Paper2D"),
            ]
        );
        assert_eq!(index["functions"][0]["name"], "GetTypeHash");
        assert_eq!(index["functions"][0]["return_type"], "CORE_API uint32");

        let core = read_json(temp_dir.path().join("docs/data/Core.json"));
        assert_eq!(core["module"]["structs"][0]["name"], "FGuid");
        assert_eq!(
            core["module"]["structs"][0]["filePath"],
            "Engine/Source/Runtime/Core/Public/Misc/Guid.h"
        );

        let engine = read_json(temp_dir.path().join("docs/data/Engine.json"));
        let values = &engine["module"]["enums"][0]["values"];
        assert_eq!(values[0]["name"], "Destroyed");
        assert_eq!(values[1]["value"], "4");
    }

    #[test]
    fn test_markdown_pages() {
        let temp_dir = TempDir::new().unwrap();
        run(create_engine(temp_dir.path()));
        let docs = temp_dir.path().join("docs");

        let index = fs::read_to_string(docs.join("index.md")).unwrap();
        assert!(index.contains("- [Core](modules/Core/overview.md)"));
        assert!(index.contains("### Plugins Modules\n\n- [Paper2D](modules/Paper2D/overview.md)"));
        assert!(docs.join("README.md").is_file());

        let api = fs::read_to_string(docs.join("modules/Core/api.md")).unwrap();
        assert!(api.contains("uint32 GetTypeHash(const FGuid& Guid);"));
        assert!(!api.contains("CORE_API uint32"));

        let practices =
            fs::read_to_string(docs.join("modules/UnrealEd/best-practices.md")).unwrap();
        assert!(practices.contains("### Editor Development"));
        assert!(practices.contains("Use the FEditorModeManager singleton"));

        let examples = fs::read_to_string(docs.join("modules/Paper2D/examples.md")).unwrap();
        assert!(examples.contains("UPaperSprite* Instance = NewObject<UPaperSprite>();"));
    }

    #[test]
    fn test_no_absolute_paths_in_output() {
        let temp_dir = TempDir::new().unwrap();
        run(create_engine(temp_dir.path()));
        let root = temp_dir.path().to_string_lossy().to_string();

        for entry in WalkDir::new(temp_dir.path().join("docs")) {
            let entry = entry.unwrap();
            if entry.file_type().is_file() {
                let content = fs::read_to_string(entry.path()).unwrap();
                assert!(
                    !content.contains(&root),
                    "{} contains an absolute path",
                    entry.path().display()
                );
            }
        }
    }
}

// ============================================================================
// Incremental and format selection
// ============================================================================

mod incremental {
    use super::*;

    #[test]
    fn test_second_run_renders_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let config = create_engine(temp_dir.path());

        run(config.clone());
        let report = run(config);
        assert_eq!(report.modules_rendered, 0);
        assert_eq!(report.modules_unchanged, 4);
        assert!(temp_dir.path().join("docs/data/.fingerprints.json").is_file());
    }

    #[test]
    fn test_deleted_output_is_regenerated() {
        let temp_dir = TempDir::new().unwrap();
        let config = create_engine(temp_dir.path());

        run(config.clone());
        fs::remove_dir_all(temp_dir.path().join("docs/modules/Engine")).unwrap();
        let report = run(config);
        assert_eq!(report.modules_rendered, 1);
        assert!(temp_dir.path().join("docs/modules/Engine/overview.md").is_file());
    }

    #[test]
    fn test_version_change_rerenders_everything() {
        let temp_dir = TempDir::new().unwrap();
        let config = create_engine(temp_dir.path());

        run(config.clone());
        let report = run(Config {
            engine_version: "5.2".to_string(),
            ..config
        });
        assert_eq!(report.modules_rendered, 4);
    }

    #[test]
    fn test_markdown_only() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            formats: vec![OutputFormat::Markdown],
            incremental: false,
            ..create_engine(temp_dir.path())
        };

        run(config);
        let docs = temp_dir.path().join("docs");
        assert!(docs.join("modules/Core/overview.md").is_file());
        assert!(!docs.join("data/Core.json").exists());
        assert!(!docs.join("data/modules.json").exists());
    }
}
