use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use ue_api_docs::config::{Config, ConfigOverrides, OutputFormat};
use ue_api_docs::dependencies::{BuildCsParser, DependencyKind};
use ue_api_docs::error::Result;
use ue_api_docs::extract::DeclarationSet;
use ue_api_docs::pipeline::{GenerationProgress, GenerationReport, Generator};
use ue_api_docs::scanner::{HeaderWalker, ModuleApiParser, ModuleInfo, PLUGINS_CATEGORY};

#[derive(Parser)]
#[command(name = "ue-api-docs")]
#[command(about = "Generate Markdown and JSON API documentation from Unreal-style engine headers")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Generate docs with defaults (Engine/Source -> docs/ue5-api)
    ue-api-docs generate

    # Generate from a specific engine checkout, Runtime and Editor only
    ue-api-docs generate --source-dir /opt/UE5/Engine/Source --categories Runtime Editor

    # Include plugins and force a full re-render
    ue-api-docs generate --plugins-dir /opt/UE5/Engine/Plugins --no-incremental

    # Use a YAML config file
    ue-api-docs --config ue-api-docs.yaml generate

    # List discovered modules
    ue-api-docs scan --format json

    # Extract declarations from one header
    ue-api-docs parse Engine/Source/Runtime/Core/Public/Misc/Guid.h

    # Show a module's dependencies
    ue-api-docs deps Engine/Source/Runtime/Engine/Engine.Build.cs
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate documentation for every discovered module
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Engine version written into the documents
        #[arg(long)]
        engine_version: Option<String>,

        /// Output formats
        #[arg(long, value_enum, value_delimiter = ',')]
        formats: Option<Vec<OutputFormat>>,

        /// Rendering threads
        #[arg(long)]
        threads: Option<usize>,

        /// Only re-render modules whose extracted data changed
        #[arg(long, conflicts_with = "no_incremental")]
        incremental: bool,

        /// Re-render every module
        #[arg(long)]
        no_incremental: bool,
    },

    /// List modules that would be documented
    Scan {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Extract declarations from a header or a directory of headers
    Parse {
        /// Header file or directory
        path: PathBuf,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show the dependencies declared in a Build.cs file
    Deps {
        /// Path to the <Module>.Build.cs file
        build_cs: PathBuf,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Where to look for modules
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Engine source directory holding the category directories
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    /// Plugins directory scanned recursively
    #[arg(long)]
    pub plugins_dir: Option<PathBuf>,

    /// Module categories to scan
    #[arg(long, num_args = 1..)]
    pub categories: Option<Vec<String>>,

    /// Directory names (glob patterns) to skip
    #[arg(long, num_args = 1..)]
    pub exclude_dirs: Option<Vec<String>>,
}

impl SourceArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            source_dir: self.source_dir.clone(),
            plugins_dir: self.plugins_dir.clone(),
            module_categories: self.categories.clone(),
            exclude_dirs: self.exclude_dirs.clone(),
            ..Default::default()
        }
    }
}

impl Commands {
    /// Layers this command's flags over the loaded configuration.
    pub fn resolve_config(&self, config_file: Option<&Path>) -> Result<Config> {
        let overrides = match self {
            Commands::Generate {
                source,
                output_dir,
                engine_version,
                formats,
                threads,
                incremental,
                no_incremental,
            } => ConfigOverrides {
                output_dir: output_dir.clone(),
                engine_version: engine_version.clone(),
                formats: formats.clone(),
                parallel_threads: *threads,
                incremental: match (*incremental, *no_incremental) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
                ..source.overrides()
            },
            Commands::Scan { source, .. } => source.overrides(),
            _ => ConfigOverrides::default(),
        };

        let config = Config::load(config_file)?.with_overrides(overrides);
        config.validate()?;
        Ok(config)
    }
}

pub fn generate(config: Config, show_progress: bool) -> Result<GenerationReport> {
    println!("Source directory: {}", config.source_dir.display());
    if let Some(plugins_dir) = &config.plugins_dir {
        println!("Plugins directory: {}", plugins_dir.display());
    }
    println!("Output directory: {}", config.output_dir.display());
    println!("Engine version: {}", config.engine_version);
    println!("Categories: {}", config.module_categories.join(", "));
    println!();

    let progress = if show_progress {
        GenerationProgress::with_bar()
    } else {
        GenerationProgress::new()
    };
    let report = Generator::new(config).with_progress(progress).run()?;

    println!("{}", report.summary());
    Ok(report)
}

#[derive(Serialize)]
struct ScanOutput<'a> {
    module_count: usize,
    categories: Vec<CategoryCount<'a>>,
    modules: &'a [ModuleInfo],
}

#[derive(Serialize)]
struct CategoryCount<'a> {
    category: &'a str,
    count: usize,
}

pub fn scan_modules(config: Config, format: &str) -> Result<()> {
    let generator = Generator::new(config);
    let modules = generator.scan_modules()?;
    let counts = generator.scanner()?.category_counts(&modules);
    let plugins = modules
        .iter()
        .filter(|m| m.category == PLUGINS_CATEGORY)
        .count();

    let mut categories: Vec<CategoryCount> = counts
        .iter()
        .map(|(category, count)| CategoryCount {
            category: category.as_str(),
            count: *count,
        })
        .collect();
    if plugins > 0 {
        categories.push(CategoryCount {
            category: PLUGINS_CATEGORY,
            count: plugins,
        });
    }

    if format == "json" {
        let output = ScanOutput {
            module_count: modules.len(),
            categories,
            modules: &modules,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Found {} modules:", modules.len());
    for count in &categories {
        println!("  {}: {}", count.category, count.count);
    }
    println!();
    for module in &modules {
        let public = if module.public_dir.is_some() { "" } else { " (no Public/)" };
        println!("{} [{}] {}{}", module.name, module.category, module.path, public);
    }

    Ok(())
}

pub fn parse_headers(path: &Path, format: &str) -> Result<()> {
    let declarations = if path.is_dir() {
        let parsed = ModuleApiParser::new(path).parse()?;
        for (file, reason) in &parsed.skipped {
            eprintln!("Skipped {}: {}", file.display(), reason);
        }
        parsed.declarations
    } else {
        let walker = HeaderWalker::new();
        if !walker.is_supported(path) {
            tracing::warn!("{} is not a .h header, parsing anyway", path.display());
        }
        ModuleApiParser::new(path.parent().unwrap_or(path)).parse_file(path)?
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&declarations)?);
        return Ok(());
    }

    print_declarations(&declarations);
    Ok(())
}

fn print_declarations(declarations: &DeclarationSet) {
    if declarations.is_empty() {
        println!("No declarations found");
        return;
    }

    if !declarations.classes.is_empty() {
        println!("Classes ({}):", declarations.classes.len());
        for class in &declarations.classes {
            if class.base_classes.is_empty() {
                println!("  {}", class.name);
            } else {
                println!("  {} : {}", class.name, class.base_classes.join(", "));
            }
        }
    }

    if !declarations.functions.is_empty() {
        println!("Functions ({}):", declarations.functions.len());
        for func in &declarations.functions {
            let params = func
                .parameters
                .iter()
                .map(|p| format!("{} {}", p.type_name, p.name).trim().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            println!("  {} {}({})", func.return_type, func.name, params);
        }
    }

    if !declarations.enums.is_empty() {
        println!("Enums ({}):", declarations.enums.len());
        for item in &declarations.enums {
            let values: Vec<_> = item.values.iter().map(|v| v.name.as_str()).collect();
            println!("  {} {{ {} }}", item.name, values.join(", "));
        }
    }

    if !declarations.structs.is_empty() {
        println!("Structs ({}):", declarations.structs.len());
        for item in &declarations.structs {
            println!("  {}", item.name);
        }
    }
}

pub fn show_dependencies(build_cs: &Path, format: &str) -> Result<()> {
    let content = fs::read_to_string(build_cs)?;
    let dependencies = BuildCsParser::parse_content(&content);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&dependencies)?);
        return Ok(());
    }

    if let Some(name) = BuildCsParser::module_name(&content) {
        println!("Module: {}", name);
    }
    if dependencies.is_empty() {
        println!("No dependencies found");
        return Ok(());
    }

    for kind in DependencyKind::ALL {
        let names = dependencies.get(kind);
        if names.is_empty() {
            continue;
        }
        println!("{} ({}):", kind.rules_field(), names.len());
        for name in names {
            println!("  {}", name);
        }
    }

    Ok(())
}
