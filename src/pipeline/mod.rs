//! End-to-end documentation generation.
//!
//! Stages: scan modules, extract each module sequentially, render modules on a
//! rayon pool, write indices, write the report. A failing module becomes a
//! warning; a failing index becomes an error.

pub mod fingerprint;
pub mod progress;
pub mod report;

use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use rayon::prelude::*;

use crate::config::{Config, OutputFormat};
use crate::dependencies::BuildCsParser;
use crate::error::{DocGenError, Result};
use crate::render::{JsonGenerator, MarkdownGenerator, ModuleData};
use crate::scanner::{ModuleApiParser, ModuleInfo, ModuleScanner, ParsedApi, PLUGINS_CATEGORY};

pub use fingerprint::FingerprintStore;
pub use progress::{GenerationProgress, StageSummary};
pub use report::GenerationReport;

/// Extracted data for one module plus header statistics
pub struct ProcessedModule {
    pub data: ModuleData,
    pub files_parsed: usize,
    pub skipped: Vec<(std::path::PathBuf, String)>,
}

pub struct Generator {
    config: Config,
    progress: GenerationProgress,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            progress: GenerationProgress::new(),
        }
    }

    pub fn with_progress(mut self, progress: GenerationProgress) -> Self {
        self.progress = progress;
        self
    }

    pub fn scanner(&self) -> Result<ModuleScanner> {
        ModuleScanner::new(
            &self.config.source_dir,
            self.config.module_categories.clone(),
            &self.config.exclude_dirs,
        )
    }

    /// Source modules in category order, then plugin modules.
    pub fn scan_modules(&self) -> Result<Vec<ModuleInfo>> {
        if !self.config.source_dir.is_dir() {
            return Err(DocGenError::SourceNotFound(self.config.source_dir.clone()));
        }

        let scanner = self.scanner()?;
        let mut modules = scanner.scan();
        let mut counts = scanner.category_counts(&modules);

        if let Some(plugins_dir) = &self.config.plugins_dir {
            let plugins = scanner.scan_plugins(plugins_dir);
            if !plugins.is_empty() {
                counts.push((PLUGINS_CATEGORY.to_string(), plugins.len()));
            }
            modules.extend(plugins);
        }

        tracing::info!("Found {} modules", modules.len());
        for (category, count) in &counts {
            tracing::info!("  {}: {} modules", category, count);
        }

        if modules.is_empty() {
            return Err(DocGenError::NoModules(self.config.source_dir.clone()));
        }
        Ok(modules)
    }

    /// Dependencies from the Build.cs file plus declarations from `Public/`.
    pub fn process_module(&self, info: &ModuleInfo) -> Result<ProcessedModule> {
        tracing::debug!("Processing module {} ({})", info.name, info.category);

        let dependencies = BuildCsParser::new(&info.build_cs_path).parse_dependencies();
        let parsed = match &info.public_dir {
            Some(public_dir) => ModuleApiParser::new(public_dir).parse()?,
            None => ParsedApi::default(),
        };

        Ok(ProcessedModule {
            data: ModuleData::new(info, dependencies, parsed.declarations),
            files_parsed: parsed.files_parsed,
            skipped: parsed.skipped,
        })
    }

    pub fn run(&self) -> Result<GenerationReport> {
        let started = Instant::now();
        let output_dir = self.config.output_dir.as_path();
        let mut report = GenerationReport {
            engine_version: self.config.engine_version.clone(),
            output_dir: output_dir.to_path_buf(),
            ..Default::default()
        };

        let modules = self.scan_modules()?;
        report.modules_found = modules.len();

        let all_modules = self.extract_modules(&modules, &mut report);
        tracing::info!("Processed {} modules", all_modules.len());

        self.render_modules(&all_modules, &mut report)?;
        self.render_indices(&all_modules, &mut report);

        report.elapsed = started.elapsed();
        let report_path = report.write(output_dir, Utc::now())?;
        tracing::info!(
            "Generation finished: {} modules, {} warnings, {} errors (report: {})",
            report.modules_processed,
            report.warnings.len(),
            report.errors.len(),
            report_path.display()
        );

        Ok(report)
    }

    fn extract_modules(&self, modules: &[ModuleInfo], report: &mut GenerationReport) -> Vec<ModuleData> {
        self.progress.start("Extracting", modules.len());
        let mut all_modules = Vec::with_capacity(modules.len());

        for info in modules {
            match self.process_module(info) {
                Ok(processed) => {
                    for (file, reason) in &processed.skipped {
                        report.warn(format!("Skipped {}: {}", file.display(), reason));
                    }
                    let count = processed.data.declaration_count();
                    report.files_parsed += processed.files_parsed;
                    report.declarations += count;
                    self.progress.inc(&info.name, count);
                    all_modules.push(processed.data);
                }
                Err(e) => {
                    report.warn(format!("Failed to process module {}: {}", info.name, e));
                    self.progress.inc_error(&info.name);
                }
            }
        }

        report.stages.push(self.progress.finish());
        report.modules_processed = all_modules.len();
        all_modules
    }

    fn render_modules(&self, modules: &[ModuleData], report: &mut GenerationReport) -> Result<()> {
        let output_dir = self.config.output_dir.as_path();
        let mut fingerprints = FingerprintStore::load(
            &output_dir.join(crate::render::json::DATA_DIR),
            &self.render_context(),
        );

        let mut pending = Vec::new();
        for module in modules {
            let fingerprint = FingerprintStore::fingerprint(module)?;
            if self.config.incremental
                && fingerprints.is_unchanged(&module.name, &fingerprint)
                && self.outputs_present(output_dir, &module.name)
            {
                tracing::debug!("{} unchanged, skipping", module.name);
                report.modules_unchanged += 1;
                fingerprints.record(&module.name, fingerprint);
            } else {
                pending.push((module, fingerprint));
            }
        }

        let markdown = MarkdownGenerator::new(
            output_dir,
            self.config.engine_version.as_str(),
            &self.config.module_categories,
        );
        let json = JsonGenerator::new(output_dir, self.config.engine_version.as_str());

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.parallel_threads)
            .build()
            .map_err(|e| DocGenError::Config(format!("Failed to start render pool: {}", e)))?;

        self.progress.start("Rendering", pending.len());
        let results: Vec<_> = pool.install(|| {
            pending
                .par_iter()
                .map(|(module, _)| {
                    let result = self.render_module(module, &markdown, &json);
                    match &result {
                        Ok(()) => self.progress.inc(&module.name, module.declaration_count()),
                        Err(_) => self.progress.inc_error(&module.name),
                    }
                    result
                })
                .collect()
        });
        report.stages.push(self.progress.finish());

        for ((module, fingerprint), result) in pending.into_iter().zip(results) {
            match result {
                Ok(()) => {
                    report.modules_rendered += 1;
                    fingerprints.record(&module.name, fingerprint);
                }
                Err(e) => report.warn(format!("Failed to render module {}: {}", module.name, e)),
            }
        }

        if self.config.incremental {
            if let Err(e) = fingerprints.save() {
                report.warn(format!("Failed to save fingerprints: {}", e));
            }
        }
        Ok(())
    }

    fn render_module(&self, module: &ModuleData, markdown: &MarkdownGenerator, json: &JsonGenerator) -> Result<()> {
        let render_error = |e: DocGenError| DocGenError::Render {
            module: module.name.clone(),
            message: e.to_string(),
        };

        if self.config.wants(OutputFormat::Markdown) {
            markdown.generate_module_docs(module).map_err(render_error)?;
        }
        if self.config.wants(OutputFormat::Json) {
            json.generate_module_data(module).map_err(render_error)?;
        }
        Ok(())
    }

    fn render_indices(&self, modules: &[ModuleData], report: &mut GenerationReport) {
        let output_dir = self.config.output_dir.as_path();
        let version = self.config.engine_version.as_str();

        if self.config.wants(OutputFormat::Markdown) {
            let markdown = MarkdownGenerator::new(output_dir, version, &self.config.module_categories);
            let result = markdown
                .generate_index(modules)
                .and_then(|_| markdown.generate_readme());
            if let Err(e) = result {
                report.error(format!("Failed to generate markdown index: {}", e));
            }
        }

        if self.config.wants(OutputFormat::Json) {
            let json = JsonGenerator::new(output_dir, version);
            let result = json
                .generate_modules_index(modules)
                .and_then(|_| json.generate_api_index(modules));
            if let Err(e) = result {
                report.error(format!("Failed to generate JSON index: {}", e));
            }
        }
    }

    fn render_context(&self) -> String {
        let formats: Vec<_> = self.config.formats.iter().map(|f| f.as_str()).collect();
        format!(
            "{}|{}|{}",
            self.config.engine_version,
            formats.join(","),
            self.config.module_categories.join(",")
        )
    }

    fn outputs_present(&self, output_dir: &Path, module_name: &str) -> bool {
        let markdown = !self.config.wants(OutputFormat::Markdown)
            || output_dir
                .join(crate::render::markdown::MODULES_DIR)
                .join(module_name)
                .join("overview.md")
                .is_file();
        let json = !self.config.wants(OutputFormat::Json)
            || output_dir
                .join(crate::render::json::DATA_DIR)
                .join(format!("{}.json", module_name))
                .is_file();
        markdown && json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_file(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn engine_tree(root: &Path) -> Config {
        let source = root.join("Engine").join("Source");
        create_file(
            &source,
            "Runtime/Core/Core.Build.cs",
            r#"public class Core : ModuleRules {
                PublicDependencyModuleNames.AddRange(new string[] { "TraceLog" });
            }"#,
        );
        create_file(
            &source,
            "Runtime/Core/Public/Misc/Guid.h",
            "struct CORE_API FGuid\n{\n};\nclass CORE_API FGuidHelper : public FNoncopyable\n{\n};\n",
        );
        create_file(&source, "Runtime/Empty/Empty.Build.cs", "");
        create_file(&source, "Runtime/Empty/Private/Empty.cpp", "");

        Config {
            source_dir: source,
            output_dir: root.join("out"),
            parallel_threads: 2,
            ..Config::default()
        }
    }

    #[test]
    fn test_scan_modules_missing_source() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            source_dir: temp.path().join("missing"),
            ..Config::default()
        };
        let err = Generator::new(config).scan_modules().unwrap_err();
        assert!(matches!(err, DocGenError::SourceNotFound(_)));
    }

    #[test]
    fn test_scan_modules_none_found() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("Runtime")).unwrap();
        let config = Config {
            source_dir: temp.path().to_path_buf(),
            ..Config::default()
        };
        let err = Generator::new(config).scan_modules().unwrap_err();
        assert!(matches!(err, DocGenError::NoModules(_)));
    }

    #[test]
    fn test_process_module() {
        let temp = TempDir::new().unwrap();
        let generator = Generator::new(engine_tree(temp.path()));
        let modules = generator.scan_modules().unwrap();
        let core = modules.iter().find(|m| m.name == "Core").unwrap();

        let processed = generator.process_module(core).unwrap();
        assert_eq!(processed.files_parsed, 1);
        assert_eq!(processed.data.dependencies.public, vec!["TraceLog"]);
        assert_eq!(processed.data.structs[0].name, "FGuid");
        assert_eq!(processed.data.classes[0].name, "FGuidHelper");
    }

    #[test]
    fn test_run_writes_outputs() {
        let temp = TempDir::new().unwrap();
        let config = engine_tree(temp.path());
        let out = config.output_dir.clone();

        let report = Generator::new(config).run().unwrap();
        assert_eq!(report.modules_found, 2);
        assert_eq!(report.modules_processed, 2);
        assert_eq!(report.modules_rendered, 2);
        assert!(!report.has_errors());

        let stages: Vec<_> = report.stages.iter().map(|s| (s.stage.as_str(), s.modules)).collect();
        assert_eq!(stages, vec![("Extracting", 2), ("Rendering", 2)]);
        assert_eq!(report.stages[0].declarations, report.declarations);

        assert!(out.join("modules/Core/overview.md").is_file());
        assert!(out.join("modules/Empty/api.md").is_file());
        assert!(out.join("data/Core.json").is_file());
        assert!(out.join("data/modules.json").is_file());
        assert!(out.join("data/api-index.json").is_file());
        assert!(out.join("index.md").is_file());
        assert!(out.join("README.md").is_file());
        assert!(out.join("generation_report.txt").is_file());
    }

    #[test]
    fn test_incremental_run_skips_unchanged() {
        let temp = TempDir::new().unwrap();
        let config = engine_tree(temp.path());

        let first = Generator::new(config.clone()).run().unwrap();
        assert_eq!(first.modules_rendered, 2);

        let second = Generator::new(config.clone()).run().unwrap();
        assert_eq!(second.modules_rendered, 0);
        assert_eq!(second.modules_unchanged, 2);
        assert_eq!(second.stages[1].modules, 0);

        create_file(
            &config.source_dir,
            "Runtime/Core/Public/Misc/Extra.h",
            "enum EExtra\n{\n\tOne,\n};\n",
        );
        let third = Generator::new(config).run().unwrap();
        assert_eq!(third.modules_rendered, 1);
        assert_eq!(third.modules_unchanged, 1);
    }

    #[test]
    fn test_non_incremental_always_renders() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            incremental: false,
            ..engine_tree(temp.path())
        };

        Generator::new(config.clone()).run().unwrap();
        let second = Generator::new(config).run().unwrap();
        assert_eq!(second.modules_rendered, 2);
        assert_eq!(second.modules_unchanged, 0);
    }

    #[test]
    fn test_json_only() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            formats: vec![OutputFormat::Json],
            ..engine_tree(temp.path())
        };
        let out = config.output_dir.clone();

        Generator::new(config).run().unwrap();
        assert!(out.join("data/Core.json").is_file());
        assert!(!out.join("modules").exists());
        assert!(!out.join("index.md").exists());
    }
}
