use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::pipeline::progress::StageSummary;
use crate::render::display_timestamp;

pub const REPORT_FILE: &str = "generation_report.txt";

/// Warnings printed to the console; the report file keeps all of them
pub const CONSOLE_WARNING_LIMIT: usize = 10;

/// Outcome of a generation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    pub engine_version: String,
    pub output_dir: PathBuf,
    pub modules_found: usize,
    /// Modules whose declarations were extracted
    pub modules_processed: usize,
    /// Modules whose documents were written this run
    pub modules_rendered: usize,
    /// Modules skipped because their fingerprint did not change
    pub modules_unchanged: usize,
    pub files_parsed: usize,
    pub declarations: usize,
    /// Extraction and rendering totals, in run order
    pub stages: Vec<StageSummary>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl GenerationReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("{}", message);
        self.errors.push(message);
    }

    pub fn render_text(&self, at: DateTime<Utc>) -> String {
        let mut content = format!(
            "UE API Documentation Generation Report\n\
             Generated: {}\n\
             Engine Version: {}\n\
             Modules found: {}\n\
             Modules processed: {}\n\
             Modules rendered: {}\n\
             Modules unchanged: {}\n\
             Headers parsed: {}\n\
             Declarations: {}\n\
             Warnings: {}\n\
             Errors: {}\n\n",
            display_timestamp(at),
            self.engine_version,
            self.modules_found,
            self.modules_processed,
            self.modules_rendered,
            self.modules_unchanged,
            self.files_parsed,
            self.declarations,
            self.warnings.len(),
            self.errors.len(),
        );

        if !self.stages.is_empty() {
            content.push_str("Stages:\n");
            for stage in &self.stages {
                content.push_str(&format!(
                    "  {}: {} modules, {} failed, {} declarations in {:.2}s\n",
                    stage.stage,
                    stage.modules,
                    stage.failures,
                    stage.declarations,
                    stage.elapsed.as_secs_f64()
                ));
            }
            content.push('\n');
        }

        if !self.warnings.is_empty() {
            content.push_str("Warnings:\n");
            for warning in &self.warnings {
                content.push_str(&format!("  - {}\n", warning));
            }
            content.push('\n');
        }
        if !self.errors.is_empty() {
            content.push_str("Errors:\n");
            for error in &self.errors {
                content.push_str(&format!("  - {}\n", error));
            }
        }
        content
    }

    pub fn write(&self, output_dir: &Path, at: DateTime<Utc>) -> Result<PathBuf> {
        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(REPORT_FILE);
        fs::write(&path, self.render_text(at))?;
        Ok(path)
    }

    /// Console summary printed after a run
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "=".repeat(50),
            "Generation complete".to_string(),
            "=".repeat(50),
            format!("Output: {}", self.output_dir.display()),
            format!(
                "Modules: {} processed, {} rendered, {} unchanged",
                self.modules_processed, self.modules_rendered, self.modules_unchanged
            ),
            format!(
                "Declarations: {} from {} headers in {:.2}s",
                self.declarations,
                self.files_parsed,
                self.elapsed.as_secs_f64()
            ),
        ];

        if !self.warnings.is_empty() {
            lines.push(format!("Warnings ({}):", self.warnings.len()));
            for warning in self.warnings.iter().take(CONSOLE_WARNING_LIMIT) {
                lines.push(format!("  - {}", warning));
            }
            if self.warnings.len() > CONSOLE_WARNING_LIMIT {
                lines.push(format!(
                    "  ... {} more, see {}",
                    self.warnings.len() - CONSOLE_WARNING_LIMIT,
                    REPORT_FILE
                ));
            }
        }
        if !self.errors.is_empty() {
            lines.push(format!("Errors ({}):", self.errors.len()));
            for error in &self.errors {
                lines.push(format!("  - {}", error));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn report() -> GenerationReport {
        GenerationReport {
            engine_version: "5.1".to_string(),
            modules_found: 3,
            modules_processed: 2,
            modules_rendered: 2,
            declarations: 40,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_text_without_issues() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let text = report().render_text(at);
        assert!(text.starts_with("UE API Documentation Generation Report\n"));
        assert!(text.contains("Engine Version: 5.1\n"));
        assert!(text.contains("Modules processed: 2\n"));
        assert!(text.contains("Warnings: 0\nErrors: 0\n"));
        assert!(!text.contains("Warnings:\n"));
    }

    #[test]
    fn test_render_text_lists_issues() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut report = report();
        report.warnings.push("module Foo failed".to_string());
        report.errors.push("index failed".to_string());

        let text = report.render_text(at);
        assert!(text.contains("Warnings:\n  - module Foo failed\n"));
        assert!(text.contains("Errors:\n  - index failed\n"));
        assert!(report.has_errors());
    }

    #[test]
    fn test_render_text_lists_stages() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut report = report();
        report.stages.push(StageSummary {
            stage: "Extracting".to_string(),
            modules: 3,
            failures: 1,
            declarations: 40,
            elapsed: Duration::from_millis(1500),
        });

        let text = report.render_text(at);
        assert!(text.contains("Stages:\n  Extracting: 3 modules, 1 failed, 40 declarations in 1.50s\n"));
    }

    #[test]
    fn test_summary_truncates_warnings() {
        let mut report = report();
        report.warnings = (0..12).map(|i| format!("warning {}", i)).collect();
        let summary = report.summary();
        assert!(summary.contains("Warnings (12):"));
        assert!(summary.contains("  - warning 9"));
        assert!(!summary.contains("  - warning 10"));
        assert!(summary.contains("... 2 more"));
    }

    #[test]
    fn test_write() {
        let temp = TempDir::new().unwrap();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let path = report().write(temp.path(), at).unwrap();
        assert_eq!(path, temp.path().join(REPORT_FILE));
        assert!(fs::read_to_string(path).unwrap().contains("Declarations: 40"));
    }
}
