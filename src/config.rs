//! Generator configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! command-line overrides.
//!
//! ```yaml
//! source_dir: /opt/UE5/Engine/Source
//! plugins_dir: /opt/UE5/Engine/Plugins
//! output_dir: docs/ue5-api
//! engine_version: "5.1"
//! module_categories: [Runtime, Editor]
//! exclude_dirs: [ThirdParty, "*Tests"]
//! formats: [markdown, json]
//! incremental: true
//! parallel_threads: 8
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocGenError, Result};

/// Output renderer selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Markdown,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine source root holding the category directories
    pub source_dir: PathBuf,
    /// Optional plugins root scanned recursively for modules
    pub plugins_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub engine_version: String,
    /// Category directories to scan, in output order
    pub module_categories: Vec<String>,
    /// Directory names (glob patterns) never treated as modules
    pub exclude_dirs: Vec<String>,
    pub formats: Vec<OutputFormat>,
    /// Skip re-rendering modules whose extracted data did not change
    pub incremental: bool,
    /// Worker threads for the rendering stage
    pub parallel_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("Engine/Source"),
            plugins_dir: None,
            output_dir: PathBuf::from("docs/ue5-api"),
            engine_version: "5.1".to_string(),
            module_categories: vec![
                "Runtime".to_string(),
                "Editor".to_string(),
                "Developer".to_string(),
                "Programs".to_string(),
            ],
            exclude_dirs: vec!["ThirdParty".to_string()],
            formats: vec![OutputFormat::Markdown, OutputFormat::Json],
            incremental: true,
            parallel_threads: 4,
        }
    }
}

/// Command-line values that take precedence over file and defaults
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub source_dir: Option<PathBuf>,
    pub plugins_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub engine_version: Option<String>,
    pub module_categories: Option<Vec<String>>,
    pub exclude_dirs: Option<Vec<String>>,
    pub formats: Option<Vec<OutputFormat>>,
    pub incremental: Option<bool>,
    pub parallel_threads: Option<usize>,
}

impl Config {
    /// Defaults, replaced field by field by the YAML file when one is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_yaml(&fs::read_to_string(path)?)?,
            None => Self::default(),
        };
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(v) = overrides.source_dir {
            self.source_dir = v;
        }
        if let Some(v) = overrides.plugins_dir {
            self.plugins_dir = Some(v);
        }
        if let Some(v) = overrides.output_dir {
            self.output_dir = v;
        }
        if let Some(v) = overrides.engine_version {
            self.engine_version = v;
        }
        if let Some(v) = overrides.module_categories {
            self.module_categories = v;
        }
        if let Some(v) = overrides.exclude_dirs {
            self.exclude_dirs = v;
        }
        if let Some(v) = overrides.formats {
            self.formats = v;
        }
        if let Some(v) = overrides.incremental {
            self.incremental = v;
        }
        if let Some(v) = overrides.parallel_threads {
            self.parallel_threads = v;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.module_categories.is_empty() {
            return Err(DocGenError::Config(
                "at least one module category is required".to_string(),
            ));
        }
        if self.formats.is_empty() {
            return Err(DocGenError::Config(
                "at least one output format is required".to_string(),
            ));
        }
        if self.parallel_threads == 0 {
            return Err(DocGenError::Config(
                "parallel_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn wants(&self, format: OutputFormat) -> bool {
        self.formats.contains(&format)
    }
}
