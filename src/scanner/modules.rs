//! Module discovery.
//!
//! A module is a directory `<Name>` holding a `<Name>.Build.cs` rules file and
//! at least one of `Public/` or `Private/`. Engine modules live one level below
//! a category directory (`Runtime`, `Editor`, ...); plugin modules may sit at
//! any depth under the plugins root.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{DocGenError, Result};

use super::paths::module_display_path;

/// Category assigned to every module found under the plugins root
pub const PLUGINS_CATEGORY: &str = "Plugins";

const BUILD_CS_SUFFIX: &str = ".Build.cs";

/// A discovered module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInfo {
    pub name: String,
    /// Display path (`Engine/Source/Runtime/Core` style)
    pub path: String,
    pub category: String,
    pub build_cs_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_dir: Option<PathBuf>,
}

/// Directory-name exclusion list. Entries are glob patterns; a plain name
/// matches itself.
#[derive(Debug, Clone, Default)]
pub struct ExcludeList {
    patterns: Vec<Pattern>,
}

impl ExcludeList {
    pub fn new(entries: &[String]) -> Result<Self> {
        let patterns = entries
            .iter()
            .map(|entry| {
                Pattern::new(entry).map_err(|e| {
                    DocGenError::Config(format!("Invalid exclude pattern '{}': {}", entry, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(dir_name))
    }
}

/// Finds modules under an engine source root and, optionally, a plugins root.
pub struct ModuleScanner {
    source_dir: PathBuf,
    categories: Vec<String>,
    exclude: ExcludeList,
}

impl ModuleScanner {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        categories: Vec<String>,
        exclude_dirs: &[String],
    ) -> Result<Self> {
        Ok(Self {
            source_dir: source_dir.into(),
            categories,
            exclude: ExcludeList::new(exclude_dirs)?,
        })
    }

    /// Scans every configured category in order. Missing category
    /// directories are skipped, unreadable ones are logged.
    pub fn scan(&self) -> Vec<ModuleInfo> {
        let mut modules = Vec::new();

        for category in &self.categories {
            let category_path = self.source_dir.join(category);
            if !category_path.is_dir() {
                tracing::debug!("Category directory {} not found", category_path.display());
                continue;
            }

            match self.scan_category(&category_path, category) {
                Ok(found) => modules.extend(found),
                Err(e) => tracing::warn!("Error scanning category {}: {}", category, e),
            }
        }

        modules
    }

    fn scan_category(&self, category_path: &Path, category: &str) -> Result<Vec<ModuleInfo>> {
        let mut entries: Vec<_> = fs::read_dir(category_path)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .collect();
        entries.sort_by_key(|entry| entry.file_name());

        let mut modules = Vec::new();
        for entry in entries {
            let dir_name = entry.file_name().to_string_lossy().to_string();
            if self.exclude.is_excluded(&dir_name) {
                continue;
            }

            let module_dir = entry.path();
            let build_cs_path = module_dir.join(format!("{}{}", dir_name, BUILD_CS_SUFFIX));
            if !build_cs_path.is_file() {
                continue;
            }

            if let Some(module) = self.module_info(&module_dir, &dir_name, category, build_cs_path)
            {
                modules.push(module);
            }
        }

        Ok(modules)
    }

    /// Finds plugin modules: any `<Name>/<Name>.Build.cs` below `plugins_dir`.
    /// Excluded directory names are not descended into.
    pub fn scan_plugins(&self, plugins_dir: &Path) -> Vec<ModuleInfo> {
        let mut modules = Vec::new();

        if !plugins_dir.is_dir() {
            tracing::warn!("Plugins directory {} not found", plugins_dir.display());
            return modules;
        }

        let walker = WalkDir::new(plugins_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !self.exclude.is_excluded(&entry.file_name().to_string_lossy())
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Error scanning plugins: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            let Some(name) = file_name.strip_suffix(BUILD_CS_SUFFIX) else {
                continue;
            };
            let Some(module_dir) = entry.path().parent() else {
                continue;
            };
            if module_dir.file_name().map_or(true, |dir| dir != name) {
                continue;
            }

            if let Some(module) = self.module_info(
                module_dir,
                name,
                PLUGINS_CATEGORY,
                entry.path().to_path_buf(),
            ) {
                modules.push(module);
            }
        }

        modules
    }

    fn module_info(
        &self,
        module_dir: &Path,
        name: &str,
        category: &str,
        build_cs_path: PathBuf,
    ) -> Option<ModuleInfo> {
        let public_dir = module_dir.join("Public");
        let private_dir = module_dir.join("Private");

        // Some modules only have Private; neither means nothing to document.
        if !public_dir.is_dir() && !private_dir.is_dir() {
            return None;
        }

        Some(ModuleInfo {
            name: name.to_string(),
            path: module_display_path(module_dir, &self.source_dir),
            category: category.to_string(),
            build_cs_path,
            public_dir: public_dir.is_dir().then_some(public_dir),
            private_dir: private_dir.is_dir().then_some(private_dir),
        })
    }

    /// Module count per configured category, in category order.
    pub fn category_counts(&self, modules: &[ModuleInfo]) -> Vec<(String, usize)> {
        self.categories
            .iter()
            .map(|category| {
                let count = modules.iter().filter(|m| &m.category == category).count();
                (category.clone(), count)
            })
            .collect()
    }
}
