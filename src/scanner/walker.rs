use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Extension of the header files that get scanned
pub const HEADER_EXTENSION: &str = "h";

/// Suffix of reflection-generated headers, which are never scanned
pub const GENERATED_SUFFIX: &str = ".generated.h";

/// Recursively collects header files in sorted path order.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeaderWalker;

impl HeaderWalker {
    pub fn new() -> Self {
        Self
    }

    /// Lists every scannable header under `root`. Directories that cannot be
    /// read are logged and skipped; a missing root yields no files.
    pub fn walk(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        if !root.exists() {
            return Ok(files);
        }

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Error reading directory under {}: {}", root.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            if entry.file_type().is_file() && self.is_supported(path) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    pub fn is_supported(&self, path: &Path) -> bool {
        let is_header = path
            .extension()
            .is_some_and(|ext| ext == HEADER_EXTENSION);
        let is_generated = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(GENERATED_SUFFIX));

        is_header && !is_generated
    }
}
