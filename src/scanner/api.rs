use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::extract::{DeclarationSet, HeaderExtractor};

use super::paths::header_display_path;
use super::walker::HeaderWalker;

/// Declarations of one module plus what happened while reading its headers
#[derive(Debug, Default)]
pub struct ParsedApi {
    pub declarations: DeclarationSet,
    pub files_parsed: usize,
    /// Files that could not be read, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

/// Extracts the public API of a module from its `Public/` directory.
///
/// Headers are read and extracted one at a time in sorted path order, and the
/// per-file sets are concatenated in that order.
pub struct ModuleApiParser {
    public_dir: PathBuf,
    walker: HeaderWalker,
    extractor: HeaderExtractor,
}

impl ModuleApiParser {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
            walker: HeaderWalker::new(),
            extractor: HeaderExtractor::new(),
        }
    }

    pub fn parse(&self) -> Result<ParsedApi> {
        let mut parsed = ParsedApi::default();

        if !self.public_dir.exists() {
            return Ok(parsed);
        }

        for file in self.walker.walk(&self.public_dir)? {
            match self.parse_file(&file) {
                Ok(set) => {
                    parsed.declarations.append(set);
                    parsed.files_parsed += 1;
                }
                Err(e) => {
                    tracing::warn!("Error parsing {}: {}", file.display(), e);
                    parsed.skipped.push((file, e.to_string()));
                }
            }
        }

        Ok(parsed)
    }

    /// Reads and extracts a single header. Invalid UTF-8 is replaced rather
    /// than rejected.
    pub fn parse_file(&self, path: &Path) -> Result<DeclarationSet> {
        let bytes = fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);
        let display_path = header_display_path(path);
        Ok(self.extractor.extract_all(&content, &display_path))
    }
}
