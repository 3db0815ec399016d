//! Documentation renderers.
//!
//! Renderers consume [`ModuleData`] aggregates and write files; they never
//! look at source text. Record field names and text are written verbatim.

pub mod examples;
pub mod json;
pub mod markdown;
pub mod practices;

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::dependencies::Dependencies;
use crate::extract::{ClassRecord, DeclarationSet, EnumRecord, FunctionRecord, StructRecord};
use crate::scanner::ModuleInfo;

pub use examples::{Example, ExampleExtractor};
pub use json::JsonGenerator;
pub use markdown::MarkdownGenerator;
pub use practices::{BestPractice, BestPracticesExtractor};

/// Everything known about one module once extraction is done
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleData {
    pub name: String,
    pub path: String,
    pub category: String,
    pub dependencies: Dependencies,
    pub classes: Vec<ClassRecord>,
    pub functions: Vec<FunctionRecord>,
    pub enums: Vec<EnumRecord>,
    pub structs: Vec<StructRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ModuleData {
    pub fn new(info: &ModuleInfo, dependencies: Dependencies, declarations: DeclarationSet) -> Self {
        Self {
            name: info.name.clone(),
            path: info.path.clone(),
            category: info.category.clone(),
            dependencies,
            classes: declarations.classes,
            functions: declarations.functions,
            enums: declarations.enums,
            structs: declarations.structs,
            description: None,
        }
    }

    pub fn declaration_count(&self) -> usize {
        self.classes.len() + self.functions.len() + self.enums.len() + self.structs.len()
    }
}

/// `2024-01-31T08:15:00.000Z`, the timestamp format used in JSON output
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Local wall-clock time for human-readable output
pub fn display_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}
