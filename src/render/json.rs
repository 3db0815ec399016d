//! Machine-readable output under `<out>/data/`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{iso_timestamp, ModuleData};
use crate::dependencies::Dependencies;
use crate::error::Result;
use crate::extract::{ClassRecord, EnumRecord, FunctionRecord, StructRecord};

pub const DATA_DIR: &str = "data";
pub const MODULES_INDEX_FILE: &str = "modules.json";
pub const API_INDEX_FILE: &str = "api-index.json";

#[derive(Serialize)]
struct ModulesIndex<'a> {
    version: &'a str,
    generated_at: String,
    module_count: usize,
    modules: Vec<ModuleSummary<'a>>,
}

#[derive(Serialize)]
struct ModuleSummary<'a> {
    name: &'a str,
    path: &'a str,
    category: &'a str,
    dependencies: &'a Dependencies,
    class_count: usize,
    function_count: usize,
    enum_count: usize,
    struct_count: usize,
}

#[derive(Serialize, Default)]
struct ApiIndex<'a> {
    version: &'a str,
    generated_at: String,
    classes: Vec<ClassEntry<'a>>,
    functions: Vec<FunctionEntry<'a>>,
    enums: Vec<NamedEntry<'a>>,
    structs: Vec<NamedEntry<'a>>,
}

#[derive(Serialize)]
struct ClassEntry<'a> {
    name: &'a str,
    module: &'a str,
    base_classes: &'a [String],
    file_path: &'a str,
}

#[derive(Serialize)]
struct FunctionEntry<'a> {
    name: &'a str,
    module: &'a str,
    return_type: &'a str,
    file_path: &'a str,
}

#[derive(Serialize)]
struct NamedEntry<'a> {
    name: &'a str,
    module: &'a str,
    file_path: &'a str,
}

#[derive(Serialize)]
struct ModuleFile<'a> {
    version: &'a str,
    generated_at: String,
    module: ModulePayload<'a>,
}

#[derive(Serialize)]
struct ModulePayload<'a> {
    name: &'a str,
    path: &'a str,
    category: &'a str,
    dependencies: &'a Dependencies,
    classes: &'a [ClassRecord],
    functions: &'a [FunctionRecord],
    enums: &'a [EnumRecord],
    structs: &'a [StructRecord],
}

pub struct JsonGenerator {
    data_dir: PathBuf,
    engine_version: String,
    generated_at: DateTime<Utc>,
}

impl JsonGenerator {
    pub fn new(output_dir: &Path, engine_version: impl Into<String>) -> Self {
        Self {
            data_dir: output_dir.join(DATA_DIR),
            engine_version: engine_version.into(),
            generated_at: Utc::now(),
        }
    }

    /// Pins the `generated_at` stamp written into every file
    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self
    }

    pub fn generate_modules_index(&self, modules: &[ModuleData]) -> Result<PathBuf> {
        let index = ModulesIndex {
            version: &self.engine_version,
            generated_at: iso_timestamp(self.generated_at),
            module_count: modules.len(),
            modules: modules
                .iter()
                .map(|m| ModuleSummary {
                    name: &m.name,
                    path: &m.path,
                    category: &m.category,
                    dependencies: &m.dependencies,
                    class_count: m.classes.len(),
                    function_count: m.functions.len(),
                    enum_count: m.enums.len(),
                    struct_count: m.structs.len(),
                })
                .collect(),
        };
        self.write(MODULES_INDEX_FILE, &index)
    }

    /// Flat cross-module lookup table, in module order then record order
    pub fn generate_api_index(&self, modules: &[ModuleData]) -> Result<PathBuf> {
        let mut index = ApiIndex {
            version: &self.engine_version,
            generated_at: iso_timestamp(self.generated_at),
            ..Default::default()
        };

        for module in modules {
            let module_name = module.name.as_str();
            index.classes.extend(module.classes.iter().map(|c| ClassEntry {
                name: &c.name,
                module: module_name,
                base_classes: &c.base_classes,
                file_path: &c.file_path,
            }));
            index.functions.extend(module.functions.iter().map(|f| FunctionEntry {
                name: &f.name,
                module: module_name,
                return_type: &f.return_type,
                file_path: &f.file_path,
            }));
            index.enums.extend(module.enums.iter().map(|e| NamedEntry {
                name: &e.name,
                module: module_name,
                file_path: &e.file_path,
            }));
            index.structs.extend(module.structs.iter().map(|s| NamedEntry {
                name: &s.name,
                module: module_name,
                file_path: &s.file_path,
            }));
        }

        self.write(API_INDEX_FILE, &index)
    }

    pub fn generate_module_data(&self, module: &ModuleData) -> Result<PathBuf> {
        let file = ModuleFile {
            version: &self.engine_version,
            generated_at: iso_timestamp(self.generated_at),
            module: ModulePayload {
                name: &module.name,
                path: &module.path,
                category: &module.category,
                dependencies: &module.dependencies,
                classes: &module.classes,
                functions: &module.functions,
                enums: &module.enums,
                structs: &module.structs,
            },
        };
        self.write(&format!("{}.json", module.name), &file)
    }

    fn write<T: Serialize>(&self, file_name: &str, value: &T) -> Result<PathBuf> {
        fs::create_dir_all(&self.data_dir)?;
        let path = self.data_dir.join(file_name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)?;
        tracing::debug!("Wrote {}", path.display());
        Ok(path)
    }
}
