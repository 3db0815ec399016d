//! Human-readable output: per-module pages under `<out>/modules/` plus the
//! top-level `index.md` and `README.md`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::{display_timestamp, BestPracticesExtractor, ExampleExtractor, ModuleData};
use crate::error::Result;
use crate::extract::{ClassRecord, EnumRecord, FunctionRecord, StructRecord};
use crate::scanner::PLUGINS_CATEGORY;

pub const MODULES_DIR: &str = "modules";
pub const MODULE_PAGES: [&str; 5] = [
    "overview.md",
    "api.md",
    "classes.md",
    "best-practices.md",
    "examples.md",
];

/// api.md lists at most this many functions; the JSON file has the rest
pub const MAX_API_FUNCTIONS: usize = 500;
const MAX_LISTED_MEMBERS: usize = 5;
const STRIPPED_RETURN_MACROS: [&str; 2] = ["CORE_API", "ENGINE_API"];

pub struct MarkdownGenerator {
    output_dir: PathBuf,
    engine_version: String,
    categories: Vec<String>,
    generated_at: DateTime<Utc>,
    examples: ExampleExtractor,
    practices: BestPracticesExtractor,
}

impl MarkdownGenerator {
    pub fn new(output_dir: &Path, engine_version: impl Into<String>, categories: &[String]) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            engine_version: engine_version.into(),
            categories: categories.to_vec(),
            generated_at: Utc::now(),
            examples: ExampleExtractor::new(),
            practices: BestPracticesExtractor::new(),
        }
    }

    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self
    }

    pub fn module_dir(&self, module_name: &str) -> PathBuf {
        self.output_dir.join(MODULES_DIR).join(module_name)
    }

    /// Writes the five pages of one module and returns the module directory
    pub fn generate_module_docs(&self, module: &ModuleData) -> Result<PathBuf> {
        let dir = self.module_dir(&module.name);
        fs::create_dir_all(&dir)?;

        let pages = [
            self.overview(module),
            self.api_reference(module),
            self.classes_doc(module),
            self.best_practices(module),
            self.examples_doc(module),
        ];
        for (file_name, content) in MODULE_PAGES.iter().zip(pages) {
            fs::write(dir.join(file_name), content)?;
        }

        tracing::debug!("Wrote markdown for {}", module.name);
        Ok(dir)
    }

    pub fn generate_index(&self, modules: &[ModuleData]) -> Result<PathBuf> {
        let path = self.output_dir.join("index.md");
        fs::create_dir_all(&self.output_dir)?;
        fs::write(&path, self.index(modules))?;
        Ok(path)
    }

    pub fn generate_readme(&self) -> Result<PathBuf> {
        let path = self.output_dir.join("README.md");
        fs::create_dir_all(&self.output_dir)?;
        fs::write(&path, self.readme())?;
        Ok(path)
    }

    fn overview(&self, module: &ModuleData) -> String {
        let deps = &module.dependencies;
        let mut content = format!(
            "# {name} Module Overview\n\n\
             ## Basic Information\n\n\
             - **Module**: {name}\n\
             - **Path**: {path}\n\
             - **Category**: {category}\n\
             - **Engine Version**: {version}\n\
             - **Generated**: {generated}\n\n\
             ## Description\n\n\
             {description}\n\n\
             ## Dependencies\n\n\
             ### Public Dependencies\n",
            name = module.name,
            path = module.path,
            category = module.category,
            version = self.engine_version,
            generated = display_timestamp(self.generated_at),
            description = module.description.as_deref().unwrap_or("No description available."),
        );

        if deps.public.is_empty() {
            content.push_str("- None\n");
        }
        for dep in &deps.public {
            content.push_str(&format!("- [{dep}](../{dep}/overview.md)\n"));
        }

        content.push_str("\n### Private Dependencies\n");
        content.push_str(&plain_list(&deps.private));
        content.push_str("\n### Dynamically Loaded Dependencies\n");
        content.push_str(&plain_list(&deps.dynamic));

        content.push_str(&format!(
            "\n## Statistics\n\n\
             - **Classes**: {}\n\
             - **Functions**: {}\n\
             - **Enums**: {}\n\
             - **Structs**: {}\n\n\
             ## Related Pages\n\n\
             - [API Reference](api.md)\n\
             - [Classes](classes.md)\n\
             - [Best Practices](best-practices.md)\n\
             - [Examples](examples.md)\n",
            module.classes.len(),
            module.functions.len(),
            module.enums.len(),
            module.structs.len(),
        ));
        content
    }

    fn api_reference(&self, module: &ModuleData) -> String {
        let mut content = format!(
            "# {name} API Reference\n\n\
             ## Overview\n\n\
             This page lists the public API of the {name} module.\n\n\
             > **Note**: only public API functions are listed; macros and internal \
             implementation details are filtered out.\n\n\
             ## Functions\n\n",
            name = module.name
        );

        let functions = &module.functions;
        if functions.is_empty() {
            content.push_str("No functions found.\n");
        } else {
            if functions.len() > MAX_API_FUNCTIONS {
                content.push_str(&format!(
                    "> **Tip**: this module has {} functions; only the first {} are shown. \
                     See the JSON data file for the complete list.\n\n",
                    functions.len(),
                    MAX_API_FUNCTIONS
                ));
            }
            for func in functions.iter().take(MAX_API_FUNCTIONS) {
                content.push_str(&format_function(func));
            }
        }

        content.push_str("\n## Enums\n\n");
        if module.enums.is_empty() {
            content.push_str("No enums found.\n");
        }
        for item in &module.enums {
            content.push_str(&format_enum(item));
        }

        content.push_str("\n## Structs\n\n");
        if module.structs.is_empty() {
            content.push_str("No structs found.\n");
        }
        for item in &module.structs {
            content.push_str(&format_struct(item));
        }
        content
    }

    fn classes_doc(&self, module: &ModuleData) -> String {
        let mut content = format!(
            "# {name} Classes\n\n\
             ## Overview\n\n\
             This page describes every class found in the {name} module.\n\n",
            name = module.name
        );
        if module.classes.is_empty() {
            content.push_str("No classes found.\n");
        }
        for class in &module.classes {
            content.push_str(&format_class(class));
        }
        content
    }

    fn best_practices(&self, module: &ModuleData) -> String {
        let practices = self.practices.extract_from_module(module);
        format!(
            "# {name} Best Practices\n\n\
             ## Overview\n\n\
             Recommendations for working with the {name} module.\n\n\
             {body}\n",
            name = module.name,
            body = self.practices.format_markdown(&practices)
        )
    }

    fn examples_doc(&self, module: &ModuleData) -> String {
        let examples = self.examples.generate_usage_examples(module);
        format!(
            "# {name} Examples\n\n\
             ## Overview\n\n\
             Common usage examples for the {name} module.\n\n\
             {body}\n\n\
             ## More Examples\n\n\
             For more detailed examples see:\n\
             - the official engine documentation\n\
             - the engine sample projects\n\
             - comments and tests in the module source\n\n",
            name = module.name,
            body = self.examples.format_markdown(&examples)
        )
    }

    fn index(&self, modules: &[ModuleData]) -> String {
        let mut content = format!(
            "# UE{version} Engine API Index\n\n\
             ## Overview\n\n\
             Top-level index of the generated engine API documentation. Every module \
             has an API reference, class listing, best practices and usage examples.\n\n\
             - **Engine Version**: {version}\n\
             - **Generated**: {generated}\n\
             - **Modules**: {count}\n\n\
             ## Modules\n",
            version = self.engine_version,
            generated = display_timestamp(self.generated_at),
            count = modules.len(),
        );

        for category in &self.categories {
            content.push_str(&category_section(category, modules));
        }
        if modules.iter().any(|m| m.category == PLUGINS_CATEGORY) {
            content.push_str(&category_section(PLUGINS_CATEGORY, modules));
        }

        content.push_str(concat!(
            "\n## How to Use\n\n",
            "1. Browse the module list to find the module you need\n",
            "2. Read the module overview for its purpose and dependencies\n",
            "3. Check the API reference for concrete interfaces\n",
            "4. Check the class page for inheritance information\n",
            "5. Use the best practices and examples pages as a starting point\n\n",
            "## Layout\n\n",
            "Each module directory contains:\n\n",
            "- **overview.md**: overview, dependencies and statistics\n",
            "- **api.md**: public functions, enums and structs\n",
            "- **classes.md**: classes and their base classes\n",
            "- **best-practices.md**: heuristic recommendations\n",
            "- **examples.md**: generated usage snippets\n\n",
            "## Notes\n\n",
            "- Generated from engine headers by pattern matching; some entries may be inaccurate\n",
            "- Use alongside the official documentation\n",
            "- All paths are relative and do not depend on the local engine location\n",
        ));
        content
    }

    fn readme(&self) -> String {
        format!(
            "# UE{version} Engine API Documentation\n\n\
             ## Overview\n\n\
             API documentation generated from the engine source headers.\n\n\
             ## Layout\n\n\
             ```\n\
             modules/          # per-module pages\n\
             │   ├── Core/\n\
             │   │   ├── overview.md\n\
             │   │   ├── api.md\n\
             │   │   ├── classes.md\n\
             │   │   ├── best-practices.md\n\
             │   │   └── examples.md\n\
             │   └── ...\n\
             data/             # structured JSON\n\
             │   ├── modules.json\n\
             │   ├── api-index.json\n\
             │   └── <Module>.json\n\
             index.md          # module index\n\
             README.md         # this file\n\
             ```\n\n\
             ## Usage\n\n\
             ### Browsing\n\n\
             1. Open `index.md` for the module list\n\
             2. Pick a module and read its pages\n\n\
             ### Querying\n\n\
             `data/modules.json` lists every module with its dependencies and counts; \
             `data/api-index.json` is a flat lookup of every class, function, enum and struct.\n\n\
             ## Paths\n\n\
             Paths are recorded relative to the engine root, for example:\n\
             - `Engine/Source/Runtime/Core`\n\
             - `Engine/Source/Editor/LevelEditor`\n\n\
             ## Version\n\n\
             - **Engine Version**: {version}\n\
             - **Generator**: ue-api-docs {tool_version}\n\
             - **Generated**: {generated}\n\n\
             ## Updating\n\n\
             Re-run `ue-api-docs generate`. With incremental mode on, only modules whose \
             extracted data changed are re-rendered.\n",
            version = self.engine_version,
            tool_version = env!("CARGO_PKG_VERSION"),
            generated = display_timestamp(self.generated_at),
        )
    }
}

fn plain_list(items: &[String]) -> String {
    if items.is_empty() {
        return "- None\n".to_string();
    }
    items.iter().map(|item| format!("- {}\n", item)).collect()
}

fn category_section(category: &str, modules: &[ModuleData]) -> String {
    let mut members: Vec<&ModuleData> = modules.iter().filter(|m| m.category == category).collect();
    members.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut section = format!("\n### {} Modules\n\n", category);
    for module in members {
        section.push_str(&format!(
            "- [{name}](modules/{name}/overview.md)\n",
            name = module.name
        ));
    }
    section
}

/// Return type as shown in docs: whitespace collapsed and a leading
/// `CORE_API`/`ENGINE_API` dropped (`void` if nothing is left).
pub fn display_return_type(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if !STRIPPED_RETURN_MACROS.iter().any(|m| collapsed.starts_with(m)) {
        return collapsed;
    }
    match collapsed.split_once(' ') {
        Some((_, rest)) => rest.to_string(),
        None => "void".to_string(),
    }
}

fn format_function(func: &FunctionRecord) -> String {
    let params = func
        .parameters
        .iter()
        .map(|p| format!("{} {}", p.type_name, p.name))
        .collect::<Vec<_>>()
        .join(", ");
    let return_type = display_return_type(&func.return_type);
    let static_prefix = if func.is_static { "static " } else { "" };
    let virtual_prefix = if func.is_virtual { "virtual " } else { "" };

    format!(
        "### {static_prefix}{virtual_prefix}{name}\n\n\
         ```cpp\n\
         {return_type} {name}({params});\n\
         ```\n\n\
         - **Returns**: `{return_type}`\n\
         - **Parameters**: {shown_params}\n\
         - **File**: `{file}`\n\n",
        name = func.name,
        shown_params = if params.is_empty() { "None" } else { params.as_str() },
        file = func.file_path,
    )
}

fn format_enum(item: &EnumRecord) -> String {
    let mut content = format!("### {name}\n\n```cpp\nenum {name} {{\n", name = item.name);
    for value in &item.values {
        if value.has_value() {
            content.push_str(&format!("    {} = {},\n", value.name, value.value));
        } else {
            content.push_str(&format!("    {},\n", value.name));
        }
    }
    content.push_str(&format!("}};\n```\n\n- **File**: `{}`\n\n", item.file_path));
    content
}

fn format_struct(item: &StructRecord) -> String {
    format!("### {}\n\n- **File**: `{}`\n\n", item.name, item.file_path)
}

fn format_class(class: &ClassRecord) -> String {
    let bases = class.base_classes.join(", ");
    let inheritance = if bases.is_empty() {
        String::new()
    } else {
        format!(" : public {}", bases)
    };

    let mut content = format!(
        "## {name}\n\n\
         ```cpp\n\
         class {name}{inheritance} {{\n    // ...\n}};\n\
         ```\n\n\
         - **Base Classes**: {shown_bases}\n\
         - **File**: `{file}`\n\n",
        name = class.name,
        shown_bases = if bases.is_empty() { "None" } else { bases.as_str() },
        file = class.file_path,
    );

    if !class.members.is_empty() {
        content.push_str("\n### Key Member Functions\n\n");
        for member in class
            .members
            .iter()
            .filter(|m| m.type_name == "function")
            .take(MAX_LISTED_MEMBERS)
        {
            content.push_str(&format!("- `{}()`\n", member.name));
        }
    }
    content.push('\n');
    content
}
