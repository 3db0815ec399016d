//! Synthesized usage snippets for module documentation.

use serde::Serialize;

use super::ModuleData;
use crate::extract::{ClassRecord, FunctionRecord};

const MAX_CLASS_EXAMPLES: usize = 5;
const MAX_FUNCTION_EXAMPLES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Example {
    pub title: String,
    pub code: String,
    pub description: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ExampleExtractor;

impl ExampleExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Builds snippets for the leading classes and functions of a module.
    ///
    /// Functions are taken from the first five records; names starting with
    /// `_` are skipped within that window rather than replaced.
    pub fn generate_usage_examples(&self, module: &ModuleData) -> Vec<Example> {
        let classes = module
            .classes
            .iter()
            .take(MAX_CLASS_EXAMPLES)
            .filter(|class| !class.name.is_empty())
            .map(class_example);

        let functions = module
            .functions
            .iter()
            .take(MAX_FUNCTION_EXAMPLES)
            .filter(|func| !func.name.is_empty() && !func.name.starts_with('_'))
            .map(function_example);

        classes.chain(functions).collect()
    }

    pub fn format_markdown(&self, examples: &[Example]) -> String {
        if examples.is_empty() {
            return "No usage examples available.\n".to_string();
        }

        let mut content = String::from("## Usage Examples\n\n");
        for (i, example) in examples.iter().enumerate() {
            if example.title.is_empty() {
                content.push_str(&format!("### Example {}\n\n", i + 1));
            } else {
                content.push_str(&format!("### {}\n\n", example.title));
            }
            if !example.description.is_empty() {
                content.push_str(&format!("{}\n\n", example.description));
            }
            content.push_str("```cpp\n");
            content.push_str(&example.code);
            content.push_str("```\n\n");
        }
        content
    }
}

fn class_example(class: &ClassRecord) -> Example {
    let name = &class.name;
    Example {
        title: format!("Using {}", name),
        code: format!(
            "// Using {name}\n{name}* Instance = NewObject<{name}>();\n// Use the instance...\n"
        ),
        description: format!("Basic example of creating and using {}", name),
    }
}

fn function_example(func: &FunctionRecord) -> Example {
    let name = &func.name;
    let args = func
        .parameters
        .iter()
        .enumerate()
        .map(|(i, param)| {
            if param.is_named() {
                param.name.clone()
            } else {
                format!("param{}", i)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    let code = if func.return_type == "void" {
        format!("// Calling {name}\n{name}({args});\n")
    } else {
        format!(
            "// Calling {name}\n{} Result = {name}({args});\n// Use the result...\n",
            func.return_type
        )
    };

    Example {
        title: format!("Calling {}", name),
        code,
        description: format!("Basic example of calling {}", name),
    }
}
