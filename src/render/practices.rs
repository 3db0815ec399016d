//! Heuristic best-practice notes derived from module category and class names.

use serde::Serialize;

use super::ModuleData;

const OTHER_CATEGORY: &str = "Other";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestPractice {
    pub title: String,
    pub description: String,
    pub category: String,
}

impl BestPractice {
    fn new(title: impl Into<String>, description: impl Into<String>, category: &str) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.to_string(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BestPracticesExtractor;

impl BestPracticesExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract_from_module(&self, module: &ModuleData) -> Vec<BestPractice> {
        let mut practices = match module.category.as_str() {
            "Runtime" => runtime_practices(&module.name),
            "Editor" => editor_practices(),
            _ => Vec::new(),
        };
        practices.extend(singleton_practices(module));
        practices
    }

    /// Groups practices by category, keeping the order categories first appear in.
    pub fn format_markdown(&self, practices: &[BestPractice]) -> String {
        if practices.is_empty() {
            return concat!(
                "## Best Practices\n\n",
                "No module-specific practices were detected.\n\n",
                "### General Advice\n\n",
                "1. Consult the official documentation and sample projects\n",
                "2. Follow the engine coding standard\n",
                "3. Keep module dependencies in mind\n",
                "4. Use the reflection and macro systems\n\n",
            )
            .to_string();
        }

        let mut groups: Vec<(&str, Vec<&BestPractice>)> = Vec::new();
        for practice in practices {
            let category = if practice.category.is_empty() {
                OTHER_CATEGORY
            } else {
                practice.category.as_str()
            };
            match groups.iter_mut().find(|(name, _)| *name == category) {
                Some((_, items)) => items.push(practice),
                None => groups.push((category, vec![practice])),
            }
        }

        let mut content = String::from("## Best Practices\n\n");
        for (category, items) in groups {
            content.push_str(&format!("### {}\n\n", category));
            for practice in items {
                content.push_str(&format!("#### {}\n\n", practice.title));
                content.push_str(&format!("{}\n\n", practice.description));
            }
        }
        content
    }
}

fn runtime_practices(module_name: &str) -> Vec<BestPractice> {
    if module_name != "Core" {
        return Vec::new();
    }
    vec![
        BestPractice::new(
            "Manage memory with smart pointers",
            "Prefer TSharedPtr, TUniquePtr and friends over manual memory management",
            "Memory Management",
        ),
        BestPractice::new(
            "Use engine containers",
            "Use TArray, TMap and the other engine containers instead of STL containers",
            "Containers",
        ),
    ]
}

fn editor_practices() -> Vec<BestPractice> {
    vec![BestPractice::new(
        "Editor tool development",
        "Build editor tools on EditorSubsystem and EditorUtilityWidget",
        "Editor Development",
    )]
}

// Name-based only: any class containing "Singleton" or "Manager".
fn singleton_practices(module: &ModuleData) -> Vec<BestPractice> {
    module
        .classes
        .iter()
        .filter(|class| class.name.contains("Singleton") || class.name.contains("Manager"))
        .map(|class| {
            BestPractice::new(
                format!("Use the {} singleton", class.name),
                format!("{} follows the singleton pattern; obtain the instance with Get()", class.name),
                "Design Patterns",
            )
        })
        .collect()
}
