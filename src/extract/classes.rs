use once_cell::sync::Lazy;
use regex::Regex;

use super::records::ClassRecord;

// class [API-MACRO] Name [: access BaseList]
static RE_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"class\s+(?:CORE_API|ENGINE_API|[A-Za-z0-9_]+_API)?\s*([A-Za-z0-9_]+)(?:\s*:\s*(?:public|protected|private)\s+([A-Za-z0-9_\s,<>:]+))?",
    )
    .unwrap()
});

// A base name, optionally with one level of template arguments
static RE_BASE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Za-z0-9_]+(?:<[^>]+>)?)").unwrap());

const ACCESS_SPECIFIERS: &[&str] = &["public", "protected", "private"];

/// Finds every class declaration in `content`, forward declarations included.
///
/// Records come out in file order and are never deduplicated.
pub fn recognize_classes(content: &str, file_path: &str) -> Vec<ClassRecord> {
    RE_CLASS
        .captures_iter(content)
        .map(|caps| {
            let bases = caps
                .get(2)
                .map(|m| parse_base_classes(m.as_str()))
                .unwrap_or_default();
            ClassRecord::new(&caps[1], bases, file_path)
        })
        .collect()
}

/// Pulls base names out of a captured base list, skipping access specifiers.
/// Any other token, export macros included, is kept verbatim.
pub fn parse_base_classes(base_list: &str) -> Vec<String> {
    RE_BASE_TOKEN
        .captures_iter(base_list)
        .map(|caps| caps[1].to_string())
        .filter(|token| !ACCESS_SPECIFIERS.contains(&token.as_str()))
        .collect()
}
