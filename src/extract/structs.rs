use once_cell::sync::Lazy;
use regex::Regex;

use super::records::StructRecord;

// struct [API-MACRO] Name [: BaseList] {
static RE_STRUCT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"struct\s+(?:CORE_API|ENGINE_API|[A-Za-z0-9_]+_API)?\s*([A-Za-z0-9_]+)(?:\s*:\s*([A-Za-z0-9_\s,<>:]+))?\s*\{")
        .unwrap()
});

/// Finds struct definitions (an opening brace is required).
///
/// Only the name is captured; bodies are not parsed, so `members` is always
/// empty.
pub fn recognize_structs(content: &str, file_path: &str) -> Vec<StructRecord> {
    RE_STRUCT
        .captures_iter(content)
        .map(|caps| StructRecord::new(&caps[1], file_path))
        .collect()
}
