use once_cell::sync::Lazy;
use regex::Regex;

use super::records::{EnumRecord, EnumValue};

// enum [class] Name { Body }, body may span lines
static RE_ENUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"enum\s+(?:class\s+)?([A-Za-z0-9_]+)\s*\{([^}]+)\}").unwrap());

// Name [= expression]
static RE_ENUM_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z0-9_]+)(?:\s*=\s*([^,}]+))?").unwrap());

/// Finds `enum` / `enum class` declarations with a brace body.
///
/// Enums with an explicit underlying type (`enum class E : uint8 {`) do not fit
/// the pattern and are not reported.
pub fn recognize_enums(content: &str, file_path: &str) -> Vec<EnumRecord> {
    RE_ENUM
        .captures_iter(content)
        .map(|caps| EnumRecord::new(&caps[1], parse_enum_body(&caps[2]), file_path))
        .collect()
}

/// Splits an enum body into (name, raw value) pairs in declaration order.
/// Value expressions are trimmed but never evaluated.
pub fn parse_enum_body(body: &str) -> Vec<EnumValue> {
    RE_ENUM_VALUE
        .captures_iter(body)
        .map(|caps| {
            let value = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
            EnumValue::new(&caps[1], value)
        })
        .collect()
}
