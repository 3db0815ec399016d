//! Parameter list tokenizing and per-parameter recognition.

use once_cell::sync::Lazy;
use regex::Regex;

use super::records::ParameterRecord;

// `= default` clause running to the end of the parameter text
static RE_DEFAULT_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*=\s*.*$").unwrap());

// Shortest leading type text, whitespace, then a bare trailing word
static RE_TYPE_AND_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)\s+([A-Za-z0-9_]+)$").unwrap());

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Splits raw parameter-list text on top-level commas.
///
/// Only angle brackets are balanced. The depth counter is allowed to go
/// negative on a stray `>`: scanning simply continues, and commas seen while
/// the depth is non-zero stay inside the current piece. Pieces are trimmed and
/// empty pieces are dropped, so both `""` and `"   "` yield no parameters.
pub fn split_parameters(raw: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut current = String::new();

    for ch in raw.chars() {
        match ch {
            '<' => {
                depth += 1;
                current.push(ch);
            }
            '>' => {
                depth -= 1;
                current.push(ch);
            }
            ',' if depth == 0 => {
                push_piece(&mut parts, &current);
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    push_piece(&mut parts, &current);

    parts
}

fn push_piece(parts: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
}

/// Recognizes a single parameter.
///
/// The default-value clause is dropped first. If a trailing bare word can be
/// isolated it becomes the name and the text before it the type; otherwise the
/// whole text is the type and the name is empty (unnamed parameters,
/// function-pointer types). Returns `None` only when nothing is left once the
/// default value is removed.
pub fn parse_parameter(param: &str) -> Option<ParameterRecord> {
    let without_default = RE_DEFAULT_VALUE.replace(param, "");
    let without_default = without_default.trim();

    if let Some(caps) = RE_TYPE_AND_NAME.captures(without_default) {
        let type_name = RE_WHITESPACE.replace_all(caps[1].trim(), " ");
        return Some(ParameterRecord::new(&caps[2], type_name));
    }

    if without_default.is_empty() {
        None
    } else {
        Some(ParameterRecord::unnamed(without_default))
    }
}

/// Splits and recognizes a whole parameter list.
pub fn parse_parameters(raw: &str) -> Vec<ParameterRecord> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    split_parameters(raw)
        .iter()
        .filter_map(|part| parse_parameter(part))
        .collect()
}
