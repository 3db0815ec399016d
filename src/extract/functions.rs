use once_cell::sync::Lazy;
use regex::Regex;

use super::noise::{check_declaration, check_return_type, clean_return_type};
use super::params::parse_parameters;
use super::records::FunctionRecord;

// [qualifier] [API-MACRO] ReturnType Name ( ParamList ) ;
//
// The qualifier group only consumes a qualifier when the match starts right on
// it. When the match starts earlier (typically on the preceding newline) the
// qualifier is swallowed by the return type capture and stays there.
static RE_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:static\s+|virtual\s+|inline\s+|extern\s+)?(?:CORE_API|ENGINE_API|[A-Za-z0-9_]+_API)?\s*([A-Za-z0-9_<>:,\s*&\[\]()]+?)\s+([A-Za-z0-9_]+)\s*\(([^)]*)\)\s*;",
    )
    .unwrap()
});

/// Finds statement-terminated function declarations in `content`.
///
/// Candidates rejected by the noise filter are dropped silently (logged at
/// trace level). Survivors come out in file order, duplicates included.
pub fn recognize_functions(content: &str, file_path: &str) -> Vec<FunctionRecord> {
    let mut functions = Vec::new();

    for caps in RE_FUNCTION.captures_iter(content) {
        let matched = &caps[0];
        let name = &caps[2];

        if let Err(reason) = check_declaration(matched, name) {
            tracing::trace!(name, reason = reason.as_str(), "skipping function candidate");
            continue;
        }

        let return_type = clean_return_type(caps[1].trim());
        if let Err(reason) = check_return_type(&return_type) {
            tracing::trace!(name, reason = reason.as_str(), "skipping function candidate");
            continue;
        }

        let parameters = parse_parameters(&caps[3]);

        functions.push(
            FunctionRecord::new(name, return_type, parameters, file_path)
                .with_static(matched.contains("static"))
                .with_virtual(matched.contains("virtual")),
        );
    }

    functions
}
