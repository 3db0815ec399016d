//! Macro and noise filtering for function matches.
//!
//! The function pattern happily matches macro invocations such as
//! `DECLARE_DELEGATE(FOnClicked);` and comment fragments that happen to end in
//! `Word(...);`. Every candidate runs through the fixed, ordered checks below;
//! any single hit rejects the candidate. There is no scoring.

use once_cell::sync::Lazy;
use regex::Regex;

/// Macro-name prefixes that mark an invocation rather than a declaration.
pub const MACRO_PREFIXES: &[&str] = &[
    "DECLARE_",
    "DEFINE_",
    "IMPLEMENT_",
    "BEGIN_",
    "END_",
    "GENERATED_",
];

/// Reflection macro invocations.
pub const REFLECTION_MARKERS: &[&str] = &[
    "UCLASS(",
    "USTRUCT(",
    "UENUM(",
    "UFUNCTION(",
    "UPROPERTY(",
];

/// Well-known export macros accepted explicitly by the patterns.
pub const EXPORT_MACROS: &[&str] = &["CORE_API", "ENGINE_API"];

/// Lower-case markers showing a "return type" is really prose from a comment.
const COMMENT_MARKERS: &[&str] = &["optional", "should be"];

/// Longest cleaned return type, in UTF-16 code units, accepted before a match
/// is treated as a runaway multi-line capture.
pub const MAX_RETURN_TYPE_LEN: usize = 200;

static RE_DIRECTIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[A-Za-z0-9_]+.*").unwrap());
static RE_LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"//.*").unwrap());
static RE_BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Why a function candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MacroInvocation,
    MacroStyleName,
    EmptyReturnType,
    BareExportMacro,
    ReturnTypeTooLong,
    CommentFragment,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::MacroInvocation => "macro_invocation",
            Rejection::MacroStyleName => "macro_style_name",
            Rejection::EmptyReturnType => "empty_return_type",
            Rejection::BareExportMacro => "bare_export_macro",
            Rejection::ReturnTypeTooLong => "return_type_too_long",
            Rejection::CommentFragment => "comment_fragment",
        }
    }
}

/// True when `token` is an API-export macro: one of the well-known export
/// macros or any word ending in `_API`.
pub fn is_api_macro(token: &str) -> bool {
    EXPORT_MACROS.contains(&token)
        || (token.len() > "_API".len()
            && token.ends_with("_API")
            && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
}

/// Checks the whole matched declaration text for macro prefixes and
/// reflection markers.
pub fn is_macro_invocation(matched: &str) -> bool {
    MACRO_PREFIXES.iter().any(|prefix| matched.contains(prefix))
        || REFLECTION_MARKERS.iter().any(|marker| matched.contains(marker))
}

/// `SOME_MACRO_NAME`: entirely upper-case with two or more underscores.
pub fn is_macro_style_name(name: &str) -> bool {
    name == name.to_uppercase() && name.matches('_').count() >= 2
}

/// Strips directive remnants, line and block comments, then collapses
/// whitespace.
pub fn clean_return_type(raw: &str) -> String {
    let cleaned = RE_DIRECTIVE.replace_all(raw, "");
    let cleaned = RE_LINE_COMMENT.replace_all(&cleaned, "");
    let cleaned = RE_BLOCK_COMMENT.replace_all(&cleaned, "");
    RE_WHITESPACE.replace_all(&cleaned, " ").trim().to_string()
}

/// Checks applied to the raw match before the return type is looked at.
pub fn check_declaration(matched: &str, name: &str) -> Result<(), Rejection> {
    if is_macro_invocation(matched) {
        return Err(Rejection::MacroInvocation);
    }
    if is_macro_style_name(name) {
        return Err(Rejection::MacroStyleName);
    }
    Ok(())
}

/// Checks applied to an already cleaned return type.
pub fn check_return_type(return_type: &str) -> Result<(), Rejection> {
    if return_type.is_empty() {
        return Err(Rejection::EmptyReturnType);
    }
    if is_api_macro(return_type) {
        return Err(Rejection::BareExportMacro);
    }
    if return_type.encode_utf16().count() > MAX_RETURN_TYPE_LEN {
        return Err(Rejection::ReturnTypeTooLong);
    }
    let lower = return_type.to_lowercase();
    if COMMENT_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return Err(Rejection::CommentFragment);
    }
    Ok(())
}
