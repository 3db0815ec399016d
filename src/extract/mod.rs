//! Declaration extraction engine.
//!
//! Four independent recognizers (class, function, enum, struct) each scan the
//! full text of one header with a dedicated pattern. [`HeaderExtractor`] runs
//! them in sequence over the same read-only buffer and collects the output in
//! a [`DeclarationSet`] owned by that single call.
//!
//! This is pattern matching, not parsing: there is no AST and no symbol table,
//! and every recognizer is total (any text in, a possibly empty list out).
//!
//! Identifier characters are ASCII only (`[A-Za-z0-9_]`); whitespace is Unicode.

pub mod classes;
pub mod enums;
pub mod functions;
pub mod noise;
pub mod params;
pub mod records;
pub mod structs;

use serde::{Deserialize, Serialize};

pub use classes::{parse_base_classes, recognize_classes};
pub use enums::{parse_enum_body, recognize_enums};
pub use functions::recognize_functions;
pub use noise::{is_api_macro, Rejection};
pub use params::{parse_parameter, parse_parameters, split_parameters};
pub use records::{
    Access, ClassRecord, EnumRecord, EnumValue, FunctionRecord, MemberRecord, ParameterRecord,
    StructRecord,
};
pub use structs::recognize_structs;

/// Declarations found in one file, or concatenated across many.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationSet {
    pub classes: Vec<ClassRecord>,
    pub functions: Vec<FunctionRecord>,
    pub enums: Vec<EnumRecord>,
    pub structs: Vec<StructRecord>,
}

impl DeclarationSet {
    /// Total number of records across all four kinds.
    pub fn len(&self) -> usize {
        self.classes.len() + self.functions.len() + self.enums.len() + self.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends another set after this one, preserving order within each kind.
    pub fn append(&mut self, mut other: DeclarationSet) {
        self.classes.append(&mut other.classes);
        self.functions.append(&mut other.functions);
        self.enums.append(&mut other.enums);
        self.structs.append(&mut other.structs);
    }
}

impl FromIterator<DeclarationSet> for DeclarationSet {
    fn from_iter<I: IntoIterator<Item = DeclarationSet>>(iter: I) -> Self {
        let mut aggregate = DeclarationSet::default();
        for set in iter {
            aggregate.append(set);
        }
        aggregate
    }
}

/// Runs every recognizer over a header's text.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeaderExtractor;

impl HeaderExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract classes, functions, enums, and structs from one file's text.
    ///
    /// `file_path` is attached verbatim to every record.
    pub fn extract_all(&self, content: &str, file_path: &str) -> DeclarationSet {
        let result = DeclarationSet {
            classes: recognize_classes(content, file_path),
            functions: recognize_functions(content, file_path),
            enums: recognize_enums(content, file_path),
            structs: recognize_structs(content, file_path),
        };

        tracing::debug!(
            file = file_path,
            classes = result.classes.len(),
            functions = result.functions.len(),
            enums = result.enums.len(),
            structs = result.structs.len(),
            "extracted declarations"
        );

        result
    }
}
