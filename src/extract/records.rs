//! Declaration records produced by the recognizers.
//!
//! Records are plain values: they are built once from matched text and never
//! mutated afterwards. Relationships such as base classes are kept as raw
//! text, there is no symbol table to resolve them against.
//!
//! Serialized field names are consumed by downstream renderers and must stay
//! stable (`baseClasses`, `returnType`, `isStatic`, `filePath`, ...).

use serde::{Deserialize, Serialize};

/// Access level attached to serialized records.
///
/// The recognizers never look at access specifiers inside bodies, so every
/// record they emit is `Public`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    #[default]
    Public,
    Protected,
    Private,
}

impl Access {
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::Public => "public",
            Access::Protected => "protected",
            Access::Private => "private",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "public" => Some(Access::Public),
            "protected" => Some(Access::Protected),
            "private" => Some(Access::Private),
            _ => None,
        }
    }
}

/// A member slot of a class or struct. Never populated by this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
}

/// A `class Name : public Base` declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    /// Class name with any API-export macro stripped
    pub name: String,
    /// Base class names in source order, verbatim and not deduplicated
    pub base_classes: Vec<String>,
    pub access: Access,
    #[serde(default)]
    pub members: Vec<MemberRecord>,
    /// Display path of the header the class was found in
    pub file_path: String,
}

impl ClassRecord {
    pub fn new(
        name: impl Into<String>,
        base_classes: Vec<String>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_classes,
            access: Access::Public,
            members: Vec::new(),
            file_path: file_path.into(),
        }
    }
}

/// One parameter of a function declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterRecord {
    /// Parameter name, empty when only a type could be recognized
    pub name: String,
    /// Type text with internal whitespace collapsed
    #[serde(rename = "type")]
    pub type_name: String,
}

impl ParameterRecord {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// Parameter with a type but no recognizable name.
    pub fn unnamed(type_name: impl Into<String>) -> Self {
        Self::new(String::new(), type_name)
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

/// A statement-terminated function declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRecord {
    pub name: String,
    /// Cleaned return type text. Opaque, never parsed further.
    pub return_type: String,
    pub parameters: Vec<ParameterRecord>,
    pub access: Access,
    /// `static` appears somewhere in the matched declaration text
    pub is_static: bool,
    /// `virtual` appears somewhere in the matched declaration text
    pub is_virtual: bool,
    pub file_path: String,
}

impl FunctionRecord {
    pub fn new(
        name: impl Into<String>,
        return_type: impl Into<String>,
        parameters: Vec<ParameterRecord>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            parameters,
            access: Access::Public,
            is_static: false,
            is_virtual: false,
            file_path: file_path.into(),
        }
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_virtual(mut self, is_virtual: bool) -> Self {
        self.is_virtual = is_virtual;
        self
    }
}

/// A single enumerator and its raw value expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    /// Raw trimmed expression text, empty when no `=` clause was present
    pub value: String,
}

impl EnumValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumRecord {
    pub name: String,
    pub values: Vec<EnumValue>,
    pub file_path: String,
}

impl EnumRecord {
    pub fn new(name: impl Into<String>, values: Vec<EnumValue>, file_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values,
            file_path: file_path.into(),
        }
    }
}

/// A `struct Name {` declaration. Members are intentionally left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructRecord {
    pub name: String,
    #[serde(default)]
    pub members: Vec<MemberRecord>,
    pub file_path: String,
}

impl StructRecord {
    pub fn new(name: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            file_path: file_path.into(),
        }
    }
}
