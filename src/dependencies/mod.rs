//! Module dependency scraping.
//!
//! Each module declares its dependencies in a `<Name>.Build.cs` rules file.
//! Only the three dependency lists the docs care about are read; everything
//! else in the rules file is ignored.

pub mod build_cs;

use serde::{Deserialize, Serialize};

pub use build_cs::BuildCsParser;

/// The dependency lists a Build.cs file can populate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Public,
    Private,
    Dynamic,
}

impl DependencyKind {
    pub const ALL: [DependencyKind; 3] = [
        DependencyKind::Public,
        DependencyKind::Private,
        DependencyKind::Dynamic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Public => "public",
            DependencyKind::Private => "private",
            DependencyKind::Dynamic => "dynamic",
        }
    }

    /// Name of the rules-file list that feeds this kind
    pub fn rules_field(&self) -> &'static str {
        match self {
            DependencyKind::Public => "PublicDependencyModuleNames",
            DependencyKind::Private => "PrivateDependencyModuleNames",
            DependencyKind::Dynamic => "DynamicallyLoadedModuleNames",
        }
    }
}

/// Dependencies of one module, each list deduplicated in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependencies {
    pub public: Vec<String>,
    pub private: Vec<String>,
    pub dynamic: Vec<String>,
}

impl Dependencies {
    pub fn get(&self, kind: DependencyKind) -> &[String] {
        match kind {
            DependencyKind::Public => &self.public,
            DependencyKind::Private => &self.private,
            DependencyKind::Dynamic => &self.dynamic,
        }
    }

    fn get_mut(&mut self, kind: DependencyKind) -> &mut Vec<String> {
        match kind {
            DependencyKind::Public => &mut self.public,
            DependencyKind::Private => &mut self.private,
            DependencyKind::Dynamic => &mut self.dynamic,
        }
    }

    /// Adds a module name unless the list already holds it.
    pub fn push(&mut self, kind: DependencyKind, name: impl Into<String>) {
        let name = name.into();
        let list = self.get_mut(kind);
        if !list.contains(&name) {
            list.push(name);
        }
    }

    pub fn total(&self) -> usize {
        self.public.len() + self.private.len() + self.dynamic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
