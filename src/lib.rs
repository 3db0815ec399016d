pub mod config;
pub mod dependencies;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod render;
pub mod scanner;

pub use config::{Config, ConfigOverrides, OutputFormat};
pub use dependencies::{BuildCsParser, Dependencies, DependencyKind};
pub use error::{DocGenError, Result};
pub use extract::{
    Access, ClassRecord, DeclarationSet, EnumRecord, EnumValue, FunctionRecord, HeaderExtractor,
    MemberRecord, ParameterRecord, StructRecord,
};
pub use pipeline::{GenerationProgress, GenerationReport, Generator};
pub use render::{JsonGenerator, MarkdownGenerator, ModuleData};
pub use scanner::{HeaderWalker, ModuleApiParser, ModuleInfo, ModuleScanner};
