//! Source tree discovery: modules, their headers, and display paths.

pub mod api;
pub mod modules;
pub mod paths;
pub mod walker;

pub use api::{ModuleApiParser, ParsedApi};
pub use modules::{ExcludeList, ModuleInfo, ModuleScanner, PLUGINS_CATEGORY};
pub use paths::{engine_relative, header_display_path, module_display_path};
pub use walker::HeaderWalker;
