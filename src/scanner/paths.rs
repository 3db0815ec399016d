//! Display paths for modules and headers.
//!
//! Generated docs never contain absolute paths. Paths are cut at the `Engine`
//! segment (`Engine/Source/Runtime/Core/...`) so they read the same on every
//! machine.

use std::path::{Component, Path};

/// Path segment that anchors relative display paths
pub const ENGINE_SEGMENT: &str = "Engine";

fn segments(path: &Path) -> Vec<String> {
    path.to_string_lossy()
        .split(['/', '\\'])
        .map(str::to_string)
        .collect()
}

/// Slash-joined path from the `Engine` segment onward, if there is one.
pub fn engine_relative(path: &Path) -> Option<String> {
    let parts = segments(path);
    let idx = parts.iter().position(|p| p == ENGINE_SEGMENT)?;
    Some(parts[idx..].join("/"))
}

/// Display path for a header: engine-relative when possible, otherwise the
/// path as given.
pub fn header_display_path(path: &Path) -> String {
    engine_relative(path).unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Display path for a module directory: engine-relative when possible,
/// otherwise relative to `root` by dropping the shared leading components.
pub fn module_display_path(path: &Path, root: &Path) -> String {
    if let Some(relative) = engine_relative(path) {
        return relative;
    }

    let path_parts: Vec<Component> = path.components().collect();
    let root_parts: Vec<Component> = root.components().collect();
    let shared = path_parts
        .iter()
        .zip(root_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    path_parts[shared..]
        .iter()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_engine_relative() {
        let path = Path::new("/home/dev/UE5/Engine/Source/Runtime/Core/Public/Misc/Guid.h");
        assert_eq!(
            engine_relative(path),
            Some("Engine/Source/Runtime/Core/Public/Misc/Guid.h".to_string())
        );
    }

    #[test]
    fn test_engine_relative_backslashes() {
        let path = Path::new(r"D:\UE5\Engine\Source\Runtime\Core");
        assert_eq!(
            engine_relative(path),
            Some("Engine/Source/Runtime/Core".to_string())
        );
    }

    #[test]
    fn test_header_display_path_without_engine() {
        let path = Path::new("/tmp/src/Runtime/Core/Public/A.h");
        assert_eq!(header_display_path(path), "/tmp/src/Runtime/Core/Public/A.h");
    }

    #[test]
    fn test_module_display_path_strips_root() {
        let root = PathBuf::from("/tmp/src");
        let module = root.join("Runtime").join("Core");
        assert_eq!(module_display_path(&module, &root), "Runtime/Core");
    }

    #[test]
    fn test_module_display_path_prefers_engine_segment() {
        let root = PathBuf::from("/opt/UE/Engine/Source");
        let module = root.join("Editor").join("LevelEditor");
        assert_eq!(
            module_display_path(&module, &root),
            "Engine/Source/Editor/LevelEditor"
        );
    }
}
