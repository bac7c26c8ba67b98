//! Package manager detection.

pub mod package_manager;

pub use package_manager::{
    is_executable, known_tools, parse_system_path, resolve_tool_path, PackageManager,
    PackageManagerDetector,
};
