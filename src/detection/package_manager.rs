//! Package manager detection.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

/// Package managers typie knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum PackageManager {
    Yarn,
    Npm,
    Pnpm,
    Bun,
}

impl PackageManager {
    /// Known tools in detection priority order. The first one found wins.
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Yarn,
        PackageManager::Npm,
        PackageManager::Pnpm,
        PackageManager::Bun,
    ];

    /// Executable name looked up on PATH.
    pub fn executable(self) -> &'static str {
        match self {
            Self::Yarn => "yarn",
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Bun => "bun",
        }
    }

    /// Arguments of the "add as development dependency" subcommand.
    pub fn add_dev_args(self) -> &'static [&'static str] {
        match self {
            Self::Yarn => &["add", "-D"],
            Self::Npm => &["install", "-D"],
            Self::Pnpm => &["add", "-D"],
            Self::Bun => &["add", "-d"],
        }
    }

    /// Whether each package argument must carry the declared version range.
    ///
    /// `yarn add` prompts interactively when the requested range has no
    /// matching `@types` release; pinning the range up front avoids that.
    /// npm errors instead, so it gets bare names.
    pub fn pins_version_ranges(self) -> bool {
        matches!(self, Self::Yarn)
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable())
    }
}

/// Detects the package manager to install with.
///
/// PATH entries are captured at construction so detection never consults
/// process-global state afterwards.
#[derive(Debug, Clone)]
pub struct PackageManagerDetector {
    path_entries: Vec<PathBuf>,
}

impl PackageManagerDetector {
    /// Create a detector that searches the given directories.
    pub fn new(path_entries: Vec<PathBuf>) -> Self {
        Self { path_entries }
    }

    /// Return the first known package manager found on PATH.
    pub fn detect(&self) -> Option<PackageManager> {
        let found = PackageManager::ALL
            .into_iter()
            .find(|pm| resolve_tool_path(pm.executable(), &self.path_entries).is_some());

        tracing::debug!("Detected package manager: {:?}", found);
        found
    }

    /// Pick the override when given, otherwise detect.
    ///
    /// An override is trusted as-is; it is not checked against PATH.
    pub fn select(&self, overridden: Option<PackageManager>) -> Option<PackageManager> {
        overridden.or_else(|| self.detect())
    }
}

/// Comma-separated list of known tools, for error messages.
pub fn known_tools() -> String {
    PackageManager::ALL
        .iter()
        .map(|pm| pm.executable())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        for name in candidate_file_names(tool) {
            let candidate = dir.join(name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(unix)]
fn candidate_file_names(tool: &str) -> Vec<String> {
    vec![tool.to_string()]
}

// npm, yarn and pnpm ship as .cmd shims on Windows.
#[cfg(not(unix))]
fn candidate_file_names(tool: &str) -> Vec<String> {
    ["", ".cmd", ".exe", ".bat"]
        .iter()
        .map(|ext| format!("{}{}", tool, ext))
        .collect()
}

#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}
