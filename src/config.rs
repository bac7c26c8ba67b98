//! Run configuration.
//!
//! Everything a run reads from its environment (working directory, PATH,
//! registry location, limits) is captured here once, so components receive
//! their inputs explicitly instead of consulting process-global state.

use std::path::PathBuf;
use std::time::Duration;

use crate::detection::{parse_system_path, PackageManager};
use crate::resolve::DEFAULT_REGISTRY;

/// Default per-probe timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of registry probes in flight.
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory holding `package.json` and `node_modules`.
    pub project_root: PathBuf,

    /// Package manager override. `None` means detect.
    pub tool: Option<PackageManager>,

    /// Directories searched when detecting a package manager.
    pub path_entries: Vec<PathBuf>,

    /// Registry base URL.
    pub registry_url: String,

    /// Deadline for each registry probe.
    pub probe_timeout: Duration,

    /// Maximum registry probes in flight.
    pub concurrency: usize,

    /// Print the install command instead of running it.
    pub dry_run: bool,
}

impl RunConfig {
    /// Configuration with defaults for a project, using the current PATH.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            tool: None,
            path_entries: parse_system_path(),
            registry_url: DEFAULT_REGISTRY.to_string(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
            dry_run: false,
        }
    }

    /// Set the package manager override.
    pub fn with_tool(mut self, tool: Option<PackageManager>) -> Self {
        self.tool = tool;
        self
    }

    /// Set the directories searched for package managers.
    pub fn with_path_entries(mut self, path_entries: Vec<PathBuf>) -> Self {
        self.path_entries = path_entries;
        self
    }

    /// Set the registry base URL.
    pub fn with_registry(mut self, registry_url: impl Into<String>) -> Self {
        self.registry_url = registry_url.into();
        self
    }

    /// Set the per-probe timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Set the probe concurrency limit.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Enable or disable dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
