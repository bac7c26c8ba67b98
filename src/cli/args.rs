//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{RunConfig, DEFAULT_CONCURRENCY};
use crate::detection::PackageManager;
use crate::error::Result;
use crate::resolve::DEFAULT_REGISTRY;
use crate::ui::OutputMode;

/// typie - Install missing @types packages for your dependencies.
#[derive(Debug, Parser)]
#[command(name = "typie")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Which package manager tool to use (default: first one found on PATH)
    #[arg(short, long, value_enum)]
    pub tool: Option<PackageManager>,

    /// Path to project root (overrides current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Registry base URL to check for type packages
    #[arg(long, env = "TYPIE_REGISTRY", default_value = DEFAULT_REGISTRY, hide_default_value = true)]
    pub registry: String,

    /// Per-request registry timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Maximum number of registry requests in flight
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY, value_parser = parse_concurrency)]
    pub concurrency: usize,

    /// Print the install command without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Show verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Output mode selected by `--verbose` / `--quiet`.
    pub fn output_mode(&self) -> OutputMode {
        if self.quiet {
            OutputMode::Quiet
        } else if self.verbose {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        }
    }

    /// Build the run configuration, resolving the project root.
    pub fn run_config(&self) -> Result<RunConfig> {
        let project_root = match &self.project {
            Some(path) => path.clone(),
            None => std::env::current_dir()?,
        };

        Ok(RunConfig::new(project_root)
            .with_tool(self.tool)
            .with_registry(self.registry.clone())
            .with_probe_timeout(Duration::from_secs(self.timeout))
            .with_concurrency(self.concurrency)
            .with_dry_run(self.dry_run))
    }
}

fn parse_concurrency(s: &str) -> std::result::Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_args_uses_defaults() {
        let cli = Cli::try_parse_from(["typie"]).unwrap();

        assert_eq!(cli.tool, None);
        assert_eq!(cli.timeout, 30);
        assert_eq!(cli.concurrency, 16);
        assert!(!cli.dry_run);
        assert_eq!(cli.output_mode(), OutputMode::Normal);
    }

    #[test]
    fn tool_override_parses() {
        let cli = Cli::try_parse_from(["typie", "--tool", "yarn"]).unwrap();
        assert_eq!(cli.tool, Some(PackageManager::Yarn));

        let cli = Cli::try_parse_from(["typie", "-t", "pnpm"]).unwrap();
        assert_eq!(cli.tool, Some(PackageManager::Pnpm));
    }

    #[test]
    fn unknown_tool_is_rejected() {
        assert!(Cli::try_parse_from(["typie", "--tool", "cargo"]).is_err());
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        assert!(Cli::try_parse_from(["typie", "--concurrency", "0"]).is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["typie", "--timeout", "0"]).is_err());
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["typie", "-v", "-q"]).is_err());
    }

    #[test]
    fn run_config_carries_flags() {
        let cli = Cli::try_parse_from([
            "typie",
            "--project",
            "/work/app",
            "--tool",
            "npm",
            "--registry",
            "http://localhost:4873",
            "--timeout",
            "5",
            "--concurrency",
            "2",
            "--dry-run",
        ])
        .unwrap();

        let config = cli.run_config().unwrap();

        assert_eq!(config.project_root, PathBuf::from("/work/app"));
        assert_eq!(config.tool, Some(PackageManager::Npm));
        assert_eq!(config.registry_url, "http://localhost:4873");
        assert_eq!(config.probe_timeout, Duration::from_secs(5));
        assert_eq!(config.concurrency, 2);
        assert!(config.dry_run);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
