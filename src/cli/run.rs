//! The install pipeline.
//!
//! Detect a package manager, read the manifest, classify dependencies,
//! resolve them against the registry, then run one install command.
//! Every stage either completes or aborts the run.

use crate::config::RunConfig;
use crate::detection::{known_tools, PackageManager, PackageManagerDetector};
use crate::error::{Result, TypieError};
use crate::install::InstallCommand;
use crate::manifest::Manifest;
use crate::resolve::{
    type_package_name, Absence, Classification, RegistryClient, Resolution, ResolutionReport,
    TypeResolver,
};
use crate::ui::{StatusKind, UserInterface};

/// The install pipeline for one project.
pub struct RunCommand {
    config: RunConfig,
}

impl RunCommand {
    /// Create a run for the given configuration.
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Execute the pipeline.
    ///
    /// Every failure, including a failed install, comes back as an error.
    pub fn execute(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let tool = self.select_tool()?;
        ui.info(&format!("Using {}", tool));

        let manifest = Manifest::load(&self.config.project_root)?;
        let dependencies = manifest.merged_dependencies();
        let classification = Classification::from_dependencies(&dependencies);

        ui.info(&format!(
            "Will check {} deps from devDependencies and dependencies",
            classification.candidates.len()
        ));

        let registry = RegistryClient::new(&self.config.registry_url, self.config.probe_timeout)?;
        let resolver = TypeResolver::new(
            &self.config.project_root,
            registry.clone(),
            self.config.concurrency,
        );

        ui.info(&format!(
            "Communicating with {} to check for types...",
            registry.base_url()
        ));
        let mut spinner = ui.start_spinner("Checking the registry...");
        let report = resolver.resolve(&classification, &dependencies);
        spinner.finish();
        let report = report?;

        show_outcomes(ui, &report);
        ui.success(&format!(
            "Found {} @types packages to install...",
            report.install_set.len()
        ));

        let install = InstallCommand::new(tool, &report.install_set);
        ui.message(&install.command_line());

        if self.config.dry_run {
            ui.info("Dry run: install command not executed");
            return Ok(());
        }

        install.run(&self.config.project_root)
    }

    fn select_tool(&self) -> Result<PackageManager> {
        let detector = PackageManagerDetector::new(self.config.path_entries.clone());
        detector
            .select(self.config.tool)
            .ok_or_else(|| TypieError::NoToolDetected {
                tried: known_tools(),
            })
    }
}

fn show_outcomes(ui: &mut dyn UserInterface, report: &ResolutionReport) {
    let verbose = ui.output_mode().shows_reasons();

    for (dependency, resolution) in &report.outcomes {
        match resolution {
            Resolution::AlreadyTyped => ui.status(
                StatusKind::Skipped,
                &format!("Types for {} already installed. Skipping...", dependency),
            ),
            Resolution::BundledTypes => ui.status(
                StatusKind::Bundled,
                &format!("Module {} includes own types. Skipping...", dependency),
            ),
            Resolution::RegistryHasTypes => ui.status(
                StatusKind::Found,
                &format!(
                    "Type found for {} in registry.",
                    type_package_name(dependency)
                ),
            ),
            Resolution::NoTypesAvailable(Absence::NotPublished { .. }) => ui.status(
                StatusKind::Missing,
                &format!("No types found for {} in registry. Skipping...", dependency),
            ),
            Resolution::NoTypesAvailable(absence) => {
                let reason = match absence {
                    Absence::ProbeFailed { reason } if verbose => format!(" ({})", reason),
                    Absence::TimedOut if verbose => " (timed out)".to_string(),
                    _ => String::new(),
                };
                ui.status(
                    StatusKind::Failed,
                    &format!(
                        "Couldn't check the registry for {}{}. Skipping...",
                        type_package_name(dependency),
                        reason
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{MockUI, OutputMode};
    use httpmock::prelude::*;
    use std::fs;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::TempDir;

    fn project(manifest: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), manifest).unwrap();
        temp
    }

    fn config(root: &Path, server: &MockServer) -> RunConfig {
        RunConfig::new(root.to_path_buf())
            .with_tool(Some(PackageManager::Npm))
            .with_path_entries(Vec::new())
            .with_registry(server.base_url())
            .with_probe_timeout(Duration::from_secs(10))
            .with_dry_run(true)
    }

    #[test]
    fn left_pad_scenario() {
        let temp = project(r#"{"dependencies": {"left-pad": "^1.0.0"}}"#);
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/@types/left-pad");
            then.status(200);
        });

        let mut ui = MockUI::new();
        RunCommand::new(config(temp.path(), &server))
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_info("Using npm"));
        assert!(ui.has_info("Will check 1 deps"));
        assert!(ui.has_status(StatusKind::Found, "@types/left-pad"));
        assert!(ui.has_success("Found 1 @types packages"));
        assert!(ui.has_message("npm install -D @types/left-pad"));
        mock.assert_calls(1);
    }

    #[test]
    fn yarn_command_pins_ranges() {
        let temp = project(r#"{"dependencies": {"left-pad": "^1.0.0"}}"#);
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/@types/left-pad");
            then.status(200);
        });

        let mut ui = MockUI::new();
        RunCommand::new(config(temp.path(), &server).with_tool(Some(PackageManager::Yarn)))
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_message("yarn add -D @types/left-pad@^1.0.0"));
    }

    #[test]
    fn already_typed_scenario_issues_no_probes() {
        let temp = project(
            r#"{"dependencies": {"lodash": "^4.0.0"}, "devDependencies": {"@types/lodash": "^4.0.0"}}"#,
        );
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET);
            then.status(200);
        });

        let mut ui = MockUI::new();
        RunCommand::new(config(temp.path(), &server))
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_status(StatusKind::Skipped, "lodash"));
        assert!(ui.has_success("Found 0 @types packages"));
        assert_eq!(ui.messages().last().unwrap(), "npm install -D");
        mock.assert_calls(0);
    }

    #[test]
    fn every_outcome_gets_a_status_line() {
        let temp = project(
            r#"{
                "dependencies": {"axios": "1", "left-pad": "1", "mystery": "1"},
                "devDependencies": {"jest": "29", "@types/jest": "29"}
            }"#,
        );
        let axios = temp.path().join("node_modules").join("axios");
        fs::create_dir_all(&axios).unwrap();
        fs::write(axios.join("package.json"), r#"{"typings": "index.d.ts"}"#).unwrap();

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/@types/left-pad");
            then.status(200);
        });
        server.mock(|when, then| {
            when.method(GET).path("/@types/mystery");
            then.status(404);
        });

        let mut ui = MockUI::new();
        RunCommand::new(config(temp.path(), &server))
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_info("Will check 4 deps"));
        assert!(ui.has_status(StatusKind::Bundled, "axios"));
        assert!(ui.has_status(StatusKind::Skipped, "jest"));
        assert!(ui.has_status(StatusKind::Found, "@types/left-pad"));
        assert!(ui.has_status(StatusKind::Missing, "mystery"));
        assert_eq!(ui.statuses().len(), 4);
    }

    #[test]
    fn timed_out_probe_reason_shown_in_verbose_mode() {
        let temp = project(r#"{"dependencies": {"slow": "1"}}"#);
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(200).delay(Duration::from_secs(5));
        });

        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        RunCommand::new(
            config(temp.path(), &server).with_probe_timeout(Duration::from_millis(100)),
        )
        .execute(&mut ui)
        .unwrap();

        assert!(ui.has_status(StatusKind::Failed, "@types/slow (timed out)"));
        assert!(ui.has_success("Found 0"));
    }

    #[test]
    fn missing_manifest_stops_before_counting() {
        let temp = TempDir::new().unwrap();
        let server = MockServer::start();

        let mut ui = MockUI::new();
        let err = RunCommand::new(config(temp.path(), &server))
            .execute(&mut ui)
            .unwrap_err();

        assert!(matches!(err, TypieError::ManifestNotFound { .. }));
        assert!(!ui.has_info("Will check"));
    }

    #[test]
    fn no_tool_fails_before_reading_manifest() {
        let temp = TempDir::new().unwrap();
        let server = MockServer::start();

        let mut ui = MockUI::new();
        let err = RunCommand::new(config(temp.path(), &server).with_tool(None))
            .execute(&mut ui)
            .unwrap_err();

        // The project has no package.json, so reaching the manifest would
        // have produced ManifestNotFound instead.
        assert!(matches!(err, TypieError::NoToolDetected { .. }));
        assert!(ui.infos().is_empty());
    }
}
