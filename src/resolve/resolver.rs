//! Deciding which dependencies need a type package installed.
//!
//! Local checks (declared `@types` counterpart, bundled types) run first in
//! the calling flow. Remaining candidates are probed against the registry as
//! a bounded task group on a current-thread runtime: at most `concurrency`
//! probes are in flight, each with its own timeout, and the group waits for
//! every probe to settle before the install set is built.

use std::collections::BTreeSet;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::{Result, TypieError};
use crate::manifest::{DependencyMap, InstalledPackage};

use super::classify::{type_package_name, Classification};
use super::registry::{ProbeResult, RegistryClient};

/// Why a dependency gets no type package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Absence {
    /// The registry has no such type package.
    NotPublished { status: u16 },

    /// The probe failed before the registry answered.
    ProbeFailed { reason: String },

    /// The probe exceeded its deadline.
    TimedOut,
}

/// Outcome of resolving one dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The manifest already declares the type package.
    AlreadyTyped,

    /// The installed package ships its own types.
    BundledTypes,

    /// The registry publishes the type package.
    RegistryHasTypes,

    /// No type package will be installed.
    NoTypesAvailable(Absence),
}

impl Resolution {
    /// Whether this outcome adds a package to the install set.
    pub fn needs_install(&self) -> bool {
        matches!(self, Self::RegistryHasTypes)
    }

    fn from_probe(result: ProbeResult) -> Self {
        match result {
            ProbeResult::Found => Self::RegistryHasTypes,
            ProbeResult::NotPublished { status } => {
                Self::NoTypesAvailable(Absence::NotPublished { status })
            }
            ProbeResult::Failed { reason } => {
                Self::NoTypesAvailable(Absence::ProbeFailed { reason })
            }
            ProbeResult::TimedOut => Self::NoTypesAvailable(Absence::TimedOut),
        }
    }
}

/// A type package to install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    /// Dependency the types are for.
    pub dependency: String,

    /// The `@types` package name.
    pub type_package: String,

    /// Version range the dependency is declared with.
    pub version_range: String,
}

/// Result of resolving every candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    /// Outcome per candidate, ordered by dependency name.
    pub outcomes: Vec<(String, Resolution)>,

    /// Type packages to install, ordered by dependency name.
    pub install_set: Vec<InstallTarget>,
}

impl ResolutionReport {
    fn new(mut outcomes: Vec<(String, Resolution)>, dependencies: &DependencyMap) -> Self {
        outcomes.sort_by(|a, b| a.0.cmp(&b.0));

        let mut seen = BTreeSet::new();
        let install_set = outcomes
            .iter()
            .filter(|(_, resolution)| resolution.needs_install())
            .map(|(dependency, _)| InstallTarget {
                dependency: dependency.clone(),
                type_package: type_package_name(dependency),
                version_range: dependencies.get(dependency).cloned().unwrap_or_default(),
            })
            .filter(|target| seen.insert(target.type_package.clone()))
            .collect();

        Self {
            outcomes,
            install_set,
        }
    }

    /// Outcome for a dependency, if it was a candidate.
    pub fn outcome(&self, dependency: &str) -> Option<&Resolution> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == dependency)
            .map(|(_, resolution)| resolution)
    }

    /// Type package names in install order.
    pub fn type_packages(&self) -> Vec<&str> {
        self.install_set
            .iter()
            .map(|target| target.type_package.as_str())
            .collect()
    }
}

/// Resolves candidates to outcomes.
pub struct TypeResolver {
    project_root: PathBuf,
    registry: RegistryClient,
    concurrency: usize,
}

impl TypeResolver {
    /// Create a resolver for a project.
    ///
    /// `concurrency` is clamped to at least one probe in flight.
    pub fn new(project_root: &Path, registry: RegistryClient, concurrency: usize) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            registry,
            concurrency: concurrency.max(1),
        }
    }

    /// Resolve every candidate, cancelling on Ctrl-C.
    pub fn resolve(
        &self,
        classification: &Classification,
        dependencies: &DependencyMap,
    ) -> Result<ResolutionReport> {
        self.resolve_until(classification, dependencies, async {
            if tokio::signal::ctrl_c().await.is_err() {
                // No signal handler available: never cancel.
                std::future::pending::<()>().await;
            }
        })
    }

    /// Resolve every candidate, aborting outstanding probes once `cancel`
    /// completes.
    pub fn resolve_until<F>(
        &self,
        classification: &Classification,
        dependencies: &DependencyMap,
        cancel: F,
    ) -> Result<ResolutionReport>
    where
        F: Future<Output = ()>,
    {
        let mut outcomes = Vec::with_capacity(classification.candidates.len());
        let mut to_probe = Vec::new();

        for dependency in &classification.candidates {
            match self.resolve_locally(classification, dependency)? {
                Some(resolution) => outcomes.push((dependency.clone(), resolution)),
                None => to_probe.push(dependency.clone()),
            }
        }

        if !to_probe.is_empty() {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            outcomes.extend(runtime.block_on(self.probe_all(to_probe, cancel))?);
        }

        Ok(ResolutionReport::new(outcomes, dependencies))
    }

    fn resolve_locally(
        &self,
        classification: &Classification,
        dependency: &str,
    ) -> Result<Option<Resolution>> {
        if classification.has_types_for(dependency) {
            return Ok(Some(Resolution::AlreadyTyped));
        }

        let bundled = InstalledPackage::load(&self.project_root, dependency)?
            .is_some_and(|installed| installed.has_bundled_types());
        if bundled {
            return Ok(Some(Resolution::BundledTypes));
        }

        Ok(None)
    }

    async fn probe_all<F>(
        &self,
        dependencies: Vec<String>,
        cancel: F,
    ) -> Result<Vec<(String, Resolution)>>
    where
        F: Future<Output = ()>,
    {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut task_set = JoinSet::new();
        let mut pending: BTreeSet<String> = dependencies.iter().cloned().collect();

        for dependency in dependencies {
            let registry = self.registry.clone();
            let semaphore = Arc::clone(&semaphore);

            task_set.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => registry.probe(&type_package_name(&dependency)).await,
                    Err(e) => ProbeResult::Failed {
                        reason: e.to_string(),
                    },
                };
                (dependency, Resolution::from_probe(result))
            });
        }

        let mut outcomes = Vec::with_capacity(task_set.len());
        tokio::pin!(cancel);

        loop {
            tokio::select! {
                biased;

                _ = &mut cancel => {
                    task_set.abort_all();
                    tracing::warn!("Cancelled with {} probe(s) outstanding", task_set.len());
                    return Err(TypieError::Interrupted);
                }
                joined = task_set.join_next() => match joined {
                    None => break,
                    Some(Ok((dependency, resolution))) => {
                        pending.remove(&dependency);
                        outcomes.push((dependency, resolution));
                    }
                    // A panicked probe only loses its own result.
                    Some(Err(e)) => tracing::warn!("Probe task failed: {}", e),
                },
            }
        }

        // Dependencies whose task panicked still get an outcome.
        outcomes.extend(pending.into_iter().map(|dependency| {
            let reason = "probe task did not complete".to_string();
            (
                dependency,
                Resolution::NoTypesAvailable(Absence::ProbeFailed { reason }),
            )
        }));

        Ok(outcomes)
    }
}
