//! Dependency classification and type package resolution.

pub mod classify;
pub mod registry;
pub mod resolver;

pub use classify::{is_type_package, type_package_name, Classification, TYPES_SCOPE};
pub use registry::{ProbeResult, RegistryClient, DEFAULT_REGISTRY};
pub use resolver::{Absence, InstallTarget, Resolution, ResolutionReport, TypeResolver};
