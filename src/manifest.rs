//! Project manifest (`package.json`) loading.
//!
//! Only the parts typie needs are modelled: the two dependency maps of the
//! project manifest, and the `types`/`typings` entries of installed
//! packages. Everything else in the file is ignored.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Result, TypieError};

/// File name of a package manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// Directory installed packages live in.
pub const MODULES_DIR: &str = "node_modules";

/// Dependency name to declared version range, ordered by name.
pub type DependencyMap = BTreeMap<String, String>;

/// The dependency sections of a project manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, deserialize_with = "dependency_section")]
    pub dependencies: DependencyMap,

    #[serde(default, deserialize_with = "dependency_section")]
    pub dev_dependencies: DependencyMap,
}

impl Manifest {
    /// Load `package.json` from the project root.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(MANIFEST_FILE);
        if !path.is_file() {
            return Err(TypieError::ManifestNotFound { path });
        }

        let manifest: Self = read_json(&path)?;
        tracing::debug!(
            "Loaded {}: {} dependencies, {} devDependencies",
            path.display(),
            manifest.dependencies.len(),
            manifest.dev_dependencies.len()
        );
        Ok(manifest)
    }

    /// Parse a manifest from a string.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| TypieError::ManifestParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Runtime and development dependencies in one map.
    ///
    /// On a name collision the `devDependencies` entry wins.
    pub fn merged_dependencies(&self) -> DependencyMap {
        let mut merged = self.dependencies.clone();
        merged.extend(
            self.dev_dependencies
                .iter()
                .map(|(name, range)| (name.clone(), range.clone())),
        );
        merged
    }
}

/// Read one dependency section leniently.
///
/// A `null` or non-object section counts as empty. Scalar ranges that are not
/// strings are rendered as JSON text; `null`, array and object ranges are
/// dropped with a warning.
fn dependency_section<'de, D>(deserializer: D) -> std::result::Result<DependencyMap, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(entries)) => entries,
        None | Some(Value::Null) => return Ok(DependencyMap::new()),
        Some(other) => {
            tracing::warn!("Ignoring dependency section that is not an object: {}", other);
            return Ok(DependencyMap::new());
        }
    };

    Ok(entries
        .into_iter()
        .filter_map(|(name, range)| match range {
            Value::String(range) => Some((name, range)),
            Value::Number(_) | Value::Bool(_) => Some((name, range.to_string())),
            other => {
                tracing::warn!("Ignoring {} with unusable version range {}", name, other);
                None
            }
        })
        .collect())
}

/// Metadata of a package installed under `node_modules`.
///
/// `types` and `typings` are kept as raw JSON values: published manifests
/// are not always well-typed and any truthy value counts as a declaration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstalledPackage {
    #[serde(default)]
    pub types: Option<Value>,

    #[serde(default)]
    pub typings: Option<Value>,
}

impl InstalledPackage {
    /// Path of an installed dependency's manifest.
    pub fn manifest_path(project_root: &Path, dependency: &str) -> PathBuf {
        // Scoped names ("@scope/pkg") nest one directory deeper, which
        // `join` handles since the name contains the separator.
        project_root
            .join(MODULES_DIR)
            .join(dependency)
            .join(MANIFEST_FILE)
    }

    /// Load an installed dependency's manifest, if the dependency is installed.
    pub fn load(project_root: &Path, dependency: &str) -> Result<Option<Self>> {
        let path = Self::manifest_path(project_root, dependency);
        if !path.is_file() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }

    /// Whether the package declares its own type entry point.
    pub fn has_bundled_types(&self) -> bool {
        is_truthy(self.types.as_ref()) || is_truthy(self.typings.as_ref())
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| TypieError::ManifestParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
