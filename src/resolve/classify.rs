//! Splitting dependencies into type packages and candidates.

use std::collections::BTreeSet;

use crate::manifest::DependencyMap;

/// Namespace type packages are published under.
pub const TYPES_SCOPE: &str = "@types/";

/// Whether a dependency is itself a type package.
pub fn is_type_package(name: &str) -> bool {
    name.starts_with(TYPES_SCOPE)
}

/// Name of the type package covering a dependency.
///
/// Scoped packages follow the DefinitelyTyped convention: `@scope/pkg`
/// maps to `@types/scope__pkg`.
pub fn type_package_name(dependency: &str) -> String {
    match dependency
        .strip_prefix('@')
        .and_then(|scoped| scoped.split_once('/'))
    {
        Some((scope, name)) => format!("{}{}__{}", TYPES_SCOPE, scope, name),
        None => format!("{}{}", TYPES_SCOPE, dependency),
    }
}

/// Dependencies split by whether they need resolving.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Type packages already declared in the manifest.
    pub already_typed: BTreeSet<String>,

    /// Everything else, ordered by name.
    pub candidates: Vec<String>,
}

impl Classification {
    /// Classify the keys of a merged dependency map.
    pub fn from_dependencies(dependencies: &DependencyMap) -> Self {
        let (already_typed, candidates): (Vec<&String>, Vec<&String>) =
            dependencies.keys().partition(|name| is_type_package(name));

        Self {
            already_typed: already_typed.into_iter().cloned().collect(),
            candidates: candidates.into_iter().cloned().collect(),
        }
    }

    /// Whether a candidate's type package is already declared.
    pub fn has_types_for(&self, dependency: &str) -> bool {
        self.already_typed.contains(&type_package_name(dependency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deps(names: &[&str]) -> DependencyMap {
        names
            .iter()
            .map(|n| (n.to_string(), "^1.0.0".to_string()))
            .collect()
    }

    #[test]
    fn type_package_name_unscoped() {
        assert_eq!(type_package_name("left-pad"), "@types/left-pad");
    }

    #[test]
    fn type_package_name_scoped() {
        assert_eq!(type_package_name("@babel/core"), "@types/babel__core");
    }

    #[test]
    fn type_package_name_bare_at_sign() {
        assert_eq!(type_package_name("@weird"), "@types/@weird");
    }

    #[test]
    fn classify_splits_type_packages() {
        let classification =
            Classification::from_dependencies(&deps(&["lodash", "@types/lodash", "react"]));

        assert_eq!(
            classification.already_typed.iter().collect::<Vec<_>>(),
            vec!["@types/lodash"]
        );
        assert_eq!(classification.candidates, vec!["lodash", "react"]);
    }

    #[test]
    fn classify_empty_map() {
        let classification = Classification::from_dependencies(&DependencyMap::new());

        assert!(classification.already_typed.is_empty());
        assert!(classification.candidates.is_empty());
    }

    #[test]
    fn has_types_for_uses_counterpart() {
        let classification = Classification::from_dependencies(&deps(&[
            "lodash",
            "@types/lodash",
            "@babel/core",
            "@types/babel__core",
            "react",
        ]));

        assert!(classification.has_types_for("lodash"));
        assert!(classification.has_types_for("@babel/core"));
        assert!(!classification.has_types_for("react"));
    }

    #[test]
    fn scoped_non_types_packages_are_candidates() {
        let classification = Classification::from_dependencies(&deps(&["@typescript/lib"]));

        assert_eq!(classification.candidates, vec!["@typescript/lib"]);
    }
}
