//! typie - Install missing TypeScript type definitions.
//!
//! typie reads a project's `package.json`, finds dependencies that neither
//! ship their own types nor have an `@types` package declared, checks the
//! npm registry for a matching `@types` package, and installs the ones that
//! exist with the project's package manager.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and the install pipeline
//! - [`config`] - Run configuration
//! - [`detection`] - Package manager detection
//! - [`error`] - Error types and result aliases
//! - [`install`] - Install command construction and execution
//! - [`manifest`] - `package.json` loading
//! - [`resolve`] - Dependency classification and registry resolution
//! - [`shell`] - Shell command execution
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use typie::manifest::Manifest;
//! use typie::resolve::Classification;
//! use std::path::Path;
//!
//! let manifest = Manifest::parse(
//!     r#"{"dependencies": {"lodash": "^4.0.0", "@types/lodash": "^4.0.0", "left-pad": "^1.0.0"}}"#,
//!     Path::new("package.json"),
//! )
//! .unwrap();
//!
//! let classification = Classification::from_dependencies(&manifest.merged_dependencies());
//! assert!(classification.has_types_for("lodash"));
//! assert_eq!(classification.candidates, vec!["left-pad", "lodash"]);
//! ```

pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod install;
pub mod manifest;
pub mod resolve;
pub mod shell;
pub mod ui;

pub use error::{Result, TypieError};
