//! Error types for typie operations.
//!
//! This module defines [`TypieError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Detection, manifest and installer errors are fatal and abort the run
//! - Registry probe failures never become a `TypieError`; the resolver turns
//!   them into a "no types available" outcome for that dependency
//! - Use `anyhow::Error` (via `TypieError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for typie operations.
#[derive(Debug, Error)]
pub enum TypieError {
    /// No supported package manager on PATH and none given with `--tool`.
    #[error("Couldn't find a supported package manager tool (tried {tried}). Use --tool to pick one.")]
    NoToolDetected { tried: String },

    /// The project manifest does not exist.
    #[error("No package.json file found at {path}")]
    ManifestNotFound { path: PathBuf },

    /// A manifest (project or installed package) could not be parsed.
    #[error("Failed to parse {path}: {message}")]
    ManifestParseError { path: PathBuf, message: String },

    /// The package manager exited unsuccessfully.
    #[error("Install command failed with exit code {code:?}: {command}")]
    InstallerFailed { command: String, code: Option<i32> },

    /// The run was cancelled while registry probes were in flight.
    #[error("Interrupted while checking the registry")]
    Interrupted,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TypieError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoToolDetected { .. }
            | Self::ManifestNotFound { .. }
            | Self::ManifestParseError { .. } => 2,
            Self::InstallerFailed { code, .. } => code.unwrap_or(1),
            Self::Interrupted => 130,
            Self::Io(_) | Self::Other(_) => 1,
        }
    }
}

/// Result type alias for typie operations.
pub type Result<T> = std::result::Result<T, TypieError>;
