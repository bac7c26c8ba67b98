//! Command-line interface for typie.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`run`] - The detect, read, resolve, install pipeline

pub mod args;
pub mod run;

pub use args::Cli;
pub use run::RunCommand;
