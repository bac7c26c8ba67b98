//! Shell command execution.

pub mod command;

pub use command::{execute_inherited, quote_arg, CommandResult};
