//! Shell command execution.

use crate::error::{Result, TypieError};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Signal that terminated the command, on unix.
    pub signal: Option<i32>,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Whether the command was stopped by Ctrl-C.
    pub fn interrupted(&self) -> bool {
        self.signal == Some(SIGINT)
    }
}

const SIGINT: i32 = 2;

/// Execute a command line through the platform shell.
///
/// stdin, stdout and stderr are inherited from this process so the child
/// can draw progress bars and ask questions directly.
pub fn execute_inherited(command: &str, cwd: &Path) -> Result<CommandResult> {
    let start = Instant::now();

    let shell = shell_program();
    tracing::debug!("Running `{}` via {} in {}", command, shell, cwd.display());

    let status = Command::new(&shell)
        .arg(shell_flag())
        .arg(command)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| {
            tracing::debug!("Failed to spawn {}: {}", shell, e);
            TypieError::InstallerFailed {
                command: command.to_string(),
                code: None,
            }
        })?;

    Ok(CommandResult {
        exit_code: status.code(),
        signal: terminating_signal(&status),
        duration: start.elapsed(),
        success: status.success(),
    })
}

#[cfg(unix)]
fn terminating_signal(status: &std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: &std::process::ExitStatus) -> Option<i32> {
    None
}

/// Quote a single argument for the platform shell when it needs it.
pub fn quote_arg(arg: &str) -> String {
    let needs_quoting = arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || "<>|&;()$`\\\"'*?[]{}!#~=%^".contains(c));

    // `^` is common in version ranges and harmless to POSIX shells.
    let needs_quoting = needs_quoting && !(cfg!(unix) && is_plain_with_caret(arg));

    if !needs_quoting {
        return arg.to_string();
    }

    if cfg!(target_os = "windows") {
        format!("\"{}\"", arg.replace('"', "\"\""))
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}

fn is_plain_with_caret(arg: &str) -> bool {
    arg.chars()
        .all(|c| c.is_ascii_alphanumeric() || "@/._-^~+:".contains(c))
}

/// The shell install commands run through.
///
/// Always `/bin/sh` on unix, whatever `SHELL` says; [`quote_arg`] quotes for
/// a POSIX shell.
fn shell_program() -> String {
    if cfg!(target_os = "windows") {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        "/bin/sh".to_string()
    }
}

/// Get the flag to pass commands to the shell.
///
/// Not a login shell: profile scripts may rewrite PATH, and the installer
/// must be the one detection found on this process's PATH.
fn shell_flag() -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else {
        "-c"
    }
}
