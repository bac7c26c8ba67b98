//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{OutputMode, ProgressSpinner, SpinnerHandle, StatusKind, TypieTheme, UserInterface};

/// Terminal UI implementation.
///
/// Status lines go to stdout; errors go to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: TypieTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a terminal UI with an explicit theme.
    pub fn with_theme(mode: OutputMode, theme: TypieTheme) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn info(&mut self, msg: &str) {
        if self.mode.shows_details() {
            writeln!(self.out, "{}", self.theme.format_info(msg)).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn status(&mut self, kind: StatusKind, msg: &str) {
        if self.mode.shows_details() {
            writeln!(self.out, "{}", kind.format(&self.theme, msg)).ok();
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }
}
