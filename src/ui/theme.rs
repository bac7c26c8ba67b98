//! Visual theme and styling.

use console::Style;

/// typie's visual theme.
#[derive(Debug, Clone)]
pub struct TypieTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for skipped dependencies and failed checks (yellow).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for "no types" lines (red).
    pub missing: Style,
    /// Style for progress narration (blue).
    pub info: Style,
}

impl Default for TypieTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl TypieTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            missing: Style::new().red(),
            info: Style::new().blue(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            missing: Style::new(),
            info: Style::new(),
        }
    }

    /// Pick the colored or plain theme for the current terminal.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a narration line (blue, no icon).
    pub fn format_info(&self, msg: &str) -> String {
        format!("{}", self.info.apply_to(msg))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check if stdout is a TTY
    console::Term::stdout().is_term()
}
