//! Status vocabulary for per-dependency lines.

use super::theme::TypieTheme;

/// How a dependency's resolution is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// A type package will be installed.
    Found,
    /// Types are already declared in the manifest.
    Skipped,
    /// The package ships its own types.
    Bundled,
    /// The registry has no type package.
    Missing,
    /// The registry could not be asked.
    Failed,
}

impl StatusKind {
    /// Unicode icon for TTY output.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Found => "✓",
            Self::Skipped => "▶",
            Self::Bundled => "⚠",
            Self::Missing => "✗",
            Self::Failed => "!",
        }
    }

    /// Styled line: icon and message in the status color.
    pub fn format(self, theme: &TypieTheme, msg: &str) -> String {
        let style = match self {
            Self::Found => &theme.success,
            Self::Skipped | Self::Bundled | Self::Failed => &theme.warning,
            Self::Missing => &theme.missing,
        };
        style.apply_to(format!("{} {}", self.icon(), msg)).to_string()
    }
}
