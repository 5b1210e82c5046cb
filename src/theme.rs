//! ANSI color helpers for CLI output
//!
//! Colors are applied only when stdout is a terminal and `NO_COLOR` is unset,
//! so piped JSON and snapshot tests always see plain text.

/// ANSI reset sequence
pub const ANSI_RESET: &str = "\x1b[0m";

/// ANSI color codes used by the CLI
pub mod ansi {
    /// Gray (ANSI 37) - body text
    pub const GRAY: &str = "\x1b[37m";
    /// Green (ANSI 32) - headers
    pub const GREEN: &str = "\x1b[32m";
    /// Light green (ANSI 92) - accent and success
    pub const LIGHT_GREEN: &str = "\x1b[92m";
    /// Red (ANSI 31) - errors
    pub const RED: &str = "\x1b[31m";
    /// Yellow (ANSI 33) - warnings
    pub const YELLOW: &str = "\x1b[33m";
    /// Dark gray (ANSI 90) - secondary text
    pub const DARK_GRAY: &str = "\x1b[90m";
}

/// Whether colored output should be written to stdout.
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
}

/// Colors for human-readable CLI output.
#[derive(Debug, Clone)]
pub struct Theme {
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub accent: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub success: &'static str,
    /// When false every helper returns the text unchanged
    pub enabled: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_primary: ansi::GRAY,
            text_secondary: ansi::DARK_GRAY,
            accent: ansi::LIGHT_GREEN,
            warning: ansi::YELLOW,
            error: ansi::RED,
            success: ansi::LIGHT_GREEN,
            enabled: true,
        }
    }
}

/// Theme for the current process, colored only on a terminal.
pub fn current_theme() -> Theme {
    Theme {
        enabled: colors_enabled(),
        ..Theme::default()
    }
}

impl Theme {
    /// A theme that never emits escape codes.
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.enabled {
            format!("{}{}{}", color, text, ANSI_RESET)
        } else {
            text.to_string()
        }
    }

    pub fn accent_text(&self, text: &str) -> String {
        self.paint(self.accent, text)
    }

    pub fn primary_text(&self, text: &str) -> String {
        self.paint(self.text_primary, text)
    }

    pub fn secondary_text(&self, text: &str) -> String {
        self.paint(self.text_secondary, text)
    }

    pub fn warning_text(&self, text: &str) -> String {
        self.paint(self.warning, text)
    }

    pub fn error_text(&self, text: &str) -> String {
        self.paint(self.error, text)
    }

    pub fn success_text(&self, text: &str) -> String {
        self.paint(self.success, text)
    }
}
