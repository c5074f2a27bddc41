//! # Terminal Output
//!
//! Decides whether progress lines get emoji markers and colors, and maps the
//! handful of markers the CLI prints to their emoji or plain-text form.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

use crate::status::SubmoduleStatus;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
    /// Whether stdout is an interactive terminal (enables the spinner).
    pub interactive: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `color_flag` is the value of `--color`: "always", "never", or "auto".
    /// In auto mode colors are disabled by `NO_COLOR`, `CLICOLOR=0`,
    /// `TERM=dumb`, or a non-TTY stdout (unless `CLICOLOR_FORCE=1`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self {
            use_color,
            interactive: console::Term::stdout().is_term(),
        }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            use_color: false,
            interactive: false,
        }
    }

    #[cfg(test)]
    pub fn fancy() -> Self {
        Self {
            use_color: true,
            interactive: false,
        }
    }

    /// Render a marker for this configuration.
    pub fn glyph(&self, glyph: Glyph) -> &'static str {
        if self.use_color {
            glyph.emoji()
        } else {
            glyph.plain()
        }
    }

    /// Color `text` according to the submodule state, when colors are on.
    pub fn paint_status(&self, status: SubmoduleStatus, text: &str) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let style = match status {
            SubmoduleStatus::UpToDate => console::Style::new().green(),
            SubmoduleStatus::Modified => console::Style::new().yellow(),
            SubmoduleStatus::Uninitialized => console::Style::new().dim(),
            SubmoduleStatus::MergeConflict => console::Style::new().red().bold(),
        };
        style.force_styling(true).apply_to(text).to_string()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Markers printed in front of progress and summary lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Sync,
    Ok,
    Fail,
    Retry,
    Stats,
    Clean,
    Delete,
    Timer,
    Log,
    Hint,
    Empty,
}

impl Glyph {
    fn emoji(self) -> &'static str {
        match self {
            Glyph::Sync => "🔄",
            Glyph::Ok => "✅",
            Glyph::Fail => "❌",
            Glyph::Retry => "🔁",
            Glyph::Stats => "📊",
            Glyph::Clean => "🧹",
            Glyph::Delete => "🗑️",
            Glyph::Timer => "⏱️",
            Glyph::Log => "📄",
            Glyph::Hint => "📝",
            Glyph::Empty => "📭",
        }
    }

    fn plain(self) -> &'static str {
        match self {
            Glyph::Sync => "[SYNC]",
            Glyph::Ok => "[OK]",
            Glyph::Fail => "[FAIL]",
            Glyph::Retry => "[RETRY]",
            Glyph::Stats => "[STATS]",
            Glyph::Clean => "[CLEAN]",
            Glyph::Delete => "[DELETE]",
            Glyph::Timer => "[TIME]",
            Glyph::Log => "[LOG]",
            Glyph::Hint => "[NEXT]",
            Glyph::Empty => "[NONE]",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_always() {
        let config = OutputConfig::from_env_and_flag("always");
        assert!(config.use_color);
    }

    #[test]
    fn test_color_never() {
        let config = OutputConfig::from_env_and_flag("NEVER");
        assert!(!config.use_color);
    }

    #[test]
    fn test_glyph_with_color() {
        assert_eq!(OutputConfig::fancy().glyph(Glyph::Ok), "✅");
    }

    #[test]
    fn test_glyph_without_color() {
        let config = OutputConfig::plain();
        assert_eq!(config.glyph(Glyph::Ok), "[OK]");
        assert_eq!(config.glyph(Glyph::Fail), "[FAIL]");
    }

    #[test]
    fn test_paint_status_plain_is_identity() {
        let config = OutputConfig::plain();
        assert_eq!(
            config.paint_status(SubmoduleStatus::MergeConflict, "conflict"),
            "conflict"
        );
    }

    #[test]
    fn test_paint_status_adds_escape_codes() {
        let painted = OutputConfig::fancy().paint_status(SubmoduleStatus::UpToDate, "ok");
        assert!(painted.contains("ok"));
        assert!(painted.contains('\u{1b}'));
    }
}
