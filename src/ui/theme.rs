//! Theme management and ANSI escape sequence generation.
//!
//! Two themes are built in, `practice-dark` (default) and `practice-light`.
//! Custom themes are TOML files of the same shape:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e6edf3"
//! selection_fg = "#0d1117"
//! selection_bg = "#58a6ff"
//! text_normal = "#c9d1d9"
//! text_dim = "#6e7681"
//! border = "#30363d"
//! filter_bar_border = "#58a6ff"
//! match_highlight_fg = "#0d1117"
//! match_highlight_bg = "#e3b341"
//! empty_state_fg = "#79c0ff"
//! duration_fg = "#d2a8ff"
//! button_fg = "#3fb950"
//! error_fg = "#f85149"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::error::{PracticeError, Result};

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "practice-dark";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Secondary text: username, age, keybinding help.
    pub text_dim: String,

    pub border: String,

    pub filter_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Duration overlay color.
    pub duration_fg: String,

    /// "Load more" and "Load practice" buttons.
    pub button_fg: String,

    /// Surfaced load failures.
    pub error_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name, `None` if unknown.
    ///
    /// ```
    /// use practice_feed::ui::Theme;
    ///
    /// let theme = Theme::from_name("practice-light").unwrap();
    /// assert_eq!(theme.name, "practice-light");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "practice-dark" => include_str!("../../themes/practice-dark.toml"),
            "practice-light" => include_str!("../../themes/practice-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PracticeError::Io`] if the file cannot be read and
    /// [`PracticeError::Config`] if it is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| PracticeError::Config(format!("failed to parse theme TOML: {e}")))
    }

    /// Converts `#rrggbb` to RGB, white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape sequence for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape sequence for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns `practice-dark`.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in practice-dark theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        assert_eq!(Theme::default().name, DEFAULT_THEME);
        let light = Theme::from_name("practice-light").unwrap();
        assert_eq!(light.colors.header_bg.as_deref(), Some("#f6f8fa"));
    }

    #[test]
    fn escape_sequences() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("zz"), "\u{1b}[48;2;255;255;255m");
    }

    #[test]
    fn custom_theme_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let dark = include_str!("../../themes/practice-dark.toml").replace("practice-dark", "mine");
        file.write_all(dark.as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "mine");
    }

    #[test]
    fn malformed_theme_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = \"broken\"").unwrap();

        assert!(matches!(
            Theme::from_file(file.path()),
            Err(PracticeError::Config(_))
        ));
    }
}
