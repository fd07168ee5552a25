//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system for the console, supporting
//! built-in themes and custom themes loaded from TOML files. It provides
//! utilities for converting hex colors to ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `saga-blue`: Light theme with blue accents (default)
//! - `vela-blue`: Dark theme with blue accents
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#2196f3"
//! selection_fg = "#495057"
//! selection_bg = "#e3f2fd"
//! text_normal = "#495057"
//! text_dim = "#6c757d"
//! border = "#dee2e6"
//! match_highlight_fg = "#212529"
//! match_highlight_bg = "#ffe082"
//! empty_state_fg = "#2196f3"
//! success_fg = "#689f38"
//! error_fg = "#d32f2f"
//! dialog_border = "#2196f3"
//! ```

use crate::domain::error::{PetdeskError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "saga-blue";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#2196f3"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected row foreground color.
    pub selection_fg: String,
    /// Selected row background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, paginator).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Global search match highlight foreground.
    pub match_highlight_fg: String,
    /// Global search match highlight background.
    pub match_highlight_bg: String,

    /// Empty table message color.
    pub empty_state_fg: String,

    /// Success notification color.
    pub success_fg: String,
    /// Error notification and inline validation color.
    pub error_fg: String,

    /// Dialog frame color.
    pub dialog_border: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// # Returns
    ///
    /// - `Some(Theme)` if the theme name is recognized
    /// - `None` if the theme name is unknown
    ///
    /// # Example
    ///
    /// ```
    /// use petdesk::ui::Theme;
    ///
    /// let theme = Theme::from_name("vela-blue").unwrap();
    /// assert_eq!(theme.name, "vela-blue");
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "saga-blue" => include_str!("../../themes/saga-blue.toml"),
            "vela-blue" => include_str!("../../themes/vela-blue.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PetdeskError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            PetdeskError::Config(format!("failed to read theme file {}: {e}", path.display()))
        })?;

        toml::from_str(&contents)
            .map_err(|e| PetdeskError::Config(format!("failed to parse theme TOML: {e}")))
    }

    /// Picks the configured theme: a theme file wins over a built-in name.
    ///
    /// # Errors
    ///
    /// Returns [`PetdeskError::Config`] for an unknown name or a bad file.
    pub fn resolve(name: &str, file: Option<&Path>) -> Result<Self> {
        if let Some(file) = file {
            return Self::from_file(file);
        }
        Self::from_name(name).ok_or_else(|| PetdeskError::Config(format!("unknown theme: {name}")))
    }

    /// Converts a hex color to an RGB tuple. Returns white on parse errors.
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

    /// ANSI 24-bit foreground color escape sequence (`\x1b[38;2;r;g;bm`).
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence (`\x1b[48;2;r;g;bm`).
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

    /// Clears all styling (colors, bold, dim).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }

    /// Palette used if the built-in default cannot be loaded.
    fn monochrome() -> Self {
        let white = "#ffffff".to_string();
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                header_fg: white.clone(),
                header_bg: None,
                selection_fg: "#000000".to_string(),
                selection_bg: white.clone(),
                text_normal: white.clone(),
                text_dim: "#a0a0a0".to_string(),
                border: "#808080".to_string(),
                match_highlight_fg: "#000000".to_string(),
                match_highlight_bg: "#c0c0c0".to_string(),
                empty_state_fg: white.clone(),
                success_fg: white.clone(),
                error_fg: white.clone(),
                dialog_border: white,
            },
        }
    }
}

impl Default for Theme {
    /// Returns the default theme (`saga-blue`).
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| {
            tracing::warn!("built-in theme failed to parse, using monochrome");
            Self::monochrome()
        })
    }
}
