//! Color themes for the gallery.
//!
//! Provides:
//! - Theme struct with all UI color roles
//! - Built-in presets (paper, ink, catppuccin-mocha, nord, gruvbox)
//! - Hex color parsing for config overrides

use ratatui::style::Color;
use thiserror::Error;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Main background color
    pub background: Color,
    /// Primary text color
    pub foreground: Color,
    /// Background of the selected card
    pub selection_bg: Color,
    /// Text color on the selected card
    pub selection_fg: Color,
    /// Accent color (header, submit button, active borders)
    pub accent: Color,
    /// Dimmed text (descriptions, placeholders)
    pub dimmed: Color,
    /// More dimmed text (card footer, inactive borders)
    pub dimmed_alt: Color,
    /// Background of the add-form overlay
    pub overlay_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::paper()
    }
}

impl Theme {
    /// Paper theme - default. White gallery, black accents.
    pub fn paper() -> Self {
        Self {
            background: Color::Rgb(255, 255, 255), // #ffffff
            foreground: Color::Rgb(17, 17, 17),    // #111111
            selection_bg: Color::Rgb(243, 244, 246), // #f3f4f6
            selection_fg: Color::Rgb(0, 0, 0),     // #000000
            accent: Color::Rgb(0, 0, 0),           // #000000
            dimmed: Color::Rgb(75, 85, 99),        // #4b5563
            dimmed_alt: Color::Rgb(156, 163, 175), // #9ca3af
            overlay_bg: Color::Rgb(249, 250, 251), // #f9fafb
        }
    }

    /// Ink theme - dark counterpart to paper
    pub fn ink() -> Self {
        Self {
            background: Color::Rgb(13, 17, 22),    // #0d1116
            foreground: Color::Rgb(229, 234, 241), // #e5eaf1
            selection_bg: Color::Rgb(20, 28, 42),  // #141c2a
            selection_fg: Color::Rgb(229, 234, 241), // #e5eaf1
            accent: Color::Rgb(180, 83, 9),        // #b45309 (amber)
            dimmed: Color::Rgb(156, 163, 175),     // #9ca3af
            dimmed_alt: Color::Rgb(107, 114, 128), // #6b7280
            overlay_bg: Color::Rgb(22, 27, 34),    // #161b22
        }
    }

    /// Catppuccin Mocha theme
    pub fn catppuccin_mocha() -> Self {
        Self {
            background: Color::Rgb(30, 30, 46),    // #1e1e2e (base)
            foreground: Color::Rgb(205, 214, 244), // #cdd6f4 (text)
            selection_bg: Color::Rgb(49, 50, 68),  // #313244 (surface0)
            selection_fg: Color::Rgb(205, 214, 244), // #cdd6f4 (text)
            accent: Color::Rgb(137, 180, 250),     // #89b4fa (blue)
            dimmed: Color::Rgb(166, 173, 200),     // #a6adc8 (subtext0)
            dimmed_alt: Color::Rgb(147, 153, 178), // #9399b2 (overlay2)
            overlay_bg: Color::Rgb(24, 24, 37),    // #181825 (mantle)
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            background: Color::Rgb(46, 52, 64),    // #2e3440 (nord0)
            foreground: Color::Rgb(236, 239, 244), // #eceff4 (nord6)
            selection_bg: Color::Rgb(67, 76, 94),  // #434c5e (nord2)
            selection_fg: Color::Rgb(236, 239, 244), // #eceff4 (nord6)
            accent: Color::Rgb(136, 192, 208),     // #88c0d0 (nord8)
            dimmed: Color::Rgb(216, 222, 233),     // #d8dee9 (nord4)
            dimmed_alt: Color::Rgb(76, 86, 106),   // #4c566a (nord3)
            overlay_bg: Color::Rgb(59, 66, 82),    // #3b4252 (nord1)
        }
    }

    /// Gruvbox dark theme
    pub fn gruvbox() -> Self {
        Self {
            background: Color::Rgb(40, 40, 40),    // #282828 (bg)
            foreground: Color::Rgb(235, 219, 178), // #ebdbb2 (fg)
            selection_bg: Color::Rgb(60, 56, 54),  // #3c3836 (bg1)
            selection_fg: Color::Rgb(235, 219, 178), // #ebdbb2 (fg)
            accent: Color::Rgb(215, 153, 33),      // #d79921 (yellow)
            dimmed: Color::Rgb(168, 153, 132),     // #a89984 (gray)
            dimmed_alt: Color::Rgb(146, 131, 116), // #928374 (gray)
            overlay_bg: Color::Rgb(50, 48, 47),    // #32302f (bg0_s)
        }
    }

    /// Load theme from preset name
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "paper" | "default" => Some(Self::paper()),
            "ink" | "dark" => Some(Self::ink()),
            "catppuccin-mocha" | "catppuccin_mocha" | "catppuccin" => Some(Self::catppuccin_mocha()),
            "nord" => Some(Self::nord()),
            "gruvbox" | "gruvbox-dark" | "gruvbox_dark" => Some(Self::gruvbox()),
            _ => None,
        }
    }
}

/// Color parsing error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("invalid color length (expected 3 or 6 hex chars)")]
    InvalidLength,
    #[error("invalid hex character")]
    InvalidHex,
}

/// Parse a hex color string to a Color.
/// Supports #rrggbb and #rgb, with or without the leading '#'.
pub fn parse_hex_color(s: &str) -> Result<Color, ColorError> {
    let s = s.trim().trim_start_matches('#');

    let channel = |range: &str| u8::from_str_radix(range, 16).map_err(|_| ColorError::InvalidHex);

    match s.len() {
        // #rgb expands each nibble: f -> ff
        3 => {
            let r = channel(&s[0..1])?;
            let g = channel(&s[1..2])?;
            let b = channel(&s[2..3])?;
            Ok(Color::Rgb(r * 17, g * 17, b * 17))
        }
        6 => Ok(Color::Rgb(
            channel(&s[0..2])?,
            channel(&s[2..4])?,
            channel(&s[4..6])?,
        )),
        _ => Err(ColorError::InvalidLength),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6() {
        assert_eq!(parse_hex_color("#ff0000"), Ok(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("00ff00"), Ok(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#0d1116"), Ok(Color::Rgb(13, 17, 22)));
    }

    #[test]
    fn test_parse_hex_3() {
        assert_eq!(parse_hex_color("#f00"), Ok(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("0f0"), Ok(Color::Rgb(0, 255, 0)));
    }

    #[test]
    fn test_parse_hex_invalid() {
        assert!(parse_hex_color("invalid").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
        assert!(parse_hex_color("#ff00").is_err());
    }

    #[test]
    fn test_presets() {
        assert!(Theme::from_preset("paper").is_some());
        assert!(Theme::from_preset("ink").is_some());
        assert!(Theme::from_preset("catppuccin-mocha").is_some());
        assert!(Theme::from_preset("nord").is_some());
        assert!(Theme::from_preset("gruvbox").is_some());
        assert!(Theme::from_preset("nonexistent").is_none());
    }
}
