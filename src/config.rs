use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ui::theme::{parse_hex_color, Theme};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub appearance: AppearanceConfig,
    pub behavior: BehaviorConfig,
    pub images: ImagesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Theme preset name: "paper", "ink", "catppuccin-mocha", "nord", "gruvbox"
    pub theme: String,
    /// Custom accent color as hex (e.g. "#b45309"), overrides the preset
    pub accent: Option<String>,
    /// Number of card columns in the gallery grid
    pub columns: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Show the description line on cards
    pub show_descriptions: bool,
    /// Show the like/share footer on cards
    pub show_card_actions: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Enable graphics-protocol image rendering
    pub enabled: bool,
    /// Rows of each card reserved for the image
    pub rows: u16,
    /// Fallback image shown when loading fails
    pub placeholder: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            appearance: AppearanceConfig::default(),
            behavior: BehaviorConfig::default(),
            images: ImagesConfig::default(),
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: "paper".to_string(),
            accent: None,
            columns: 3,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            show_descriptions: true,
            show_card_actions: true,
        }
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rows: 8,
            placeholder: "assets/placeholder.svg".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Resolve the configured theme preset, applying the accent override.
    /// Unknown preset names and bad hex values fall back with a warning.
    pub fn resolve_theme(&self) -> Theme {
        let mut theme = Theme::from_preset(&self.appearance.theme).unwrap_or_else(|| {
            tracing::warn!("Unknown theme preset {:?}, using default", self.appearance.theme);
            Theme::default()
        });

        if let Some(ref hex) = self.appearance.accent {
            match parse_hex_color(hex) {
                Ok(color) => theme.accent = color,
                Err(e) => tracing::warn!("Ignoring bad accent color {:?}: {}", hex, e),
            }
        }

        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.appearance.theme, "paper");
        assert_eq!(config.appearance.columns, 3);
        assert!(config.images.enabled);
    }

    #[test]
    fn test_partial_toml() {
        // Unspecified sections and keys fall back to defaults
        let config: Config = toml::from_str(
            r#"
            [appearance]
            theme = "nord"
            columns = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.appearance.theme, "nord");
        assert_eq!(config.appearance.columns, 2);
        assert!(config.behavior.show_descriptions);
        assert_eq!(config.images.rows, 8);
    }

    #[test]
    fn test_accent_override() {
        let config: Config = toml::from_str(
            r##"
            [appearance]
            accent = "#ff0000"
            "##,
        )
        .unwrap();

        let theme = config.resolve_theme();
        assert_eq!(theme.accent, ratatui::style::Color::Rgb(255, 0, 0));
    }
}
