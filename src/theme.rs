//! Pastel palette for the flashcard page
//! Colors can be overridden from the `[theme]` table of config.toml

use ratatui::style::Color;

use crate::config::ThemeOverrides;

/// Theme colors for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Color,       // Active pronounce button, selected card border (pink)
    pub accent_soft: Color,  // Category badges, active gradient end (lavender)
    pub mint: Color,         // Translation strip
    pub cream: Color,        // Page background tint
    pub text: Color,         // Primary text
    pub text_dim: Color,     // Transliteration, hints
    pub inactive: Color,     // Idle card borders
    pub on_accent: Color,    // Text drawn over accent backgrounds
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(255, 199, 234),       // #FFC7EA
            accent_soft: Color::Rgb(216, 200, 255),  // #D8C8FF
            mint: Color::Rgb(199, 255, 241),         // #C7FFF1
            cream: Color::Rgb(255, 246, 233),        // #FFF6E9
            text: Color::Rgb(229, 231, 235),
            text_dim: Color::Rgb(156, 163, 175),
            inactive: Color::Rgb(107, 114, 128),
            on_accent: Color::Rgb(31, 41, 55),
        }
    }
}

impl Theme {
    /// Default palette with any valid overrides applied
    pub fn load(overrides: &ThemeOverrides) -> Self {
        let mut theme = Self::default();

        let pick = |value: &Option<String>, fallback: Color| -> Color {
            match value.as_deref() {
                Some(hex) => Self::parse_hex_color(hex).unwrap_or_else(|| {
                    tracing::warn!("Ignoring invalid theme color: {}", hex);
                    fallback
                }),
                None => fallback,
            }
        };

        theme.accent = pick(&overrides.accent, theme.accent);
        theme.accent_soft = pick(&overrides.accent_soft, theme.accent_soft);
        theme.mint = pick(&overrides.mint, theme.mint);
        theme.cream = pick(&overrides.cream, theme.cream);
        theme.text = pick(&overrides.text, theme.text);
        theme.text_dim = pick(&overrides.text_dim, theme.text_dim);

        theme
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    pub fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');

        if !s.is_ascii() {
            return None;
        }

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(Theme::parse_hex_color("#FFC7EA"), Some(Color::Rgb(255, 199, 234)));
        assert_eq!(Theme::parse_hex_color("d8c8ff"), Some(Color::Rgb(216, 200, 255)));
        assert_eq!(Theme::parse_hex_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(Theme::parse_hex_color("#12"), None);
        assert_eq!(Theme::parse_hex_color("#GGGGGG"), None);
        assert_eq!(Theme::parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_overrides() {
        let overrides = ThemeOverrides {
            accent: Some("#000000".to_string()),
            mint: Some("not a color".to_string()),
            ..Default::default()
        };
        let theme = Theme::load(&overrides);
        let default = Theme::default();

        assert_eq!(theme.accent, Color::Rgb(0, 0, 0));
        assert_eq!(theme.mint, default.mint);
        assert_eq!(theme.accent_soft, default.accent_soft);
    }
}
