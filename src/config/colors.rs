//! Color configuration for the TUI.
//!
//! Two palettes are configured, one per theme. Each palette in the config file
//! is a table of `key = "color"` overrides applied on top of the built-in
//! palette for that theme.

use std::collections::BTreeMap;

use ratatui::style::Color;
use serde::Deserialize;

use crate::app::theme::Theme;

/// Colors used by one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub active_border: Color,
    pub inactive_border: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub text: Color,
    pub muted: Color,
    pub tag: Color,
    pub date: Color,
    pub link: Color,
    pub error: Color,
    pub status_fg: Color,
    pub status_bg: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            background: Color::Reset,
            active_border: Color::Green,
            inactive_border: Color::DarkGray,
            selection_bg: Color::Green,
            selection_fg: Color::Black,
            text: Color::White,
            muted: Color::Gray,
            tag: Color::LightGreen,
            date: Color::Yellow,
            link: Color::LightBlue,
            error: Color::LightRed,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::White,
            active_border: Color::Rgb(16, 124, 16),
            inactive_border: Color::Gray,
            selection_bg: Color::Rgb(16, 124, 16),
            selection_fg: Color::White,
            text: Color::Black,
            muted: Color::DarkGray,
            tag: Color::Rgb(16, 124, 16),
            date: Color::Rgb(120, 90, 0),
            link: Color::Blue,
            error: Color::Red,
            status_fg: Color::Black,
            status_bg: Color::Gray,
        }
    }

    /// Override a single named color.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let color = parse_color_string(value)?;
        let slot = match key {
            "background" => &mut self.background,
            "active_border" => &mut self.active_border,
            "inactive_border" => &mut self.inactive_border,
            "selection_bg" => &mut self.selection_bg,
            "selection_fg" => &mut self.selection_fg,
            "text" => &mut self.text,
            "muted" => &mut self.muted,
            "tag" => &mut self.tag,
            "date" => &mut self.date,
            "link" => &mut self.link,
            "error" => &mut self.error,
            "status_fg" => &mut self.status_fg,
            "status_bg" => &mut self.status_bg,
            _ => return Err(format!("Unknown color key: {}", key)),
        };
        *slot = color;
        Ok(())
    }
}

/// Configuration for all TUI colors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawColorConfig")]
pub struct ColorConfig {
    pub dark: Palette,
    pub light: Palette,
}

impl ColorConfig {
    pub fn palette(&self, theme: Theme) -> &Palette {
        match theme {
            Theme::Dark => &self.dark,
            Theme::Light => &self.light,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            dark: Palette::dark(),
            light: Palette::light(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawColorConfig {
    dark: BTreeMap<String, String>,
    light: BTreeMap<String, String>,
}

impl TryFrom<RawColorConfig> for ColorConfig {
    type Error = String;

    fn try_from(raw: RawColorConfig) -> Result<Self, Self::Error> {
        let mut config = ColorConfig::default();
        for (key, value) in &raw.dark {
            config.dark.set(key, value)?;
        }
        for (key, value) in &raw.light {
            config.light.set(key, value)?;
        }
        Ok(config)
    }
}

/// Parse a color string into a ratatui Color.
///
/// Supports:
/// - Named colors: "Black", "Red", "Green", "Yellow", "Blue", "Magenta", "Cyan", "Gray",
///   "DarkGray", "LightRed", "LightGreen", "LightYellow", "LightBlue", "LightMagenta",
///   "LightCyan", "White", "Reset"
/// - Hex colors: "#RRGGBB" or "#RGB"
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    match s.to_lowercase().as_str() {
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" => Ok(Color::Cyan),
        "gray" | "grey" => Ok(Color::Gray),
        "darkgray" | "darkgrey" => Ok(Color::DarkGray),
        "lightred" => Ok(Color::LightRed),
        "lightgreen" => Ok(Color::LightGreen),
        "lightyellow" => Ok(Color::LightYellow),
        "lightblue" => Ok(Color::LightBlue),
        "lightmagenta" => Ok(Color::LightMagenta),
        "lightcyan" => Ok(Color::LightCyan),
        "white" => Ok(Color::White),
        "reset" => Ok(Color::Reset),
        _ => Err(format!("Unknown color: {}", s)),
    }
}

fn parse_hex_color(s: &str) -> Result<Color, String> {
    let hex = s.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .ok_or_else(|| format!("Invalid hex color: {}", s))
    };

    match hex.len() {
        6 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        // #RGB expands to #RRGGBB
        3 => Ok(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => Err(format!("Invalid hex color format: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color_string("Cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color_string("cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color_string("DarkGrey").unwrap(), Color::DarkGray);
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(parse_color_string("#107C10").unwrap(), Color::Rgb(16, 124, 16));
        assert_eq!(parse_color_string("#F00").unwrap(), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn test_parse_invalid_colors() {
        assert!(parse_color_string("invalid").is_err());
        assert!(parse_color_string("#GGGGGG").is_err());
        assert!(parse_color_string("#12345").is_err());
        assert!(parse_color_string("#ééé").is_err());
    }

    #[test]
    fn test_palette_per_theme() {
        let colors = ColorConfig::default();
        assert_eq!(colors.palette(Theme::Dark), &Palette::dark());
        assert_eq!(colors.palette(Theme::Light), &Palette::light());
    }

    #[test]
    fn test_partial_override_keeps_theme_defaults() {
        let colors: ColorConfig = toml::from_str(
            r##"
[light]
active_border = "#FF0000"
"##,
        )
        .unwrap();

        assert_eq!(colors.light.active_border, Color::Rgb(255, 0, 0));
        assert_eq!(colors.light.text, Palette::light().text);
        assert_eq!(colors.dark, Palette::dark());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result: Result<ColorConfig, _> = toml::from_str("[dark]\nborder_colour = \"Red\"\n");
        assert!(result.is_err());
    }
}
