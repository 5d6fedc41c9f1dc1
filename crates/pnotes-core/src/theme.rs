use std::fmt;
use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::error::Error;

/// Session display preference. Never stored with notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Label of the header toggle: names the theme it would switch to.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Light => "\u{263E} Dark",
            Theme::Dark => "\u{2600} Light",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Light => Palette::light(),
            Theme::Dark => Palette::dark(),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(Error::Config(format!(
                "unknown theme '{other}' (expected 'light' or 'dark')"
            ))),
        }
    }
}

// ── Palette ──────────────────────────────────────────────────────────

const BRAND_PRIMARY: Color = Color::Rgb(0x34, 0x98, 0xdb);
const BRAND_SECONDARY: Color = Color::Rgb(0x2e, 0xcc, 0x71);
const BRAND_ACCENT: Color = Color::Rgb(0xe6, 0x7e, 0x22);

/// Concrete colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub sidebar_bg: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub error: Color,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(0xff, 0xff, 0xff),
            fg: Color::Rgb(0x2c, 0x3e, 0x50),
            muted: Color::Rgb(0x7f, 0x8c, 0x8d),
            border: Color::Rgb(0xbd, 0xc3, 0xc7),
            border_focused: BRAND_PRIMARY,
            header_bg: BRAND_PRIMARY,
            header_fg: Color::Rgb(0xff, 0xff, 0xff),
            sidebar_bg: Color::Rgb(0xf8, 0xf9, 0xfa),
            selection_bg: Color::Rgb(0xe6, 0xf2, 0xfc),
            selection_fg: Color::Rgb(0x34, 0x49, 0x5e),
            primary: BRAND_PRIMARY,
            secondary: BRAND_SECONDARY,
            accent: BRAND_ACCENT,
            error: Color::Rgb(0xc0, 0x39, 0x2b),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(0x1e, 0x1e, 0x24),
            fg: Color::Rgb(0xdc, 0xdc, 0xdc),
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: BRAND_PRIMARY,
            header_bg: Color::Rgb(0x1f, 0x4e, 0x79),
            header_fg: Color::Rgb(0xec, 0xf0, 0xf1),
            sidebar_bg: Color::Rgb(0x28, 0x28, 0x30),
            selection_bg: Color::Rgb(40, 40, 60),
            selection_fg: Color::Rgb(0xec, 0xf0, 0xf1),
            primary: BRAND_PRIMARY,
            secondary: BRAND_SECONDARY,
            accent: BRAND_ACCENT,
            error: Color::Rgb(0xe7, 0x4c, 0x3c),
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" light ".parse::<Theme>().unwrap(), Theme::Light);
        assert!("solarized".parse::<Theme>().is_err());
    }

    #[test]
    fn test_toggle_label_names_other_theme() {
        assert!(Theme::Light.toggle_label().contains("Dark"));
        assert!(Theme::Dark.toggle_label().contains("Light"));
    }
}
