// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use ratatui::style::{Color, Modifier, Style};

const PRIMARY: Color = Color::Rgb(0x06, 0xB6, 0xD4);
const MUTED: Color = Color::Rgb(0x6B, 0x72, 0x80);
const FOREGROUND: Color = Color::Rgb(0xF9, 0xFA, 0xFB);
const DANGER: Color = Color::Rgb(0xEF, 0x44, 0x44);
const BORDER: Color = Color::Rgb(0x37, 0x41, 0x51);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleName {
    Title,
    Muted,
    Selected,
    Normal,
    Label,
    Focused,
    Error,
    Border,
}

/// Named styles handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    title: Style,
    muted: Style,
    selected: Style,
    normal: Style,
    label: Style,
    focused: Style,
    error: Style,
    border: Style,
    category_colors: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            title: Style::default()
                .fg(FOREGROUND)
                .add_modifier(Modifier::BOLD),
            muted: Style::default().fg(MUTED),
            selected: Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
            normal: Style::default().fg(FOREGROUND),
            label: Style::default().fg(MUTED),
            focused: Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
            error: Style::default().fg(DANGER),
            border: Style::default().fg(BORDER),
            category_colors: true,
        }
    }

    /// Modifiers only; safe on terminals without color.
    pub fn plain() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        Self {
            title: bold,
            muted: Style::default().add_modifier(Modifier::DIM),
            selected: Style::default().add_modifier(Modifier::REVERSED),
            normal: Style::default(),
            label: Style::default(),
            focused: bold,
            error: bold,
            border: Style::default(),
            category_colors: false,
        }
    }

    pub fn style(&self, name: StyleName) -> Style {
        match name {
            StyleName::Title => self.title,
            StyleName::Muted => self.muted,
            StyleName::Selected => self.selected,
            StyleName::Normal => self.normal,
            StyleName::Label => self.label,
            StyleName::Focused => self.focused,
            StyleName::Error => self.error,
            StyleName::Border => self.border,
        }
    }

    /// Bold header in the category's own color, when the theme uses color and
    /// the color parses.
    pub fn category_style(&self, color: &str) -> Style {
        let style = Style::default().add_modifier(Modifier::BOLD);
        match parse_hex_color(color) {
            Some(color) if self.category_colors => style.fg(color),
            _ => style,
        }
    }
}

/// Parses `#RRGGBB` (leading `#` optional).
pub fn parse_hex_color(raw: &str) -> Option<Color> {
    let hex = raw.trim().strip_prefix('#').unwrap_or(raw.trim());
    if hex.len() != 6 || !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::{StyleName, Theme, parse_hex_color};
    use ratatui::style::{Color, Modifier};

    #[test]
    fn parse_hex_color_accepts_rgb_triplets() {
        assert_eq!(parse_hex_color("#10B981"), Some(Color::Rgb(0x10, 0xB9, 0x81)));
        assert_eq!(parse_hex_color("3b82f6"), Some(Color::Rgb(0x3B, 0x82, 0xF6)));
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
        assert_eq!(parse_hex_color(""), None);
    }

    #[test]
    fn category_style_respects_theme() {
        let dark = Theme::dark().category_style("#F59E0B");
        assert_eq!(dark.fg, Some(Color::Rgb(0xF5, 0x9E, 0x0B)));
        assert!(dark.add_modifier.contains(Modifier::BOLD));

        let plain = Theme::plain().category_style("#F59E0B");
        assert_eq!(plain.fg, None);

        assert_eq!(Theme::dark().category_style("teal").fg, None);
    }

    #[test]
    fn plain_theme_has_no_colors() {
        let theme = Theme::plain();
        for name in [
            StyleName::Title,
            StyleName::Muted,
            StyleName::Selected,
            StyleName::Normal,
            StyleName::Label,
            StyleName::Focused,
            StyleName::Error,
            StyleName::Border,
        ] {
            assert_eq!(theme.style(name).fg, None, "{name:?}");
        }
    }
}
