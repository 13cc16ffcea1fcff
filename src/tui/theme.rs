//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;
use serde::{Deserialize, Serialize};

use crate::scoring::{BadgeLevel, Tier};

/// Theme preference from the config file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Pick dark or light from the terminal background
    #[default]
    Auto,
    Dark,
    Light,
}

/// Resolve the configured theme to a palette. `Auto` asks the terminal for
/// its background luminance and falls back to dark when it can't tell.
pub fn resolve_theme(theme: Theme) -> ThemeColors {
    match theme {
        Theme::Dark => ThemeColors::dark(),
        Theme::Light => ThemeColors::light(),
        Theme::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            _ => ThemeColors::dark(),
        },
    }
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Badge colors (traffic light pattern)
    pub badge_high: Color,
    pub badge_mid: Color,
    pub badge_low: Color,

    // Tier colors for breakdown rows
    pub tier_great: Color,
    pub tier_good: Color,
    pub tier_needs_work: Color,
    pub tier_poor: Color,

    // Score bar colors
    pub bar_empty: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub index_color: Color,
    pub top_pick: Color,

    // Styles
    pub title_style: Style,
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,

    // Filter bar
    pub filter_label: Color,
    pub filter_value: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Divider and separator colors
    pub divider_color: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    /// Dark theme palette
    pub fn dark() -> Self {
        Self {
            badge_high: Color::Green,
            badge_mid: Color::Yellow,
            badge_low: Color::Red,
            tier_great: Color::Green,
            tier_good: Color::LightGreen,
            tier_needs_work: Color::Yellow,
            tier_poor: Color::Red,
            bar_empty: Color::DarkGray,
            row_alt_bg: Color::Indexed(235),
            index_color: Color::DarkGray,
            top_pick: Color::Cyan,
            title_style: Style::new().bold(),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            filter_label: Color::DarkGray,
            filter_value: Style::new().fg(Color::Cyan).bold(),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            divider_color: Color::Indexed(238),
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    /// Light theme palette: darker foregrounds, pale backgrounds
    pub fn light() -> Self {
        Self {
            badge_high: Color::Rgb(0, 128, 0),
            badge_mid: Color::Rgb(176, 112, 0),
            badge_low: Color::Rgb(192, 0, 0),
            tier_great: Color::Rgb(0, 128, 0),
            tier_good: Color::Rgb(60, 140, 60),
            tier_needs_work: Color::Rgb(176, 112, 0),
            tier_poor: Color::Rgb(192, 0, 0),
            bar_empty: Color::Indexed(250),
            row_alt_bg: Color::Indexed(254),
            index_color: Color::Indexed(244),
            top_pick: Color::Blue,
            title_style: Style::new().bold(),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Indexed(242),
            title_color: Color::Blue,
            filter_label: Color::Indexed(244),
            filter_value: Style::new().fg(Color::Blue).bold(),
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(0, 128, 0),
            flash_error: Color::Rgb(192, 0, 0),
            divider_color: Color::Indexed(250),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_bg: Color::Indexed(255),
        }
    }

    pub fn badge_color(&self, level: BadgeLevel) -> Color {
        match level {
            BadgeLevel::High => self.badge_high,
            BadgeLevel::Mid => self.badge_mid,
            BadgeLevel::Low => self.badge_low,
        }
    }

    pub fn tier_color(&self, tier: Tier) -> Color {
        match tier {
            Tier::Great => self.tier_great,
            Tier::Good => self.tier_good,
            Tier::NeedsWork => self.tier_needs_work,
            Tier::Poor => self.tier_poor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_themes_resolve() {
        assert_eq!(resolve_theme(Theme::Dark).title_color, Color::Cyan);
        assert_eq!(resolve_theme(Theme::Light).title_color, Color::Blue);
    }

    #[test]
    fn test_badge_and_tier_colors() {
        let colors = ThemeColors::dark();
        assert_eq!(colors.badge_color(BadgeLevel::High), Color::Green);
        assert_eq!(colors.badge_color(BadgeLevel::Low), Color::Red);
        assert_eq!(colors.tier_color(Tier::NeedsWork), Color::Yellow);
    }

    #[test]
    fn test_theme_parse() {
        let theme: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(theme, Theme::Light);
        assert_eq!(Theme::default(), Theme::Auto);
    }
}
