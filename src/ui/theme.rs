//! Colour palette and text styles used across the UI.
//!
//! Opacity is a first-class input here: the terminal has no alpha
//! channel, so "50% opacity" is approximated by scaling RGB channels
//! toward black.  Styles that participate in the fade take the sampled
//! opacity instead of being constants.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

/// Scale an RGB colour by `opacity` in `[0, 1]`.
fn fade(rgb: (u8, u8, u8), opacity: f32) -> Color {
    let k = opacity.clamp(0.0, 1.0);
    Color::Rgb(
        (rgb.0 as f32 * k) as u8,
        (rgb.1 as f32 * k) as u8,
        (rgb.2 as f32 * k) as u8,
    )
}

impl Theme {
    // ── sticky header ──────────────────────────────────────────
    pub fn header_title_style(opacity: f32) -> Style {
        Style::default()
            .fg(fade((235, 235, 245), opacity))
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_tab_style(opacity: f32) -> Style {
        Style::default().fg(fade((180, 185, 205), opacity))
    }

    /// Opaque background of the whole bar; content slides under it.
    pub fn header_bar_style(opacity: f32) -> Style {
        Style::default().bg(fade((36, 39, 54), opacity))
    }

    /// Background of the accent panel behind the header cells.
    pub fn panel_style(opacity: f32) -> Style {
        Style::default().bg(fade((64, 86, 186), opacity))
    }

    // ── page content ───────────────────────────────────────────
    pub fn banner_title_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn banner_hint_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn card_title_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn card_body_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn card_rule_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn status_accent_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }
}
