//! The sticky header widget — a two-cell bar with an accent panel.
//!
//! The widget is dumb on purpose: its vertical position, opacity, and
//! panel size all arrive pre-derived from the frame pipeline.  The left
//! cell carries the title, the right cell carries the tabs over the
//! accent panel; past the secondary threshold the panel's size covers
//! both cells.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::content::HEADER_ROWS;
use super::theme::Theme;

/// Accent panel covering its own cell of the two-cell bar.
pub const PANEL_ONE_CELL: [f32; 2] = [0.5, 1.0];

/// Accent panel spanning both cells.
pub const PANEL_TWO_CELLS: [f32; 2] = [1.0, 1.0];

/// The header bar, created fresh each frame from pipeline outputs.
pub struct StickyHeader {
    /// Top row of the bar relative to the page area.  Already includes
    /// the derived sticky offset, so `0` means pinned at the top edge.
    pub screen_row: i32,
    /// Sampled opacity, `1.0` full to `0.0` invisible.
    pub opacity: f32,
    /// Sampled panel size as `[width, height]` fractions of the bar.
    pub panel_size: [f32; 2],
}

impl Widget for StickyHeader {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // ── accent panel (background cells) ─────────────────────
        // Anchored to the right cell; growing the width fraction past
        // the cell boundary makes it span the whole bar.
        let panel_cols = (area.width as f32 * self.panel_size[0].clamp(0.0, 1.0)).round() as u16;
        let panel_rows =
            (HEADER_ROWS as f32 * self.panel_size[1].clamp(0.0, 1.0)).round() as i32;
        let panel_x = area.x + area.width - panel_cols;

        for r in 0..HEADER_ROWS as i32 {
            let y = self.screen_row + r;
            if y < 0 || y >= area.height as i32 {
                continue;
            }
            let y = area.y + y as u16;

            // The bar is opaque: blank the row so content that slid
            // underneath never shows through.
            let blank = Line::from(Span::styled(
                " ".repeat(area.width as usize),
                Theme::header_bar_style(self.opacity),
            ));
            buf.set_line(area.x, y, &blank, area.width);

            if r < panel_rows && panel_cols > 0 {
                buf.set_style(
                    Rect::new(panel_x, y, panel_cols, 1),
                    Theme::panel_style(self.opacity),
                );
            }

            // ── bar text (middle row only) ──────────────────────
            if r == 1 {
                let line = Line::from(vec![
                    Span::styled("  ☰ demo page", Theme::header_title_style(self.opacity)),
                    Span::styled(
                        "    Overview    Activity    Settings",
                        Theme::header_tab_style(self.opacity),
                    ),
                ]);
                buf.set_line(area.x, y, &line, area.width);
            }
        }
    }
}
