//! The scrollable page content — a banner followed by a feed of
//! fixed-height cards, rendered at the surface's current offset.
//!
//! The header's flow slot is *skipped* here: those rows belong to the
//! sticky header widget, which draws itself at the expression-derived
//! position (usually the same rows, until it pins).

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::binding::ContentLayout;

use super::theme::Theme;

/// Height of the sticky header, in rows.
pub const HEADER_ROWS: usize = 3;

/// Height of one feed card, in rows (title, two body lines, gap).
pub const CARD_ROWS: usize = 4;

/// Body copy cycled across cards.
const CARD_BODY: &[[&str; 2]] = &[
    [
        "Scrolling content slides underneath the pinned bar while the",
        "bar itself stops moving the moment it reaches the top edge.",
    ],
    [
        "Nothing recomputes this card's position besides the frame",
        "pipeline; input handlers only move the scroll target.",
    ],
    [
        "Keep scrolling — three header-heights down, the accent panel",
        "stretches across the full width of the bar.",
    ],
    [
        "Scroll back up and every effect reverses: the panel shrinks,",
        "the bar brightens, and it finally re-enters normal flow.",
    ],
];

// ───────────────────────────────────────── page spec ─────────

/// Static description of the demo page, fixed at startup from the CLI.
#[derive(Debug, Clone, Copy)]
pub struct PageSpec {
    /// Rows of banner content above the sticky header.
    pub banner_rows: usize,
    /// Number of feed cards below the header.
    pub card_count: usize,
}

impl PageSpec {
    /// Complete the content layout.  Called during draw, once the frame
    /// area is known — the result is what the binding measures against.
    pub fn measure(&self) -> ContentLayout {
        ContentLayout {
            header_row: self.banner_rows,
            header_rows: HEADER_ROWS,
            content_rows: self.banner_rows + HEADER_ROWS + self.card_count * CARD_ROWS,
        }
    }
}

// ───────────────────────────────────────── widget ────────────

/// The page content, created fresh each frame.
pub struct ContentView<'a> {
    spec: &'a PageSpec,
    /// Rendered scroll offset in rows (fractional mid-glide).
    scroll: f32,
}

impl<'a> ContentView<'a> {
    pub fn new(spec: &'a PageSpec, scroll: f32) -> Self {
        Self { spec, scroll }
    }

    fn banner_line(&self, row: usize, width: usize) -> Option<Line<'static>> {
        match row {
            1 => Some(Line::from(Span::styled(
                center("s t i c k y · h e a d e r", width),
                Theme::banner_title_style(),
            ))),
            2 => Some(Line::from(Span::styled(
                center("scroll down — the bar below pins to the top", width),
                Theme::banner_hint_style(),
            ))),
            _ => None,
        }
    }

    fn card_line(&self, card: usize, line: usize, width: usize) -> Option<Line<'static>> {
        if card >= self.spec.card_count {
            return None;
        }
        let body = &CARD_BODY[card % CARD_BODY.len()];
        match line {
            0 => Some(Line::from(vec![
                Span::styled(format!("  Item {:02}  ", card + 1), Theme::card_title_style()),
                Span::styled(
                    "─".repeat(width.saturating_sub(12)),
                    Theme::card_rule_style(),
                ),
            ])),
            1 => Some(Line::from(Span::styled(
                format!("  {}", body[0]),
                Theme::card_body_style(),
            ))),
            2 => Some(Line::from(Span::styled(
                format!("  {}", body[1]),
                Theme::card_body_style(),
            ))),
            _ => None, // gap row
        }
    }
}

impl Widget for ContentView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let layout = self.spec.measure();
        let scroll_base = self.scroll.round() as usize;
        let width = area.width as usize;

        for y in 0..area.height {
            let row = scroll_base + y as usize;

            let line = if row < self.spec.banner_rows {
                self.banner_line(row, width)
            } else if row < layout.header_row + layout.header_rows {
                // The header's flow slot — leave it to the header widget.
                continue;
            } else {
                let rel = row - (layout.header_row + layout.header_rows);
                self.card_line(rel / CARD_ROWS, rel % CARD_ROWS, width)
            };

            if let Some(line) = line {
                buf.set_line(area.x, area.y + y, &line, area.width);
            }
        }
    }
}

/// Pad a label to the centre of `width` columns.
fn center(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.chars().count()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_places_the_header_after_the_banner() {
        let spec = PageSpec {
            banner_rows: 6,
            card_count: 24,
        };
        let layout = spec.measure();
        assert_eq!(layout.header_row, 6);
        assert_eq!(layout.header_rows, HEADER_ROWS);
        assert_eq!(layout.content_rows, 6 + HEADER_ROWS + 24 * CARD_ROWS);
    }

    #[test]
    fn measure_is_stable_across_calls() {
        let spec = PageSpec {
            banner_rows: 4,
            card_count: 10,
        };
        assert_eq!(spec.measure(), spec.measure());
    }
}
