//! The scroll surface — owner of the live vertical scroll translation.
//!
//! Input events move an integer row target; each tick the rendered offset
//! decays exponentially toward it, so the translation glides with visible
//! deceleration instead of jumping.  Everything downstream (the frame
//! pipeline, the threshold notifications) reads the surface, never the
//! raw input events.

/// Minimum movement, in rows, before a view-change notification fires.
const NOTIFY_EPSILON: f32 = 0.25;

/// Displacement below this snaps to the target and ends the glide.
const SETTLE_EPSILON: f64 = 0.05;

/// Vertical scroll model for one scrollable content region.
#[derive(Debug, Clone)]
pub struct ScrollSurface {
    /// Total content height in rows.
    content_rows: usize,
    /// Viewport height in rows; updated from the frame area every draw.
    viewport_rows: usize,
    /// Integer scroll target, clamped to `0..=max_scroll`.
    target: usize,
    /// Fractional rendered offset, decaying toward `target`.
    rendered: f64,
    /// Damping: `rendered` closes this fraction of the gap per tick.
    speed: f64,
    /// When false, `rendered` tracks `target` exactly.
    smooth: bool,
    /// Translation value of the last delivered view-change notification.
    notified: f32,
}

impl ScrollSurface {
    pub fn new(content_rows: usize, speed: f64) -> Self {
        Self {
            content_rows,
            viewport_rows: 0,
            target: 0,
            rendered: 0.0,
            speed: speed.clamp(0.05, 0.95),
            smooth: true,
            notified: 0.0,
        }
    }

    // ── geometry ────────────────────────────────────────────────

    /// Record the viewport height for this frame and re-clamp the target.
    pub fn set_viewport(&mut self, rows: usize) {
        if self.viewport_rows != rows {
            self.viewport_rows = rows;
            self.clamp_target();
        }
    }

    /// Record the content height and re-clamp the target.
    pub fn set_content(&mut self, rows: usize) {
        if self.content_rows != rows {
            self.content_rows = rows;
            self.clamp_target();
        }
    }

    /// Greatest reachable scroll offset.
    pub fn max_scroll(&self) -> usize {
        self.content_rows.saturating_sub(self.viewport_rows)
    }

    fn clamp_target(&mut self) {
        self.target = self.target.min(self.max_scroll());
    }

    // ── input mutations ─────────────────────────────────────────

    /// Scroll by whole rows; negative moves toward the top.
    pub fn scroll_lines(&mut self, delta: isize) {
        let next = self.target as isize + delta;
        self.target = next.clamp(0, self.max_scroll() as isize) as usize;
        self.after_move();
    }

    /// Scroll by one viewport, minus a row of overlap for continuity.
    pub fn page(&mut self, direction: isize) {
        let step = self.viewport_rows.saturating_sub(1).max(1) as isize;
        self.scroll_lines(direction * step);
    }

    pub fn jump_top(&mut self) {
        self.target = 0;
        self.after_move();
    }

    pub fn jump_bottom(&mut self) {
        self.target = self.max_scroll();
        self.after_move();
    }

    /// Without the glide, moves land in the same event that caused them.
    fn after_move(&mut self) {
        if !self.smooth {
            self.rendered = self.target as f64;
        }
    }

    /// Enable or disable the smooth glide.  Disabling mid-glide snaps.
    pub fn set_smooth(&mut self, smooth: bool) {
        self.smooth = smooth;
        if !smooth {
            self.rendered = self.target as f64;
        }
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(0.05, 0.95);
    }

    // ── per-tick animation ──────────────────────────────────────

    /// Close part of the gap between the rendered offset and the target.
    /// Call once per tick.
    pub fn tick(&mut self) {
        if !self.smooth {
            self.rendered = self.target as f64;
            return;
        }
        let gap = self.target as f64 - self.rendered;
        if gap.abs() < SETTLE_EPSILON {
            self.rendered = self.target as f64;
        } else {
            self.rendered += gap * self.speed;
        }
    }

    /// True while the glide is still visibly in motion.
    pub fn is_settling(&self) -> bool {
        (self.target as f64 - self.rendered).abs() >= SETTLE_EPSILON
    }

    // ── read side ───────────────────────────────────────────────

    /// Rendered scroll offset in rows (fractional during a glide).
    pub fn scroll_offset(&self) -> f32 {
        self.rendered as f32
    }

    /// The live scroll translation: `0` at rest, increasingly **negative**
    /// as the user scrolls down.
    pub fn translation(&self) -> f32 {
        -(self.rendered as f32)
    }

    /// Throttled view-change notification.  Returns the current
    /// translation when it has moved at least [`NOTIFY_EPSILON`] rows
    /// since the last delivery, and records the delivery.
    pub fn take_view_change(&mut self) -> Option<f32> {
        let current = self.translation();
        if (current - self.notified).abs() >= NOTIFY_EPSILON {
            self.notified = current;
            Some(current)
        } else {
            None
        }
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> ScrollSurface {
        let mut s = ScrollSurface::new(200, 0.35);
        s.set_viewport(40);
        s
    }

    #[test]
    fn scrolling_clamps_to_content_bounds() {
        let mut s = surface();
        s.scroll_lines(-10);
        assert_eq!(s.target, 0);
        s.scroll_lines(10_000);
        assert_eq!(s.target, 160); // 200 content - 40 viewport
        s.jump_top();
        assert_eq!(s.target, 0);
        s.jump_bottom();
        assert_eq!(s.target, s.max_scroll());
    }

    #[test]
    fn shrinking_content_reclamps_the_target() {
        let mut s = surface();
        s.jump_bottom();
        s.set_content(60);
        assert_eq!(s.target, 20);
    }

    #[test]
    fn translation_grows_negative_scrolling_down() {
        let mut s = surface();
        s.set_smooth(false);
        s.scroll_lines(30);
        assert!((s.translation() + 30.0).abs() < 1e-6);
        assert!((s.scroll_offset() - 30.0).abs() < 1e-6);
    }

    #[test]
    fn glide_settles_on_the_target() {
        let mut s = surface();
        s.scroll_lines(50);
        assert!(s.is_settling());
        for _ in 0..200 {
            s.tick();
        }
        assert!(!s.is_settling());
        assert!((s.scroll_offset() - 50.0).abs() < 1e-6);
    }

    #[test]
    fn view_change_fires_once_per_movement() {
        let mut s = surface();
        s.set_smooth(false);
        assert_eq!(s.take_view_change(), None, "no movement, no delivery");

        s.scroll_lines(10);
        s.tick();
        let first = s.take_view_change();
        assert_eq!(first, Some(-10.0));
        assert_eq!(s.take_view_change(), None, "already delivered");

        s.scroll_lines(1);
        s.tick();
        assert_eq!(s.take_view_change(), Some(-11.0));
    }
}
