//! The sticky-header binding: measure once, bind once, then let the
//! frame pipeline hold the header in place.
//!
//! Sign convention (used consistently everywhere): the live translation
//! starts at `0` and grows *negative* as the user scrolls down, and the
//! reference offset is the content origin expressed in the header's own
//! frame — negative when the header rests below the top of the content.
//! A header 100 rows down therefore measures as `-100`, pins once the
//! translation drops below `-100`, and trips the secondary threshold
//! below `-300`.

use thiserror::Error;
use tracing::{debug, trace};

use crate::core::compositor::{Compositor, StickyExpression};

// ───────────────────────────────────────── errors ────────────

/// The two fatal setup failures.  Neither is retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    /// The binding was set up before the first layout pass; the reference
    /// offset would be garbage, so fail loudly instead of guessing.
    #[error("layout has not completed; the reference offset is undefined")]
    LayoutNotReady,
    /// The composition target cannot evaluate expressions per frame.
    #[error("composition target does not support expression animations")]
    ExpressionsUnsupported,
}

// ───────────────────────────────────────── layout input ──────

/// Geometry of the completed content layout, produced during draw.
/// The binding only measures against this — it never computes layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentLayout {
    /// Flow row of the sticky header within the scroll content.
    pub header_row: usize,
    /// Height of the header, in rows.
    pub header_rows: usize,
    /// Total content height, in rows.
    pub content_rows: usize,
}

/// One-time measured distance from the scroll content's origin to the
/// header's origin, in the header's frame.  Immutable for the lifetime
/// of the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceOffset(pub f32);

// ───────────────────────────────────────── latch output ──────

/// Latch flips produced by one scroll-changed notification.  `None`
/// means that latch did not change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThresholdChange {
    pub primary: Option<bool>,
    pub secondary: Option<bool>,
}

impl ThresholdChange {
    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondary.is_none()
    }
}

// ───────────────────────────────────────── binding ───────────

/// The sticky binding proper: the measured reference offset plus the two
/// reversible threshold latches fed by discrete notifications.
#[derive(Debug)]
pub struct StickyBinding {
    offset: ReferenceOffset,
    /// Paint order raised above sibling content at initialize time.
    raised: bool,
    past_primary: bool,
    past_secondary: bool,
}

impl StickyBinding {
    /// Measure the reference offset from a completed layout and raise the
    /// header's paint order.  Callers guard this to run once per view
    /// lifetime; on an unchanged layout a second call measures the same
    /// offset.
    pub fn initialize(layout: Option<&ContentLayout>) -> Result<Self, BindError> {
        let layout = layout.ok_or(BindError::LayoutNotReady)?;
        // Content origin in the header's frame: the header sits
        // `header_row` rows below it, so the origin is that far *up*.
        let offset = -(layout.header_row as f32);
        debug!(offset, "measured reference offset");
        Ok(Self {
            offset: ReferenceOffset(offset),
            raised: true,
            past_primary: false,
            past_secondary: false,
        })
    }

    /// Register the pinning expression with the compositor.  One-shot:
    /// a target that cannot evaluate the expression against a live scroll
    /// property set is a setup failure, reported here and never retried.
    pub fn bind(&self, compositor: &mut Compositor) -> Result<(), BindError> {
        let caps = compositor.capabilities();
        if !caps.expression_animations || !caps.scroll_property_set {
            return Err(BindError::ExpressionsUnsupported);
        }
        compositor.register(StickyExpression {
            reference_offset: self.offset.0,
        });
        debug!(offset = self.offset.0, "pinning expression bound");
        Ok(())
    }

    /// Discrete scroll-changed notification (throttled by the surface,
    /// not per frame).  Updates the two latches and reports which of
    /// them flipped; all visual side effects belong to the caller.
    pub fn on_scroll_changed(&mut self, translation: f32) -> ThresholdChange {
        trace!(translation, "scroll changed");

        let primary = translation < self.offset.0;
        let secondary = translation < self.offset.0 * 3.0;

        let mut change = ThresholdChange::default();
        if primary != self.past_primary {
            self.past_primary = primary;
            change.primary = Some(primary);
        }
        if secondary != self.past_secondary {
            self.past_secondary = secondary;
            change.secondary = Some(secondary);
        }
        change
    }

    pub fn offset(&self) -> ReferenceOffset {
        self.offset
    }

    /// Whether the header's paint order has been raised above siblings.
    pub fn raised(&self) -> bool {
        self.raised
    }

    pub fn past_primary(&self) -> bool {
        self.past_primary
    }

    pub fn past_secondary(&self) -> bool {
        self.past_secondary
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compositor::Capabilities;

    fn layout() -> ContentLayout {
        ContentLayout {
            header_row: 100,
            header_rows: 3,
            content_rows: 400,
        }
    }

    #[test]
    fn initialize_requires_a_completed_layout() {
        let err = StickyBinding::initialize(None).unwrap_err();
        assert_eq!(err, BindError::LayoutNotReady);
    }

    #[test]
    fn initialize_is_idempotent_on_an_unchanged_layout() {
        let l = layout();
        let a = StickyBinding::initialize(Some(&l)).unwrap();
        let b = StickyBinding::initialize(Some(&l)).unwrap();
        assert!((a.offset().0 - b.offset().0).abs() < 1e-6);
        assert_eq!(a.offset().0, -100.0);
        assert!(a.raised(), "initialize raises the paint order");
    }

    #[test]
    fn bind_rejects_a_target_without_expressions() {
        let binding = StickyBinding::initialize(Some(&layout())).unwrap();
        let mut comp = Compositor::new(Capabilities {
            expression_animations: false,
            scroll_property_set: true,
        });
        assert_eq!(
            binding.bind(&mut comp).unwrap_err(),
            BindError::ExpressionsUnsupported
        );
        assert!(!comp.has_expression());
    }

    #[test]
    fn bind_registers_the_expression() {
        let binding = StickyBinding::initialize(Some(&layout())).unwrap();
        let mut comp = Compositor::new(Capabilities::detect());
        binding.bind(&mut comp).unwrap();
        assert!(comp.has_expression());

        comp.sample_translation(-150.0);
        comp.evaluate();
        assert_eq!(comp.sticky_offset(), 50.0);
    }

    #[test]
    fn latches_flip_exactly_once_on_a_monotone_scroll() {
        let mut binding = StickyBinding::initialize(Some(&layout())).unwrap();

        let mut primary_flips = 0;
        let mut secondary_flips = 0;
        let mut translation = 0.0_f32;
        while translation > -400.0 {
            let change = binding.on_scroll_changed(translation);
            if change.primary.is_some() {
                primary_flips += 1;
            }
            if change.secondary.is_some() {
                secondary_flips += 1;
                // The secondary threshold sits three offsets down; it can
                // never trip while the primary latch is still clear.
                assert!(binding.past_primary());
            }
            translation -= 0.5;
        }

        assert_eq!(primary_flips, 1);
        assert_eq!(secondary_flips, 1);
        assert!(binding.past_primary());
        assert!(binding.past_secondary());
    }

    #[test]
    fn latches_reverse_on_the_way_back_up() {
        let mut binding = StickyBinding::initialize(Some(&layout())).unwrap();

        binding.on_scroll_changed(-350.0);
        assert!(binding.past_primary() && binding.past_secondary());

        let change = binding.on_scroll_changed(-150.0);
        assert_eq!(change.secondary, Some(false));
        assert_eq!(change.primary, None, "primary is still past");

        let change = binding.on_scroll_changed(-50.0);
        assert_eq!(change.primary, Some(false));
        assert!(!binding.past_primary() && !binding.past_secondary());
    }

    #[test]
    fn resting_position_is_not_past_the_threshold() {
        let mut binding = StickyBinding::initialize(Some(&layout())).unwrap();
        // Exactly at the resting position: strictly-past semantics.
        let change = binding.on_scroll_changed(-100.0);
        assert!(change.is_empty());
        assert!(!binding.past_primary());

        let change = binding.on_scroll_changed(-100.5);
        assert_eq!(change.primary, Some(true));
    }
}
