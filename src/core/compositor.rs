//! A small software composition layer.
//!
//! The terminal has no retained-mode compositor, so this module plays the
//! part: it samples the live scroll translation once per frame, evaluates
//! the registered pinning expression before the frame is presented, and
//! routes property writes through the implicit-animation table.  No input
//! handler touches the derived offset — handlers write inputs, the
//! pipeline derives outputs.

use std::time::Duration;

use crate::core::animation::{Animated, AnimatedProperty, Value};

// ───────────────────────────────────────── capabilities ──────

/// What the composition target can do.  Checked once, at bind time.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    /// Per-frame declarative expression evaluation.
    pub expression_animations: bool,
    /// A live property set fed by the scroll surface.
    pub scroll_property_set: bool,
}

impl Capabilities {
    /// The built-in software pipeline supports the full surface.
    pub fn detect() -> Self {
        Self {
            expression_animations: true,
            scroll_property_set: true,
        }
    }
}

// ───────────────────────────────────────── expression ────────

/// The pinning expression: a two-term piecewise formula over the live
/// translation and a constant reference offset.
///
/// While the surface has not yet scrolled past the element
/// (`translation > offset` — both are negative-growing), the output holds
/// at zero and the element rides in normal flow.  Past that point the
/// output exactly cancels the displacement beyond the offset, so the
/// element's screen position stops moving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickyExpression {
    pub reference_offset: f32,
}

impl StickyExpression {
    pub fn evaluate(&self, translation: f32) -> f32 {
        if translation > self.reference_offset {
            0.0
        } else {
            self.reference_offset - translation
        }
    }
}

// ───────────────────────────────────────── compositor ────────

/// Property store + frame pipeline.
///
/// Per frame, the main loop calls [`Compositor::sample_translation`] with
/// the surface's live value and then [`Compositor::evaluate`]; widgets
/// read the frame-consistent results ([`Compositor::sticky_offset`],
/// [`Compositor::opacity`], [`Compositor::panel_size`]) during draw.
pub struct Compositor {
    caps: Capabilities,
    /// Live input, sampled once per frame.
    translation: f32,
    /// Registered expression; present after a successful bind.
    expression: Option<StickyExpression>,
    /// Output of the expression for the sampled input.
    derived_offset: f32,
    /// One slot per property kind, indexed by [`AnimatedProperty::index`].
    slots: [Animated; 5],
    /// When false, property writes snap instead of easing.
    animations_enabled: bool,
}

impl Compositor {
    pub fn new(caps: Capabilities) -> Self {
        Self {
            caps,
            translation: 0.0,
            expression: None,
            derived_offset: 0.0,
            slots: [
                Animated::new(AnimatedProperty::Opacity, [1.0, 0.0, 0.0]),
                Animated::new(AnimatedProperty::Offset, [0.0, 0.0, 0.0]),
                Animated::new(AnimatedProperty::Scale, [1.0, 1.0, 1.0]),
                Animated::new(AnimatedProperty::Size, [1.0, 1.0, 0.0]),
                Animated::new(AnimatedProperty::RotationAngle, [0.0, 0.0, 0.0]),
            ],
            animations_enabled: true,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    /// Install the pinning expression.  The capability check lives in the
    /// binding layer so an unsupported target fails before this call.
    pub fn register(&mut self, expression: StickyExpression) {
        self.expression = Some(expression);
    }

    pub fn has_expression(&self) -> bool {
        self.expression.is_some()
    }

    // ── frame pipeline ──────────────────────────────────────────

    /// Store this frame's live translation.
    pub fn sample_translation(&mut self, translation: f32) {
        self.translation = translation;
    }

    /// Evaluate the registered expression against the sampled input.
    /// Runs after sampling and before any widget reads the output, so the
    /// derived offset can never lag the frame it is drawn in.
    pub fn evaluate(&mut self) {
        self.derived_offset = match self.expression {
            Some(expr) => expr.evaluate(self.translation),
            None => 0.0,
        };
    }

    /// Derived sticky offset for the current frame, in rows.
    pub fn sticky_offset(&self) -> f32 {
        self.derived_offset
    }

    /// Advance live property transitions.  Tick cadence, not frame cadence.
    pub fn tick(&mut self, dt: Duration) {
        for slot in &mut self.slots {
            slot.tick(dt);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.slots.iter().any(Animated::is_animating)
    }

    // ── property store ──────────────────────────────────────────

    pub fn set_animations_enabled(&mut self, enabled: bool) {
        self.animations_enabled = enabled;
    }

    /// Write a property through the implicit-animation table.
    pub fn write(&mut self, prop: AnimatedProperty, value: Value) {
        let animate = self.animations_enabled;
        self.slots[prop.index()].set(value, animate);
    }

    /// Write a property without triggering the implicit animation.
    pub fn write_immediate(&mut self, prop: AnimatedProperty, value: Value) {
        self.slots[prop.index()].set(value, false);
    }

    /// Sampled value of a property.
    pub fn value(&self, prop: AnimatedProperty) -> Value {
        self.slots[prop.index()].sample()
    }

    /// Sampled first lane of a property.
    pub fn scalar(&self, prop: AnimatedProperty) -> f32 {
        self.slots[prop.index()].scalar()
    }

    // ── demo-facing conveniences ────────────────────────────────

    pub fn set_opacity(&mut self, value: f32) {
        self.write(AnimatedProperty::Opacity, [value, 0.0, 0.0]);
    }

    pub fn opacity(&self) -> f32 {
        self.scalar(AnimatedProperty::Opacity)
    }

    pub fn set_panel_size(&mut self, size: [f32; 2]) {
        self.write(AnimatedProperty::Size, [size[0], size[1], 0.0]);
    }

    pub fn panel_size(&self) -> [f32; 2] {
        let v = self.value(AnimatedProperty::Size);
        [v[0], v[1]]
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    // Header resting 100 rows below the content origin: the measured
    // offset is the content origin in the header's frame, i.e. -100.
    const OFFSET: f32 = -100.0;

    fn expr() -> StickyExpression {
        StickyExpression {
            reference_offset: OFFSET,
        }
    }

    #[test]
    fn holds_zero_before_the_header_is_reached() {
        assert_eq!(expr().evaluate(0.0), 0.0);
        assert_eq!(expr().evaluate(-50.0), 0.0);
        // Boundary: exactly at the resting position the output is still 0.
        assert_eq!(expr().evaluate(-100.0), 0.0);
    }

    #[test]
    fn cancels_displacement_past_the_header() {
        assert_eq!(expr().evaluate(-150.0), 50.0);
        assert_eq!(expr().evaluate(-300.0), 200.0);
    }

    #[test]
    fn pinned_screen_position_is_invariant() {
        // Screen row = flow row + derived offset + translation.  Past the
        // pin point that sum must stay fixed at the viewport top for any
        // further scroll.
        let header_row = 100.0;
        for translation in [-101.0, -150.0, -237.5, -300.0, -1000.0] {
            let screen = header_row + expr().evaluate(translation) + translation;
            assert!(
                screen.abs() < 1e-4,
                "translation {translation} left the header at {screen}"
            );
        }
    }

    #[test]
    fn pipeline_output_matches_the_sampled_frame() {
        let mut comp = Compositor::new(Capabilities::detect());
        comp.register(expr());

        comp.sample_translation(-150.0);
        comp.evaluate();
        assert_eq!(comp.sticky_offset(), 50.0);

        // A later sample without re-evaluation must not bleed into the
        // frame that was already derived.
        comp.sample_translation(-400.0);
        assert_eq!(comp.sticky_offset(), 50.0);
        comp.evaluate();
        assert_eq!(comp.sticky_offset(), 300.0);
    }

    #[test]
    fn unbound_pipeline_derives_nothing() {
        let mut comp = Compositor::new(Capabilities::detect());
        comp.sample_translation(-500.0);
        comp.evaluate();
        assert_eq!(comp.sticky_offset(), 0.0);
    }

    #[test]
    fn every_property_kind_has_a_live_slot() {
        let mut comp = Compositor::new(Capabilities::detect());
        comp.set_animations_enabled(false);
        for prop in [
            AnimatedProperty::Opacity,
            AnimatedProperty::Offset,
            AnimatedProperty::Scale,
            AnimatedProperty::Size,
            AnimatedProperty::RotationAngle,
        ] {
            comp.write(prop, [0.25, 0.5, 0.75]);
            assert_eq!(comp.value(prop), [0.25, 0.5, 0.75]);
        }
    }

    #[test]
    fn disabled_animations_snap_property_writes() {
        let mut comp = Compositor::new(Capabilities::detect());
        comp.set_animations_enabled(false);
        comp.set_opacity(0.5);
        assert!((comp.opacity() - 0.5).abs() < 1e-6);
        assert!(!comp.is_animating());

        comp.set_animations_enabled(true);
        comp.set_panel_size([0.5, 1.0]);
        assert!(comp.is_animating());
        assert!(
            (comp.panel_size()[0] - 1.0).abs() < 1e-6,
            "eases from the old size"
        );
    }
}
