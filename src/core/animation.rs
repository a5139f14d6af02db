//! Implicit property animations.
//!
//! Writing a property through the compositor does not snap it — the
//! implicit table maps each property kind to a keyframe template
//! (duration, delay, easing, channel count) and the write becomes an
//! eased transition sampled once per tick.  Transitions advance by
//! explicit deltas, never by reading the wall clock, so sampling is
//! deterministic.

use std::time::Duration;

// ───────────────────────────────────────── property kinds ───

/// The closed set of property kinds that carry an implicit animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    Opacity,
    Offset,
    Scale,
    Size,
    RotationAngle,
}

impl AnimatedProperty {
    /// Slot index inside the compositor's property store.
    pub fn index(self) -> usize {
        match self {
            AnimatedProperty::Opacity => 0,
            AnimatedProperty::Offset => 1,
            AnimatedProperty::Scale => 2,
            AnimatedProperty::Size => 3,
            AnimatedProperty::RotationAngle => 4,
        }
    }
}

/// Interpolation dimensionality, declared per property kind rather than
/// inferred from the value written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    Scalar,
    Vector2,
    Vector3,
}

impl Channels {
    /// Number of interpolated lanes.
    pub fn count(self) -> usize {
        match self {
            Channels::Scalar => 1,
            Channels::Vector2 => 2,
            Channels::Vector3 => 3,
        }
    }
}

// ───────────────────────────────────────── easing ────────────

/// Easing curves available to the implicit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseOutCubic,
    EaseInOutCubic,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

// ───────────────────────────────────────── descriptors ───────

/// One implicit-animation template: how a write to this property kind
/// turns into motion.
#[derive(Debug, Clone, Copy)]
pub struct AnimationDescriptor {
    pub duration: Duration,
    pub delay: Duration,
    pub easing: Easing,
    pub channels: Channels,
}

/// The implicit table.  Total over [`AnimatedProperty`] — every kind has
/// an explicit template, including the ones the demo never writes.
pub fn implicit_descriptor(prop: AnimatedProperty) -> AnimationDescriptor {
    match prop {
        AnimatedProperty::Opacity => AnimationDescriptor {
            duration: Duration::from_millis(200),
            delay: Duration::ZERO,
            easing: Easing::EaseInOutCubic,
            channels: Channels::Scalar,
        },
        AnimatedProperty::Offset => AnimationDescriptor {
            duration: Duration::from_millis(250),
            delay: Duration::ZERO,
            easing: Easing::EaseOutCubic,
            channels: Channels::Vector3,
        },
        AnimatedProperty::Scale => AnimationDescriptor {
            duration: Duration::from_millis(300),
            delay: Duration::ZERO,
            easing: Easing::EaseOutCubic,
            channels: Channels::Vector3,
        },
        AnimatedProperty::Size => AnimationDescriptor {
            duration: Duration::from_millis(250),
            delay: Duration::ZERO,
            easing: Easing::EaseInOutCubic,
            channels: Channels::Vector2,
        },
        AnimatedProperty::RotationAngle => AnimationDescriptor {
            duration: Duration::from_millis(400),
            delay: Duration::from_millis(50),
            easing: Easing::EaseOutCubic,
            channels: Channels::Scalar,
        },
    }
}

// ───────────────────────────────────────── transitions ───────

/// Up to three interpolation lanes; unused lanes stay at their written
/// value.  The active lane count comes from the descriptor, not the value.
pub type Value = [f32; 3];

/// A live transition between two values of one property.
#[derive(Debug, Clone)]
struct Transition {
    from: Value,
    to: Value,
    elapsed: Duration,
    descriptor: AnimationDescriptor,
}

impl Transition {
    fn sample(&self) -> Value {
        if self.elapsed <= self.descriptor.delay {
            return self.from;
        }
        let run = self.elapsed - self.descriptor.delay;
        let t = run.as_secs_f32() / self.descriptor.duration.as_secs_f32();
        let eased = self.descriptor.easing.apply(t);

        let mut out = self.to;
        for lane in 0..self.descriptor.channels.count() {
            out[lane] = self.from[lane] + (self.to[lane] - self.from[lane]) * eased;
        }
        out
    }

    fn finished(&self) -> bool {
        self.elapsed >= self.descriptor.delay + self.descriptor.duration
    }
}

/// One animatable property slot: the settled value plus an optional live
/// transition toward a new target.
#[derive(Debug, Clone)]
pub struct Animated {
    kind: AnimatedProperty,
    value: Value,
    transition: Option<Transition>,
}

impl Animated {
    pub fn new(kind: AnimatedProperty, initial: Value) -> Self {
        Self {
            kind,
            value: initial,
            transition: None,
        }
    }

    /// Write a new target.  With `animate` set, the write starts an eased
    /// transition from the currently *sampled* value, so retargeting a
    /// live transition picks up from the midpoint rather than jumping.
    pub fn set(&mut self, target: Value, animate: bool) {
        if !animate {
            self.value = target;
            self.transition = None;
            return;
        }
        let from = self.sample();
        if from == target {
            self.value = target;
            self.transition = None;
            return;
        }
        self.transition = Some(Transition {
            from,
            to: target,
            elapsed: Duration::ZERO,
            descriptor: implicit_descriptor(self.kind),
        });
        self.value = target;
    }

    /// Advance the live transition, if any, by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(ref mut tr) = self.transition {
            tr.elapsed += dt;
            if tr.finished() {
                self.transition = None;
            }
        }
    }

    /// Current sampled value — eased while a transition is live, settled
    /// otherwise.
    pub fn sample(&self) -> Value {
        match self.transition {
            Some(ref tr) => tr.sample(),
            None => self.value,
        }
    }

    /// First lane of the sampled value.
    pub fn scalar(&self) -> f32 {
        self.sample()[0]
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_total_and_declares_channels() {
        let all = [
            AnimatedProperty::Opacity,
            AnimatedProperty::Offset,
            AnimatedProperty::Scale,
            AnimatedProperty::Size,
            AnimatedProperty::RotationAngle,
        ];
        for (i, prop) in all.into_iter().enumerate() {
            let d = implicit_descriptor(prop);
            assert!(d.duration > Duration::ZERO, "{prop:?} has a zero duration");
            assert!(d.channels.count() >= 1 && d.channels.count() <= 3);
            assert_eq!(prop.index(), i, "slot indices follow declaration order");
        }
        // Dimensionality is part of the template, not the written value.
        assert_eq!(
            implicit_descriptor(AnimatedProperty::Opacity).channels,
            Channels::Scalar
        );
        assert_eq!(
            implicit_descriptor(AnimatedProperty::Size).channels,
            Channels::Vector2
        );
        assert_eq!(
            implicit_descriptor(AnimatedProperty::Offset).channels,
            Channels::Vector3
        );
    }

    #[test]
    fn easing_hits_both_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOutCubic, Easing::EaseInOutCubic] {
            assert!((easing.apply(0.0) - 0.0).abs() < 1e-6);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
            let mid = easing.apply(0.5);
            assert!(mid > 0.0 && mid < 1.0);
        }
    }

    #[test]
    fn animated_write_eases_toward_target() {
        let mut a = Animated::new(AnimatedProperty::Opacity, [1.0, 0.0, 0.0]);
        a.set([0.5, 0.0, 0.0], true);
        assert!(a.is_animating());
        assert!((a.scalar() - 1.0).abs() < 1e-6, "starts at the old value");

        a.tick(Duration::from_millis(100));
        let mid = a.scalar();
        assert!(mid < 1.0 && mid > 0.5, "partway through: {mid}");

        a.tick(Duration::from_millis(200));
        assert!(!a.is_animating());
        assert!((a.scalar() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn animated_snap_when_disabled() {
        let mut a = Animated::new(AnimatedProperty::Size, [0.5, 1.0, 0.0]);
        a.set([1.0, 1.0, 0.0], false);
        assert!(!a.is_animating());
        assert_eq!(a.sample(), [1.0, 1.0, 0.0]);
    }

    #[test]
    fn retarget_continues_from_sampled_midpoint() {
        let mut a = Animated::new(AnimatedProperty::Opacity, [1.0, 0.0, 0.0]);
        a.set([0.0, 0.0, 0.0], true);
        a.tick(Duration::from_millis(100));
        let mid = a.scalar();
        assert!(mid < 1.0 && mid > 0.0);

        // Reverse course mid-flight: the new transition starts where the
        // old one was sampled, not at the settled value.
        a.set([1.0, 0.0, 0.0], true);
        let resumed = a.scalar();
        assert!((resumed - mid).abs() < 1e-4);
    }

    #[test]
    fn delay_holds_the_initial_value() {
        let mut a = Animated::new(AnimatedProperty::RotationAngle, [0.0, 0.0, 0.0]);
        a.set([90.0, 0.0, 0.0], true);
        a.tick(Duration::from_millis(30));
        assert!((a.scalar() - 0.0).abs() < 1e-6, "still inside the delay window");
        a.tick(Duration::from_millis(500));
        assert!((a.scalar() - 90.0).abs() < 1e-4);
    }
}
