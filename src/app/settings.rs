//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the
//! handler and UI renderers consume the same source of truth without
//! cross-importing.

use super::state::{ActiveView, AppState};

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Opens a submenu.
    Submenu {
        label: &'static str,
        view: ActiveView,
    },
    /// Boolean toggle — reads/writes via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submenu { label, .. }
            | Self::Toggle { label, .. }
            | Self::Cycle { label, .. } => label,
        }
    }
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Submenu {
        label: "Controls",
        view: ActiveView::ControlsSubmenu,
    },
    SettingsItem::Toggle {
        label: "Animations",
        get: |s| s.config.animations_enabled,
        set: |s, v| {
            s.config.animations_enabled = v;
            let _ = s.config.save();
            // Both animators follow the toggle: property transitions and
            // the scroll glide.
            s.compositor.set_animations_enabled(v);
            s.surface.set_smooth(v);
        },
    },
    SettingsItem::Cycle {
        label: "Scroll Speed",
        value: |s| format!("{:.2}", s.config.scroll_speed),
        cycle: |s| {
            const SPEEDS: &[f64] = &[0.15, 0.25, 0.35, 0.50, 0.70];
            let current = s.config.scroll_speed;
            let idx = SPEEDS
                .iter()
                .position(|&v| (v - current).abs() < 1e-9)
                .unwrap_or(2);
            let next = SPEEDS[(idx + 1) % SPEEDS.len()];
            s.config.scroll_speed = next;
            let _ = s.config.save();
            s.surface.set_speed(next);
            s.status_message = Some(format!("Scroll speed: {next:.2}"));
        },
    },
];
