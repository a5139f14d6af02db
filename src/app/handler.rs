//! Input handling — maps key/mouse events to state mutations, and applies
//! the cosmetic side effects of scroll-changed notifications.
//!
//! Handlers only move inputs (the scroll target, the latches, config).
//! The derived sticky position is never touched here — that belongs to
//! the frame pipeline.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::config::{Action, KeyBind};
use crate::ui::header::{PANEL_ONE_CELL, PANEL_TWO_CELLS};

use super::settings::{SettingsItem, SETTINGS_ITEMS};
use super::state::{ActiveView, AppState};

/// Rows moved per mouse-wheel notch.
const WHEEL_LINES: isize = 3;

/// Header opacity once the surface has scrolled past it.
const DIM_OPACITY: f32 = 0.5;

/// Total selectable rows in the controls submenu (actions + "Reset").
pub fn controls_item_count() -> usize {
    Action::ALL.len() + 1
}

// ───────────────────────────────────────── notifications ─────

/// Apply one throttled scroll-changed notification: update the threshold
/// latches and, for each latch that flipped, write the matching cosmetic
/// property through the compositor so the change eases in.
pub fn apply_scroll_changed(state: &mut AppState, translation: f32) {
    let Some(ref mut binding) = state.binding else {
        return;
    };
    let change = binding.on_scroll_changed(translation);
    if change.is_empty() {
        return;
    }

    if let Some(past) = change.primary {
        state
            .compositor
            .set_opacity(if past { DIM_OPACITY } else { 1.0 });
    }
    if let Some(past) = change.secondary {
        state
            .compositor
            .set_panel_size(if past { PANEL_TWO_CELLS } else { PANEL_ONE_CELL });
    }
}

// ───────────────────────────────────────── key events ────────

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Page => handle_page_key(state, key),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
        ActiveView::ControlsSubmenu => {
            if state.awaiting_rebind {
                handle_rebind_key(state, key);
            } else {
                handle_controls_key(state, key);
            }
        }
    }
}

// ── Page view (configurable bindings) ───────────────────────────

fn handle_page_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::ScrollUp => state.surface.scroll_lines(-1),
        Action::ScrollDown => state.surface.scroll_lines(1),
        Action::PageUp => state.surface.page(-1),
        Action::PageDown => state.surface.page(1),
        Action::JumpTop => state.surface.jump_top(),
        Action::JumpBottom => state.surface.jump_bottom(),
        Action::ToggleAnimations => {
            let enabled = !state.config.animations_enabled;
            state.config.animations_enabled = enabled;
            let _ = state.config.save();
            state.compositor.set_animations_enabled(enabled);
            state.surface.set_smooth(enabled);
            state.status_message = Some(format!(
                "Animations {}",
                if enabled { "on" } else { "off" }
            ));
        }
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::Quit => state.should_quit = true,
    }

    // Any scroll action invalidates a stale status message.
    if matches!(
        action,
        Action::ScrollUp
            | Action::ScrollDown
            | Action::PageUp
            | Action::PageDown
            | Action::JumpTop
            | Action::JumpBottom
    ) {
        state.status_message = None;
    }
}

// ── Settings menu ───────────────────────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
            state.active_view = ActiveView::Page;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected + 1 < SETTINGS_ITEMS.len() {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            match &SETTINGS_ITEMS[state.settings_selected] {
                SettingsItem::Submenu { view, .. } => {
                    state.active_view = *view;
                    state.controls_selected = 0;
                    state.awaiting_rebind = false;
                }
                SettingsItem::Toggle { get, set, .. } => {
                    let next = !get(state);
                    set(state, next);
                }
                SettingsItem::Cycle { cycle, .. } => cycle(state),
            }
        }
        _ => {}
    }
}

// ── Controls submenu / rebinding ────────────────────────────────

fn handle_controls_key(state: &mut AppState, key: KeyEvent) {
    let reset_idx = Action::ALL.len();
    match key.code {
        KeyCode::Esc => {
            state.active_view = ActiveView::SettingsMenu;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.controls_selected = state.controls_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.controls_selected + 1 < controls_item_count() {
                state.controls_selected += 1;
            }
        }
        KeyCode::Enter => {
            if state.controls_selected == reset_idx {
                state.config.reset_defaults();
                let _ = state.config.save();
                state.status_message = Some("Keybindings reset to defaults".into());
            } else {
                state.awaiting_rebind = true;
            }
        }
        KeyCode::Delete => {
            if state.controls_selected < reset_idx {
                let action = Action::ALL[state.controls_selected];
                state.config.bindings.insert(action, Vec::new());
                let _ = state.config.save();
            }
        }
        _ => {}
    }
}

fn handle_rebind_key(state: &mut AppState, key: KeyEvent) {
    // Esc cancels the rebind rather than binding Esc itself.
    if key.code == KeyCode::Esc {
        state.awaiting_rebind = false;
        return;
    }
    let action = Action::ALL[state.controls_selected];
    state.config.add_binding(action, KeyBind::from_key_event(key));
    let _ = state.config.save();
    state.awaiting_rebind = false;
}

// ───────────────────────────────────────── mouse events ──────

/// Process a mouse event.  Only the wheel matters on the page view.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view != ActiveView::Page {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            state.surface.scroll_lines(-WHEEL_LINES);
            state.status_message = None;
        }
        MouseEventKind::ScrollDown => {
            state.surface.scroll_lines(WHEEL_LINES);
            state.status_message = None;
        }
        _ => {}
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::binding::StickyBinding;
    use crate::ui::content::PageSpec;

    fn state() -> AppState {
        let mut s = AppState::new(
            PageSpec {
                banner_rows: 6,
                card_count: 24,
            },
            AppConfig {
                bindings: AppConfig::default_bindings(),
                animations_enabled: false,
                scroll_speed: 0.35,
            },
        );
        s.surface.set_viewport(30);
        let layout = s.page.measure();
        let binding = StickyBinding::initialize(Some(&layout)).unwrap();
        binding.bind(&mut s.compositor).unwrap();
        s.binding = Some(binding);
        s
    }

    #[test]
    fn notification_past_primary_dims_the_header() {
        let mut s = state();
        // Header rests 6 rows down; 10 rows of scroll is past it.
        apply_scroll_changed(&mut s, -10.0);
        assert!((s.compositor.opacity() - DIM_OPACITY).abs() < 1e-6);
        assert_eq!(s.compositor.panel_size(), PANEL_ONE_CELL);

        apply_scroll_changed(&mut s, -2.0);
        assert!((s.compositor.opacity() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn notification_past_secondary_expands_the_panel() {
        let mut s = state();
        // Three header-offsets down (offset -6 ⇒ threshold -18).
        apply_scroll_changed(&mut s, -20.0);
        assert_eq!(s.compositor.panel_size(), PANEL_TWO_CELLS);

        apply_scroll_changed(&mut s, -10.0);
        assert_eq!(s.compositor.panel_size(), PANEL_ONE_CELL);
        assert!((s.compositor.opacity() - DIM_OPACITY).abs() < 1e-6, "still past primary");
    }

    #[test]
    fn repeated_notifications_do_not_rewrite_properties() {
        let mut s = state();
        apply_scroll_changed(&mut s, -10.0);
        s.compositor.set_animations_enabled(true);
        // Same side of both thresholds: no latch flip, no property write,
        // so nothing starts animating.
        apply_scroll_changed(&mut s, -12.0);
        assert!(!s.compositor.is_animating());
    }
}
