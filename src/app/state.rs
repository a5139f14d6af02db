//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event
//! handling).  The split inside mirrors the two execution domains: the
//! compositor derives per-frame outputs, everything else is event-driven.

use crate::config::AppConfig;
use crate::core::{
    animation::AnimatedProperty,
    binding::{ContentLayout, StickyBinding},
    compositor::{Capabilities, Compositor},
    surface::ScrollSurface,
};
use crate::ui::content::PageSpec;
use crate::ui::header::PANEL_ONE_CELL;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Page,
    SettingsMenu,
    ControlsSubmenu,
}

/// Top-level application state.
pub struct AppState {
    /// The scrollable surface driving the whole effect.
    pub surface: ScrollSurface,
    /// Software composition pipeline (expression + animated properties).
    pub compositor: Compositor,
    /// The sticky binding; `None` until the post-first-draw setup ran.
    pub binding: Option<StickyBinding>,
    /// Content layout measured during draw; `None` before the first frame.
    pub layout: Option<ContentLayout>,
    /// Static page description from the CLI.
    pub page: PageSpec,
    /// User-configurable keybindings and effect settings.
    pub config: AppConfig,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    /// Currently highlighted item in the controls submenu.
    pub controls_selected: usize,
    /// When `true`, the controls submenu is waiting for the user to press
    /// a key to rebind the action at `controls_selected`.
    pub awaiting_rebind: bool,
}

impl AppState {
    pub fn new(page: PageSpec, config: AppConfig) -> Self {
        // Content height is known up front; the viewport arrives with the
        // first draw.
        let mut surface = ScrollSurface::new(page.measure().content_rows, config.scroll_speed);
        surface.set_smooth(config.animations_enabled);

        let mut compositor = Compositor::new(Capabilities::detect());
        compositor.set_animations_enabled(config.animations_enabled);
        // The accent panel starts covering its own cell only.
        compositor.write_immediate(
            AnimatedProperty::Size,
            [PANEL_ONE_CELL[0], PANEL_ONE_CELL[1], 0.0],
        );

        Self {
            surface,
            compositor,
            binding: None,
            layout: None,
            page,
            config,
            should_quit: false,
            status_message: None,
            active_view: ActiveView::default(),
            settings_selected: 0,
            controls_selected: 0,
            awaiting_rebind: false,
        }
    }
}
