//! A terminal demo of a scroll-pinned sticky header.
//!
//! Scroll the page: the header bar rides up in normal flow, pins to the
//! top edge of the viewport once the surface scrolls past it, dims past
//! that point, and stretches its accent panel across the full bar three
//! header-offsets further down.  All of the pinning happens in the frame
//! pipeline — input handlers never position anything.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::config::AppConfig;
use crate::core::binding::StickyBinding;
use crate::ui::{
    content::{ContentView, PageSpec},
    header::StickyHeader,
    layout::AppLayout,
    popup,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-pinned sticky header demo")]
struct Cli {
    /// Number of feed cards below the header.
    #[arg(long, default_value_t = 24)]
    cards: usize,

    /// Rows of banner content above the header.
    #[arg(long = "banner-rows", default_value_t = 6)]
    banner_rows: usize,

    /// Frame tick interval in milliseconds.
    #[arg(long = "tick-ms", default_value_t = 33)]
    tick_ms: u64,

    /// Disable implicit animations and the scroll glide.
    #[arg(long = "no-animations")]
    no_animations: bool,
}

// ───────────────────────────────────────── binding setup ─────

/// The one-time initialize/bind sequence, run right after the first
/// completed draw (the terminal's "loaded" moment).  The caller guards it
/// to run exactly once per view lifetime; either failure is fatal.
fn set_up_binding(state: &mut AppState) -> Result<()> {
    let binding = StickyBinding::initialize(state.layout.as_ref())
        .context("measuring the sticky header's reference offset")?;
    binding
        .bind(&mut state.compositor)
        .context("binding the pinning expression")?;
    debug_assert!(state.compositor.has_expression());
    tracing::info!(offset = binding.offset().0, "sticky binding ready");
    state.binding = Some(binding);
    Ok(())
}

// ───────────────────────────────────────── status bar ────────

fn status_line(state: &AppState) -> Line<'static> {
    let hint = state.config.status_bar_hint();
    let text = match state.active_view {
        ActiveView::Page => state.status_message.clone().unwrap_or(hint),
        ActiveView::SettingsMenu | ActiveView::ControlsSubmenu => String::new(),
    };

    let pin_label = match &state.binding {
        Some(b) if b.past_secondary() => "● pinned · wide",
        Some(b) if b.past_primary() => "● pinned",
        _ => "○ flow",
    };
    let position = format!(
        " row {:>3}/{}  {} ",
        state.surface.scroll_offset().round() as usize,
        state.surface.max_scroll(),
        pin_label,
    );

    Line::from(vec![
        Span::styled(format!(" {text}"), Theme::status_bar_style()),
        Span::styled(position, Theme::status_accent_style()),
    ])
}

// ───────────────────────────────────────── main ──────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute the UI stream
        .init();

    let cli = Cli::parse();

    // ── initial state ─────────────────────────────────────────
    let mut config = AppConfig::load();
    if cli.no_animations {
        config.animations_enabled = false;
    }
    let page = PageSpec {
        banner_rows: cli.banner_rows.max(3),
        card_count: cli.cards.max(1),
    };
    let mut state = AppState::new(page, config);
    let tick = Duration::from_millis(cli.tick_ms.clamp(8, 250));

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stdout_handle = stdout();
    execute!(stdout_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(tick);

    // ── event loop ────────────────────────────────────────────
    // Idle ticks with nothing in motion skip the draw entirely; any
    // input, resize, or live animation forces the next frame out.
    let mut needs_redraw = true;

    loop {
        // ── draw first ─────────────────────────────────────────
        // The frame pipeline runs at the top of every frame: sample the
        // live translation, evaluate the bound expression, and only then
        // let widgets read the derived outputs.
        if needs_redraw {
            terminal.draw(|frame| {
                let layout = AppLayout::from_area(frame.area());
                let content_layout = state.page.measure();
                state.surface.set_viewport(layout.page_area.height as usize);
                state.surface.set_content(content_layout.content_rows);
                state.layout = Some(content_layout);

                state
                    .compositor
                    .sample_translation(state.surface.translation());
                state.compositor.evaluate();

                let scroll = state.surface.scroll_offset();
                let content = ContentView::new(&state.page, scroll);
                let header = StickyHeader {
                    // Flow row plus the derived sticky offset, rounded the
                    // same way the content rounds its scroll base.
                    screen_row: (content_layout.header_row as f32
                        + state.compositor.sticky_offset())
                    .round() as i32
                        - scroll.round() as i32,
                    opacity: state.compositor.opacity(),
                    panel_size: state.compositor.panel_size(),
                };

                // Paint order: the header overlaps content only once its
                // order has been raised by `initialize`.
                if state.binding.as_ref().is_some_and(|b| b.raised()) {
                    frame.render_widget(content, layout.page_area);
                    frame.render_widget(header, layout.page_area);
                } else {
                    frame.render_widget(header, layout.page_area);
                    frame.render_widget(content, layout.page_area);
                }

                frame.render_widget(
                    Paragraph::new(status_line(&state)).style(Theme::status_bar_style()),
                    layout.status_area,
                );

                match state.active_view {
                    ActiveView::SettingsMenu => {
                        frame.render_widget(
                            popup::SettingsPopup {
                                selected: state.settings_selected,
                                state: &state,
                            },
                            frame.area(),
                        );
                    }
                    ActiveView::ControlsSubmenu => {
                        frame.render_widget(
                            popup::ControlsPopup {
                                config: &state.config,
                                selected: state.controls_selected,
                                awaiting_rebind: state.awaiting_rebind,
                            },
                            frame.area(),
                        );
                    }
                    ActiveView::Page => {}
                }
            })?;
        }

        // ── one-time binding setup AFTER the first draw ────────
        // The draw above completed the first layout pass, so the
        // reference offset is now well-defined.
        if state.binding.is_none() {
            set_up_binding(&mut state)?;
        }

        let Some(event) = events.recv().await else {
            break; // event reader gone — shut down
        };
        needs_redraw = true;
        match event {
            AppEvent::Key(k) => handler::handle_key(&mut state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
            // The next draw recomputes layout and panel size in the same
            // frame, so a resize never shows stale cells.
            AppEvent::Resize(_, _) => {}
            AppEvent::Tick => {
                // Idle ticks advance nothing visible; skip their frame.
                let in_motion =
                    state.surface.is_settling() || state.compositor.is_animating();
                state.surface.tick();
                state.compositor.tick(tick);
                needs_redraw = in_motion;
            }
        }

        // ── throttled view-change notification ─────────────────
        // Coarse-grained and event-loop-delivered, unlike the per-frame
        // expression above: this is where the threshold latches live.
        if let Some(translation) = state.surface.take_view_change() {
            handler::apply_scroll_changed(&mut state, translation);
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
