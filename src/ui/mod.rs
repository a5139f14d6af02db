//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* pipeline outputs and turns them into cells
//! on the terminal.  No scroll or animation state is mutated here.

pub mod content;
pub mod header;
pub mod layout;
pub mod popup;
pub mod theme;
