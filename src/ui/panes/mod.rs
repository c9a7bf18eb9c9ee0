//! TUI pane rendering modules
//!
//! - [`screen`]: the crash screen canvas, framed and centered
//! - [`status`]: status bar with keybindings and the selected address

pub mod screen;
pub mod status;

pub use screen::{render_screen_pane, CanvasWidget};
pub use status::render_status_bar;
