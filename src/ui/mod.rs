//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state and the keyboard event loop
//! - **[`keymap`]**: turns key presses into controller snapshots
//! - **[`panes`]**: render functions for the crash screen canvas and the
//!   status bar
//!
//! The crash screen itself never sees the terminal. Each frame it draws into
//! a [`CellCanvas`](crate::screen::canvas::CellCanvas), which the screen pane
//! copies into the ratatui buffer.
//!
//! The entry point for consumers is [`App`]: construct it with a
//! [`CrashScreen`](crate::screen::CrashScreen) and call [`App::run`] to start
//! the event loop.
//!
//! [`App::run`]: app::App::run

pub mod app;
pub mod keymap;
pub mod panes;

pub use app::App;
