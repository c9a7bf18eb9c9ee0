//! # Introduction
//!
//! crashview browses a frozen N64 RDRAM image through the pages of an
//! on-device crash screen: the crashed thread's context, a scrollable memory
//! viewer and the crash screen's settings.  The screen runs frame by frame
//! against a character-cell display surface, driven here by a terminal UI
//! built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Frame pipeline
//!
//! ```text
//! Key → ControllerInput → CrashScreen::update → CrashScreen::draw → CellCanvas → TUI
//! ```
//!
//! 1. [`memory`]: the RDRAM image behind a checked word read, the thread
//!    context and an optional symbol table.
//! 2. [`screen`]: the page system, settings store, popups and the
//!    [`screen::draw::Surface`] drawing primitives.
//! 3. [`pages`]: the context, memory viewer and settings pages.
//! 4. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! [`bits`] holds the unaligned load/store and bit-scan primitives.
//!
//! ## Address map
//!
//! Only KSEG0 (`0x8000_0000` onwards) is readable. Every read goes through
//! [`memory::AddressSpace::try_read_word_aligned`], which never panics.

pub mod bits;
pub mod error;
pub mod memory;
pub mod pages;
pub mod screen;
pub mod ui;
