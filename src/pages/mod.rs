//! The crash screen's pages
//!
//! Each page exposes the same handler set (`init`, `draw`, `input`,
//! `print`) and is dispatched through [`crate::screen::page::Page`].

pub mod context;
pub mod memory;
pub mod settings;
