//! Memory viewer page
//!
//! Shows RAM as rows of 16 bytes (four words) starting at the viewport,
//! with the byte under the cursor and the byte at the crashed PC
//! highlighted.
//!
//! # Layout
//!
//! ```text
//! 80000120 in 80000000-80000140     range line (optional)
//! func_name+0x120                   symbol line (optional)
//! ────────────────────────────────
//!  MEMORY │00 01 02 03  04 05 ...   column headers
//! ────────────────────────────────
//! 80000000│3C 1A 80 00  27 5A ...   one line per row
//! ```
//!
//! Every word is read through the checked RAM read; words that can not be
//! read draw as `*` and are retried on the next frame.

use crate::bits::align_floor;
use crate::memory::{Address, Word, VIRTUAL_RAM_START, WORD_SIZE};
use crate::screen::controls::{Buttons, ControlType, ControllerInput};
use crate::screen::draw::{
    clamp_view_to_selection, hex_digit, nibble_bits_glyph, print_addr_location_info, Rgba32,
    Surface, CRASH_SCREEN_NUM_CHARS_X,
};
use crate::screen::settings::SettingId;
use crate::screen::theme::DEFAULT_THEME;
use crate::screen::{open_address_select, page_top, InspectState};
use std::io::{self, Write};

/// Rows shown with the title bar on and both info lines off
pub const MEMORY_NUM_SHOWN_ROWS: u32 = 22;

/// Bytes per row
pub const PAGE_MEMORY_STEP: u32 = 0x10;

/// First column of the data area, past the address and the divider
const DATA_START_X: u32 = 9;

/// Columns per byte: two glyphs and a spacer
const BYTE_WIDTH: u32 = 3;

const SELECT_ALPHA: u8 = 0xC0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Hex,
    Ascii,
    Binary,
    Rgba16,
    Rgba32,
}

impl DisplayMode {
    pub fn from_value(value: i32) -> Self {
        match value {
            1 => DisplayMode::Ascii,
            2 => DisplayMode::Binary,
            3 => DisplayMode::Rgba16,
            4 => DisplayMode::Rgba32,
            _ => DisplayMode::Hex,
        }
    }

    /// Color modes draw swatches instead of glyphs
    pub fn is_color(self) -> bool {
        matches!(self, DisplayMode::Rgba16 | DisplayMode::Rgba32)
    }
}

/// Screen column of byte `col` (0..16) in a row
fn byte_x(col: u32) -> u32 {
    DATA_START_X + col * BYTE_WIDTH + col / WORD_SIZE
}

/// Glyph for a byte in ASCII mode
fn ascii_glyph(byte: u8) -> char {
    if byte.is_ascii_graphic() || byte == b' ' {
        byte as char
    } else {
        '.'
    }
}

/// Byte `index` (0 = most significant) of a big-endian word
fn word_byte(word: Word, index: u32) -> u8 {
    (word >> (24 - 8 * index)) as u8
}

#[derive(Debug)]
pub struct MemoryPage {
    /// Address of the top row, aligned to `PAGE_MEMORY_STEP`
    viewport: Address,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    pub const CONTROLS: &'static [ControlType] = &[
        ControlType::MemoryCursor,
        ControlType::JumpToAddress,
        ControlType::CycleDisplayMode,
    ];

    pub fn new() -> Self {
        MemoryPage {
            viewport: VIRTUAL_RAM_START,
        }
    }

    pub fn viewport(&self) -> Address {
        self.viewport
    }

    pub fn display_mode(state: &InspectState) -> DisplayMode {
        DisplayMode::from_value(state.settings.get(SettingId::MemoryDisplayMode))
    }

    fn shows_symbol_line(state: &InspectState) -> bool {
        state.settings.get_bool(SettingId::MemoryShowSymbol) && state.symbols.is_some()
    }

    /// Number of data rows that fit below the enabled info lines
    pub fn num_shown_rows(state: &InspectState) -> u32 {
        let mut rows = MEMORY_NUM_SHOWN_ROWS + 1 - page_top(&state.settings);
        if state.settings.get_bool(SettingId::MemoryShowRange) {
            rows -= 1;
        }
        if Self::shows_symbol_line(state) {
            rows -= 1;
        }
        rows
    }

    pub fn init(&mut self, state: &InspectState) {
        self.viewport = align_floor(state.selected_address, PAGE_MEMORY_STEP);
    }

    pub fn on_address_selected(&mut self, state: &InspectState) {
        self.clamp_viewport(state);
    }

    fn clamp_viewport(&mut self, state: &InspectState) {
        self.viewport = clamp_view_to_selection(
            self.viewport,
            state.selected_address,
            Self::num_shown_rows(state),
            PAGE_MEMORY_STEP,
        );
    }

    /// Address of the last row shown by the current viewport
    fn view_end(&self, rows: u32) -> Address {
        self.viewport
            .saturating_add(rows.saturating_sub(1) * PAGE_MEMORY_STEP)
    }

    pub fn draw(&mut self, surface: &mut dyn Surface, state: &InspectState) {
        // The cursor or the row count may have changed while another page
        // was active
        self.clamp_viewport(state);
        let rows = Self::num_shown_rows(state);
        let mut y = page_top(&state.settings);

        if state.settings.get_bool(SettingId::MemoryShowRange) {
            let x = 1;
            let x = x + surface.print(
                x,
                y,
                &format!("{:08X}", state.selected_address),
                DEFAULT_THEME.memory_select,
            );
            let x = x + surface.print(x, y, " in ", DEFAULT_THEME.text);
            surface.print(
                x,
                y,
                &format!("{:08X}-{:08X}", self.viewport, self.view_end(rows)),
                DEFAULT_THEME.primary,
            );
            y += 1;
        }

        if Self::shows_symbol_line(state) {
            print_addr_location_info(
                surface,
                1,
                y,
                CRASH_SCREEN_NUM_CHARS_X - 2,
                state.symbols(),
                state.selected_address,
            );
            y += 1;
        }

        surface.draw_divider(y);
        y += 1;
        self.draw_column_headers(surface, y);
        y += 1;
        surface.draw_divider(y);
        y += 1;

        let top = y;
        for row in 0..rows {
            let addr = self.viewport.wrapping_add(row * PAGE_MEMORY_STEP);
            self.draw_row(surface, state, top + row, row, addr);
        }

        let ram_size = state.memory.ram_size();
        let shown_size = (rows - 1) * PAGE_MEMORY_STEP;
        surface.draw_scroll_bar(
            top,
            top + rows,
            shown_size,
            ram_size,
            self.viewport.wrapping_sub(VIRTUAL_RAM_START),
            DEFAULT_THEME.scroll_bar,
            true,
        );
        if state.memory.is_valid_ram_addr(state.thread.pc) {
            surface.draw_scroll_bar(
                top,
                top + rows,
                shown_size,
                ram_size,
                state.thread.pc - VIRTUAL_RAM_START,
                DEFAULT_THEME.crash_at,
                false,
            );
        }
    }

    fn draw_column_headers(&self, surface: &mut dyn Surface, y: u32) {
        surface.print(1, y, "MEMORY", DEFAULT_THEME.text);
        surface.draw_glyph(DATA_START_X - 1, y, '│', DEFAULT_THEME.divider);
        for col in 0..PAGE_MEMORY_STEP {
            let color = if (col / WORD_SIZE) % 2 == 0 {
                DEFAULT_THEME.memory_col1
            } else {
                DEFAULT_THEME.memory_col2
            };
            surface.print(byte_x(col), y, &format!("{:02X}", col), color);
        }
    }

    fn draw_row(
        &self,
        surface: &mut dyn Surface,
        state: &InspectState,
        y: u32,
        row: u32,
        addr: Address,
    ) {
        let row_color = if row % 2 == 0 {
            DEFAULT_THEME.memory_row1
        } else {
            DEFAULT_THEME.memory_row2
        };
        surface.print(0, y, &format!("{:08X}", addr), row_color);
        surface.draw_glyph(DATA_START_X - 1, y, '│', DEFAULT_THEME.divider);

        let mode = Self::display_mode(state);
        let dividers =
            state.settings.get_bool(SettingId::MemorySymbolDividers) && state.symbols.is_some();

        for word_index in 0..(PAGE_MEMORY_STEP / WORD_SIZE) {
            let word_addr = addr.wrapping_add(word_index * WORD_SIZE);
            let word = state.memory.try_read_word_aligned(word_addr);
            let data_color = if word_index % 2 == 0 {
                DEFAULT_THEME.memory_data1
            } else {
                DEFAULT_THEME.memory_data2
            };

            for byte_index in 0..WORD_SIZE {
                let col = word_index * WORD_SIZE + byte_index;
                let byte_addr = word_addr.wrapping_add(byte_index);
                let x = byte_x(col);

                let highlight = if byte_addr == state.selected_address {
                    Some(DEFAULT_THEME.memory_select)
                } else if byte_addr == state.thread.pc {
                    Some(DEFAULT_THEME.memory_pc)
                } else {
                    None
                };

                match word {
                    Some(word) if mode.is_color() => {
                        draw_swatch(surface, x, y, mode, word, byte_index);
                        if let Some(color) = highlight {
                            surface.draw_rect(x, y, 2, 1, color.with_alpha(SELECT_ALPHA));
                        }
                    }
                    Some(word) => {
                        let color = match highlight {
                            Some(bg) => {
                                surface.draw_rect(x, y, 2, 1, bg);
                                data_color.invert()
                            }
                            None if mode == DisplayMode::Binary => {
                                surface.draw_rect(x, y, 2, 1, DEFAULT_THEME.bit_clear);
                                DEFAULT_THEME.bit_set
                            }
                            None => data_color,
                        };
                        draw_byte(surface, x, y, mode, word_byte(word, byte_index), color);
                    }
                    None => {
                        if let Some(bg) = highlight {
                            surface.draw_rect(x, y, 2, 1, bg);
                        }
                        surface.draw_glyph(x, y, '*', DEFAULT_THEME.out_of_bounds);
                    }
                }

                if dividers && col != 0 && symbol_changes_at(state, byte_addr) {
                    surface.draw_glyph(x - 1, y, '▏', DEFAULT_THEME.divider);
                }
            }
        }
    }

    pub fn input(&mut self, input: &ControllerInput, state: &mut InspectState) {
        let memory = &state.memory;
        let mut selected = state.selected_address;

        if input.pressed.up {
            if let Some(prev) = selected
                .checked_sub(PAGE_MEMORY_STEP)
                .filter(|&prev| memory.is_valid_ram_addr(prev))
            {
                selected = prev;
            }
        }
        if input.pressed.down {
            if let Some(next) = selected
                .checked_add(PAGE_MEMORY_STEP)
                .filter(|&next| memory.is_valid_ram_addr(next))
            {
                selected = next;
            }
        }
        if input.pressed.left
            && (selected.wrapping_sub(1) & 0xF) != 0xF
            && memory.is_valid_ram_addr(selected.wrapping_sub(1))
        {
            selected -= 1;
        }
        if input.pressed.right
            && (selected.wrapping_add(1) & 0xF) != 0x0
            && selected < memory.ram_end()
        {
            selected += 1;
        }
        state.selected_address = selected;

        if input.buttons_pressed.contains(Buttons::A) {
            let word_addr = align_floor(selected, WORD_SIZE);
            let seed = memory
                .try_read_word_aligned(word_addr)
                .filter(|&word| memory.is_valid_ram_addr(word))
                .unwrap_or(selected);
            open_address_select(state, seed);
        }
        if input.buttons_pressed.contains(Buttons::B) {
            state.settings.inc(SettingId::MemoryDisplayMode, 1);
            log::debug!(
                "memory display mode: {}",
                state.settings.setting(SettingId::MemoryDisplayMode).value_name()
            );
        }

        self.clamp_viewport(state);
    }

    pub fn print(&self, state: &InspectState, out: &mut dyn Write) -> io::Result<()> {
        let rows = Self::num_shown_rows(state);
        writeln!(
            out,
            "- SECTION: [{:08X}-{:08X}]",
            self.viewport,
            self.view_end(rows)
        )?;
        for row in 0..rows {
            let addr = self.viewport.wrapping_add(row * PAGE_MEMORY_STEP);
            write!(out, "- {:08X}:", addr)?;
            for word_index in 0..(PAGE_MEMORY_STEP / WORD_SIZE) {
                match state
                    .memory
                    .try_read_word_aligned(addr.wrapping_add(word_index * WORD_SIZE))
                {
                    Some(word) => write!(out, " {:08X}", word)?,
                    None => write!(out, " ********")?,
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

/// Whether `addr` starts a different symbol than the byte before it
fn symbol_changes_at(state: &InspectState, addr: Address) -> bool {
    let Some(symbols) = state.symbols() else {
        return false;
    };
    let here = symbols.get_map_symbol(addr).map(|sym| sym.addr);
    let before = symbols.get_map_symbol(addr.wrapping_sub(1)).map(|sym| sym.addr);
    here != before
}

fn draw_byte(surface: &mut dyn Surface, x: u32, y: u32, mode: DisplayMode, byte: u8, color: Rgba32) {
    match mode {
        DisplayMode::Ascii => {
            surface.draw_glyph(x, y, ascii_glyph(byte), color);
        }
        DisplayMode::Binary => {
            surface.draw_glyph(x, y, nibble_bits_glyph(byte >> 4), color);
            surface.draw_glyph(x + 1, y, nibble_bits_glyph(byte), color);
        }
        DisplayMode::Hex | DisplayMode::Rgba16 | DisplayMode::Rgba32 => {
            surface.draw_glyph(x, y, hex_digit(byte >> 4), color);
            surface.draw_glyph(x + 1, y, hex_digit(byte), color);
        }
    }
}

/// Color swatch for one byte slot. The spacer is filled too when the next
/// byte belongs to the same color.
fn draw_swatch(surface: &mut dyn Surface, x: u32, y: u32, mode: DisplayMode, word: Word, byte_index: u32) {
    let (color, last_in_color) = match mode {
        DisplayMode::Rgba16 => {
            let half = if byte_index < 2 { word >> 16 } else { word };
            (Rgba32::from_rgba16(half as u16), byte_index % 2 == 1)
        }
        _ => (Rgba32(word), byte_index == WORD_SIZE - 1),
    };
    let width = if last_in_color { 2 } else { BYTE_WIDTH };
    surface.draw_rect(x, y, width, 1, color);
}
