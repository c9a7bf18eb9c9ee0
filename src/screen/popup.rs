//! Popups drawn over the active page
//!
//! While a popup is open it receives all controller input instead of the
//! page underneath.

use super::controls::{Buttons, ControlType, ControllerInput};
use super::draw::{format_location, hex_digit, Surface, CRASH_SCREEN_NUM_CHARS_X};
use super::theme::DEFAULT_THEME;
use crate::memory::symbols::SymbolTable;
use crate::memory::{Address, AddressSpace};

const NUM_DIGITS: u32 = 8;

/// Digit the cursor starts on, the first one past the segment prefix
const START_DIGIT: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Popup {
    Address(AddressSelect),
    Controls,
}

/// What the crash screen should do after a popup handled input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAction {
    Stay,
    Close,
    Jump(Address),
}

/// Hex address entry, seeded with an address and edited digit by digit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSelect {
    target: Address,
    /// 0 is the most significant digit
    digit: u32,
}

impl AddressSelect {
    pub fn new(seed: Address) -> Self {
        AddressSelect {
            target: seed,
            digit: START_DIGIT,
        }
    }

    pub fn target(&self) -> Address {
        self.target
    }

    pub fn digit(&self) -> u32 {
        self.digit
    }

    fn step_digit(&mut self, up: bool) {
        let shift = 4 * (NUM_DIGITS - 1 - self.digit);
        let nibble = (self.target >> shift) & 0xF;
        let nibble = if up { (nibble + 1) & 0xF } else { nibble.wrapping_sub(1) & 0xF };
        self.target = (self.target & !(0xF << shift)) | (nibble << shift);
    }

    pub fn input(&mut self, input: &ControllerInput, memory: &AddressSpace) -> PopupAction {
        if input.pressed.left && self.digit > 0 {
            self.digit -= 1;
        }
        if input.pressed.right && self.digit < NUM_DIGITS - 1 {
            self.digit += 1;
        }
        if input.pressed.up {
            self.step_digit(true);
        }
        if input.pressed.down {
            self.step_digit(false);
        }

        if input.buttons_pressed.contains(Buttons::A) && memory.is_valid_ram_addr(self.target) {
            return PopupAction::Jump(self.target);
        }
        if input.buttons_pressed.contains(Buttons::B) {
            return PopupAction::Close;
        }
        PopupAction::Stay
    }

    pub fn draw(
        &self,
        surface: &mut dyn Surface,
        memory: &AddressSpace,
        symbols: Option<&SymbolTable>,
    ) {
        let (w, h) = (32, 6);
        let x = (CRASH_SCREEN_NUM_CHARS_X - w) / 2;
        let y = 9;
        surface.draw_rect(x, y, w, h, DEFAULT_THEME.popup_bg);

        surface.print(x + 2, y + 1, "GO TO ADDRESS:", DEFAULT_THEME.text);

        let valid = memory.is_valid_ram_addr(self.target);
        let digit_color = if valid {
            DEFAULT_THEME.text
        } else {
            DEFAULT_THEME.out_of_bounds
        };
        surface.print(x + 2, y + 2, "0x", DEFAULT_THEME.comment);
        for i in 0..NUM_DIGITS {
            let shift = 4 * (NUM_DIGITS - 1 - i);
            let glyph = hex_digit((self.target >> shift) as u8);
            let gx = x + 4 + i;
            if i == self.digit {
                surface.draw_rect(gx, y + 2, 1, 1, DEFAULT_THEME.memory_select);
                surface.draw_glyph(gx, y + 2, glyph, digit_color.invert());
            } else {
                surface.draw_glyph(gx, y + 2, glyph, digit_color);
            }
        }

        if !valid {
            surface.print(x + 2, y + 3, "NOT IN RAM", DEFAULT_THEME.out_of_bounds);
        } else if let Some(location) = format_location(symbols, self.target) {
            let clipped: String = location.chars().take((w - 4) as usize).collect();
            surface.print(x + 2, y + 3, &clipped, DEFAULT_THEME.function_name);
        }

        surface.print(x + 2, y + 4, "A:GO  B:CANCEL", DEFAULT_THEME.comment);
    }
}

/// Controls list for the active page
pub fn draw_controls(surface: &mut dyn Surface, page_name: &str, controls: &[ControlType]) {
    let w = 44;
    let h = controls.len() as u32 + 4;
    let x = (CRASH_SCREEN_NUM_CHARS_X - w) / 2;
    let y = 3;
    surface.draw_rect(x, y, w, h, DEFAULT_THEME.popup_bg);
    surface.print(
        x + 2,
        y + 1,
        &format!("{} CONTROLS", page_name),
        DEFAULT_THEME.primary,
    );
    for (i, control) in controls.iter().enumerate() {
        let (button, description) = control.description();
        let line = y + 2 + i as u32;
        surface.print(x + 2, line, button, DEFAULT_THEME.secondary);
        surface.print(x + 14, line, description, DEFAULT_THEME.text);
    }
}
