//! Thread context page: why the thread crashed and its registers

use crate::memory::context::GPR_NAMES;
use crate::screen::controls::{Buttons, ControlType, ControllerInput};
use crate::screen::draw::{print_addr_location_info, Surface, CRASH_SCREEN_NUM_CHARS_X};
use crate::screen::theme::DEFAULT_THEME;
use crate::screen::{open_address_select, page_top, InspectState};
use std::io::{self, Write};

const REGISTER_COLUMNS: usize = 3;

/// Width of one register column, `RA 80246CD8` plus padding
const REGISTER_COLUMN_WIDTH: u32 = 21;

#[derive(Debug, Default)]
pub struct ContextPage;

impl ContextPage {
    pub const CONTROLS: &'static [ControlType] = &[ControlType::JumpToAddress];

    pub fn new() -> Self {
        ContextPage
    }

    pub fn init(&mut self, _state: &InspectState) {}

    pub fn draw(&mut self, surface: &mut dyn Surface, state: &InspectState) {
        let thread = &state.thread;
        let mut y = page_top(&state.settings);

        let x = 1 + surface.print(1, y, "THREAD: ", DEFAULT_THEME.text);
        surface.print(x, y, &thread.thread_id.to_string(), DEFAULT_THEME.primary);
        y += 1;

        let x = 1 + surface.print(1, y, "CAUSE: ", DEFAULT_THEME.text);
        surface.print(x, y, thread.cause_description(), DEFAULT_THEME.error);
        y += 1;

        let x = 1 + surface.print(1, y, "PC: ", DEFAULT_THEME.text);
        let x = x + surface.print(x, y, &format!("{:08X}", thread.pc), DEFAULT_THEME.crash_at);
        print_addr_location_info(
            surface,
            x + 1,
            y,
            CRASH_SCREEN_NUM_CHARS_X - x - 2,
            state.symbols(),
            thread.pc,
        );
        y += 1;

        let x = 1 + surface.print(1, y, "SR: ", DEFAULT_THEME.text);
        surface.print(x, y, &format!("{:08X}", thread.sr), DEFAULT_THEME.primary);
        let x = 22 + surface.print(22, y, "BADVADDR: ", DEFAULT_THEME.text);
        surface.print(x, y, &format!("{:08X}", thread.badvaddr), DEFAULT_THEME.primary);
        y += 1;

        surface.draw_divider(y);
        y += 1;

        for (index, name) in GPR_NAMES.iter().enumerate() {
            let column = (index % REGISTER_COLUMNS) as u32;
            let line = y + (index / REGISTER_COLUMNS) as u32;
            let x = 1 + column * REGISTER_COLUMN_WIDTH;
            surface.print(x, line, &name.to_uppercase(), DEFAULT_THEME.comment);
            surface.print(
                x + 3,
                line,
                &format!("{:08X}", thread.gpr[index]),
                DEFAULT_THEME.text,
            );
        }
    }

    pub fn input(&mut self, input: &ControllerInput, state: &mut InspectState) {
        if input.buttons_pressed.contains(Buttons::A) {
            let pc = state.thread.pc;
            let seed = if state.memory.is_valid_ram_addr(pc) {
                pc
            } else {
                state.selected_address
            };
            open_address_select(state, seed);
        }
    }

    pub fn print(&self, state: &InspectState, out: &mut dyn Write) -> io::Result<()> {
        let thread = &state.thread;
        writeln!(out, "- THREAD: {}", thread.thread_id)?;
        writeln!(
            out,
            "- CAUSE: {:08X} ({})",
            thread.cause,
            thread.cause_description()
        )?;
        writeln!(out, "- PC: {:08X}", thread.pc)?;
        writeln!(out, "- SR: {:08X}", thread.sr)?;
        writeln!(out, "- BADVADDR: {:08X}", thread.badvaddr)?;
        for (names, values) in GPR_NAMES
            .chunks(REGISTER_COLUMNS)
            .zip(thread.gpr.chunks(REGISTER_COLUMNS))
        {
            let line: Vec<String> = names
                .iter()
                .zip(values)
                .map(|(name, value)| format!("{}: {:08X}", name.to_uppercase(), value))
                .collect();
            writeln!(out, "- {}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::context::ThreadContext;
    use crate::memory::AddressSpace;
    use crate::screen::canvas::CellCanvas;
    use crate::screen::draw::CRASH_SCREEN_NUM_CHARS_Y;
    use crate::screen::popup::Popup;
    use crate::screen::settings::SettingsStore;

    fn state() -> InspectState {
        let memory = AddressSpace::new(vec![0; 0x1000]).unwrap();
        let mut thread = ThreadContext {
            thread_id: 5,
            pc: 0x8000_0400,
            cause: 0x0000_0008,
            ..Default::default()
        };
        thread.gpr[31] = 0x8000_0123;
        InspectState::new(memory, None, thread, SettingsStore::new())
    }

    #[test]
    fn test_draw_shows_cause_and_registers() {
        let state = state();
        let mut canvas = CellCanvas::new(CRASH_SCREEN_NUM_CHARS_X, CRASH_SCREEN_NUM_CHARS_Y);
        ContextPage::new().draw(&mut canvas, &state);
        assert!(canvas.find_text("TLB exception on load or inst.").is_some());
        assert!(canvas.find_text("PC: 80000400 UNKNOWN").is_some());
        assert!(canvas.find_text("RA 80000123").is_some());
        assert!(canvas.find_text("ZR 00000000").is_some());
    }

    #[test]
    fn test_a_opens_popup_at_pc() {
        let mut state = state();
        ContextPage::new().input(&ControllerInput::buttons(Buttons::A), &mut state);
        match state.popup {
            Some(Popup::Address(select)) => assert_eq!(select.target(), 0x8000_0400),
            other => panic!("expected address popup, got {:?}", other),
        }
    }

    #[test]
    fn test_print_lists_registers() {
        let state = state();
        let mut out = Vec::new();
        ContextPage::new().print(&state, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("- PC: 80000400"));
        assert!(text.contains("- ZR: 00000000 AT: 00000000 V0: 00000000"));
        assert!(text.lines().last().unwrap().ends_with("RA: 80000123"));
    }
}
