//! Settings page: browse and change every crash-screen setting

use crate::screen::controls::{Buttons, ControlType, ControllerInput};
use crate::screen::draw::{Surface, CRASH_SCREEN_NUM_CHARS_X, CRASH_SCREEN_NUM_CHARS_Y};
use crate::screen::settings::{SettingId, SettingsGroupId, SettingsRow, SettingsStore};
use crate::screen::theme::DEFAULT_THEME;
use crate::screen::{page_top, InspectState};
use std::io::{self, Write};

#[derive(Debug, Default)]
pub struct SettingsPage {
    /// Index into `SettingsStore::rows`
    selected: usize,
    /// First visible row
    scroll: usize,
}

impl SettingsPage {
    pub const CONTROLS: &'static [ControlType] = &[
        ControlType::ListCursor,
        ControlType::ChangeValue,
        ControlType::ToggleSection,
        ControlType::ResetSetting,
    ];

    pub fn new() -> Self {
        SettingsPage::default()
    }

    pub fn selected_row(&self, settings: &SettingsStore) -> Option<SettingsRow> {
        settings.rows().get(self.selected).copied()
    }

    pub fn init(&mut self, _state: &InspectState) {
        self.selected = 0;
        self.scroll = 0;
    }

    fn visible_rows(state: &InspectState) -> usize {
        (CRASH_SCREEN_NUM_CHARS_Y - page_top(&state.settings)) as usize
    }

    pub fn draw(&mut self, surface: &mut dyn Surface, state: &InspectState) {
        let rows = state.settings.rows();
        let top = page_top(&state.settings);
        let shown = Self::visible_rows(state);

        for (line, (index, row)) in rows
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(shown)
            .enumerate()
        {
            let y = top + line as u32;
            if index == self.selected {
                surface.draw_rect(0, y, CRASH_SCREEN_NUM_CHARS_X - 1, 1, DEFAULT_THEME.highlight_bg);
            }
            match *row {
                SettingsRow::Header(group) => {
                    let marker = if state.settings.is_expanded(group) {
                        '-'
                    } else {
                        '+'
                    };
                    surface.draw_glyph(1, y, marker, DEFAULT_THEME.comment);
                    surface.print(3, y, group.name(), DEFAULT_THEME.primary);
                }
                SettingsRow::Entry(id) => {
                    let setting = state.settings.setting(id);
                    surface.print(3, y, setting.name, DEFAULT_THEME.text);
                    let value = setting.value_name();
                    let color = if setting.is_default() {
                        DEFAULT_THEME.text
                    } else {
                        DEFAULT_THEME.secondary
                    };
                    let x = CRASH_SCREEN_NUM_CHARS_X - 2 - value.chars().count() as u32;
                    surface.print(x, y, &value, color);
                }
            }
        }

        surface.draw_scroll_bar(
            top,
            top + shown as u32,
            shown as u32,
            rows.len() as u32,
            self.scroll as u32,
            DEFAULT_THEME.scroll_bar,
            true,
        );
    }

    pub fn input(&mut self, input: &ControllerInput, state: &mut InspectState) {
        let settings = &mut state.settings;
        let count = settings.rows().len();

        if input.pressed.up {
            self.selected = self.selected.saturating_sub(1);
        }
        if input.pressed.down && self.selected + 1 < count {
            self.selected += 1;
        }

        if let Some(row) = self.selected_row(settings) {
            let change = if input.pressed.right {
                1
            } else if input.pressed.left {
                -1
            } else {
                0
            };
            match row {
                SettingsRow::Header(group) => {
                    if change != 0 || input.buttons_pressed.contains(Buttons::A) {
                        settings.toggle_section(group);
                    }
                    if input.buttons_pressed.contains(Buttons::B) {
                        settings.reset_group(group);
                        log::debug!("reset settings group {}", group.name());
                    }
                }
                SettingsRow::Entry(id) => {
                    if change != 0 {
                        settings.inc(id, change);
                    }
                    if input.buttons_pressed.contains(Buttons::B) {
                        settings.reset(id);
                    }
                }
            }
        }

        // Collapsing a section can remove the rows below the cursor
        let count = settings.rows().len();
        self.selected = self.selected.min(count.saturating_sub(1));

        let shown = Self::visible_rows(state);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + shown {
            self.scroll = self.selected + 1 - shown;
        }
    }

    pub fn print(&self, state: &InspectState, out: &mut dyn Write) -> io::Result<()> {
        for group in SettingsGroupId::ALL {
            writeln!(out, "- {}:", group.name())?;
            for id in SettingId::ALL.into_iter().filter(|id| id.group() == group) {
                let setting = state.settings.setting(id);
                writeln!(out, "-   {}: {}", setting.name, setting.value_name())?;
            }
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

    fn state() -> InspectState {
        let memory = AddressSpace::new(vec![0; 0x100]).unwrap();
        InspectState::new(memory, None, ThreadContext::default(), SettingsStore::new())
    }

    fn press(page: &mut SettingsPage, state: &mut InspectState, input: ControllerInput, times: usize) {
        for _ in 0..times {
            page.input(&input, state);
        }
    }

    #[test]
    fn test_change_and_reset_value() {
        let mut state = state();
        let mut page = SettingsPage::new();
        // GLOBAL, show header, wrap pages, MEMORY, range, dividers, symbol, mode
        press(&mut page, &mut state, ControllerInput::down(), 7);
        assert_eq!(
            page.selected_row(&state.settings),
            Some(SettingsRow::Entry(SettingId::MemoryDisplayMode))
        );

        press(&mut page, &mut state, ControllerInput::left(), 1);
        assert_eq!(state.settings.setting(SettingId::MemoryDisplayMode).value_name(), "RGBA32");

        page.input(&ControllerInput::buttons(Buttons::B), &mut state);
        assert_eq!(state.settings.get(SettingId::MemoryDisplayMode), 0);
    }

    #[test]
    fn test_collapse_keeps_cursor_in_list() {
        let mut state = state();
        let mut page = SettingsPage::new();
        press(&mut page, &mut state, ControllerInput::down(), 3);
        assert_eq!(
            page.selected_row(&state.settings),
            Some(SettingsRow::Header(SettingsGroupId::Memory))
        );

        page.input(&ControllerInput::buttons(Buttons::A), &mut state);
        assert!(!state.settings.is_expanded(SettingsGroupId::Memory));
        assert_eq!(state.settings.rows().len(), 4);

        press(&mut page, &mut state, ControllerInput::down(), 5);
        assert_eq!(
            page.selected_row(&state.settings),
            Some(SettingsRow::Header(SettingsGroupId::Memory))
        );

        press(&mut page, &mut state, ControllerInput::up(), 3);
        page.input(&ControllerInput::buttons(Buttons::A), &mut state);
        assert_eq!(state.settings.rows(), [
            SettingsRow::Header(SettingsGroupId::Global),
            SettingsRow::Header(SettingsGroupId::Memory),
        ]);
        assert_eq!(page.selected_row(&state.settings), Some(SettingsRow::Header(SettingsGroupId::Global)));
    }

    #[test]
    fn test_draw_marks_changed_values() {
        let mut state = state();
        state.settings.set(SettingId::WrapPages, 0).unwrap();
        let mut page = SettingsPage::new();
        let mut canvas = CellCanvas::new(CRASH_SCREEN_NUM_CHARS_X, CRASH_SCREEN_NUM_CHARS_Y);
        page.draw(&mut canvas, &state);

        let (_, y) = canvas.find_text("Wrap page switching").unwrap();
        let (x, value_y) = canvas.find_text("FALSE").unwrap();
        assert_eq!(y, value_y);
        assert_eq!(canvas.cell(x, y).unwrap().fg, DEFAULT_THEME.secondary);
        assert!(canvas.find_text("- GLOBAL").is_some());
    }

    #[test]
    fn test_print_lists_settings() {
        let state = state();
        let mut out = Vec::new();
        SettingsPage::new().print(&state, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("- MEMORY:\n"));
        assert!(text.contains("-   Display mode: HEX\n"));
    }
}
