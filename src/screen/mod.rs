//! The crash screen: page system, popups and per-frame update/draw
//!
//! [`CrashScreen`] owns the [`PageRegistry`] and the [`InspectState`] every
//! page reads from. A front end drives it once per frame:
//!
//! ```text
//! ControllerInput → CrashScreen::update → CrashScreen::draw(&mut Surface)
//! ```
//!
//! Nothing here touches the terminal; pages only see the [`Surface`] trait,
//! so the whole screen can be driven headless from tests.

pub mod canvas;
pub mod controls;
pub mod draw;
pub mod page;
pub mod popup;
pub mod settings;
pub mod theme;

use crate::error::LoadError;
use crate::memory::context::ThreadContext;
use crate::memory::symbols::{parse_hex, SymbolTable};
use crate::memory::{Address, AddressSpace, VIRTUAL_RAM_START};
use controls::{Buttons, ControlType, ControllerInput};
use draw::{Surface, CRASH_SCREEN_NUM_CHARS_X};
use page::{PageEntry, PageId, PageRegistry};
use popup::{AddressSelect, Popup, PopupAction};
use settings::{SettingId, SettingsStore};
use std::io::{self, Write};
use theme::DEFAULT_THEME;

/// Controls every page shares
pub const GLOBAL_CONTROLS: &[ControlType] = &[
    ControlType::SwitchPage,
    ControlType::ShowControls,
    ControlType::Print,
];

/// Everything the pages inspect and share
#[derive(Debug)]
pub struct InspectState {
    pub memory: AddressSpace,
    pub symbols: Option<SymbolTable>,
    pub thread: ThreadContext,
    pub settings: SettingsStore,
    /// Cursor shared by every page, always inside RAM
    pub selected_address: Address,
    pub popup: Option<Popup>,
}

impl InspectState {
    pub fn new(
        memory: AddressSpace,
        symbols: Option<SymbolTable>,
        thread: ThreadContext,
        settings: SettingsStore,
    ) -> Self {
        let mut state = InspectState {
            memory,
            symbols,
            thread,
            settings,
            selected_address: VIRTUAL_RAM_START,
            popup: None,
        };
        state.selected_address = state.default_selection();
        state
    }

    /// The crashed PC when it is in RAM, otherwise the start of RAM
    pub fn default_selection(&self) -> Address {
        if self.memory.is_valid_ram_addr(self.thread.pc) {
            self.thread.pc
        } else {
            VIRTUAL_RAM_START
        }
    }

    /// Resolve a hex address or symbol name to an address inside RAM
    pub fn resolve_target(&self, text: &str) -> Result<Address, LoadError> {
        let addr = match parse_hex(text) {
            Some(addr) => addr,
            None => self
                .symbols
                .as_ref()
                .and_then(|symbols| symbols.find_by_name(text))
                .map(|sym| sym.addr)
                .ok_or_else(|| LoadError::UnknownTarget(text.to_string()))?,
        };
        if !self.memory.is_valid_ram_addr(addr) {
            return Err(LoadError::TargetOutOfRange(addr));
        }
        Ok(addr)
    }

    pub fn symbols(&self) -> Option<&SymbolTable> {
        self.symbols.as_ref()
    }
}

#[derive(Debug)]
pub struct CrashScreen {
    pub state: InspectState,
    pages: PageRegistry,
}

impl CrashScreen {
    pub fn new(state: InspectState) -> Self {
        let mut pages = PageRegistry::new();
        let first = pages.selected();
        pages.set_page(first, &state);
        CrashScreen { state, pages }
    }

    pub fn active_page(&self) -> PageId {
        self.pages.selected()
    }

    pub fn page(&self, id: PageId) -> &PageEntry {
        self.pages.entry(id)
    }

    pub fn set_page(&mut self, id: PageId) {
        self.pages.set_page(id, &self.state);
    }

    /// Move the cursor from outside any page, e.g. from the command line
    pub fn select_address(&mut self, addr: Address) {
        self.state.selected_address = addr;
        self.pages.address_selected(&self.state);
    }

    /// Handle one frame of controller input
    pub fn update(&mut self, input: &ControllerInput) {
        if input.buttons_pressed.contains(Buttons::START) {
            self.state.popup = match self.state.popup {
                Some(Popup::Controls) => None,
                _ => Some(Popup::Controls),
            };
            return;
        }

        if let Some(popup) = &mut self.state.popup {
            let action = match popup {
                Popup::Address(select) => select.input(input, &self.state.memory),
                Popup::Controls if input.buttons_pressed.contains(Buttons::B) => {
                    PopupAction::Close
                }
                Popup::Controls => PopupAction::Stay,
            };
            match action {
                PopupAction::Stay => {}
                PopupAction::Close => self.state.popup = None,
                PopupAction::Jump(addr) => {
                    log::debug!("jumping to {:08X}", addr);
                    self.state.popup = None;
                    self.select_address(addr);
                }
            }
            return;
        }

        let wrap = self.state.settings.get_bool(SettingId::WrapPages);
        let step = if input.buttons_pressed.contains(Buttons::L) {
            -1
        } else if input.buttons_pressed.contains(Buttons::R) {
            1
        } else {
            0
        };
        if step != 0 {
            if let Some(next) = self.pages.selected().offset(step, wrap) {
                self.set_page(next);
            }
            return;
        }

        let state = &mut self.state;
        self.pages
            .active_mut()
            .guarded(|page| page.input(input, state));
    }

    /// Draw the whole screen for this frame
    pub fn draw<S: Surface>(&mut self, surface: &mut S) {
        surface.clear(DEFAULT_THEME.background);

        let header = self.state.settings.get_bool(SettingId::ShowPageHeader);
        if header {
            self.draw_header(surface);
        }

        let state = &self.state;
        let entry = self.pages.active_mut();
        let drawn = entry.guarded(|page| page.draw(surface, state));
        if drawn.is_none() {
            let y = page_top(&self.state.settings) + 1;
            surface.print(1, y, "PAGE CRASHED", DEFAULT_THEME.error);
        }

        match &self.state.popup {
            Some(Popup::Address(select)) => {
                select.draw(surface, &self.state.memory, self.state.symbols())
            }
            Some(Popup::Controls) => {
                let page = &self.pages.active().page;
                let controls: Vec<ControlType> = GLOBAL_CONTROLS
                    .iter()
                    .chain(page.controls())
                    .copied()
                    .collect();
                popup::draw_controls(surface, page.name(), &controls);
            }
            None => {}
        }
    }

    fn draw_header(&self, surface: &mut dyn Surface) {
        surface.draw_rect(0, 0, CRASH_SCREEN_NUM_CHARS_X, 1, DEFAULT_THEME.header_bg);
        let page = &self.pages.active().page;
        surface.print(1, 0, page.name(), DEFAULT_THEME.header_text);

        let counter = format!(
            "PAGE {}/{}",
            self.pages.selected().index() + 1,
            PageId::ALL.len()
        );
        let x = CRASH_SCREEN_NUM_CHARS_X - 1 - counter.len() as u32;
        surface.print(x, 0, &counter, DEFAULT_THEME.header_text);
    }

    /// Write the active page's contents as text
    pub fn print(&self, out: &mut dyn Write) -> io::Result<()> {
        let entry = self.pages.active();
        if entry.flags.crashed {
            return writeln!(out, "{}: page crashed", entry.page.name());
        }
        entry.page.print(&self.state, out)
    }
}

/// First line available to pages, below the title bar when it is shown
pub fn page_top(settings: &SettingsStore) -> u32 {
    settings.get_bool(SettingId::ShowPageHeader) as u32
}

/// Open the address popup, seeded with `seed`
pub fn open_address_select(state: &mut InspectState, seed: Address) {
    log::debug!("address select opened at {:08X}", seed);
    state.popup = Some(Popup::Address(AddressSelect::new(seed)));
}
