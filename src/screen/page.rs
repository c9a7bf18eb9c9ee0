//! Page table of the crash screen
//!
//! Pages are a closed set, so they are a tagged enum rather than a table of
//! handler pointers. [`PageRegistry`] owns one instance of every page for the
//! lifetime of the crash screen along with its [`PageFlags`], and tracks
//! which page is selected.

use super::controls::{ControlType, ControllerInput};
use super::draw::Surface;
use super::settings::SettingsGroupId;
use super::InspectState;
use crate::pages::{context::ContextPage, memory::MemoryPage, settings::SettingsPage};
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageId {
    Context,
    Memory,
    Settings,
}

impl PageId {
    /// Every page, in switching order
    pub const ALL: [PageId; 3] = [PageId::Context, PageId::Memory, PageId::Settings];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The page `delta` steps away, wrapping around the ends when `wrap` is
    /// set. Returns `None` when the step would leave the table.
    pub fn offset(self, delta: i32, wrap: bool) -> Option<PageId> {
        let count = Self::ALL.len() as i32;
        let target = self.index() as i32 + delta;
        let target = if wrap {
            target.rem_euclid(count)
        } else if (0..count).contains(&target) {
            target
        } else {
            return None;
        };
        Some(Self::ALL[target as usize])
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageFlags {
    /// `init` has run
    pub initialized: bool,
    /// A handler panicked; the page is no longer dispatched
    pub crashed: bool,
}

#[derive(Debug)]
pub enum Page {
    Context(ContextPage),
    Memory(MemoryPage),
    Settings(SettingsPage),
}

impl Page {
    pub fn new(id: PageId) -> Self {
        match id {
            PageId::Context => Page::Context(ContextPage::new()),
            PageId::Memory => Page::Memory(MemoryPage::new()),
            PageId::Settings => Page::Settings(SettingsPage::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Page::Context(_) => "CONTEXT",
            Page::Memory(_) => "MEMORY VIEW",
            Page::Settings(_) => "SETTINGS",
        }
    }

    pub fn controls(&self) -> &'static [ControlType] {
        match self {
            Page::Context(_) => ContextPage::CONTROLS,
            Page::Memory(_) => MemoryPage::CONTROLS,
            Page::Settings(_) => SettingsPage::CONTROLS,
        }
    }

    pub fn settings_group(&self) -> Option<SettingsGroupId> {
        match self {
            Page::Memory(_) => Some(SettingsGroupId::Memory),
            Page::Context(_) | Page::Settings(_) => None,
        }
    }

    pub fn init(&mut self, state: &InspectState) {
        match self {
            Page::Context(page) => page.init(state),
            Page::Memory(page) => page.init(state),
            Page::Settings(page) => page.init(state),
        }
    }

    pub fn draw(&mut self, surface: &mut dyn Surface, state: &InspectState) {
        match self {
            Page::Context(page) => page.draw(surface, state),
            Page::Memory(page) => page.draw(surface, state),
            Page::Settings(page) => page.draw(surface, state),
        }
    }

    pub fn input(&mut self, input: &ControllerInput, state: &mut InspectState) {
        match self {
            Page::Context(page) => page.input(input, state),
            Page::Memory(page) => page.input(input, state),
            Page::Settings(page) => page.input(input, state),
        }
    }

    pub fn print(&self, state: &InspectState, out: &mut dyn Write) -> io::Result<()> {
        match self {
            Page::Context(page) => page.print(state, out),
            Page::Memory(page) => page.print(state, out),
            Page::Settings(page) => page.print(state, out),
        }
    }

    /// The selected address was changed from outside the page
    pub fn on_address_selected(&mut self, state: &InspectState) {
        if let Page::Memory(page) = self {
            page.on_address_selected(state);
        }
    }
}

#[derive(Debug)]
pub struct PageEntry {
    pub page: Page,
    pub flags: PageFlags,
}

impl PageEntry {
    /// Run a page handler, marking the page crashed if it panics.
    ///
    /// Returns `None` without running `f` when the page already crashed.
    pub fn guarded<R>(&mut self, f: impl FnOnce(&mut Page) -> R) -> Option<R> {
        if self.flags.crashed {
            return None;
        }
        let page = &mut self.page;
        match panic::catch_unwind(AssertUnwindSafe(|| f(page))) {
            Ok(result) => Some(result),
            Err(_) => {
                log::error!("page {} crashed", self.page.name());
                self.flags.crashed = true;
                None
            }
        }
    }
}

#[derive(Debug)]
pub struct PageRegistry {
    entries: Vec<PageEntry>,
    selected: PageId,
}

impl Default for PageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRegistry {
    pub fn new() -> Self {
        PageRegistry {
            entries: PageId::ALL
                .into_iter()
                .map(|id| PageEntry {
                    page: Page::new(id),
                    flags: PageFlags::default(),
                })
                .collect(),
            selected: PageId::Memory,
        }
    }

    pub fn selected(&self) -> PageId {
        self.selected
    }

    pub fn entry(&self, id: PageId) -> &PageEntry {
        &self.entries[id.index()]
    }

    pub fn entry_mut(&mut self, id: PageId) -> &mut PageEntry {
        &mut self.entries[id.index()]
    }

    pub fn active(&self) -> &PageEntry {
        self.entry(self.selected)
    }

    pub fn active_mut(&mut self) -> &mut PageEntry {
        self.entry_mut(self.selected)
    }

    /// Select a page, running its `init` the first time it is shown.
    ///
    /// A page that was already initialized is told about the current
    /// selection instead, since it may have changed while the page was away.
    pub fn set_page(&mut self, id: PageId, state: &InspectState) {
        self.selected = id;
        let entry = self.entry_mut(id);
        if entry.flags.initialized {
            entry.guarded(|page| page.on_address_selected(state));
        } else {
            entry.guarded(|page| page.init(state));
            entry.flags.initialized = true;
        }
        log::debug!("switched to page {}", entry.page.name());
    }

    /// Tell every initialized page that the selected address changed
    pub fn address_selected(&mut self, state: &InspectState) {
        for entry in self.entries.iter_mut().filter(|e| e.flags.initialized) {
            entry.guarded(|page| page.on_address_selected(state));
        }
    }
}
