//! Main TUI application state and logic

use super::keymap::{map_key, KeyAction};
use crate::screen::canvas::CellCanvas;
use crate::screen::draw::{CRASH_SCREEN_NUM_CHARS_X, CRASH_SCREEN_NUM_CHARS_Y};
use crate::screen::CrashScreen;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// The main application state
pub struct App {
    /// The crash screen being browsed
    pub screen: CrashScreen,

    /// Surface the crash screen draws into each frame
    pub canvas: CellCanvas,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Text written by the print key, flushed to stdout on exit
    pub print_buffer: Vec<u8>,
}

impl App {
    pub fn new(screen: CrashScreen) -> Self {
        App {
            screen,
            canvas: CellCanvas::new(CRASH_SCREEN_NUM_CHARS_X, CRASH_SCREEN_NUM_CHARS_Y),
            should_quit: false,
            status_message: String::from("Ready!"),
            print_buffer: Vec::new(),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        self.screen.draw(&mut self.canvas);

        let active = self.screen.active_page();
        let entry = self.screen.page(active);
        super::panes::render_screen_pane(frame, chunks[0], &self.canvas, entry.page.name());
        super::panes::render_status_bar(
            frame,
            chunks[1],
            &self.status_message,
            self.screen.state.selected_address,
            entry.flags.crashed,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match map_key(key) {
            Some(KeyAction::Quit) => {
                self.should_quit = true;
            }
            Some(KeyAction::Print) => self.print_page(),
            Some(KeyAction::Controller(input)) => {
                self.screen.update(&input);
                self.status_message = format!(
                    "{:08X}",
                    self.screen.state.selected_address
                );
            }
            None => {}
        }
    }

    fn print_page(&mut self) {
        let name = self.screen.page(self.screen.active_page()).page.name();
        match self.screen.print(&mut self.print_buffer) {
            Ok(()) => {
                self.status_message = format!("Printed {}", name);
            }
            Err(e) => {
                self.status_message = format!("Print failed: {}", e);
            }
        }
    }
}
