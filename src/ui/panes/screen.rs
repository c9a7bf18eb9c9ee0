//! Crash screen pane: blits a [`CellCanvas`] into the terminal buffer

use crate::screen::canvas::CellCanvas;
use crate::screen::draw::{Rgba32, Surface};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::{Block, Borders, Widget},
    Frame,
};

pub fn to_color(color: Rgba32) -> Color {
    Color::Rgb(color.r(), color.g(), color.b())
}

/// Widget drawing every canvas cell that fits in its area
pub struct CanvasWidget<'a> {
    canvas: &'a CellCanvas,
}

impl<'a> CanvasWidget<'a> {
    pub fn new(canvas: &'a CellCanvas) -> Self {
        CanvasWidget { canvas }
    }
}

impl Widget for CanvasWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = (self.canvas.width()).min(area.width as u32);
        let height = (self.canvas.height()).min(area.height as u32);
        for y in 0..height {
            for x in 0..width {
                let Some(cell) = self.canvas.cell(x, y) else {
                    continue;
                };
                let position = (area.x + x as u16, area.y + y as u16);
                if let Some(target) = buf.cell_mut(position) {
                    target.set_char(cell.glyph);
                    target.set_fg(to_color(cell.fg));
                    target.set_bg(to_color(cell.bg));
                }
            }
        }
    }
}

/// Render the crash screen centered in `area`, framed by a border
pub fn render_screen_pane(frame: &mut Frame, area: Rect, canvas: &CellCanvas, title: &str) {
    let outer_width = (canvas.width() + 2).min(area.width as u32) as u16;
    let outer_height = (canvas.height() + 2).min(area.height as u32) as u16;
    let outer = Rect {
        x: area.x + (area.width - outer_width) / 2,
        y: area.y + (area.height - outer_height) / 2,
        width: outer_width,
        height: outer_height,
    };

    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(outer);
    frame.render_widget(block, outer);
    frame.render_widget(CanvasWidget::new(canvas), inner);
}
