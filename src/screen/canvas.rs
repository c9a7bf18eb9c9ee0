//! In-memory cell grid implementing [`Surface`]
//!
//! The terminal front end blits a `CellCanvas` into the ratatui buffer each
//! frame; tests read it back to check what a page drew.

use super::draw::{Rgba32, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub fg: Rgba32,
    pub bg: Rgba32,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            glyph: ' ',
            fg: Rgba32::NONE,
            bg: Rgba32::NONE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CellCanvas {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl CellCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        CellCanvas {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    pub fn cell(&self, x: u32, y: u32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// The glyphs of line `y` as a string
    pub fn row_text(&self, y: u32) -> String {
        (0..self.width)
            .filter_map(|x| self.cell(x, y))
            .map(|cell| cell.glyph)
            .collect()
    }

    /// Position of the first occurrence of `needle` on any line
    pub fn find_text(&self, needle: &str) -> Option<(u32, u32)> {
        (0..self.height).find_map(|y| {
            let row: Vec<char> = self.row_text(y).chars().collect();
            let needle: Vec<char> = needle.chars().collect();
            row.windows(needle.len().max(1))
                .position(|window| window == needle.as_slice())
                .map(|x| (x as u32, y))
        })
    }
}

impl Surface for CellCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Rgba32) {
        self.cells.fill(Cell {
            glyph: ' ',
            fg: Rgba32::NONE,
            bg: color,
        });
    }

    fn draw_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba32) {
        if color.a() == 0 {
            return;
        }
        for cy in y..y.saturating_add(h) {
            for cx in x..x.saturating_add(w) {
                let Some(i) = self.index(cx, cy) else {
                    continue;
                };
                let cell = &mut self.cells[i];
                if color.a() == 0xFF {
                    cell.bg = color;
                    cell.glyph = ' ';
                } else {
                    cell.bg = color.blend_over(cell.bg);
                    cell.fg = color.blend_over(cell.fg);
                }
            }
        }
    }

    fn draw_glyph(&mut self, x: u32, y: u32, glyph: char, color: Rgba32) {
        if let Some(i) = self.index(x, y) {
            self.cells[i].glyph = glyph;
            self.cells[i].fg = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba32 = Rgba32::rgb(255, 0, 0);
    const BLACK: Rgba32 = Rgba32::rgb(0, 0, 0);

    #[test]
    fn test_print_clips_at_right_edge() {
        let mut canvas = CellCanvas::new(8, 2);
        let drawn = canvas.print(5, 1, "HELLO", RED);
        assert_eq!(drawn, 3);
        assert_eq!(canvas.row_text(1), "     HEL");
        assert_eq!(canvas.find_text("HEL"), Some((5, 1)));
        assert_eq!(canvas.find_text("LO"), None);
    }

    #[test]
    fn test_opaque_rect_hides_glyphs() {
        let mut canvas = CellCanvas::new(4, 1);
        canvas.clear(BLACK);
        canvas.print(0, 0, "ABCD", RED);
        canvas.draw_rect(1, 0, 2, 1, RED);
        assert_eq!(canvas.row_text(0), "A  D");
        assert_eq!(canvas.cell(1, 0).unwrap().bg, RED);
        assert_eq!(canvas.cell(3, 0).unwrap().bg, BLACK);
    }

    #[test]
    fn test_translucent_rect_tints() {
        let mut canvas = CellCanvas::new(2, 1);
        canvas.clear(BLACK);
        canvas.print(0, 0, "X", BLACK);
        canvas.draw_rect(0, 0, 1, 1, RED.with_alpha(0x80));
        let cell = canvas.cell(0, 0).unwrap();
        assert_eq!(cell.glyph, 'X');
        assert_eq!(cell.bg.r(), 0x80);
        assert_eq!(cell.bg.g(), 0);

        // Fully transparent rects draw nothing
        canvas.draw_rect(1, 0, 1, 1, RED.with_alpha(0));
        assert_eq!(canvas.cell(1, 0).unwrap().bg, BLACK);
    }

    #[test]
    fn test_out_of_bounds_draws_are_ignored() {
        let mut canvas = CellCanvas::new(2, 2);
        canvas.draw_glyph(5, 5, 'Z', RED);
        canvas.draw_rect(1, 1, 10, 10, RED);
        assert!(canvas.cell(2, 2).is_none());
        assert_eq!(canvas.cell(1, 1).unwrap().bg, RED);
    }
}
