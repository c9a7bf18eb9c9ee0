//! Drawing primitives shared by every crash-screen page
//!
//! Pages draw through the [`Surface`] trait, a character-cell display with
//! per-cell foreground and background colors. Coordinates are in cells:
//! `x` counts columns from the left, `y` counts text lines from the top.
//!
//! Only [`Surface::clear`], [`Surface::draw_rect`] and
//! [`Surface::draw_glyph`] need implementing; printing, dividers and scroll
//! bars are built on top of them.

use super::theme::DEFAULT_THEME;
use crate::memory::symbols::{SymbolKind, SymbolTable};
use crate::memory::Address;

/// Width of the crash screen in text columns
pub const CRASH_SCREEN_NUM_CHARS_X: u32 = 64;

/// Height of the crash screen in text lines
pub const CRASH_SCREEN_NUM_CHARS_Y: u32 = 26;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// 32-bit color, laid out `0xRRGGBBAA` like the console's framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba32(pub u32);

impl Rgba32 {
    pub const NONE: Rgba32 = Rgba32(0x0000_0000);

    /// Opaque color from 8-bit channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba32(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | 0xFF)
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    pub const fn with_alpha(self, alpha: u8) -> Self {
        Rgba32((self.0 & 0xFFFF_FF00) | alpha as u32)
    }

    /// Invert the color channels, keeping alpha
    pub const fn invert(self) -> Self {
        Rgba32(self.0 ^ 0xFFFF_FF00)
    }

    /// Expand a packed RGBA5551 color
    pub const fn from_rgba16(color: u16) -> Self {
        const fn expand(c5: u16) -> u8 {
            let c5 = (c5 & 0x1F) as u8;
            (c5 << 3) | (c5 >> 2)
        }
        let alpha = if color & 0x1 != 0 { 0xFF } else { 0x00 };
        Rgba32(
            ((expand(color >> 11) as u32) << 24)
                | ((expand(color >> 6) as u32) << 16)
                | ((expand(color >> 1) as u32) << 8)
                | alpha,
        )
    }

    /// Composite `self` over an opaque `dst`
    pub fn blend_over(self, dst: Rgba32) -> Rgba32 {
        let alpha = self.a() as u32;
        let mix = |src: u8, dst: u8| -> u8 {
            ((src as u32 * alpha + dst as u32 * (255 - alpha)) / 255) as u8
        };
        Rgba32::rgb(
            mix(self.r(), dst.r()),
            mix(self.g(), dst.g()),
            mix(self.b(), dst.b()),
        )
    }
}

/// The display surface pages draw onto
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Fill the whole surface with `color` and blank every glyph
    fn clear(&mut self, color: Rgba32);

    /// Fill a block of cells. Opaque colors replace the cell background and
    /// hide its glyph; translucent colors tint the cell.
    fn draw_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba32);

    fn draw_glyph(&mut self, x: u32, y: u32, glyph: char, color: Rgba32);

    /// Print `text` starting at `(x, y)`, clipped at the right edge.
    /// Returns the number of glyphs drawn.
    fn print(&mut self, x: u32, y: u32, text: &str, color: Rgba32) -> u32 {
        let mut drawn = 0;
        for (i, glyph) in text.chars().enumerate() {
            let gx = x + i as u32;
            if gx >= self.width() {
                break;
            }
            self.draw_glyph(gx, y, glyph, color);
            drawn += 1;
        }
        drawn
    }

    /// Full-width horizontal divider line
    fn draw_divider(&mut self, y: u32) {
        for x in 0..self.width() {
            self.draw_glyph(x, y, '─', DEFAULT_THEME.divider);
        }
    }

    /// Draw a scroll bar in the rightmost column between lines `top` and
    /// `bottom` (exclusive). The bar's length is proportional to
    /// `shown_size / total_size` and its offset to `position / total_size`.
    #[allow(clippy::too_many_arguments)]
    fn draw_scroll_bar(
        &mut self,
        top: u32,
        bottom: u32,
        shown_size: u32,
        total_size: u32,
        position: u32,
        color: Rgba32,
        draw_bg: bool,
    ) {
        let Some((bar_y, bar_height)) =
            scroll_bar_extent(top, bottom, shown_size, total_size, position)
        else {
            return;
        };
        let x = self.width().saturating_sub(1);
        if draw_bg {
            self.draw_rect(x, top, 1, bottom - top, DEFAULT_THEME.scroll_bg);
        }
        self.draw_rect(x, bar_y, 1, bar_height, color);
    }
}

/// Top line and length of a scroll bar, or `None` when there is no room
pub fn scroll_bar_extent(
    top: u32,
    bottom: u32,
    shown_size: u32,
    total_size: u32,
    position: u32,
) -> Option<(u32, u32)> {
    let height = bottom.checked_sub(top).filter(|&h| h > 0)?;
    if total_size == 0 {
        return None;
    }
    let total = total_size as u64;
    let scale = |value: u32| (value.min(total_size) as u64 * height as u64 / total) as u32;

    let bar_height = scale(shown_size).clamp(1, height);
    let offset = scale(position).min(height - bar_height);
    Some((top + offset, bar_height))
}

/// Scroll `view` (the first visible row) so that the row holding `select`
/// is one of the `num_rows` visible rows of `step` bytes each.
///
/// The result is aligned to `step` and satisfies
/// `view <= floor(select) <= view + (num_rows - 1) * step`.
pub fn clamp_view_to_selection(view: u32, select: u32, num_rows: u32, step: u32) -> u32 {
    let size = step.saturating_mul(num_rows.saturating_sub(1));
    let select_row = select - (select % step);
    let lowest = select_row.saturating_sub(size);
    let view_row = view - (view % step);
    view_row.clamp(lowest, select_row)
}

/// Uppercase hex digit for the low nibble of `value`
pub fn hex_digit(value: u8) -> char {
    HEX_DIGITS[(value & 0xF) as usize] as char
}

/// Quadrant block glyph showing the 4 low bits of `nibble`, most
/// significant bit in the top-left and least significant in the
/// bottom-right.
pub fn nibble_bits_glyph(nibble: u8) -> char {
    const QUADRANTS: [char; 16] = [
        ' ', '▗', '▖', '▄', '▝', '▐', '▞', '▟', '▘', '▚', '▌', '▙', '▀', '▜', '▛', '█',
    ];
    QUADRANTS[(nibble & 0xF) as usize]
}

/// `symbol+0xOFFSET` for `addr`, if the symbol table knows it
pub fn format_location(symbols: Option<&SymbolTable>, addr: Address) -> Option<String> {
    let sym = symbols?.get_map_symbol(addr)?;
    Some(format!("{}+0x{:X}", sym.name, addr - sym.addr))
}

/// Print where `addr` is: its symbol and offset, colored by whether the
/// symbol is code or data. Prints `UNKNOWN` for unnamed addresses.
pub fn print_addr_location_info(
    surface: &mut dyn Surface,
    x: u32,
    y: u32,
    max_chars: u32,
    symbols: Option<&SymbolTable>,
    addr: Address,
) {
    let sym = symbols.and_then(|table| table.get_map_symbol(addr));
    let (text, color) = match sym {
        Some(sym) => {
            let color = match sym.kind {
                SymbolKind::Code => DEFAULT_THEME.function_name,
                SymbolKind::Data => DEFAULT_THEME.variable,
            };
            (format!("{}+0x{:X}", sym.name, addr - sym.addr), color)
        }
        None => ("UNKNOWN".to_string(), DEFAULT_THEME.comment),
    };
    let clipped: String = text.chars().take(max_chars as usize).collect();
    surface.print(x, y, &clipped, color);
}
