use super::draw::Rgba32;

pub struct Theme {
    pub background: Rgba32,
    pub text: Rgba32,
    pub comment: Rgba32,     // Grey
    pub primary: Rgba32,     // Blue
    pub secondary: Rgba32,   // Orange
    pub error: Rgba32,       // Red
    pub header_bg: Rgba32,
    pub header_text: Rgba32,
    pub highlight_bg: Rgba32, // Selected list rows
    pub popup_bg: Rgba32,
    pub divider: Rgba32,
    pub memory_row1: Rgba32,
    pub memory_row2: Rgba32,
    pub memory_col1: Rgba32,
    pub memory_col2: Rgba32,
    pub memory_data1: Rgba32,
    pub memory_data2: Rgba32,
    pub memory_select: Rgba32,
    pub memory_pc: Rgba32,
    pub out_of_bounds: Rgba32,
    pub bit_set: Rgba32,
    pub bit_clear: Rgba32,
    pub scroll_bar: Rgba32,
    pub scroll_bg: Rgba32,
    pub crash_at: Rgba32,      // Crash PC marker
    pub function_name: Rgba32, // Yellow for code symbols
    pub variable: Rgba32,      // Cyan for data symbols
}

pub const DEFAULT_THEME: Theme = Theme {
    background: Rgba32::rgb(30, 30, 46),
    text: Rgba32::rgb(205, 214, 244),
    comment: Rgba32::rgb(108, 112, 134),
    primary: Rgba32::rgb(137, 180, 250),
    secondary: Rgba32::rgb(250, 179, 135),
    error: Rgba32::rgb(243, 139, 168),
    header_bg: Rgba32::rgb(137, 180, 250),
    header_text: Rgba32::rgb(17, 17, 27),
    highlight_bg: Rgba32::rgb(50, 50, 70), // Slightly lighter BG for the selected row
    popup_bg: Rgba32::rgb(49, 50, 68),
    divider: Rgba32::rgb(108, 112, 134),
    memory_row1: Rgba32::rgb(137, 180, 250),
    memory_row2: Rgba32::rgb(116, 153, 214),
    memory_col1: Rgba32::rgb(250, 179, 135),
    memory_col2: Rgba32::rgb(214, 152, 115),
    memory_data1: Rgba32::rgb(205, 214, 244),
    memory_data2: Rgba32::rgb(166, 173, 200),
    memory_select: Rgba32::rgb(249, 226, 175),
    memory_pc: Rgba32::rgb(243, 139, 168),
    out_of_bounds: Rgba32::rgb(243, 139, 168),
    bit_set: Rgba32::rgb(186, 194, 222),
    bit_clear: Rgba32::rgb(69, 71, 90),
    scroll_bar: Rgba32::rgb(205, 214, 244),
    scroll_bg: Rgba32::rgb(69, 71, 90),
    crash_at: Rgba32::rgb(243, 139, 168),
    function_name: Rgba32::rgb(249, 226, 175),
    variable: Rgba32::rgb(148, 226, 213),
};
