// End-to-end crash screen behavior, driven through controller snapshots

use crashview::memory::context::ThreadContext;
use crashview::memory::symbols::SymbolTable;
use crashview::memory::{AddressSpace, VIRTUAL_RAM_START};
use crashview::pages::memory::{DisplayMode, MemoryPage, PAGE_MEMORY_STEP};
use crashview::screen::canvas::CellCanvas;
use crashview::screen::controls::{Buttons, ControllerInput};
use crashview::screen::draw::{CRASH_SCREEN_NUM_CHARS_X, CRASH_SCREEN_NUM_CHARS_Y};
use crashview::screen::page::{Page, PageId};
use crashview::screen::popup::Popup;
use crashview::screen::settings::{SettingId, SettingsStore};
use crashview::screen::{CrashScreen, InspectState};
use test_log::test;

const RAM_SIZE: usize = 0x4000;

const SYMBOL_MAP: &str = "
# addr     size  kind name
80000400   0x80  T    crash_handler
80001000   0x10  D    gCrashPtr
";

fn screen_with(settings: SettingsStore) -> CrashScreen {
    let mut ram = vec![0u8; RAM_SIZE];
    // gCrashPtr points back into crash_handler
    ram[0x1000..0x1004].copy_from_slice(&[0x80, 0x00, 0x04, 0x20]);
    let memory = AddressSpace::new(ram).unwrap();
    let thread = ThreadContext {
        pc: 0x8000_0410,
        cause: 0x10,
        ..Default::default()
    };
    let symbols = SymbolTable::parse(SYMBOL_MAP).unwrap();
    CrashScreen::new(InspectState::new(memory, Some(symbols), thread, settings))
}

fn screen() -> CrashScreen {
    screen_with(SettingsStore::new())
}

fn press(screen: &mut CrashScreen, input: ControllerInput) {
    screen.update(&input);
}

fn viewport(screen: &CrashScreen) -> u32 {
    match &screen.page(PageId::Memory).page {
        Page::Memory(page) => page.viewport(),
        other => panic!("memory slot holds {:?}", other),
    }
}

fn draw(screen: &mut CrashScreen) -> CellCanvas {
    let mut canvas = CellCanvas::new(CRASH_SCREEN_NUM_CHARS_X, CRASH_SCREEN_NUM_CHARS_Y);
    screen.draw(&mut canvas);
    canvas
}

#[test]
fn test_starts_on_memory_page_at_pc() {
    let mut screen = screen();
    assert_eq!(screen.active_page(), PageId::Memory);
    assert_eq!(screen.state.selected_address, 0x8000_0410);
    assert!(screen.page(PageId::Memory).flags.initialized);
    assert!(!screen.page(PageId::Context).flags.initialized);

    let canvas = draw(&mut screen);
    assert!(canvas.find_text("crash_handler+0x10").is_some());
}

#[test]
fn test_up_at_ram_start_is_a_no_op() {
    let mut screen = screen();
    screen.select_address(VIRTUAL_RAM_START);

    press(&mut screen, ControllerInput::up());
    assert_eq!(screen.state.selected_address, VIRTUAL_RAM_START);

    press(&mut screen, ControllerInput::down());
    assert_eq!(
        screen.state.selected_address,
        VIRTUAL_RAM_START + PAGE_MEMORY_STEP
    );
}

#[test]
fn test_horizontal_moves_never_cross_rows() {
    let mut screen = screen();
    screen.select_address(0x8000_0200);
    for _ in 0..40 {
        press(&mut screen, ControllerInput::right());
        assert_eq!(screen.state.selected_address & !0xF, 0x8000_0200);
    }
    assert_eq!(screen.state.selected_address, 0x8000_020F);
    for _ in 0..40 {
        press(&mut screen, ControllerInput::left());
        assert_eq!(screen.state.selected_address & !0xF, 0x8000_0200);
    }
    assert_eq!(screen.state.selected_address, 0x8000_0200);
}

#[test]
fn test_viewport_tracks_cursor_through_any_input() {
    let mut screen = screen();
    let moves = [
        ControllerInput::down(),
        ControllerInput::right(),
        ControllerInput::up(),
        ControllerInput::left(),
    ];
    // A deterministic walk mixing long runs of each direction
    for step in 0..600u32 {
        let input = moves[((step / 37) + step % 3) as usize % moves.len()];
        press(&mut screen, input);

        let rows = MemoryPage::num_shown_rows(&screen.state);
        let view = viewport(&screen);
        let row = screen.state.selected_address & !0xF;
        assert!(
            view <= row && row <= view + (rows - 1) * PAGE_MEMORY_STEP,
            "view {:08X} row {:08X}",
            view,
            row
        );
        assert!(screen.state.memory.is_valid_ram_addr(screen.state.selected_address));
    }
}

#[test]
fn test_display_mode_wraps_back_to_hex() {
    let mut screen = screen();
    let b = ControllerInput::buttons(Buttons::B);
    for _ in 0..4 {
        press(&mut screen, b);
    }
    assert_eq!(MemoryPage::display_mode(&screen.state), DisplayMode::Rgba32);
    press(&mut screen, b);
    assert_eq!(MemoryPage::display_mode(&screen.state), DisplayMode::Hex);
}

#[test]
fn test_a_on_pointer_jumps_through_popup() {
    let mut screen = screen();
    screen.select_address(0x8000_1002);

    press(&mut screen, ControllerInput::buttons(Buttons::A));
    assert!(matches!(screen.state.popup, Some(Popup::Address(_))));
    let canvas = draw(&mut screen);
    assert!(canvas.find_text("GO TO ADDRESS:").is_some());
    assert!(canvas.find_text("crash_handler+0x20").is_some());

    // The popup swallows movement
    press(&mut screen, ControllerInput::down());
    press(&mut screen, ControllerInput::up());
    assert_eq!(screen.state.selected_address, 0x8000_1002);

    press(&mut screen, ControllerInput::buttons(Buttons::A));
    assert_eq!(screen.state.popup, None);
    assert_eq!(screen.state.selected_address, 0x8000_0420);
    assert_eq!(viewport(&screen) & !0xF, viewport(&screen));
    assert!(viewport(&screen) <= 0x8000_0420);
}

#[test]
fn test_popup_cancel_keeps_cursor() {
    let mut screen = screen();
    screen.select_address(0x8000_0100);
    press(&mut screen, ControllerInput::buttons(Buttons::A));
    press(&mut screen, ControllerInput::up());
    press(&mut screen, ControllerInput::buttons(Buttons::B));
    assert_eq!(screen.state.popup, None);
    assert_eq!(screen.state.selected_address, 0x8000_0100);
}

#[test]
fn test_page_switching_wraps() {
    let mut screen = screen();
    let l = ControllerInput::buttons(Buttons::L);
    let r = ControllerInput::buttons(Buttons::R);

    press(&mut screen, l);
    assert_eq!(screen.active_page(), PageId::Context);
    assert!(screen.page(PageId::Context).flags.initialized);
    press(&mut screen, l);
    assert_eq!(screen.active_page(), PageId::Settings);
    press(&mut screen, r);
    assert_eq!(screen.active_page(), PageId::Context);

    let canvas = draw(&mut screen);
    assert!(canvas.row_text(0).contains("CONTEXT"));
    assert!(canvas.find_text("Address error on load or inst.").is_some());
}

#[test]
fn test_page_switching_without_wrap() {
    let mut settings = SettingsStore::new();
    settings
        .apply_toml("[global]\nwrap_pages = false\n")
        .unwrap();
    let mut screen = screen_with(settings);

    press(&mut screen, ControllerInput::buttons(Buttons::R));
    assert_eq!(screen.active_page(), PageId::Settings);
    press(&mut screen, ControllerInput::buttons(Buttons::R));
    assert_eq!(screen.active_page(), PageId::Settings);
}

#[test]
fn test_settings_page_changes_memory_view() {
    let mut screen = screen();
    screen.set_page(PageId::Settings);

    // Down to "Show current address range", then flip it
    for _ in 0..4 {
        press(&mut screen, ControllerInput::down());
    }
    press(&mut screen, ControllerInput::right());
    assert!(!screen.state.settings.get_bool(SettingId::MemoryShowRange));

    screen.set_page(PageId::Memory);
    let canvas = draw(&mut screen);
    assert!(canvas.find_text(" in 8000").is_none());
}

#[test]
fn test_config_file_applies_display_mode() {
    let mut settings = SettingsStore::new();
    settings
        .apply_toml("[memory]\ndisplay_mode = \"ascii\"\nshow_symbol = false\n")
        .unwrap();
    let screen = screen_with(settings);
    assert_eq!(MemoryPage::display_mode(&screen.state), DisplayMode::Ascii);
    assert_eq!(MemoryPage::num_shown_rows(&screen.state), 21);
}

#[test]
fn test_print_memory_page() {
    let mut screen = screen();
    screen.select_address(0x8000_1000);
    let mut out = Vec::new();
    screen.print(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("- 80001000: 80000420 00000000 00000000 00000000"));
}

fn assert_cursor_in_view(screen: &CrashScreen) {
    let rows = MemoryPage::num_shown_rows(&screen.state);
    let view = viewport(screen);
    let row = screen.state.selected_address & !0xF;
    assert!(
        view <= row && row <= view + (rows - 1) * PAGE_MEMORY_STEP,
        "view {:08X} row {:08X} rows {}",
        view,
        row,
        rows
    );
}

#[test]
fn test_jump_from_context_page_moves_memory_view() {
    let mut screen = screen();
    let before = viewport(&screen);

    press(&mut screen, ControllerInput::buttons(Buttons::L));
    assert_eq!(screen.active_page(), PageId::Context);
    press(&mut screen, ControllerInput::buttons(Buttons::A));
    press(&mut screen, ControllerInput::right());
    press(&mut screen, ControllerInput::right());
    press(&mut screen, ControllerInput::up());
    press(&mut screen, ControllerInput::buttons(Buttons::A));
    assert_eq!(screen.state.popup, None);
    assert_ne!(screen.state.selected_address & !0xF, before);

    press(&mut screen, ControllerInput::buttons(Buttons::R));
    assert_eq!(screen.active_page(), PageId::Memory);
    assert_cursor_in_view(&screen);

    let canvas = draw(&mut screen);
    let row = format!("{:08X}│", screen.state.selected_address & !0xF);
    assert!(canvas.find_text(&row).is_some());
}

#[test]
fn test_range_line_toggle_keeps_cursor_in_view() {
    let mut screen = screen();

    // Range line off, cursor on the last row of the taller view
    screen.set_page(PageId::Settings);
    for _ in 0..4 {
        press(&mut screen, ControllerInput::down());
    }
    press(&mut screen, ControllerInput::right());
    assert!(!screen.state.settings.get_bool(SettingId::MemoryShowRange));
    screen.set_page(PageId::Memory);
    let rows = MemoryPage::num_shown_rows(&screen.state);
    let last_row = viewport(&screen) + (rows - 1) * PAGE_MEMORY_STEP;
    screen.select_address(last_row);
    assert_cursor_in_view(&screen);

    // Turning it back on takes a row away
    screen.set_page(PageId::Settings);
    press(&mut screen, ControllerInput::right());
    assert!(screen.state.settings.get_bool(SettingId::MemoryShowRange));
    screen.set_page(PageId::Memory);
    assert_cursor_in_view(&screen);

    let canvas = draw(&mut screen);
    assert!(canvas.find_text(&format!("{:08X}│", last_row)).is_some());
}
