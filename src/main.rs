// crashview: crash-screen memory inspector for N64 RDRAM dumps

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crashview::memory::context::ThreadContext;
use crashview::memory::symbols::SymbolTable;
use crashview::memory::AddressSpace;
use crashview::screen::settings::SettingsStore;
use crashview::screen::{CrashScreen, InspectState};
use crashview::ui::App;

#[derive(Parser, Debug)]
#[command(
    name = "crashview",
    version,
    about = "Browse an N64 RDRAM dump through the crash screen pages"
)]
struct Args {
    /// Raw RDRAM image, physical address 0 first
    #[arg(value_name = "RAM_DUMP")]
    ram_dump: PathBuf,

    /// Register context of the crashed thread (TOML)
    #[arg(long, value_name = "PATH")]
    context: Option<PathBuf>,

    /// Symbol map, one `ADDR SIZE KIND NAME` per line
    #[arg(long, value_name = "PATH")]
    map: Option<PathBuf>,

    /// Crash screen settings overrides (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Address or symbol to select on startup
    #[arg(long, value_name = "ADDR|SYMBOL")]
    goto: Option<String>,

    /// Write log output (filtered by RUST_LOG) to this file. Without it only
    /// load warnings are logged, to stderr, before the screen takes over.
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
}

/// Log file target; stderr belongs to the alternate screen while it is up
fn log_target(path: &Path) -> io::Result<env_logger::Target> {
    let file = File::create(path)?;
    Ok(env_logger::Target::Pipe(Box::new(file)))
}

fn init_logging(args: &Args) -> io::Result<()> {
    match &args.log {
        Some(path) => {
            env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or("debug"),
            )
            .target(log_target(path)?)
            .init();
        }
        None => {
            env_logger::Builder::new()
                .filter_level(log::LevelFilter::Warn)
                .init();
        }
    }
    Ok(())
}

fn load_state(args: &Args) -> Result<InspectState, Box<dyn std::error::Error>> {
    let memory = AddressSpace::load(&args.ram_dump)?;

    let thread = match &args.context {
        Some(path) => ThreadContext::load(path)?,
        None => {
            log::warn!("no thread context given, registers will read as zero");
            ThreadContext::default()
        }
    };

    let symbols = args.map.as_deref().map(SymbolTable::load).transpose()?;

    let mut settings = SettingsStore::new();
    if let Some(path) = &args.config {
        settings.load(path)?;
    }

    let mut state = InspectState::new(memory, symbols, thread, settings);
    if let Some(target) = &args.goto {
        state.selected_address = state.resolve_target(target)?;
    }
    Ok(state)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let state = match load_state(&args) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    eprintln!(
        "Loaded {} bytes of RAM, starting at {:08X}",
        state.memory.ram_size(),
        state.selected_address
    );

    // stderr would draw over the alternate screen
    if args.log.is_none() {
        log::set_max_level(log::LevelFilter::Off);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(CrashScreen::new(state));
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    // Printed pages go to stdout once the terminal is ours again
    io::stdout().write_all(&app.print_buffer)?;

    Ok(())
}
