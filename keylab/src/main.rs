//! pklab, a terminal bench for the padkey widget.
//!
//! Runs the same frame loop a handheld would: poll input, advance the
//! keyboard, apply its paint batch to a retained surface, draw. Useful
//! for trying layouts and repeat pacing without flashing a device.

pub mod board;
pub mod helpers;
pub mod keypad;
pub mod surface;

use std::{fs::{self, File}, path::PathBuf, sync::Mutex, thread::sleep, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use padkey_core::{DEFAULT_KEYS, KeyGrid};
use ratatui::{DefaultTerminal, Frame, crossterm::event::Event, layout::Rect};
use tracing::{Level, info};

use crate::{board::Board, helpers::poll_events};

pub trait Component {
    fn update(&mut self, events: Vec<Event>);
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

pub enum GlobalEvent {
    Quit,
}

#[derive(Parser)]
#[command(name = "pklab")]
#[command(version, about = "Terminal bench for the padkey grid keyboard", long_about = None)]
struct Args {
    /// Layout file, one row of keys per line (defaults to the stock 21x5 layout)
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Append logs to this file (the alternate screen eats stderr)
    #[arg(long)]
    log: Option<PathBuf>,
}

pub struct Lab {
    terminal: DefaultTerminal,
    board: Board,
    rx: crossbeam_channel::Receiver<GlobalEvent>,
}

impl Lab {
    fn tick(&mut self) -> Result<bool> {
        let _ = self.terminal.draw(|f| {
            let events = poll_events();
            self.board.update(events);
            self.board.render(f, f.area());
        });

        for event in self.rx.try_iter() {
            match event {
                GlobalEvent::Quit => return Ok(false),
            }
        }

        Ok(true)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .compact()
            .init();
    }

    // Validate the layout before the terminal enters the alternate screen,
    // so a bad file prints a plain error instead of garbage.
    let rows = load_layout(args.layout)?;
    let grid = KeyGrid::new(rows)?;
    info!("layout is {}x{}", grid.width(), grid.height());

    let terminal = ratatui::init();
    let result = run(terminal, grid);
    ratatui::restore();
    result
}

/// Rows for the session's layout. Leaked once at startup so the grid
/// stays a plain borrow.
fn load_layout(path: Option<PathBuf>) -> Result<&'static [&'static str]> {
    let Some(path) = path else {
        return Ok(&DEFAULT_KEYS);
    };

    let text = fs::read_to_string(&path)
        .with_context(|| format!("reading layout {}", path.display()))?;
    let rows: Vec<&'static str> = text
        .lines()
        .map(|line| -> &'static str { line.to_owned().leak() })
        .collect();
    Ok(rows.leak())
}

fn run(terminal: DefaultTerminal, grid: KeyGrid<'static>) -> Result<()> {
    let (tx, rx) = crossbeam_channel::unbounded();

    let mut lab = Lab {
        terminal,
        board: Board::init(grid, tx),
        rx,
    };

    // Drain any pending terminal input (for example a newline from launching
    // via a shell) so the first update() call doesn't see stale key events.
    let _ = poll_events();

    loop {
        sleep(Duration::from_millis(16));
        if !lab.tick()? {
            return Ok(());
        }
    }
}
