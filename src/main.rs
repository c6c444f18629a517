use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use gridlife::PixelIndex;
use gridlife::config::CanvasConfig;
use gridlife::editor::Editor;
use gridlife::events::Command;
use gridlife::events::Event;
use gridlife::render::rasterize;
use gridlife::rule_set::B3S23;
use gridlife::sim::Simulation;

mod input;

const DEFAULT_CELL_SIZE: PixelIndex = 8;
const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let (cols, rows) = terminal::size().context("Failed to query the terminal size")?;

    // the bottom row holds the status line, the rest is canvas
    let canvas_w = cols as PixelIndex * input::PX_PER_COL;
    let canvas_h = rows.saturating_sub(1) as PixelIndex * input::PX_PER_ROW;

    let config = CanvasConfig::new(canvas_h, canvas_w, DEFAULT_CELL_SIZE, DEFAULT_TICK_INTERVAL)
        .context("Terminal is too small for the default cell size")?;
    let mut sim = Simulation::new(config, B3S23)?;
    let mut editor = Editor::new();

    let mut stdout = std::io::stdout();

    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        event::EnableMouseCapture,
        cursor::Hide
    )?;

    let res = run(&mut stdout, &mut sim, &mut editor);

    execute!(
        stdout,
        cursor::Show,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;

    res
}

fn run(
    stdout: &mut std::io::Stdout,
    sim: &mut Simulation,
    editor: &mut Editor,
) -> anyhow::Result<()> {
    'main: loop {
        draw(stdout, sim)?;

        while event::poll(Duration::ZERO)? {
            let Some(event) = input::convert_event(event::read()?, sim) else {
                continue;
            };

            match event {
                Event::Command(Command::Quit) => break 'main,
                Event::Command(command) => apply_command(sim, command),
                Event::Pointer(pointer) => editor.handle(pointer, sim),
            }
        }

        std::thread::sleep(Duration::new(0, 1_000_000_000u32 / 60));
    }

    Ok(())
}

fn draw(stdout: &mut std::io::Stdout, sim: &Simulation) -> anyhow::Result<()> {
    let frame = rasterize(&sim.snapshot(), sim.config());

    queue!(stdout, cursor::MoveTo(0, 0))?;

    for line in frame.to_braille().lines() {
        queue!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
    }

    let config = sim.config();
    let status = format!(
        "{} gen {} | cell {}px | tick {}ms | grid {} | space run, r reset, g grid, +/- cell, [/] speed, q quit",
        if sim.running() { "|>" } else { "||" },
        sim.generation(),
        config.cell_size_px(),
        config.tick_interval().as_millis(),
        if config.grid_visible() { "on" } else { "off" },
    );

    queue!(
        stdout,
        style::Print(status),
        terminal::Clear(terminal::ClearType::UntilNewLine)
    )?;

    stdout.flush()?;

    Ok(())
}

fn apply_command(sim: &mut Simulation, command: Command) {
    let res = match command {
        Command::Start => {
            sim.start();
            Ok(())
        }
        Command::Stop => {
            sim.stop();
            Ok(())
        }
        Command::Reset => sim.reset(),
        Command::SetCellSize(n) => sim.set_cell_size(n),
        Command::SetTickInterval(interval) => sim.set_tick_interval(interval),
        Command::ToggleGridOverlay => {
            sim.toggle_grid_overlay();
            Ok(())
        }
        Command::Quit => Ok(()),
    };

    if let Err(err) = res {
        warn!("Command rejected: {err}");
    }
}
