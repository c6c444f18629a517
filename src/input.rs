use std::time::Duration;

use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use gridlife::PixelIndex;
use gridlife::events::Command;
use gridlife::events::Event;
use gridlife::events::PointerButton;
use gridlife::events::PointerEvent;
use gridlife::sim::Simulation;

/// Canvas pixels per terminal column (braille dot density)
pub const PX_PER_COL: PixelIndex = 2;

/// Canvas pixels per terminal row (braille dot density)
pub const PX_PER_ROW: PixelIndex = 4;

/// How much one keypress changes the tick interval
const TICK_STEP: Duration = Duration::from_millis(50);

/// Converts a crossterm event into a gridlife event.
///
/// Mouse positions arrive in terminal character cells and are mapped to the
/// top-left canvas pixel of that cell. The current simulation state supplies
/// the base values for the relative cell-size and speed keybinds.
pub fn convert_event(event: CrossTermEvent, sim: &Simulation) -> Option<Event> {
    match event {
        CrossTermEvent::Key(key_event) => convert_key(key_event, sim).map(Event::Command),
        CrossTermEvent::Mouse(mouse_event) => convert_mouse(mouse_event).map(Event::Pointer),

        // losing focus is the closest analogue of the pointer leaving the canvas
        CrossTermEvent::FocusLost => Some(Event::Pointer(PointerEvent::Leave)),

        _ => None,
    }
}

fn convert_key(key_event: KeyEvent, sim: &Simulation) -> Option<Command> {
    let cell_size = sim.config().cell_size_px();
    let tick = sim.config().tick_interval();

    match key_event {
        KeyEvent {
            code: KeyCode::Char('q'),
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Command::Quit),

        KeyEvent {
            code: KeyCode::Char(c),
            ..
        } => match c {
            ' ' => Some(if sim.running() {
                Command::Stop
            } else {
                Command::Start
            }),
            'r' => Some(Command::Reset),
            'g' => Some(Command::ToggleGridOverlay),

            // invalid results (a zero size, a zero interval) are rejected
            // downstream with the prior value kept
            '+' | '=' => Some(Command::SetCellSize(cell_size + 1)),
            '-' => Some(Command::SetCellSize(cell_size.saturating_sub(1))),
            ']' => Some(Command::SetTickInterval(tick + TICK_STEP)),
            '[' => Some(Command::SetTickInterval(tick.saturating_sub(TICK_STEP))),

            _ => None,
        },

        _ => None,
    }
}

fn convert_mouse(mouse_event: MouseEvent) -> Option<PointerEvent> {
    let x = mouse_event.column as PixelIndex * PX_PER_COL;
    let y = mouse_event.row as PixelIndex * PX_PER_ROW;

    match mouse_event.kind {
        MouseEventKind::Down(button) => Some(PointerEvent::Down {
            button: convert_button(button)?,
            x,
            y,
        }),
        MouseEventKind::Drag(_) | MouseEventKind::Moved => Some(PointerEvent::Move { x, y }),
        MouseEventKind::Up(button) => Some(PointerEvent::Up {
            button: convert_button(button)?,
        }),
        _ => None,
    }
}

fn convert_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => None,
    }
}
