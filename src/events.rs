use std::time::Duration;

use crate::PixelIndex;

pub enum Event {
    Command(Command),
    Pointer(PointerEvent),
}

/// Playback and configuration commands exposed to controllers
pub enum Command {
    Start,
    Stop,
    Reset,
    SetCellSize(PixelIndex),
    SetTickInterval(Duration),
    ToggleGridOverlay,

    /// Exit the application
    Quit,
}

/// Pointer events consumed by the edit surface, in canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down {
        button: PointerButton,
        x: PixelIndex,
        y: PixelIndex,
    },
    Move {
        x: PixelIndex,
        y: PixelIndex,
    },
    Up {
        button: PointerButton,
    },

    /// The pointer left the drawable surface
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Paints live cells
    Primary,

    /// Erases cells
    Secondary,
}
