use tracing::debug;

use crate::CellIndex;
use crate::PixelIndex;
use crate::events::PointerButton;
use crate::events::PointerEvent;
use crate::sim::Simulation;

/// Map a pointer position in canvas pixels to the grid cell under it.
///
/// Pure floor division; no clamping is performed here. Positions past the
/// grid produce out-of-range cells that [`Simulation::edit_cell`] rejects.
/// `cell_size` must be positive (guaranteed by a validated configuration).
pub fn pointer_to_cell(
    x: PixelIndex,
    y: PixelIndex,
    cell_size: PixelIndex,
) -> (CellIndex, CellIndex) {
    ((y / cell_size) as CellIndex, (x / cell_size) as CellIndex)
}

/// The two pens of the edit surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pen {
    Paint,
    Erase,
}

impl Pen {
    fn from_button(button: PointerButton) -> Self {
        match button {
            PointerButton::Primary => Pen::Paint,
            PointerButton::Secondary => Pen::Erase,
        }
    }

    fn alive(self) -> bool {
        matches!(self, Pen::Paint)
    }
}

/// Translates pointer events into cell edits.
///
/// Pointer-down arms one pen (primary paints, secondary erases); every cell
/// visited while it is armed gets the pen applied; pointer-up of the arming
/// button, or the pointer leaving the surface, disarms it. At most one pen is
/// armed at a time.
#[derive(Default)]
pub struct Editor {
    pen: Option<Pen>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: PointerEvent, sim: &Simulation) {
        match event {
            PointerEvent::Down { button, x, y } => {
                let pen = Pen::from_button(button);
                self.pen = Some(pen);
                self.apply(pen, x, y, sim);
            }
            PointerEvent::Move { x, y } => {
                if let Some(pen) = self.pen {
                    self.apply(pen, x, y, sim);
                }
            }
            PointerEvent::Up { button } => {
                if self.pen == Some(Pen::from_button(button)) {
                    self.pen = None;
                }
            }
            PointerEvent::Leave => {
                self.pen = None;
            }
        }
    }

    fn apply(&self, pen: Pen, x: PixelIndex, y: PixelIndex, sim: &Simulation) {
        let (row, col) = pointer_to_cell(x, y, sim.config().cell_size_px());

        // pointer positions past the grid edge are discarded, not clamped
        if let Err(err) = sim.edit_cell(row, col, pen.alive()) {
            debug!("edit discarded: {err}");
        }
    }
}
