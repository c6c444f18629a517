pub mod config;
pub mod editor;
pub mod events;
pub mod grid;
pub mod render;
pub mod rule_set;
pub mod sim;
pub mod ticker;

/// A pixel coordinate or length on the canvas
pub type PixelIndex = u32;

/// A grid row or column index
pub type CellIndex = usize;
