use std::time::Duration;

use thiserror::Error;

use crate::CellIndex;
use crate::PixelIndex;
use crate::grid::MIN_SIDE;

/// Cell sizes at or below this many pixels never draw the gridline overlay,
/// regardless of the visibility flag.
pub const GRIDLINE_MIN_CELL_SIZE: PixelIndex = 9;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Cell size must be positive")]
    ZeroCellSize,

    #[error("Tick interval must be positive")]
    ZeroTickInterval,

    #[error(
        "Cell size of {cell_size}px derives a {height}x{width} grid, \
         below the minimum of {MIN_SIDE}x{MIN_SIDE}"
    )]
    GridTooCoarse {
        cell_size: PixelIndex,
        height: CellIndex,
        width: CellIndex,
    },
}

/// Canvas and playback configuration of one simulation instance.
///
/// Grid dimensions are always derived from the canvas: `floor(H / S)` rows by
/// `floor(W / S)` columns for a canvas of `H x W` pixels and cells of `S`
/// pixels a side. The canvas size is fixed at creation; cell size and tick
/// interval can be changed later through the [`Simulation`] commands.
///
/// [`Simulation`]: crate::sim::Simulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasConfig {
    canvas_height_px: PixelIndex,
    canvas_width_px: PixelIndex,
    cell_size_px: PixelIndex,
    tick_interval: Duration,
    grid_visible: bool,
}

impl CanvasConfig {
    pub fn new(
        canvas_height_px: PixelIndex,
        canvas_width_px: PixelIndex,
        cell_size_px: PixelIndex,
        tick_interval: Duration,
    ) -> Result<Self, ConfigError> {
        if tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }

        let config = Self {
            canvas_height_px,
            canvas_width_px,
            cell_size_px: 1,
            tick_interval,
            grid_visible: false,
        };

        config.with_cell_size(cell_size_px)
    }

    /// Same configuration with a new cell size.
    ///
    /// Rejects sizes that are zero or too coarse for the seed pattern to fit
    /// in the derived grid, leaving `self` untouched either way.
    pub fn with_cell_size(mut self, cell_size_px: PixelIndex) -> Result<Self, ConfigError> {
        if cell_size_px == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        let height = (self.canvas_height_px / cell_size_px) as CellIndex;
        let width = (self.canvas_width_px / cell_size_px) as CellIndex;

        if height < MIN_SIDE || width < MIN_SIDE {
            return Err(ConfigError::GridTooCoarse {
                cell_size: cell_size_px,
                height,
                width,
            });
        }

        self.cell_size_px = cell_size_px;

        Ok(self)
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Result<Self, ConfigError> {
        if tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }

        self.tick_interval = tick_interval;

        Ok(self)
    }

    pub fn toggle_grid_visible(&mut self) {
        self.grid_visible = !self.grid_visible;
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    pub fn canvas_height_px(&self) -> PixelIndex {
        self.canvas_height_px
    }

    pub fn canvas_width_px(&self) -> PixelIndex {
        self.canvas_width_px
    }

    pub fn cell_size_px(&self) -> PixelIndex {
        self.cell_size_px
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Derived grid dimensions, `(rows, cols)`
    pub fn grid_dims(&self) -> (CellIndex, CellIndex) {
        (
            (self.canvas_height_px / self.cell_size_px) as CellIndex,
            (self.canvas_width_px / self.cell_size_px) as CellIndex,
        )
    }

    /// Whether the renderer should draw the gridline overlay.
    ///
    /// The visibility flag is a rendering concern only; fine cell sizes
    /// suppress the overlay to avoid visual clutter.
    pub fn gridlines_drawn(&self) -> bool {
        self.grid_visible && self.cell_size_px > GRIDLINE_MIN_CELL_SIZE
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::CanvasConfig;
    use super::ConfigError;

    fn config() -> CanvasConfig {
        CanvasConfig::new(600, 800, 20, Duration::from_millis(1000)).unwrap()
    }

    #[test]
    fn grid_dims_are_floored() {
        let config = config();

        assert_eq!(config.grid_dims(), (30, 40));

        let config = config.with_cell_size(7).unwrap();

        // 600 / 7 = 85.71.., 800 / 7 = 114.28..
        assert_eq!(config.grid_dims(), (85, 114));
    }

    #[test]
    fn zero_cell_size_is_rejected() {
        assert_eq!(
            config().with_cell_size(0),
            Err(ConfigError::ZeroCellSize)
        );
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        assert_eq!(
            config().with_tick_interval(Duration::ZERO),
            Err(ConfigError::ZeroTickInterval)
        );
    }

    #[test]
    fn too_coarse_cell_size_is_rejected() {
        // 600 / 200 = 3 rows, below the 4x4 minimum
        let res = config().with_cell_size(200);

        assert!(matches!(res, Err(ConfigError::GridTooCoarse { .. })));
    }

    #[test]
    fn gridlines_suppressed_for_fine_cells() {
        let mut config = config();

        assert!(!config.gridlines_drawn());

        config.toggle_grid_visible();
        assert!(config.gridlines_drawn());

        let mut config = config.with_cell_size(9).unwrap();
        assert!(!config.gridlines_drawn());

        config.toggle_grid_visible();
        assert!(!config.gridlines_drawn());
    }
}
