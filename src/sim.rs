use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::CellIndex;
use crate::PixelIndex;
use crate::config::CanvasConfig;
use crate::config::ConfigError;
use crate::grid::Grid;
use crate::grid::GridError;
use crate::rule_set::RuleSet;
use crate::ticker::Ticker;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// State shared between the simulation handle and its ticker thread.
///
/// The grid mutex is held only to snapshot a generation or swap the next one
/// in, never across a step computation. `epoch` is bumped whenever the grid
/// is replaced out-of-band (reset, cell size change) so an in-flight step
/// computed against the old grid discards its result instead of applying it.
struct Shared {
    grid: Mutex<Grid>,
    epoch: AtomicU64,
    generation: AtomicU64,
    /// Interval in nanoseconds; a validated `Duration` round-trips exactly,
    /// a coarser unit would truncate sub-millisecond intervals to a zero wait
    tick_interval_ns: AtomicU64,
}

/// One self-contained simulation instance: grid, rules, configuration, and
/// run state. Nothing lives at process scope; independent instances do not
/// observe each other.
///
/// The instance is Stopped or Running. [`start`] spawns exactly one
/// [`Ticker`]; while it exists, each tick snapshots the grid, computes the
/// next generation outside the lock, and swaps it in. [`stop`] revokes the
/// ticker, which also cancels a tick still waiting out its interval.
///
/// [`start`]: Simulation::start
/// [`stop`]: Simulation::stop
pub struct Simulation {
    shared: Arc<Shared>,
    config: CanvasConfig,
    rules: RuleSet,
    ticker: Option<Ticker>,
}

impl Simulation {
    pub fn new(config: CanvasConfig, rules: RuleSet) -> Result<Self, SimError> {
        let (rows, cols) = config.grid_dims();
        let grid = Grid::new(rows, cols)?;

        let shared = Arc::new(Shared {
            grid: Mutex::new(grid),
            epoch: AtomicU64::new(0),
            generation: AtomicU64::new(0),
            tick_interval_ns: AtomicU64::new(config.tick_interval().as_nanos() as u64),
        });

        Ok(Self {
            shared,
            config,
            rules,
            ticker: None,
        })
    }

    pub fn running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Generations advanced since the last reset
    pub fn generation(&self) -> u64 {
        self.shared.generation.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Current grid state, as an independent copy
    pub fn snapshot(&self) -> Grid {
        self.shared.grid.lock().expect("grid lock poisoned").clone()
    }

    /// Apply one paint or erase edit to a cell.
    ///
    /// Out-of-bounds coordinates are rejected, never silently written.
    pub fn edit_cell(&self, y: CellIndex, x: CellIndex, alive: bool) -> Result<(), GridError> {
        self.shared
            .grid
            .lock()
            .expect("grid lock poisoned")
            .set(y, x, alive)
    }

    /// Stopped -> Running. Returns `false` (and spawns nothing) if already
    /// Running: exactly one tick chain exists at a time.
    pub fn start(&mut self) -> bool {
        if self.ticker.is_some() {
            return false;
        }

        info!("simulation started");

        let shared = Arc::clone(&self.shared);
        let rules = self.rules;

        self.ticker = Some(Ticker::spawn(
            {
                let shared = Arc::clone(&self.shared);
                move || Duration::from_nanos(shared.tick_interval_ns.load(Ordering::SeqCst))
            },
            move || advance(&shared, &rules),
        ));

        true
    }

    /// Running -> Stopped. Idempotent. A tick waiting out its interval when
    /// the stop lands never computes or applies a step.
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.revoke();
            info!("simulation stopped");
        }
    }

    /// Force Stopped, then restore the seeded grid, discarding all edits and
    /// progress. Valid from either state.
    pub fn reset(&mut self) -> Result<(), SimError> {
        self.stop();
        self.reseed()?;

        info!("simulation reset");

        Ok(())
    }

    /// Change the cell size, re-deriving the grid dimensions and reseeding.
    ///
    /// Invalid sizes are rejected with the prior configuration left in
    /// effect. Prior edits are lost on success; the run state is unchanged.
    pub fn set_cell_size(&mut self, cell_size_px: PixelIndex) -> Result<(), SimError> {
        self.config = self.config.clone().with_cell_size(cell_size_px)?;
        self.reseed()?;

        Ok(())
    }

    /// Change the tick interval. Takes effect from the next wait of a running
    /// ticker; invalid intervals leave the prior one in effect.
    pub fn set_tick_interval(&mut self, tick_interval: Duration) -> Result<(), SimError> {
        self.config = self.config.clone().with_tick_interval(tick_interval)?;
        self.shared
            .tick_interval_ns
            .store(tick_interval.as_nanos() as u64, Ordering::SeqCst);

        Ok(())
    }

    /// Flip the gridline overlay flag. Rendering concern only, the
    /// simulation itself is unaffected.
    pub fn toggle_grid_overlay(&mut self) {
        self.config.toggle_grid_visible();
    }

    fn reseed(&mut self) -> Result<(), SimError> {
        let (rows, cols) = self.config.grid_dims();
        let grid = Grid::new(rows, cols)?;

        let mut live = self.shared.grid.lock().expect("grid lock poisoned");
        *live = grid;
        self.shared.epoch.fetch_add(1, Ordering::SeqCst);
        self.shared.generation.store(0, Ordering::SeqCst);

        Ok(())
    }
}

/// One tick: snapshot under the lock, step outside it, swap back in.
///
/// The swap is skipped if the grid was replaced (reset or reseed) while the
/// step was being computed; the stale result is discarded.
fn advance(shared: &Shared, rules: &RuleSet) {
    let (snapshot, epoch) = {
        let grid = shared.grid.lock().expect("grid lock poisoned");
        (grid.clone(), shared.epoch.load(Ordering::SeqCst))
    };

    let next = rules.step(&snapshot);

    let mut grid = shared.grid.lock().expect("grid lock poisoned");
    if shared.epoch.load(Ordering::SeqCst) == epoch {
        *grid = next;
        shared.generation.fetch_add(1, Ordering::SeqCst);
    }
}
