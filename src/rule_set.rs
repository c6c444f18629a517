use std::str::FromStr;

use thiserror::Error;

use crate::grid::Grid;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    fn born(&self, neighbors: u8) -> bool {
        self.births() & (1 << neighbors) != 0
    }

    fn survives(&self, neighbors: u8) -> bool {
        self.survivals() & (1 << neighbors) != 0
    }

    /// Compute the next generation of `grid`.
    ///
    /// Pure and total: the input is only read, every neighbor count comes
    /// from the pre-step snapshot, and the result is a fresh grid of the same
    /// dimensions. Off-grid neighbors count 0 (hard edges).
    pub fn step(&self, grid: &Grid) -> Grid {
        let mut next = Grid::dead_like(grid);

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let neighbors = grid.live_neighbors(y, x);

                let alive = match grid.get(y, x) {
                    Some(true) => self.survives(neighbors) || self.born(neighbors),
                    _ => self.born(neighbors),
                };

                if alive {
                    // in bounds by construction
                    let _ = next.set(y, x, true);
                }
            }
        }

        next
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Rulestring contains a character other than b, s, /, or a digit 0-8")]
    InvalidString,
}

// Parse rules that look like b3s23 or B3/S23
impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum State {
            Birth,
            Survival,
        }

        let mut state = State::Birth;
        let mut rule = 0;

        for c in s.chars() {
            match c {
                'b' | 'B' => {
                    state = State::Birth;
                }
                's' | 'S' => {
                    state = State::Survival;
                }
                '/' => {}
                n => {
                    let n = n.to_digit(10).ok_or(RuleError::InvalidString)? as u8;

                    if n > 8 {
                        return Err(RuleError::InvalidString);
                    }

                    match state {
                        State::Survival => {
                            rule |= 1 << n;
                        }
                        State::Birth => {
                            rule |= 1 << (n + 0x10);
                        }
                    }
                }
            }
        }

        Ok(RuleSet { rule })
    }
}
