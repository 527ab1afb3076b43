#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod snapshot;
mod tile;
mod types;
mod win;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Clamps the request into a playable configuration: at least `1x1`, at most one mine per cell.
    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Self {
        let size = (size_x.max(1), size_y.max(1));
        let clamped_mines = mines.min(mult(size.0, size.1).unwrap_or(CellCount::MAX));
        if size != (size_x, size_y) || clamped_mines != mines {
            log::warn!(
                "Clamped game config {size_x}x{size_y} with {mines} mines to {}x{} with {clamped_mines}",
                size.0,
                size.1
            );
        }
        Self::new_unchecked(size, clamped_mines)
    }

    pub fn try_new(size: Coord2, mines: CellCount) -> Result<Self> {
        let (width, height) = size;
        if width <= 0 || height <= 0 {
            return Err(ConfigError::InvalidSize { width, height }.into());
        }
        let cells = mult(width, height).ok_or(ConfigError::BoardTooLarge)?;
        if mines > cells {
            return Err(ConfigError::TooManyMines { mines, cells }.into());
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((30, 16), 99)
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1).unwrap_or(0)
    }

    pub fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((16, 16), 32)
    }
}

/// Starts a game on a freshly generated `width × height` board.
pub fn new_game(
    width: Coord,
    height: Coord,
    mine_count: CellCount,
    source: &mut impl CoordSource,
) -> Result<Session> {
    Session::new(GameConfig::try_new((width, height), mine_count)?, source)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}
