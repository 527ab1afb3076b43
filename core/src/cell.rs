use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// Sentinel for coordinates off the board, never stored in a [`Board`].
    #[default]
    Invalid,
    Empty,
    Number,
    Mine,
}

/// A single grid slot.
///
/// Cells are plain values: the board hands out copies through [`Board::get`] and only the engine
/// mutates the stored ones. `revealed` only ever goes from false to true within a game, and
/// `flagged` only changes while the cell is hidden.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    position: Coord2,
    kind: CellKind,
    adjacent_mine_count: u8,
    revealed: bool,
    flagged: bool,
    exploded: bool,
}

impl Cell {
    pub const fn new(position: Coord2) -> Self {
        Self {
            position,
            kind: CellKind::Empty,
            adjacent_mine_count: 0,
            revealed: false,
            flagged: false,
            exploded: false,
        }
    }

    pub const fn invalid(position: Coord2) -> Self {
        Self {
            kind: CellKind::Invalid,
            ..Self::new(position)
        }
    }

    pub const fn position(&self) -> Coord2 {
        self.position
    }

    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    pub const fn adjacent_mine_count(&self) -> u8 {
        self.adjacent_mine_count
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub const fn is_exploded(&self) -> bool {
        self.exploded
    }

    pub const fn is_mine(&self) -> bool {
        matches!(self.kind, CellKind::Mine)
    }

    pub const fn is_valid(&self) -> bool {
        !matches!(self.kind, CellKind::Invalid)
    }

    /// Empty or numbered, the cells that have to be revealed to win.
    pub const fn is_safe(&self) -> bool {
        matches!(self.kind, CellKind::Empty | CellKind::Number)
    }

    pub const fn visible(&self) -> VisibleCell {
        use CellKind::*;

        match (self.kind, self.revealed, self.flagged) {
            (Invalid, _, _) => VisibleCell::Hidden,
            (Mine, true, _) if self.exploded => VisibleCell::Exploded,
            (Mine, true, _) => VisibleCell::Mine,
            (_, true, _) => VisibleCell::Revealed(self.adjacent_mine_count),
            (_, false, true) => VisibleCell::Flagged,
            (_, false, false) => VisibleCell::Hidden,
        }
    }

    pub(crate) fn make_mine(&mut self) {
        self.kind = CellKind::Mine;
        self.adjacent_mine_count = 0;
    }

    pub(crate) fn set_adjacent_mines(&mut self, count: u8) {
        self.adjacent_mine_count = count;
        self.kind = if count > 0 {
            CellKind::Number
        } else {
            CellKind::Empty
        };
    }

    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn explode(&mut self) {
        self.revealed = true;
        self.exploded = true;
    }

    /// Returns the new flag state.
    pub(crate) fn toggle_flag(&mut self) -> bool {
        self.flagged = !self.flagged;
        self.flagged
    }

    /// Returns true when the flag was not already set.
    pub(crate) fn set_flag(&mut self) -> bool {
        !core::mem::replace(&mut self.flagged, true)
    }
}
