use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Owned copy of a session's observable state, for handing to a renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub cells: Array2<Cell>,
    pub game_over: bool,
    pub mines_flagged: CellCount,
    pub mines_left: i64,
}

impl Snapshot {
    pub fn from_session(session: &Session) -> Self {
        let board = session.board();
        Self {
            size: board.size(),
            cells: board.as_array().clone(),
            game_over: session.game_over(),
            mines_flagged: session.mines_flagged(),
            mines_left: session.mines_left(),
        }
    }

    pub fn cell_at(&self, (x, y): Coord2) -> Cell {
        let (width, height) = self.size;
        if (0..width).contains(&x) && (0..height).contains(&y) {
            self.cells[(x, y).to_nd_index()]
        } else {
            Cell::invalid((x, y))
        }
    }

    /// What the player may see of each cell, indexed `[y, x]` like the cells.
    pub fn visible(&self) -> Array2<VisibleCell> {
        self.cells.map(Cell::visible)
    }
}
