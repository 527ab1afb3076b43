use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size grid of cells, stored row-major as a `(height, width)` array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// All-empty board, every cell hidden with its position set. `size` must be positive.
    pub(crate) fn empty((width, height): Coord2) -> Self {
        let cells = Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
            Cell::new((x as Coord, y as Coord))
        });
        Self {
            cells,
            mine_count: 0,
        }
    }

    /// Builds a board with mines at exactly `mine_coords`, deriving the numbers around them.
    ///
    /// Duplicate coordinates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        GameConfig::try_new(size, 0)?;

        let mut board = Self::empty(size);
        for &coords in mine_coords {
            if !board.contains(coords) {
                return Err(GameError::InvalidCoords);
            }
            board.place_mine(coords);
        }
        board.derive_numbers();

        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        let (height, width) = self.cells.dim();
        (width as Coord, height as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains(&self, (x, y): Coord2) -> bool {
        let (width, height) = self.size();
        (0..width).contains(&x) && (0..height).contains(&y)
    }

    /// The stored cell, or an [`CellKind::Invalid`] sentinel for coordinates off the board.
    pub fn get(&self, coords: Coord2) -> Cell {
        if self.contains(coords) {
            self.cells[coords.to_nd_index()]
        } else {
            Cell::invalid(coords)
        }
    }

    /// Replaces the cell at `coords`.
    ///
    /// # Panics
    ///
    /// When `coords` is off the board.
    pub(crate) fn set(&mut self, coords: Coord2, cell: Cell) {
        assert!(self.contains(coords), "set out of bounds at {coords:?}");
        self.cells[coords.to_nd_index()] = cell;
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        if self.contains(coords) {
            self.cells.get_mut(coords.to_nd_index())
        } else {
            None
        }
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    pub fn as_array(&self) -> &Array2<Cell> {
        &self.cells
    }

    /// The eight coordinates around `coords`, including those off the board.
    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords)
    }

    pub fn iter_neighbor_cells(&self, coords: Coord2) -> impl Iterator<Item = Cell> + '_ {
        self.neighbors(coords).map(|pos| self.get(pos))
    }

    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.iter_neighbor_cells(coords)
            .filter(Cell::is_mine)
            .count() as u8
    }

    pub fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.iter_neighbor_cells(coords)
            .filter(Cell::is_flagged)
            .count() as u8
    }

    /// Marks `coords` as a mine, returns false if it already was one.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        let mut cell = self.get(coords);
        if cell.is_mine() {
            return false;
        }
        cell.make_mine();
        self.set(coords, cell);
        self.mine_count += 1;
        true
    }

    /// Recomputes kind and adjacency count of every non-mine cell.
    pub(crate) fn derive_numbers(&mut self) {
        let (width, height) = self.size();
        for y in 0..height {
            for x in 0..width {
                let coords = (x, y);
                let mut cell = self.get(coords);
                if cell.is_mine() {
                    continue;
                }

                cell.set_adjacent_mines(self.count_adjacent_mines(coords));
                self.set(coords, cell);
            }
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
