use crate::*;

impl Board {
    /// True once every non-mine cell is revealed.
    pub fn all_safe_revealed(&self) -> bool {
        self.cells()
            .filter(|cell| !cell.is_mine())
            .all(Cell::is_revealed)
    }

    /// Flags every mine, returning how many were not flagged yet.
    pub(crate) fn flag_all_mines(&mut self) -> CellCount {
        let mut newly_flagged = 0;
        for cell in self.cells_mut().filter(|cell| cell.is_mine()) {
            if cell.set_flag() {
                newly_flagged += 1;
            }
        }
        newly_flagged
    }
}
