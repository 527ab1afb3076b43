use crate::*;
pub use random::*;

mod random;

/// Source of mine placement draws.
pub trait CoordSource {
    /// Draws a coordinate uniformly from `[0, width) × [0, height)`.
    fn next_coords(&mut self, size: Coord2) -> Coord2;
}

impl<T: CoordSource + ?Sized> CoordSource for &mut T {
    fn next_coords(&mut self, size: Coord2) -> Coord2 {
        (**self).next_coords(size)
    }
}

/// Generates a `width × height` board holding exactly `mine_count` mines.
pub fn new_board(
    width: Coord,
    height: Coord,
    mine_count: CellCount,
    source: &mut impl CoordSource,
) -> Result<Board> {
    Board::generate(GameConfig::try_new((width, height), mine_count)?, source)
}

impl Board {
    /// Places `config.mines` mines using draws from `source`.
    ///
    /// A draw that lands on a mine probes forward in row-major order, wrapping at the end of each
    /// row and at the end of the board, until it finds a free cell. This always terminates while
    /// free cells remain, at the cost of a slight bias towards cells that follow clusters of mines.
    pub fn generate(config: GameConfig, source: &mut impl CoordSource) -> Result<Self> {
        let config = GameConfig::try_new(config.size, config.mines)?;
        let mut board = Self::empty(config.size);

        for _ in 0..config.mines {
            let start = fit_draw(source.next_coords(config.size), config.size);
            let coords = board.probe_free(start);
            board.place_mine(coords);
        }
        board.derive_numbers();

        log::debug!(
            "Generated {}x{} board with {} mines",
            config.size.0,
            config.size.1,
            board.mine_count()
        );
        Ok(board)
    }

    /// First non-mine cell at or after `start` in row-major order. Requires a free cell to exist.
    fn probe_free(&self, (mut x, mut y): Coord2) -> Coord2 {
        let (width, height) = self.size();
        while self.get((x, y)).is_mine() {
            x += 1;
            if x >= width {
                x = 0;
                y += 1;
                if y >= height {
                    y = 0;
                }
            }
        }
        (x, y)
    }
}

/// Folds a draw back onto the board so a misbehaving source cannot index out of bounds.
fn fit_draw(coords: Coord2, (width, height): Coord2) -> Coord2 {
    let fitted = (coords.0.rem_euclid(width), coords.1.rem_euclid(height));
    if fitted != coords {
        log::warn!("Random draw {coords:?} is off the board, wrapped to {fitted:?}");
    }
    fitted
}
