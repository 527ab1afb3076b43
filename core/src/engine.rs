use alloc::vec;
use core::num::Saturating;
use core::ops::BitOr;
use serde::{Deserialize, Serialize};

use crate::*;

/// State of one game: the board, the flag counter and the terminal flag.
///
/// The engine does not refuse moves once `game_over` is set. Callers are expected to check
/// [`Session::game_over`] before forwarding input, and to call [`Session::restart`] or build a new
/// session to play again.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    config: GameConfig,
    board: Board,
    mines_flagged: Saturating<CellCount>,
    game_over: bool,
    triggered_mine: Option<Coord2>,
}

impl Session {
    pub fn new(config: GameConfig, source: &mut impl CoordSource) -> Result<Self> {
        Ok(Self::from_board(Board::generate(config, source)?))
    }

    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new(config, &mut RngCoords::seeded(seed))
    }

    /// Starts a game on an existing board, e.g. one built with [`Board::from_mine_coords`].
    pub fn from_board(board: Board) -> Self {
        let config = GameConfig::new_unchecked(board.size(), board.mine_count());
        let mines_flagged = board.cells().filter(|cell| cell.is_flagged()).count() as CellCount;
        Self {
            config,
            board,
            mines_flagged: Saturating(mines_flagged),
            game_over: false,
            triggered_mine: None,
        }
    }

    /// Replaces the board with a freshly generated one using the same configuration.
    pub fn restart(&mut self, source: &mut impl CoordSource) -> Result<()> {
        *self = Self::new(self.config, source)?;
        Ok(())
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.board.get(coords)
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Number of flagged cells, correct guesses or not.
    pub fn mines_flagged(&self) -> CellCount {
        self.mines_flagged.0
    }

    /// Mine counter for display, negative when more flags than mines are placed.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.board.mine_count()) - i64::from(self.mines_flagged.0)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn is_won(&self) -> bool {
        self.game_over && self.triggered_mine.is_none()
    }

    pub fn is_lost(&self) -> bool {
        self.triggered_mine.is_some()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_session(self)
    }

    pub fn flag(&mut self, coords: Coord2) -> MarkOutcome {
        let Some(cell) = self.board.cell_mut(coords) else {
            return MarkOutcome::NoChange;
        };
        if cell.is_revealed() {
            return MarkOutcome::NoChange;
        }

        if cell.toggle_flag() {
            self.mines_flagged += 1;
        } else {
            self.mines_flagged -= 1;
        }
        MarkOutcome::Changed
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self.board.get(coords);
        if cell.is_revealed() || cell.is_flagged() {
            return RevealOutcome::NoChange;
        }

        match cell.kind() {
            CellKind::Invalid => RevealOutcome::NoChange,
            CellKind::Mine => {
                self.explode(coords);
                RevealOutcome::HitMine
            }
            CellKind::Empty => {
                self.flood(coords);
                self.finish_reveal()
            }
            CellKind::Number => {
                if let Some(cell) = self.board.cell_mut(coords) {
                    cell.reveal();
                }
                self.finish_reveal()
            }
        }
    }

    /// Reveals every unflagged neighbor of a revealed number whose flags add up to it.
    ///
    /// Every neighbor goes through [`Session::reveal`], so a misplaced flag means an unflagged mine
    /// gets revealed and ends the game. The remaining neighbors are still opened.
    pub fn chord(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self.board.get(coords);
        if !cell.is_revealed() || cell.kind() != CellKind::Number {
            return RevealOutcome::NoChange;
        }
        if self.board.count_flagged_neighbors(coords) != cell.adjacent_mine_count() {
            return RevealOutcome::NoChange;
        }

        self.board
            .neighbors(coords)
            .map(|pos| self.reveal(pos))
            .reduce(BitOr::bitor)
            .unwrap_or(RevealOutcome::NoChange)
    }

    /// Primary click: chords a satisfied number, otherwise reveals the cell.
    pub fn click(&mut self, coords: Coord2) -> RevealOutcome {
        let chorded = self.chord(coords);
        chorded | self.reveal(coords)
    }

    /// Scans for the win condition, ending the game and flagging every mine when it holds.
    pub fn check_win(&mut self) -> bool {
        if !self.board.all_safe_revealed() {
            return false;
        }

        if !self.game_over {
            log::info!("Board cleared, {} mines flagged", self.board.mine_count());
        }
        self.game_over = true;
        self.mines_flagged += self.board.flag_all_mines();
        true
    }

    fn finish_reveal(&mut self) -> RevealOutcome {
        if self.check_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn explode(&mut self, coords: Coord2) {
        log::info!("Game over, mine hit at {coords:?}");
        self.game_over = true;
        self.triggered_mine = Some(coords);

        for cell in self.board.cells_mut().filter(|cell| cell.is_mine()) {
            cell.reveal();
        }
        if let Some(cell) = self.board.cell_mut(coords) {
            cell.explode();
        }
    }

    /// Reveals the connected region around an empty cell, stopping at numbers.
    ///
    /// Every coordinate taken off the stack passes the same gates as [`Session::reveal`], so a
    /// cell is opened at most once and flagged cells stay hidden. Mines are never reached: an
    /// empty cell has none around it, and numbered cells are not expanded.
    fn flood(&mut self, start: Coord2) -> CellCount {
        let mut pending = vec![start];
        let mut opened = 0;

        while let Some(coords) = pending.pop() {
            let Some(cell) = self.board.cell_mut(coords) else {
                continue;
            };
            if cell.is_revealed() || cell.is_flagged() || !cell.is_safe() {
                continue;
            }

            cell.reveal();
            opened += 1;
            if cell.kind() == CellKind::Empty {
                pending.extend(NeighborIter::new(coords));
            }
        }

        log::debug!("Flood fill from {start:?} opened {opened} cells");
        opened
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: Coord2, mines: &[Coord2]) -> Session {
        Session::from_board(Board::from_mine_coords(size, mines).unwrap())
    }

    fn flagged_cells(session: &Session) -> CellCount {
        session.board().cells().filter(|cell| cell.is_flagged()).count() as CellCount
    }

    #[test]
    fn single_cell_without_mines_wins_on_first_reveal() {
        let mut game = new_game(1, 1, 0, &mut RngCoords::seeded(0)).unwrap();

        assert_eq!(game.reveal((0, 0)), RevealOutcome::Won);
        assert!(game.game_over());
        assert!(game.is_won());
        assert!(game.cell_at((0, 0)).is_revealed());
    }

    #[test]
    fn reveal_number_opens_only_that_cell() {
        let mut game = session((3, 3), &[(0, 0), (1, 2)]);
        assert_eq!(game.cell_at((2, 2)).kind(), CellKind::Number);

        assert_eq!(game.reveal((2, 2)), RevealOutcome::Revealed);

        assert!(!game.game_over());
        let revealed: alloc::vec::Vec<_> = game
            .board()
            .cells()
            .filter(|cell| cell.is_revealed())
            .map(Cell::position)
            .collect();
        assert_eq!(revealed, [(2, 2)]);
    }

    #[test]
    fn reveal_far_from_single_corner_mine_floods_and_wins() {
        let mut game = session((3, 3), &[(0, 0)]);

        assert_eq!(game.reveal((2, 2)), RevealOutcome::Won);
        assert!(game.board().cells().filter(|c| !c.is_mine()).all(Cell::is_revealed));
        assert!(!game.cell_at((0, 0)).is_revealed());
        assert!(game.cell_at((0, 0)).is_flagged());
    }

    #[test]
    fn flood_stops_at_numbers_and_never_opens_mines() {
        // wall of mines down column 2 splits the board in two
        let mut game = session((5, 4), &[(2, 0), (2, 1), (2, 2), (2, 3)]);

        assert_eq!(game.reveal((0, 0)), RevealOutcome::Revealed);

        for y in 0..4 {
            assert!(game.cell_at((0, y)).is_revealed());
            assert!(game.cell_at((1, y)).is_revealed());
            assert_eq!(game.cell_at((1, y)).kind(), CellKind::Number);
            assert!(!game.cell_at((2, y)).is_revealed());
            assert!(!game.cell_at((3, y)).is_revealed());
            assert!(!game.cell_at((4, y)).is_revealed());
        }
        assert!(!game.game_over());
    }

    #[test]
    fn flood_leaves_flagged_cells_alone() {
        let mut game = session((4, 1), &[(3, 0)]);
        game.flag((1, 0));

        game.reveal((0, 0));

        assert!(game.cell_at((0, 0)).is_revealed());
        assert!(!game.cell_at((1, 0)).is_revealed());
        assert!(!game.cell_at((2, 0)).is_revealed());
        assert!(!game.game_over());
    }

    #[test]
    fn flood_handles_large_open_boards() {
        let mut game = session((300, 300), &[(299, 299)]);

        assert_eq!(game.reveal((0, 0)), RevealOutcome::Won);
        assert!(game.cell_at((150, 150)).is_revealed());
    }

    #[test]
    fn reveal_mine_explodes_and_shows_all_mines() {
        let mut game = session((4, 4), &[(0, 0), (3, 3), (1, 2)]);
        game.flag((3, 3));
        game.flag((2, 2));

        assert_eq!(game.reveal((1, 2)), RevealOutcome::HitMine);

        assert!(game.game_over());
        assert!(game.is_lost());
        assert_eq!(game.triggered_mine(), Some((1, 2)));
        for cell in game.board().cells() {
            if cell.is_mine() {
                assert!(cell.is_revealed());
                assert_eq!(cell.is_exploded(), cell.position() == (1, 2));
            } else {
                assert!(!cell.is_revealed());
                assert!(!cell.is_exploded());
            }
        }
        assert_eq!(game.cell_at((1, 2)).visible(), VisibleCell::Exploded);
        assert_eq!(game.cell_at((2, 2)).visible(), VisibleCell::Flagged);
    }

    #[test]
    fn reveal_ignores_flagged_revealed_and_invalid_cells() {
        let mut game = session((3, 3), &[(0, 0)]);
        game.flag((0, 0));

        assert_eq!(game.reveal((0, 0)), RevealOutcome::NoChange);
        assert_eq!(game.reveal((-1, 0)), RevealOutcome::NoChange);
        assert_eq!(game.reveal((3, 3)), RevealOutcome::NoChange);
        assert!(!game.game_over());

        assert_eq!(game.reveal((1, 0)), RevealOutcome::Revealed);
        assert_eq!(game.reveal((1, 0)), RevealOutcome::NoChange);
    }

    #[test]
    fn flag_toggles_and_tracks_count() {
        let mut game = session((3, 3), &[(0, 0)]);

        assert_eq!(game.flag((0, 0)), MarkOutcome::Changed);
        assert_eq!(game.flag((2, 2)), MarkOutcome::Changed);
        assert_eq!(game.mines_flagged(), 2);
        assert_eq!(game.mines_left(), -1);

        assert_eq!(game.flag((2, 2)), MarkOutcome::Changed);
        assert_eq!(game.mines_flagged(), 1);
        assert_eq!(game.mines_flagged(), flagged_cells(&game));

        assert_eq!(game.flag((5, 5)), MarkOutcome::NoChange);
        assert_eq!(game.mines_flagged(), 1);
    }

    #[test]
    fn flag_ignores_revealed_cells() {
        let mut game = session((3, 3), &[(0, 0), (2, 2)]);
        game.reveal((1, 0));

        assert_eq!(game.flag((1, 0)), MarkOutcome::NoChange);
        assert!(!game.cell_at((1, 0)).is_flagged());
        assert_eq!(game.mines_flagged(), 0);
    }

    #[test]
    fn win_requires_every_safe_cell() {
        let mut game = session((3, 1), &[(1, 0)]);

        assert_eq!(game.reveal((0, 0)), RevealOutcome::Revealed);
        assert!(!game.game_over());
        assert!(!game.check_win());

        assert_eq!(game.reveal((2, 0)), RevealOutcome::Won);
        assert!(game.game_over());
        assert!(game.cell_at((1, 0)).is_flagged());
        assert_eq!(game.mines_flagged(), 1);
        assert_eq!(game.mines_flagged(), flagged_cells(&game));
    }

    #[test]
    fn win_flags_mines_that_were_already_flagged_once() {
        let mut game = session((3, 1), &[(0, 0), (2, 0)]);
        game.flag((0, 0));

        assert_eq!(game.reveal((1, 0)), RevealOutcome::Won);

        assert!(game.cell_at((0, 0)).is_flagged());
        assert!(game.cell_at((2, 0)).is_flagged());
        assert_eq!(game.mines_flagged(), 2);
        assert!(game.check_win());
        assert_eq!(game.mines_flagged(), 2);
    }

    #[test]
    fn chord_reveals_unflagged_neighbors_when_satisfied() {
        let mines = &[(0, 1), (2, 1)];
        let mut game = session((3, 3), mines);

        game.reveal((1, 1));
        game.flag((0, 1));
        game.flag((2, 1));

        assert_eq!(game.chord((1, 1)), RevealOutcome::Won);
        assert!(game.cell_at((1, 0)).is_revealed());
        assert!(game.cell_at((1, 2)).is_revealed());
        assert!(!game.cell_at((0, 1)).is_revealed());
    }

    #[test]
    fn chord_requires_matching_flag_count() {
        let mut game = session((3, 3), &[(0, 1), (2, 1)]);
        game.reveal((1, 1));
        game.flag((0, 1));

        assert_eq!(game.chord((1, 1)), RevealOutcome::NoChange);
        assert!(!game.cell_at((1, 0)).is_revealed());
    }

    #[test]
    fn chord_ignores_hidden_and_empty_cells() {
        let mut game = session((3, 3), &[(0, 0)]);

        assert_eq!(game.chord((1, 1)), RevealOutcome::NoChange);
        assert!(!game.cell_at((1, 1)).is_revealed());
        assert_eq!(game.chord((9, 9)), RevealOutcome::NoChange);
    }

    #[test]
    fn chord_with_misplaced_flag_explodes() {
        // (1, 1) touches the mines at (0, 0) and (2, 2)
        let mut game = session((3, 3), &[(0, 0), (2, 2)]);
        game.reveal((1, 1));
        assert_eq!(game.cell_at((1, 1)).adjacent_mine_count(), 2);
        game.flag((0, 0));
        game.flag((1, 0));

        assert_eq!(game.chord((1, 1)), RevealOutcome::HitMine);
        assert!(game.game_over());
        assert_eq!(game.triggered_mine(), Some((2, 2)));
        assert!(game.cell_at((2, 2)).is_exploded());
    }

    #[test]
    fn chord_opens_safe_neighbors_after_hitting_a_mine() {
        let mut game = session((3, 3), &[(2, 0), (0, 2)]);
        game.reveal((1, 1));
        game.flag((0, 0));
        game.flag((1, 0));

        assert_eq!(game.chord((1, 1)), RevealOutcome::HitMine);

        assert_eq!(game.triggered_mine(), Some((2, 0)));
        assert!(game.cell_at((2, 0)).is_exploded());
        assert!(!game.cell_at((0, 2)).is_exploded());
        assert!(game.cell_at((0, 2)).is_revealed());
        for pos in [(0, 1), (2, 1), (1, 2), (2, 2)] {
            assert!(game.cell_at(pos).is_revealed(), "{pos:?} left hidden");
        }
        assert!(!game.cell_at((0, 0)).is_revealed());
        assert!(!game.cell_at((1, 0)).is_revealed());
        assert!(!game.is_won());
    }

    #[test]
    fn click_chords_revealed_numbers_and_reveals_hidden_cells() {
        let mut game = session((3, 3), &[(0, 1), (2, 1)]);

        assert_eq!(game.click((1, 1)), RevealOutcome::Revealed);
        game.flag((0, 1));
        game.flag((2, 1));
        assert_eq!(game.click((1, 1)), RevealOutcome::Won);
    }

    #[test]
    fn restart_replaces_state() {
        let mut game = Session::seeded(GameConfig::beginner(), 5).unwrap();
        game.flag((0, 0));
        let mine = game
            .board()
            .cells()
            .find(|cell| cell.is_mine() && !cell.is_flagged())
            .map(Cell::position)
            .unwrap();
        game.reveal(mine);
        assert!(game.game_over());

        game.restart(&mut RngCoords::seeded(6)).unwrap();

        assert!(!game.game_over());
        assert_eq!(game.mines_flagged(), 0);
        assert_eq!(game.triggered_mine(), None);
        assert_eq!(game.config(), GameConfig::beginner());
        assert!(game.board().cells().all(|cell| !cell.is_revealed()));
        assert_eq!(game.board().mine_count(), 10);
    }
}
