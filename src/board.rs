use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Derived game state; never stored on the board, always recomputed from the
/// revealed cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single game's board: an immutable mine layout plus the revealed and
/// flagged cells.
///
/// Mutation happens only through [`Board::reveal`] and [`Board::toggle_flag`];
/// both become no-ops once the game is over, so a session can keep forwarding
/// input without checking the state first. The revealed set only grows, and a
/// revealed cell is never flagged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    mines: MineField,
    revealed: Array2<bool>,
    flags: Array2<bool>,
    revealed_count: CellCount,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Creates a board with a fresh random mine layout.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines)?;
        Ok(Self::from_mine_field(
            RandomMineGenerator::new(seed).generate(config),
        ))
    }

    pub fn generate(config: GameConfig, generator: impl MineGenerator) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines)?;
        Ok(Self::from_mine_field(generator.generate(config)))
    }

    /// Wraps an explicit mine layout, for deterministic setups.
    pub fn from_mine_field(mines: MineField) -> Self {
        let shape = mines.size().nd();
        Self {
            mines,
            revealed: Array2::default(shape),
            flags: Array2::default(shape),
            revealed_count: 0,
            triggered_mine: None,
        }
    }

    pub fn size(&self) -> Coord2 {
        self.mines.size()
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines.mine_count()
    }

    /// Mine count minus placed flags, for a HUD counter. Negative when the
    /// player has over-flagged.
    pub fn mines_left(&self) -> i64 {
        let flagged = self.flags.iter().filter(|&&flag| flag).count();
        i64::from(self.mine_count()) - flagged as i64
    }

    /// The mine that ended the game, if it ended in a loss.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn is_revealed(&self, coords: Coord2) -> Result<bool> {
        let coords = self.mines.validate(coords)?;
        Ok(self.revealed[coords.nd()])
    }

    pub fn is_flagged(&self, coords: Coord2) -> Result<bool> {
        let coords = self.mines.validate(coords)?;
        Ok(self.flags[coords.nd()])
    }

    pub fn is_mine(&self, coords: Coord2) -> Result<bool> {
        let coords = self.mines.validate(coords)?;
        Ok(self.mines.contains(coords))
    }

    /// Mines among the up-to-8 neighbors of `coords`; pure, independent of
    /// what has been revealed.
    pub fn neighbor_count(&self, coords: Coord2) -> Result<u8> {
        let coords = self.mines.validate(coords)?;
        Ok(self.mines.adjacent_mines(coords))
    }

    /// Recomputes the game state from scratch: lost iff any mine has been
    /// revealed, else won iff every safe cell has been.
    pub fn game_state(&self) -> GameState {
        if self
            .mines
            .iter_mines()
            .any(|mine| self.revealed[mine.nd()])
        {
            GameState::Lost
        } else if self.revealed_count >= self.mines.safe_cells() {
            GameState::Won
        } else {
            GameState::Playing
        }
    }

    /// Reveals a cell and returns the resulting game state.
    ///
    /// A no-op (still reporting the current state) when the game is over, the
    /// cell is already revealed, or the cell is flagged; a flag has to be
    /// removed before its cell can be revealed. Revealing a mine uncovers
    /// every mine so the final board shows all of them.
    pub fn reveal(&mut self, coords: Coord2) -> Result<GameState> {
        let coords = self.mines.validate(coords)?;

        if self.game_state().is_over() || self.revealed[coords.nd()] || self.flags[coords.nd()] {
            return Ok(self.game_state());
        }

        self.reveal_cell(coords);
        if self.mines.contains(coords) {
            self.triggered_mine = Some(coords);
            self.reveal_all_mines();
        } else if self.mines.adjacent_mines(coords) == 0 {
            self.flood_reveal(coords);
        }

        Ok(self.game_state())
    }

    /// Flags or unflags a cell. No-op on revealed cells and once the game is
    /// over.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.mines.validate(coords)?;

        if self.game_state().is_over() || self.revealed[coords.nd()] {
            return Ok(());
        }

        self.flags[coords.nd()] = !self.flags[coords.nd()];
        Ok(())
    }

    /// Expands from an already revealed zero-count cell: neighbors with a
    /// count are revealed and left alone, zero-count neighbors are revealed
    /// and expanded from in turn. Work-list traversal, each cell revealed at
    /// most once; mines are unreachable because every cell next to one has a
    /// nonzero count.
    fn flood_reveal(&mut self, start: Coord2) {
        let mut frontier = VecDeque::from([start]);
        while let Some(cell) = frontier.pop_front() {
            for neighbor in neighbors(cell, self.size()) {
                if self.revealed[neighbor.nd()] {
                    continue;
                }
                self.reveal_cell(neighbor);
                if self.mines.adjacent_mines(neighbor) == 0 {
                    frontier.push_back(neighbor);
                }
            }
        }
    }

    fn reveal_all_mines(&mut self) {
        let mines: Vec<_> = self.mines.iter_mines().collect();
        for mine in mines {
            self.reveal_cell(mine);
        }
    }

    fn reveal_cell(&mut self, coords: Coord2) {
        if self.revealed[coords.nd()] {
            return;
        }
        self.revealed[coords.nd()] = true;
        self.revealed_count += 1;
        // a revealed cell can no longer carry a flag
        self.flags[coords.nd()] = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_mine_field(MineField::from_coords(size, mines).unwrap())
    }

    #[test]
    fn revealing_a_mine_loses_and_uncovers_every_mine() {
        let mut game = board((4, 4), &[(0, 0), (3, 3)]);
        game.reveal((1, 1)).unwrap();

        assert_eq!(game.reveal((0, 0)).unwrap(), GameState::Lost);
        assert_eq!(game.triggered_mine(), Some((0, 0)));
        assert!(game.is_revealed((0, 0)).unwrap());
        assert!(game.is_revealed((3, 3)).unwrap());
        // the earlier safe reveal stays, untouched safe cells stay hidden
        assert!(game.is_revealed((1, 1)).unwrap());
        assert!(!game.is_revealed((3, 0)).unwrap());
    }

    #[test]
    fn flood_reveal_opens_the_zero_region_and_its_border() {
        let mut game = board((4, 4), &[(3, 3)]);

        assert_eq!(game.reveal((0, 0)).unwrap(), GameState::Won);
        for x in 0..4 {
            for y in 0..4 {
                assert_eq!(game.is_revealed((x, y)).unwrap(), (x, y) != (3, 3));
            }
        }
    }

    #[test]
    fn flood_reveal_stops_at_numbered_cells() {
        // mine in the middle of a 5x1 strip: revealing the left end must not
        // spill past the numbered cell at (1, 0)
        let mut game = board((5, 1), &[(2, 0)]);

        assert_eq!(game.reveal((0, 0)).unwrap(), GameState::Playing);
        assert!(game.is_revealed((1, 0)).unwrap());
        assert!(!game.is_revealed((2, 0)).unwrap());
        assert!(!game.is_revealed((3, 0)).unwrap());
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut game = board((3, 3), &[(2, 2)]);
        game.reveal((1, 1)).unwrap();
        let snapshot = game.clone();

        game.reveal((1, 1)).unwrap();
        assert_eq!(game, snapshot);
    }

    #[test]
    fn smallest_board_wins_in_one_move() {
        let mut game = board((2, 1), &[(0, 0)]);
        assert_eq!(game.reveal((1, 0)).unwrap(), GameState::Won);
    }

    #[test]
    fn flagged_cell_cannot_be_revealed_until_unflagged() {
        let mut game = board((2, 1), &[(0, 0)]);

        game.toggle_flag((0, 0)).unwrap();
        assert_eq!(game.reveal((0, 0)).unwrap(), GameState::Playing);
        assert!(!game.is_revealed((0, 0)).unwrap());

        game.toggle_flag((0, 0)).unwrap();
        assert_eq!(game.reveal((0, 0)).unwrap(), GameState::Lost);
    }

    #[test]
    fn toggle_flag_on_revealed_cell_is_a_no_op() {
        let mut game = board((3, 3), &[(0, 0)]);
        game.reveal((2, 2)).unwrap();

        game.toggle_flag((2, 2)).unwrap();
        assert!(!game.is_flagged((2, 2)).unwrap());
    }

    #[test]
    fn flood_reveal_clears_flags_on_safe_cells() {
        let mut game = board((4, 4), &[(3, 3)]);
        game.toggle_flag((1, 1)).unwrap();

        assert_eq!(game.reveal((0, 0)).unwrap(), GameState::Won);
        assert!(game.is_revealed((1, 1)).unwrap());
        assert!(!game.is_flagged((1, 1)).unwrap());
    }

    #[test]
    fn losing_reveals_flagged_mines_and_drops_their_flags() {
        let mut game = board((3, 3), &[(0, 0), (2, 2)]);
        game.toggle_flag((2, 2)).unwrap();

        assert_eq!(game.reveal((0, 0)).unwrap(), GameState::Lost);
        assert!(game.is_revealed((2, 2)).unwrap());
        assert!(!game.is_flagged((2, 2)).unwrap());
    }

    #[test]
    fn no_moves_are_accepted_after_the_game_ends() {
        let mut game = board((3, 1), &[(0, 0)]);
        game.reveal((0, 0)).unwrap();
        let snapshot = game.clone();

        assert_eq!(game.reveal((2, 0)).unwrap(), GameState::Lost);
        game.toggle_flag((2, 0)).unwrap();
        assert_eq!(game, snapshot);
    }

    #[test]
    fn out_of_bounds_cells_are_rejected_without_changes() {
        let mut game = board((3, 3), &[(1, 1)]);
        let snapshot = game.clone();

        assert_eq!(game.reveal((3, 0)), Err(BoardError::OutOfBounds));
        assert_eq!(game.toggle_flag((0, 3)), Err(BoardError::OutOfBounds));
        assert_eq!(game.neighbor_count((9, 9)), Err(BoardError::OutOfBounds));
        assert_eq!(game.is_mine((3, 3)), Err(BoardError::OutOfBounds));
        assert_eq!(game, snapshot);
    }

    #[test]
    fn neighbor_count_matches_layout() {
        let game = board((3, 3), &[(0, 0), (1, 0)]);
        assert_eq!(game.neighbor_count((0, 1)).unwrap(), 2);
        assert_eq!(game.neighbor_count((2, 0)).unwrap(), 1);
        assert_eq!(game.neighbor_count((2, 2)).unwrap(), 0);
        // a mine's own cell is not part of its count
        assert_eq!(game.neighbor_count((0, 0)).unwrap(), 1);
    }

    #[test]
    fn mines_left_tracks_flags() {
        let mut game = board((3, 3), &[(0, 0), (1, 1)]);
        assert_eq!(game.mines_left(), 2);
        game.toggle_flag((0, 0)).unwrap();
        game.toggle_flag((2, 2)).unwrap();
        game.toggle_flag((2, 1)).unwrap();
        assert_eq!(game.mines_left(), -1);
    }

    #[test]
    fn board_state_survives_serialization() {
        let mut game = board((3, 3), &[(0, 0)]);
        game.toggle_flag((2, 2)).unwrap();
        game.reveal((1, 0)).unwrap();

        let json = serde_json::to_string(&game).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, game);
        assert_eq!(back.game_state(), GameState::Playing);
    }

    #[test]
    fn identical_move_sequences_give_identical_boards() {
        let config = GameConfig::new((9, 9), 10).unwrap();
        let mut a = Board::new(config, 1234).unwrap();
        let mut b = Board::new(config, 1234).unwrap();

        for game in [&mut a, &mut b] {
            game.toggle_flag((4, 4)).unwrap();
            game.reveal((0, 0)).unwrap();
            game.reveal((8, 8)).unwrap();
            game.toggle_flag((4, 4)).unwrap();
        }

        assert_eq!(a, b);
        assert_eq!(a.game_state(), b.game_state());
    }
}
