//! Grid storage, occupancy queries, and win detection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Cell, Coord, Player, StateKey};

/// Run length required to win on boards large enough to hold one.
pub const WIN_RUN_LENGTH: usize = 5;

/// Win-detection policy, selected by board size at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinRule {
    /// Every cell of a full row, column, or either main diagonal belongs to
    /// the same player. Used for boards shorter than [`WIN_RUN_LENGTH`].
    FullLine,
    /// A contiguous run of the given length in a row, column, or either
    /// diagonal direction, scanned over all starting positions.
    RunOf(usize),
}

/// Fixed-size square grid of cells.
///
/// Dimensions are immutable after construction; the cell array is mutated in
/// place by [`Grid::apply_move`] and cleared by [`Grid::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    rule: WinRule,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidGridSize`] for sizes below 3.
    pub fn new(size: usize) -> Result<Self, crate::Error> {
        if size < 3 {
            return Err(crate::Error::InvalidGridSize { size });
        }
        let rule = if size < WIN_RUN_LENGTH {
            WinRule::FullLine
        } else {
            WinRule::RunOf(WIN_RUN_LENGTH)
        };
        Ok(Grid {
            size,
            rule,
            cells: vec![Cell::Empty; size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rule(&self) -> WinRule {
        self.rule
    }

    /// Set every cell to empty.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// Get the cell at a coordinate, or `None` when out of bounds.
    pub fn cell(&self, coord: Coord) -> Option<Cell> {
        if self.in_bounds(coord) {
            Some(self.cells[self.index(coord.row, coord.col)])
        } else {
            None
        }
    }

    /// Place a player's mark. Succeeds and mutates the target cell iff the
    /// coordinate is in bounds and currently empty; otherwise returns false
    /// and leaves the grid unchanged.
    pub fn apply_move(&mut self, coord: Coord, player: Player) -> bool {
        if !self.in_bounds(coord) {
            return false;
        }
        let idx = self.index(coord.row, coord.col);
        if self.cells[idx] != Cell::Empty {
            return false;
        }
        self.cells[idx] = player.to_cell();
        true
    }

    /// All empty cell coordinates in row-major order. The ordering is stable
    /// for a given cell contents.
    pub fn legal_moves(&self) -> Vec<Coord> {
        let mut moves = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.cells[self.index(row, col)] == Cell::Empty {
                    moves.push(Coord::new(row, col));
                }
            }
        }
        moves
    }

    /// True iff no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// The occupant of a fully-aligned run per the grid's win rule, or `None`.
    ///
    /// Under correct alternating play at most one winner can exist; when the
    /// cell contents hold several aligned runs, the first one in scan order
    /// is reported.
    pub fn winner(&self) -> Option<Player> {
        match self.rule {
            WinRule::FullLine => self.full_line_winner(),
            WinRule::RunOf(run) => self.run_winner(run),
        }
    }

    fn full_line_winner(&self) -> Option<Player> {
        let n = self.size;

        // Rows
        for row in 0..n {
            let first = self.cells[self.index(row, 0)];
            if first != Cell::Empty && (1..n).all(|c| self.cells[self.index(row, c)] == first) {
                return first.player();
            }
        }

        // Columns
        for col in 0..n {
            let first = self.cells[self.index(0, col)];
            if first != Cell::Empty && (1..n).all(|r| self.cells[self.index(r, col)] == first) {
                return first.player();
            }
        }

        // Main diagonal
        let first = self.cells[self.index(0, 0)];
        if first != Cell::Empty && (1..n).all(|i| self.cells[self.index(i, i)] == first) {
            return first.player();
        }

        // Anti-diagonal
        let first = self.cells[self.index(0, n - 1)];
        if first != Cell::Empty && (1..n).all(|i| self.cells[self.index(i, n - 1 - i)] == first) {
            return first.player();
        }

        None
    }

    fn run_winner(&self, run: usize) -> Option<Player> {
        // Right, down, down-right, down-left. Scanning only forward
        // directions from each start visits every run exactly once.
        const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];
        let n = self.size as isize;
        let span = run as isize - 1;

        for row in 0..self.size {
            for col in 0..self.size {
                let first = self.cells[self.index(row, col)];
                if first == Cell::Empty {
                    continue;
                }
                for &(dr, dc) in &DIRECTIONS {
                    let end_row = row as isize + span * dr;
                    let end_col = col as isize + span * dc;
                    if end_row < 0 || end_row >= n || end_col < 0 || end_col >= n {
                        continue;
                    }
                    let aligned = (1..run as isize).all(|k| {
                        let r = (row as isize + k * dr) as usize;
                        let c = (col as isize + k * dc) as usize;
                        self.cells[self.index(r, c)] == first
                    });
                    if aligned {
                        return first.player();
                    }
                }
            }
        }

        None
    }

    /// Canonical encoding of the cell contents, used as the Q-table index.
    pub fn state_key(&self) -> StateKey {
        StateKey::from_cells(&self.cells)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let divider = "-".repeat(4 * self.size - 1);
        for row in 0..self.size {
            if row > 0 {
                writeln!(f, "{divider}")?;
            }
            let line: Vec<String> = (0..self.size)
                .map(|col| self.cells[self.index(row, col)].to_char().to_string())
                .collect();
            writeln!(f, "{}", line.join(" | "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(grid: &mut Grid, coords: &[(usize, usize)], player: Player) {
        for &(row, col) in coords {
            assert!(grid.apply_move(Coord::new(row, col), player));
        }
    }

    #[test]
    fn test_size_validation() {
        assert!(Grid::new(2).is_err());
        assert!(Grid::new(3).is_ok());
        assert!(Grid::new(50).is_ok());
    }

    #[test]
    fn test_win_rule_selection() {
        assert_eq!(Grid::new(3).unwrap().rule(), WinRule::FullLine);
        assert_eq!(Grid::new(4).unwrap().rule(), WinRule::FullLine);
        assert_eq!(Grid::new(5).unwrap().rule(), WinRule::RunOf(WIN_RUN_LENGTH));
        assert_eq!(
            Grid::new(50).unwrap().rule(),
            WinRule::RunOf(WIN_RUN_LENGTH)
        );
    }

    #[test]
    fn test_apply_move_rejects_occupied_and_out_of_bounds() {
        let mut grid = Grid::new(3).unwrap();
        assert!(grid.apply_move(Coord::new(0, 0), Player::X));
        assert!(!grid.apply_move(Coord::new(0, 0), Player::O));
        assert!(!grid.apply_move(Coord::new(3, 0), Player::O));
        assert!(!grid.apply_move(Coord::new(0, 3), Player::O));
        assert_eq!(grid.cell(Coord::new(0, 0)), Some(Cell::X));
        assert_eq!(grid.occupied(), 1);
    }

    #[test]
    fn test_occupancy_tracks_successful_moves() {
        let mut grid = Grid::new(3).unwrap();
        place(&mut grid, &[(0, 0), (1, 1)], Player::X);
        place(&mut grid, &[(2, 2)], Player::O);
        // Rejected moves leave occupancy untouched.
        assert!(!grid.apply_move(Coord::new(1, 1), Player::O));
        assert_eq!(grid.occupied(), 3);
    }

    #[test]
    fn test_legal_moves_row_major_order() {
        let mut grid = Grid::new(3).unwrap();
        place(&mut grid, &[(0, 1), (1, 0)], Player::X);
        let moves = grid.legal_moves();
        let mut sorted = moves.clone();
        sorted.sort();
        assert_eq!(moves, sorted);
        assert_eq!(moves.len(), 7);
        assert_eq!(moves[0], Coord::new(0, 0));
        assert_eq!(moves[1], Coord::new(0, 2));
    }

    #[test]
    fn test_full_line_row_win() {
        let mut grid = Grid::new(3).unwrap();
        place(&mut grid, &[(0, 0), (0, 1), (0, 2)], Player::X);
        assert_eq!(grid.winner(), Some(Player::X));
    }

    #[test]
    fn test_full_line_column_and_diagonals() {
        let mut grid = Grid::new(3).unwrap();
        place(&mut grid, &[(0, 1), (1, 1), (2, 1)], Player::O);
        assert_eq!(grid.winner(), Some(Player::O));

        let mut grid = Grid::new(3).unwrap();
        place(&mut grid, &[(0, 0), (1, 1), (2, 2)], Player::X);
        assert_eq!(grid.winner(), Some(Player::X));

        let mut grid = Grid::new(3).unwrap();
        place(&mut grid, &[(0, 2), (1, 1), (2, 0)], Player::O);
        assert_eq!(grid.winner(), Some(Player::O));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        // X O X
        // X O O
        // O X X
        let mut grid = Grid::new(3).unwrap();
        place(&mut grid, &[(0, 0), (0, 2), (1, 0), (2, 1), (2, 2)], Player::X);
        place(&mut grid, &[(0, 1), (1, 1), (1, 2), (2, 0)], Player::O);
        assert_eq!(grid.winner(), None);
        assert!(grid.is_full());
    }

    #[test]
    fn test_run_of_five_in_row() {
        let mut grid = Grid::new(50).unwrap();
        place(
            &mut grid,
            &[(7, 10), (7, 11), (7, 12), (7, 13), (7, 14)],
            Player::X,
        );
        assert_eq!(grid.winner(), Some(Player::X));
    }

    #[test]
    fn test_run_of_five_in_column_and_diagonals() {
        let mut grid = Grid::new(50).unwrap();
        place(
            &mut grid,
            &[(10, 3), (11, 3), (12, 3), (13, 3), (14, 3)],
            Player::O,
        );
        assert_eq!(grid.winner(), Some(Player::O));

        let mut grid = Grid::new(50).unwrap();
        place(
            &mut grid,
            &[(20, 20), (21, 21), (22, 22), (23, 23), (24, 24)],
            Player::X,
        );
        assert_eq!(grid.winner(), Some(Player::X));

        let mut grid = Grid::new(50).unwrap();
        place(
            &mut grid,
            &[(30, 10), (31, 9), (32, 8), (33, 7), (34, 6)],
            Player::O,
        );
        assert_eq!(grid.winner(), Some(Player::O));
    }

    #[test]
    fn test_four_in_a_row_is_not_a_win() {
        let mut grid = Grid::new(50).unwrap();
        place(&mut grid, &[(0, 0), (0, 1), (0, 2), (0, 3)], Player::X);
        assert_eq!(grid.winner(), None);

        let mut grid = Grid::new(50).unwrap();
        place(&mut grid, &[(5, 5), (6, 6), (7, 7), (8, 8)], Player::O);
        assert_eq!(grid.winner(), None);
    }

    #[test]
    fn test_run_interrupted_by_opponent() {
        let mut grid = Grid::new(50).unwrap();
        place(&mut grid, &[(0, 0), (0, 1), (0, 3), (0, 4)], Player::X);
        place(&mut grid, &[(0, 2)], Player::O);
        assert_eq!(grid.winner(), None);
    }

    #[test]
    fn test_state_key_move_order_independent() {
        let mut a = Grid::new(3).unwrap();
        a.apply_move(Coord::new(0, 0), Player::X);
        a.apply_move(Coord::new(2, 2), Player::O);

        let mut b = Grid::new(3).unwrap();
        b.apply_move(Coord::new(2, 2), Player::O);
        b.apply_move(Coord::new(0, 0), Player::X);

        assert_eq!(a.state_key(), b.state_key());
    }

    #[test]
    fn test_state_key_injective_over_contents() {
        let empty = Grid::new(3).unwrap();
        let mut with_x = Grid::new(3).unwrap();
        with_x.apply_move(Coord::new(1, 1), Player::X);
        let mut with_o = Grid::new(3).unwrap();
        with_o.apply_move(Coord::new(1, 1), Player::O);

        assert_ne!(empty.state_key(), with_x.state_key());
        assert_ne!(with_x.state_key(), with_o.state_key());
        assert_eq!(with_x.state_key().as_str(), "....X....");
    }

    #[test]
    fn test_reset_clears_all_cells() {
        let mut grid = Grid::new(3).unwrap();
        place(&mut grid, &[(0, 0), (1, 1)], Player::X);
        grid.reset();
        assert_eq!(grid.occupied(), 0);
        assert_eq!(grid.legal_moves().len(), 9);
    }
}
