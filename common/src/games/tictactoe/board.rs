use std::fmt;

use super::types::{Mark, Outcome};
use super::validate::MoveError;
use super::win_detector::{CELL_COUNT, check_win, check_win_with_line};

/// The 3×3 grid, cells indexed 0..9 in row-major order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Mark::Empty; CELL_COUNT],
        }
    }

    pub fn from_cells(cells: [Mark; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Builds a board from a 9-character pattern such as `"XX..O...."`.
    #[cfg(test)]
    pub fn from_pattern(pattern: &str) -> Self {
        let mut cells = [Mark::Empty; CELL_COUNT];
        for (i, ch) in pattern.chars().enumerate() {
            cells[i] = match ch {
                'X' => Mark::X,
                'O' => Mark::O,
                _ => Mark::Empty,
            };
        }
        Self { cells }
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn is_cell_empty(&self, index: usize) -> bool {
        self.get(index) == Some(Mark::Empty)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&cell| cell == Mark::Empty)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    /// Empty cell indices in ascending order.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Mark::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn winner(&self) -> Outcome {
        if let Some(mark) = check_win(&self.cells) {
            return Outcome::from_winner(mark);
        }
        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    pub fn winning_line(&self) -> Option<[usize; 3]> {
        check_win_with_line(&self.cells).map(|(_, line)| line)
    }

    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), MoveError> {
        match self.cells.get_mut(index) {
            None => Err(MoveError::InvalidIndex),
            Some(cell) if *cell != Mark::Empty => Err(MoveError::CellOccupied),
            Some(cell) => {
                *cell = mark;
                Ok(())
            }
        }
    }

    /// Runs `f` with `mark` speculatively placed at `index`. The cell is
    /// cleared when `f` returns and also when it unwinds.
    ///
    /// `index` must be an empty cell.
    pub fn with_mark<R>(&mut self, index: usize, mark: Mark, f: impl FnOnce(&mut Board) -> R) -> R {
        debug_assert_eq!(self.cells[index], Mark::Empty);
        self.cells[index] = mark;
        let mut placement = Placement { board: self, index };
        f(&mut *placement.board)
    }

    pub fn tokens(&self) -> [&'static str; CELL_COUNT] {
        self.cells.map(|cell| cell.as_str())
    }
}

/// Clears its cell on drop.
struct Placement<'a> {
    board: &'a mut Board,
    index: usize,
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.cells[self.index] = Mark::Empty;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                write!(f, "/")?;
            }
            for cell in chunk {
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_is_in_progress() {
        let board = Board::new();
        assert_eq!(board.winner(), Outcome::InProgress);
        assert_eq!(board.empty_cells(), (0..9).collect::<Vec<_>>());
        assert!(board.is_blank());
    }

    #[test]
    fn test_every_line_is_detected() {
        for (i, pattern) in [
            "XXX......", "...XXX...", "......XXX", "X..X..X..",
            ".X..X..X.", "..X..X..X", "X...X...X", "..X.X.X..",
        ]
        .iter()
        .enumerate()
        {
            let board = Board::from_pattern(pattern);
            assert_eq!(board.winner(), Outcome::XWon, "pattern {}", i);
            assert!(board.winning_line().is_some());
        }
        assert_eq!(Board::from_pattern("OOO.XX.X.").winner(), Outcome::OWon);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board = Board::from_pattern("XOXXOOOXX");
        assert_eq!(board.winner(), Outcome::Draw);
        assert!(board.empty_cells().is_empty());
        assert_eq!(board.winning_line(), None);
    }

    #[test]
    fn test_win_on_full_board_beats_draw() {
        let board = Board::from_pattern("XXXOOXOXO");
        assert_eq!(board.winner(), Outcome::XWon);
    }

    #[test]
    fn test_partial_board_without_line_is_in_progress() {
        let board = Board::from_pattern("XO..X...O");
        assert_eq!(board.winner(), Outcome::InProgress);
        assert_eq!(board.empty_cells(), vec![2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_queries_are_idempotent() {
        let board = Board::from_pattern("X.O.X.O..");
        assert_eq!(board.winner(), board.winner());
        assert_eq!(board.empty_cells(), board.empty_cells());
    }

    #[test]
    fn test_winner_never_reports_both_players() {
        // Every board reachable by alternating play from X.
        fn walk(board: &mut Board, to_move: Mark, seen: &mut usize) {
            *seen += 1;
            let xs = board.cells().iter().filter(|&&c| c == Mark::X).count();
            let os = board.cells().iter().filter(|&&c| c == Mark::O).count();
            assert!(xs == os || xs == os + 1);
            if board.winner().is_terminal() {
                let x_line = crate::games::tictactoe::win_detector::LINES
                    .iter()
                    .any(|l| l.iter().all(|&i| board.cells()[i] == Mark::X));
                let o_line = crate::games::tictactoe::win_detector::LINES
                    .iter()
                    .any(|l| l.iter().all(|&i| board.cells()[i] == Mark::O));
                assert!(!(x_line && o_line));
                return;
            }
            for index in board.empty_cells() {
                let next = to_move.opponent().unwrap();
                board.with_mark(index, to_move, |b| walk(b, next, seen));
            }
        }
        let mut board = Board::new();
        let mut seen = 0;
        walk(&mut board, Mark::X, &mut seen);
        assert_eq!(board, Board::new());
        assert_eq!(seen, 549_946);
    }

    #[test]
    fn test_place_rejects_occupied_and_out_of_range() {
        let mut board = Board::new();
        assert_eq!(board.place(4, Mark::X), Ok(()));
        assert_eq!(board.place(4, Mark::O), Err(MoveError::CellOccupied));
        assert_eq!(board.place(9, Mark::O), Err(MoveError::InvalidIndex));
        assert_eq!(board.get(4), Some(Mark::X));
    }

    #[test]
    fn test_with_mark_restores_cell() {
        let mut board = Board::from_pattern("X........");
        let won = board.with_mark(4, Mark::O, |b| b.get(4));
        assert_eq!(won, Some(Mark::O));
        assert!(board.is_cell_empty(4));
    }

    #[test]
    fn test_with_mark_restores_cell_on_panic() {
        let mut board = Board::from_pattern("X........");
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            board.with_mark(4, Mark::O, |_| -> usize { panic!("search aborted") })
        }));
        assert!(outcome.is_err());
        assert!(board.is_cell_empty(4));
        assert_eq!(board, Board::from_pattern("X........"));
    }

    #[test]
    fn test_tokens_and_display() {
        let board = Board::from_pattern("X...O...X");
        assert_eq!(board.tokens()[0], "X");
        assert_eq!(board.tokens()[1], "");
        assert_eq!(board.to_string(), "X../.O./..X");
    }
}
