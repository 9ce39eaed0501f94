use crate::games::SessionRng;
use super::board::Board;
use super::types::{Mark, OpeningPolicy, Outcome};
use super::win_detector::CENTER;

/// The bot always plays O and maximizes; the human plays X and minimizes.
pub const BOT_MARK: Mark = Mark::O;
pub const HUMAN_MARK: Mark = Mark::X;

const OPENING_CELLS: [usize; 5] = [0, 2, 4, 6, 8];

/// First empty cell (ascending) that completes a line for `mark`.
pub fn find_winning_move(board: &mut Board, mark: Mark) -> Option<usize> {
    let target = Outcome::from_winner(mark);
    board
        .empty_cells()
        .into_iter()
        .find(|&index| board.with_mark(index, mark, |b| b.winner() == target))
}

/// Exhaustive game value from O's point of view: +1 O wins, -1 X wins, 0 draw.
///
/// Wins are not discounted by depth, so a win in one ply and a win in five
/// score the same.
pub fn minimax_score(board: &mut Board, maximizing: bool) -> i32 {
    match board.winner() {
        Outcome::OWon => return 1,
        Outcome::XWon => return -1,
        Outcome::Draw => return 0,
        Outcome::InProgress => {}
    }

    let moves = board.empty_cells();

    if maximizing {
        let mut best = i32::MIN;
        for index in moves {
            let score = board.with_mark(index, BOT_MARK, |b| minimax_score(b, false));
            best = best.max(score);
        }
        best
    } else {
        let mut best = i32::MAX;
        for index in moves {
            let score = board.with_mark(index, HUMAN_MARK, |b| minimax_score(b, true));
            best = best.min(score);
        }
        best
    }
}

/// Optimal move for O. A blank board is answered from `opening` without
/// searching. Ties go to the lowest index. `None` only when no cell is empty.
pub fn best_move_optimal(
    board: &mut Board,
    opening: OpeningPolicy,
    rng: &mut SessionRng,
) -> Option<usize> {
    if board.is_blank() {
        return match opening {
            OpeningPolicy::Center => Some(CENTER),
            OpeningPolicy::Varied => rng.choose(&OPENING_CELLS),
        };
    }

    let mut best_move = None;
    let mut best_score = i32::MIN;

    for index in board.empty_cells() {
        let score = board.with_mark(index, BOT_MARK, |b| minimax_score(b, false));
        if score > best_score {
            best_score = score;
            best_move = Some(index);
        }
    }

    best_move
}
