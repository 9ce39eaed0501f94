use crate::games::SessionRng;
use super::board::Board;
use super::search::{BOT_MARK, HUMAN_MARK, find_winning_move};
use super::win_detector::{CENTER, CORNERS, EDGES};

/// Win now, else block, else center, else a random corner, else a random edge.
pub fn calculate_heuristic_move(board: &mut Board, rng: &mut SessionRng) -> Option<usize> {
    if let Some(index) = find_winning_move(board, BOT_MARK) {
        return Some(index);
    }

    if let Some(index) = find_winning_move(board, HUMAN_MARK) {
        return Some(index);
    }

    if board.is_cell_empty(CENTER) {
        return Some(CENTER);
    }

    let corners = empty_among(board, &CORNERS);
    if !corners.is_empty() {
        return rng.choose(&corners);
    }

    let edges = empty_among(board, &EDGES);
    if !edges.is_empty() {
        return rng.choose(&edges);
    }

    rng.choose(&board.empty_cells())
}

fn empty_among(board: &Board, cells: &[usize]) -> Vec<usize> {
    cells
        .iter()
        .copied()
        .filter(|&index| board.is_cell_empty(index))
        .collect()
}
