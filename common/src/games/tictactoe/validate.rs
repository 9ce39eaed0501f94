use std::fmt;

use super::board::Board;
use super::types::Mark;
use super::win_detector::CELL_COUNT;

/// Rejections of a client-submitted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    MalformedRequest(String),
    InvalidBoard,
    InvalidCell(String),
    InvalidIndex,
    CellOccupied,
    InvalidTurn,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::MalformedRequest(reason) => write!(f, "Malformed request: {}", reason),
            MoveError::InvalidBoard => write!(f, "Invalid board"),
            MoveError::InvalidCell(value) => write!(f, "Invalid cell value '{}'", value),
            MoveError::InvalidIndex => write!(f, "Invalid index"),
            MoveError::CellOccupied => write!(f, "Cell already taken"),
            MoveError::InvalidTurn => write!(f, "Invalid turn"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Accepts exactly nine cells of `""`, `"X"`, `"O"` or null (read as empty).
pub fn parse_board(cells: Option<&[Option<String>]>) -> Result<Board, MoveError> {
    let cells = match cells {
        Some(cells) if cells.len() == CELL_COUNT => cells,
        _ => return Err(MoveError::InvalidBoard),
    };

    let mut marks = [Mark::Empty; CELL_COUNT];
    for (mark, cell) in marks.iter_mut().zip(cells) {
        *mark = match cell.as_deref() {
            None => Mark::Empty,
            Some(token) => {
                Mark::from_token(token).ok_or_else(|| MoveError::InvalidCell(token.to_string()))?
            }
        };
    }
    Ok(Board::from_cells(marks))
}

pub fn parse_index(index: Option<i64>) -> Result<usize, MoveError> {
    match index {
        Some(index) if (0..CELL_COUNT as i64).contains(&index) => Ok(index as usize),
        _ => Err(MoveError::InvalidIndex),
    }
}

pub fn parse_turn(turn: &str) -> Result<Mark, MoveError> {
    Mark::player_from_token(turn).ok_or(MoveError::InvalidTurn)
}
