use crate::games::SessionRng;
use super::board::Board;
use super::bot_controller::{BotSettings, calculate_move};
use super::search::{BOT_MARK, HUMAN_MARK};
use super::types::{Difficulty, GameMode, Outcome};
use super::validate::{MoveError, parse_turn};

/// One client move against a client-held board.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    pub board: Board,
    pub index: usize,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    /// Only read in local mode; `None` when the client sent no usable token.
    pub turn: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnResult {
    pub board: Board,
    pub outcome: Outcome,
    pub bot_move: Option<usize>,
}

impl TurnResult {
    fn settled(board: Board, bot_move: Option<usize>) -> Self {
        Self {
            outcome: board.winner(),
            board,
            bot_move,
        }
    }
}

/// Applies the human move and, in AI mode, O's answer. A board that is
/// already decided comes back untouched.
pub fn play_turn(
    request: TurnRequest,
    settings: &BotSettings,
    rng: &mut SessionRng,
) -> Result<TurnResult, MoveError> {
    let mut board = request.board;

    if board.winner().is_terminal() {
        return Ok(TurnResult::settled(board, None));
    }

    if !board.is_cell_empty(request.index) {
        return Err(MoveError::CellOccupied);
    }

    if request.mode == GameMode::Local {
        let mark = request
            .turn
            .as_deref()
            .ok_or(MoveError::InvalidTurn)
            .and_then(parse_turn)?;
        board.place(request.index, mark)?;
        return Ok(TurnResult::settled(board, None));
    }

    board.place(request.index, HUMAN_MARK)?;
    if board.winner().is_terminal() {
        return Ok(TurnResult::settled(board, None));
    }

    let bot_move = calculate_move(request.difficulty, &mut board, settings, rng)
        .filter(|&index| board.is_cell_empty(index));
    if let Some(index) = bot_move {
        board.place(index, BOT_MARK)?;
    }

    Ok(TurnResult::settled(board, bot_move))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::types::Mark;

    fn ai_request(pattern: &str, index: usize, difficulty: Difficulty) -> TurnRequest {
        TurnRequest {
            board: Board::from_pattern(pattern),
            index,
            mode: GameMode::Ai,
            difficulty,
            turn: Some("X".to_string()),
        }
    }

    fn local_request(pattern: &str, index: usize, turn: &str) -> TurnRequest {
        TurnRequest {
            board: Board::from_pattern(pattern),
            index,
            mode: GameMode::Local,
            difficulty: Difficulty::Easy,
            turn: Some(turn.to_string()),
        }
    }

    #[test]
    fn test_human_win_skips_bot() {
        let mut rng = SessionRng::new(1);
        let result = play_turn(
            ai_request("XX..O....", 2, Difficulty::Medium),
            &BotSettings::default(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(result.outcome, Outcome::XWon);
        assert_eq!(result.bot_move, None);
        assert_eq!(result.board, Board::from_pattern("XXX.O...."));
    }

    #[test]
    fn test_bot_answers_in_ai_mode() {
        let mut rng = SessionRng::new(2);
        let result = play_turn(
            ai_request(".........", 0, Difficulty::Hard),
            &BotSettings::perfect(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(result.bot_move, Some(4));
        assert_eq!(result.board, Board::from_pattern("X...O...."));
        assert_eq!(result.outcome, Outcome::InProgress);
    }

    #[test]
    fn test_bot_can_win() {
        let mut rng = SessionRng::new(3);
        let result = play_turn(
            ai_request("XX.OO.X..", 8, Difficulty::Hard),
            &BotSettings::perfect(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(result.bot_move, Some(5));
        assert_eq!(result.outcome, Outcome::OWon);
    }

    #[test]
    fn test_human_fills_last_cell_for_draw() {
        let mut rng = SessionRng::new(4);
        let result = play_turn(
            ai_request("XOXXOOOX.", 8, Difficulty::Hard),
            &BotSettings::default(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(result.outcome, Outcome::Draw);
        assert_eq!(result.bot_move, None);
    }

    #[test]
    fn test_occupied_cell_is_rejected() {
        let mut rng = SessionRng::new(5);
        let err = play_turn(
            ai_request("X...O....", 0, Difficulty::Easy),
            &BotSettings::default(),
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(err, MoveError::CellOccupied);
    }

    #[test]
    fn test_finished_board_is_returned_as_is() {
        let mut rng = SessionRng::new(6);
        let result = play_turn(
            ai_request("XXXOO....", 3, Difficulty::Easy),
            &BotSettings::default(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(result.outcome, Outcome::XWon);
        assert_eq!(result.board, Board::from_pattern("XXXOO...."));
        assert_eq!(result.bot_move, None);
    }

    #[test]
    fn test_local_mode_places_turn_mark() {
        let mut rng = SessionRng::new(7);
        let result = play_turn(local_request("X........", 4, "O"), &BotSettings::default(), &mut rng)
            .unwrap();
        assert_eq!(result.board.get(4), Some(Mark::O));
        assert_eq!(result.bot_move, None);
        assert_eq!(result.board.empty_cells().len(), 7);
    }

    #[test]
    fn test_local_mode_detects_win() {
        let mut rng = SessionRng::new(8);
        let result = play_turn(local_request("OO.XX....", 2, "O"), &BotSettings::default(), &mut rng)
            .unwrap();
        assert_eq!(result.outcome, Outcome::OWon);
    }

    #[test]
    fn test_local_mode_rejects_bad_turn() {
        let mut rng = SessionRng::new(9);
        let err = play_turn(local_request(".........", 4, "Z"), &BotSettings::default(), &mut rng)
            .unwrap_err();
        assert_eq!(err, MoveError::InvalidTurn);
    }

    #[test]
    fn test_local_mode_rejects_missing_turn() {
        let mut rng = SessionRng::new(12);
        let request = TurnRequest {
            turn: None,
            ..local_request(".........", 4, "X")
        };
        let err = play_turn(request, &BotSettings::default(), &mut rng).unwrap_err();
        assert_eq!(err, MoveError::InvalidTurn);
    }

    #[test]
    fn test_ai_mode_ignores_missing_turn() {
        let mut rng = SessionRng::new(13);
        let request = TurnRequest {
            turn: None,
            ..ai_request("X........", 8, Difficulty::Hard)
        };
        let result = play_turn(request, &BotSettings::perfect(), &mut rng).unwrap();
        assert_eq!(result.board.get(8), Some(Mark::X));
        assert!(result.bot_move.is_some());
    }

    #[test]
    fn test_occupied_check_precedes_turn_check() {
        let mut rng = SessionRng::new(10);
        let err = play_turn(local_request("X........", 0, "Z"), &BotSettings::default(), &mut rng)
            .unwrap_err();
        assert_eq!(err, MoveError::CellOccupied);
    }

    #[test]
    fn test_bot_never_moves_twice_over_a_game() {
        let mut rng = SessionRng::new(11);
        let mut board = Board::new();
        let settings = BotSettings::default();
        while !board.winner().is_terminal() {
            let index = board.empty_cells()[0];
            let before = board.empty_cells().len();
            let result = play_turn(
                TurnRequest {
                    board,
                    index,
                    mode: GameMode::Ai,
                    difficulty: Difficulty::Hard,
                    turn: Some("X".to_string()),
                },
                &settings,
                &mut rng,
            )
            .unwrap();
            let placed = before - result.board.empty_cells().len();
            assert!(placed == 1 || placed == 2);
            let xs = result.board.cells().iter().filter(|&&c| c == Mark::X).count();
            let os = result.board.cells().iter().filter(|&&c| c == Mark::O).count();
            assert!(os == xs || os + 1 == xs);
            board = result.board;
        }
    }
}
