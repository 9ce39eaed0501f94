mod board;
mod bot_controller;
mod game_state;
mod heuristics;
mod search;
mod types;
mod validate;
mod win_detector;

pub use board::Board;
pub use bot_controller::{BotSettings, calculate_move};
pub use game_state::{TurnRequest, TurnResult, play_turn};
pub use heuristics::calculate_heuristic_move;
pub use search::{BOT_MARK, HUMAN_MARK, best_move_optimal, find_winning_move, minimax_score};
pub use types::{Difficulty, GameMode, Mark, OpeningPolicy, Outcome};
pub use validate::{MoveError, parse_board, parse_index, parse_turn};
pub use win_detector::{CELL_COUNT, LINES, check_win, check_win_with_line};
