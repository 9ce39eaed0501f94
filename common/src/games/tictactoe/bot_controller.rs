use serde::{Deserialize, Serialize};

use crate::config::{Validate, validate_rate};
use crate::games::SessionRng;
use super::board::Board;
use super::heuristics::calculate_heuristic_move;
use super::search::{BOT_MARK, best_move_optimal, find_winning_move};
use super::types::{Difficulty, OpeningPolicy};

/// Strength knobs shared by every bot decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotSettings {
    /// Chance that a hard bot deliberately skips the optimal move.
    pub mistake_rate: f64,
    /// Chance that a medium bot plays a random cell instead of its heuristic.
    pub blunder_rate: f64,
    pub opening_policy: OpeningPolicy,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            mistake_rate: 0.25,
            blunder_rate: 0.10,
            opening_policy: OpeningPolicy::Varied,
        }
    }
}

impl BotSettings {
    /// Never errs, always opens in the center.
    pub fn perfect() -> Self {
        Self {
            mistake_rate: 0.0,
            blunder_rate: 0.0,
            opening_policy: OpeningPolicy::Center,
        }
    }
}

impl Validate for BotSettings {
    fn validate(&self) -> Result<(), String> {
        validate_rate("mistake_rate", self.mistake_rate)?;
        validate_rate("blunder_rate", self.blunder_rate)?;
        Ok(())
    }
}

/// Picks O's reply. `None` means the board has no empty cell.
pub fn calculate_move(
    difficulty: Difficulty,
    board: &mut Board,
    settings: &BotSettings,
    rng: &mut SessionRng,
) -> Option<usize> {
    match difficulty {
        Difficulty::Easy => calculate_random_move(board, rng),
        Difficulty::Medium => {
            if rng.chance(settings.blunder_rate) {
                calculate_random_move(board, rng)
            } else {
                calculate_heuristic_move(board, rng)
            }
        }
        Difficulty::Hard => {
            if rng.chance(settings.mistake_rate) {
                calculate_mistake_move(board, rng)
            } else {
                best_move_optimal(board, settings.opening_policy, rng)
            }
        }
    }
}

fn calculate_random_move(board: &Board, rng: &mut SessionRng) -> Option<usize> {
    rng.choose(&board.empty_cells())
}

/// A random cell other than an immediate win. The win is only played when
/// it is the last empty cell.
fn calculate_mistake_move(board: &mut Board, rng: &mut SessionRng) -> Option<usize> {
    let mut moves = board.empty_cells();
    rng.shuffle(&mut moves);

    if let Some(win) = find_winning_move(board, BOT_MARK) {
        if moves.len() > 1 {
            moves.retain(|&index| index != win);
        }
    }

    moves.first().copied()
}
