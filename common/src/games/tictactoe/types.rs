use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    /// Wire token: `""`, `"X"` or `"O"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::Empty => "",
            Mark::X => "X",
            Mark::O => "O",
        }
    }

    pub fn from_token(token: &str) -> Option<Mark> {
        match token {
            "" => Some(Mark::Empty),
            "X" => Some(Mark::X),
            "O" => Some(Mark::O),
            _ => None,
        }
    }

    /// Parses a player token; `Empty` is not a player.
    pub fn player_from_token(token: &str) -> Option<Mark> {
        match Mark::from_token(token) {
            Some(Mark::Empty) | None => None,
            player => player,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::Empty => write!(f, "."),
            mark => write!(f, "{}", mark.as_str()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    XWon,
    OWon,
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        *self != Outcome::InProgress
    }

    pub fn from_winner(mark: Mark) -> Self {
        match mark {
            Mark::X => Outcome::XWon,
            Mark::O => Outcome::OWon,
            Mark::Empty => Outcome::InProgress,
        }
    }

    /// Wire token for the `winner` field; `None` while the game is running.
    pub fn token(&self) -> Option<&'static str> {
        match self {
            Outcome::InProgress => None,
            Outcome::XWon => Some("X"),
            Outcome::OWon => Some("O"),
            Outcome::Draw => Some("DRAW"),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token().unwrap_or("in progress"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Case-insensitive; anything unrecognized (or absent) plays as `Easy`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
            Some("hard") => Difficulty::Hard,
            Some("medium") => Difficulty::Medium,
            _ => Difficulty::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// How the optimal bot answers a completely empty board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningPolicy {
    /// Always the center cell.
    Center,
    /// Uniformly one of the corners or the center.
    #[default]
    Varied,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    /// Human is X, bot answers as O.
    Ai,
    /// Two humans share the board; the client says whose turn it is.
    Local,
}

impl GameMode {
    /// Only `"local"` selects hot-seat play, everything else is a bot game.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("local") => GameMode::Local,
            _ => GameMode::Ai,
        }
    }
}
