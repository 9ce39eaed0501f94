use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::games::tictactoe::{
    Board, CELL_COUNT, Difficulty, GameMode, MoveError, TurnRequest, TurnResult, parse_board,
    parse_index, play_turn,
};
use common::log;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::web_server::WebServerState;

/// Raw `POST /move` body. Fields stay loosely typed so that shape errors turn
/// into the matching validation message instead of a generic parse failure.
#[derive(Debug, Deserialize)]
pub struct MoveRequestBody {
    pub board: Option<Value>,
    pub index: Option<Value>,
    pub difficulty: Option<Value>,
    pub mode: Option<Value>,
    /// `null` stays `Value::Null`; only an absent key means `"X"`.
    #[serde(default = "default_turn")]
    pub turn: Value,
}

fn default_turn() -> Value {
    Value::String("X".to_string())
}

#[derive(Debug, Serialize)]
pub struct MoveResponseBody {
    pub board: [&'static str; CELL_COUNT],
    pub winner: Option<&'static str>,
}

impl From<&TurnResult> for MoveResponseBody {
    fn from(result: &TurnResult) -> Self {
        Self {
            board: result.board.tokens(),
            winner: result.outcome.token(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub struct ApiError(MoveError);

impl From<MoveError> for ApiError {
    fn from(err: MoveError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

pub async fn health_handler() -> &'static str {
    "ok"
}

/// The body is read as JSON whatever the `Content-Type` says.
pub async fn move_handler(
    State(state): State<WebServerState>,
    body: Bytes,
) -> Result<Json<MoveResponseBody>, ApiError> {
    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(err) => {
            log!("Rejected move request: {}", err);
            return Err(err.into());
        }
    };

    let mode = request.mode;
    let index = request.index;
    let difficulty = request.difficulty;

    let mut rng = state.request_rng();
    let seed = rng.seed();
    let result = match play_turn(request, &state.bot_settings, &mut rng) {
        Ok(result) => result,
        Err(err) => {
            log!("Rejected {:?} move at {}: {}", mode, index, err);
            return Err(err.into());
        }
    };

    if mode == GameMode::Ai && result.bot_move.is_none() && !result.outcome.is_terminal() {
        log!("Bot found no move on {}", result.board);
    }

    log!(
        "{:?} move at {} ({}, seed {}), bot {:?}, board {}, outcome {}, line {:?}",
        mode,
        index,
        difficulty,
        seed,
        result.bot_move,
        result.board,
        result.outcome,
        result.board.winning_line()
    );

    Ok(Json(MoveResponseBody::from(&result)))
}

fn parse_request(body: &[u8]) -> Result<TurnRequest, MoveError> {
    let body: MoveRequestBody =
        serde_json::from_slice(body).map_err(|e| MoveError::MalformedRequest(e.to_string()))?;

    let board = read_board(body.board.as_ref())?;
    let index = parse_index(body.index.as_ref().and_then(Value::as_i64))?;

    Ok(TurnRequest {
        board,
        index,
        mode: GameMode::from_label(body.mode.as_ref().and_then(Value::as_str)),
        difficulty: Difficulty::from_label(body.difficulty.as_ref().and_then(Value::as_str)),
        turn: body.turn.as_str().map(str::to_string),
    })
}

fn read_board(value: Option<&Value>) -> Result<Board, MoveError> {
    let cells = match value.and_then(Value::as_array) {
        Some(cells) if cells.len() == CELL_COUNT => cells,
        _ => return Err(MoveError::InvalidBoard),
    };

    let cells = cells
        .iter()
        .map(|cell| match cell {
            Value::Null => Ok(None),
            Value::String(token) => Ok(Some(token.clone())),
            other => Err(MoveError::InvalidCell(other.to_string())),
        })
        .collect::<Result<Vec<_>, _>>()?;

    parse_board(Some(cells.as_slice()))
}
