//! JSON contract between the HTTP server and its clients.

use minichess_core::logic::board::{Piece, PieceKind, Square, Team, ROWS};
use minichess_core::logic::game::{CheckStatus, GameMode, GameSession};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceView {
    pub team: Team,
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub value: u32,
    pub has_moved: bool,
}

impl From<Piece> for PieceView {
    fn from(piece: Piece) -> Self {
        Self {
            team: piece.team,
            kind: piece.kind,
            value: piece.kind.value(),
            has_moved: piece.has_moved,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateView {
    pub game_id: String,
    /// Rows top (Black's back rank) to bottom.
    pub board: Vec<Vec<Option<PieceView>>>,
    pub turn: Team,
    pub selected_piece: Option<Square>,
    pub valid_moves: Vec<Square>,
    pub last_move: Option<(Square, Square)>,
    pub game_over: bool,
    pub message: String,
    pub ai_thinking: bool,
    pub check: CheckStatus,
    pub nodes_evaluated: Option<u64>,
}

impl GameStateView {
    pub fn from_session(game_id: &str, session: &GameSession, ai_thinking: bool) -> Self {
        let board = (0..ROWS)
            .map(|row| {
                session
                    .board()
                    .rank(row)
                    .iter()
                    .map(|cell| cell.map(PieceView::from))
                    .collect()
            })
            .collect();

        Self {
            game_id: game_id.to_string(),
            board,
            turn: session.turn(),
            selected_piece: session.selected(),
            valid_moves: session.valid_moves().to_vec(),
            last_move: session.last_move().map(|mv| (mv.from, mv.to)),
            game_over: session.is_game_over(),
            message: session.message().to_string(),
            ai_thinking,
            check: session.check(),
            nodes_evaluated: session.nodes_evaluated(),
        }
    }
}

const fn default_depth() -> u8 {
    2
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitRequest {
    #[serde(default)]
    pub mode: GameMode,
    #[serde(default = "default_depth")]
    pub ai_depth_white: u8,
    #[serde(default = "default_depth")]
    pub ai_depth_black: u8,
}

/// Raw coordinates; the server bounds-checks them into a [`Square`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectRequest {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
