use crate::logic::board::{Board, Piece, PieceKind, Square, Team};
use serde::{Deserialize, Serialize};

pub mod config;
pub mod eval;
pub mod move_list;
pub mod search;

/// A transition between two squares. `piece` is the mover exactly as it stood
/// before the move, which is what [`Board::undo`] puts back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promotion: Option<PieceKind>,
}

impl Move {
    #[must_use]
    pub const fn quiet(from: Square, to: Square, piece: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            captured: None,
            promotion: None,
        }
    }

    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub nodes_evaluated: u64,
}

pub trait Evaluator {
    /// Static score of `board` from `perspective`'s point of view.
    fn evaluate(&self, board: &Board, perspective: Team) -> i32;
}

pub trait Searcher {
    fn search(&mut self, board: &Board, side: Team, depth: u8) -> SearchResult;
}
