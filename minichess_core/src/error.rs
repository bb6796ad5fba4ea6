//! Error types for the rules engine and the game session.

use crate::logic::board::{Square, Team};
use thiserror::Error;

/// Errors surfaced by [`GameSession`](crate::logic::game::GameSession) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Coordinates outside the 6x5 board.
    #[error("invalid square ({row}, {col}): board is 6 rows by 5 columns")]
    InvalidSquare { row: usize, col: usize },

    /// Destination not in the legal set of the selected piece, or the piece
    /// does not belong to the side to move.
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    /// A move was requested without selecting the moving piece first.
    #[error("no piece selected for this move")]
    NoSelection,

    /// The game has reached checkmate or stalemate.
    #[error("game is already over")]
    GameAlreadyOver,

    /// `ai_move` was requested while a human controls the side to move.
    #[error("{0:?} is not controlled by the engine in this game")]
    NotAiTurn(Team),

    /// Search depth must be at least one ply.
    #[error("invalid search depth {0}: must be at least 1")]
    InvalidDepth(u8),

    /// The search found no move in a position the detector reported as ongoing.
    #[error("search returned no move in a non-terminal position")]
    SearchInvariantViolation,
}

impl GameError {
    /// Expected interaction noise: the session state is left untouched and the
    /// caller should simply be shown the current state again.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::IllegalMove { .. } | Self::NoSelection)
    }
}

/// Errors from parsing the compact board notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 6 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not describe exactly 5 squares")]
    RankWidth { rank: usize },

    #[error("unknown piece character '{0}'")]
    UnknownPiece(char),

    #[error("missing or invalid side to move")]
    SideToMove,

    #[error("{0:?} must have exactly one king")]
    KingCount(Team),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        let a = Square::new(4, 2).unwrap();
        let b = Square::new(1, 2).unwrap();
        assert!(GameError::IllegalMove { from: a, to: b }.is_recoverable());
        assert!(GameError::NoSelection.is_recoverable());
        assert!(!GameError::GameAlreadyOver.is_recoverable());
        assert!(!GameError::SearchInvariantViolation.is_recoverable());
    }

    #[test]
    fn test_error_messages() {
        let err = GameError::InvalidSquare { row: 6, col: 0 };
        assert!(err.to_string().contains("(6, 0)"));
        let err = GameError::IllegalMove {
            from: Square::new(4, 2).unwrap(),
            to: Square::new(1, 2).unwrap(),
        };
        assert_eq!(err.to_string(), "illegal move from (4, 2) to (1, 2)");
    }
}
