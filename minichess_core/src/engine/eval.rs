use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{Board, Piece, PieceKind, Square, Team, COLS, ROWS};
use crate::logic::lookup::AttackTables;
use crate::logic::rules::is_in_check;
use std::sync::Arc;

/// Material plus small positional terms: central occupation, pawn
/// advancement, pawn structure and king safety.
pub struct MaterialEvaluator {
    config: Arc<EngineConfig>,
}

impl MaterialEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    fn piece_score(&self, sq: Square, piece: Piece) -> i32 {
        let mut score = self.config.piece_value(piece.kind);

        // Central block: rows 1-4, cols 1-3
        if (1..ROWS - 1).contains(&sq.row()) && (1..COLS - 1).contains(&sq.col()) {
            score += self.config.center_bonus;
        }

        if piece.kind == PieceKind::Pawn {
            #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
            let advanced = sq.row().abs_diff(piece.team.pawn_row()) as i32;
            score += advanced * self.config.pawn_advance_bonus;
        }

        score
    }

    /// Doubled and isolated pawns, each charged once per file.
    fn pawn_structure(&self, board: &Board, team: Team) -> i32 {
        let mut files = [0u8; COLS];
        for (sq, piece) in board.pieces(team) {
            if piece.kind == PieceKind::Pawn {
                if let Some(count) = files.get_mut(sq.col()) {
                    *count += 1;
                }
            }
        }

        let pawns_on = |col: Option<usize>| col.and_then(|c| files.get(c)).copied().unwrap_or(0);
        let mut score = 0;
        for col in 0..COLS {
            let here = pawns_on(Some(col));
            if here > 1 {
                score -= self.config.doubled_pawn_penalty;
            }
            if here > 0 && pawns_on(col.checked_sub(1)) == 0 && pawns_on(Some(col + 1)) == 0 {
                score -= self.config.isolated_pawn_penalty;
            }
        }
        score
    }

    fn king_safety(&self, board: &Board, team: Team) -> i32 {
        let Some(king) = board.king_square(team) else {
            return 0;
        };

        let shield = AttackTables::get()
            .king(king)
            .iter()
            .filter(|&&sq| {
                board
                    .piece_at(sq)
                    .is_some_and(|p| p.team == team && p.kind == PieceKind::Pawn)
            })
            .count();
        #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        let mut score = shield as i32 * self.config.king_shield_bonus;

        let file_closed = (0..ROWS)
            .filter_map(|row| Square::new(row, king.col()))
            .any(|sq| board.piece_at(sq).is_some_and(|p| p.kind == PieceKind::Pawn));
        if !file_closed {
            score -= self.config.open_king_file_penalty;
        }

        if is_in_check(board, team) {
            score -= self.config.check_penalty;
        }
        score
    }

    fn side_total(&self, board: &Board, team: Team) -> i32 {
        let pieces: i32 = board
            .pieces(team)
            .map(|(sq, piece)| self.piece_score(sq, piece))
            .sum();
        pieces + self.pawn_structure(board, team) + self.king_safety(board, team)
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board, perspective: Team) -> i32 {
        self.side_total(board, perspective) - self.side_total(board, perspective.opposite())
    }
}
