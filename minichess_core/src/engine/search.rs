use crate::engine::config::EngineConfig;
use crate::engine::eval::MaterialEvaluator;
use crate::engine::{Evaluator, SearchResult, Searcher};
use crate::logic::board::{Board, Team};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::is_in_check;
use log::debug;
use std::sync::Arc;

// Symmetric under negation, unlike i32::MIN.
const INFINITY: i32 = i32::MAX;

/// Fixed-depth negamax with alpha-beta pruning.
///
/// Moves are tried in generator order and the root keeps the first of
/// equally scored moves, so the chosen move and score match a plain minimax
/// over the same tree.
pub struct AlphaBetaEngine {
    config: Arc<EngineConfig>,
    evaluator: MaterialEvaluator,
    generator: MoveGenerator,
    nodes_evaluated: u64,
}

impl AlphaBetaEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: MaterialEvaluator::new(Arc::clone(&config)),
            config,
            generator: MoveGenerator::new(),
            nodes_evaluated: 0,
        }
    }

    fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        turn: Team,
        ply: i32,
    ) -> i32 {
        if depth == 0 {
            self.nodes_evaluated += 1;
            if !self.generator.has_legal_moves(board, turn) {
                return self.terminal_score(board, turn, ply);
            }
            return self.evaluator.evaluate(board, turn);
        }

        let moves = self.generator.legal_moves(board, turn);
        if moves.is_empty() {
            self.nodes_evaluated += 1;
            return self.terminal_score(board, turn, ply);
        }

        let mut best = -INFINITY;
        for mv in &moves {
            let captured = board.apply(mv);
            let score = -self.alpha_beta(board, depth - 1, -beta, -alpha, turn.opposite(), ply + 1);
            board.undo(mv, captured);

            best = best.max(score);
            alpha = alpha.max(best);
            if alpha >= beta {
                break;
            }
        }
        best
    }

    /// Score of a position with no legal moves, from the side to move.
    /// Mates found closer to the root score further from zero.
    fn terminal_score(&self, board: &Board, turn: Team, ply: i32) -> i32 {
        if is_in_check(board, turn) {
            -(self.config.mate_score - ply)
        } else {
            0
        }
    }
}

impl Searcher for AlphaBetaEngine {
    fn search(&mut self, board: &Board, side: Team, depth: u8) -> SearchResult {
        let depth = depth.max(1);
        self.nodes_evaluated = 0;

        let mut board = board.clone();
        let moves = self.generator.legal_moves(&board, side);
        if moves.is_empty() {
            return SearchResult {
                best_move: None,
                score: self.terminal_score(&board, side, 0),
                nodes_evaluated: 1,
            };
        }

        let mut alpha = -INFINITY;
        let mut best_score = -INFINITY;
        let mut best_move = None;

        for mv in &moves {
            let captured = board.apply(mv);
            let score =
                -self.alpha_beta(&mut board, depth - 1, -INFINITY, -alpha, side.opposite(), 1);
            board.undo(mv, captured);

            // Strict: the first move in generator order wins ties.
            if score > best_score {
                best_score = score;
                best_move = Some(*mv);
            }
            alpha = alpha.max(best_score);
        }

        debug!(
            "{} depth {depth}: best {:?} score {best_score} nodes {}",
            side.name(),
            best_move.map(|mv| (mv.from, mv.to)),
            self.nodes_evaluated
        );

        SearchResult {
            best_move,
            score: best_score,
            nodes_evaluated: self.nodes_evaluated,
        }
    }
}
