use minichess_core::engine::config::EngineConfig;
use minichess_core::engine::search::AlphaBetaEngine;
use minichess_core::engine::Searcher;
use minichess_core::logic::board::{Board, Square};
use std::sync::Arc;

fn sq(row: usize, col: usize) -> Square {
    Square::new(row, col).unwrap()
}

fn engine() -> AlphaBetaEngine {
    AlphaBetaEngine::new(Arc::new(EngineConfig::default()))
}

#[test]
fn prefers_the_shorter_mate() {
    // Rook to (0,4) mates at once; deeper searches also see slower mates.
    let (board, turn) = Board::from_fen("k4/5/1K3/5/5/4R w").unwrap();
    let mate = EngineConfig::default().mate_score;

    for depth in 2..=4 {
        let result = engine().search(&board, turn, depth);
        let mv = result.best_move.unwrap();
        assert_eq!((mv.from, mv.to), (sq(5, 4), sq(0, 4)), "depth {depth}");
        assert_eq!(result.score, mate - 1, "depth {depth}");
    }
}

#[test]
fn defender_sees_mate_coming() {
    // Black to move with the rook mate threatened next ply; every reply loses.
    let (board, turn) = Board::from_fen("k4/5/1K3/5/5/4R b").unwrap();
    let mate = EngineConfig::default().mate_score;

    let result = engine().search(&board, turn, 2);
    assert!(result.best_move.is_some());
    assert_eq!(result.score, -(mate - 2));
}

#[test]
fn mate_score_follows_config() {
    let config = EngineConfig {
        mate_score: 50_000,
        ..EngineConfig::default()
    };
    let (board, turn) = Board::from_fen("k3R/5/1K3/5/5/5 b").unwrap();
    let result = AlphaBetaEngine::new(Arc::new(config)).search(&board, turn, 2);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, -50_000);
}
