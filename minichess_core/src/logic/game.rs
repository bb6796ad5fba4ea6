use crate::engine::config::EngineConfig;
use crate::engine::move_list::MoveList;
use crate::engine::search::AlphaBetaEngine;
use crate::engine::{Move, SearchResult, Searcher};
use crate::error::GameError;
use crate::logic::board::{Board, Square, Team};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::{game_status, is_in_check};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    Checkmate(Team), // Winner
    Stalemate,
}

impl GameStatus {
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckStatus {
    pub white: bool,
    pub black: bool,
}

impl CheckStatus {
    pub fn of(board: &Board) -> Self {
        Self {
            white: is_in_check(board, Team::White),
            black: is_in_check(board, Team::Black),
        }
    }

    pub const fn for_team(self, team: Team) -> bool {
        match team {
            Team::White => self.white,
            Team::Black => self.black,
        }
    }
}

/// Who controls each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Human plays White, the engine plays Black.
    #[default]
    Ai,
    Human,
    AiVsAi,
}

impl GameMode {
    pub const fn is_engine_controlled(self, team: Team) -> bool {
        match self {
            Self::Ai => matches!(team, Team::Black),
            Self::Human => false,
            Self::AiVsAi => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    pub depth_white: u8,
    pub depth_black: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Ai,
            depth_white: 2,
            depth_black: 2,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        for depth in [self.depth_white, self.depth_black] {
            if depth == 0 {
                return Err(GameError::InvalidDepth(depth));
            }
        }
        Ok(())
    }

    pub const fn depth_for(&self, team: Team) -> u8 {
        match team {
            Team::White => self.depth_white,
            Team::Black => self.depth_black,
        }
    }
}

/// Interaction phase, derived from the session fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingSelection,
    PieceSelected(Square),
    GameOver(GameStatus),
}

/// One game: the board plus turn order, the current selection and the
/// outcome. All mutation goes through [`select`](Self::select),
/// [`make_move`](Self::make_move) and [`ai_move`](Self::ai_move).
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    turn: Team,
    selected: Option<Square>,
    valid_moves: Vec<Square>,
    status: GameStatus,
    last_move: Option<Move>,
    check: CheckStatus,
    config: GameConfig,
    message: String,
    nodes_evaluated: Option<u64>,
    engine_config: Arc<EngineConfig>,
}

impl GameSession {
    /// Starting position, White to move.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_engine_config(config, Arc::new(EngineConfig::default()))
    }

    pub fn with_engine_config(
        config: GameConfig,
        engine_config: Arc<EngineConfig>,
    ) -> Result<Self, GameError> {
        let mut session = Self::from_position(Board::new(), Team::White, config)?;
        session.engine_config = engine_config;
        Ok(session)
    }

    /// A session resuming from an arbitrary position. Check and status are
    /// computed for `turn`, so a terminal position starts out finished.
    pub fn from_position(board: Board, turn: Team, config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let check = CheckStatus::of(&board);
        let status = game_status(&board, turn);
        Ok(Self {
            message: status_message(status, turn, check),
            board,
            turn,
            selected: None,
            valid_moves: Vec::new(),
            status,
            last_move: None,
            check,
            config,
            nodes_evaluated: None,
            engine_config: Arc::new(EngineConfig::default()),
        })
    }

    pub const fn board(&self) -> &Board {
        &self.board
    }

    pub const fn turn(&self) -> Team {
        self.turn
    }

    pub const fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn valid_moves(&self) -> &[Square] {
        &self.valid_moves
    }

    pub const fn status(&self) -> GameStatus {
        self.status
    }

    pub const fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub const fn check(&self) -> CheckStatus {
        self.check
    }

    pub const fn config(&self) -> GameConfig {
        self.config
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Node count of the most recent engine move, if there has been one.
    pub const fn nodes_evaluated(&self) -> Option<u64> {
        self.nodes_evaluated
    }

    pub const fn is_game_over(&self) -> bool {
        self.status.is_over()
    }

    pub const fn is_ai_turn(&self) -> bool {
        !self.status.is_over() && self.config.mode.is_engine_controlled(self.turn)
    }

    pub const fn phase(&self) -> Phase {
        if self.status.is_over() {
            return Phase::GameOver(self.status);
        }
        match self.selected {
            Some(sq) => Phase::PieceSelected(sq),
            None => Phase::AwaitingSelection,
        }
    }

    /// All legal moves of the side to move, in generator order.
    pub fn legal_moves(&self) -> MoveList {
        MoveGenerator::new().legal_moves(&self.board, self.turn)
    }

    /// Selects a piece of the side to move and caches its legal destinations.
    ///
    /// Selecting an empty square or an enemy piece is not an error: the
    /// previous selection stays and only the message changes.
    pub fn select(&mut self, square: Square) -> Result<(), GameError> {
        self.ensure_ongoing()?;

        match self.board.piece_at(square) {
            Some(piece) if piece.team == self.turn => {
                self.selected = Some(square);
                self.valid_moves = MoveGenerator::new().legal_moves_from(&self.board, square);
                self.message = status_message(self.status, self.turn, self.check);
            }
            _ => {
                debug!("Ignoring selection of {square} for {}", self.turn.name());
                self.message = "Invalid piece selection".to_string();
            }
        }
        Ok(())
    }

    /// Plays `from -> to` for the side to move.
    ///
    /// `from` must be the selected square. In a human-vs-human game a move
    /// may also be submitted with nothing selected. On rejection the board,
    /// turn and selection are left as they were.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<Move, GameError> {
        self.ensure_ongoing()?;

        match self.selected {
            Some(sel) if sel == from => {}
            None if self.config.mode == GameMode::Human => {}
            _ => {
                warn!("Rejected move {from} -> {to}: piece not selected");
                self.message = "Piece not selected".to_string();
                return Err(GameError::NoSelection);
            }
        }

        let Some(mv) = MoveGenerator::new().find_legal_move(&self.board, from, to, self.turn)
        else {
            warn!("Rejected illegal move {from} -> {to} for {}", self.turn.name());
            self.message = "Invalid move".to_string();
            return Err(GameError::IllegalMove { from, to });
        };

        self.commit(mv);
        Ok(mv)
    }

    /// Lets the engine play for the side to move, at that side's depth.
    pub fn ai_move(&mut self) -> Result<SearchResult, GameError> {
        self.ensure_ongoing()?;
        if !self.config.mode.is_engine_controlled(self.turn) {
            warn!("Rejected engine move: {} is human-controlled", self.turn.name());
            return Err(GameError::NotAiTurn(self.turn));
        }

        let depth = self.config.depth_for(self.turn);
        let mut engine = AlphaBetaEngine::new(Arc::clone(&self.engine_config));
        let result = engine.search(&self.board, self.turn, depth);

        let Some(mv) = result.best_move else {
            error!(
                "Search for {} at depth {depth} returned no move in an ongoing game: {}",
                self.turn.name(),
                self.board.to_fen_string(self.turn)
            );
            return Err(GameError::SearchInvariantViolation);
        };

        self.nodes_evaluated = Some(result.nodes_evaluated);
        self.commit(mv);
        Ok(result)
    }

    fn ensure_ongoing(&self) -> Result<(), GameError> {
        if self.status.is_over() {
            warn!("Rejected request: game is over ({:?})", self.status);
            return Err(GameError::GameAlreadyOver);
        }
        Ok(())
    }

    fn commit(&mut self, mv: Move) {
        let mover = self.turn;
        self.board.apply(&mv);

        self.check = CheckStatus::of(&self.board);
        self.status = game_status(&self.board, mover.opposite());
        // A finished game keeps the side that delivered the final move.
        if !self.status.is_over() {
            self.turn = mover.opposite();
        }
        self.selected = None;
        self.valid_moves.clear();
        self.last_move = Some(mv);
        self.message = status_message(self.status, self.turn, self.check);

        debug!("{} played {} -> {}", mover.name(), mv.from, mv.to);
        if self.status.is_over() {
            info!("Game over: {}", self.message);
        }
    }
}

fn status_message(status: GameStatus, turn: Team, check: CheckStatus) -> String {
    match status {
        GameStatus::Checkmate(winner) => format!("Checkmate! {} wins!", winner.name()),
        GameStatus::Stalemate => "Stalemate! Game is a draw.".to_string(),
        GameStatus::Ongoing if check.for_team(turn) => format!("Check! {} to move", turn.name()),
        GameStatus::Ongoing => format!("{} to move", turn.name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    fn human_config() -> GameConfig {
        GameConfig {
            mode: GameMode::Human,
            ..GameConfig::default()
        }
    }

    fn session_from(fen: &str, config: GameConfig) -> GameSession {
        let (board, turn) = Board::from_fen(fen).unwrap();
        GameSession::from_position(board, turn, config).unwrap()
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::new(GameConfig::default()).unwrap();
        assert_eq!(session.turn(), Team::White);
        assert_eq!(session.status(), GameStatus::Ongoing);
        assert_eq!(session.phase(), Phase::AwaitingSelection);
        assert_eq!(session.message(), "White to move");
        assert_eq!(session.nodes_evaluated(), None);
        assert!(!session.is_ai_turn());
    }

    #[test]
    fn test_zero_depth_rejected() {
        let config = GameConfig {
            depth_black: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            GameSession::new(config).unwrap_err(),
            GameError::InvalidDepth(0)
        );
    }

    #[test]
    fn test_select_own_pawn() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        session.select(sq(4, 2)).unwrap();
        assert_eq!(session.phase(), Phase::PieceSelected(sq(4, 2)));
        assert_eq!(session.valid_moves(), &[sq(3, 2), sq(2, 2)]);
    }

    #[test]
    fn test_invalid_selection_keeps_previous() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        session.select(sq(4, 0)).unwrap();

        // Empty square, then an enemy piece.
        for target in [sq(2, 2), sq(1, 1)] {
            session.select(target).unwrap();
            assert_eq!(session.message(), "Invalid piece selection");
            assert_eq!(session.selected(), Some(sq(4, 0)));
            assert_eq!(session.valid_moves(), &[sq(3, 0), sq(2, 0)]);
        }
    }

    #[test]
    fn test_illegal_move_leaves_state_unchanged() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        session.select(sq(4, 2)).unwrap();
        let board = session.board().clone();

        let err = session.make_move(sq(4, 2), sq(1, 2)).unwrap_err();
        assert_eq!(
            err,
            GameError::IllegalMove {
                from: sq(4, 2),
                to: sq(1, 2)
            }
        );
        assert!(err.is_recoverable());
        assert_eq!(session.board(), &board);
        assert_eq!(session.turn(), Team::White);
        assert_eq!(session.selected(), Some(sq(4, 2)));
        assert_eq!(session.message(), "Invalid move");
    }

    #[test]
    fn test_move_requires_matching_selection() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        assert_eq!(
            session.make_move(sq(4, 2), sq(3, 2)),
            Err(GameError::NoSelection)
        );
        assert_eq!(session.message(), "Piece not selected");

        session.select(sq(4, 1)).unwrap();
        assert_eq!(
            session.make_move(sq(4, 2), sq(3, 2)),
            Err(GameError::NoSelection)
        );
        assert_eq!(session.turn(), Team::White);
    }

    #[test]
    fn test_human_game_allows_direct_move() {
        let mut session = GameSession::new(human_config()).unwrap();
        session.make_move(sq(4, 2), sq(2, 2)).unwrap();
        assert_eq!(session.turn(), Team::Black);
    }

    #[test]
    fn test_commit_flips_turn_and_clears_selection() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        session.select(sq(4, 2)).unwrap();
        let mv = session.make_move(sq(4, 2), sq(2, 2)).unwrap();

        assert_eq!(session.turn(), Team::Black);
        assert_eq!(session.selected(), None);
        assert!(session.valid_moves().is_empty());
        assert_eq!(session.last_move(), Some(mv));
        assert_eq!(session.message(), "Black to move");
        assert!(session.board().piece_at(sq(2, 2)).unwrap().has_moved);
        assert!(session.is_ai_turn());
    }

    #[test]
    fn test_checkmate_ends_game() {
        let mut session = session_from("k4/5/1K3/5/5/4R w", GameConfig::default());
        session.select(sq(5, 4)).unwrap();
        session.make_move(sq(5, 4), sq(0, 4)).unwrap();

        assert_eq!(session.status(), GameStatus::Checkmate(Team::White));
        assert_eq!(session.phase(), Phase::GameOver(GameStatus::Checkmate(Team::White)));
        assert!(session.check().black);
        assert_eq!(session.message(), "Checkmate! White wins!");
        assert_eq!(session.turn(), Team::White);
        assert!(!session.is_ai_turn());

        assert_eq!(session.select(sq(0, 0)), Err(GameError::GameAlreadyOver));
        assert_eq!(
            session.make_move(sq(0, 0), sq(1, 0)),
            Err(GameError::GameAlreadyOver)
        );
        assert_eq!(session.ai_move().unwrap_err(), GameError::GameAlreadyOver);
    }

    #[test]
    fn test_stalemate_ends_game() {
        let mut session = session_from("k4/5/1K3/5/2Q2/5 w", human_config());
        session.make_move(sq(4, 2), sq(1, 2)).unwrap();

        assert_eq!(session.status(), GameStatus::Stalemate);
        assert_eq!(session.message(), "Stalemate! Game is a draw.");
        assert!(!session.check().black);
        assert_eq!(session.turn(), Team::White);
    }

    #[test]
    fn test_human_checkmate_keeps_turn() {
        let mut session = session_from("k4/5/1K3/5/5/4R w", human_config());
        session.make_move(sq(5, 4), sq(0, 4)).unwrap();

        assert_eq!(session.status(), GameStatus::Checkmate(Team::White));
        assert_eq!(session.turn(), Team::White);
        assert_eq!(session.last_move().unwrap().piece.team, session.turn());
    }

    #[test]
    fn test_check_message() {
        let mut session = session_from("k4/5/5/5/5/1R2K w", human_config());
        session.make_move(sq(5, 1), sq(1, 1)).unwrap();
        assert_eq!(session.message(), "Black to move");

        let mut session = session_from("k4/5/5/5/5/R3K w", human_config());
        session.make_move(sq(5, 0), sq(3, 0)).unwrap();
        assert!(session.check().black);
        assert_eq!(session.message(), "Check! Black to move");
    }

    #[test]
    fn test_ai_move_on_human_turn_rejected() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        assert_eq!(
            session.ai_move().unwrap_err(),
            GameError::NotAiTurn(Team::White)
        );

        let mut session = GameSession::new(human_config()).unwrap();
        assert!(session.ai_move().is_err());
    }

    #[test]
    fn test_ai_takes_only_capture() {
        let config = GameConfig {
            depth_black: 1,
            ..GameConfig::default()
        };
        let mut session = session_from("k3r/5/5/5/5/K3N b", config);
        let root_moves = session.legal_moves().len() as u64;

        let result = session.ai_move().unwrap();
        let mv = result.best_move.unwrap();
        assert_eq!(mv.from, sq(0, 4));
        assert_eq!(mv.to, sq(5, 4));
        assert!(mv.is_capture());
        assert_eq!(result.nodes_evaluated, root_moves);
        assert_eq!(session.nodes_evaluated(), Some(root_moves));
        assert_eq!(session.turn(), Team::White);
        assert_eq!(session.last_move(), Some(mv));
    }

    #[test]
    fn test_ai_vs_ai_alternates() {
        let config = GameConfig {
            mode: GameMode::AiVsAi,
            depth_white: 1,
            depth_black: 1,
        };
        let mut session = GameSession::new(config).unwrap();
        let first = session.ai_move().unwrap().best_move.unwrap();
        assert_eq!(first.piece.team, Team::White);
        let second = session.ai_move().unwrap().best_move.unwrap();
        assert_eq!(second.piece.team, Team::Black);
        assert_eq!(session.turn(), Team::White);
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(serde_json::to_string(&GameMode::AiVsAi).unwrap(), "\"ai_vs_ai\"");
        let mode: GameMode = serde_json::from_str("\"human\"").unwrap();
        assert_eq!(mode, GameMode::Human);
    }
}
