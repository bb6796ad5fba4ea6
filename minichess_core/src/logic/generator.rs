use crate::engine::move_list::MoveList;
use crate::engine::Move;
use crate::logic::board::{Board, Piece, PieceKind, Square, Team};
use crate::logic::lookup::{AttackTables, DIAGONAL_DIRS, ORTHOGONAL_DIRS};
use crate::logic::rules::is_in_check;
use std::cmp::Reverse;

/// Produces moves in a fixed order: source squares row-major, each piece's
/// directions in table order, then a stable sort putting promotions and
/// captures (most valuable victim, least valuable attacker) first.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub const fn new() -> Self {
        Self
    }

    /// Moves that follow each piece's movement pattern, ignoring own-king safety.
    pub fn pseudo_legal_moves(&self, board: &Board, turn: Team) -> MoveList {
        let mut moves = MoveList::new();
        for (from, piece) in board.pieces(turn) {
            self.generate_piece_moves(board, from, piece, &mut moves);
        }
        moves.sort_by_key(|mv| Reverse(ordering_score(mv)));
        moves
    }

    /// Pseudo-legal moves that do not leave `turn`'s king attacked.
    pub fn legal_moves(&self, board: &Board, turn: Team) -> MoveList {
        let mut moves = self.pseudo_legal_moves(board, turn);
        let mut scratch = board.clone();
        moves.retain(|mv| is_safe(&mut scratch, mv, turn));
        moves
    }

    /// Legal destinations of the piece standing on `from`, for whichever side owns it.
    pub fn legal_moves_from(&self, board: &Board, from: Square) -> Vec<Square> {
        let Some(piece) = board.piece_at(from) else {
            return Vec::new();
        };
        self.legal_moves(board, piece.team)
            .iter()
            .filter(|mv| mv.from == from)
            .map(|mv| mv.to)
            .collect()
    }

    /// Returns as soon as one legal move is found.
    pub fn has_legal_moves(&self, board: &Board, turn: Team) -> bool {
        let mut scratch = board.clone();
        for (from, piece) in board.pieces(turn) {
            let mut moves = MoveList::new();
            self.generate_piece_moves(board, from, piece, &mut moves);
            if moves.iter().any(|mv| is_safe(&mut scratch, mv, turn)) {
                return true;
            }
        }
        false
    }

    /// The legal move `from -> to` for `turn`, if there is one.
    pub fn find_legal_move(
        &self,
        board: &Board,
        from: Square,
        to: Square,
        turn: Team,
    ) -> Option<Move> {
        let piece = board.piece_at(from).filter(|p| p.team == turn)?;
        let mut moves = MoveList::new();
        self.generate_piece_moves(board, from, piece, &mut moves);
        let mut scratch = board.clone();
        moves
            .into_iter()
            .find(|mv| mv.to == to && is_safe(&mut scratch, mv, turn))
    }

    fn generate_piece_moves(
        &self,
        board: &Board,
        from: Square,
        piece: Piece,
        moves: &mut MoveList,
    ) {
        let tables = AttackTables::get();
        match piece.kind {
            PieceKind::Pawn => self.gen_pawn_moves(board, from, piece, moves),
            PieceKind::Knight => {
                self.gen_jump_moves(board, from, piece, tables.knight(from), moves);
            }
            PieceKind::King => self.gen_jump_moves(board, from, piece, tables.king(from), moves),
            PieceKind::Bishop => self.gen_slider_moves(board, from, piece, &DIAGONAL_DIRS, moves),
            PieceKind::Rook => self.gen_slider_moves(board, from, piece, &ORTHOGONAL_DIRS, moves),
            PieceKind::Queen => {
                self.gen_slider_moves(board, from, piece, &DIAGONAL_DIRS, moves);
                self.gen_slider_moves(board, from, piece, &ORTHOGONAL_DIRS, moves);
            }
        }
    }

    fn gen_pawn_moves(&self, board: &Board, from: Square, piece: Piece, moves: &mut MoveList) {
        let forward = piece.team.forward();

        if let Some(one) = from.offset(forward, 0) {
            if board.piece_at(one).is_none() {
                Self::push_pawn_move(from, one, piece, None, moves);

                let on_start_rank = from.row() == piece.team.pawn_row();
                if on_start_rank && !piece.has_moved {
                    if let Some(two) = one.offset(forward, 0) {
                        if board.piece_at(two).is_none() {
                            Self::push_pawn_move(from, two, piece, None, moves);
                        }
                    }
                }
            }
        }

        for dc in [-1, 1] {
            let Some(to) = from.offset(forward, dc) else {
                continue;
            };
            if let Some(target) = board.piece_at(to).filter(|t| t.team != piece.team) {
                Self::push_pawn_move(from, to, piece, Some(target), moves);
            }
        }
    }

    fn push_pawn_move(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
        moves: &mut MoveList,
    ) {
        let promotion = (to.row() == piece.team.promotion_row()).then_some(PieceKind::Queen);
        moves.push(Move {
            from,
            to,
            piece,
            captured,
            promotion,
        });
    }

    fn gen_jump_moves(
        &self,
        board: &Board,
        from: Square,
        piece: Piece,
        targets: &[Square],
        moves: &mut MoveList,
    ) {
        for &to in targets {
            match board.piece_at(to) {
                None => moves.push(Move::quiet(from, to, piece)),
                Some(target) if target.team != piece.team => moves.push(Move {
                    captured: Some(target),
                    ..Move::quiet(from, to, piece)
                }),
                Some(_) => {}
            }
        }
    }

    fn gen_slider_moves(
        &self,
        board: &Board,
        from: Square,
        piece: Piece,
        dirs: &[(i8, i8)],
        moves: &mut MoveList,
    ) {
        for &(dr, dc) in dirs {
            let mut current = from;
            while let Some(to) = current.offset(dr, dc) {
                match board.piece_at(to) {
                    None => {
                        moves.push(Move::quiet(from, to, piece));
                        current = to;
                    }
                    Some(target) => {
                        if target.team != piece.team {
                            moves.push(Move {
                                captured: Some(target),
                                ..Move::quiet(from, to, piece)
                            });
                        }
                        break;
                    }
                }
            }
        }
    }
}

/// Try, test, undo. `scratch` comes back exactly as it went in.
fn is_safe(scratch: &mut Board, mv: &Move, turn: Team) -> bool {
    let captured = scratch.apply(mv);
    let safe = !is_in_check(scratch, turn);
    scratch.undo(mv, captured);
    safe
}

fn ordering_score(mv: &Move) -> u32 {
    let mut score = 0;
    if let Some(victim) = mv.captured {
        score += 100 + victim.kind.value() * 10 - mv.piece.kind.index() as u32;
    }
    if mv.is_promotion() {
        score += 90;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    fn destinations(board: &Board, from: Square) -> Vec<Square> {
        let mut dests = MoveGenerator::new().legal_moves_from(board, from);
        dests.sort();
        dests
    }

    #[test]
    fn test_initial_move_count() {
        let board = Board::new();
        let gen = MoveGenerator::new();
        // 5 pawns x 2 pushes, knight to (3,0) and (3,2)
        assert_eq!(gen.legal_moves(&board, Team::White).len(), 12);
        assert_eq!(gen.legal_moves(&board, Team::Black).len(), 12);
    }

    #[test]
    fn test_pawn_single_and_double_step() {
        let board = Board::new();
        assert_eq!(destinations(&board, sq(4, 2)), vec![sq(2, 2), sq(3, 2)]);
        assert_eq!(destinations(&board, sq(1, 0)), vec![sq(2, 0), sq(3, 0)]);
    }

    #[test]
    fn test_pawn_double_step_blocked() {
        let (board, _) = Board::from_fen("k4/5/2n2/5/2P2/4K w").unwrap();
        // pawn on its start rank, (2,2) occupied
        assert_eq!(destinations(&board, sq(4, 2)), vec![sq(3, 2)]);

        let (board, _) = Board::from_fen("k4/5/5/2n2/2P2/4K w").unwrap();
        assert!(destinations(&board, sq(4, 2)).is_empty());
    }

    #[test]
    fn test_moved_pawn_single_step_only() {
        let (mut board, _) = Board::from_fen("k4/5/5/5/2P2/4K w").unwrap();
        let mut pawn = board.piece_at(sq(4, 2)).unwrap();
        pawn.has_moved = true;
        board.place(sq(4, 2), pawn);
        assert_eq!(destinations(&board, sq(4, 2)), vec![sq(3, 2)]);
    }

    #[test]
    fn test_pawn_captures_and_promotion() {
        let (board, _) = Board::from_fen("kr1n1/2P2/5/5/5/4K w").unwrap();
        let moves = MoveGenerator::new().legal_moves(&board, Team::White);
        let pawn_moves: Vec<&Move> = moves.iter().filter(|m| m.from == sq(1, 2)).collect();
        assert_eq!(pawn_moves.len(), 3);
        assert!(pawn_moves
            .iter()
            .all(|m| m.promotion == Some(PieceKind::Queen)));
        // Captures come first: rook before knight, quiet push last.
        assert_eq!(pawn_moves[0].to, sq(0, 1));
        assert_eq!(pawn_moves[1].to, sq(0, 3));
        assert_eq!(pawn_moves[2].to, sq(0, 2));
    }

    #[test]
    fn test_knight_jumps_over_pieces() {
        let board = Board::new();
        assert_eq!(destinations(&board, sq(5, 1)), vec![sq(3, 0), sq(3, 2)]);
    }

    #[test]
    fn test_slider_stops_at_blockers() {
        let (board, _) = Board::from_fen("k4/5/1p3/5/1R1P1/4K w").unwrap();
        // Rook on (4,1): up to (3,1) then captures (2,1); left (4,0); right (4,2)
        // stops before own pawn; down (5,1).
        assert_eq!(
            destinations(&board, sq(4, 1)),
            vec![sq(2, 1), sq(3, 1), sq(4, 0), sq(4, 2), sq(5, 1)]
        );
    }

    #[test]
    fn test_queen_combines_rook_and_bishop() {
        let (board, _) = Board::from_fen("k4/5/2Q2/5/5/4K w").unwrap();
        // 9 orthogonal + 8 diagonal from (2,2); (0,0) holds the enemy king.
        assert_eq!(destinations(&board, sq(2, 2)).len(), 17);
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        // White rook on (4,2) pinned by black rook on (0,2) against king on (5,2).
        let (board, _) = Board::from_fen("k1r2/5/5/5/2R2/2K2 w").unwrap();
        assert_eq!(
            destinations(&board, sq(4, 2)),
            vec![sq(0, 2), sq(1, 2), sq(2, 2), sq(3, 2)]
        );
    }

    #[test]
    fn test_king_cannot_step_into_attack() {
        let (board, _) = Board::from_fen("k4/5/5/5/1r3/4K w").unwrap();
        // Rook on rank 4 covers (4,3) and (4,4).
        assert_eq!(destinations(&board, sq(5, 4)), vec![sq(5, 3)]);
    }

    #[test]
    fn test_find_legal_move() {
        let board = Board::new();
        let gen = MoveGenerator::new();
        let mv = gen
            .find_legal_move(&board, sq(4, 2), sq(2, 2), Team::White)
            .unwrap();
        assert_eq!(mv.piece.kind, PieceKind::Pawn);
        assert!(gen
            .find_legal_move(&board, sq(4, 2), sq(1, 2), Team::White)
            .is_none());
        assert!(gen
            .find_legal_move(&board, sq(1, 2), sq(2, 2), Team::White)
            .is_none());
    }

    #[test]
    fn test_has_legal_moves_matches_legal_moves() {
        let (board, _) = Board::from_fen("k4/5/5/5/5/1r2K b").unwrap();
        let gen = MoveGenerator::new();
        for team in [Team::White, Team::Black] {
            assert_eq!(
                gen.has_legal_moves(&board, team),
                !gen.legal_moves(&board, team).is_empty()
            );
        }
    }
}
