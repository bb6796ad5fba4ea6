use crate::logic::board::{Board, PieceKind, Square, Team};
use crate::logic::game::GameStatus;
use crate::logic::generator::MoveGenerator;
use crate::logic::lookup::{AttackTables, DIAGONAL_DIRS, ORTHOGONAL_DIRS};

/// Checks if `team`'s king is attacked. A board without that king is not in check.
pub fn is_in_check(board: &Board, team: Team) -> bool {
    board
        .king_square(team)
        .is_some_and(|king| is_square_attacked(board, king, team.opposite()))
}

/// Whether any piece of `by` could move onto `target` if an enemy piece stood there.
///
/// Scans outward from `target`, which is the same set of squares as the
/// attackers' pseudo-legal capture destinations.
pub fn is_square_attacked(board: &Board, target: Square, by: Team) -> bool {
    let tables = AttackTables::get();
    let is_attacker = |sq: Square, kinds: &[PieceKind]| {
        board
            .piece_at(sq)
            .is_some_and(|p| p.team == by && kinds.contains(&p.kind))
    };

    // 1. Knights
    if tables
        .knight(target)
        .iter()
        .any(|&sq| is_attacker(sq, &[PieceKind::Knight]))
    {
        return true;
    }

    // 2. King
    if tables
        .king(target)
        .iter()
        .any(|&sq| is_attacker(sq, &[PieceKind::King]))
    {
        return true;
    }

    // 3. Pawns capture diagonally forward, so look one step backward from their view.
    let behind = -by.forward();
    for dc in [-1, 1] {
        if let Some(sq) = target.offset(behind, dc) {
            if is_attacker(sq, &[PieceKind::Pawn]) {
                return true;
            }
        }
    }

    // 4. Sliders: the first piece on each ray decides.
    let rays = [
        (&ORTHOGONAL_DIRS, [PieceKind::Rook, PieceKind::Queen]),
        (&DIAGONAL_DIRS, [PieceKind::Bishop, PieceKind::Queen]),
    ];
    for (dirs, kinds) in rays {
        for &(dr, dc) in dirs {
            let mut current = target;
            while let Some(sq) = current.offset(dr, dc) {
                if board.piece_at(sq).is_some() {
                    if is_attacker(sq, &kinds) {
                        return true;
                    }
                    break;
                }
                current = sq;
            }
        }
    }

    false
}

/// Classifies the position for the side about to move.
pub fn game_status(board: &Board, side_to_move: Team) -> GameStatus {
    if MoveGenerator::new().has_legal_moves(board, side_to_move) {
        GameStatus::Ongoing
    } else if is_in_check(board, side_to_move) {
        GameStatus::Checkmate(side_to_move.opposite())
    } else {
        GameStatus::Stalemate
    }
}
