use crate::logic::board::{Square, NUM_SQUARES};
use std::sync::OnceLock;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const ORTHOGONAL_DIRS: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
pub const DIAGONAL_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Jump targets per square, in offset order, clipped to the board.
pub struct AttackTables {
    knight_moves: [Vec<Square>; NUM_SQUARES],
    king_moves: [Vec<Square>; NUM_SQUARES],
}

impl AttackTables {
    fn new() -> Self {
        Self {
            knight_moves: std::array::from_fn(|idx| {
                jumps(Square::from_index(idx), &KNIGHT_OFFSETS)
            }),
            king_moves: std::array::from_fn(|idx| jumps(Square::from_index(idx), &KING_OFFSETS)),
        }
    }

    pub fn get() -> &'static Self {
        static INSTANCE: OnceLock<AttackTables> = OnceLock::new();
        INSTANCE.get_or_init(AttackTables::new)
    }

    pub fn knight(&self, from: Square) -> &[Square] {
        self.knight_moves.get(from.index()).map_or(&[], Vec::as_slice)
    }

    /// Also the ring of squares around a king.
    pub fn king(&self, from: Square) -> &[Square] {
        self.king_moves.get(from.index()).map_or(&[], Vec::as_slice)
    }
}

fn jumps(from: Square, offsets: &[(i8, i8)]) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .collect()
}
