use crate::engine::Move;

// Ten pieces with at most 17 destinations each on a 6x5 board.
const MAX_MOVES: usize = 192;

/// Fixed-capacity move buffer; search allocates one per node.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    count: usize,
}

impl Default for MoveList {
    fn default() -> Self {
        Self {
            moves: [Move::default(); MAX_MOVES],
            count: 0,
        }
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl MoveList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: Move) {
        if let Some(slot) = self.moves.get_mut(self.count) {
            *slot = mv;
            self.count += 1;
        } else {
            debug_assert!(false, "MoveList overflow! Max moves: {MAX_MOVES}");
        }
    }

    pub const fn len(&self) -> usize {
        self.count
    }

    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn get(&self, index: usize) -> Option<&Move> {
        self.as_slice().get(index)
    }

    pub fn as_slice(&self) -> &[Move] {
        self.moves.get(0..self.count).unwrap_or(&[])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Stable sort: equal keys keep their generation order.
    pub fn sort_by_key<K, F>(&mut self, f: F)
    where
        F: FnMut(&Move) -> K,
        K: Ord,
    {
        if let Some(slice) = self.moves.get_mut(0..self.count) {
            slice.sort_by_key(f);
        }
    }

    /// Keeps the moves matching `f`, preserving their relative order.
    #[allow(clippy::indexing_slicing)]
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut kept = 0;
        for i in 0..self.count {
            let mv = self.moves[i];
            if f(&mv) {
                self.moves[kept] = mv;
                kept += 1;
            }
        }
        self.count = kept;
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::iter::Take<std::array::IntoIter<Move, MAX_MOVES>>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter().take(self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Piece, PieceKind, Square, Team};

    fn mv(to_col: usize) -> Move {
        Move::quiet(
            Square::new(5, 0).unwrap(),
            Square::new(4, to_col).unwrap(),
            Piece::new(Team::White, PieceKind::Rook),
        )
    }

    #[test]
    fn test_retain_preserves_order() {
        let mut list = MoveList::new();
        for c in 0..5 {
            list.push(mv(c));
        }
        list.retain(|m| m.to.col() % 2 == 0);
        let cols: Vec<usize> = list.iter().map(|m| m.to.col()).collect();
        assert_eq!(cols, vec![0, 2, 4]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut list = MoveList::new();
        for c in 0..5 {
            list.push(mv(c));
        }
        list.sort_by_key(|m| usize::from(m.to.col() != 3));
        let cols: Vec<usize> = list.into_iter().map(|m| m.to.col()).collect();
        assert_eq!(cols, vec![3, 0, 1, 2, 4]);
    }
}
