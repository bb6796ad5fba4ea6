use crate::engine::Move;
use crate::error::{FenError, GameError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ROWS: usize = 6;
pub const COLS: usize = 5;
pub const NUM_SQUARES: usize = ROWS * COLS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    #[default]
    White,
    Black,
}

impl Team {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Row delta of a pawn step. White starts at the bottom (row 5) and moves up.
    pub const fn forward(self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    pub const fn pawn_row(self) -> usize {
        match self {
            Self::White => ROWS - 2,
            Self::Black => 1,
        }
    }

    pub const fn back_row(self) -> usize {
        match self {
            Self::White => ROWS - 1,
            Self::Black => 0,
        }
    }

    /// The rank on which this side's pawns promote.
    pub const fn promotion_row(self) -> usize {
        self.opposite().back_row()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    #[default]
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Nominal value shown to players. The engine scores with
    /// [`EngineConfig`](crate::engine::config::EngineConfig) instead.
    pub const fn value(self) -> u32 {
        match self {
            Self::Pawn => 1,
            Self::Knight | Self::Bishop => 3,
            Self::Rook => 5,
            Self::Queen => 9,
            Self::King => 1000,
        }
    }

    const fn to_char(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    const fn from_char(c: char) -> Option<Self> {
        match c {
            'p' => Some(Self::Pawn),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Piece {
    pub team: Team,
    pub kind: PieceKind,
    pub has_moved: bool,
}

impl Piece {
    #[must_use]
    pub const fn new(team: Team, kind: PieceKind) -> Self {
        Self {
            team,
            kind,
            has_moved: false,
        }
    }
}

/// A board coordinate. Always inside the 6x5 grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < ROWS && col < COLS {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Inverse of [`Square::index`]. `idx` must be below [`NUM_SQUARES`].
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / COLS) as u8,
            col: (idx % COLS) as u8,
        }
    }

    pub const fn row(self) -> usize {
        self.row as usize
    }

    pub const fn col(self) -> usize {
        self.col as usize
    }

    pub const fn index(self) -> usize {
        self.row() * COLS + self.col()
    }

    /// The square `(dr, dc)` away, if it is still on the board.
    #[must_use]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = usize::try_from(i16::from(self.row) + i16::from(dr)).ok()?;
        let col = usize::try_from(i16::from(self.col) + i16::from(dc)).ok()?;
        Self::new(row, col)
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..NUM_SQUARES).map(Self::from_index)
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = GameError;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        Self::new(row, col).ok_or(GameError::InvalidSquare { row, col })
    }
}

impl From<Square> for (usize, usize) {
    fn from(sq: Square) -> Self {
        (sq.row(), sq.col())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    // Row-major, index = row * COLS + col
    grid: [Option<Piece>; NUM_SQUARES],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

// Grid indices come from `Square`, which is always on the board.
#[allow(clippy::indexing_slicing)]
impl Board {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_pieces(Team::Black);
        board.setup_pieces(Team::White);
        board
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            grid: [None; NUM_SQUARES],
        }
    }

    fn setup_pieces(&mut self, team: Team) {
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Rook,
        ];
        for (col, &kind) in back.iter().enumerate() {
            if let Some(sq) = Square::new(team.back_row(), col) {
                self.place(sq, Piece::new(team, kind));
            }
            if let Some(sq) = Square::new(team.pawn_row(), col) {
                self.place(sq, Piece::new(team, PieceKind::Pawn));
            }
        }
    }

    #[must_use]
    pub const fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.index()]
    }

    pub fn place(&mut self, sq: Square, piece: Piece) {
        self.grid[sq.index()] = Some(piece);
    }

    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.grid[sq.index()].take()
    }

    pub fn clear(&mut self) {
        self.grid = [None; NUM_SQUARES];
    }

    /// Cells of one rank, column 0 first.
    pub fn rank(&self, row: usize) -> &[Option<Piece>] {
        let start = row.min(ROWS - 1) * COLS;
        &self.grid[start..start + COLS]
    }

    pub fn pieces(&self, team: Team) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.grid.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.filter(|p| p.team == team)
                .map(|p| (Square::from_index(idx), p))
        })
    }

    #[must_use]
    pub fn king_square(&self, team: Team) -> Option<Square> {
        self.pieces(team)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Plays `mv` and returns whatever stood on the destination.
    ///
    /// No legality checking happens here. The mover is marked as moved; a
    /// promoting pawn is replaced by a fresh, unmoved piece of the new kind.
    pub fn apply(&mut self, mv: &Move) -> Option<Piece> {
        let Some(piece) = self.grid[mv.from.index()].take() else {
            debug_assert!(false, "apply: no piece at {}", mv.from);
            return None;
        };
        let piece = match mv.promotion {
            Some(kind) => Piece::new(piece.team, kind),
            None => Piece {
                has_moved: true,
                ..piece
            },
        };
        self.grid[mv.to.index()].replace(piece)
    }

    /// Exact inverse of [`Board::apply`]: the mover goes back as it was
    /// recorded in `mv.piece`, and `captured` is restored on the destination.
    pub fn undo(&mut self, mv: &Move, captured: Option<Piece>) {
        self.grid[mv.from.index()] = Some(mv.piece);
        self.grid[mv.to.index()] = captured;
    }

    pub fn to_fen_string(&self, turn: Team) -> String {
        let mut fen = String::new();
        for row in 0..ROWS {
            let mut empty_count = 0;
            for cell in self.rank(row) {
                if let Some(piece) = cell {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    let c = piece.kind.to_char();
                    fen.push(if piece.team == Team::White {
                        c.to_ascii_uppercase()
                    } else {
                        c
                    });
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if row + 1 < ROWS {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if turn == Team::White { 'w' } else { 'b' });
        fen
    }

    /// Parses `"rnkbr/ppppp/5/5/PPPPP/RNKBR w"`. Rank 0 comes first.
    ///
    /// Pawns found off their starting rank are marked as moved.
    pub fn from_fen(fen: &str) -> Result<(Self, Team), FenError> {
        let mut parts = fen.split_whitespace();
        let placement = parts.next().unwrap_or_default();
        let turn = match parts.next() {
            Some("w") => Team::White,
            Some("b") => Team::Black,
            _ => return Err(FenError::SideToMove),
        };

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != ROWS {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut board = Self::empty();
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip as usize;
                    continue;
                }
                let kind = PieceKind::from_char(c.to_ascii_lowercase())
                    .ok_or(FenError::UnknownPiece(c))?;
                let team = if c.is_ascii_uppercase() {
                    Team::White
                } else {
                    Team::Black
                };
                let sq = Square::new(row, col).ok_or(FenError::RankWidth { rank: row })?;
                let mut piece = Piece::new(team, kind);
                piece.has_moved = kind == PieceKind::Pawn && row != team.pawn_row();
                board.place(sq, piece);
                col += 1;
            }
            if col != COLS {
                return Err(FenError::RankWidth { rank: row });
            }
        }

        for team in [Team::White, Team::Black] {
            let kings = board
                .pieces(team)
                .filter(|(_, p)| p.kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(FenError::KingCount(team));
            }
        }

        Ok((board, turn))
    }
}
