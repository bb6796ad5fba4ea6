use crate::logic::board::PieceKind;
use serde::{Deserialize, Serialize};

pub const VAL_PAWN: i32 = 100;
pub const VAL_KNIGHT: i32 = 300;
pub const VAL_BISHOP: i32 = 300;
pub const VAL_ROOK: i32 = 500;
pub const VAL_QUEEN: i32 = 900;
pub const VAL_KING: i32 = 20_000;

/// Scores in centipawns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Material
    pub val_pawn: i32,
    pub val_knight: i32,
    pub val_bishop: i32,
    pub val_rook: i32,
    pub val_queen: i32,
    pub val_king: i32,

    // Positional
    pub center_bonus: i32,       // per piece on rows 1-4, cols 1-3
    pub pawn_advance_bonus: i32, // per rank advanced from the start rank

    // Pawn structure, per file
    pub doubled_pawn_penalty: i32,
    pub isolated_pawn_penalty: i32,

    // King safety
    pub king_shield_bonus: i32,      // per own pawn next to the king
    pub open_king_file_penalty: i32, // no pawn of either side on the king's file
    pub check_penalty: i32,

    // Search
    pub mate_score: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            val_pawn: VAL_PAWN,
            val_knight: VAL_KNIGHT,
            val_bishop: VAL_BISHOP,
            val_rook: VAL_ROOK,
            val_queen: VAL_QUEEN,
            val_king: VAL_KING,

            center_bonus: 15,
            pawn_advance_bonus: 20,

            doubled_pawn_penalty: 60,
            isolated_pawn_penalty: 40,

            king_shield_bonus: 30,
            open_king_file_penalty: 40,
            check_penalty: 70,

            mate_score: 1_000_000,
        }
    }
}

#[derive(Deserialize)]
struct EngineConfigJson {
    val_pawn: Option<f32>,
    val_knight: Option<f32>,
    val_bishop: Option<f32>,
    val_rook: Option<f32>,
    val_queen: Option<f32>,
    val_king: Option<f32>,

    center_bonus: Option<i32>,
    pawn_advance_bonus: Option<i32>,
    doubled_pawn_penalty: Option<i32>,
    isolated_pawn_penalty: Option<i32>,
    king_shield_bonus: Option<i32>,
    open_king_file_penalty: Option<i32>,
    check_penalty: Option<i32>,
    mate_score: Option<i32>,
}

impl EngineConfig {
    /// Reads a tuning file. Piece values are scale factors applied to the
    /// defaults; the remaining fields are absolute.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        Ok(Self {
            val_pawn: apply_scale(default.val_pawn, json_config.val_pawn),
            val_knight: apply_scale(default.val_knight, json_config.val_knight),
            val_bishop: apply_scale(default.val_bishop, json_config.val_bishop),
            val_rook: apply_scale(default.val_rook, json_config.val_rook),
            val_queen: apply_scale(default.val_queen, json_config.val_queen),
            val_king: apply_scale(default.val_king, json_config.val_king),

            center_bonus: json_config.center_bonus.unwrap_or(default.center_bonus),
            pawn_advance_bonus: json_config
                .pawn_advance_bonus
                .unwrap_or(default.pawn_advance_bonus),
            doubled_pawn_penalty: json_config
                .doubled_pawn_penalty
                .unwrap_or(default.doubled_pawn_penalty),
            isolated_pawn_penalty: json_config
                .isolated_pawn_penalty
                .unwrap_or(default.isolated_pawn_penalty),
            king_shield_bonus: json_config
                .king_shield_bonus
                .unwrap_or(default.king_shield_bonus),
            open_king_file_penalty: json_config
                .open_king_file_penalty
                .unwrap_or(default.open_king_file_penalty),
            check_penalty: json_config.check_penalty.unwrap_or(default.check_penalty),
            mate_score: json_config.mate_score.unwrap_or(default.mate_score),
        })
    }

    pub const fn piece_value(&self, kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => self.val_pawn,
            PieceKind::Knight => self.val_knight,
            PieceKind::Bishop => self.val_bishop,
            PieceKind::Rook => self.val_rook,
            PieceKind::Queen => self.val_queen,
            PieceKind::King => self.val_king,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn apply_scale(default_val: i32, scale: Option<f32>) -> i32 {
    scale.map_or(default_val, |s| (default_val as f32 * s) as i32)
}
