//! Piece-square tables (PST) for all six piece types.
//!
//! All tables are defined from White's perspective in rank-1-first order:
//! index 0 = A1, index 7 = H1, index 8 = A2, ..., index 63 = H8.
//! Black reads the same tables mirrored vertically. Use [`pst_value`] to
//! look up the value for either color.

use gambit_core::{Color, PieceKind, Position, Square};

// ---------------------------------------------------------------------------
// Individual piece-square tables
// ---------------------------------------------------------------------------

/// Pawn PST. Rank 1 and rank 8 entries are 0: pawns never sit there.
#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
    // Rank 1 (indices 0-7), never used
      0,   0,   0,   0,   0,   0,   0,   0,
    // Rank 2 (indices 8-15)
      5,  10,  10, -20, -20,  10,  10,   5,
    // Rank 3 (indices 16-23)
      5,  -5, -10,   0,   0, -10,  -5,   5,
    // Rank 4 (indices 24-31)
      0,   0,   0,  20,  20,   0,   0,   0,
    // Rank 5 (indices 32-39)
      5,   5,  10,  25,  25,  10,   5,   5,
    // Rank 6 (indices 40-47)
     10,  10,  20,  30,  30,  20,  10,  10,
    // Rank 7 (indices 48-55)
     50,  50,  50,  50,  50,  50,  50,  50,
    // Rank 8 (indices 56-63), never used
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    // Rank 1 (indices 0-7)
    -50, -40, -30, -30, -30, -30, -40, -50,
    // Rank 2 (indices 8-15)
    -40, -20,   0,   5,   5,   0, -20, -40,
    // Rank 3 (indices 16-23)
    -30,   5,  10,  15,  15,  10,   5, -30,
    // Rank 4 (indices 24-31)
    -30,   0,  15,  20,  20,  15,   0, -30,
    // Rank 5 (indices 32-39)
    -30,   5,  15,  20,  20,  15,   5, -30,
    // Rank 6 (indices 40-47)
    -30,   0,  10,  15,  15,  10,   0, -30,
    // Rank 7 (indices 48-55)
    -40, -20,   0,   0,   0,   0, -20, -40,
    // Rank 8 (indices 56-63)
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    // Rank 1 (indices 0-7)
    -20, -10, -10, -10, -10, -10, -10, -20,
    // Rank 2 (indices 8-15)
    -10,   0,   5,  10,  10,   5,   0, -10,
    // Rank 3 (indices 16-23)
    -10,   5,  10,  15,  15,  10,   5, -10,
    // Rank 4 (indices 24-31)
    -10,  10,  15,  20,  20,  15,  10, -10,
    // Rank 5 (indices 32-39)
    -10,   5,  10,  15,  15,  10,   5, -10,
    // Rank 6 (indices 40-47)
    -10,   0,   5,  10,  10,   5,   0, -10,
    // Rank 7 (indices 48-55)
    -20, -10, -10, -10, -10, -10, -10, -20,
    // Rank 8 (indices 56-63)
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
    // Rank 1 (indices 0-7)
      0,   0,   0,   5,   5,   0,   0,   0,
    // Rank 2 (indices 8-15)
      0,   0,   5,  10,  10,   5,   0,   0,
    // Rank 3 (indices 16-23)
      0,   5,  10,  15,  15,  10,   5,   0,
    // Rank 4 (indices 24-31)
      5,  10,  15,  20,  20,  15,  10,   5,
    // Rank 5 (indices 32-39)
      5,  10,  15,  20,  20,  15,  10,   5,
    // Rank 6 (indices 40-47)
      0,   5,  10,  15,  15,  10,   5,   0,
    // Rank 7 (indices 48-55)
      0,   0,   5,  10,  10,   5,   0,   0,
    // Rank 8 (indices 56-63)
      0,   0,   0,   5,   5,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
    // Rank 1 (indices 0-7)
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    // Rank 2 (indices 8-15)
    -10,   0,   5,   0,   0,   5,   0, -10,
    // Rank 3 (indices 16-23)
    -10,   5,  10,  10,  10,  10,   5, -10,
    // Rank 4 (indices 24-31)
     -5,   0,  10,  15,  15,  10,   0,  -5,
    // Rank 5 (indices 32-39)
     -5,   0,  10,  15,  15,  10,   0,  -5,
    // Rank 6 (indices 40-47)
    -10,   5,  10,  10,  10,  10,   5, -10,
    // Rank 7 (indices 48-55)
    -10,   0,   5,   0,   0,   5,   0, -10,
    // Rank 8 (indices 56-63)
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

/// King PST. Every square is a penalty; the corners and home row are the
/// least costly.
#[rustfmt::skip]
const KING_PST: [i32; 64] = [
    // Rank 1 (indices 0-7)
    -30, -40, -40, -50, -50, -40, -40, -30,
    // Rank 2 (indices 8-15)
    -40, -60, -60, -70, -70, -60, -60, -40,
    // Rank 3 (indices 16-23)
    -40, -60, -60, -70, -70, -60, -60, -40,
    // Rank 4 (indices 24-31)
    -50, -70, -70, -80, -80, -70, -70, -50,
    // Rank 5 (indices 32-39)
    -50, -70, -70, -80, -80, -70, -70, -50,
    // Rank 6 (indices 40-47)
    -40, -60, -60, -70, -70, -60, -60, -40,
    // Rank 7 (indices 48-55)
    -40, -60, -60, -70, -70, -60, -60, -40,
    // Rank 8 (indices 56-63)
    -30, -40, -40, -50, -50, -40, -40, -30,
];

/// All six tables indexed by [`PieceKind::index()`].
const TABLES: [&[i32; 64]; PieceKind::COUNT] = [
    &PAWN_PST,
    &KNIGHT_PST,
    &BISHOP_PST,
    &ROOK_PST,
    &QUEEN_PST,
    &KING_PST,
];

/// Bonus for a king standing on one of the four centre squares.
pub const KING_CENTER_BONUS: i32 = 10;

/// Table index for `sq` as seen by `color`.
///
/// Board rows count from rank 8, the tables from rank 1, so White flips the
/// row and Black reads it directly.
#[inline]
fn table_index(sq: Square, color: Color) -> usize {
    let rank_from_own_side = match color {
        Color::White => 7 - sq.row(),
        Color::Black => sq.row(),
    };
    rank_from_own_side as usize * 8 + sq.col() as usize
}

/// Look up the PST value for a piece of `color` and `kind` on `sq`.
///
/// The result is from the owning side's point of view.
#[inline]
pub fn pst_value(kind: PieceKind, color: Color, sq: Square) -> i32 {
    TABLES[kind.index()][table_index(sq, color)]
}

/// Sum of all PST bonuses from White's perspective.
pub fn pst(pos: &Position) -> i32 {
    pos.pieces()
        .map(|(sq, piece)| {
            let value = pst_value(piece.kind(), piece.color(), sq);
            match piece.color() {
                Color::White => value,
                Color::Black => -value,
            }
        })
        .sum()
}

/// Centralization bonus for each king on d4, d5, e4 or e5, from White's
/// perspective.
pub fn king_centralization(pos: &Position) -> i32 {
    const CENTER: [Square; 4] = [Square::D4, Square::D5, Square::E4, Square::E5];
    let mut score = 0;
    if CENTER.contains(&pos.king_square(Color::White)) {
        score += KING_CENTER_BONUS;
    }
    if CENTER.contains(&pos.king_square(Color::Black)) {
        score -= KING_CENTER_BONUS;
    }
    score
}
