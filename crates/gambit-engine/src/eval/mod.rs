//! Static evaluation from White's perspective.
//!
//! Positive scores favour White. A checkmate is worth [`MATE`] to the
//! winning side; every draw is exactly 0.

pub mod material;
pub mod pst;

use gambit_core::{Color, Position, generate_legal_moves};

use self::material::material;
use self::pst::{king_centralization, pst};

/// Score of a checkmate, signed toward the side that delivered it.
pub const MATE: i32 = 99_999;

/// Material plus piece-square bonuses, ignoring whether the game is over.
pub fn static_eval(pos: &Position) -> i32 {
    material(pos) + pst(pos) + king_centralization(pos)
}

/// Score for a position whose side to move has no legal moves.
#[inline]
pub fn terminal_score(pos: &Position) -> i32 {
    if !pos.is_in_check() {
        return 0;
    }
    match pos.side_to_move() {
        Color::White => -MATE,
        Color::Black => MATE,
    }
}

/// Evaluate with terminal short-circuits.
///
/// Checkmate returns `±MATE`; stalemate, insufficient material and the
/// other rule draws return 0. Takes `&mut` for legal move generation and
/// leaves the position unchanged.
pub fn evaluate(pos: &mut Position) -> i32 {
    if generate_legal_moves(pos).is_empty() {
        return terminal_score(pos);
    }
    if pos.is_draw_by_rule() {
        return 0;
    }
    static_eval(pos)
}
