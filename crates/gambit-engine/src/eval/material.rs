//! Material balance evaluation.
//!
//! All scores are returned from White's perspective (positive = White ahead).

use gambit_core::{Color, PieceKind, Position};

/// Base material values indexed by [`PieceKind::index()`].
///
/// | Piece  | value |
/// |--------|-------|
/// | Pawn   | 100   |
/// | Knight | 320   |
/// | Bishop | 330   |
/// | Rook   | 500   |
/// | Queen  | 900   |
/// | King   |   0   |
pub const MATERIAL_VALUE: [i32; PieceKind::COUNT] = [100, 320, 330, 500, 900, 0];

/// Value of a single piece kind.
#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    MATERIAL_VALUE[kind.index()]
}

/// Evaluate material balance from White's perspective.
pub fn material(pos: &Position) -> i32 {
    pos.pieces()
        .map(|(_, piece)| match piece.color() {
            Color::White => piece_value(piece.kind()),
            Color::Black => -piece_value(piece.kind()),
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_balanced() {
        assert_eq!(material(&Position::starting_position()), 0);
    }

    #[test]
    fn extra_queen_for_white() {
        let pos: Position = "4k3/8/8/8/8/8/8/3QK3 w - - 0 1".parse().unwrap();
        assert_eq!(material(&pos), 900);
    }

    #[test]
    fn black_up_a_rook_for_a_knight() {
        let pos: Position = "r3k3/8/8/8/8/8/8/1N2K3 w - - 0 1".parse().unwrap();
        assert_eq!(material(&pos), 320 - 500);
    }

    #[test]
    fn kings_are_worth_nothing() {
        assert_eq!(piece_value(PieceKind::King), 0);
        assert!(piece_value(PieceKind::Queen) > piece_value(PieceKind::Rook));
    }
}
