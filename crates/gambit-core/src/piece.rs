//! A colored chess piece.

use std::fmt;

use crate::color::Color;
use crate::piece_kind::PieceKind;

/// A chess piece: a kind owned by one side.
///
/// Empty squares are `Option<Piece>::None` on the board, so this type
/// always names a real piece.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
}

impl Piece {
    /// White pawn.
    pub const WHITE_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::White);
    /// White knight.
    pub const WHITE_KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::White);
    /// White bishop.
    pub const WHITE_BISHOP: Piece = Piece::new(PieceKind::Bishop, Color::White);
    /// White rook.
    pub const WHITE_ROOK: Piece = Piece::new(PieceKind::Rook, Color::White);
    /// White queen.
    pub const WHITE_QUEEN: Piece = Piece::new(PieceKind::Queen, Color::White);
    /// White king.
    pub const WHITE_KING: Piece = Piece::new(PieceKind::King, Color::White);
    /// Black pawn.
    pub const BLACK_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::Black);
    /// Black knight.
    pub const BLACK_KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::Black);
    /// Black bishop.
    pub const BLACK_BISHOP: Piece = Piece::new(PieceKind::Bishop, Color::Black);
    /// Black rook.
    pub const BLACK_ROOK: Piece = Piece::new(PieceKind::Rook, Color::Black);
    /// Black queen.
    pub const BLACK_QUEEN: Piece = Piece::new(PieceKind::Queen, Color::Black);
    /// Black king.
    pub const BLACK_KING: Piece = Piece::new(PieceKind::King, Color::Black);

    /// Create a piece from a kind and a color.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }

    /// Return the piece kind.
    #[inline]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    /// Return the piece color.
    #[inline]
    pub const fn color(self) -> Color {
        self.color
    }

    /// Return `true` if this piece is of the given kind and color.
    #[inline]
    pub fn is(self, kind: PieceKind, color: Color) -> bool {
        self.kind == kind && self.color == color
    }

    /// FEN character: uppercase for White, lowercase for Black.
    #[inline]
    pub const fn fen_char(self) -> char {
        let c = self.kind.fen_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parse a FEN character, using case for the color.
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_fen_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Piece({})", self.fen_char())
    }
}

#[cfg(test)]
mod tests {
    use super::Piece;
    use crate::color::Color;
    use crate::piece_kind::PieceKind;

    #[test]
    fn fen_char_case_encodes_color() {
        assert_eq!(Piece::WHITE_KNIGHT.fen_char(), 'N');
        assert_eq!(Piece::BLACK_KNIGHT.fen_char(), 'n');
        assert_eq!(Piece::from_fen_char('Q'), Some(Piece::WHITE_QUEEN));
        assert_eq!(Piece::from_fen_char('k'), Some(Piece::BLACK_KING));
        assert_eq!(Piece::from_fen_char('7'), None);
    }

    #[test]
    fn accessors() {
        let piece = Piece::new(PieceKind::Rook, Color::Black);
        assert_eq!(piece.kind(), PieceKind::Rook);
        assert_eq!(piece.color(), Color::Black);
        assert!(piece.is(PieceKind::Rook, Color::Black));
        assert!(!piece.is(PieceKind::Rook, Color::White));
    }
}
