//! Chess move representation.

use std::fmt;

use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// The category of a chess move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    Normal = 0,
    /// A pawn reaching the last row. Always promotes to a queen.
    Promotion = 1,
    EnPassant = 2,
    Castling = 3,
}

/// A single ply, resolved against the position it was generated from.
///
/// The moved and captured pieces are recorded at construction, so a move
/// is only meaningful for that exact position. Applying it anywhere else
/// is a logic error.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<Piece>,
    kind: MoveKind,
}

impl Move {
    /// A normal move or capture.
    #[inline]
    pub const fn new(from: Square, to: Square, piece: Piece, captured: Option<Piece>) -> Move {
        Move {
            from,
            to,
            piece,
            captured,
            kind: MoveKind::Normal,
        }
    }

    /// A pawn move onto the promotion row, with or without capture.
    #[inline]
    pub const fn promotion(from: Square, to: Square, piece: Piece, captured: Option<Piece>) -> Move {
        Move {
            from,
            to,
            piece,
            captured,
            kind: MoveKind::Promotion,
        }
    }

    /// An en-passant capture. The captured pawn sits beside `from`, not on `to`.
    #[inline]
    pub const fn en_passant(from: Square, to: Square, piece: Piece, captured: Piece) -> Move {
        Move {
            from,
            to,
            piece,
            captured: Some(captured),
            kind: MoveKind::EnPassant,
        }
    }

    /// A castling move, described by the king's two squares.
    #[inline]
    pub const fn castling(from: Square, to: Square, king: Piece) -> Move {
        Move {
            from,
            to,
            piece: king,
            captured: None,
            kind: MoveKind::Castling,
        }
    }

    /// Source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// The piece that moves.
    #[inline]
    pub const fn piece(self) -> Piece {
        self.piece
    }

    /// The piece removed from the board, if any.
    #[inline]
    pub const fn captured(self) -> Option<Piece> {
        self.captured
    }

    /// Move category.
    #[inline]
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_promotion(self) -> bool {
        self.kind == MoveKind::Promotion
    }

    #[inline]
    pub fn is_en_passant(self) -> bool {
        self.kind == MoveKind::EnPassant
    }

    #[inline]
    pub fn is_castling(self) -> bool {
        self.kind == MoveKind::Castling
    }

    /// The piece standing on the destination after the move.
    #[inline]
    pub fn placed_piece(self) -> Piece {
        if self.is_promotion() {
            Piece::new(PieceKind::Queen, self.piece.color())
        } else {
            self.piece
        }
    }

    /// Square the captured piece is removed from.
    #[inline]
    pub fn capture_square(self) -> Square {
        if self.is_en_passant() {
            // Same row as the capturing pawn, same column as the target.
            Square::new(self.from.row(), self.to.col()).unwrap_or(self.to)
        } else {
            self.to
        }
    }

    /// Same source, destination and moved piece.
    ///
    /// This is the identity used for repetition checks against a move log,
    /// where the captured piece may differ between occurrences.
    #[inline]
    pub fn same_path(self, other: Move) -> bool {
        self.from == other.from && self.to == other.to && self.piece == other.piece
    }

    /// Coordinate notation, e.g. `e2e4` or `e7e8q`.
    pub fn to_uci(self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if self.is_promotion() {
            s.push('q');
        }
        s
    }

    /// Short algebraic notation without check markers: `Nf3`, `exd5`, `e8=Q`, `O-O`.
    pub fn to_algebraic(self) -> String {
        if self.is_castling() {
            return if self.to.col() > self.from.col() {
                "O-O".to_string()
            } else {
                "O-O-O".to_string()
            };
        }

        let kind = self.piece.kind();
        let mut s = String::new();
        if kind == PieceKind::Pawn {
            if self.is_capture() {
                s.push(self.from.file_char());
                s.push('x');
            }
        } else {
            s.push_str(kind.san_prefix());
            if self.is_capture() {
                s.push('x');
            }
        }
        s.push_str(&self.to.to_string());
        if self.is_promotion() {
            s.push_str("=Q");
        }
        s
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {:?} {:?})", self.to_uci(), self.piece, self.kind)
    }
}
