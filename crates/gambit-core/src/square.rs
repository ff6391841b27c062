//! Board squares addressed by row and column.

use std::fmt;

use crate::direction::Direction;

/// A square on the chess board.
///
/// Row 0 is rank 8 and row 7 is rank 1; column 0 is file a. The index is
/// `row * 8 + col`, so A8 = 0 and H1 = 63. Off-board coordinates are never
/// representable: every constructor validates its input.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Total number of squares.
    pub const COUNT: usize = 64;

    pub const A1: Square = Square::at(7, 0);
    pub const C1: Square = Square::at(7, 2);
    pub const D1: Square = Square::at(7, 3);
    pub const E1: Square = Square::at(7, 4);
    pub const F1: Square = Square::at(7, 5);
    pub const G1: Square = Square::at(7, 6);
    pub const H1: Square = Square::at(7, 7);
    pub const D4: Square = Square::at(4, 3);
    pub const E4: Square = Square::at(4, 4);
    pub const D5: Square = Square::at(3, 3);
    pub const E5: Square = Square::at(3, 4);
    pub const A8: Square = Square::at(0, 0);
    pub const C8: Square = Square::at(0, 2);
    pub const D8: Square = Square::at(0, 3);
    pub const E8: Square = Square::at(0, 4);
    pub const F8: Square = Square::at(0, 5);
    pub const G8: Square = Square::at(0, 6);
    pub const H8: Square = Square::at(0, 7);

    /// Build a square from a known-valid row and column.
    const fn at(row: u8, col: u8) -> Square {
        debug_assert!(row < 8 && col < 8);
        Square(row * 8 + col)
    }

    /// Create a square from row and column, returning `None` if off the board.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Square> {
        if row < 8 && col < 8 {
            Some(Square(row * 8 + col))
        } else {
            None
        }
    }

    /// Create a square from a zero-based index, returning `None` if out of range.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Square> {
        if index < 64 {
            Some(Square(index as u8))
        } else {
            None
        }
    }

    /// Iterate over all 64 squares, row 0 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    /// Parse an algebraic notation string (e.g. "e4") into a square.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }

        let file_byte = bytes[0];
        let rank_byte = bytes[1];

        if !(b'a'..=b'h').contains(&file_byte) || !(b'1'..=b'8').contains(&rank_byte) {
            return None;
        }

        Square::new(b'8' - rank_byte, file_byte - b'a')
    }

    /// Return the zero-based index (0..63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Row, 0 = rank 8.
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Column, 0 = file a.
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// Step by a row/column delta, returning `None` when leaving the board.
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row() as i8 + d_row;
        let col = self.col() as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::at(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Step once along a direction.
    #[inline]
    pub fn step(self, dir: Direction) -> Option<Square> {
        self.offset(dir.d_row, dir.d_col)
    }

    /// Walk a ray from this square (exclusive) to the board edge.
    pub fn ray(self, dir: Direction) -> impl Iterator<Item = Square> {
        std::iter::successors(self.step(dir), move |sq| sq.step(dir))
    }

    /// Square colour parity: `true` for light squares (a8, h1).
    #[inline]
    pub const fn is_light(self) -> bool {
        (self.row() + self.col()) % 2 == 0
    }

    /// File letter `a`..`h`.
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.col()) as char
    }

    /// Rank digit `1`..`8`.
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'8' - self.row()) as char
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::Square;
    use crate::direction::Direction;

    #[test]
    fn algebraic_maps_rank_eight_to_row_zero() {
        let a8 = Square::from_algebraic("a8").unwrap();
        assert_eq!((a8.row(), a8.col()), (0, 0));
        let h1 = Square::from_algebraic("h1").unwrap();
        assert_eq!((h1.row(), h1.col()), (7, 7));
        assert_eq!(Square::from_algebraic("e4"), Some(Square::E4));
    }

    #[test]
    fn algebraic_rejects_garbage() {
        for bad in ["", "e", "e9", "i1", "e44", "E4"] {
            assert_eq!(Square::from_algebraic(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn display_roundtrip() {
        for sq in Square::all() {
            let text = sq.to_string();
            assert_eq!(Square::from_algebraic(&text), Some(sq), "roundtrip failed for {text}");
        }
    }

    #[test]
    fn offset_stays_on_board() {
        assert_eq!(Square::A8.offset(-1, 0), None);
        assert_eq!(Square::H1.offset(0, 1), None);
        assert_eq!(Square::E1.offset(-1, 0), Square::from_algebraic("e2"));
    }

    #[test]
    fn ray_walks_to_edge() {
        let squares: Vec<String> = Square::D4.ray(Direction::UP_LEFT).map(|s| s.to_string()).collect();
        assert_eq!(squares, ["c5", "b6", "a7"]);
    }

    #[test]
    fn light_and_dark_squares() {
        assert!(Square::H1.is_light());
        assert!(!Square::A1.is_light());
        assert!(Square::D1.is_light());
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert_eq!(Square::new(8, 0), None);
        assert_eq!(Square::new(0, 8), None);
        assert_eq!(Square::from_index(64), None);
    }
}
