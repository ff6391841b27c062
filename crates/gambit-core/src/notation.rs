//! Resolving coordinate notation ("e2e4", "a7a8q") against a position.

use crate::error::MoveNotationError;
use crate::chess_move::Move;
use crate::movegen::generate_legal_moves;
use crate::position::Position;
use crate::square::Square;

impl Position {
    /// Resolve a coordinate move string to the matching legal move.
    ///
    /// The string is four characters (source then destination square)
    /// with an optional fifth promotion letter, which must be `q`. A pawn
    /// reaching the last rank promotes to a queen whether or not the letter
    /// is present. Castling is written as the king's two-square move.
    pub fn parse_uci_move(&mut self, text: &str) -> Result<Move, MoveNotationError> {
        let notation = text.trim();
        let owned = || notation.to_string();

        if !notation.is_ascii() || !(4..=5).contains(&notation.len()) {
            return Err(MoveNotationError::BadLength { notation: owned() });
        }

        let from = Square::from_algebraic(&notation[0..2]);
        let to = Square::from_algebraic(&notation[2..4]);
        let (Some(from), Some(to)) = (from, to) else {
            return Err(MoveNotationError::BadSquare { notation: owned() });
        };

        if let Some(letter) = notation[4..].chars().next()
            && !letter.eq_ignore_ascii_case(&'q')
        {
            return Err(MoveNotationError::UnsupportedPromotion { notation: owned() });
        }

        if self.piece_at(from).is_none() {
            return Err(MoveNotationError::EmptySource {
                notation: owned(),
                square: from,
            });
        }

        generate_legal_moves(self)
            .into_iter()
            .find(|mv| mv.from() == from && mv.to() == to)
            .ok_or_else(|| MoveNotationError::IllegalMove { notation: owned() })
    }
}

#[cfg(test)]
mod tests {
    use crate::chess_move::MoveKind;
    use crate::error::MoveNotationError;
    use crate::piece::Piece;
    use crate::position::Position;

    #[test]
    fn resolves_quiet_and_capture() {
        let mut pos: Position = "4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1".parse().unwrap();
        let push = pos.parse_uci_move("e4e5").unwrap();
        assert_eq!(push.captured(), None);
        let take = pos.parse_uci_move("e4d5").unwrap();
        assert_eq!(take.captured(), Some(Piece::BLACK_PAWN));
    }

    #[test]
    fn resolves_special_moves() {
        let mut pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        assert_eq!(pos.parse_uci_move("e1g1").unwrap().kind(), MoveKind::Castling);

        let mut pos: Position = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        let ep = pos.parse_uci_move("e5d6").unwrap();
        assert_eq!(ep.kind(), MoveKind::EnPassant);
        assert_eq!(ep.captured(), Some(Piece::BLACK_PAWN));

        let mut pos: Position = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        assert!(pos.parse_uci_move("a7a8q").unwrap().is_promotion());
        assert!(pos.parse_uci_move("a7a8").unwrap().is_promotion());
    }

    #[test]
    fn rejects_malformed_text() {
        let mut pos = Position::starting_position();
        assert!(matches!(pos.parse_uci_move("e2"), Err(MoveNotationError::BadLength { .. })));
        assert!(matches!(pos.parse_uci_move("e2e4e5"), Err(MoveNotationError::BadLength { .. })));
        assert!(matches!(pos.parse_uci_move("z2e4"), Err(MoveNotationError::BadSquare { .. })));
        assert!(matches!(
            pos.parse_uci_move("e3e4"),
            Err(MoveNotationError::EmptySource { .. })
        ));
    }

    #[test]
    fn rejects_underpromotion_and_illegal_moves() {
        let mut pos: Position = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        assert!(matches!(
            pos.parse_uci_move("a7a8n"),
            Err(MoveNotationError::UnsupportedPromotion { .. })
        ));
        let mut pos = Position::starting_position();
        assert!(matches!(
            pos.parse_uci_move("e2e5"),
            Err(MoveNotationError::IllegalMove { .. })
        ));
        assert!(matches!(
            pos.parse_uci_move("e7e5"),
            Err(MoveNotationError::IllegalMove { .. })
        ));
    }
}
