//! In-place move application and exact reversal.

use crate::castle_rights::CastleSide;
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::position::{Irreversible, Position};
use crate::square::Square;

/// Corner and destination squares of the rook in a castling move.
fn castling_rook_squares(king_move: Move) -> Option<(Square, Square)> {
    let side = CastleSide::from_king_dest_col(king_move.to().col());
    let row = king_move.from().row();
    Some((
        Square::new(row, side.rook_from_col())?,
        Square::new(row, side.rook_dest_col())?,
    ))
}

impl Position {
    /// Apply a legal move generated from this position.
    ///
    /// Updates the board, king location, castling rights, en-passant target,
    /// both move counters and the repetition table, and pushes one entry on
    /// the move log and the snapshot log.
    pub fn make_move(&mut self, mv: Move) {
        let us = self.side_to_move;
        let moved = mv.piece();

        self.undo_log.push(Irreversible {
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
        });
        self.move_log.push(mv);

        self.set(mv.from(), None);
        if mv.is_en_passant() {
            self.set(mv.capture_square(), None);
        }
        self.set(mv.to(), Some(mv.placed_piece()));

        if moved.kind() == PieceKind::King {
            self.king_squares[us.index()] = mv.to();
            self.castling = self.castling.remove_color(us);
        }

        if mv.is_castling()
            && let Some((rook_from, rook_to)) = castling_rook_squares(mv)
        {
            let rook = self.piece_at(rook_from);
            self.set(rook_from, None);
            self.set(rook_to, rook);
        }

        let double_push =
            moved.kind() == PieceKind::Pawn && mv.from().row().abs_diff(mv.to().row()) == 2;
        self.en_passant = if double_push {
            Square::new((mv.from().row() + mv.to().row()) / 2, mv.from().col())
        } else {
            None
        };

        // A rook leaving its corner, or anything landing on one, ends that right.
        self.castling = self.castling.revoke_square(mv.from()).revoke_square(mv.to());

        if moved.kind() == PieceKind::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side_to_move = !us;
        *self.history.entry(self.key()).or_insert(0) += 1;
    }

    /// Reverse the most recent move exactly, returning it.
    ///
    /// Castling rights, en-passant target and halfmove clock come from the
    /// snapshot log rather than being recomputed. Returns `None` and changes
    /// nothing when the move log is empty.
    pub fn undo_move(&mut self) -> Option<Move> {
        if self.move_log.is_empty() || self.undo_log.is_empty() {
            return None;
        }

        let key = self.key();
        if let Some(count) = self.history.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.history.remove(&key);
            }
        }

        let mv = self.move_log.pop()?;
        let saved = self.undo_log.pop()?;
        let us = !self.side_to_move;

        self.set(mv.to(), None);
        self.set(mv.from(), Some(mv.piece()));
        if let Some(captured) = mv.captured() {
            self.set(mv.capture_square(), Some(captured));
        }

        if mv.piece().kind() == PieceKind::King {
            self.king_squares[us.index()] = mv.from();
        }

        if mv.is_castling()
            && let Some((rook_from, rook_to)) = castling_rook_squares(mv)
        {
            let rook = self.piece_at(rook_to);
            self.set(rook_to, None);
            self.set(rook_from, rook);
        }

        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_sub(1);
        }
        self.side_to_move = us;
        self.castling = saved.castling;
        self.en_passant = saved.en_passant;
        self.halfmove_clock = saved.halfmove_clock;

        Some(mv)
    }
}

#[cfg(test)]
mod tests {
    use crate::castle_rights::CastleSide;
    use crate::color::Color;
    use crate::movegen::generate_legal_moves;
    use crate::piece::Piece;
    use crate::position::Position;
    use crate::square::Square;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    /// Find the legal move with the given coordinate notation.
    fn legal(pos: &mut Position, uci: &str) -> crate::chess_move::Move {
        generate_legal_moves(pos)
            .into_iter()
            .find(|m| m.to_uci() == uci)
            .unwrap_or_else(|| panic!("{uci} is not legal in {pos}"))
    }

    /// Make then undo `uci`, asserting the position is restored bit-for-bit.
    fn assert_roundtrip(fen: &str, uci: &str) {
        let mut pos: Position = fen.parse().unwrap();
        let before = pos.clone();
        let mv = legal(&mut pos, uci);
        pos.make_move(mv);
        assert_ne!(pos.to_fen(), before.to_fen(), "{uci} should change the position");
        assert_eq!(pos.undo_move(), Some(mv));
        assert_eq!(pos.to_fen(), before.to_fen(), "FEN not restored after {uci}");
        assert_eq!(pos, before, "state not restored after {uci}");
    }

    #[test]
    fn roundtrip_every_move_category() {
        let kiwipete = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        assert_roundtrip(kiwipete, "e2a6"); // capture
        assert_roundtrip(kiwipete, "a2a4"); // double push
        assert_roundtrip(kiwipete, "f3f5"); // quiet
        assert_roundtrip(kiwipete, "e1g1"); // short castle
        assert_roundtrip(kiwipete, "e1c1"); // long castle
        assert_roundtrip("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 3 10", "e8g8");
        assert_roundtrip("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 3 10", "e8c8");
        assert_roundtrip("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", "e5d6"); // en passant
        assert_roundtrip("1n2k3/P7/8/8/8/8/8/4K3 w - - 5 30", "a7a8q"); // promotion
        assert_roundtrip("1n2k3/P7/8/8/8/8/8/4K3 w - - 5 30", "a7b8q"); // capture promotion
        assert_roundtrip("4k3/8/8/8/8/8/p7/4K3 b - - 0 1", "a2a1q");
    }

    #[test]
    fn roundtrip_all_kiwipete_moves() {
        let mut pos: Position = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap();
        let before = pos.clone();
        for mv in generate_legal_moves(&mut pos) {
            pos.make_move(mv);
            pos.undo_move();
            assert_eq!(pos, before, "state not restored after {mv:?}");
        }
    }

    #[test]
    fn double_push_sets_en_passant_target() {
        let mut pos = Position::starting_position();
        let mv = legal(&mut pos, "e2e4");
        pos.make_move(mv);
        assert_eq!(pos.en_passant(), Some(sq("e3")));
        assert_eq!(pos.to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
        let reply = legal(&mut pos, "g8f6");
        pos.make_move(reply);
        assert_eq!(pos.en_passant(), None, "any other move clears the target");
        assert_eq!(pos.fullmove_number(), 2);
        assert_eq!(pos.halfmove_clock(), 1);
    }

    #[test]
    fn en_passant_removes_captured_pawn() {
        let mut pos: Position = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        let mv = legal(&mut pos, "e5d6");
        pos.make_move(mv);
        assert_eq!(pos.piece_at(sq("d5")), None);
        assert_eq!(pos.piece_at(sq("d6")), Some(Piece::WHITE_PAWN));
        assert_eq!(pos.halfmove_clock(), 0);
    }

    #[test]
    fn promotion_places_queen() {
        let mut pos: Position = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let mv = legal(&mut pos, "a7a8q");
        pos.make_move(mv);
        assert_eq!(pos.piece_at(sq("a8")), Some(Piece::WHITE_QUEEN));
        pos.undo_move();
        assert_eq!(pos.piece_at(sq("a7")), Some(Piece::WHITE_PAWN));
    }

    #[test]
    fn castling_moves_rook_beside_king() {
        let mut pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let mv = legal(&mut pos, "e1c1");
        pos.make_move(mv);
        assert_eq!(pos.piece_at(sq("c1")), Some(Piece::WHITE_KING));
        assert_eq!(pos.piece_at(sq("d1")), Some(Piece::WHITE_ROOK));
        assert_eq!(pos.piece_at(sq("a1")), None);
        assert_eq!(pos.king_square(Color::White), sq("c1"));
        assert!(!pos.castling().has(Color::White, CastleSide::KingSide));
        assert!(pos.castling().has(Color::Black, CastleSide::QueenSide));
    }

    #[test]
    fn rook_moves_and_captures_revoke_rights() {
        let mut pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let mv = legal(&mut pos, "h1h8");
        pos.make_move(mv);
        assert_eq!(pos.castling().to_fen(), "Qq", "moving h1 and capturing h8 drop both king sides");
        pos.undo_move();
        assert_eq!(pos.castling().to_fen(), "KQkq", "undo restores rights from the log");
    }

    #[test]
    fn king_move_clears_both_rights() {
        let mut pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1".parse().unwrap();
        let mv = legal(&mut pos, "e8d8");
        pos.make_move(mv);
        assert_eq!(pos.castling().to_fen(), "KQ");
        assert_eq!(pos.king_square(Color::Black), sq("d8"));
    }

    #[test]
    fn logs_grow_and_shrink_together() {
        let mut pos = Position::starting_position();
        for uci in ["e2e4", "e7e5", "g1f3"] {
            let mv = legal(&mut pos, uci);
            pos.make_move(mv);
        }
        assert_eq!(pos.move_log().len(), 3);
        assert_eq!(pos.castle_rights_log().count(), 3);
        assert_eq!(pos.en_passant_log().collect::<Vec<_>>(), [None, Some(sq("e3")), Some(sq("e6"))]);
        assert_eq!(pos.last_move().map(|m| m.to_uci()), Some("g1f3".to_string()));
        while pos.undo_move().is_some() {}
        assert_eq!(pos, Position::starting_position());
        assert_eq!(pos.undo_move(), None);
    }

    #[test]
    fn repetition_table_tracks_positions() {
        let mut pos = Position::starting_position();
        for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            let mv = legal(&mut pos, uci);
            pos.make_move(mv);
        }
        assert_eq!(pos.repetition_count(), 2);
        pos.undo_move();
        pos.undo_move();
        pos.undo_move();
        pos.undo_move();
        assert_eq!(pos.repetition_count(), 1);
    }
}
