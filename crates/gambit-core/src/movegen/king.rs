//! King move and castling generation.

use crate::castle_rights::CastleSide;
use crate::chess_move::Move;
use crate::direction::Direction;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

use super::MoveList;
use super::probe::Probe;

/// Generate legal king steps, plus castling when `allow_castling` is set.
pub(super) fn gen_king(pos: &mut Position, allow_castling: bool, list: &mut MoveList) {
    let us = pos.side_to_move();
    let king_sq = pos.king_square(us);
    let Some(king) = pos.piece_at(king_sq) else {
        return;
    };

    for dir in Direction::ALL {
        let Some(dest) = king_sq.step(dir) else {
            continue;
        };
        let captured = pos.piece_at(dest);
        if captured.is_some_and(|p| p.color() == us) {
            continue;
        }
        // The king is lifted off its square, so sliders see through it.
        let attacked = {
            let mut probe = Probe::new(pos);
            probe.move_king(us, king_sq, dest);
            probe.square_under_attack(dest, us)
        };
        if !attacked {
            list.push(Move::new(king_sq, dest, king, captured));
        }
    }

    if allow_castling {
        gen_castling(pos, king_sq, king, list);
    }
}

/// Castling: the king must stand on its home square, out of check, with the
/// rook in its corner, every square between them empty, and the two squares
/// the king crosses and lands on not attacked.
fn gen_castling(pos: &Position, king_sq: Square, king: Piece, list: &mut MoveList) {
    let us = king.color();
    let row = us.back_row();
    if king_sq.row() != row || king_sq.col() != 4 {
        return;
    }
    if pos.castling().is_empty() || pos.square_under_attack(king_sq, us) {
        return;
    }

    for side in CastleSide::ALL {
        if !pos.castling().has(us, side) {
            continue;
        }
        let rook_col = side.rook_from_col();
        let rook_home = Square::new(row, rook_col).and_then(|sq| pos.piece_at(sq));
        if rook_home != Some(Piece::new(PieceKind::Rook, us)) {
            continue;
        }

        let (lo, hi) = if rook_col < 4 { (rook_col + 1, 4) } else { (5, rook_col) };
        let path_clear = (lo..hi)
            .filter_map(|col| Square::new(row, col))
            .all(|sq| pos.piece_at(sq).is_none());
        if !path_clear {
            continue;
        }

        // Queenside leaves b1/b8 unchecked: only the rook passes it.
        let dest_col = side.king_dest_col();
        let step_col = side.rook_dest_col();
        let safe = [step_col, dest_col]
            .into_iter()
            .filter_map(|col| Square::new(row, col))
            .all(|sq| !pos.square_under_attack(sq, us));
        if !safe {
            continue;
        }

        if let Some(dest) = Square::new(row, dest_col) {
            list.push(Move::castling(king_sq, dest, king));
        }
    }
}
