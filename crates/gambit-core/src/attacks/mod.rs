//! Attack detection on the mailbox board.

use crate::color::Color;
use crate::direction::Direction;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

/// Return `true` if `piece`, found `distance` steps from a target along
/// `dir` (pointing from the target outward), attacks that target.
///
/// Sliders attack along matching rays at any distance; kings and pawns
/// only from one step away, pawns only from the side they capture toward.
pub(crate) fn attacks_along(piece: Piece, dir: Direction, distance: u8) -> bool {
    let kind = piece.kind();
    if dir.is_diagonal() {
        if kind.slides_diagonally() {
            return true;
        }
        if distance != 1 {
            return false;
        }
        match kind {
            PieceKind::King => true,
            // The pawn sits one row behind the target relative to its own
            // advance, i.e. the ray points against the pawn's direction.
            PieceKind::Pawn => dir.d_row == -piece.color().pawn_direction(),
            _ => false,
        }
    } else {
        kind.slides_orthogonally() || (distance == 1 && kind == PieceKind::King)
    }
}

impl Position {
    /// Return `true` if `sq` is attacked by any piece hostile to `defender`.
    ///
    /// Casts the eight rays outward from `sq` and checks the first piece on
    /// each, then the eight knight jumps. Works on whatever is currently on
    /// the board, so temporary probes see their own edits.
    pub fn square_under_attack(&self, sq: Square, defender: Color) -> bool {
        let attacker = defender.flip();

        for dir in Direction::ALL {
            let mut distance = 0u8;
            for target in sq.ray(dir) {
                distance += 1;
                let Some(piece) = self.piece_at(target) else {
                    continue;
                };
                if piece.color() == attacker && attacks_along(piece, dir, distance) {
                    return true;
                }
                break;
            }
        }

        Direction::KNIGHT_JUMPS.into_iter().any(|jump| {
            sq.step(jump)
                .and_then(|target| self.piece_at(target))
                .is_some_and(|piece| piece.is(PieceKind::Knight, attacker))
        })
    }

    /// Return `true` if the side to move's king is attacked.
    pub fn is_in_check(&self) -> bool {
        let us = self.side_to_move();
        self.square_under_attack(self.king_square(us), us)
    }
}
