//! Pin and check detection by ray casting from the king.

use crate::attacks::attacks_along;
use crate::direction::Direction;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

/// A friendly piece that may only move along `direction` (or its reverse).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    /// Square of the pinned piece.
    pub square: Square,
    /// Direction from the king toward the pinned piece.
    pub direction: Direction,
}

/// An enemy piece giving check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    /// Square of the checking piece.
    pub square: Square,
    /// Direction from the king toward the checker; a knight jump for knights.
    pub direction: Direction,
    /// The checking piece.
    pub piece: Piece,
}

impl Check {
    /// Squares a non-king move must land on to answer this check.
    ///
    /// The checker's square (capture) plus, for a sliding checker, every
    /// square between it and the king (interposition).
    pub fn resolving_squares(&self, king_sq: Square) -> Vec<Square> {
        if self.piece.kind() == PieceKind::Knight {
            return vec![self.square];
        }
        let mut squares = Vec::with_capacity(7);
        for sq in king_sq.ray(self.direction) {
            squares.push(sq);
            if sq == self.square {
                break;
            }
        }
        squares
    }
}

/// Result of scanning the side to move's king for checks and pins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckInfo {
    /// `true` if at least one enemy piece attacks the king.
    pub in_check: bool,
    /// Friendly pieces pinned to the king.
    pub pins: Vec<Pin>,
    /// Enemy pieces checking the king.
    pub checks: Vec<Check>,
}

impl CheckInfo {
    /// Pin line of the piece on `sq`, if it is pinned.
    pub fn pin_direction(&self, sq: Square) -> Option<Direction> {
        self.pins.iter().find(|pin| pin.square == sq).map(|pin| pin.direction)
    }
}

/// Find every check and pin against the side to move's king.
///
/// Each of the eight rays yields at most one pin or one check: the first
/// friendly piece is a pin candidate, and it only becomes a pin if the
/// next piece is an enemy that attacks along that ray. Knights are probed
/// separately since they can check but never pin.
pub fn checks_and_pins(pos: &Position) -> CheckInfo {
    let us = pos.side_to_move();
    let king_sq = pos.king_square(us);
    let mut info = CheckInfo::default();

    for dir in Direction::ALL {
        let mut candidate: Option<Square> = None;
        let mut distance = 0u8;
        for sq in king_sq.ray(dir) {
            distance += 1;
            let Some(piece) = pos.piece_at(sq) else {
                continue;
            };
            if piece.color() == us {
                if candidate.is_some() {
                    // Two friendly pieces shield the king on this ray.
                    break;
                }
                candidate = Some(sq);
                continue;
            }
            if attacks_along(piece, dir, distance) {
                match candidate {
                    Some(pinned) => info.pins.push(Pin {
                        square: pinned,
                        direction: dir,
                    }),
                    None => {
                        info.in_check = true;
                        info.checks.push(Check {
                            square: sq,
                            direction: dir,
                            piece,
                        });
                    }
                }
            }
            break;
        }
    }

    for jump in Direction::KNIGHT_JUMPS {
        let Some(sq) = king_sq.step(jump) else {
            continue;
        };
        if let Some(piece) = pos.piece_at(sq)
            && piece.is(PieceKind::Knight, !us)
        {
            info.in_check = true;
            info.checks.push(Check {
                square: sq,
                direction: jump,
                piece,
            });
        }
    }

    info
}

#[cfg(test)]
mod tests {
    use super::checks_and_pins;
    use crate::direction::Direction;
    use crate::position::Position;
    use crate::square::Square;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn queen_on_open_file_gives_one_check() {
        let pos: Position = "4q2k/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let info = checks_and_pins(&pos);
        assert!(info.in_check);
        assert_eq!(info.checks.len(), 1, "expected exactly one check, got {:?}", info.checks);
        assert_eq!(info.checks[0].square, sq("e8"));
        assert_eq!(info.checks[0].direction, Direction::UP);
        assert!(info.pins.is_empty());
    }

    #[test]
    fn ally_between_king_and_rook_is_pinned() {
        let pos: Position = "4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1".parse().unwrap();
        let info = checks_and_pins(&pos);
        assert!(!info.in_check);
        assert!(info.checks.is_empty());
        assert_eq!(info.pins.len(), 1);
        assert_eq!(info.pins[0].square, sq("e2"));
        assert_eq!(info.pin_direction(sq("e2")), Some(Direction::UP));
    }

    #[test]
    fn two_allies_on_ray_mean_no_pin() {
        let pos: Position = "4r2k/8/8/8/8/4B3/4N3/4K3 w - - 0 1".parse().unwrap();
        let info = checks_and_pins(&pos);
        assert!(info.pins.is_empty());
        assert!(!info.in_check);
    }

    #[test]
    fn rook_on_diagonal_neither_checks_nor_pins() {
        let pos: Position = "7k/8/8/8/8/2r5/3B4/4K3 w - - 0 1".parse().unwrap();
        let info = checks_and_pins(&pos);
        assert!(info.pins.is_empty());
        assert!(!info.in_check);
    }

    #[test]
    fn knight_and_rook_double_check() {
        let pos: Position = "4r1k1/8/8/8/8/5n2/8/4K3 w - - 0 1".parse().unwrap();
        let info = checks_and_pins(&pos);
        assert_eq!(info.checks.len(), 2);
        assert!(info.pins.is_empty(), "a knight never pins");
    }

    #[test]
    fn pawn_checks_only_from_adjacent_diagonal() {
        let checked: Position = "4k3/8/8/8/8/3p4/4K3/8 w - - 0 1".parse().unwrap();
        assert_eq!(checks_and_pins(&checked).checks.len(), 1);
        let behind: Position = "4k3/8/8/8/8/8/4K3/3p4 w - - 0 1".parse().unwrap();
        assert!(checks_and_pins(&behind).checks.is_empty());
    }

    #[test]
    fn resolving_squares_for_slider_and_knight() {
        let pos: Position = "4q2k/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let info = checks_and_pins(&pos);
        let squares = info.checks[0].resolving_squares(pos.king_square(pos.side_to_move()));
        assert_eq!(squares.len(), 7, "e2..e8 block or capture");
        assert_eq!(squares.last(), Some(&sq("e8")));

        let knight: Position = "7k/8/8/8/8/5n2/8/4K3 w - - 0 1".parse().unwrap();
        let info = checks_and_pins(&knight);
        assert_eq!(info.checks[0].resolving_squares(sq("e1")), vec![sq("f3")]);
    }
}
