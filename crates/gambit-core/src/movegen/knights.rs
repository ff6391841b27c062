//! Knight move generation.

use crate::chess_move::Move;
use crate::direction::Direction;
use crate::piece::Piece;
use crate::position::Position;
use crate::square::Square;

use super::MoveList;

/// Generate moves for an unpinned knight. A pinned knight has none.
pub(super) fn gen_knight(pos: &Position, from: Square, knight: Piece, list: &mut MoveList) {
    for jump in Direction::KNIGHT_JUMPS {
        let Some(dest) = from.step(jump) else {
            continue;
        };
        match pos.piece_at(dest) {
            None => list.push(Move::new(from, dest, knight, None)),
            Some(victim) if victim.color() != knight.color() => {
                list.push(Move::new(from, dest, knight, Some(victim)));
            }
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::movegen::generate_legal_moves;
    use crate::position::Position;
    use crate::square::Square;

    #[test]
    fn corner_knight_has_two_moves() {
        let mut pos: Position = "4k3/8/8/8/8/8/8/N3K3 w - - 0 1".parse().unwrap();
        let count = generate_legal_moves(&mut pos)
            .iter()
            .filter(|m| m.from() == Square::A1)
            .count();
        assert_eq!(count, 2);
    }

    #[test]
    fn pinned_knight_has_no_moves() {
        let mut pos: Position = "4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1".parse().unwrap();
        let e2 = Square::from_algebraic("e2").unwrap();
        let moves = generate_legal_moves(&mut pos);
        assert_eq!(moves.iter().filter(|m| m.from() == e2).count(), 0);
    }
}
