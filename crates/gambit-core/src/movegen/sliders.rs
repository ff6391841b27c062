//! Bishop, rook and queen move generation.

use crate::chess_move::Move;
use crate::direction::Direction;
use crate::piece::Piece;
use crate::position::Position;
use crate::square::Square;

use super::MoveList;

/// Walk each ray until blocked, capturing the first enemy piece met.
///
/// A pinned slider only walks the rays on its pin line.
pub(super) fn gen_slider(
    pos: &Position,
    from: Square,
    slider: Piece,
    rays: &[Direction],
    pin: Option<Direction>,
    list: &mut MoveList,
) {
    for &dir in rays {
        if pin.is_some_and(|line| !line.is_aligned_with(dir)) {
            continue;
        }
        for dest in from.ray(dir) {
            match pos.piece_at(dest) {
                None => list.push(Move::new(from, dest, slider, None)),
                Some(victim) => {
                    if victim.color() != slider.color() {
                        list.push(Move::new(from, dest, slider, Some(victim)));
                    }
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::movegen::generate_legal_moves;
    use crate::position::Position;
    use crate::square::Square;

    fn moves_from(fen: &str, from: &str) -> Vec<String> {
        let mut pos: Position = fen.parse().unwrap();
        let from = Square::from_algebraic(from).unwrap();
        let mut moves: Vec<String> = generate_legal_moves(&mut pos)
            .iter()
            .filter(|m| m.from() == from)
            .map(|m| m.to_uci())
            .collect();
        moves.sort();
        moves
    }

    #[test]
    fn rook_stops_on_capture_and_before_ally() {
        let moves = moves_from("4k3/8/8/8/p7/8/P7/R3K3 w - - 0 1", "a1");
        assert_eq!(moves, ["a1b1", "a1c1", "a1d1"]);
        let moves = moves_from("4k3/8/8/8/8/p7/8/R3K3 w - - 0 1", "a1");
        assert_eq!(moves, ["a1a2", "a1a3", "a1b1", "a1c1", "a1d1"]);
    }

    #[test]
    fn queen_in_open_board() {
        assert_eq!(moves_from("8/7k/8/8/3Q4/8/8/7K w - - 0 1", "d4").len(), 27);
    }

    #[test]
    fn pinned_bishop_slides_along_pin_line_only() {
        // Bishop d2 pinned by the queen on a5 against the king on e1.
        let moves = moves_from("7k/8/8/q7/8/8/3B4/4K3 w - - 0 1", "d2");
        assert_eq!(moves, ["d2a5", "d2b4", "d2c3"]);
    }

    #[test]
    fn pinned_rook_on_diagonal_cannot_move() {
        assert!(moves_from("7k/8/8/q7/8/8/3R4/4K3 w - - 0 1", "d2").is_empty());
    }
}
