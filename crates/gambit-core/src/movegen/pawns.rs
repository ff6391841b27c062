//! Pawn move generation: pushes, captures, en passant, promotion.

use crate::chess_move::Move;
use crate::direction::Direction;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

use super::MoveList;
use super::probe::Probe;

/// Generate moves for the pawn on `from`, restricted to its pin line if pinned.
pub(super) fn gen_pawn(
    pos: &mut Position,
    from: Square,
    pawn: Piece,
    pin: Option<Direction>,
    list: &mut MoveList,
) {
    let color = pawn.color();
    let d_row = color.pawn_direction();
    let allowed = |dir: Direction| pin.is_none_or(|line| line.is_aligned_with(dir));

    let forward = Direction::new(d_row, 0);
    if allowed(forward)
        && let Some(one) = from.step(forward)
        && pos.piece_at(one).is_none()
    {
        push_pawn_move(from, one, pawn, None, list);
        if from.row() == color.pawn_start_row()
            && let Some(two) = one.step(forward)
            && pos.piece_at(two).is_none()
        {
            list.push(Move::new(from, two, pawn, None));
        }
    }

    for d_col in [-1, 1] {
        let diagonal = Direction::new(d_row, d_col);
        if !allowed(diagonal) {
            continue;
        }
        let Some(dest) = from.step(diagonal) else {
            continue;
        };
        match pos.piece_at(dest) {
            Some(victim) if victim.color() != color => {
                push_pawn_move(from, dest, pawn, Some(victim), list);
            }
            Some(_) => {}
            None if pos.en_passant() == Some(dest) => {
                let Some(victim_sq) = Square::new(from.row(), dest.col()) else {
                    continue;
                };
                if let Some(victim) = pos.piece_at(victim_sq)
                    && victim.is(PieceKind::Pawn, !color)
                {
                    let mv = Move::en_passant(from, dest, pawn, victim);
                    if en_passant_keeps_king_safe(pos, mv) {
                        list.push(mv);
                    }
                }
            }
            None => {}
        }
    }
}

fn push_pawn_move(from: Square, to: Square, pawn: Piece, captured: Option<Piece>, list: &mut MoveList) {
    if to.row() == pawn.color().promotion_row() {
        list.push(Move::promotion(from, to, pawn, captured));
    } else {
        list.push(Move::new(from, to, pawn, captured));
    }
}

/// En passant removes two pawns from one row at once, which can expose the
/// king along that row even though neither pawn was pinned on its own.
fn en_passant_keeps_king_safe(pos: &mut Position, mv: Move) -> bool {
    let us = mv.piece().color();
    let king_sq = pos.king_square(us);
    let mut probe = Probe::new(pos);
    probe.set(mv.from(), None);
    probe.set(mv.capture_square(), None);
    probe.set(mv.to(), Some(mv.piece()));
    !probe.square_under_attack(king_sq, us)
}

#[cfg(test)]
mod tests {
    use crate::movegen::generate_legal_moves;
    use crate::position::Position;
    use crate::square::Square;

    fn pawn_moves(fen: &str, from: &str) -> Vec<String> {
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
    fn single_and_double_push_from_start() {
        assert_eq!(pawn_moves("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", "e2"), ["e2e3", "e2e4"]);
        assert_eq!(pawn_moves("4k3/4p3/8/8/8/8/8/4K3 b - - 0 1", "e7"), ["e7e5", "e7e6"]);
    }

    #[test]
    fn blocked_double_push() {
        assert_eq!(pawn_moves("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1", "e2"), ["e2e3"]);
        assert!(pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", "e2").is_empty());
    }

    #[test]
    fn promotion_is_queen_only() {
        assert_eq!(pawn_moves("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7"), ["a7a8q", "a7b8q"]);
    }

    #[test]
    fn en_passant_available() {
        assert_eq!(pawn_moves("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", "e5"), ["e5d6", "e5e6"]);
    }

    #[test]
    fn en_passant_exposing_king_on_rank_is_illegal() {
        assert_eq!(pawn_moves("4k3/8/8/KPp4r/8/8/8/8 w - c6 0 1", "b5"), ["b5b6"]);
    }

    #[test]
    fn pinned_pawn_may_push_along_file() {
        // Rook e8 pins the e2 pawn to the king on e1: pushes stay on the file.
        assert_eq!(pawn_moves("4r2k/8/8/8/8/3p1p2/4P3/4K3 w - - 0 1", "e2"), ["e2e3", "e2e4"]);
    }

    #[test]
    fn pinned_pawn_may_capture_its_diagonal_pinner() {
        assert_eq!(pawn_moves("7k/8/8/8/8/5b2/4P3/3K4 w - - 0 1", "e2"), ["e2f3"]);
    }

    #[test]
    fn en_passant_resolves_pawn_check() {
        // Black d7-d5 checked the king on e4; exd6 removes the checker.
        let moves = pawn_moves("4k3/8/8/3pP3/4K3/8/8/8 w - d6 0 1", "e5");
        assert!(moves.contains(&"e5d6".to_string()), "got {moves:?}");
    }
}
