//! Move ordering: captures by victim value, then promotions, then quiet moves.

use std::cmp::Reverse;

use gambit_core::{Move, MoveList};

use crate::eval::material::piece_value;

/// Score given to the previous iteration's best move.
const HINT_SCORE: i32 = 100_000;
/// Base score for any capture; the victim's value is added on top.
const CAPTURE_BASE: i32 = 10_000;
/// Score for a non-capturing promotion.
const PROMOTION_SCORE: i32 = 5_000;

/// Score a move for ordering purposes. Higher scores are searched first.
///
/// Score bands:
/// - Captures: 10,100..10,900 by captured piece value
/// - Promotions without capture: 5,000
/// - Quiet moves and castling: 0
pub fn score_move(mv: Move) -> i32 {
    match mv.captured() {
        Some(victim) => CAPTURE_BASE + piece_value(victim.kind()),
        None if mv.is_promotion() => PROMOTION_SCORE,
        None => 0,
    }
}

/// Sort `moves` best-first in place.
///
/// The sort is stable, so moves with equal scores keep generation order.
/// `hint`, when present in the list, is placed first.
pub fn order_moves(moves: &mut MoveList, hint: Option<Move>) {
    moves.as_mut_slice().sort_by_key(|&mv| {
        if Some(mv) == hint {
            Reverse(HINT_SCORE)
        } else {
            Reverse(score_move(mv))
        }
    });
}

/// Captures only, ordered by victim value, for quiescence search.
pub fn ordered_captures(moves: &MoveList) -> Vec<Move> {
    let mut captures: Vec<Move> = moves.iter().copied().filter(|mv| mv.is_capture()).collect();
    captures.sort_by_key(|&mv| Reverse(score_move(mv)));
    captures
}

#[cfg(test)]
mod tests {
    use super::*;
    use gambit_core::{Position, generate_legal_moves};

    #[test]
    fn queen_capture_outranks_pawn_capture() {
        // Knight on d4 can take the queen on f5 or the pawn on c6.
        let mut pos: Position = "4k3/8/2p5/5q2/3N4/8/8/4K3 w - - 0 1".parse().unwrap();
        let mut moves = generate_legal_moves(&mut pos);
        order_moves(&mut moves, None);
        assert_eq!(moves[0].to_uci(), "d4f5");
        assert_eq!(moves[1].to_uci(), "d4c6");
        assert!(!moves[2].is_capture());
    }

    #[test]
    fn promotion_precedes_quiet_moves() {
        let mut pos: Position = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let mut moves = generate_legal_moves(&mut pos);
        order_moves(&mut moves, None);
        assert_eq!(moves[0].to_uci(), "a7a8q");
    }

    #[test]
    fn hint_goes_first() {
        let mut pos = Position::starting_position();
        let mut moves = generate_legal_moves(&mut pos);
        let hint = moves[moves.len() - 1];
        order_moves(&mut moves, Some(hint));
        assert_eq!(moves[0], hint);
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn quiet_order_is_stable() {
        let mut pos = Position::starting_position();
        let generated = generate_legal_moves(&mut pos);
        let mut ordered = generated.clone();
        order_moves(&mut ordered, None);
        assert_eq!(ordered, generated);
    }

    #[test]
    fn no_captures_in_starting_position() {
        let mut pos = Position::starting_position();
        assert!(ordered_captures(&generate_legal_moves(&mut pos)).is_empty());
    }
}
