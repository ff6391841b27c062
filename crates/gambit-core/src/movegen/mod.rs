//! Legal move generation.

mod king;
mod knights;
mod pawns;
mod pins;
mod probe;
mod sliders;

use crate::chess_move::Move;
use crate::direction::Direction;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

use self::king::gen_king;
use self::knights::gen_knight;
use self::pawns::gen_pawn;
use self::sliders::gen_slider;

pub use self::pins::{Check, CheckInfo, Pin, checks_and_pins};

/// Growable buffer of generated moves. Reserves room for the usual maximum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Create an empty move list.
    pub fn new() -> MoveList {
        MoveList {
            moves: Vec::with_capacity(64),
        }
    }

    /// Push a move onto the list.
    #[inline]
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Return the number of moves in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Return `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Return a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Mutable slice, for in-place ordering.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves
    }

    /// Iterate over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Return `true` if the list holds `mv`.
    #[inline]
    pub fn contains(&self, mv: Move) -> bool {
        self.moves.contains(&mv)
    }

    /// Keep only the moves matching `keep`.
    #[inline]
    pub fn retain(&mut self, keep: impl FnMut(&Move) -> bool) {
        self.moves.retain(keep);
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;
    #[inline]
    fn index(&self, index: usize) -> &Move {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;
    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

/// Generate all legal moves for the side to move.
///
/// Takes `&mut` because king and en-passant legality are answered by
/// briefly editing the board; the position is unchanged on return.
pub fn generate_legal_moves(pos: &mut Position) -> MoveList {
    let info = checks_and_pins(pos);
    generate_with_info(pos, &info)
}

/// Generate legal moves given an already computed check/pin scan.
pub fn generate_with_info(pos: &mut Position, info: &CheckInfo) -> MoveList {
    let mut list = MoveList::new();

    match info.checks.as_slice() {
        [] => {
            gen_piece_moves(pos, info, &mut list);
            gen_king(pos, true, &mut list);
        }
        [check] => {
            // Single check: capture the checker, block its ray, or move the king.
            let king_sq = pos.king_square(pos.side_to_move());
            let valid = check.resolving_squares(king_sq);
            gen_piece_moves(pos, info, &mut list);
            list.retain(|mv| {
                valid.contains(&mv.to()) || (mv.is_en_passant() && valid.contains(&mv.capture_square()))
            });
            gen_king(pos, false, &mut list);
        }
        _ => {
            // Double check: only the king can move.
            gen_king(pos, false, &mut list);
        }
    }

    list
}

/// Pin-aware moves for every non-king piece of the side to move.
fn gen_piece_moves(pos: &mut Position, info: &CheckInfo, list: &mut MoveList) {
    let us = pos.side_to_move();
    for sq in Square::all() {
        let Some(piece) = pos.piece_at(sq) else {
            continue;
        };
        if piece.color() != us {
            continue;
        }
        let pin = info.pin_direction(sq);
        match piece.kind() {
            PieceKind::Pawn => gen_pawn(pos, sq, piece, pin, list),
            PieceKind::Knight if pin.is_none() => gen_knight(pos, sq, piece, list),
            PieceKind::Knight => {}
            PieceKind::Bishop => gen_slider(pos, sq, piece, &Direction::DIAGONAL, pin, list),
            PieceKind::Rook => gen_slider(pos, sq, piece, &Direction::ORTHOGONAL, pin, list),
            PieceKind::Queen => gen_slider(pos, sq, piece, &Direction::ALL, pin, list),
            PieceKind::King => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn starting_position_20_moves() {
        let mut pos = Position::starting_position();
        let moves = generate_legal_moves(&mut pos);
        assert_eq!(
            moves.len(),
            20,
            "starting position should have 20 legal moves, got {}",
            moves.len()
        );
    }

    #[test]
    fn generation_leaves_position_untouched() {
        let mut pos: Position = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap();
        let before = pos.clone();
        let moves = generate_legal_moves(&mut pos);
        assert_eq!(moves.len(), 48);
        assert_eq!(pos, before);
    }

    #[test]
    fn double_check_king_only() {
        let mut pos: Position = "4r1k1/8/8/8/8/5n2/8/4K3 w - - 0 1".parse().unwrap();
        let moves = generate_legal_moves(&mut pos);
        assert!(!moves.is_empty());
        for mv in &moves {
            assert_eq!(
                mv.piece().kind(),
                PieceKind::King,
                "in double check, only king moves should be legal, but got {mv:?}"
            );
        }
    }

    #[test]
    fn single_check_allows_block_and_capture() {
        // Rook e8 checks; the bishop can take it or interpose on e2.
        let mut pos: Position = "4r2k/8/8/1B6/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let moves = generate_legal_moves(&mut pos);
        let bishop: Vec<String> = moves
            .iter()
            .filter(|m| m.piece().kind() == PieceKind::Bishop)
            .map(|m| m.to_uci())
            .collect();
        assert_eq!(bishop, ["b5e8", "b5e2"]);
    }

    #[test]
    fn checkmate_has_no_moves() {
        let mut pos: Position = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
            .parse()
            .unwrap();
        assert!(generate_legal_moves(&mut pos).is_empty());
        assert!(pos.is_in_check());
    }

    #[test]
    fn stalemate_has_no_moves() {
        let mut pos: Position = "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert!(generate_legal_moves(&mut pos).is_empty());
        assert!(!pos.is_in_check());
    }
}
