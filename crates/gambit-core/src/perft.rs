//! Perft (performance test) for move generation correctness verification.
//!
//! Promotions are queen-only, so reference counts match the published
//! tables only at depths where no underpromotion occurs.

use crate::movegen::generate_legal_moves;
use crate::position::Position;

/// Count the number of leaf nodes at the given depth.
///
/// Depth 0 returns 1 (the current position). Depth 1 returns the number
/// of legal moves without making them. The position is restored on return.
pub fn perft(pos: &mut Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(pos);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        pos.make_move(mv);
        nodes += perft(pos, depth - 1);
        pos.undo_move();
    }
    nodes
}

/// Run perft with per-move breakdown (useful for debugging).
///
/// Returns a vector of `(uci_move, node_count)` pairs sorted alphabetically.
pub fn divide(pos: &mut Position, depth: usize) -> Vec<(String, u64)> {
    let moves = generate_legal_moves(pos);
    let mut results: Vec<(String, u64)> = Vec::with_capacity(moves.len());
    for mv in moves {
        pos.make_move(mv);
        let count = if depth <= 1 { 1 } else { perft(pos, depth - 1) };
        pos.undo_move();
        results.push((mv.to_uci(), count));
    }
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
