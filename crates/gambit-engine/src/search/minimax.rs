//! Minimax alpha-beta search with quiescence.
//!
//! Scores are from White's perspective throughout: White nodes maximize,
//! Black nodes minimize. Every child is visited with make/undo on the one
//! shared position.

use gambit_core::{Color, Move, MoveList, Position, generate_legal_moves};

use crate::eval::{static_eval, terminal_score};
use crate::search::control::SearchControl;
use crate::search::ordering::{order_moves, ordered_captures};

/// Score representing an unreachable upper/lower bound.
pub const INF: i32 = 1_000_000;

/// Per-search mutable state threaded through the recursion.
pub(super) struct SearchContext {
    pub(super) nodes: u64,
    pub(super) control: SearchControl,
    pub(super) quiescence: bool,
    pub(super) max_quiescence_ply: u8,
    /// Set when the deadline fired inside the tree; the score that
    /// accompanies it is meaningless.
    pub(super) aborted: bool,
}

/// Outcome of one pass over the root moves.
pub(super) enum RootOutcome {
    /// Every root move was searched.
    Completed { best: Move, score: i32 },
    /// The deadline hit first; `best` covers the moves finished before it.
    Interrupted { best: Option<(Move, i32)> },
}

/// Mate score adjusted so that nearer mates score higher for the winner.
#[inline]
fn mate_score(pos: &Position, ply: u8) -> i32 {
    let score = terminal_score(pos);
    score - score.signum() * i32::from(ply)
}

#[inline]
fn improves(maximizing: bool, score: i32, best: i32) -> bool {
    if maximizing { score > best } else { score < best }
}

/// Search each root move to `depth`, checking the clock before every one.
///
/// `moves` must already be ordered. Root moves are never pruned, so the
/// best score is exact.
pub(super) fn search_root(
    pos: &mut Position,
    moves: &MoveList,
    depth: u8,
    ctx: &mut SearchContext,
) -> RootOutcome {
    let maximizing = pos.side_to_move() == Color::White;
    let mut alpha = -INF;
    let mut beta = INF;
    let mut best: Option<(Move, i32)> = None;

    for &mv in moves {
        if ctx.control.time_up() {
            return RootOutcome::Interrupted { best };
        }

        pos.make_move(mv);
        let score = minimax(pos, depth.saturating_sub(1), 1, alpha, beta, ctx);
        pos.undo_move();

        // The interrupted subtree's score is discarded.
        if ctx.aborted {
            return RootOutcome::Interrupted { best };
        }

        if best.is_none_or(|(_, best_score)| improves(maximizing, score, best_score)) {
            best = Some((mv, score));
        }
        if maximizing {
            alpha = alpha.max(score);
        } else {
            beta = beta.min(score);
        }
    }

    match best {
        Some((best, score)) => RootOutcome::Completed { best, score },
        None => RootOutcome::Interrupted { best: None },
    }
}

/// Minimax with alpha-beta pruning.
///
/// Returns the value of `pos` searched to `depth` more plies. Positions
/// drawn by rule score 0, positions without legal moves score as mate or
/// stalemate, and the horizon is resolved by quiescence when enabled.
pub(super) fn minimax(
    pos: &mut Position,
    depth: u8,
    ply: u8,
    mut alpha: i32,
    mut beta: i32,
    ctx: &mut SearchContext,
) -> i32 {
    if depth == 0 && ctx.quiescence {
        return quiesce(pos, ply, 0, alpha, beta, ctx);
    }

    ctx.nodes += 1;
    if ctx.control.should_stop(ctx.nodes) {
        ctx.aborted = true;
        return 0;
    }

    // Mate takes precedence over a rule draw reached on the same move.
    let mut moves = generate_legal_moves(pos);
    if moves.is_empty() {
        return mate_score(pos, ply);
    }

    if ply > 0 && pos.is_draw_by_rule() {
        return 0;
    }

    if depth == 0 {
        return static_eval(pos);
    }

    order_moves(&mut moves, None);
    let maximizing = pos.side_to_move() == Color::White;
    let mut best = if maximizing { -INF } else { INF };

    for mv in moves {
        pos.make_move(mv);
        let score = minimax(pos, depth - 1, ply + 1, alpha, beta, ctx);
        pos.undo_move();

        if ctx.aborted {
            return 0;
        }

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(score);
        } else {
            best = best.min(score);
            beta = beta.min(score);
        }
        if beta <= alpha {
            break;
        }
    }

    best
}

/// Quiescence search: explore captures until the position is quiet.
///
/// The side to move may always stand pat on the static evaluation. Depth
/// is capped at `max_quiescence_ply` extra plies.
fn quiesce(
    pos: &mut Position,
    ply: u8,
    qply: u8,
    mut alpha: i32,
    mut beta: i32,
    ctx: &mut SearchContext,
) -> i32 {
    ctx.nodes += 1;
    if ctx.control.should_stop(ctx.nodes) {
        ctx.aborted = true;
        return 0;
    }

    let moves = generate_legal_moves(pos);
    if moves.is_empty() {
        return mate_score(pos, ply);
    }

    if ply > 0 && pos.is_draw_by_rule() {
        return 0;
    }

    let stand_pat = static_eval(pos);
    if qply >= ctx.max_quiescence_ply {
        return stand_pat;
    }

    let maximizing = pos.side_to_move() == Color::White;
    if maximizing {
        if stand_pat >= beta {
            return stand_pat;
        }
        alpha = alpha.max(stand_pat);
    } else {
        if stand_pat <= alpha {
            return stand_pat;
        }
        beta = beta.min(stand_pat);
    }

    let mut best = stand_pat;
    for mv in ordered_captures(&moves) {
        pos.make_move(mv);
        let score = quiesce(pos, ply.saturating_add(1), qply + 1, alpha, beta, ctx);
        pos.undo_move();

        if ctx.aborted {
            return 0;
        }

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(score);
        } else {
            best = best.min(score);
            beta = beta.min(score);
        }
        if beta <= alpha {
            break;
        }
    }

    best
}
