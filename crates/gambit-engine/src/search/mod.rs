//! Search algorithms and move ordering.

pub mod control;
pub mod minimax;
pub mod ordering;

use std::time::Duration;

use gambit_core::{Move, MoveList, Position, generate_legal_moves};
use rand::SeedableRng;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::eval::{static_eval, terminal_score};
use control::SearchControl;
use minimax::{RootOutcome, SearchContext, search_root};
use ordering::order_moves;

/// Tunable search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies to search. Values below 1 are treated as 1.
    pub depth: u8,
    /// Resolve captures past the horizon instead of evaluating statically.
    pub quiescence: bool,
    /// Maximum extra plies of quiescence search.
    pub max_quiescence_ply: u8,
    /// Wall-clock budget. When set, the search deepens iteratively up to
    /// `depth` and stops early once the budget is spent.
    pub time_budget: Option<Duration>,
    /// Replace a best move that repeats an earlier move of the game with a
    /// random legal move.
    pub avoid_repetition: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            quiescence: true,
            max_quiescence_ply: 10,
            time_budget: None,
            avoid_repetition: true,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_time_budget(mut self, budget: Option<Duration>) -> Self {
        self.time_budget = budget;
        self
    }
}

/// How the search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// The requested depth was searched in full.
    Completed,
    /// The time budget ran out first.
    Aborted,
}

/// Where the returned move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The search's own best move.
    Search,
    /// The best move repeated an earlier move, so a random one was chosen.
    RandomAfterRepetition,
    /// Time ran out before any root move was evaluated.
    RandomAfterTimeout,
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Move to play; `None` only when the side to move has no legal moves.
    pub best_move: Option<Move>,
    /// Score from White's perspective for the searched line. For a random
    /// fallback after timeout this is the static evaluation of the root.
    pub score: i32,
    /// Total nodes visited during the search.
    pub nodes: u64,
    /// Deepest fully completed iteration (0 if none).
    pub depth: u8,
    pub status: SearchStatus,
    pub origin: Origin,
}

/// Single-threaded move searcher.
///
/// Holds only configuration and the random source used by the fallbacks;
/// nothing else carries over between searches.
#[derive(Debug)]
pub struct Searcher {
    config: SearchConfig,
    rng: StdRng,
}

impl Searcher {
    /// Create a searcher seeded from the operating system.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a searcher with a fixed seed, for reproducible fallbacks.
    pub fn with_seed(config: SearchConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    /// Find the best move for the side to move.
    pub fn search(&mut self, pos: &mut Position) -> SearchResult {
        self.search_with(pos, |_, _, _, _| {})
    }

    /// Find the best move, calling `on_iter(depth, score, nodes, best)`
    /// after each completed iteration.
    ///
    /// The position is restored exactly before this returns.
    pub fn search_with<F>(&mut self, pos: &mut Position, mut on_iter: F) -> SearchResult
    where
        F: FnMut(u8, i32, u64, Move),
    {
        let mut root_moves = generate_legal_moves(pos);
        if root_moves.is_empty() {
            debug!(fen = %pos, in_check = pos.is_in_check(), "no legal moves to search");
            return SearchResult {
                best_move: None,
                score: terminal_score(pos),
                nodes: 0,
                depth: 0,
                status: SearchStatus::Completed,
                origin: Origin::Search,
            };
        }

        let target = self.config.depth.max(1);
        let mut ctx = SearchContext {
            nodes: 0,
            control: SearchControl::from_budget(self.config.time_budget),
            quiescence: self.config.quiescence,
            max_quiescence_ply: self.config.max_quiescence_ply,
            aborted: false,
        };
        // Fixed-depth searches skip the shallower iterations.
        let first = if ctx.control.is_timed() { 1 } else { target };

        let mut completed: Option<(Move, i32, u8)> = None;
        let mut partial: Option<(Move, i32)> = None;

        for depth in first..=target {
            order_moves(&mut root_moves, completed.map(|(mv, _, _)| mv));
            match search_root(pos, &root_moves, depth, &mut ctx) {
                RootOutcome::Completed { best, score } => {
                    debug!(depth, score, nodes = ctx.nodes, best = %best, "iteration complete");
                    completed = Some((best, score, depth));
                    on_iter(depth, score, ctx.nodes, best);
                }
                RootOutcome::Interrupted { best } => {
                    debug!(depth, nodes = ctx.nodes, "search interrupted by time budget");
                    partial = best;
                    break;
                }
            }
        }

        let status = match completed {
            Some((_, _, depth)) if depth == target => SearchStatus::Completed,
            _ => SearchStatus::Aborted,
        };

        let (mut best_move, score, depth, mut origin) = match (completed, partial) {
            (Some((mv, score, depth)), _) => (Some(mv), score, depth, Origin::Search),
            (None, Some((mv, score))) => (Some(mv), score, 0, Origin::Search),
            (None, None) => (
                self.random_move(&root_moves),
                static_eval(pos),
                0,
                Origin::RandomAfterTimeout,
            ),
        };

        if self.config.avoid_repetition
            && origin == Origin::Search
            && let Some(mv) = best_move
            && pos.move_log().iter().any(|played| played.same_path(mv))
        {
            info!(best = %mv, "best move repeats an earlier move, choosing at random");
            best_move = self.random_move(&root_moves);
            origin = Origin::RandomAfterRepetition;
        }

        if origin == Origin::RandomAfterTimeout {
            info!(elapsed = ?ctx.control.elapsed(), "time ran out before any move was searched, choosing at random");
        }
        info!(
            depth,
            score,
            nodes = ctx.nodes,
            best = ?best_move.map(|m| m.to_uci()),
            ?status,
            ?origin,
            "search finished"
        );

        SearchResult {
            best_move,
            score,
            nodes: ctx.nodes,
            depth,
            status,
            origin,
        }
    }

    /// Uniformly random legal move.
    fn random_move(&mut self, moves: &MoveList) -> Option<Move> {
        moves.as_slice().choose(&mut self.rng).copied()
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
