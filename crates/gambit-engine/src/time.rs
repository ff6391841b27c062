//! Time management: convert clock parameters to a search budget.

use std::time::Duration;

use gambit_core::Color;

/// Compute the budget for one move from remaining time and increment.
///
/// When `moves_to_go` is `None` the game is assumed to last this many more
/// moves:
///
/// | Condition   | moves left |
/// |-------------|------------|
/// | With inc    | 25         |
/// | No inc      | 30         |
///
/// | Fixed parameter       | No increment | With increment        |
/// |-----------------------|--------------|-----------------------|
/// | Cap (% remaining)     | 12%          | 25%                   |
/// | Increment contributes | n/a          | `base + inc * 0.75`   |
///
/// A 10 ms overhead is reserved for communication.
pub fn compute_budget(remaining: Duration, increment: Duration, moves_to_go: Option<u32>) -> Duration {
    let remaining_ms = remaining.as_millis() as f64;

    if remaining_ms < 10.0 {
        return Duration::from_millis(1);
    }

    let overhead = 10.0;
    let usable = (remaining_ms - overhead).max(1.0);
    let inc_ms = increment.as_millis() as f64;
    let has_increment = inc_ms > 0.0;

    let mtg = match moves_to_go {
        Some(x) => x.max(1) as f64,
        None if has_increment => 25.0,
        None => 30.0,
    };

    let base = usable / mtg;
    let budget = if has_increment { base + inc_ms * 0.75 } else { base };

    let cap_pct = if has_increment { 0.25 } else { 0.12 };
    // An explicit movestogo of 1 may use everything that is left.
    let cap = if moves_to_go == Some(1) { usable } else { usable * cap_pct };

    let budget = budget.min(cap).max(1.0);
    Duration::from_millis(budget as u64)
}

/// Derive a search budget from UCI `go` parameters and the side to move.
///
/// Priority order:
/// 1. `infinite: true` -> no budget
/// 2. `movetime: Some(d)` -> `d`
/// 3. `wtime/btime` present for the side to move -> [`compute_budget`]
/// 4. `depth` only / bare `go` -> no budget
#[allow(clippy::too_many_arguments)]
pub fn budget_from_go(
    wtime: Option<Duration>,
    btime: Option<Duration>,
    winc: Option<Duration>,
    binc: Option<Duration>,
    movestogo: Option<u32>,
    movetime: Option<Duration>,
    infinite: bool,
    side: Color,
) -> Option<Duration> {
    if infinite {
        return None;
    }

    if movetime.is_some() {
        return movetime;
    }

    // Pick the time/increment for the side to move
    let (remaining, increment) = match side {
        Color::White => (wtime, winc),
        Color::Black => (btime, binc),
    };

    remaining.map(|rem| compute_budget(rem, increment.unwrap_or(Duration::ZERO), movestogo))
}
