//! Synchronous UCI engine loop.
//!
//! Commands are read line by line and handled to completion before the next
//! one is read. `go` blocks until a move is chosen, so `stop` has nothing to
//! interrupt.

use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use gambit_core::{Color, Game, Move};
use gambit_engine::{MATE, Origin, SearchConfig, Searcher, budget_from_go};

use crate::command::{Command, GoParams, UciOption, parse_command};
use crate::error::{ExternalEngineError, UciError};
use crate::external::{ExternalEngine, HANDSHAKE_TIMEOUT, skill_from_elo};

/// Depth used when neither `go depth`, the `Depth` option nor a skill
/// level says otherwise.
const DEFAULT_DEPTH: u8 = 4;

/// Scores this close to [`MATE`] are reported as mate distances.
const MATE_WINDOW: i32 = 256;

/// Part of a clock budget the external engine is asked to think for. The
/// rest covers process overhead and, on failure, our own search.
const EXTERNAL_SHARE_OF_BUDGET: (u32, u32) = (3, 4);

/// Configuration knobs adjustable via `setoption`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Search depth set through the `Depth` option.
    pub depth: Option<u8>,
    pub quiescence: bool,
    pub avoid_repetition: bool,
    /// External UCI engine consulted before our own search.
    pub external_engine: Option<String>,
    /// Strength passed to the external engine; also caps our depth.
    pub skill_level: Option<u8>,
    /// Move time for the external engine when `go` carries no clock.
    pub external_time: Duration,
    /// Percentage of moves for which the external engine is consulted.
    pub external_share: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: None,
            quiescence: true,
            avoid_repetition: true,
            external_engine: None,
            skill_level: None,
            external_time: Duration::from_millis(1000),
            external_share: 100,
        }
    }
}

impl EngineConfig {
    /// Depth for a `go` command: explicit `go depth` first, then the `Depth`
    /// option, then half the skill level.
    pub fn search_depth(&self, params: &GoParams) -> u8 {
        params
            .depth
            .or(self.depth)
            .or(self.skill_level.map(|skill| (skill / 2).max(1)))
            .unwrap_or(DEFAULT_DEPTH)
            .max(1)
    }
}

/// The UCI engine, holding the current game and the searcher.
#[derive(Debug)]
pub struct UciEngine {
    game: Game,
    searcher: Searcher,
    config: EngineConfig,
    external: Option<ExternalEngine>,
    rng: StdRng,
}

impl UciEngine {
    /// Create a new engine with the starting position.
    pub fn new() -> Self {
        Self::with_searcher(Searcher::default())
    }

    /// Create an engine around a given searcher, e.g. one with a fixed seed.
    pub fn with_searcher(searcher: Searcher) -> Self {
        Self {
            game: Game::new(),
            searcher,
            config: EngineConfig::default(),
            external: None,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the UCI loop until `quit` or end of input.
    ///
    /// Malformed commands are logged and skipped; only I/O errors end the
    /// loop early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<(), UciError> {
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received UCI command");

            match parse_command(trimmed) {
                Ok(Command::Quit) => break,
                Ok(cmd) => self.dispatch(cmd, out)?,
                Err(e) => warn!(error = %e, "UCI parse error"),
            }
            out.flush()?;
        }

        info!("gambit shutting down");
        Ok(())
    }

    fn dispatch<W: Write>(&mut self, cmd: Command, out: &mut W) -> Result<(), UciError> {
        match cmd {
            Command::Uci => self.handle_uci(out)?,
            Command::IsReady => writeln!(out, "readyok")?,
            Command::UciNewGame => self.game = Game::new(),
            Command::Position(game) => self.game = *game,
            Command::Go(params) => self.handle_go(&params, out)?,
            Command::SetOption(option) => self.handle_setoption(option),
            Command::Display => {
                writeln!(out, "{}", self.game.position().pretty())?;
                writeln!(out, "Fen: {}", self.game.fen())?;
            }
            Command::Stop | Command::Quit | Command::Unknown(_) => {}
        }
        Ok(())
    }

    fn handle_uci<W: Write>(&self, out: &mut W) -> Result<(), UciError> {
        writeln!(out, "id name gambit")?;
        writeln!(out, "id author gambit developers")?;
        writeln!(out, "option name Depth type spin default {DEFAULT_DEPTH} min 1 max 10")?;
        writeln!(out, "option name Quiescence type check default true")?;
        writeln!(out, "option name AvoidRepetition type check default true")?;
        writeln!(out, "option name ExternalEngine type string default <empty>")?;
        writeln!(out, "option name Skill Level type spin default 20 min 0 max 20")?;
        writeln!(out, "option name Elo type spin default 3000 min 1000 max 3000")?;
        writeln!(out, "option name ExternalTime type spin default 1000 min 10 max 60000")?;
        writeln!(out, "option name ExternalShare type spin default 100 min 0 max 100")?;
        writeln!(out, "uciok")?;
        Ok(())
    }

    fn handle_setoption(&mut self, option: UciOption) {
        debug!(?option, "setoption");
        match option {
            UciOption::Depth(depth) => self.config.depth = Some(depth),
            UciOption::Quiescence(on) => self.config.quiescence = on,
            UciOption::AvoidRepetition(on) => self.config.avoid_repetition = on,
            UciOption::ExternalEngine(program) => {
                // A new program is started lazily on the next `go`.
                self.external = None;
                self.config.external_engine = program;
            }
            UciOption::SkillLevel(skill) => self.config.skill_level = Some(skill),
            UciOption::Elo(elo) => self.config.skill_level = Some(skill_from_elo(elo)),
            UciOption::ExternalTime(time) => self.config.external_time = time,
            UciOption::ExternalShare(share) => self.config.external_share = share,
        }
    }

    fn handle_go<W: Write>(&mut self, params: &GoParams, out: &mut W) -> Result<(), UciError> {
        let start = Instant::now();
        let side = self.game.position().side_to_move();
        let budget = budget_from_go(
            params.wtime,
            params.btime,
            params.winc,
            params.binc,
            params.movestogo,
            params.movetime,
            params.infinite,
            side,
        );

        if let Some(mv) = self.consult_external(budget, start) {
            writeln!(out, "bestmove {mv}")?;
            return Ok(());
        }
        // Whatever the external engine used comes out of our budget.
        let budget = budget.map(|b| b.saturating_sub(start.elapsed()));

        *self.searcher.config_mut() = SearchConfig {
            depth: self.config.search_depth(params),
            quiescence: self.config.quiescence,
            avoid_repetition: self.config.avoid_repetition,
            time_budget: budget,
            ..SearchConfig::default()
        };

        let mut write_result = Ok(());
        let result = self
            .searcher
            .search_with(self.game.position_mut(), |depth, score, nodes, best| {
                if write_result.is_ok() {
                    write_result = write_info(out, side, depth, score, nodes, start.elapsed(), best);
                }
            });
        write_result?;

        if result.origin != Origin::Search {
            debug!(origin = ?result.origin, "search returned a random move");
        }

        match result.best_move {
            Some(mv) => writeln!(out, "bestmove {mv}")?,
            None => writeln!(out, "bestmove 0000")?,
        }
        Ok(())
    }

    /// Ask the external engine for a legal move, if one is configured.
    ///
    /// The engine is consulted on `external_share` percent of moves, drawn
    /// at random; on the others our own search decides. With a clock budget
    /// every wait ends when the budget measured from `start` is spent. Any
    /// failure is logged and yields `None`.
    fn consult_external(&mut self, budget: Option<Duration>, start: Instant) -> Option<Move> {
        let program = self.config.external_engine.clone()?;
        let share = self.config.external_share;
        if share < 100 && self.rng.random_range(0..100u8) >= share {
            debug!(share, "not consulting the external engine this move");
            return None;
        }

        let (movetime, deadline) = match budget {
            Some(budget) => {
                let (num, den) = EXTERNAL_SHARE_OF_BUDGET;
                (budget * num / den, Some(start + budget))
            }
            None => (self.config.external_time, None),
        };
        match self.external_move(&program, movetime, deadline) {
            Ok(mv) => {
                debug!(program = %program, best = %mv, "external engine move");
                Some(mv)
            }
            Err(e) => {
                warn!(error = %e, program = %program, "external engine failed, searching instead");
                // Start from a fresh process next time.
                self.external = None;
                None
            }
        }
    }

    fn external_move(
        &mut self,
        program: &str,
        movetime: Duration,
        deadline: Option<Instant>,
    ) -> Result<Move, ExternalEngineError> {
        let fen = self.game.fen();
        let engine = match self.external.take() {
            Some(engine) if engine.program() == program => engine,
            _ => {
                let handshake = Instant::now() + HANDSHAKE_TIMEOUT;
                let ready_by = deadline.map_or(handshake, |d| d.min(handshake));
                ExternalEngine::spawn_until(program, ready_by)?
            }
        };
        let engine = self.external.insert(engine);
        let uci_move = engine.best_move(&fen, self.config.skill_level, movetime, deadline)?;
        self.game
            .position_mut()
            .parse_uci_move(&uci_move)
            .map_err(|_| ExternalEngineError::IllegalMove { uci_move })
    }
}

impl Default for UciEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Write one `info` line. Scores are reported from the side to move's
/// point of view, as UCI requires.
fn write_info<W: Write>(
    out: &mut W,
    side: Color,
    depth: u8,
    score: i32,
    nodes: u64,
    elapsed: Duration,
    best: Move,
) -> std::io::Result<()> {
    let elapsed_ms = elapsed.as_millis().max(1);
    let nps = (u128::from(nodes) * 1000) / elapsed_ms;
    writeln!(
        out,
        "info depth {depth} score {} nodes {nodes} nps {nps} time {elapsed_ms} pv {best}",
        format_score(score, side)
    )
}

/// Render a White-relative score as `cp <n>` or `mate <moves>`.
fn format_score(score: i32, side: Color) -> String {
    let relative = match side {
        Color::White => score,
        Color::Black => -score,
    };
    if relative.abs() > MATE - MATE_WINDOW {
        let plies = MATE - relative.abs();
        let moves = (plies + 1) / 2;
        format!("mate {}", if relative > 0 { moves } else { -moves })
    } else {
        format!("cp {relative}")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn run_script(engine: &mut UciEngine, script: &str) -> String {
        let mut out = Vec::new();
        engine.run(Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn seeded() -> UciEngine {
        UciEngine::with_searcher(Searcher::with_seed(SearchConfig::default(), 11))
    }

    #[test]
    fn handshake_lists_options() {
        let output = run_script(&mut seeded(), "uci\nisready\n");
        assert!(output.starts_with("id name gambit\n"));
        assert!(output.contains("option name Skill Level type spin"));
        assert!(output.ends_with("uciok\nreadyok\n"), "output: {output}");
    }

    #[test]
    fn go_depth_plays_mate_in_one() {
        let script = "position fen r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4\n\
                      go depth 2\n";
        let output = run_script(&mut seeded(), script);
        assert!(output.contains("info depth 2 score mate 1"), "output: {output}");
        assert!(output.ends_with("bestmove h5f7\n"), "output: {output}");
    }

    #[test]
    fn mated_side_reports_null_move() {
        let script = "position startpos moves f2f3 e7e5 g2g4 d8h4\ngo depth 2\n";
        let output = run_script(&mut seeded(), script);
        assert_eq!(output, "bestmove 0000\n");
    }

    #[test]
    fn black_scores_are_side_relative() {
        assert_eq!(format_score(150, Color::White), "cp 150");
        assert_eq!(format_score(150, Color::Black), "cp -150");
        assert_eq!(format_score(-(MATE - 1), Color::Black), "mate 1");
        assert_eq!(format_score(MATE - 3, Color::Black), "mate -2");
    }

    #[test]
    fn parse_errors_do_not_stop_the_loop() {
        let output = run_script(&mut seeded(), "position fen garbage\ngo wtime\nisready\n");
        assert_eq!(output, "readyok\n");
    }

    #[test]
    fn quit_ends_the_loop() {
        let output = run_script(&mut seeded(), "quit\nisready\n");
        assert!(output.is_empty());
    }

    #[test]
    fn position_then_display() {
        let mut engine = seeded();
        let output = run_script(&mut engine, "position startpos moves e2e4\nd\n");
        assert!(output.contains("4  . . . . P . . ."), "output: {output}");
        assert!(output.ends_with(
            "Fen: rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1\n"
        ));
        assert_eq!(engine.game().position().move_log().len(), 1);
    }

    #[test]
    fn ucinewgame_resets_position() {
        let mut engine = seeded();
        run_script(&mut engine, "position startpos moves e2e4 e7e5\nucinewgame\n");
        assert_eq!(engine.game().fen(), gambit_core::STARTING_FEN);
    }

    #[test]
    fn setoption_updates_config() {
        let mut engine = seeded();
        run_script(
            &mut engine,
            "setoption name Depth value 3\n\
             setoption name Quiescence value false\n\
             setoption name Elo value 1600\n\
             setoption name ExternalTime value 250\n\
             setoption name ExternalShare value 50\n",
        );
        let config = engine.config();
        assert_eq!(config.depth, Some(3));
        assert!(!config.quiescence);
        assert_eq!(config.skill_level, Some(6));
        assert_eq!(config.external_time, Duration::from_millis(250));
        assert_eq!(config.external_share, 50);
    }

    #[test]
    fn search_depth_precedence() {
        let mut config = EngineConfig::default();
        let bare = GoParams::default();
        assert_eq!(config.search_depth(&bare), DEFAULT_DEPTH);
        config.skill_level = Some(1);
        assert_eq!(config.search_depth(&bare), 1);
        config.skill_level = Some(12);
        assert_eq!(config.search_depth(&bare), 6);
        config.depth = Some(3);
        assert_eq!(config.search_depth(&bare), 3);
        let explicit = GoParams {
            depth: Some(2),
            ..GoParams::default()
        };
        assert_eq!(config.search_depth(&explicit), 2);
    }

    #[test]
    fn broken_external_engine_falls_back_to_search() {
        let script = "setoption name ExternalEngine value /nonexistent/gambit-test-engine\n\
                      position fen 6k1/5ppp/8/3r4/8/2N5/5PPP/6K1 w - - 0 1\n\
                      go depth 2\n";
        let output = run_script(&mut seeded(), script);
        assert!(output.ends_with("bestmove c3d5\n"), "output: {output}");
    }
}
