//! Client for an external UCI engine run as a child process.
//!
//! The engine is asked for a move at a given skill level before our own
//! search runs. Every failure is reported as an [`ExternalEngineError`] so
//! the caller can fall back to searching itself.

use std::io::{self, BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::ExternalEngineError;

/// How long the engine may take to answer `uci` and `isready`.
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

/// Extra time allowed past the requested move time when the caller has no
/// deadline of its own.
pub const BESTMOVE_GRACE: Duration = Duration::from_secs(2);

/// Map a rating onto the 0..=20 skill scale.
pub fn skill_from_elo(elo: u32) -> u8 {
    (elo.saturating_sub(1000) / 100).min(20) as u8
}

/// A running external engine.
#[derive(Debug)]
pub struct ExternalEngine {
    program: String,
    child: Child,
    stdin: ChildStdin,
    lines: Receiver<String>,
}

impl ExternalEngine {
    /// Start the engine and complete the `uci` handshake.
    pub fn spawn(program: &str) -> Result<Self, ExternalEngineError> {
        Self::spawn_until(program, Instant::now() + HANDSHAKE_TIMEOUT)
    }

    /// Start the engine, giving up if `uciok` has not arrived by `deadline`.
    ///
    /// `program` is a command line: the first word is the executable, the
    /// remaining words are its arguments.
    pub fn spawn_until(program: &str, deadline: Instant) -> Result<Self, ExternalEngineError> {
        let spawn_error = |source| ExternalEngineError::Spawn {
            program: program.to_string(),
            source,
        };
        let mut words = program.split_whitespace();
        let executable = words
            .next()
            .ok_or_else(|| spawn_error(io::Error::new(io::ErrorKind::InvalidInput, "empty command")))?;

        let mut child = Command::new(executable)
            .args(words)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(spawn_error)?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ExternalEngineError::MissingPipe);
        };

        let (tx, lines) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        let mut engine = Self {
            program: program.to_string(),
            child,
            stdin,
            lines,
        };
        engine.send("uci")?;
        engine.wait_for("uciok", deadline)?;
        debug!(program, "external engine ready");
        Ok(engine)
    }

    /// The command line this engine was started from.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Ask for a move in the position given by `fen`.
    ///
    /// The engine thinks for `movetime`. Without a `deadline` the reply may
    /// take [`BESTMOVE_GRACE`] longer than that; with one, every wait ends
    /// at the deadline. Returns the move exactly as the engine printed it;
    /// legality is the caller's concern.
    pub fn best_move(
        &mut self,
        fen: &str,
        skill: Option<u8>,
        movetime: Duration,
        deadline: Option<Instant>,
    ) -> Result<String, ExternalEngineError> {
        let deadline = deadline.unwrap_or_else(|| Instant::now() + movetime + BESTMOVE_GRACE);

        if let Some(skill) = skill {
            self.send(&format!("setoption name Skill Level value {skill}"))?;
        }
        self.send("isready")?;
        self.wait_for("readyok", deadline.min(Instant::now() + HANDSHAKE_TIMEOUT))?;

        self.send(&format!("position fen {fen}"))?;
        self.send(&format!("go movetime {}", movetime.as_millis()))?;

        let reply = self.wait_for("bestmove", deadline)?;
        match reply.split_whitespace().nth(1) {
            Some(mv) if mv != "0000" && mv != "(none)" => Ok(mv.to_string()),
            _ => Err(ExternalEngineError::NoBestMove),
        }
    }

    fn send(&mut self, line: &str) -> Result<(), ExternalEngineError> {
        debug!(cmd = line, "to external engine");
        writeln!(self.stdin, "{line}")?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Read lines until one starts with `expected`, returning that line.
    fn wait_for(&self, expected: &'static str, deadline: Instant) -> Result<String, ExternalEngineError> {
        let start = Instant::now();
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            match self.lines.recv_timeout(left) {
                Ok(line) if line.starts_with(expected) => return Ok(line),
                Ok(_) => {}
                Err(RecvTimeoutError::Timeout) => {
                    return Err(ExternalEngineError::Timeout {
                        expected,
                        waited: start.elapsed(),
                    });
                }
                Err(RecvTimeoutError::Disconnected) => return Err(ExternalEngineError::Disconnected),
            }
        }
    }
}

impl Drop for ExternalEngine {
    fn drop(&mut self) {
        let _ = writeln!(self.stdin, "quit");
        let _ = self.stdin.flush();
        if let Err(e) = self.child.kill() {
            warn!(error = %e, program = %self.program, "failed to kill external engine");
        }
        let _ = self.child.wait();
    }
}
