//! UCI command parsing.

use std::time::Duration;

use gambit_core::{Game, Position};

use crate::error::UciError;

/// Parameters for the `go` command.
///
/// All fields are optional; a bare `go` uses defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    /// White's remaining time.
    pub wtime: Option<Duration>,
    /// Black's remaining time.
    pub btime: Option<Duration>,
    /// White's increment per move.
    pub winc: Option<Duration>,
    /// Black's increment per move.
    pub binc: Option<Duration>,
    /// Moves until next time control.
    pub movestogo: Option<u32>,
    /// Search to this depth only.
    pub depth: Option<u8>,
    /// Search for exactly this duration.
    pub movetime: Option<Duration>,
    /// No time limit; the search runs to its configured depth.
    pub infinite: bool,
}

/// An engine option set through `setoption`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciOption {
    /// Default search depth in plies.
    Depth(u8),
    /// Enable quiescence search at the horizon.
    Quiescence(bool),
    /// Replace best moves that repeat an earlier move.
    AvoidRepetition(bool),
    /// Program to consult before searching; `None` disables it.
    ExternalEngine(Option<String>),
    /// Strength passed to the external engine (0..=20).
    SkillLevel(u8),
    /// Strength as a rating, mapped onto a skill level.
    Elo(u32),
    /// Time the external engine may think when no clock is given.
    ExternalTime(Duration),
    /// Percentage of moves (0..=100) on which the external engine is asked.
    ExternalShare(u8),
}

/// A parsed UCI command.
#[derive(Debug)]
pub enum Command {
    /// `uci` -- identify the engine.
    Uci,
    /// `isready` -- synchronization ping.
    IsReady,
    /// `ucinewgame` -- reset engine state.
    UciNewGame,
    /// `position` -- set up a game with optional moves applied.
    Position(Box<Game>),
    /// `go` -- start searching with given parameters.
    Go(GoParams),
    /// `setoption name <id> [value <x>]`.
    SetOption(UciOption),
    /// `stop` -- nothing to halt, searches run to completion.
    Stop,
    /// `quit` -- exit the engine.
    Quit,
    /// `d` -- print the current board.
    Display,
    /// Unrecognized command (silently ignored per UCI convention).
    Unknown(String),
}

/// Parse a single line of UCI input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, UciError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(Command::Unknown(String::new()));
    }

    match tokens[0] {
        "uci" => Ok(Command::Uci),
        "isready" => Ok(Command::IsReady),
        "ucinewgame" => Ok(Command::UciNewGame),
        "stop" => Ok(Command::Stop),
        "quit" => Ok(Command::Quit),
        "d" => Ok(Command::Display),
        "position" => parse_position(&tokens[1..]),
        "go" => parse_go(&tokens[1..]),
        "setoption" => parse_setoption(&tokens[1..]),
        _ => Ok(Command::Unknown(tokens[0].to_string())),
    }
}

/// Parse the `position` command arguments.
///
/// Supports:
/// - `position startpos [moves e2e4 d7d5 ...]`
/// - `position fen <fen-string> [moves e2e4 d7d5 ...]`
///
/// The FEN may have 4 or 6 fields. Moves are played on a [`Game`] so the
/// resulting position carries its move log and repetition history.
fn parse_position(tokens: &[&str]) -> Result<Command, UciError> {
    let Some((&keyword, rest)) = tokens.split_first() else {
        return Err(UciError::MalformedPosition);
    };

    let moves_at = rest.iter().position(|&t| t == "moves").unwrap_or(rest.len());
    let (setup, moves) = rest.split_at(moves_at);

    let mut game = match keyword {
        "startpos" => Game::new(),
        "fen" => {
            let fen = setup.join(" ");
            let position: Position = fen
                .parse()
                .map_err(|source| UciError::InvalidFen { fen: fen.clone(), source })?;
            Game::from_position(position)
        }
        _ => return Err(UciError::MalformedPosition),
    };

    // Skip the "moves" keyword itself.
    for uci_move in moves.iter().skip(1) {
        game.play_uci(uci_move).map_err(|source| UciError::InvalidMove {
            uci_move: uci_move.to_string(),
            source,
        })?;
    }

    Ok(Command::Position(Box::new(game)))
}

/// Parse the `go` command arguments.
///
/// Supports: wtime, btime, winc, binc, movestogo, depth, movetime,
/// infinite. Unknown tokens are silently skipped.
fn parse_go(tokens: &[&str]) -> Result<Command, UciError> {
    let mut params = GoParams::default();

    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            "wtime" => {
                params.wtime = Some(parse_millis(tokens.get(i + 1), "wtime")?);
                i += 2;
            }
            "btime" => {
                params.btime = Some(parse_millis(tokens.get(i + 1), "btime")?);
                i += 2;
            }
            "winc" => {
                params.winc = Some(parse_millis(tokens.get(i + 1), "winc")?);
                i += 2;
            }
            "binc" => {
                params.binc = Some(parse_millis(tokens.get(i + 1), "binc")?);
                i += 2;
            }
            "movestogo" => {
                params.movestogo = Some(parse_int(tokens.get(i + 1), "movestogo")?);
                i += 2;
            }
            "depth" => {
                params.depth = Some(parse_int(tokens.get(i + 1), "depth")?);
                i += 2;
            }
            "movetime" => {
                params.movetime = Some(parse_millis(tokens.get(i + 1), "movetime")?);
                i += 2;
            }
            "infinite" => {
                params.infinite = true;
                i += 1;
            }
            _ => {
                // Unknown token -- skip per UCI convention
                i += 1;
            }
        }
    }

    Ok(Command::Go(params))
}

/// Parse `name <id...> [value <x...>]`. Option names may contain spaces
/// and match case-insensitively.
fn parse_setoption(tokens: &[&str]) -> Result<Command, UciError> {
    if tokens.first() != Some(&"name") {
        return Err(UciError::MalformedOption);
    }
    let rest = &tokens[1..];
    let value_at = rest.iter().position(|&t| t == "value").unwrap_or(rest.len());
    let name = rest[..value_at].join(" ");
    let value = rest.get(value_at + 1..).map(|v| v.join(" ")).unwrap_or_default();
    if name.is_empty() {
        return Err(UciError::MalformedOption);
    }

    let invalid = || UciError::InvalidOptionValue {
        name: name.clone(),
        value: value.clone(),
    };

    let option = match name.to_ascii_lowercase().as_str() {
        "depth" => {
            let depth = value.parse::<u8>().ok().filter(|d| (1..=10).contains(d));
            UciOption::Depth(depth.ok_or_else(invalid)?)
        }
        "quiescence" => UciOption::Quiescence(parse_check(&value).ok_or_else(invalid)?),
        "avoidrepetition" => UciOption::AvoidRepetition(parse_check(&value).ok_or_else(invalid)?),
        "externalengine" => {
            let program = value.trim();
            if program.is_empty() || program == "<empty>" {
                UciOption::ExternalEngine(None)
            } else {
                UciOption::ExternalEngine(Some(program.to_string()))
            }
        }
        "skill level" => {
            let skill = value.parse::<u8>().ok().filter(|s| *s <= 20);
            UciOption::SkillLevel(skill.ok_or_else(invalid)?)
        }
        "elo" => UciOption::Elo(value.parse().map_err(|_| invalid())?),
        "externaltime" => {
            let ms: u64 = value.parse().map_err(|_| invalid())?;
            UciOption::ExternalTime(Duration::from_millis(ms))
        }
        "externalshare" => {
            let share = value.parse::<u8>().ok().filter(|s| *s <= 100);
            UciOption::ExternalShare(share.ok_or_else(invalid)?)
        }
        _ => return Err(UciError::UnknownOption { name }),
    };

    Ok(Command::SetOption(option))
}

fn parse_check(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Parse a millisecond value from a token.
fn parse_millis(token: Option<&&str>, param: &str) -> Result<Duration, UciError> {
    let value = token.ok_or_else(|| UciError::MissingGoValue {
        param: param.to_string(),
    })?;
    // Clocks can go negative in some GUIs; treat that as no time left.
    let ms: i64 = value.parse().map_err(|_| UciError::InvalidGoValue {
        param: param.to_string(),
        value: value.to_string(),
    })?;
    Ok(Duration::from_millis(ms.max(0) as u64))
}

/// Parse an integer value from a token.
fn parse_int<T: std::str::FromStr>(token: Option<&&str>, param: &str) -> Result<T, UciError> {
    let value = token.ok_or_else(|| UciError::MissingGoValue {
        param: param.to_string(),
    })?;
    value.parse().map_err(|_| UciError::InvalidGoValue {
        param: param.to_string(),
        value: value.to_string(),
    })
}
